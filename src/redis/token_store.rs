/// Token revocation store
///
/// Tracks the currently valid token set per (user, token kind). A signed
/// token is usable only while it is present in this store; removing the set
/// revokes every outstanding session of that kind in one step.
///
/// Multiple tokens per kind may be valid concurrently (multi-device
/// sessions). Logout, password change, and refresh rotation all clear the
/// whole set via [`TokenStore::revoke_all`].
///
/// # Key scheme
///
/// ```text
/// user:{user_id}:{kind}  ->  SET of signed token strings, with a TTL
/// ```
///
/// # Example
///
/// ```no_run
/// use taskdesk::auth::jwt::TokenType;
/// use taskdesk::redis::token_store::TokenStore;
/// # use taskdesk::redis::client::RedisClient;
/// # use uuid::Uuid;
///
/// # async fn example(client: RedisClient) -> anyhow::Result<()> {
/// let store = TokenStore::new(client);
/// let user_id = Uuid::new_v4();
///
/// store.add(user_id, TokenType::Access, "eyJ...", 30).await?;
/// assert!(store.contains(user_id, TokenType::Access, "eyJ...").await?);
///
/// store.revoke_all(user_id, TokenType::Access).await?;
/// assert!(!store.contains(user_id, TokenType::Access, "eyJ...").await?);
/// # Ok(())
/// # }
/// ```

use redis::AsyncCommands;
use std::collections::HashSet;
use tracing::debug;
use uuid::Uuid;

use super::client::{RedisClient, RedisClientError};
use crate::auth::jwt::TokenType;

/// Revocation sets over the shared Redis client
#[derive(Clone)]
pub struct TokenStore {
    client: RedisClient,
}

impl TokenStore {
    /// Creates a store over an existing Redis client
    pub fn new(client: RedisClient) -> Self {
        Self { client }
    }

    /// Derives the set key for a (user, kind) pair
    fn key(user_id: Uuid, kind: TokenType) -> String {
        format!("user:{}:{}", user_id, kind.as_str())
    }

    /// Adds a token to the valid set and refreshes the set's expiry
    ///
    /// The TTL applies to the whole set, so adding a fresh token extends the
    /// lifetime of any tokens still in it. Expiry granularity is minutes.
    ///
    /// # Errors
    ///
    /// Returns an error if the cache is unreachable.
    pub async fn add(
        &self,
        user_id: Uuid,
        kind: TokenType,
        token: &str,
        ttl_minutes: i64,
    ) -> Result<(), RedisClientError> {
        let mut conn = self.client.get_connection();
        let key = Self::key(user_id, kind);

        let _: () = conn.sadd(&key, token).await?;
        let _: () = conn.expire(&key, ttl_minutes * 60).await?;

        debug!(%user_id, kind = kind.as_str(), ttl_minutes, "Stored token in revocation set");
        Ok(())
    }

    /// Returns the currently valid tokens for a (user, kind) pair
    ///
    /// Empty set when nothing was stored or the set expired.
    ///
    /// # Errors
    ///
    /// Returns an error if the cache is unreachable.
    pub async fn valid_tokens(
        &self,
        user_id: Uuid,
        kind: TokenType,
    ) -> Result<HashSet<String>, RedisClientError> {
        let mut conn = self.client.get_connection();
        let tokens: HashSet<String> = conn.smembers(Self::key(user_id, kind)).await?;
        Ok(tokens)
    }

    /// Checks whether a specific token is in the current valid set
    ///
    /// # Errors
    ///
    /// Returns an error if the cache is unreachable.
    pub async fn contains(
        &self,
        user_id: Uuid,
        kind: TokenType,
        token: &str,
    ) -> Result<bool, RedisClientError> {
        let mut conn = self.client.get_connection();
        let present: bool = conn.sismember(Self::key(user_id, kind), token).await?;
        Ok(present)
    }

    /// Clears the entire valid set for a (user, kind) pair
    ///
    /// Used on logout, password change, and refresh rotation. Deleting a key
    /// that does not exist is a no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if the cache is unreachable.
    pub async fn revoke_all(&self, user_id: Uuid, kind: TokenType) -> Result<(), RedisClientError> {
        let mut conn = self.client.get_connection();
        let _: () = conn.del(Self::key(user_id, kind)).await?;

        debug!(%user_id, kind = kind.as_str(), "Revoked all tokens");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_scheme() {
        let user_id = Uuid::new_v4();

        let access_key = TokenStore::key(user_id, TokenType::Access);
        assert_eq!(access_key, format!("user:{}:access", user_id));

        let refresh_key = TokenStore::key(user_id, TokenType::Refresh);
        assert_eq!(refresh_key, format!("user:{}:refresh", user_id));
    }

    #[test]
    fn test_keys_differ_per_kind() {
        let user_id = Uuid::new_v4();
        assert_ne!(
            TokenStore::key(user_id, TokenType::Access),
            TokenStore::key(user_id, TokenType::Refresh)
        );
    }
}
