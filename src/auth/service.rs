/// Authentication service
///
/// Owns the login/refresh/resolve/password-change flows. All dependencies
/// (database pool, token store, JWT configuration) are injected at
/// construction; there is no ambient state.
///
/// # Token lifecycle
///
/// A token is honored only when it both verifies under the signing key and
/// is present in the revocation store's current set for its subject and
/// kind. Login and password change revoke every outstanding token of both
/// kinds before storing the fresh pair; a refresh revokes outstanding
/// access tokens and issues a new one while the refresh token stays valid
/// until logout, password change, or expiry.
///
/// # Write ordering
///
/// Persistence writes happen before cache writes. A cache failure after a
/// successful persistence write propagates as a retryable error; it never
/// rolls the persistence write back.
///
/// # Example
///
/// ```no_run
/// use taskdesk::auth::AuthService;
/// use taskdesk::config::JwtConfig;
/// use taskdesk::redis::TokenStore;
/// # use sqlx::PgPool;
/// # use taskdesk::redis::RedisClient;
///
/// # async fn example(pool: PgPool, redis: RedisClient) -> anyhow::Result<()> {
/// let auth = AuthService::new(
///     pool,
///     TokenStore::new(redis),
///     JwtConfig::new("your-secret-key-at-least-32-bytes"),
/// );
///
/// let (user, pair) = auth.login("user@example.com", "Passw0rd1").await?;
/// let resolved = auth.resolve(&pair.access_token).await?;
/// assert_eq!(resolved.id, user.id);
/// # Ok(())
/// # }
/// ```

use chrono::Duration;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use tracing::{debug, info};
use uuid::Uuid;

use super::jwt::{self, Claims, TokenType};
use super::password::{hash_password, validate_password_strength, verify_password};
use crate::config::JwtConfig;
use crate::error::{DomainError, DomainResult};
use crate::models::user::{UpdateUser, User};
use crate::redis::TokenStore;

/// A freshly issued access/refresh token pair
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPair {
    /// Short-lived access token
    pub access_token: String,

    /// Long-lived refresh token
    pub refresh_token: String,
}

/// Authentication flows over the user table and the revocation store
#[derive(Clone)]
pub struct AuthService {
    pool: PgPool,
    tokens: TokenStore,
    jwt: JwtConfig,
}

impl AuthService {
    /// Creates the service with explicit dependencies
    pub fn new(pool: PgPool, tokens: TokenStore, jwt: JwtConfig) -> Self {
        Self { pool, tokens, jwt }
    }

    /// Authenticates credentials and starts a fresh session
    ///
    /// Previous tokens of both kinds are revoked, so a login supersedes all
    /// earlier sessions for the user.
    ///
    /// # Errors
    ///
    /// - `InvalidCredentials`: unknown email or wrong password
    /// - `AccountInactive`: credentials are correct but the account is frozen
    pub async fn login(&self, email: &str, password: &str) -> DomainResult<(User, TokenPair)> {
        let user = User::find_by_email(&self.pool, email)
            .await?
            .ok_or(DomainError::InvalidCredentials)?;

        // A malformed stored hash counts as a non-match, never a panic
        let valid = verify_password(password, &user.password_hash).unwrap_or(false);
        if !valid {
            return Err(DomainError::InvalidCredentials);
        }

        if !user.is_active {
            return Err(DomainError::AccountInactive);
        }

        let pair = self.issue_pair(user.id)?;

        self.tokens.revoke_all(user.id, TokenType::Access).await?;
        self.tokens.revoke_all(user.id, TokenType::Refresh).await?;
        self.store_pair(user.id, &pair).await?;

        info!(user_id = %user.id, "User logged in");
        Ok((user, pair))
    }

    /// Exchanges a valid refresh token for a new access token
    ///
    /// Outstanding access tokens are revoked; the refresh token itself is
    /// not rotated and remains valid for further exchanges.
    ///
    /// # Errors
    ///
    /// - `TokenExpired`: the refresh token's expiry has passed (re-login)
    /// - `TokenInvalid`: wrong type tag, bad signature, unknown subject, or
    ///   the token was rotated out of the store (replay)
    /// - `AccountInactive`: the subject's account is frozen
    pub async fn refresh(&self, refresh_token: &str) -> DomainResult<String> {
        let claims = jwt::validate_refresh_token(refresh_token, &self.jwt.secret)?;

        let present = self
            .tokens
            .contains(claims.sub, TokenType::Refresh, refresh_token)
            .await?;
        if !present {
            debug!(user_id = %claims.sub, "Refresh token not in current set, rejecting");
            return Err(DomainError::TokenInvalid);
        }

        let user = User::find_by_id(&self.pool, claims.sub)
            .await?
            .ok_or(DomainError::TokenInvalid)?;

        if !user.is_active {
            return Err(DomainError::AccountInactive);
        }

        let access_token = self.issue(user.id, TokenType::Access)?;

        self.tokens.revoke_all(user.id, TokenType::Access).await?;
        self.tokens
            .add(
                user.id,
                TokenType::Access,
                &access_token,
                self.jwt.access_ttl_minutes,
            )
            .await?;

        debug!(user_id = %user.id, "Access token refreshed");
        Ok(access_token)
    }

    /// Resolves an access token to a live, active user
    ///
    /// Called on every authenticated request; the HTTP layer extracts the
    /// bearer token and hands it here.
    ///
    /// # Errors
    ///
    /// - `TokenExpired`: validly signed but past expiry
    /// - `TokenInvalid`: anything else wrong with the token, including
    ///   server-side revocation
    /// - `AccountInactive`: subject exists but is frozen
    pub async fn resolve(&self, access_token: &str) -> DomainResult<User> {
        let claims = jwt::validate_access_token(access_token, &self.jwt.secret)?;

        let present = self
            .tokens
            .contains(claims.sub, TokenType::Access, access_token)
            .await?;
        if !present {
            return Err(DomainError::TokenInvalid);
        }

        let user = User::find_by_id(&self.pool, claims.sub)
            .await?
            .ok_or(DomainError::TokenInvalid)?;

        if !user.is_active {
            return Err(DomainError::AccountInactive);
        }

        Ok(user)
    }

    /// Changes a user's password and invalidates all prior sessions
    ///
    /// The hash is persisted first; only then are outstanding tokens of both
    /// kinds revoked and a brand-new pair issued, so other sessions are
    /// forced to re-authenticate.
    ///
    /// # Errors
    ///
    /// - `UserNotFound`: unknown user id
    /// - `InvalidCredentials`: current password does not verify
    /// - `Validation`: new password fails the strength rules
    pub async fn change_password(
        &self,
        user_id: Uuid,
        current_password: &str,
        new_password: &str,
    ) -> DomainResult<TokenPair> {
        let user = User::find_by_id(&self.pool, user_id)
            .await?
            .ok_or(DomainError::UserNotFound(user_id))?;

        let valid = verify_password(current_password, &user.password_hash).unwrap_or(false);
        if !valid {
            return Err(DomainError::InvalidCredentials);
        }

        validate_password_strength(new_password)
            .map_err(|msg| DomainError::invalid_field("new_password", &msg))?;

        let password_hash = hash_password(new_password)?;

        // Persistence first; a cache failure below is retryable and must not
        // undo the password change
        User::update(
            &self.pool,
            user.id,
            UpdateUser {
                password_hash: Some(password_hash),
                ..Default::default()
            },
        )
        .await?
        .ok_or(DomainError::UserNotFound(user_id))?;

        self.tokens.revoke_all(user.id, TokenType::Access).await?;
        self.tokens.revoke_all(user.id, TokenType::Refresh).await?;

        let pair = self.issue_pair(user.id)?;
        self.store_pair(user.id, &pair).await?;

        info!(user_id = %user.id, "Password changed, all prior sessions revoked");
        Ok(pair)
    }

    /// Ends every session for a user by clearing both token sets
    pub async fn logout(&self, user_id: Uuid) -> DomainResult<()> {
        self.tokens.revoke_all(user_id, TokenType::Access).await?;
        self.tokens.revoke_all(user_id, TokenType::Refresh).await?;

        info!(user_id = %user_id, "User logged out");
        Ok(())
    }

    /// Signs one token of the given kind for a subject
    fn issue(&self, user_id: Uuid, kind: TokenType) -> DomainResult<String> {
        let ttl = match kind {
            TokenType::Access => Duration::minutes(self.jwt.access_ttl_minutes),
            TokenType::Refresh => Duration::minutes(self.jwt.refresh_ttl_minutes),
        };

        let claims = Claims::new(user_id, kind, ttl);
        Ok(jwt::create_token(&claims, &self.jwt.secret)?)
    }

    /// Signs an access/refresh pair for a subject
    fn issue_pair(&self, user_id: Uuid) -> DomainResult<TokenPair> {
        Ok(TokenPair {
            access_token: self.issue(user_id, TokenType::Access)?,
            refresh_token: self.issue(user_id, TokenType::Refresh)?,
        })
    }

    /// Records a freshly issued pair in the revocation store
    async fn store_pair(&self, user_id: Uuid, pair: &TokenPair) -> DomainResult<()> {
        self.tokens
            .add(
                user_id,
                TokenType::Access,
                &pair.access_token,
                self.jwt.access_ttl_minutes,
            )
            .await?;
        self.tokens
            .add(
                user_id,
                TokenType::Refresh,
                &pair.refresh_token,
                self.jwt.refresh_ttl_minutes,
            )
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    // Login/refresh/resolve flows need Postgres and Redis; they are covered
    // by tests/auth_flow_tests.rs. The codec and store pieces have their own
    // unit tests in their modules.
}
