/// Redis integration
///
/// The cache tier holds exactly one thing: the currently valid token set per
/// (user, token kind). Tokens are self-contained by signature, so this store
/// is what makes server-side revocation possible.
///
/// # Modules
///
/// - `client`: Connection management with automatic reconnection and health checks
/// - `token_store`: Token revocation sets keyed by user and token kind

pub mod client;
pub mod token_store;

pub use client::{RedisClient, RedisClientError};
pub use token_store::TokenStore;
