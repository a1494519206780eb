/// Authentication primitives and the authentication service
///
/// # Modules
///
/// - [`password`]: Argon2id password hashing and strength validation
/// - [`jwt`]: JWT token generation and validation
/// - [`service`]: Login, refresh, resolve, and password-change flows
///
/// # Security Features
///
/// - **Password Hashing**: Argon2id with 64 MB memory, 3 iterations
/// - **JWT Tokens**: HS256 signing with configurable expiration
/// - **Revocation**: Tokens are only honored while present in the Redis
///   revocation store, despite being self-contained by signature
/// - **Constant-time Comparison**: All verification uses constant-time operations

pub mod jwt;
pub mod password;
pub mod service;

pub use service::{AuthService, TokenPair};
