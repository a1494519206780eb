/// Configuration management
///
/// Loads configuration from environment variables into type-safe structs.
/// Every service takes its configuration at construction; nothing in this
/// crate reads the environment after startup.
///
/// # Environment Variables
///
/// - `DATABASE_URL`: PostgreSQL connection string (required)
/// - `DATABASE_MAX_CONNECTIONS`: Pool size (default: 10)
/// - `REDIS_URL`: Redis connection URL (required)
/// - `JWT_SECRET`: Secret key for JWT signing, at least 32 chars (required)
/// - `ACCESS_TOKEN_EXPIRE_MINUTES`: Access token TTL (default: 30)
/// - `REFRESH_TOKEN_EXPIRE_MINUTES`: Refresh token TTL (default: 10080, 7 days)
///
/// # Example
///
/// ```no_run
/// use taskdesk::config::Config;
///
/// # fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// println!("Access tokens live {} minutes", config.jwt.access_ttl_minutes);
/// # Ok(())
/// # }
/// ```

use serde::{Deserialize, Serialize};
use std::env;

/// Complete core configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Database configuration
    pub database: DatabaseConfig,

    /// Redis configuration
    pub redis: RedisConfig,

    /// JWT configuration
    pub jwt: JwtConfig,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL
    pub url: String,

    /// Maximum number of connections in pool
    pub max_connections: u32,
}

/// Redis configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedisConfig {
    /// Redis connection URL
    ///
    /// Format: redis://[username:password@]host:port[/db]
    pub url: String,

    /// Command timeout in seconds
    pub command_timeout_secs: u64,
}

/// JWT configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtConfig {
    /// Secret key for JWT signing
    ///
    /// IMPORTANT: Must be kept secret and at least 32 bytes.
    /// Generate with: `openssl rand -hex 32`
    pub secret: String,

    /// Access token lifetime in minutes
    pub access_ttl_minutes: i64,

    /// Refresh token lifetime in minutes
    pub refresh_ttl_minutes: i64,
}

impl Config {
    /// Loads configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if required variables are missing, a numeric variable
    /// fails to parse, or the JWT secret is too short.
    pub fn from_env() -> anyhow::Result<Self> {
        // Load .env file if present (for development)
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL")
            .map_err(|_| anyhow::anyhow!("DATABASE_URL environment variable is required"))?;

        let max_connections = env::var("DATABASE_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "10".to_string())
            .parse::<u32>()?;

        let redis_url = env::var("REDIS_URL")
            .map_err(|_| anyhow::anyhow!("REDIS_URL environment variable is required"))?;

        let command_timeout_secs = env::var("REDIS_COMMAND_TIMEOUT_SECS")
            .unwrap_or_else(|_| "10".to_string())
            .parse::<u64>()?;

        let jwt_secret = env::var("JWT_SECRET")
            .map_err(|_| anyhow::anyhow!("JWT_SECRET environment variable is required"))?;

        if jwt_secret.len() < 32 {
            anyhow::bail!("JWT_SECRET must be at least 32 characters long");
        }

        let access_ttl_minutes = env::var("ACCESS_TOKEN_EXPIRE_MINUTES")
            .unwrap_or_else(|_| "30".to_string())
            .parse::<i64>()?;

        let refresh_ttl_minutes = env::var("REFRESH_TOKEN_EXPIRE_MINUTES")
            .unwrap_or_else(|_| "10080".to_string())
            .parse::<i64>()?;

        Ok(Self {
            database: DatabaseConfig {
                url: database_url,
                max_connections,
            },
            redis: RedisConfig {
                url: redis_url,
                command_timeout_secs,
            },
            jwt: JwtConfig {
                secret: jwt_secret,
                access_ttl_minutes,
                refresh_ttl_minutes,
            },
        })
    }
}

impl JwtConfig {
    /// Convenience constructor used by tests and embedded setups
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            access_ttl_minutes: 30,
            refresh_ttl_minutes: 10080,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jwt_config_defaults() {
        let config = JwtConfig::new("test-secret-key-at-least-32-bytes-long");
        assert_eq!(config.access_ttl_minutes, 30);
        assert_eq!(config.refresh_ttl_minutes, 10080);
    }

    #[test]
    fn test_config_clone() {
        let config = Config {
            database: DatabaseConfig {
                url: "postgresql://localhost/test".to_string(),
                max_connections: 10,
            },
            redis: RedisConfig {
                url: "redis://localhost:6379".to_string(),
                command_timeout_secs: 10,
            },
            jwt: JwtConfig::new("test-secret-key-at-least-32-bytes-long"),
        };

        let cloned = config.clone();
        assert_eq!(cloned.database.max_connections, 10);
        assert_eq!(cloned.redis.url, config.redis.url);
    }
}
