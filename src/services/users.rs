/// User account service
///
/// Registration and account administration. Credential verification and
/// session handling live in [`crate::auth::AuthService`]; this service only
/// manages the rows themselves.

use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::auth::password::{hash_password, validate_password_strength};
use crate::error::{DomainError, DomainResult};
use crate::models::user::{CreateUser, UpdateUser, User};

/// Validated input for registering an account
#[derive(Debug, Clone, Validate)]
pub struct RegisterUserInput {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    pub password: String,
}

/// Account management operations
#[derive(Clone)]
pub struct UserService {
    pool: PgPool,
}

impl UserService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Registers a new account
    ///
    /// The email must be unused (matched case-insensitively by the database)
    /// and the password must satisfy the strength rules. The stored row
    /// carries only the hash, never the plaintext.
    ///
    /// # Errors
    ///
    /// - `Validation`: malformed email or weak password
    /// - `EmailTaken`: another account already owns the email
    pub async fn register(&self, input: RegisterUserInput) -> DomainResult<User> {
        input.validate()?;
        validate_password_strength(&input.password)
            .map_err(|msg| DomainError::invalid_field("password", &msg))?;

        if User::find_by_email(&self.pool, &input.email)
            .await?
            .is_some()
        {
            return Err(DomainError::EmailTaken(input.email));
        }

        let password_hash = hash_password(&input.password)?;

        let user = match User::create(
            &self.pool,
            CreateUser {
                email: input.email.clone(),
                password_hash,
            },
        )
        .await
        {
            Ok(user) => user,
            // The pre-check races with concurrent registration; the unique
            // index is the authority
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                return Err(DomainError::EmailTaken(input.email));
            }
            Err(e) => return Err(e.into()),
        };

        info!(user_id = %user.id, "User registered");
        Ok(user)
    }

    /// Fetches a user by id
    pub async fn get(&self, user_id: Uuid) -> DomainResult<User> {
        User::find_by_id(&self.pool, user_id)
            .await?
            .ok_or(DomainError::UserNotFound(user_id))
    }

    /// Fetches a user by email
    pub async fn get_by_email(&self, email: &str) -> DomainResult<Option<User>> {
        Ok(User::find_by_email(&self.pool, email).await?)
    }

    /// Applies partial updates to a user row
    pub async fn update(&self, user_id: Uuid, data: UpdateUser) -> DomainResult<User> {
        User::update(&self.pool, user_id, data)
            .await?
            .ok_or(DomainError::UserNotFound(user_id))
    }

    /// Flips a user's active flag
    ///
    /// Deactivated accounts fail login and token resolution until flipped
    /// back; their rows and memberships stay intact.
    pub async fn toggle_active(&self, user_id: Uuid) -> DomainResult<User> {
        let user = User::toggle_active(&self.pool, user_id)
            .await?
            .ok_or(DomainError::UserNotFound(user_id))?;

        info!(user_id = %user.id, is_active = user.is_active, "User active flag toggled");
        Ok(user)
    }

    /// Permanently deletes an account
    ///
    /// Memberships and reported tasks go with it by cascade; tasks assigned
    /// to the user stay behind with their assignee cleared.
    pub async fn delete(&self, user_id: Uuid) -> DomainResult<()> {
        let deleted = User::delete(&self.pool, user_id).await?;
        if !deleted {
            return Err(DomainError::UserNotFound(user_id));
        }

        info!(user_id = %user_id, "User deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_input_rejects_bad_email() {
        let input = RegisterUserInput {
            email: "not-an-email".to_string(),
            password: "Passw0rd1".to_string(),
        };
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_register_input_accepts_valid_email() {
        let input = RegisterUserInput {
            email: "user@example.com".to_string(),
            password: "Passw0rd1".to_string(),
        };
        assert!(input.validate().is_ok());
    }
}
