/// Domain error taxonomy
///
/// Every operation in this crate returns `Result<T, DomainError>`. The
/// variants are the recoverable, request-scoped outcomes callers must branch
/// on; `Database` and `Cache` are the fatal-at-request-scope class that the
/// boundary turns into a generic server error.
///
/// Domain variants carry the offending ids so the boundary layer can build an
/// actionable message. This crate never formats user-facing strings itself;
/// the `Display` impls exist for logs.

use uuid::Uuid;

use crate::auth::jwt::JwtError;
use crate::auth::password::PasswordError;
use crate::redis::client::RedisClientError;

/// Result type alias used throughout the crate
pub type DomainResult<T> = Result<T, DomainError>;

/// Unified error type for the taskdesk core
#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    /// Email/password pair did not authenticate
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Account exists but is frozen
    #[error("account is inactive")]
    AccountInactive,

    /// Token is validly signed but past its expiry
    #[error("token expired")]
    TokenExpired,

    /// Token is malformed, carries a bad signature, has the wrong type tag,
    /// or is absent from the revocation store's current set
    #[error("token invalid")]
    TokenInvalid,

    /// No user with the given id
    #[error("user {0} not found")]
    UserNotFound(Uuid),

    /// No group with the given id
    #[error("group {0} not found")]
    GroupNotFound(Uuid),

    /// No task with the given id
    #[error("task {0} not found")]
    TaskNotFound(Uuid),

    /// Actor lacks membership or creator rights for the operation
    #[error("not authorized")]
    NotAuthorized,

    /// User is already a member of the group
    #[error("user {user_id} is already a member of group {group_id}")]
    AlreadyMember { user_id: Uuid, group_id: Uuid },

    /// User is not a member of the group
    #[error("user {user_id} is not a member of group {group_id}")]
    NotAMember { user_id: Uuid, group_id: Uuid },

    /// Creators cannot leave their own group; they must delete it
    #[error("group creator cannot leave the group")]
    CannotLeaveAsCreator,

    /// Self-removal must go through `leave`, not `remove_member`
    #[error("self-removal is not allowed via member removal")]
    SelfRemovalNotAllowed,

    /// Email is already registered
    #[error("email {0} is already registered")]
    EmailTaken(String),

    /// Field length/format validation failed
    #[error("validation failed: {} error(s)", .0.len())]
    Validation(Vec<FieldError>),

    /// Persistence failure (connectivity, constraint outside the domain map)
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Cache failure
    #[error("cache error: {0}")]
    Cache(#[from] RedisClientError),

    /// Password hashing machinery failure (not a credential mismatch)
    #[error("password hashing error: {0}")]
    Hashing(#[from] PasswordError),
}

/// A single failed field with its message
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FieldError {
    /// Field that failed validation
    pub field: String,

    /// What was wrong with it
    pub message: String,
}

impl DomainError {
    /// Builds a `Validation` error for one field
    pub fn invalid_field(field: &str, message: &str) -> Self {
        DomainError::Validation(vec![FieldError {
            field: field.to_string(),
            message: message.to_string(),
        }])
    }

    /// Whether this is the fatal-at-request-scope class (infrastructure
    /// failure) rather than a recoverable domain outcome
    pub fn is_infrastructure(&self) -> bool {
        matches!(
            self,
            DomainError::Database(_) | DomainError::Cache(_) | DomainError::Hashing(_)
        )
    }
}

impl From<JwtError> for DomainError {
    fn from(err: JwtError) -> Self {
        match err {
            JwtError::Expired => DomainError::TokenExpired,
            _ => DomainError::TokenInvalid,
        }
    }
}

impl From<validator::ValidationErrors> for DomainError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let details: Vec<FieldError> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |error| FieldError {
                    field: field.to_string(),
                    message: error
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| "validation failed".to_string()),
                })
            })
            .collect();
        DomainError::Validation(details)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_carries_ids() {
        let user_id = Uuid::new_v4();
        let group_id = Uuid::new_v4();

        let err = DomainError::AlreadyMember { user_id, group_id };
        assert!(err.to_string().contains(&user_id.to_string()));
        assert!(err.to_string().contains(&group_id.to_string()));

        let err = DomainError::GroupNotFound(group_id);
        assert!(err.to_string().contains(&group_id.to_string()));
    }

    #[test]
    fn test_jwt_error_classification() {
        let err: DomainError = JwtError::Expired.into();
        assert!(matches!(err, DomainError::TokenExpired));

        let err: DomainError = JwtError::ValidationError("bad signature".to_string()).into();
        assert!(matches!(err, DomainError::TokenInvalid));
    }

    #[test]
    fn test_infrastructure_classification() {
        assert!(DomainError::Database(sqlx::Error::PoolClosed).is_infrastructure());
        assert!(!DomainError::NotAuthorized.is_infrastructure());
        assert!(!DomainError::TokenExpired.is_infrastructure());
    }

    #[test]
    fn test_invalid_field_helper() {
        let err = DomainError::invalid_field("title", "too short");
        match err {
            DomainError::Validation(details) => {
                assert_eq!(details.len(), 1);
                assert_eq!(details[0].field, "title");
            }
            other => panic!("expected Validation, got {:?}", other),
        }
    }
}
