/// Membership model and database operations
///
/// Join records for the many-to-many user-group relationship.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE memberships (
///     group_id UUID NOT NULL REFERENCES groups(id) ON DELETE CASCADE,
///     user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     PRIMARY KEY (group_id, user_id)
/// );
/// ```
///
/// The composite primary key is the uniqueness invariant: a user cannot join
/// the same group twice. Concurrent duplicate inserts surface as unique
/// violations, which the service maps to its already-member error.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgExecutor, PgPool};
use uuid::Uuid;

use super::user::User;

/// User-group join record
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Membership {
    /// Group ID
    pub group_id: Uuid,

    /// User ID
    pub user_id: Uuid,

    /// When the membership was created
    pub created_at: DateTime<Utc>,
}

impl Membership {
    /// Adds a user to a group
    ///
    /// Takes an executor so batch additions can run in one transaction.
    ///
    /// # Errors
    ///
    /// A duplicate (group, user) pair fails with a unique-constraint
    /// violation; callers map it to their already-member error.
    pub async fn create<'e>(
        executor: impl PgExecutor<'e>,
        group_id: Uuid,
        user_id: Uuid,
    ) -> Result<Self, sqlx::Error> {
        let membership = sqlx::query_as::<_, Membership>(
            r#"
            INSERT INTO memberships (group_id, user_id)
            VALUES ($1, $2)
            RETURNING group_id, user_id, created_at
            "#,
        )
        .bind(group_id)
        .bind(user_id)
        .fetch_one(executor)
        .await?;

        Ok(membership)
    }

    /// Checks whether a user is a member of a group
    pub async fn is_member(
        pool: &PgPool,
        group_id: Uuid,
        user_id: Uuid,
    ) -> Result<bool, sqlx::Error> {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM memberships
                WHERE group_id = $1 AND user_id = $2
            )
            "#,
        )
        .bind(group_id)
        .bind(user_id)
        .fetch_one(pool)
        .await?;

        Ok(exists)
    }

    /// Removes a user from a group
    ///
    /// # Returns
    ///
    /// True if a membership row was deleted
    pub async fn delete(pool: &PgPool, group_id: Uuid, user_id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            DELETE FROM memberships
            WHERE group_id = $1 AND user_id = $2
            "#,
        )
        .bind(group_id)
        .bind(user_id)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Lists the users who are members of a group
    ///
    /// Ordered by join date so the creator comes first.
    pub async fn list_users(pool: &PgPool, group_id: Uuid) -> Result<Vec<User>, sqlx::Error> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT u.id, u.email, u.password_hash, u.role, u.is_active, u.created_at
            FROM users u
            JOIN memberships m ON m.user_id = u.id
            WHERE m.group_id = $1
            ORDER BY m.created_at
            "#,
        )
        .bind(group_id)
        .fetch_all(pool)
        .await?;

        Ok(users)
    }
}
