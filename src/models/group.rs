/// Group model and database operations
///
/// # Schema
///
/// ```sql
/// CREATE TABLE groups (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     title VARCHAR(256) NOT NULL,
///     creator_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// `creator_id` is recorded at creation and backs the creator-rights checks
/// (delete group, remove members). Deleting a group cascades its membership
/// rows and tasks via the FK definitions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgExecutor, PgPool};
use uuid::Uuid;

/// Task group
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Group {
    /// Unique group ID (UUID v4)
    pub id: Uuid,

    /// Group title (3-256 chars, validated at the service boundary)
    pub title: String,

    /// User who created the group; holds creator rights
    pub creator_id: Uuid,

    /// When the group was created
    pub created_at: DateTime<Utc>,
}

impl Group {
    /// Creates a new group
    ///
    /// Takes an executor so group creation can share a transaction with the
    /// initial membership inserts.
    pub async fn create<'e>(
        executor: impl PgExecutor<'e>,
        title: &str,
        creator_id: Uuid,
    ) -> Result<Self, sqlx::Error> {
        let group = sqlx::query_as::<_, Group>(
            r#"
            INSERT INTO groups (title, creator_id)
            VALUES ($1, $2)
            RETURNING id, title, creator_id, created_at
            "#,
        )
        .bind(title)
        .bind(creator_id)
        .fetch_one(executor)
        .await?;

        Ok(group)
    }

    /// Finds a group by ID
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let group = sqlx::query_as::<_, Group>(
            r#"
            SELECT id, title, creator_id, created_at
            FROM groups
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(group)
    }

    /// Deletes a group
    ///
    /// Membership rows and tasks referencing the group are cascade-deleted
    /// by the FK definitions, so this is atomic at the database level.
    ///
    /// # Returns
    ///
    /// True if a row was deleted
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM groups WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
