/// Task model and database operations
///
/// # Schema
///
/// ```sql
/// CREATE TABLE tasks (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     title VARCHAR(256) NOT NULL,
///     description VARCHAR(500),
///     status VARCHAR(32) NOT NULL DEFAULT 'new',
///     priority VARCHAR(32),
///     is_done BOOLEAN NOT NULL DEFAULT FALSE,
///     reporter_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
///     assignee_id UUID REFERENCES users(id) ON DELETE SET NULL,
///     group_id UUID NOT NULL REFERENCES groups(id) ON DELETE CASCADE,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// Reporter and group are fixed at creation; only title, description,
/// status, priority, and is_done are reachable through `update`. Assignment
/// is a separate mutation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Task scoped to a group
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Task {
    /// Unique task ID (UUID v4)
    pub id: Uuid,

    /// Task title (3-256 chars, validated at the service boundary)
    pub title: String,

    /// Optional description (max 500 chars)
    pub description: Option<String>,

    /// Free-form status label (e.g. "new", "in_progress")
    pub status: String,

    /// Optional priority label
    pub priority: Option<String>,

    /// Completion flag
    pub is_done: bool,

    /// User who created the task; immutable after creation
    pub reporter_id: Uuid,

    /// Currently assigned user, if any
    pub assignee_id: Option<Uuid>,

    /// Group the task belongs to; immutable after creation
    pub group_id: Uuid,

    /// When the task was created
    pub created_at: DateTime<Utc>,
}

/// Input for creating a new task
///
/// `reporter_id` is set by the service from the acting user, never from
/// caller input.
#[derive(Debug, Clone)]
pub struct CreateTask {
    /// Task title
    pub title: String,

    /// Optional description
    pub description: Option<String>,

    /// Initial status label
    pub status: String,

    /// Optional priority label
    pub priority: Option<String>,

    /// Reporter (the creating user)
    pub reporter_id: Uuid,

    /// Optional initial assignee
    pub assignee_id: Option<Uuid>,

    /// Target group
    pub group_id: Uuid,
}

/// Partial update over the mutable task fields
///
/// Only non-None fields are written. Reporter and group are not reachable
/// through this path.
#[derive(Debug, Clone, Default)]
pub struct UpdateTask {
    /// New title
    pub title: Option<String>,

    /// New description
    pub description: Option<String>,

    /// New status label
    pub status: Option<String>,

    /// New priority label
    pub priority: Option<String>,

    /// New completion flag
    pub is_done: Option<bool>,
}

impl Task {
    /// Creates a new task
    pub async fn create(pool: &PgPool, data: CreateTask) -> Result<Self, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            INSERT INTO tasks (title, description, status, priority, reporter_id, assignee_id, group_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, title, description, status, priority, is_done,
                      reporter_id, assignee_id, group_id, created_at
            "#,
        )
        .bind(data.title)
        .bind(data.description)
        .bind(data.status)
        .bind(data.priority)
        .bind(data.reporter_id)
        .bind(data.assignee_id)
        .bind(data.group_id)
        .fetch_one(pool)
        .await?;

        Ok(task)
    }

    /// Finds a task by ID
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, title, description, status, priority, is_done,
                   reporter_id, assignee_id, group_id, created_at
            FROM tasks
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(task)
    }

    /// Applies a partial update
    ///
    /// Only non-None fields in `data` are written.
    ///
    /// # Returns
    ///
    /// The updated task, or None if no task has that id
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        data: UpdateTask,
    ) -> Result<Option<Self>, sqlx::Error> {
        let mut assignments = Vec::new();
        let mut bind_count = 1;

        if data.title.is_some() {
            bind_count += 1;
            assignments.push(format!("title = ${}", bind_count));
        }
        if data.description.is_some() {
            bind_count += 1;
            assignments.push(format!("description = ${}", bind_count));
        }
        if data.status.is_some() {
            bind_count += 1;
            assignments.push(format!("status = ${}", bind_count));
        }
        if data.priority.is_some() {
            bind_count += 1;
            assignments.push(format!("priority = ${}", bind_count));
        }
        if data.is_done.is_some() {
            bind_count += 1;
            assignments.push(format!("is_done = ${}", bind_count));
        }

        if assignments.is_empty() {
            return Self::find_by_id(pool, id).await;
        }

        let query = format!(
            "UPDATE tasks SET {} WHERE id = $1 \
             RETURNING id, title, description, status, priority, is_done, \
                       reporter_id, assignee_id, group_id, created_at",
            assignments.join(", ")
        );

        let mut q = sqlx::query_as::<_, Task>(&query).bind(id);

        if let Some(title) = data.title {
            q = q.bind(title);
        }
        if let Some(description) = data.description {
            q = q.bind(description);
        }
        if let Some(status) = data.status {
            q = q.bind(status);
        }
        if let Some(priority) = data.priority {
            q = q.bind(priority);
        }
        if let Some(is_done) = data.is_done {
            q = q.bind(is_done);
        }

        let task = q.fetch_optional(pool).await?;

        Ok(task)
    }

    /// Sets the assignee
    ///
    /// # Returns
    ///
    /// The updated task, or None if no task has that id
    pub async fn assign(
        pool: &PgPool,
        id: Uuid,
        assignee_id: Uuid,
    ) -> Result<Option<Self>, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            UPDATE tasks
            SET assignee_id = $2
            WHERE id = $1
            RETURNING id, title, description, status, priority, is_done,
                      reporter_id, assignee_id, group_id, created_at
            "#,
        )
        .bind(id)
        .bind(assignee_id)
        .fetch_optional(pool)
        .await?;

        Ok(task)
    }

    /// Deletes a task
    ///
    /// # Returns
    ///
    /// True if a row was deleted
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_task_default_is_noop() {
        let update = UpdateTask::default();
        assert!(update.title.is_none());
        assert!(update.description.is_none());
        assert!(update.status.is_none());
        assert!(update.priority.is_none());
        assert!(update.is_done.is_none());
    }
}
