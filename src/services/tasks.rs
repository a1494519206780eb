/// Task assignment service
///
/// Tasks live inside groups and are visible only to members. The service
/// checks membership before every read and write; the reporter is always
/// the authenticated actor, never caller-supplied.

use sqlx::PgPool;
use tracing::{debug, info};
use uuid::Uuid;
use validator::Validate;

use crate::error::{DomainError, DomainResult};
use crate::models::task::{CreateTask, Task, UpdateTask};
use crate::models::User;
use crate::services::groups::GroupService;

/// Validated input for creating a task
#[derive(Debug, Clone, Validate)]
pub struct CreateTaskInput {
    #[validate(length(min = 3, max = 256, message = "Title must be 3-256 characters"))]
    pub title: String,

    #[validate(length(max = 500, message = "Description must be at most 500 characters"))]
    pub description: Option<String>,

    pub status: Option<String>,

    pub priority: Option<String>,

    /// Optional initial assignee; must be a member of the group
    pub assignee_id: Option<Uuid>,
}

/// Validated input for updating a task's fields
#[derive(Debug, Clone, Default, Validate)]
pub struct UpdateTaskInput {
    #[validate(length(min = 3, max = 256, message = "Title must be 3-256 characters"))]
    pub title: Option<String>,

    #[validate(length(max = 500, message = "Description must be at most 500 characters"))]
    pub description: Option<String>,

    pub status: Option<String>,

    pub priority: Option<String>,

    pub is_done: Option<bool>,
}

/// Task operations gated on group membership
#[derive(Clone)]
pub struct TaskService {
    pool: PgPool,
    groups: GroupService,
}

impl TaskService {
    pub fn new(pool: PgPool, groups: GroupService) -> Self {
        Self { pool, groups }
    }

    /// Creates a task in a group on behalf of a member
    ///
    /// The actor becomes the reporter. An initial assignee, if given, must
    /// also belong to the group.
    ///
    /// # Errors
    ///
    /// - `GroupNotFound`: the group does not exist
    /// - `NotAuthorized`: the actor is not a member of the group
    /// - `NotAMember`: the assignee exists but is outside the group
    /// - `UserNotFound`: the assignee id names no user
    /// - `Validation`: title or description out of range
    pub async fn create(
        &self,
        actor_id: Uuid,
        group_id: Uuid,
        input: CreateTaskInput,
    ) -> DomainResult<Task> {
        input.validate()?;

        self.groups.get(group_id).await?;
        if !self.groups.is_member(group_id, actor_id).await? {
            return Err(DomainError::NotAuthorized);
        }

        if let Some(assignee_id) = input.assignee_id {
            self.check_assignable(group_id, assignee_id).await?;
        }

        let task = Task::create(
            &self.pool,
            CreateTask {
                title: input.title,
                description: input.description,
                // Matches the column default for rows inserted elsewhere
                status: input.status.unwrap_or_else(|| "new".to_string()),
                priority: input.priority,
                reporter_id: actor_id,
                assignee_id: input.assignee_id,
                group_id,
            },
        )
        .await?;

        info!(task_id = %task.id, group_id = %group_id, reporter_id = %actor_id, "Task created");
        Ok(task)
    }

    /// Fetches a task, visible only to members of its group
    ///
    /// Non-members get `NotAuthorized`, not a distinguishable "exists but
    /// hidden" answer.
    pub async fn get(&self, actor_id: Uuid, task_id: Uuid) -> DomainResult<Task> {
        let task = Task::find_by_id(&self.pool, task_id)
            .await?
            .ok_or(DomainError::TaskNotFound(task_id))?;

        if !self.groups.is_member(task.group_id, actor_id).await? {
            return Err(DomainError::NotAuthorized);
        }

        Ok(task)
    }

    /// Updates a task's mutable fields
    ///
    /// Any member of the task's group may update it. Reporter, group, and
    /// assignee are not touched here; assignment goes through
    /// [`assign`](Self::assign).
    pub async fn update(
        &self,
        actor_id: Uuid,
        task_id: Uuid,
        input: UpdateTaskInput,
    ) -> DomainResult<Task> {
        input.validate()?;

        let task = self.get(actor_id, task_id).await?;

        let updated = Task::update(
            &self.pool,
            task.id,
            UpdateTask {
                title: input.title,
                description: input.description,
                status: input.status,
                priority: input.priority,
                is_done: input.is_done,
            },
        )
        .await?
        .ok_or(DomainError::TaskNotFound(task_id))?;

        debug!(task_id = %task_id, "Task updated");
        Ok(updated)
    }

    /// Hands a task to a member of its group
    ///
    /// # Errors
    ///
    /// - `TaskNotFound`: no such task
    /// - `NotAuthorized`: the actor is outside the task's group
    /// - `UserNotFound`: the assignee id names no user
    /// - `NotAMember`: the assignee exists but is outside the group
    pub async fn assign(
        &self,
        actor_id: Uuid,
        task_id: Uuid,
        assignee_id: Uuid,
    ) -> DomainResult<Task> {
        let task = self.get(actor_id, task_id).await?;

        self.check_assignable(task.group_id, assignee_id).await?;

        let updated = Task::assign(&self.pool, task.id, assignee_id)
            .await?
            .ok_or(DomainError::TaskNotFound(task_id))?;

        info!(task_id = %task_id, assignee_id = %assignee_id, "Task assigned");
        Ok(updated)
    }

    /// Deletes a task
    ///
    /// Any member of the task's group may delete it.
    pub async fn delete(&self, actor_id: Uuid, task_id: Uuid) -> DomainResult<()> {
        let task = self.get(actor_id, task_id).await?;

        Task::delete(&self.pool, task.id).await?;

        info!(task_id = %task_id, actor_id = %actor_id, "Task deleted");
        Ok(())
    }

    /// Verifies a prospective assignee exists and belongs to the group
    async fn check_assignable(&self, group_id: Uuid, assignee_id: Uuid) -> DomainResult<()> {
        if User::find_by_id(&self.pool, assignee_id).await?.is_none() {
            return Err(DomainError::UserNotFound(assignee_id));
        }
        if !self.groups.is_member(group_id, assignee_id).await? {
            return Err(DomainError::NotAMember {
                user_id: assignee_id,
                group_id,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_task_input_rejects_short_title() {
        for title in ["", "ab"] {
            let input = CreateTaskInput {
                title: title.to_string(),
                description: None,
                status: None,
                priority: None,
                assignee_id: None,
            };
            assert!(input.validate().is_err());
        }
    }

    #[test]
    fn test_create_task_input_rejects_long_description() {
        let input = CreateTaskInput {
            title: "Fix login".to_string(),
            description: Some("d".repeat(501)),
            status: None,
            priority: None,
            assignee_id: None,
        };
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_update_task_input_default_is_valid() {
        assert!(UpdateTaskInput::default().validate().is_ok());
    }
}
