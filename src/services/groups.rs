/// Group membership authority
///
/// Owns the member sets that gate all task visibility. Every group has a
/// creator who is enrolled at creation time and cannot leave; ordinary
/// members can be added by any member, removed by the creator, or leave on
/// their own.

use sqlx::PgPool;
use tracing::{debug, info};
use uuid::Uuid;
use validator::Validate;

use crate::error::{DomainError, DomainResult};
use crate::models::{Group, Membership, User};

/// Validated input for creating a group
#[derive(Debug, Clone, Validate)]
pub struct CreateGroupInput {
    /// Display title, 3 to 256 characters
    #[validate(length(min = 3, max = 256, message = "Title must be 3-256 characters"))]
    pub title: String,

    /// Users to enroll alongside the creator; unknown ids are dropped
    pub member_ids: Vec<Uuid>,
}

/// Group and membership operations
#[derive(Clone)]
pub struct GroupService {
    pool: PgPool,
}

impl GroupService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates a group with the actor as creator and first member
    ///
    /// Initial member ids that do not name an existing user are silently
    /// dropped; duplicates and the creator's own id are ignored. The group
    /// row and every membership row land in one transaction.
    ///
    /// # Errors
    ///
    /// Returns `Validation` when the title is out of range.
    pub async fn create(&self, actor_id: Uuid, input: CreateGroupInput) -> DomainResult<Group> {
        input.validate()?;

        let mut member_ids = User::filter_existing(&self.pool, &input.member_ids).await?;
        let mut seen = std::collections::HashSet::new();
        member_ids.retain(|id| *id != actor_id && seen.insert(*id));

        let mut tx = self.pool.begin().await?;

        let group = Group::create(&mut *tx, &input.title, actor_id).await?;
        Membership::create(&mut *tx, group.id, actor_id).await?;
        for user_id in &member_ids {
            Membership::create(&mut *tx, group.id, *user_id).await?;
        }

        tx.commit().await?;

        info!(
            group_id = %group.id,
            creator_id = %actor_id,
            members = member_ids.len() + 1,
            "Group created"
        );
        Ok(group)
    }

    /// Fetches a group by id
    pub async fn get(&self, group_id: Uuid) -> DomainResult<Group> {
        Group::find_by_id(&self.pool, group_id)
            .await?
            .ok_or(DomainError::GroupNotFound(group_id))
    }

    /// Deletes a group and, by cascade, its memberships and tasks
    ///
    /// # Errors
    ///
    /// Returns `NotAuthorized` unless the actor is the creator.
    pub async fn delete(&self, actor_id: Uuid, group_id: Uuid) -> DomainResult<()> {
        let group = self.get(group_id).await?;
        if group.creator_id != actor_id {
            return Err(DomainError::NotAuthorized);
        }

        Group::delete(&self.pool, group_id).await?;

        info!(group_id = %group_id, actor_id = %actor_id, "Group deleted");
        Ok(())
    }

    /// Enrolls users into a group, all or nothing
    ///
    /// Any member may add others. Every id must name an existing user who is
    /// not yet enrolled; on the first failure the whole batch rolls back.
    ///
    /// # Errors
    ///
    /// - `NotAuthorized`: actor is not a member
    /// - `UserNotFound`: an id names no user
    /// - `AlreadyMember`: an id is already enrolled
    pub async fn add_members(
        &self,
        actor_id: Uuid,
        group_id: Uuid,
        user_ids: &[Uuid],
    ) -> DomainResult<()> {
        self.get(group_id).await?;

        if !Membership::is_member(&self.pool, group_id, actor_id).await? {
            return Err(DomainError::NotAuthorized);
        }

        let existing = User::filter_existing(&self.pool, user_ids).await?;
        if let Some(missing) = user_ids.iter().find(|id| !existing.contains(id)) {
            return Err(DomainError::UserNotFound(*missing));
        }

        let mut tx = self.pool.begin().await?;

        for user_id in user_ids {
            match Membership::create(&mut *tx, group_id, *user_id).await {
                Ok(_) => {}
                Err(e) if is_unique_violation(&e) => {
                    return Err(DomainError::AlreadyMember {
                        user_id: *user_id,
                        group_id,
                    });
                }
                Err(e) => return Err(e.into()),
            }
        }

        tx.commit().await?;

        debug!(group_id = %group_id, count = user_ids.len(), "Members added");
        Ok(())
    }

    /// Removes a member by the creator's authority
    ///
    /// The creator removes themselves only by deleting the group, and an
    /// ordinary member removes themselves with [`leave`](Self::leave).
    ///
    /// # Errors
    ///
    /// - `NotAuthorized`: actor is not the creator
    /// - `SelfRemovalNotAllowed`: actor targeted their own membership
    /// - `NotAMember`: target is not enrolled
    pub async fn remove_member(
        &self,
        actor_id: Uuid,
        group_id: Uuid,
        user_id: Uuid,
    ) -> DomainResult<()> {
        let group = self.get(group_id).await?;
        if group.creator_id != actor_id {
            return Err(DomainError::NotAuthorized);
        }
        if user_id == actor_id {
            return Err(DomainError::SelfRemovalNotAllowed);
        }

        let removed = Membership::delete(&self.pool, group_id, user_id).await?;
        if !removed {
            return Err(DomainError::NotAMember { user_id, group_id });
        }

        info!(group_id = %group_id, user_id = %user_id, "Member removed");
        Ok(())
    }

    /// Takes the actor out of a group at their own request
    ///
    /// # Errors
    ///
    /// - `CannotLeaveAsCreator`: the creator must delete the group instead
    /// - `NotAMember`: the actor was not enrolled
    pub async fn leave(&self, actor_id: Uuid, group_id: Uuid) -> DomainResult<()> {
        let group = self.get(group_id).await?;
        if group.creator_id == actor_id {
            return Err(DomainError::CannotLeaveAsCreator);
        }

        let removed = Membership::delete(&self.pool, group_id, actor_id).await?;
        if !removed {
            return Err(DomainError::NotAMember {
                user_id: actor_id,
                group_id,
            });
        }

        info!(group_id = %group_id, user_id = %actor_id, "Member left group");
        Ok(())
    }

    /// Lists a group's members, creator first, in enrollment order
    ///
    /// # Errors
    ///
    /// Returns `NotAuthorized` unless the actor is themselves a member.
    pub async fn list_members(&self, actor_id: Uuid, group_id: Uuid) -> DomainResult<Vec<User>> {
        self.get(group_id).await?;

        if !Membership::is_member(&self.pool, group_id, actor_id).await? {
            return Err(DomainError::NotAuthorized);
        }

        Ok(Membership::list_users(&self.pool, group_id).await?)
    }

    /// Answers whether a user belongs to a group
    ///
    /// The narrow query other services use as their authorization gate.
    pub async fn is_member(&self, group_id: Uuid, user_id: Uuid) -> DomainResult<bool> {
        Ok(Membership::is_member(&self.pool, group_id, user_id).await?)
    }
}

/// True when the error is a Postgres unique constraint violation
fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.is_unique_violation(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_group_input_rejects_short_title() {
        let input = CreateGroupInput {
            title: "ab".to_string(),
            member_ids: vec![],
        };
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_create_group_input_rejects_oversized_title() {
        let input = CreateGroupInput {
            title: "x".repeat(257),
            member_ids: vec![],
        };
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_create_group_input_accepts_boundary_titles() {
        for title in ["abc".to_string(), "x".repeat(256)] {
            let input = CreateGroupInput {
                title,
                member_ids: vec![],
            };
            assert!(input.validate().is_ok());
        }
    }
}
