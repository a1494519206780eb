/// Database models
///
/// All models follow the same shape: a `FromRow` struct per table, a
/// `Create*` input struct, and associated functions taking an executor
/// (pool or open transaction) for each operation.
///
/// # Models
///
/// - `user`: User accounts and credentials
/// - `group`: Task groups with a recorded creator
/// - `membership`: User-group join records (composite primary key)
/// - `task`: Tasks scoped to a group

pub mod group;
pub mod membership;
pub mod task;
pub mod user;

pub use group::Group;
pub use membership::Membership;
pub use task::Task;
pub use user::{User, UserRole};
