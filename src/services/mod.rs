/// Domain services
///
/// Each service wraps the row-level model operations with the authorization
/// and consistency rules callers must not be able to bypass. The HTTP layer
/// talks to these, never to the models directly.

pub mod groups;
pub mod tasks;
pub mod users;

pub use groups::{CreateGroupInput, GroupService};
pub use tasks::{CreateTaskInput, TaskService, UpdateTaskInput};
pub use users::{RegisterUserInput, UserService};
