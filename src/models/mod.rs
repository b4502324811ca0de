pub mod account;
pub mod project;
pub mod task;

pub use account::Account;
pub use project::{Project, ProjectInput};
pub use task::{Task, TaskInput};
