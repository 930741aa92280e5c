mod tasks;
mod tokens;

pub use tasks::{Task, TaskId, TaskReceipt};
pub use tokens::AccessToken;
