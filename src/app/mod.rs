mod auth;
mod store;
mod tasks;

pub use auth::{AuthApi, TokenGrant};
pub use store::TokenStore;
pub use tasks::TasksApi;
