pub mod api;
pub mod app;
pub mod model;
pub mod storage;

use std::sync::Arc;

pub use api::{ApiConfig, ApiError, ApiRequest, ApiResult, Dispatcher, Payload};
pub use app::{AuthApi, TasksApi, TokenGrant, TokenStore};
pub use model::{AccessToken, Task, TaskId, TaskReceipt};
pub use storage::{FileTokenStore, InMemoryTokenStore};

/// Ready-wired client: one dispatcher and one token store shared by both
/// endpoint groups.
pub struct ApiClient {
    pub auth: AuthApi,
    pub tasks: TasksApi,
}

impl ApiClient {
    pub fn new(config: ApiConfig, tokens: Arc<dyn TokenStore>) -> Self {
        let dispatcher = Arc::new(Dispatcher::new(config, tokens.clone()));

        Self {
            auth: AuthApi::new(dispatcher.clone(), tokens),
            tasks: TasksApi::new(dispatcher),
        }
    }
}
