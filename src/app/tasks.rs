use std::sync::Arc;

use serde_json::json;

use crate::{
    api::{ApiRequest, ApiResult, Dispatcher},
    model::{Task, TaskId, TaskReceipt},
};

const CREATE_TASK_PATH: &str = "/admin/createTask";
const GET_TASKS_PATH: &str = "/admin/getTasks";

fn update_task_path(task_id: TaskId) -> String {
    format!("/admin/update-task/{task_id}")
}

fn delete_task_path(task_id: TaskId) -> String {
    format!("/admin/delete-task/{task_id}")
}

/// Task CRUD. Every endpoint requires a stored session token; bodies are
/// passed through to and from the backend unchanged.
pub struct TasksApi {
    dispatcher: Arc<Dispatcher>,
}

impl TasksApi {
    pub fn new(dispatcher: Arc<Dispatcher>) -> Self {
        Self { dispatcher }
    }

    pub async fn create_task(&self, title: &str, description: &str) -> ApiResult<TaskReceipt> {
        self.dispatcher
            .dispatch(
                ApiRequest::post(CREATE_TASK_PATH)
                    .json(task_input(title, description))
                    .authorized(),
            )
            .await
    }

    pub async fn list_tasks(&self) -> ApiResult<Vec<Task>> {
        self.dispatcher
            .dispatch(ApiRequest::get(GET_TASKS_PATH).authorized())
            .await
    }

    pub async fn update_task(
        &self,
        task_id: TaskId,
        title: &str,
        description: &str,
    ) -> ApiResult<TaskReceipt> {
        self.dispatcher
            .dispatch(
                ApiRequest::put(update_task_path(task_id))
                    .json(task_input(title, description))
                    .authorized(),
            )
            .await
    }

    pub async fn delete_task(&self, task_id: TaskId) -> ApiResult<TaskReceipt> {
        self.dispatcher
            .dispatch(ApiRequest::delete(delete_task_path(task_id)).authorized())
            .await
    }
}

fn task_input(title: &str, description: &str) -> serde_json::Value {
    json!({ "title": title, "description": description })
}

#[cfg(test)]
mod tests {
    use crate::{
        api::{ApiConfig, ApiError},
        app::TokenStore,
        model::AccessToken,
        storage::InMemoryTokenStore,
    };

    use super::*;

    async fn tasks_for(server: &mockito::ServerGuard) -> TasksApi {
        let tokens = Arc::new(InMemoryTokenStore::new());
        tokens
            .save(&AccessToken::from_str("sesame").unwrap())
            .await
            .unwrap();

        TasksApi::new(Arc::new(Dispatcher::new(
            ApiConfig::new(server.url()),
            tokens,
        )))
    }

    #[tokio::test]
    async fn created_task_shows_up_in_the_listing() {
        let mut server = mockito::Server::new_async().await;
        let create = server
            .mock("POST", "/admin/createTask")
            .match_body(mockito::Matcher::Json(
                json!({ "title": "Buy milk", "description": "Two liters" }),
            ))
            .with_body(r#"{"msg":"Task created","task_id":7}"#)
            .create_async()
            .await;
        server
            .mock("GET", "/admin/getTasks")
            .with_body(r#"[{"id":7,"title":"Buy milk","description":"Two liters"}]"#)
            .create_async()
            .await;

        let tasks = tasks_for(&server).await;

        let receipt = tasks.create_task("Buy milk", "Two liters").await.unwrap();
        assert_eq!(receipt.task_id, Some(7));

        let listing = tasks.list_tasks().await.unwrap();
        assert!(listing
            .iter()
            .any(|t| t.title == "Buy milk" && t.description.as_deref() == Some("Two liters")));

        create.assert_async().await;
    }

    #[tokio::test]
    async fn update_round_trip_reflects_new_fields() {
        let mut server = mockito::Server::new_async().await;
        let update = server
            .mock("PUT", "/admin/update-task/7")
            .match_body(mockito::Matcher::Json(
                json!({ "title": "Buy bread", "description": "Rye" }),
            ))
            .with_body(r#"{"msg":"Task updated"}"#)
            .create_async()
            .await;
        server
            .mock("GET", "/admin/getTasks")
            .with_body(r#"[{"id":7,"title":"Buy bread","description":"Rye"}]"#)
            .create_async()
            .await;

        let tasks = tasks_for(&server).await;

        tasks.update_task(7, "Buy bread", "Rye").await.unwrap();

        let listing = tasks.list_tasks().await.unwrap();
        let task = listing.iter().find(|t| t.id == 7).unwrap();
        assert_eq!(task.title, "Buy bread");
        assert_eq!(task.description.as_deref(), Some("Rye"));

        update.assert_async().await;
    }

    #[tokio::test]
    async fn deleting_a_missing_task_is_a_rejection_not_a_panic() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("DELETE", "/admin/delete-task/41")
            .with_status(404)
            .with_body(r#"{"detail":"Task not found"}"#)
            .create_async()
            .await;

        let tasks = tasks_for(&server).await;
        let err = tasks.delete_task(41).await.unwrap_err();

        assert_eq!(err.to_string(), r#"{"detail":"Task not found"}"#);
    }

    #[tokio::test]
    async fn listing_tolerates_null_descriptions() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/admin/getTasks")
            .with_body(r#"[{"id":1,"title":"Bare","description":null}]"#)
            .create_async()
            .await;

        let tasks = tasks_for(&server).await;
        let listing = tasks.list_tasks().await.unwrap();

        assert_eq!(listing.len(), 1);
        assert!(listing[0].description.is_none());
    }

    #[tokio::test]
    async fn every_task_endpoint_fails_fast_without_a_session() {
        let mut server = mockito::Server::new_async().await;
        let nothing = server
            .mock("GET", mockito::Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let tasks = TasksApi::new(Arc::new(Dispatcher::new(
            ApiConfig::new(server.url()),
            Arc::new(InMemoryTokenStore::new()),
        )));

        assert!(matches!(
            tasks.list_tasks().await,
            Err(ApiError::NotAuthenticated)
        ));
        assert!(matches!(
            tasks.create_task("t", "d").await,
            Err(ApiError::NotAuthenticated)
        ));
        assert!(matches!(
            tasks.update_task(1, "t", "d").await,
            Err(ApiError::NotAuthenticated)
        ));
        assert!(matches!(
            tasks.delete_task(1).await,
            Err(ApiError::NotAuthenticated)
        ));

        nothing.assert_async().await;
    }
}
