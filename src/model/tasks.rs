use serde::Deserialize;

pub type TaskId = i64;

/// A task exactly as the backend serializes it. The client passes these
/// fields through without interpreting them; the description column is
/// nullable on the server.
#[derive(Debug, Clone, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Confirmation body returned by the mutating task endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct TaskReceipt {
    pub msg: String,
    #[serde(default)]
    pub task_id: Option<TaskId>,
}
