use axum::{
    Json, Router,
    extract::{Path, State},
    response::Json as ResponseJson,
    routing::{get, post, put},
};
use serde::Deserialize;

use db::{
    DBService,
    models::task::{Task, TaskWithKeywords},
};
use utils::response::ApiResponse;

use crate::{error::ApiError, validation::required_text};

pub fn router() -> Router<DBService> {
    let inner = Router::new()
        .route("/index", get(list_tasks))
        .route("/store", post(create_task))
        .route("/toggle/{id}", put(toggle_task));

    Router::new().nest("/tasks", inner)
}

/// List all tasks, newest first, each with its attached keywords.
async fn list_tasks(
    State(db): State<DBService>,
) -> Result<ResponseJson<ApiResponse<Vec<TaskWithKeywords>>>, ApiError> {
    let tasks = Task::find_all_with_keywords(&db.pool).await?;
    Ok(ResponseJson(ApiResponse::success(tasks)))
}

#[derive(Debug, Deserialize)]
pub struct CreateTaskRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub keyword_ids: Option<Vec<i64>>,
}

async fn create_task(
    State(db): State<DBService>,
    Json(payload): Json<CreateTaskRequest>,
) -> Result<ResponseJson<ApiResponse<TaskWithKeywords>>, ApiError> {
    let title = required_text("title", payload.title.as_deref())?;
    let keyword_ids = payload.keyword_ids.unwrap_or_default();

    tracing::debug!(
        "creating task '{}' with {} keyword(s)",
        title,
        keyword_ids.len()
    );
    let task = Task::create_with_keywords(&db.pool, &title, &keyword_ids).await?;

    Ok(ResponseJson(ApiResponse::success_with_message(
        "Task created successfully.",
        task,
    )))
}

/// Flip a task between pending and done. No entity body in the response.
async fn toggle_task(
    Path(id): Path<i64>,
    State(db): State<DBService>,
) -> Result<ResponseJson<ApiResponse<()>>, ApiError> {
    let task = Task::toggle(&db.pool, id).await?;
    tracing::debug!("task {} toggled to is_done={}", task.id, task.is_done);

    Ok(ResponseJson(ApiResponse::message(
        "Task status changed successfully.",
    )))
}
