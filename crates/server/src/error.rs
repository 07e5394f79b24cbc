use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use db::models::task::TaskError;
use serde_json::json;
use thiserror::Error;

use crate::validation::ValidationErrors;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Database(#[from] sqlx::Error),
    #[error(transparent)]
    Task(#[from] TaskError),
    #[error("The given data was invalid.")]
    Validation(ValidationErrors),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::Validation(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                json!({
                    "code": 422,
                    "message": "The given data was invalid.",
                    "errors": errors,
                }),
            ),
            ApiError::Task(TaskError::TaskNotFound) => (
                StatusCode::NOT_FOUND,
                json!({ "code": 404, "message": "Task not found." }),
            ),
            ApiError::Task(TaskError::UnknownKeywords(ids)) => {
                let ids = ids
                    .iter()
                    .map(|id| id.to_string())
                    .collect::<Vec<_>>()
                    .join(", ");
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    json!({
                        "code": 422,
                        "message": "The given data was invalid.",
                        "errors": { "keyword_ids": [format!("Unknown keyword ids: {ids}.")] },
                    }),
                )
            }
            ApiError::Database(sqlx::Error::RowNotFound)
            | ApiError::Task(TaskError::Database(sqlx::Error::RowNotFound)) => (
                StatusCode::NOT_FOUND,
                json!({ "code": 404, "message": "Not found." }),
            ),
            ApiError::Database(e) | ApiError::Task(TaskError::Database(e)) => {
                tracing::error!("database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "code": 500, "message": "Internal server error." }),
                )
            }
        };
        (status, Json(body)).into_response()
    }
}
