use axum::{
    Json, Router,
    extract::State,
    response::Json as ResponseJson,
    routing::{get, post},
};
use serde::Deserialize;

use db::{DBService, models::keyword::Keyword};
use utils::response::ApiResponse;

use crate::{error::ApiError, validation::required_text};

pub fn router() -> Router<DBService> {
    let inner = Router::new()
        .route("/index", get(list_keywords))
        .route("/store", post(create_keyword));

    Router::new().nest("/keywords", inner)
}

/// List all keywords, newest first.
async fn list_keywords(
    State(db): State<DBService>,
) -> Result<ResponseJson<ApiResponse<Vec<Keyword>>>, ApiError> {
    let keywords = Keyword::find_all(&db.pool).await?;
    Ok(ResponseJson(ApiResponse::success(keywords)))
}

#[derive(Debug, Deserialize)]
pub struct CreateKeywordRequest {
    #[serde(default)]
    pub name: Option<String>,
}

async fn create_keyword(
    State(db): State<DBService>,
    Json(payload): Json<CreateKeywordRequest>,
) -> Result<ResponseJson<ApiResponse<Keyword>>, ApiError> {
    let name = required_text("name", payload.name.as_deref())?;

    let keyword = Keyword::create(&db.pool, &name).await?;
    tracing::debug!("created keyword {} '{}'", keyword.id, keyword.name);

    Ok(ResponseJson(ApiResponse::success_with_message(
        "Keyword created successfully.",
        keyword,
    )))
}
