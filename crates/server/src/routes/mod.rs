use axum::{Router, routing::get};
use db::DBService;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub mod health;
pub mod keywords;
pub mod tasks;

pub fn router(db: DBService) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .merge(tasks::router())
        .merge(keywords::router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(db)
}
