use crate::transport::http::types::ApiResponse;
use axum::response::IntoResponse;

pub async fn healthcheck_handler() -> impl IntoResponse {
    ApiResponse::success(serde_json::json!({ "status": "ok" }))
}
