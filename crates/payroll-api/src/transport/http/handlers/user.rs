use crate::transport::http::types::{unauthorized, ApiResponse, AppState, LoginBody};
use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;

pub async fn login_handler(
    State(state): State<AppState>,
    Json(body): Json<LoginBody>,
) -> Response {
    match state.users.login(&body.email, &body.password).await {
        Ok(Some(token)) => {
            ApiResponse::success(serde_json::json!({ "token": token })).into_response()
        }
        // A credential mismatch is an ordinary outcome mapped to 401,
        // never a server error.
        Ok(None) => unauthorized().into_response(),
        Err(err) => {
            crate::transport::http::types::store_error_response(err).into_response()
        }
    }
}

/// Bearer guard for the salary routes: validates the Authorization
/// header and stashes the decoded claims in request extensions.
pub async fn require_auth(State(state): State<AppState>, mut request: Request, next: Next) -> Response {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok());
    match header.and_then(|token| state.users.validate_token(token)) {
        Some(claims) => {
            request.extensions_mut().insert(claims);
            next.run(request).await
        }
        None => unauthorized().into_response(),
    }
}
