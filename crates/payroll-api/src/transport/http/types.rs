use crate::controller::salary::SalaryController;
use crate::controller::user::UserController;
use axum::http::StatusCode;
use axum::Json;
use mem_db::StoreError;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub salary: Arc<SalaryController>,
    pub users: Arc<UserController>,
}

/// Uniform response envelope: `{status, data}` on success,
/// `{status, errorMessage}` on failure.
#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl ApiResponse {
    pub fn success(data: JsonValue) -> Json<Self> {
        Json(Self {
            status: "success",
            data: Some(data),
            error_message: None,
        })
    }

    pub fn error(message: impl Into<String>) -> Json<Self> {
        Json(Self {
            status: "error",
            data: None,
            error_message: Some(message.into()),
        })
    }
}

/// Map a store failure to a status + envelope. Validation failures are
/// client errors; an unknown table means controller construction never
/// ran, which is a server-side invariant violation.
pub fn store_error_response(err: StoreError) -> (StatusCode, Json<ApiResponse>) {
    let status = match err {
        StoreError::InvalidData(_) => StatusCode::BAD_REQUEST,
        StoreError::TableNotFound(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, ApiResponse::error(err.to_string()))
}

pub fn unauthorized() -> (StatusCode, Json<ApiResponse>) {
    (StatusCode::UNAUTHORIZED, ApiResponse::error("unauthorized"))
}

#[derive(Deserialize, Debug)]
pub struct LoginBody {
    pub email: String,
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_shapes() {
        let ok = ApiResponse::success(serde_json::json!({"token": "t"}));
        let json = serde_json::to_value(&ok.0).unwrap();
        assert_eq!(json["status"], "success");
        assert_eq!(json["data"]["token"], "t");
        assert!(json.get("errorMessage").is_none());

        let err = ApiResponse::error("boom");
        let json = serde_json::to_value(&err.0).unwrap();
        assert_eq!(json["status"], "error");
        assert_eq!(json["errorMessage"], "boom");
        assert!(json.get("data").is_none());
    }

    #[test]
    fn store_error_mapping() {
        let (status, _) = store_error_response(StoreError::InvalidData(vec![]));
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let (status, _) = store_error_response(StoreError::TableNotFound("x".into()));
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
