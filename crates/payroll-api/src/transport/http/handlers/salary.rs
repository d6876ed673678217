use crate::controller::salary::{NewSalaryRecord, SummaryStatistics};
use crate::transport::http::types::{store_error_response, ApiResponse, AppState};
use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use mem_db::StoreResult;
use serde_json::Value as JsonValue;

pub async fn add_new_record_handler(
    State(state): State<AppState>,
    Json(record): Json<NewSalaryRecord>,
) -> Response {
    match state.salary.add_new_record(&record).await {
        Ok(outcome) => match serde_json::to_value(outcome) {
            Ok(data) => ApiResponse::success(data).into_response(),
            Err(err) => internal_error(err).into_response(),
        },
        Err(err) => store_error_response(err).into_response(),
    }
}

pub async fn get_all_handler(State(state): State<AppState>) -> Response {
    match state.salary.get_all().await {
        Ok(rows) => match serde_json::to_value(rows) {
            Ok(data) => ApiResponse::success(data).into_response(),
            Err(err) => internal_error(err).into_response(),
        },
        Err(err) => store_error_response(err).into_response(),
    }
}

pub async fn delete_record_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Response {
    match state.salary.delete_by_id(&id).await {
        Ok(outcome) => match serde_json::to_value(outcome) {
            Ok(data) => ApiResponse::success(data).into_response(),
            Err(err) => internal_error(err).into_response(),
        },
        Err(err) => store_error_response(err).into_response(),
    }
}

pub async fn summary_statistics_handler(State(state): State<AppState>) -> Response {
    summary_response(state.salary.get_summary_statistics().await)
}

pub async fn summary_statistics_on_contract_handler(State(state): State<AppState>) -> Response {
    summary_response(state.salary.get_summary_statistics_for_on_contract().await)
}

pub async fn department_statistics_handler(State(state): State<AppState>) -> Response {
    match state.salary.get_summary_statistics_for_all_departments().await {
        Ok(by_department) => {
            let mut object = serde_json::Map::new();
            for (department, stats) in by_department {
                object.insert(department, stats_json(&stats));
            }
            ApiResponse::success(JsonValue::Object(object)).into_response()
        }
        Err(err) => store_error_response(err).into_response(),
    }
}

pub async fn sub_department_statistics_handler(State(state): State<AppState>) -> Response {
    match state
        .salary
        .get_summary_statistics_for_all_sub_departments()
        .await
    {
        Ok(nested) => {
            let mut object = serde_json::Map::new();
            for (department, by_sub_department) in nested {
                let mut sub_object = serde_json::Map::new();
                for (sub_department, stats) in by_sub_department {
                    sub_object.insert(sub_department, stats_json(&stats));
                }
                object.insert(department, JsonValue::Object(sub_object));
            }
            ApiResponse::success(JsonValue::Object(object)).into_response()
        }
        Err(err) => store_error_response(err).into_response(),
    }
}

fn summary_response(result: StoreResult<SummaryStatistics>) -> Response {
    match result {
        Ok(stats) => ApiResponse::success(stats_json(&stats)).into_response(),
        Err(err) => store_error_response(err).into_response(),
    }
}

fn stats_json(stats: &SummaryStatistics) -> JsonValue {
    serde_json::json!({
        "min": stats.min,
        "max": stats.max,
        "mean": stats.mean,
    })
}

fn internal_error(err: serde_json::Error) -> (axum::http::StatusCode, Json<ApiResponse>) {
    (
        axum::http::StatusCode::INTERNAL_SERVER_ERROR,
        ApiResponse::error(err.to_string()),
    )
}
