use crate::transport::http::handlers::{health, salary, user};
use crate::transport::http::types::AppState;
use axum::routing::{delete, get, post};
use axum::{middleware, Router};

pub fn create_router(state: AppState) -> Router {
    // Everything under /api/salary requires a valid bearer token.
    let protected = Router::new()
        .route("/api/salary/add-new-record", post(salary::add_new_record_handler))
        .route("/api/salary/get-all", get(salary::get_all_handler))
        .route(
            "/api/salary/delete-record-by-id/:id",
            delete(salary::delete_record_handler),
        )
        .route(
            "/api/salary/get-summary-statistics-all",
            get(salary::summary_statistics_handler),
        )
        .route(
            "/api/salary/get-summary-statistics-for-on-contract",
            get(salary::summary_statistics_on_contract_handler),
        )
        .route(
            "/api/salary/get-summary-statistics-all-departments",
            get(salary::department_statistics_handler),
        )
        .route(
            "/api/salary/get-summary-statistics-all-sub-departments",
            get(salary::sub_department_statistics_handler),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            user::require_auth,
        ));

    Router::new()
        .route("/health", get(health::healthcheck_handler))
        .route("/api/user/login", post(user::login_handler))
        .merge(protected)
        .with_state(state)
}
