use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use tracing::error;

use crate::application::UserService;
use crate::interfaces::http::common::ApiResponse;
use crate::shared::errors::ResponseCode;

const HI: &str = "hi";
const HELLO: &str = "hello";

#[derive(Clone)]
pub struct ProbeState {
    pub user_service: Arc<UserService>,
}

/// The process is up and serving requests.
#[utoipa::path(
    get,
    path = "/v1/probe/liveness",
    tag = "Probe",
    responses((status = 200, description = "Alive", body = ApiResponse<String>))
)]
pub async fn liveness() -> Json<ApiResponse<()>> {
    Json(ApiResponse::message(ResponseCode::Success.code(), HI))
}

/// The database answers reads and writes.
#[utoipa::path(
    get,
    path = "/v1/probe/readiness",
    tag = "Probe",
    responses(
        (status = 200, description = "Ready", body = ApiResponse<String>),
        (status = 503, description = "Database unavailable", body = ApiResponse<String>)
    )
)]
pub async fn readiness(State(state): State<ProbeState>) -> (StatusCode, Json<ApiResponse<()>>) {
    match state.user_service.check_readiness().await {
        Ok(()) => (
            StatusCode::OK,
            Json(ApiResponse::message(ResponseCode::Success.code(), HELLO)),
        ),
        Err(e) => {
            error!("readiness error: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ApiResponse::from_code(ResponseCode::ServiceInternalError)),
            )
        }
    }
}
