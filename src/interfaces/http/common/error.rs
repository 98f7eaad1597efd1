//! Rendering of [`AppError`] as an HTTP response

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::error;

use super::ApiResponse;
use crate::shared::errors::{AppError, DomainError, ResponseCode};

fn status_of(err: &DomainError) -> StatusCode {
    match err {
        DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
        DomainError::Validation(_) => StatusCode::BAD_REQUEST,
        DomainError::UsernameExists(_) | DomainError::RoleCodeExists(_) => StatusCode::CONFLICT,
        DomainError::AuthFailed | DomainError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
    }
}

impl IntoResponse for DomainError {
    fn into_response(self) -> Response {
        let status = status_of(&self);
        let body = ApiResponse::<()>::error(self.code().code(), self.to_string());
        (status, Json(body)).into_response()
    }
}

/// Domain errors are reported verbatim. Infrastructure errors are logged and
/// collapsed into a generic internal error so no details leak to clients.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Domain(err) => err.into_response(),
            AppError::Infra(err) => {
                error!(error = %err, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ApiResponse::<()>::from_code(ResponseCode::ServiceInternalError)),
                )
                    .into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::errors::InfraError;

    #[test]
    fn statuses_follow_error_kind() {
        let cases = [
            (DomainError::not_found("system_user", 1), StatusCode::NOT_FOUND),
            (DomainError::UsernameExists(vec![]), StatusCode::CONFLICT),
            (DomainError::AuthFailed, StatusCode::UNAUTHORIZED),
            (DomainError::Validation("x".into()), StatusCode::BAD_REQUEST),
        ];
        for (err, status) in cases {
            assert_eq!(AppError::from(err).into_response().status(), status);
        }
    }

    #[test]
    fn infra_errors_are_internal() {
        let response = AppError::from(InfraError::Cache("down".into())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
