use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use emporium_core::DomainError;

use crate::app::services::ServiceError;

pub fn service_error_to_response(err: ServiceError) -> axum::response::Response {
    match err {
        ServiceError::Domain(e) => domain_error_to_response(e),
        ServiceError::Store(e) => {
            tracing::error!(error = %e, "store failure");
            json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "store_error",
                "internal storage failure",
            )
        }
    }
}

fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    match err {
        DomainError::Validation(msg) => json_error(StatusCode::BAD_REQUEST, "validation_error", msg),
        DomainError::InvalidId(msg) => json_error(StatusCode::BAD_REQUEST, "invalid_id", msg),
        DomainError::NotFound(msg) => json_error(StatusCode::NOT_FOUND, "not_found", msg),
        // Duplicate reviews surface as 400, per the public contract.
        DomainError::Conflict(msg) => json_error(StatusCode::BAD_REQUEST, "conflict", msg),
        DomainError::Unauthorized => json_error(StatusCode::FORBIDDEN, "forbidden", "forbidden"),
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
