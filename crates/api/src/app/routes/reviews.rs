use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use emporium_auth::Role;
use emporium_core::ReviewId;
use emporium_reviews::{Grade, NewReview};

use crate::app::services::ReviewService;
use crate::app::{dto, errors};
use crate::authz;
use crate::context::CurrentUser;

/// `GET /reviews` — all active reviews, no auth required.
pub async fn list_reviews(
    Extension(service): Extension<Arc<ReviewService>>,
) -> axum::response::Response {
    match service.list_reviews().await {
        Ok(reviews) => {
            let body: Vec<_> = reviews.iter().map(dto::review_to_json).collect();
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(e) => errors::service_error_to_response(e),
    }
}

/// `POST /reviews` — submit a review; buyers only.
pub async fn create_review(
    Extension(service): Extension<Arc<ReviewService>>,
    user: CurrentUser,
    Json(body): Json<dto::CreateReviewRequest>,
) -> axum::response::Response {
    if let Err(e) = authz::require_role(&user, Role::Buyer) {
        return errors::json_error(StatusCode::FORBIDDEN, "forbidden", e.to_string());
    }

    let grade = match Grade::try_new(body.grade) {
        Ok(g) => g,
        Err(e) => return errors::json_error(StatusCode::BAD_REQUEST, "validation_error", e.to_string()),
    };

    let new = NewReview {
        product_id: body.product_id,
        comment: body.comment,
        grade,
    };

    match service.create_review(user.id, new).await {
        Ok(review) => (StatusCode::CREATED, Json(dto::review_to_json(&review))).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

/// `DELETE /reviews/{review_id}` — soft-delete; admins only, no ownership
/// check beyond the role.
pub async fn delete_review(
    Extension(service): Extension<Arc<ReviewService>>,
    user: CurrentUser,
    Path(review_id): Path<String>,
) -> axum::response::Response {
    if let Err(e) = authz::require_role(&user, Role::Admin) {
        return errors::json_error(StatusCode::FORBIDDEN, "forbidden", e.to_string());
    }

    let review_id: ReviewId = match review_id.parse() {
        Ok(v) => v,
        Err(_) => return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid review id"),
    };

    match service.delete_review(review_id).await {
        Ok(()) => (
            StatusCode::OK,
            Json(serde_json::json!({ "message": "Review deleted" })),
        )
            .into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}
