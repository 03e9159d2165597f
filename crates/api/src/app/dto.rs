use serde::Deserialize;

use emporium_core::ProductId;
use emporium_reviews::Review;

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct CreateReviewRequest {
    pub product_id: ProductId,
    pub comment: String,
    pub grade: i16,
}

// -------------------------
// JSON mapping helpers
// -------------------------

pub fn review_to_json(review: &Review) -> serde_json::Value {
    serde_json::json!({
        "id": review.id.to_string(),
        "user_id": review.user_id.to_string(),
        "product_id": review.product_id.to_string(),
        "comment": review.comment,
        "grade": review.grade.value(),
        "is_active": review.is_active,
    })
}
