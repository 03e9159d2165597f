use axum::{
    routing::{delete, get},
    Router,
};

pub mod reviews;
pub mod system;

/// Full routing tree.
///
/// `/reviews` is registered with and without the trailing slash; clients of
/// the original service used the slash-terminated form.
pub fn router() -> Router {
    Router::new()
        .route("/health", get(system::health))
        .route("/whoami", get(system::whoami))
        .route(
            "/reviews",
            get(reviews::list_reviews).post(reviews::create_review),
        )
        .route(
            "/reviews/",
            get(reviews::list_reviews).post(reviews::create_review),
        )
        .route("/reviews/:review_id", delete(reviews::delete_review))
}
