//! `emporium-store` — persistence boundary for the review service.
//!
//! The [`ReviewStore`] trait is the only storage surface the API layer sees.
//! Two implementations exist: an in-memory store for tests and local
//! development, and a Postgres store for real deployments.

use async_trait::async_trait;
use thiserror::Error;

use emporium_core::{ProductId, ReviewId, UserId};
use emporium_reviews::{Product, Review, User};

pub mod memory;
pub mod postgres;

pub use memory::InMemoryStore;
pub use postgres::PostgresStore;

pub type StoreResult<T> = Result<T, StoreError>;

/// Infrastructure-level storage failure.
///
/// Domain outcomes (missing rows, duplicates) are not errors at this layer;
/// they surface as `Ok(None)` / `Ok(false)` and are interpreted by the
/// service.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("corrupt record: {0}")]
    Corrupt(String),

    #[error("store lock poisoned")]
    Poisoned,
}

impl StoreError {
    pub fn corrupt(msg: impl Into<String>) -> Self {
        Self::Corrupt(msg.into())
    }
}

/// Storage operations consumed by the review service.
///
/// Each call is an independent unit of work; the trait deliberately exposes
/// no transaction surface, so a mutation followed by a rating recompute is
/// two separate commit points.
#[async_trait]
pub trait ReviewStore: Send + Sync {
    // Reviews
    async fn list_active_reviews(&self) -> StoreResult<Vec<Review>>;
    async fn insert_review(&self, review: &Review) -> StoreResult<()>;
    async fn get_active_review(&self, id: ReviewId) -> StoreResult<Option<Review>>;
    async fn find_active_review_for(
        &self,
        user_id: UserId,
        product_id: ProductId,
    ) -> StoreResult<Option<Review>>;
    /// Targeted `is_active = false` update. The row itself is never removed.
    async fn deactivate_review(&self, id: ReviewId) -> StoreResult<()>;
    /// Unrounded mean grade over the product's active reviews, `None` if it
    /// has none.
    async fn average_active_grade(&self, product_id: ProductId) -> StoreResult<Option<f64>>;

    // Products
    async fn insert_product(&self, product: &Product) -> StoreResult<()>;
    async fn get_product(&self, id: ProductId) -> StoreResult<Option<Product>>;
    async fn get_active_product(&self, id: ProductId) -> StoreResult<Option<Product>>;
    async fn set_product_rating(&self, id: ProductId, rating: f64) -> StoreResult<()>;

    // Users
    async fn upsert_user(&self, user: &User) -> StoreResult<()>;
    async fn get_user(&self, id: UserId) -> StoreResult<Option<User>>;
}
