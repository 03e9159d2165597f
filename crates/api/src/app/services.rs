use std::sync::Arc;

use thiserror::Error;

use emporium_core::{DomainError, ProductId, ReviewId, UserId};
use emporium_reviews::{rating, NewReview, Review};
use emporium_store::{ReviewStore, StoreError};

/// Failure of a service operation: a domain outcome or an infrastructure
/// fault. The HTTP layer maps each side separately.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// The review service: guarded reads/writes against the store, with a rating
/// recompute after every mutation.
///
/// Each operation is an independent unit of work. A mutation and its rating
/// recompute are two separate commit points, not one transaction; a crash
/// between them leaves a stale rating until the next successful recompute
/// (last writer wins).
pub struct ReviewService {
    store: Arc<dyn ReviewStore>,
}

impl ReviewService {
    pub fn new(store: Arc<dyn ReviewStore>) -> Self {
        Self { store }
    }

    /// All active reviews, in storage-native order.
    pub async fn list_reviews(&self) -> Result<Vec<Review>, ServiceError> {
        Ok(self.store.list_active_reviews().await?)
    }

    /// Submit a review on behalf of `user_id`.
    ///
    /// Guards, in order: the product must exist and be active; the user must
    /// not already have an active review for it.
    pub async fn create_review(
        &self,
        user_id: UserId,
        new: NewReview,
    ) -> Result<Review, ServiceError> {
        if self
            .store
            .get_active_product(new.product_id)
            .await?
            .is_none()
        {
            return Err(DomainError::not_found("Product not found or inactive").into());
        }

        if self
            .store
            .find_active_review_for(user_id, new.product_id)
            .await?
            .is_some()
        {
            return Err(
                DomainError::conflict("You have already left a review for this product").into(),
            );
        }

        let review = Review::create(user_id, new);
        self.store.insert_review(&review).await?;
        tracing::info!(
            review_id = %review.id,
            product_id = %review.product_id,
            grade = review.grade.value(),
            "review created"
        );

        self.recalculate_product_rating(review.product_id).await?;
        Ok(review)
    }

    /// Soft-delete a review: flip `is_active` to false, never remove the row.
    pub async fn delete_review(&self, id: ReviewId) -> Result<(), ServiceError> {
        let review = self
            .store
            .get_active_review(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Review not found or already inactive"))?;

        // Capture the product before the update; the recompute runs on it
        // regardless of what happens to the review row afterwards.
        let product_id = review.product_id;

        self.store.deactivate_review(id).await?;
        tracing::info!(review_id = %id, product_id = %product_id, "review soft-deleted");

        self.recalculate_product_rating(product_id).await?;
        Ok(())
    }

    /// Recompute the derived product rating from its active reviews.
    ///
    /// A missing product is a silent no-op: this is best-effort
    /// reconciliation, not a strict transaction partner of the caller.
    pub async fn recalculate_product_rating(
        &self,
        product_id: ProductId,
    ) -> Result<(), ServiceError> {
        let mean = self
            .store
            .average_active_grade(product_id)
            .await?
            .unwrap_or(0.0);
        let new_rating = rating::round2(mean);

        if self.store.get_product(product_id).await?.is_some() {
            self.store.set_product_rating(product_id, new_rating).await?;
            tracing::info!(%product_id, rating = new_rating, "product rating recalculated");
        } else {
            tracing::debug!(%product_id, "rating recompute skipped: product missing");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use emporium_reviews::{Grade, Product};
    use emporium_store::InMemoryStore;

    fn service() -> (ReviewService, Arc<InMemoryStore>) {
        let store = Arc::new(InMemoryStore::new());
        (ReviewService::new(store.clone()), store)
    }

    fn new_review(product_id: ProductId, grade: i16) -> NewReview {
        NewReview {
            product_id,
            comment: "ok".to_string(),
            grade: Grade::try_new(grade).unwrap(),
        }
    }

    async fn seed_product(store: &InMemoryStore) -> ProductId {
        let product = Product::new("Teapot");
        store.insert_product(&product).await.unwrap();
        product.id
    }

    async fn rating_of(store: &InMemoryStore, id: ProductId) -> f64 {
        store.get_product(id).await.unwrap().unwrap().rating
    }

    #[tokio::test]
    async fn create_rejects_missing_product() {
        let (service, _store) = service();
        let err = service
            .create_review(UserId::new(), new_review(ProductId::new(), 4))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Domain(DomainError::NotFound(_))));
    }

    #[tokio::test]
    async fn create_rejects_inactive_product() {
        let (service, store) = service();
        let mut product = Product::new("Lamp");
        product.is_active = false;
        store.insert_product(&product).await.unwrap();

        let err = service
            .create_review(UserId::new(), new_review(product.id, 4))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Domain(DomainError::NotFound(_))));
    }

    #[tokio::test]
    async fn second_review_for_same_pair_conflicts() {
        let (service, store) = service();
        let product_id = seed_product(&store).await;
        let user_id = UserId::new();

        service
            .create_review(user_id, new_review(product_id, 4))
            .await
            .unwrap();
        let err = service
            .create_review(user_id, new_review(product_id, 5))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Domain(DomainError::Conflict(_))));
    }

    #[tokio::test]
    async fn rating_tracks_create_and_delete() {
        let (service, store) = service();
        let product_id = seed_product(&store).await;
        assert_eq!(rating_of(&store, product_id).await, 0.0);

        let first = service
            .create_review(UserId::new(), new_review(product_id, 4))
            .await
            .unwrap();
        assert_eq!(rating_of(&store, product_id).await, 4.0);

        service
            .create_review(UserId::new(), new_review(product_id, 5))
            .await
            .unwrap();
        assert_eq!(rating_of(&store, product_id).await, 4.5);

        service.delete_review(first.id).await.unwrap();
        assert_eq!(rating_of(&store, product_id).await, 5.0);
    }

    #[tokio::test]
    async fn deleting_the_last_review_resets_rating_to_zero() {
        let (service, store) = service();
        let product_id = seed_product(&store).await;

        let only = service
            .create_review(UserId::new(), new_review(product_id, 3))
            .await
            .unwrap();
        assert_eq!(rating_of(&store, product_id).await, 3.0);

        service.delete_review(only.id).await.unwrap();
        assert_eq!(rating_of(&store, product_id).await, 0.0);
    }

    #[tokio::test]
    async fn delete_is_not_found_for_missing_or_inactive_review() {
        let (service, store) = service();
        let product_id = seed_product(&store).await;

        let err = service.delete_review(ReviewId::new()).await.unwrap_err();
        assert!(matches!(err, ServiceError::Domain(DomainError::NotFound(_))));

        let review = service
            .create_review(UserId::new(), new_review(product_id, 2))
            .await
            .unwrap();
        service.delete_review(review.id).await.unwrap();

        let err = service.delete_review(review.id).await.unwrap_err();
        assert!(matches!(err, ServiceError::Domain(DomainError::NotFound(_))));
    }

    #[tokio::test]
    async fn user_can_review_again_after_soft_delete() {
        let (service, store) = service();
        let product_id = seed_product(&store).await;
        let user_id = UserId::new();

        let first = service
            .create_review(user_id, new_review(product_id, 1))
            .await
            .unwrap();
        service.delete_review(first.id).await.unwrap();

        // The pair invariant counts active reviews only.
        service
            .create_review(user_id, new_review(product_id, 5))
            .await
            .unwrap();
        assert_eq!(rating_of(&store, product_id).await, 5.0);
    }

    #[tokio::test]
    async fn recompute_for_missing_product_is_a_silent_noop() {
        let (service, _store) = service();
        service
            .recalculate_product_rating(ProductId::new())
            .await
            .unwrap();
    }
}
