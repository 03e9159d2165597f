//! In-memory store for tests and local development.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use emporium_core::{ProductId, ReviewId, UserId};
use emporium_reviews::{rating, Product, Review, User};

use crate::{ReviewStore, StoreError, StoreResult};

#[derive(Debug, Default)]
struct Tables {
    reviews: HashMap<ReviewId, Review>,
    products: HashMap<ProductId, Product>,
    users: HashMap<UserId, User>,
}

/// Process-local [`ReviewStore`] backed by hash maps.
///
/// Listing order follows map iteration order, which matches the "no explicit
/// ordering guarantee" contract of the listing endpoint.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    inner: RwLock<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> StoreResult<std::sync::RwLockReadGuard<'_, Tables>> {
        self.inner.read().map_err(|_| StoreError::Poisoned)
    }

    fn write(&self) -> StoreResult<std::sync::RwLockWriteGuard<'_, Tables>> {
        self.inner.write().map_err(|_| StoreError::Poisoned)
    }
}

#[async_trait]
impl ReviewStore for InMemoryStore {
    async fn list_active_reviews(&self) -> StoreResult<Vec<Review>> {
        let tables = self.read()?;
        Ok(tables
            .reviews
            .values()
            .filter(|r| r.is_active)
            .cloned()
            .collect())
    }

    async fn insert_review(&self, review: &Review) -> StoreResult<()> {
        let mut tables = self.write()?;
        tables.reviews.insert(review.id, review.clone());
        Ok(())
    }

    async fn get_active_review(&self, id: ReviewId) -> StoreResult<Option<Review>> {
        let tables = self.read()?;
        Ok(tables.reviews.get(&id).filter(|r| r.is_active).cloned())
    }

    async fn find_active_review_for(
        &self,
        user_id: UserId,
        product_id: ProductId,
    ) -> StoreResult<Option<Review>> {
        let tables = self.read()?;
        Ok(tables
            .reviews
            .values()
            .find(|r| r.is_active && r.user_id == user_id && r.product_id == product_id)
            .cloned())
    }

    async fn deactivate_review(&self, id: ReviewId) -> StoreResult<()> {
        let mut tables = self.write()?;
        if let Some(review) = tables.reviews.get_mut(&id) {
            review.is_active = false;
        }
        Ok(())
    }

    async fn average_active_grade(&self, product_id: ProductId) -> StoreResult<Option<f64>> {
        let tables = self.read()?;
        let grades: Vec<_> = tables
            .reviews
            .values()
            .filter(|r| r.is_active && r.product_id == product_id)
            .map(|r| r.grade)
            .collect();
        if grades.is_empty() {
            Ok(None)
        } else {
            Ok(Some(rating::average_rating(&grades)))
        }
    }

    async fn insert_product(&self, product: &Product) -> StoreResult<()> {
        let mut tables = self.write()?;
        tables.products.insert(product.id, product.clone());
        Ok(())
    }

    async fn get_product(&self, id: ProductId) -> StoreResult<Option<Product>> {
        let tables = self.read()?;
        Ok(tables.products.get(&id).cloned())
    }

    async fn get_active_product(&self, id: ProductId) -> StoreResult<Option<Product>> {
        let tables = self.read()?;
        Ok(tables.products.get(&id).filter(|p| p.is_active).cloned())
    }

    async fn set_product_rating(&self, id: ProductId, rating: f64) -> StoreResult<()> {
        let mut tables = self.write()?;
        if let Some(product) = tables.products.get_mut(&id) {
            product.rating = rating;
        }
        Ok(())
    }

    async fn upsert_user(&self, user: &User) -> StoreResult<()> {
        let mut tables = self.write()?;
        tables.users.insert(user.id, user.clone());
        Ok(())
    }

    async fn get_user(&self, id: UserId) -> StoreResult<Option<User>> {
        let tables = self.read()?;
        Ok(tables.users.get(&id).cloned())
    }
}
