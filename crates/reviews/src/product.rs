use serde::{Deserialize, Serialize};

use emporium_core::ProductId;

/// A catalog product as the review surface sees it.
///
/// `rating` is a derived field: it is overwritten exclusively by the rating
/// recompute operation and holds `0.0` while the product has no active
/// reviews.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub rating: f64,
    pub is_active: bool,
}

impl Product {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: ProductId::new(),
            name: name.into(),
            rating: 0.0,
            is_active: true,
        }
    }
}
