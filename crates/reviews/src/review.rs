use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use emporium_core::{DomainError, DomainResult, ProductId, ReviewId, UserId};

pub const MIN_GRADE: i16 = 1;
pub const MAX_GRADE: i16 = 5;

/// Review score, constrained to `MIN_GRADE..=MAX_GRADE`.
///
/// Value object: construction validates, so a `Grade` in hand is always in
/// range (including when deserialized from a request body or a stored row).
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i16", into = "i16")]
pub struct Grade(i16);

impl Grade {
    pub fn try_new(value: i16) -> DomainResult<Self> {
        if !(MIN_GRADE..=MAX_GRADE).contains(&value) {
            return Err(DomainError::validation(format!(
                "grade must be between {MIN_GRADE} and {MAX_GRADE}"
            )));
        }
        Ok(Self(value))
    }

    pub fn value(self) -> i16 {
        self.0
    }
}

impl TryFrom<i16> for Grade {
    type Error = DomainError;

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        Self::try_new(value)
    }
}

impl From<Grade> for i16 {
    fn from(value: Grade) -> Self {
        value.0
    }
}

/// A product review.
///
/// Reviews are soft-deleted only: `is_active` flips to false once and never
/// back, and the row is never removed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: ReviewId,
    pub user_id: UserId,
    pub product_id: ProductId,
    pub comment: String,
    pub grade: Grade,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// Payload for submitting a review (caller identity supplied separately).
#[derive(Debug, Clone, PartialEq)]
pub struct NewReview {
    pub product_id: ProductId,
    pub comment: String,
    pub grade: Grade,
}

impl Review {
    /// Build a fresh, active review owned by `user_id`.
    pub fn create(user_id: UserId, new: NewReview) -> Self {
        Self {
            id: ReviewId::new(),
            user_id,
            product_id: new.product_id,
            comment: new.comment,
            grade: new.grade,
            is_active: true,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grade_accepts_full_range() {
        for value in MIN_GRADE..=MAX_GRADE {
            assert_eq!(Grade::try_new(value).unwrap().value(), value);
        }
    }

    #[test]
    fn grade_rejects_out_of_range() {
        for value in [0, -1, 6, 100] {
            let err = Grade::try_new(value).unwrap_err();
            assert!(matches!(err, DomainError::Validation(_)));
        }
    }

    #[test]
    fn grade_deserialization_validates() {
        assert!(serde_json::from_str::<Grade>("3").is_ok());
        assert!(serde_json::from_str::<Grade>("9").is_err());
    }

    #[test]
    fn created_review_is_active_and_owned_by_caller() {
        let user_id = UserId::new();
        let product_id = ProductId::new();
        let review = Review::create(
            user_id,
            NewReview {
                product_id,
                comment: "solid".to_string(),
                grade: Grade::try_new(4).unwrap(),
            },
        );

        assert!(review.is_active);
        assert_eq!(review.user_id, user_id);
        assert_eq!(review.product_id, product_id);
        assert_eq!(review.grade.value(), 4);
    }
}
