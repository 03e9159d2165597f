//! `emporium-reviews` — review domain: entities and rating math.
//!
//! Pure domain crate: no HTTP, no storage. The persistence and API layers
//! build on the types here.

pub mod product;
pub mod rating;
pub mod review;
pub mod user;

pub use product::Product;
pub use rating::average_rating;
pub use review::{Grade, NewReview, Review, MAX_GRADE, MIN_GRADE};
pub use user::User;
