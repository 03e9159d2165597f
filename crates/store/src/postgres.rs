//! Postgres-backed review store.
//!
//! Queries are runtime-checked (`sqlx::query` + `try_get`) so the crate
//! builds without a live database. Schema lives in `migrations/`; the
//! at-most-one-active-review-per-user-and-product invariant is additionally
//! enforced there with a partial unique index.

use std::str::FromStr;

use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use emporium_auth::Role;
use emporium_core::{ProductId, ReviewId, UserId};
use emporium_reviews::{Grade, Product, Review, User};

use crate::{ReviewStore, StoreError, StoreResult};

/// [`ReviewStore`] over a sqlx connection pool.
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect and run pending migrations.
    pub async fn connect(database_url: &str) -> StoreResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(8)
            .connect(database_url)
            .await?;
        sqlx::migrate!("./migrations").run(&pool).await?;
        Ok(Self { pool })
    }
}

fn review_from_row(row: &sqlx::postgres::PgRow) -> StoreResult<Review> {
    let grade: i16 = row.try_get("grade")?;
    Ok(Review {
        id: ReviewId::from_uuid(row.try_get::<Uuid, _>("id")?),
        user_id: UserId::from_uuid(row.try_get::<Uuid, _>("user_id")?),
        product_id: ProductId::from_uuid(row.try_get::<Uuid, _>("product_id")?),
        comment: row.try_get("comment")?,
        grade: Grade::try_new(grade)
            .map_err(|e| StoreError::corrupt(format!("review grade: {e}")))?,
        is_active: row.try_get("is_active")?,
        created_at: row.try_get("created_at")?,
    })
}

fn product_from_row(row: &sqlx::postgres::PgRow) -> StoreResult<Product> {
    Ok(Product {
        id: ProductId::from_uuid(row.try_get::<Uuid, _>("id")?),
        name: row.try_get("name")?,
        rating: row.try_get("rating")?,
        is_active: row.try_get("is_active")?,
    })
}

fn user_from_row(row: &sqlx::postgres::PgRow) -> StoreResult<User> {
    let role: String = row.try_get("role")?;
    Ok(User {
        id: UserId::from_uuid(row.try_get::<Uuid, _>("id")?),
        role: Role::from_str(&role).map_err(|e| StoreError::corrupt(format!("user role: {e}")))?,
        is_active: row.try_get("is_active")?,
    })
}

#[async_trait]
impl ReviewStore for PostgresStore {
    async fn list_active_reviews(&self) -> StoreResult<Vec<Review>> {
        let rows = sqlx::query(
            r#"
            SELECT id, user_id, product_id, comment, grade, is_active, created_at
            FROM reviews
            WHERE is_active = TRUE
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(review_from_row).collect()
    }

    async fn insert_review(&self, review: &Review) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO reviews (id, user_id, product_id, comment, grade, is_active, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(review.id.as_uuid())
        .bind(review.user_id.as_uuid())
        .bind(review.product_id.as_uuid())
        .bind(&review.comment)
        .bind(review.grade.value())
        .bind(review.is_active)
        .bind(review.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn get_active_review(&self, id: ReviewId) -> StoreResult<Option<Review>> {
        let row = sqlx::query(
            r#"
            SELECT id, user_id, product_id, comment, grade, is_active, created_at
            FROM reviews
            WHERE id = $1 AND is_active = TRUE
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(review_from_row).transpose()
    }

    async fn find_active_review_for(
        &self,
        user_id: UserId,
        product_id: ProductId,
    ) -> StoreResult<Option<Review>> {
        let row = sqlx::query(
            r#"
            SELECT id, user_id, product_id, comment, grade, is_active, created_at
            FROM reviews
            WHERE user_id = $1 AND product_id = $2 AND is_active = TRUE
            "#,
        )
        .bind(user_id.as_uuid())
        .bind(product_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(review_from_row).transpose()
    }

    async fn deactivate_review(&self, id: ReviewId) -> StoreResult<()> {
        sqlx::query("UPDATE reviews SET is_active = FALSE WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn average_active_grade(&self, product_id: ProductId) -> StoreResult<Option<f64>> {
        let row = sqlx::query(
            r#"
            SELECT AVG(grade)::double precision AS avg_grade
            FROM reviews
            WHERE product_id = $1 AND is_active = TRUE
            "#,
        )
        .bind(product_id.as_uuid())
        .fetch_one(&self.pool)
        .await?;

        Ok(row.try_get::<Option<f64>, _>("avg_grade")?)
    }

    async fn insert_product(&self, product: &Product) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO products (id, name, rating, is_active)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (id)
            DO UPDATE SET name = EXCLUDED.name, is_active = EXCLUDED.is_active
            "#,
        )
        .bind(product.id.as_uuid())
        .bind(&product.name)
        .bind(product.rating)
        .bind(product.is_active)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn get_product(&self, id: ProductId) -> StoreResult<Option<Product>> {
        let row = sqlx::query("SELECT id, name, rating, is_active FROM products WHERE id = $1")
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(product_from_row).transpose()
    }

    async fn get_active_product(&self, id: ProductId) -> StoreResult<Option<Product>> {
        let row = sqlx::query(
            "SELECT id, name, rating, is_active FROM products WHERE id = $1 AND is_active = TRUE",
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(product_from_row).transpose()
    }

    async fn set_product_rating(&self, id: ProductId, rating: f64) -> StoreResult<()> {
        sqlx::query("UPDATE products SET rating = $2 WHERE id = $1")
            .bind(id.as_uuid())
            .bind(rating)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn upsert_user(&self, user: &User) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO users (id, role, is_active)
            VALUES ($1, $2, $3)
            ON CONFLICT (id)
            DO UPDATE SET role = EXCLUDED.role, is_active = EXCLUDED.is_active
            "#,
        )
        .bind(user.id.as_uuid())
        .bind(user.role.as_str())
        .bind(user.is_active)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn get_user(&self, id: UserId) -> StoreResult<Option<User>> {
        let row = sqlx::query("SELECT id, role, is_active FROM users WHERE id = $1")
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(user_from_row).transpose()
    }
}
