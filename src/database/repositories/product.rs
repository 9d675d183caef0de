//! Product repository implementation

use chrono::Utc;

use crate::database::DatabasePool;
use crate::models::{NewProduct, Product};
use crate::utils::errors::Result;

#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: DatabasePool,
}

impl ProductRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }

    /// Insert a new product. The id is assigned by the store and is
    /// never reused, even after deletion.
    pub async fn create(&self, request: NewProduct) -> Result<Product> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            INSERT INTO products (name, description, price, created_at)
            VALUES (?1, ?2, ?3, ?4)
            RETURNING id, name, description, price, created_at
            "#,
        )
        .bind(request.name)
        .bind(request.description)
        .bind(request.price)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(product)
    }

    /// Find product by ID
    pub async fn find_by_id(&self, id: i64) -> Result<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(
            "SELECT id, name, description, price, created_at FROM products WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    /// List the whole catalog in insertion order.
    pub async fn list_all(&self) -> Result<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(
            "SELECT id, name, description, price, created_at FROM products ORDER BY id ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    /// Delete a product, reporting whether a row existed.
    pub async fn delete_by_id(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM products WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Count total products
    pub async fn count(&self) -> Result<i64> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }
}
