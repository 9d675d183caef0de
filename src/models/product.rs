//! Product model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A catalog entry. Rows are only ever inserted and deleted, never
/// updated in place.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub description: String,
    /// Price in the smallest currency unit, never negative.
    pub price: i64,
    pub created_at: DateTime<Utc>,
}

/// Insert request produced by a completed product-entry dialogue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub price: i64,
}
