//! Database service layer
//!
//! This module provides a high-level interface to catalog persistence

use crate::database::{DatabasePool, ProductRepository};

#[derive(Debug, Clone)]
pub struct DatabaseService {
    pub products: ProductRepository,
}

impl DatabaseService {
    pub fn new(pool: DatabasePool) -> Self {
        Self {
            products: ProductRepository::new(pool),
        }
    }
}
