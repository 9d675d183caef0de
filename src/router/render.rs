//! Reply rendering
//!
//! Pure formatting of catalog listings, prompts, and confirmations into
//! outbound replies. No store access, no side effects.

use crate::models::Product;
use crate::router::events::{Button, Reply};

/// Callback payload of the public catalog control.
pub const SHOW_PRODUCTS: &str = "show_products";
/// Prefix of the per-product delete callback payloads.
pub const DELETE_PREFIX: &str = "delete_";

pub fn welcome() -> Reply {
    Reply::with_buttons(
        "Welcome to the store! Tap the button below to browse the catalog.",
        vec![vec![Button::new("🛍 View products", SHOW_PRODUCTS)]],
    )
}

pub fn name_prompt() -> Reply {
    Reply::text("Please enter the product name:")
}

pub fn description_prompt() -> Reply {
    Reply::text("Enter the product description:")
}

pub fn price_prompt() -> Reply {
    Reply::text("Enter the product price as a whole number:")
}

pub fn invalid_price() -> Reply {
    Reply::text("The price must be a whole number. Please enter it again:")
}

pub fn product_added(product: &Product) -> Reply {
    Reply::text(format!("✅ {} was added to the catalog.", product.name))
}

pub fn draft_discarded() -> Reply {
    Reply::text("Your previous product draft was discarded.")
}

pub fn cancelled() -> Reply {
    Reply::text("Operation cancelled.")
}

pub fn nothing_to_cancel() -> Reply {
    Reply::text("There is nothing to cancel.")
}

pub fn product_deleted() -> Reply {
    Reply::text("✅ Product deleted.")
}

pub fn access_denied() -> Reply {
    Reply::text("⚠️ You are not allowed to access this section.")
}

pub fn unrecognized() -> Reply {
    Reply::text("Unrecognized command.")
}

pub fn store_failure() -> Reply {
    Reply::text("Something went wrong on our side. Please try again.")
}

/// Public catalog listing: one "name — price" line per product.
pub fn catalog(products: &[Product]) -> Reply {
    if products.is_empty() {
        return empty_catalog();
    }

    Reply::text(listing_text(products))
}

/// Admin catalog listing: the same lines plus one delete control per
/// product, keyed by product id.
pub fn admin_catalog(products: &[Product]) -> Reply {
    if products.is_empty() {
        return empty_catalog();
    }

    let buttons = products
        .iter()
        .map(|product| {
            vec![Button::new(
                format!("❌ Delete {}", product.name),
                format!("{}{}", DELETE_PREFIX, product.id),
            )]
        })
        .collect();

    Reply::with_buttons(listing_text(products), buttons)
}

fn listing_text(products: &[Product]) -> String {
    let mut text = String::from("📦 Products:\n\n");
    for product in products {
        text.push_str(&format!("{} — {}\n", product.name, product.price));
    }
    text
}

fn empty_catalog() -> Reply {
    Reply::text("No products have been added yet.")
}
