//! Domain types for the external product catalog.
//!
//! The wire shape is fixed by the fake-store service; these types mirror it
//! directly since it is already flat JSON.

use serde::{Deserialize, Serialize};

use kiosk_core::{Price, ProductId};

use crate::models::ProductSnapshot;

/// Aggregate review rating for a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    /// Average rating value (e.g., 4.5).
    pub rate: f64,
    /// Total number of reviews.
    pub count: u32,
}

/// A product record from the catalog service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub price: Price,
    pub description: String,
    pub category: String,
    pub image: String,
    pub rating: Rating,
}

impl Product {
    /// Case-insensitive match against title, description, or category.
    ///
    /// `query` must already be lowercased; the client's `search` lowercases
    /// once per query rather than once per product.
    #[must_use]
    pub fn matches(&self, lowercase_query: &str) -> bool {
        self.title.to_lowercase().contains(lowercase_query)
            || self.description.to_lowercase().contains(lowercase_query)
            || self.category.to_lowercase().contains(lowercase_query)
    }
}

impl From<&Product> for ProductSnapshot {
    /// Copy the fields a cart line needs at add-time.
    fn from(product: &Product) -> Self {
        Self {
            id: product.id,
            title: product.title.clone(),
            price: product.price,
            image: product.image.clone(),
            category: product.category.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product() -> Product {
        Product {
            id: ProductId::new(1),
            title: "Fjallraven Backpack".to_string(),
            price: Price::from_cents(10995),
            description: "Fits 15 inch laptops".to_string(),
            category: "men's clothing".to_string(),
            image: "https://img.example.com/1.jpg".to_string(),
            rating: Rating {
                rate: 3.9,
                count: 120,
            },
        }
    }

    #[test]
    fn test_matches_each_field() {
        let p = product();
        assert!(p.matches("backpack"));
        assert!(p.matches("laptops"));
        assert!(p.matches("clothing"));
        assert!(!p.matches("jewelery"));
    }

    #[test]
    fn test_snapshot_copies_cart_fields() {
        let p = product();
        let snapshot = ProductSnapshot::from(&p);
        assert_eq!(snapshot.id, p.id);
        assert_eq!(snapshot.title, p.title);
        assert_eq!(snapshot.price, p.price);
        assert_eq!(snapshot.image, p.image);
        assert_eq!(snapshot.category, p.category);
    }

    #[test]
    fn test_deserialize_catalog_payload() {
        let json = r#"{
            "id": 1,
            "title": "Fjallraven Backpack",
            "price": 109.95,
            "description": "Fits 15 inch laptops",
            "category": "men's clothing",
            "image": "https://img.example.com/1.jpg",
            "rating": { "rate": 3.9, "count": 120 }
        }"#;
        let parsed: Product = serde_json::from_str(json).expect("deserialize");
        assert_eq!(parsed, product());
    }
}
