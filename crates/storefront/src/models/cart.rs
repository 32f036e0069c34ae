//! Cart domain types.
//!
//! A [`Cart`] is an ordered list of [`LineItem`]s scoped to one
//! [`OwnerKey`]. All merge rules live here as pure functions; persistence
//! and owner switching are the cart store's job.

use core::fmt;

use serde::{Deserialize, Serialize};

use kiosk_core::{Price, ProductId, UserId};

/// Product fields copied into a line item at add-time.
///
/// Denormalized on purpose: the cart renders and totals from this snapshot
/// and never re-fetches the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductSnapshot {
    pub id: ProductId,
    pub title: String,
    pub price: Price,
    pub image: String,
    pub category: String,
}

/// One product-and-quantity entry in a cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub product: ProductSnapshot,
    /// Always >= 1; a decrement below 1 removes the item instead.
    pub quantity: u32,
}

impl LineItem {
    /// Price times quantity for this line.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.product.price.times(self.quantity)
    }
}

/// The partition key a cart is stored under: the anonymous guest, or a
/// specific authenticated user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OwnerKey {
    Guest,
    User(UserId),
}

impl OwnerKey {
    /// The durable storage key for this owner's cart.
    #[must_use]
    pub fn storage_key(&self) -> String {
        match self {
            Self::Guest => "cart_guest".to_string(),
            Self::User(id) => format!("cart_{id}"),
        }
    }
}

impl fmt::Display for OwnerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Guest => write!(f, "guest"),
            Self::User(id) => write!(f, "user {id}"),
        }
    }
}

/// An ordered collection of line items.
///
/// Invariant: at most one line item per product ID, every quantity >= 1.
/// Insertion order is preserved across mutations and round-trips through
/// storage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    /// The line items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of price times quantity over all items, recomputed on every call.
    #[must_use]
    pub fn total(&self) -> Price {
        self.items.iter().map(LineItem::line_total).sum()
    }

    /// Sum of all quantities, recomputed on every call.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }

    /// Add a product to the cart.
    ///
    /// If a line item for the same product already exists its quantity is
    /// incremented by `quantity`; otherwise a new line item is appended.
    /// A zero quantity is clamped to 1 rather than creating an empty line.
    pub fn add(&mut self, product: ProductSnapshot, quantity: u32) {
        let quantity = quantity.max(1);
        match self.items.iter_mut().find(|item| item.product.id == product.id) {
            Some(existing) => existing.quantity += quantity,
            None => self.items.push(LineItem { product, quantity }),
        }
    }

    /// Remove the line item for `product_id`. No-op if absent.
    pub fn remove(&mut self, product_id: ProductId) {
        self.items.retain(|item| item.product.id != product_id);
    }

    /// Set the quantity for an existing line item.
    ///
    /// A quantity below 1 removes the item, exactly like [`Cart::remove`].
    /// If no line item exists for `product_id` nothing happens; this never
    /// creates a new line.
    pub fn set_quantity(&mut self, product_id: ProductId, quantity: u32) {
        if quantity < 1 {
            self.remove(product_id);
            return;
        }
        if let Some(item) = self.items.iter_mut().find(|item| item.product.id == product_id) {
            item.quantity = quantity;
        }
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.items.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(id: i64, cents: i64) -> ProductSnapshot {
        ProductSnapshot {
            id: ProductId::new(id),
            title: format!("product {id}"),
            price: Price::from_cents(cents),
            image: format!("https://img.example.com/{id}.jpg"),
            category: "electronics".to_string(),
        }
    }

    #[test]
    fn test_add_merges_same_product() {
        let mut cart = Cart::default();
        cart.add(snapshot(1, 1000), 1);
        cart.add(snapshot(1, 1000), 2);
        cart.add(snapshot(1, 1000), 3);

        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.item_count(), 6);
    }

    #[test]
    fn test_add_clamps_zero_quantity() {
        let mut cart = Cart::default();
        cart.add(snapshot(1, 1000), 0);
        assert_eq!(cart.item_count(), 1);
    }

    #[test]
    fn test_add_preserves_insertion_order() {
        let mut cart = Cart::default();
        cart.add(snapshot(3, 100), 1);
        cart.add(snapshot(1, 100), 1);
        cart.add(snapshot(2, 100), 1);
        cart.add(snapshot(1, 100), 1); // merge, no reorder

        let ids: Vec<i64> = cart.items().iter().map(|i| i.product.id.as_i64()).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut cart = Cart::default();
        cart.add(snapshot(1, 1000), 1);
        cart.remove(ProductId::new(999));
        assert_eq!(cart.items().len(), 1);
    }

    #[test]
    fn test_set_quantity_below_one_removes() {
        let mut cart = Cart::default();
        cart.add(snapshot(1, 1000), 5);
        cart.set_quantity(ProductId::new(1), 0);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_set_quantity_on_absent_creates_nothing() {
        let mut cart = Cart::default();
        cart.add(snapshot(1, 1000), 1);
        cart.set_quantity(ProductId::new(999), 5);
        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.item_count(), 1);
    }

    #[test]
    fn test_derived_totals() {
        let mut cart = Cart::default();
        cart.add(snapshot(1, 1000), 1); // $10.00
        cart.add(snapshot(2, 2000), 2); // $20.00 x2

        assert_eq!(cart.total(), Price::from_cents(5000));
        assert_eq!(cart.item_count(), 3);

        cart.set_quantity(ProductId::new(2), 1);
        assert_eq!(cart.total(), Price::from_cents(3000));

        cart.clear();
        assert_eq!(cart.total(), Price::ZERO);
        assert_eq!(cart.item_count(), 0);
    }

    #[test]
    fn test_owner_storage_keys() {
        assert_eq!(OwnerKey::Guest.storage_key(), "cart_guest");
        assert_eq!(OwnerKey::User(UserId::new(4)).storage_key(), "cart_4");
    }

    #[test]
    fn test_serde_round_trip_preserves_order() {
        let mut cart = Cart::default();
        cart.add(snapshot(2, 1099), 2);
        cart.add(snapshot(1, 550), 1);

        let json = serde_json::to_string(&cart).expect("serialize");
        let restored: Cart = serde_json::from_str(&json).expect("deserialize");

        assert_eq!(restored, cart);
        assert_eq!(restored.total(), cart.total());
        assert_eq!(restored.item_count(), cart.item_count());
    }
}
