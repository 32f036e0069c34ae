//! Integration tests for Kiosk.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p kiosk-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_ops` - Cart mutation and derived-total properties
//! - `session_auth` - Login, registration, profile, and session persistence
//! - `cart_migration` - Guest-to-user cart migration scenarios
//!
//! All tests run against [`AppState`] over in-memory storage; none of them
//! need the network or the filesystem. "Reload" is simulated by building a
//! second `AppState` over the same storage handle.

use std::time::Duration;

use kiosk_core::{Price, ProductId};
use kiosk_storefront::AppState;
use kiosk_storefront::config::{CatalogConfig, StorefrontConfig};
use kiosk_storefront::models::ProductSnapshot;
use kiosk_storefront::storage::{MemoryStorage, SharedStorage};

/// A test configuration: zero simulated latency, unused catalog URL.
///
/// # Panics
///
/// Panics if the hard-coded catalog URL fails to parse (it cannot).
#[must_use]
pub fn test_config() -> StorefrontConfig {
    StorefrontConfig {
        catalog: CatalogConfig {
            base_url: url::Url::parse("http://localhost:1/").expect("static url"),
        },
        data_dir: std::path::PathBuf::from("unused"),
        simulated_latency: Duration::ZERO,
    }
}

/// Fresh in-memory storage.
#[must_use]
pub fn test_storage() -> SharedStorage {
    SharedStorage::new(MemoryStorage::new())
}

/// An [`AppState`] over the given storage; call again with the same handle
/// to simulate a process reload.
#[must_use]
pub fn test_state(storage: &SharedStorage) -> AppState {
    AppState::new(&test_config(), storage.clone())
}

/// A registration draft with fixed profile fields and password `pass123`.
///
/// # Panics
///
/// Panics if `email` is not a valid address.
#[must_use]
pub fn draft_named(username: &str, email: &str) -> kiosk_storefront::models::IdentityDraft {
    use kiosk_core::Email;
    use kiosk_storefront::models::{Address, GeoLocation, IdentityDraft, PersonName};

    IdentityDraft {
        username: username.to_string(),
        password: "pass123".to_string(),
        email: Email::parse(email).expect("valid email"),
        name: PersonName {
            firstname: "Test".to_string(),
            lastname: "User".to_string(),
        },
        address: Address {
            city: "Testville".to_string(),
            street: "Main St".to_string(),
            number: 1,
            zipcode: "00000".to_string(),
            geolocation: GeoLocation {
                lat: "0".to_string(),
                long: "0".to_string(),
            },
        },
        phone: "555-0100".to_string(),
    }
}

/// A product snapshot with the given ID and price in cents.
#[must_use]
pub fn snapshot(id: i64, cents: i64) -> ProductSnapshot {
    ProductSnapshot {
        id: ProductId::new(id),
        title: format!("product {id}"),
        price: Price::from_cents(cents),
        image: format!("https://img.example.com/{id}.jpg"),
        category: "test".to_string(),
    }
}
