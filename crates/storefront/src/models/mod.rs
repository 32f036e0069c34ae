//! Domain types for the storefront core.
//!
//! These are validated in-memory objects, separate from wire and storage
//! representations (both of which happen to be the same JSON here).

pub mod cart;
pub mod identity;

pub use cart::{Cart, LineItem, OwnerKey, ProductSnapshot};
pub use identity::{Address, GeoLocation, Identity, IdentityDraft, PersonName, ProfileUpdate};
