//! Cart store.
//!
//! Owns the in-memory cart for the active owner key and keeps the durable
//! copy current: every mutation writes the full cart back to storage
//! immediately, so the durable entry is the source of truth on reload.
//! Owner switches run the guest-to-user migration protocol.

use tracing::{debug, warn};

use kiosk_core::{Price, ProductId};

use crate::models::{Cart, LineItem, OwnerKey, ProductSnapshot};
use crate::storage::SharedStorage;

/// Line-item state for the active cart owner.
pub struct CartStore {
    storage: SharedStorage,
    owner: OwnerKey,
    cart: Cart,
    loading: bool,
}

impl CartStore {
    /// Create a cart store for `owner`, loading their durable cart.
    ///
    /// An absent or corrupt durable entry yields an empty cart; corruption
    /// is overwritten by the next mutation.
    #[must_use]
    pub fn new(storage: SharedStorage, owner: OwnerKey) -> Self {
        let cart = load_cart(&storage, owner);
        Self {
            storage,
            owner,
            cart,
            loading: false,
        }
    }

    /// The owner whose cart is active.
    #[must_use]
    pub const fn owner(&self) -> OwnerKey {
        self.owner
    }

    /// The active line items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        self.cart.items()
    }

    /// Sum of price times quantity, recomputed from current contents.
    #[must_use]
    pub fn total(&self) -> Price {
        self.cart.total()
    }

    /// Sum of all quantities, recomputed from current contents.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.cart.item_count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cart.is_empty()
    }

    /// Whether an owner-switch migration is running.
    #[must_use]
    pub const fn loading(&self) -> bool {
        self.loading
    }

    /// Add a product, merging quantity into an existing line for the same
    /// product ID. Quantities below 1 are clamped to 1.
    pub fn add_item(&mut self, product: ProductSnapshot, quantity: u32) {
        self.cart.add(product, quantity);
        self.persist();
    }

    /// Remove the line for `product_id`. No-op if absent.
    pub fn remove_item(&mut self, product_id: ProductId) {
        self.cart.remove(product_id);
        self.persist();
    }

    /// Set the quantity for an existing line; below 1 removes the line,
    /// and an absent product ID is a no-op.
    pub fn set_quantity(&mut self, product_id: ProductId, quantity: u32) {
        self.cart.set_quantity(product_id, quantity);
        self.persist();
    }

    /// Empty the active cart.
    pub fn clear(&mut self) {
        self.cart.clear();
        self.persist();
    }

    /// Switch the active owner, migrating cart state as needed.
    ///
    /// Called synchronously by the login/register/logout paths:
    ///
    /// 1. Guest to user: if the user already has a durable cart it becomes
    ///    the active cart and the guest cart is discarded. Otherwise the
    ///    guest cart migrates wholesale to the user's key and the guest
    ///    entry is deleted; an empty migration writes nothing, since user
    ///    carts are created lazily on first add.
    /// 2. User to guest: the active cart becomes the durable guest cart (or
    ///    empty). The departed user's cart stays stored under their key.
    pub fn on_identity_changed(&mut self, old: OwnerKey, new: OwnerKey) {
        if old == new {
            return;
        }
        self.loading = true;

        let mut migrated = false;
        match new {
            OwnerKey::User(_) => {
                if let Some(existing) = load_existing_cart(&self.storage, new) {
                    debug!(owner = %new, "loaded existing user cart, guest cart discarded");
                    self.cart = existing;
                } else {
                    // First login for this user: their cart is the guest cart,
                    // carried over item for item.
                    if old != OwnerKey::Guest {
                        self.cart = load_cart(&self.storage, OwnerKey::Guest);
                    }
                    migrated = true;
                }
            }
            OwnerKey::Guest => {
                self.cart = load_cart(&self.storage, OwnerKey::Guest);
                debug!("reverted to guest cart");
            }
        }

        self.owner = new;
        // A user cart is created lazily on first add, so migrating an empty
        // guest cart writes nothing; an eager empty entry would shadow a
        // future guest cart on the next login.
        if migrated && !self.cart.is_empty() {
            self.persist();
            self.storage.remove(&OwnerKey::Guest.storage_key());
            debug!(owner = %new, items = self.cart.items().len(), "migrated guest cart");
        }
        self.loading = false;
    }

    /// Write the full active cart under the owner key.
    fn persist(&self) {
        match serde_json::to_string(&self.cart) {
            Ok(json) => self.storage.set(&self.owner.storage_key(), &json),
            Err(error) => warn!(owner = %self.owner, %error, "failed to serialize cart"),
        }
    }
}

/// Load the durable cart for `owner`, degrading absent or corrupt entries
/// to an empty cart.
fn load_cart(storage: &SharedStorage, owner: OwnerKey) -> Cart {
    load_existing_cart(storage, owner).unwrap_or_default()
}

/// Load the durable cart for `owner`, or `None` when no entry exists.
/// A present-but-corrupt entry counts as existing and loads empty.
fn load_existing_cart(storage: &SharedStorage, owner: OwnerKey) -> Option<Cart> {
    let raw = storage.get(&owner.storage_key())?;
    match serde_json::from_str(&raw) {
        Ok(cart) => Some(cart),
        Err(error) => {
            warn!(owner = %owner, %error, "malformed durable cart, treating as empty");
            Some(Cart::default())
        }
    }
}
