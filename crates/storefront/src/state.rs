//! Application state shared with UI collaborators.
//!
//! [`AppState`] is constructed once at process start and handed to whatever
//! drives the storefront (the CLI today). It owns the two state stores and
//! the catalog client, and wires identity changes into the cart store so
//! the guest-to-user migration protocol runs on every login, register, and
//! logout.

use crate::catalog::CatalogClient;
use crate::config::StorefrontConfig;
use crate::models::{Identity, IdentityDraft, OwnerKey, ProfileUpdate};
use crate::storage::SharedStorage;
use crate::stores::{CartStore, SessionError, SessionStore};

/// The storefront's state containers, wired together.
///
/// Single-threaded by design: UI events call these methods one at a time
/// and each runs to completion, so mutations take `&mut self` and there is
/// no internal locking beyond the shared storage handle.
pub struct AppState {
    session: SessionStore,
    cart: CartStore,
    catalog: CatalogClient,
}

impl AppState {
    /// Create the application state over a storage backend.
    ///
    /// The session is restored from durable storage first; the cart then
    /// loads for whichever owner that restore produced, so a reload picks
    /// up exactly where the last run left off.
    #[must_use]
    pub fn new(config: &StorefrontConfig, storage: SharedStorage) -> Self {
        let session = SessionStore::new(storage.clone(), config.simulated_latency);
        let cart = CartStore::new(storage, session.owner_key());
        let catalog = CatalogClient::new(&config.catalog);

        Self {
            session,
            cart,
            catalog,
        }
    }

    /// The session store (read surface).
    #[must_use]
    pub const fn session(&self) -> &SessionStore {
        &self.session
    }

    /// The cart store (read surface).
    #[must_use]
    pub const fn cart(&self) -> &CartStore {
        &self.cart
    }

    /// The cart store, for line-item mutations. Owner switches only happen
    /// through the session methods on this type.
    pub fn cart_mut(&mut self) -> &mut CartStore {
        &mut self.cart
    }

    /// The catalog client.
    #[must_use]
    pub const fn catalog(&self) -> &CatalogClient {
        &self.catalog
    }

    /// Log in and run the cart owner switch.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidCredentials` on any credential
    /// mismatch; the cart is left untouched in that case.
    pub async fn login(
        &mut self,
        username: &str,
        password: &str,
    ) -> Result<Identity, SessionError> {
        let old = self.session.owner_key();
        let identity = self.session.login(username, password).await?;
        self.cart
            .on_identity_changed(old, OwnerKey::User(identity.id));
        Ok(identity)
    }

    /// Register, log the new account in, and run the cart owner switch.
    ///
    /// A brand-new user never has a durable cart, so the guest cart (if
    /// any) becomes theirs.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::DuplicateUsername` or
    /// `SessionError::DuplicateEmail` on collision; the cart is left
    /// untouched in that case.
    pub async fn register(&mut self, draft: IdentityDraft) -> Result<Identity, SessionError> {
        let old = self.session.owner_key();
        let identity = self.session.register(draft).await?;
        self.cart
            .on_identity_changed(old, OwnerKey::User(identity.id));
        Ok(identity)
    }

    /// Log out and revert the active cart to the guest cart.
    pub fn logout(&mut self) {
        let old = self.session.owner_key();
        self.session.logout();
        self.cart.on_identity_changed(old, OwnerKey::Guest);
    }

    /// Update the current identity's profile. No owner switch: the identity
    /// keeps its ID, so the active cart is unaffected.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NoActiveSession` when anonymous.
    pub async fn update_profile(
        &mut self,
        update: ProfileUpdate,
    ) -> Result<Identity, SessionError> {
        self.session.update_profile(update).await
    }
}
