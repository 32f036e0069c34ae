//! Session store.
//!
//! Owns the current authenticated identity and the known-identity set, and
//! keeps both durable. Authentication is a mock: exact plaintext comparison
//! against the local list, with a short artificial delay standing in for
//! the remote-call boundary.

use std::collections::HashSet;
use std::time::Duration;

use chrono::Utc;
use tracing::{debug, warn};

use kiosk_core::{Email, UserId};

use crate::models::{
    Address, GeoLocation, Identity, IdentityDraft, OwnerKey, PersonName, ProfileUpdate,
};
use crate::storage::{SharedStorage, keys};

use super::SessionError;

/// Session and account state for a single storefront process.
///
/// States are Anonymous and Authenticated; `login`/`register` move to
/// Authenticated, `logout` back to Anonymous. On construction the state is
/// restored from durable storage when a well-formed session exists.
pub struct SessionStore {
    storage: SharedStorage,
    /// Seeds plus registered identities, in registration order.
    known: Vec<Identity>,
    seed_ids: HashSet<UserId>,
    current: Option<Identity>,
    loading: bool,
    simulated_latency: Duration,
}

impl SessionStore {
    /// Create a session store over the given storage.
    ///
    /// Seeds the demo identities, loads any durably registered identities
    /// (a corrupt entry degrades to seeds only), and restores the current
    /// session if one was persisted.
    #[must_use]
    pub fn new(storage: SharedStorage, simulated_latency: Duration) -> Self {
        let seeds = seed_identities();
        let seed_ids: HashSet<UserId> = seeds.iter().map(|identity| identity.id).collect();

        let mut known = seeds;
        known.extend(load_registered(&storage));

        let current = load_session(&storage);
        if let Some(user) = &current {
            debug!(user = %user.username, "restored session");
        }

        Self {
            storage,
            known,
            seed_ids,
            current,
            loading: false,
            simulated_latency,
        }
    }

    /// The currently authenticated identity, if any.
    #[must_use]
    pub fn current(&self) -> Option<&Identity> {
        self.current.as_ref()
    }

    /// Whether a user is logged in.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.current.is_some()
    }

    /// Whether an async operation is in flight.
    #[must_use]
    pub const fn loading(&self) -> bool {
        self.loading
    }

    /// The cart owner key for the current session state.
    #[must_use]
    pub fn owner_key(&self) -> OwnerKey {
        self.current
            .as_ref()
            .map_or(OwnerKey::Guest, |user| OwnerKey::User(user.id))
    }

    /// Log in with username and password.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidCredentials` when no known identity has
    /// this exact username and password; unknown-username and wrong-password
    /// failures are indistinguishable to the caller.
    pub async fn login(
        &mut self,
        username: &str,
        password: &str,
    ) -> Result<Identity, SessionError> {
        self.loading = true;
        tokio::time::sleep(self.simulated_latency).await;

        let found = self
            .known
            .iter()
            .find(|identity| identity.username == username && identity.password == password)
            .cloned();

        let result = match found {
            Some(identity) => {
                self.persist_session(&identity);
                self.current = Some(identity.clone());
                debug!(user = %identity.username, "login succeeded");
                Ok(identity)
            }
            None => {
                debug!(username, "login failed");
                Err(SessionError::InvalidCredentials)
            }
        };

        self.loading = false;
        result
    }

    /// Register a new account and log it in.
    ///
    /// The new identity gets an ID strictly greater than every known ID and
    /// is appended to the known set; registration implies immediate login.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::DuplicateUsername` or
    /// `SessionError::DuplicateEmail` when the draft collides with a known
    /// identity; the known set is left unchanged in that case.
    pub async fn register(&mut self, draft: IdentityDraft) -> Result<Identity, SessionError> {
        self.loading = true;
        tokio::time::sleep(self.simulated_latency).await;

        let result = self.register_inner(draft);
        self.loading = false;
        result
    }

    fn register_inner(&mut self, draft: IdentityDraft) -> Result<Identity, SessionError> {
        if self.known.iter().any(|u| u.username == draft.username) {
            return Err(SessionError::DuplicateUsername);
        }
        if self.known.iter().any(|u| u.email == draft.email) {
            return Err(SessionError::DuplicateEmail);
        }

        let next_id = self
            .known
            .iter()
            .map(|u| u.id.as_i64())
            .max()
            .unwrap_or(0)
            + 1;
        let identity = draft.into_identity(UserId::new(next_id));

        self.known.push(identity.clone());
        self.persist_registered();
        self.persist_session(&identity);
        self.current = Some(identity.clone());
        debug!(user = %identity.username, id = %identity.id, "registered");

        Ok(identity)
    }

    /// Log out. Idempotent: with no active session this is a no-op.
    pub fn logout(&mut self) {
        if let Some(user) = self.current.take() {
            debug!(user = %user.username, "logged out");
        }
        self.storage.remove(keys::CURRENT_USER);
        self.storage.remove(keys::IS_AUTHENTICATED);
        self.storage.remove(keys::SESSION_START);
    }

    /// Merge a partial update into the current identity's profile.
    ///
    /// Top-level fields merge shallowly; nested groups (name, address) are
    /// replaced wholesale. Both the current identity and its entry in the
    /// known set are updated and persisted.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NoActiveSession` when anonymous.
    pub async fn update_profile(
        &mut self,
        update: ProfileUpdate,
    ) -> Result<Identity, SessionError> {
        self.loading = true;
        tokio::time::sleep(self.simulated_latency).await;

        let result = self.update_profile_inner(update);
        self.loading = false;
        result
    }

    fn update_profile_inner(&mut self, update: ProfileUpdate) -> Result<Identity, SessionError> {
        let Some(current) = self.current.as_mut() else {
            return Err(SessionError::NoActiveSession);
        };

        current.apply(update);
        let updated = current.clone();

        if let Some(known) = self.known.iter_mut().find(|u| u.id == updated.id) {
            *known = updated.clone();
        }

        self.persist_registered();
        self.persist_current(&updated);
        debug!(user = %updated.username, "profile updated");

        Ok(updated)
    }

    /// Write the session keys for a freshly authenticated identity.
    fn persist_session(&self, identity: &Identity) {
        self.persist_current(identity);
        self.storage.set(keys::IS_AUTHENTICATED, "true");
        self.storage
            .set(keys::SESSION_START, &Utc::now().timestamp_millis().to_string());
    }

    fn persist_current(&self, identity: &Identity) {
        match serde_json::to_string(identity) {
            Ok(json) => self.storage.set(keys::CURRENT_USER, &json),
            Err(error) => warn!(%error, "failed to serialize current identity"),
        }
    }

    /// Persist the registered identities. Seeds are compiled in and never
    /// written.
    fn persist_registered(&self) {
        let registered: Vec<&Identity> = self
            .known
            .iter()
            .filter(|identity| !self.seed_ids.contains(&identity.id))
            .collect();
        match serde_json::to_string(&registered) {
            Ok(json) => self.storage.set(keys::REGISTERED_USERS, &json),
            Err(error) => warn!(%error, "failed to serialize registered identities"),
        }
    }
}

fn load_registered(storage: &SharedStorage) -> Vec<Identity> {
    let Some(raw) = storage.get(keys::REGISTERED_USERS) else {
        return Vec::new();
    };
    match serde_json::from_str(&raw) {
        Ok(identities) => identities,
        Err(error) => {
            warn!(%error, "malformed registered identities, starting with seeds only");
            Vec::new()
        }
    }
}

fn load_session(storage: &SharedStorage) -> Option<Identity> {
    let raw = storage.get(keys::CURRENT_USER)?;
    match serde_json::from_str(&raw) {
        Ok(identity) => Some(identity),
        Err(error) => {
            warn!(%error, "malformed persisted session, starting anonymous");
            None
        }
    }
}

/// The built-in demo identities, available to log in from first launch.
///
/// These are part of the known set but are never written to storage.
fn seed_identities() -> Vec<Identity> {
    vec![
        Identity {
            id: UserId::new(1),
            username: "johnd".to_string(),
            password: "m38rmF$".to_string(),
            email: Email::parse("john@gmail.com").expect("seed email is valid"),
            name: PersonName {
                firstname: "John".to_string(),
                lastname: "Doe".to_string(),
            },
            address: Address {
                city: "kilcoole".to_string(),
                street: "7835 new road".to_string(),
                number: 3,
                zipcode: "12926-3874".to_string(),
                geolocation: GeoLocation {
                    lat: "-37.3159".to_string(),
                    long: "81.1496".to_string(),
                },
            },
            phone: "1-570-236-7033".to_string(),
        },
        Identity {
            id: UserId::new(2),
            username: "mor_2314".to_string(),
            password: "83r5^_".to_string(),
            email: Email::parse("morrison@gmail.com").expect("seed email is valid"),
            name: PersonName {
                firstname: "David".to_string(),
                lastname: "Morrison".to_string(),
            },
            address: Address {
                city: "Cullman".to_string(),
                street: "Lovers Ln".to_string(),
                number: 3327,
                zipcode: "29576-7873".to_string(),
                geolocation: GeoLocation {
                    lat: "40.3467".to_string(),
                    long: "-30.1310".to_string(),
                },
            },
            phone: "1-570-236-7033".to_string(),
        },
        Identity {
            id: UserId::new(3),
            username: "kevinryan".to_string(),
            password: "kev02937@".to_string(),
            email: Email::parse("kevin@gmail.com").expect("seed email is valid"),
            name: PersonName {
                firstname: "Kevin".to_string(),
                lastname: "Ryan".to_string(),
            },
            address: Address {
                city: "San Antonio".to_string(),
                street: "Prospect Rd".to_string(),
                number: 332,
                zipcode: "78270".to_string(),
                geolocation: GeoLocation {
                    lat: "29.4572".to_string(),
                    long: "-98.5352".to_string(),
                },
            },
            phone: "1-570-236-7033".to_string(),
        },
    ]
}
