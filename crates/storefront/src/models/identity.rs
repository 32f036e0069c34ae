//! Identity domain types.
//!
//! An [`Identity`] is a local user account record: credentials plus profile
//! fields. Accounts live entirely in this process and its durable storage;
//! there is no remote user service.

use serde::{Deserialize, Serialize};

use kiosk_core::{Email, UserId};

/// A user's display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonName {
    pub firstname: String,
    pub lastname: String,
}

/// Geographic coordinates, kept as strings the way the catalog service
/// reports them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeoLocation {
    pub lat: String,
    pub long: String,
}

/// A postal address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub city: String,
    pub street: String,
    pub number: u32,
    pub zipcode: String,
    pub geolocation: GeoLocation,
}

/// A user account (credentials + profile).
///
/// The password is compared in plaintext by design; this mirrors the mock
/// authentication flow and is not a security mechanism.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Unique account ID, assigned at registration.
    pub id: UserId,
    /// Login name, unique across all known identities.
    pub username: String,
    /// Plaintext password (mock auth only).
    pub password: String,
    /// Email address, unique across all known identities.
    pub email: Email,
    pub name: PersonName,
    pub address: Address,
    pub phone: String,
}

impl Identity {
    /// Apply a partial profile update.
    ///
    /// Top-level fields are merged shallowly: a field present in `update`
    /// replaces the current value, an absent field is left alone. Nested
    /// groups (`name`, `address`) are replaced wholesale, not deep-merged.
    pub fn apply(&mut self, update: ProfileUpdate) {
        if let Some(username) = update.username {
            self.username = username;
        }
        if let Some(password) = update.password {
            self.password = password;
        }
        if let Some(email) = update.email {
            self.email = email;
        }
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(address) = update.address {
            self.address = address;
        }
        if let Some(phone) = update.phone {
            self.phone = phone;
        }
    }
}

/// A new account request: everything in [`Identity`] except the ID, which
/// the session store assigns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityDraft {
    pub username: String,
    pub password: String,
    pub email: Email,
    pub name: PersonName,
    pub address: Address,
    pub phone: String,
}

impl IdentityDraft {
    /// Promote the draft to a full identity with the given ID.
    #[must_use]
    pub fn into_identity(self, id: UserId) -> Identity {
        Identity {
            id,
            username: self.username,
            password: self.password,
            email: self.email,
            name: self.name,
            address: self.address,
            phone: self.phone,
        }
    }
}

/// A partial profile update. `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub username: Option<String>,
    pub password: Option<String>,
    pub email: Option<Email>,
    pub name: Option<PersonName>,
    pub address: Option<Address>,
    pub phone: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_identity() -> Identity {
        Identity {
            id: UserId::new(1),
            username: "johnd".to_string(),
            password: "hunter2".to_string(),
            email: Email::parse("john@example.com").expect("valid email"),
            name: PersonName {
                firstname: "John".to_string(),
                lastname: "Doe".to_string(),
            },
            address: Address {
                city: "Kilcoole".to_string(),
                street: "New Road".to_string(),
                number: 7835,
                zipcode: "12926-3874".to_string(),
                geolocation: GeoLocation {
                    lat: "-37.3159".to_string(),
                    long: "81.1496".to_string(),
                },
            },
            phone: "1-570-236-7033".to_string(),
        }
    }

    #[test]
    fn test_apply_merges_shallowly() {
        let mut identity = sample_identity();
        identity.apply(ProfileUpdate {
            phone: Some("555-0100".to_string()),
            ..ProfileUpdate::default()
        });
        assert_eq!(identity.phone, "555-0100");
        // Untouched fields survive.
        assert_eq!(identity.username, "johnd");
        assert_eq!(identity.name.firstname, "John");
    }

    #[test]
    fn test_apply_replaces_nested_groups_wholesale() {
        let mut identity = sample_identity();
        identity.apply(ProfileUpdate {
            name: Some(PersonName {
                firstname: "Jane".to_string(),
                lastname: String::new(),
            }),
            ..ProfileUpdate::default()
        });
        // The whole group is replaced, even where the new value is empty.
        assert_eq!(identity.name.firstname, "Jane");
        assert_eq!(identity.name.lastname, "");
    }

    #[test]
    fn test_empty_update_is_noop() {
        let mut identity = sample_identity();
        let before = identity.clone();
        identity.apply(ProfileUpdate::default());
        assert_eq!(identity, before);
    }
}
