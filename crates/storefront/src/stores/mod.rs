//! State stores.
//!
//! Two cooperating state containers own all mutable client state:
//!
//! - [`SessionStore`] - the current authenticated identity (or none)
//! - [`CartStore`] - line items for the active cart owner
//!
//! Both write through to the shared [`storage`](crate::storage) port on
//! every mutation, so the durable copy is always current. Identity changes
//! must be relayed to the cart store via
//! [`CartStore::on_identity_changed`]; [`AppState`](crate::state::AppState)
//! does this wiring.

mod error;
pub mod cart;
pub mod session;

pub use cart::CartStore;
pub use error::SessionError;
pub use session::SessionStore;
