//! Kiosk Storefront library.
//!
//! The client-side core of a small storefront: a session store (mock
//! authentication against a local identity list), a cart store with
//! per-owner persistence and guest-to-user migration, and a read-only
//! catalog client for the external fake-store REST API.
//!
//! UI collaborators (the CLI, or any future front end) drive everything
//! through [`state::AppState`]; durable state goes through the
//! [`storage::KeyValueStorage`] port so tests can substitute an in-memory
//! fake.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod config;
pub mod models;
pub mod state;
pub mod storage;
pub mod stores;

pub use state::AppState;
