//! Session store error types.

use thiserror::Error;

/// Errors surfaced by session operations.
///
/// Persistence-layer corruption is never represented here; malformed durable
/// state is always recovered locally to an empty default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SessionError {
    /// Wrong password or unknown username. Deliberately indistinguishable
    /// so login failures leak nothing about which accounts exist.
    #[error("invalid username or password")]
    InvalidCredentials,

    /// Registration username collides with a known identity.
    #[error("username already exists")]
    DuplicateUsername,

    /// Registration email collides with a known identity.
    #[error("email already registered")]
    DuplicateEmail,

    /// A profile operation was attempted while anonymous.
    #[error("no user logged in")]
    NoActiveSession,
}
