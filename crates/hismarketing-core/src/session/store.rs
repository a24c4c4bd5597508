//! Session store trait.

use crate::error::Result;
use crate::session::model::Session;

/// Durable storage for the authenticated session.
///
/// Implementations persist exactly the three session fields and survive
/// process restarts (the file-backed store) or live for the process only
/// (the in-memory store used by tests).
pub trait SessionStore: Send + Sync {
    /// Loads the stored session.
    ///
    /// Returns `Ok(None)` when nothing is stored or the stored token is empty.
    fn load(&self) -> Result<Option<Session>>;

    /// Persists the session, replacing any previous one.
    fn save(&self, session: &Session) -> Result<()>;

    /// Removes every stored session field.
    fn clear(&self) -> Result<()>;
}
