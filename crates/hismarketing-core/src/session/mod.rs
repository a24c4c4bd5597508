//! Session domain module.
//!
//! # Module Structure
//!
//! - `model`: The authenticated session (`Session`)
//! - `credentials`: Login and registration input, with local validation
//! - `store`: Durable storage trait for the session (`SessionStore`)

mod credentials;
mod model;
mod store;

pub use credentials::{LoginCredentials, MIN_PASSWORD_LEN, Registration};
pub use model::{DEFAULT_USER_EMAIL, DEFAULT_USER_NAME, Session};
pub use store::SessionStore;
