use serde::{Deserialize, Serialize};

/// Display name used when the persisted profile has no name.
pub const DEFAULT_USER_NAME: &str = "Kullanıcı";

/// Display e-mail used when the persisted profile has no e-mail.
pub const DEFAULT_USER_EMAIL: &str = "user@email.com";

/// An authenticated user session.
///
/// Persisted with exactly three fields under fixed key names; the presence
/// of a non-empty `userToken` is the only authentication signal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    #[serde(rename = "userToken")]
    pub token: String,
    #[serde(rename = "userName", default)]
    pub user_name: String,
    #[serde(rename = "userEmail", default)]
    pub user_email: String,
}

impl Session {
    pub fn new(
        token: impl Into<String>,
        user_name: impl Into<String>,
        user_email: impl Into<String>,
    ) -> Self {
        Self {
            token: token.into(),
            user_name: user_name.into(),
            user_email: user_email.into(),
        }
    }

    /// Whether this session carries a usable bearer token.
    pub fn has_token(&self) -> bool {
        !self.token.trim().is_empty()
    }

    pub fn display_name(&self) -> &str {
        if self.user_name.trim().is_empty() {
            DEFAULT_USER_NAME
        } else {
            &self.user_name
        }
    }

    pub fn display_email(&self) -> &str {
        if self.user_email.trim().is_empty() {
            DEFAULT_USER_EMAIL
        } else {
            &self.user_email
        }
    }
}
