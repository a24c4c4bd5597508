//! Session guard: login, registration, logout and the authentication gate
//! every protected operation passes through.

use std::sync::Arc;

use hismarketing_core::api::{AuthGrant, SalesApi};
use hismarketing_core::config::PacingSettings;
use hismarketing_core::error::{HisError, Result, ValidationError};
use hismarketing_core::presentation::{Notice, NoticeLevel, Presenter, View};
use hismarketing_core::session::{LoginCredentials, Registration, Session, SessionStore};

use crate::messages;

/// Owns the persisted session and decides where unauthenticated users go.
///
/// # Responsibilities
///
/// - Exchanging credentials for a token and persisting the session
/// - Rejecting invalid registrations before any request is made
/// - Redirecting to the login view when a protected operation has no token
/// - Clearing the session on logout
#[derive(Clone)]
pub struct SessionGuard {
    api: Arc<dyn SalesApi>,
    store: Arc<dyn SessionStore>,
    presenter: Arc<dyn Presenter>,
    pacing: PacingSettings,
}

impl SessionGuard {
    pub fn new(
        api: Arc<dyn SalesApi>,
        store: Arc<dyn SessionStore>,
        presenter: Arc<dyn Presenter>,
        pacing: PacingSettings,
    ) -> Self {
        Self {
            api,
            store,
            presenter,
            pacing,
        }
    }

    /// Logs in and persists the session.
    ///
    /// On success a transient success notice is shown and, after the
    /// redirect delay, the dashboard is opened. On failure the backend's
    /// message is shown when it sent one.
    pub async fn login(&self, credentials: &LoginCredentials) -> Result<Session> {
        tracing::info!(email = %credentials.email, "[SessionGuard] Logging in");

        let outcome = self.api.login(credentials).await;
        let session = self
            .establish(outcome, None, &credentials.email, messages::LOGIN_FAILED)
            .await?;

        self.complete(messages::LOGIN_SUCCESS).await;
        Ok(session)
    }

    /// Registers a new account and logs the user in.
    ///
    /// The password pair is validated locally first; an invalid pair never
    /// reaches the backend.
    pub async fn register(&self, registration: &Registration) -> Result<Session> {
        if let Err(err) = registration.validate() {
            let message = match err {
                ValidationError::PasswordMismatch => messages::PASSWORD_MISMATCH,
                ValidationError::PasswordTooShort { .. } => messages::PASSWORD_TOO_SHORT,
                _ => messages::GENERIC_ERROR,
            };
            tracing::debug!("[SessionGuard] Registration rejected locally: {}", err);
            self.notify(NoticeLevel::Error, message);
            return Err(err.into());
        }

        tracing::info!(email = %registration.email, "[SessionGuard] Registering");

        let outcome = self.api.register(registration).await;
        let session = self
            .establish(
                outcome,
                Some(&registration.name),
                &registration.email,
                messages::REGISTER_FAILED,
            )
            .await?;

        self.complete(messages::REGISTER_SUCCESS).await;
        Ok(session)
    }

    /// Returns the stored session, or redirects to the login view.
    pub fn require_session(&self) -> Result<Session> {
        match self.current_session() {
            Some(session) => Ok(session),
            None => {
                tracing::debug!("[SessionGuard] No session token; redirecting to login");
                self.presenter.redirect(View::Login);
                Err(HisError::Unauthenticated)
            }
        }
    }

    /// Returns the stored session without redirecting.
    ///
    /// An unreadable session file counts as no session.
    pub fn current_session(&self) -> Option<Session> {
        match self.store.load() {
            Ok(session) => session.filter(Session::has_token),
            Err(e) => {
                tracing::warn!("[SessionGuard] Failed to read session: {}", e);
                None
            }
        }
    }

    /// Sends an already-authenticated user from the auth views to the
    /// dashboard.
    pub fn redirect_if_authenticated(&self) -> Option<Session> {
        let session = self.current_session()?;
        self.presenter.redirect(View::Dashboard);
        Some(session)
    }

    /// Clears the stored session and returns to the landing view.
    pub fn logout(&self) -> Result<()> {
        let cleared = self.store.clear();
        if let Err(e) = &cleared {
            tracing::error!("[SessionGuard] Failed to clear session: {}", e);
        } else {
            tracing::info!("[SessionGuard] Logged out");
        }
        self.presenter.redirect(View::Landing);
        cleared
    }

    /// Turns an auth response into a persisted session, reporting failures.
    async fn establish(
        &self,
        outcome: Result<AuthGrant>,
        name: Option<&str>,
        email: &str,
        rejected: &str,
    ) -> Result<Session> {
        let grant = match outcome {
            Ok(grant) if !grant.token.trim().is_empty() => grant,
            Ok(_) => {
                tracing::warn!("[SessionGuard] Backend returned an empty token");
                self.notify(NoticeLevel::Error, messages::GENERIC_ERROR);
                return Err(HisError::internal("empty token in auth response"));
            }
            Err(err) => {
                tracing::warn!("[SessionGuard] Authentication failed: {}", err);
                let message = match &err {
                    HisError::Api { .. } => err.user_message(rejected),
                    _ => messages::GENERIC_ERROR.to_string(),
                };
                self.notify(NoticeLevel::Error, message);
                return Err(err);
            }
        };

        let user_name = name.map(str::to_string).or(grant.name).unwrap_or_default();
        let session = Session::new(grant.token, user_name, email);

        if let Err(e) = self.store.save(&session) {
            tracing::error!("[SessionGuard] Failed to persist session: {}", e);
            self.notify(NoticeLevel::Error, messages::GENERIC_ERROR);
            return Err(e);
        }

        Ok(session)
    }

    async fn complete(&self, success: &str) {
        self.notify(NoticeLevel::Success, success);
        let delay = self.pacing.auth_redirect();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        self.presenter.redirect(View::Dashboard);
    }

    fn notify(&self, level: NoticeLevel, message: impl Into<String>) {
        self.presenter.notice(Notice::transient(
            level,
            message,
            self.pacing.notice_dismiss(),
        ));
    }
}
