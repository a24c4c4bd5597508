mod common;

use std::time::Duration;

use common::{Call, Harness};
use hismarketing_application::{PipelineState, messages};
use hismarketing_core::error::{HisError, ValidationError};
use hismarketing_core::presentation::{NoticeLevel, NoticeStyle, View};
use hismarketing_core::session::{LoginCredentials, Registration};

fn registration(password: &str, confirm: &str) -> Registration {
    Registration {
        name: "Ayşe Yılmaz".to_string(),
        email: "ayse@example.com".to_string(),
        company: "Acme".to_string(),
        password: password.to_string(),
        password_confirm: confirm.to_string(),
    }
}

#[tokio::test(start_paused = true)]
async fn test_login_persists_session_and_redirects_after_delay() {
    let harness = Harness::paced();
    let mut pipeline = harness.orchestrator.new_pipeline();

    let start = tokio::time::Instant::now();
    let state = harness
        .orchestrator
        .login(
            &mut pipeline,
            &LoginCredentials::new("ayse@example.com", "secret1"),
        )
        .await
        .unwrap();

    assert_eq!(state, PipelineState::Authenticated);
    assert!(start.elapsed() >= Duration::from_millis(1_500));

    let session = harness.stored_session().unwrap();
    assert_eq!(session.token, "tok-1");
    assert_eq!(session.user_name, "Ayşe");
    assert_eq!(session.user_email, "ayse@example.com");

    let notices = harness.presenter.notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].level, NoticeLevel::Success);
    assert_eq!(notices[0].message, messages::LOGIN_SUCCESS);
    assert_eq!(
        notices[0].style,
        NoticeStyle::Transient(Duration::from_millis(5_000))
    );
    assert_eq!(harness.presenter.redirects(), vec![View::Dashboard]);
}

#[tokio::test]
async fn test_login_failure_shows_backend_message() {
    let harness = Harness::immediate();
    harness
        .api
        .fail_auth(HisError::api(401, Some("Hatalı şifre".to_string())));
    let mut pipeline = harness.orchestrator.new_pipeline();

    let err = harness
        .orchestrator
        .login(&mut pipeline, &LoginCredentials::new("a@b.c", "wrong1"))
        .await
        .unwrap_err();

    assert!(matches!(err, HisError::Api { status: 401, .. }));
    assert_eq!(pipeline.state(), PipelineState::Unauthenticated);
    assert!(harness.stored_session().is_none());
    assert_eq!(harness.presenter.error_notices(), vec!["Hatalı şifre"]);
    assert!(harness.presenter.redirects().is_empty());
}

#[tokio::test]
async fn test_login_failure_without_message_uses_fallback() {
    let harness = Harness::immediate();
    harness.api.fail_auth(HisError::api(401, None));
    let mut pipeline = harness.orchestrator.new_pipeline();

    harness
        .orchestrator
        .login(&mut pipeline, &LoginCredentials::new("a@b.c", "wrong1"))
        .await
        .unwrap_err();

    assert_eq!(
        harness.presenter.error_notices(),
        vec![messages::LOGIN_FAILED]
    );
}

#[tokio::test]
async fn test_login_network_failure_is_generic() {
    let harness = Harness::immediate();
    harness.api.fail_auth(HisError::network("connection refused"));
    let mut pipeline = harness.orchestrator.new_pipeline();

    harness
        .orchestrator
        .login(&mut pipeline, &LoginCredentials::new("a@b.c", "secret1"))
        .await
        .unwrap_err();

    assert_eq!(
        harness.presenter.error_notices(),
        vec![messages::GENERIC_ERROR]
    );
}

#[tokio::test]
async fn test_register_mismatch_makes_no_request() {
    let harness = Harness::immediate();
    let mut pipeline = harness.orchestrator.new_pipeline();

    // Mismatch is reported even though both passwords are too short.
    let err = harness
        .orchestrator
        .register(&mut pipeline, &registration("abc", "abd"))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        HisError::Validation(ValidationError::PasswordMismatch)
    ));
    assert_eq!(harness.api.call_count(), 0);
    assert_eq!(
        harness.presenter.error_notices(),
        vec![messages::PASSWORD_MISMATCH]
    );
}

#[tokio::test]
async fn test_register_short_password_makes_no_request() {
    let harness = Harness::immediate();
    let mut pipeline = harness.orchestrator.new_pipeline();

    let err = harness
        .orchestrator
        .register(&mut pipeline, &registration("abc12", "abc12"))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        HisError::Validation(ValidationError::PasswordTooShort { min: 6 })
    ));
    assert_eq!(harness.api.call_count(), 0);
    assert_eq!(
        harness.presenter.error_notices(),
        vec![messages::PASSWORD_TOO_SHORT]
    );
}

#[tokio::test]
async fn test_register_success_uses_form_name() {
    let harness = Harness::immediate();
    let mut pipeline = harness.orchestrator.new_pipeline();

    let state = harness
        .orchestrator
        .register(&mut pipeline, &registration("abc123", "abc123"))
        .await
        .unwrap();

    assert_eq!(state, PipelineState::Authenticated);
    assert_eq!(
        harness.api.calls(),
        vec![Call::Register {
            email: "ayse@example.com".to_string()
        }]
    );
    let session = harness.stored_session().unwrap();
    assert_eq!(session.user_name, "Ayşe Yılmaz");
    assert_eq!(harness.presenter.notices()[0].message, messages::REGISTER_SUCCESS);
    assert_eq!(harness.presenter.redirects(), vec![View::Dashboard]);
}

#[tokio::test]
async fn test_register_rejected_by_backend() {
    let harness = Harness::immediate();
    harness.api.fail_auth(HisError::api(409, None));
    let mut pipeline = harness.orchestrator.new_pipeline();

    harness
        .orchestrator
        .register(&mut pipeline, &registration("abc123", "abc123"))
        .await
        .unwrap_err();

    assert_eq!(
        harness.presenter.error_notices(),
        vec![messages::REGISTER_FAILED]
    );
    assert!(harness.stored_session().is_none());
}

#[tokio::test]
async fn test_logout_clears_session() {
    let harness = Harness::signed_in();
    let mut pipeline = harness.orchestrator.new_pipeline();
    harness.orchestrator.open_dashboard(&mut pipeline).unwrap();
    harness
        .orchestrator
        .upload(&mut pipeline, common::csv_file())
        .await
        .unwrap();

    let state = harness.orchestrator.logout(&mut pipeline).unwrap();

    assert_eq!(state, PipelineState::Unauthenticated);
    assert!(pipeline.upload().is_none());
    assert!(harness.stored_session().is_none());
    assert_eq!(harness.presenter.redirects(), vec![View::Landing]);

    let calls_before = harness.api.call_count();
    let err = harness
        .orchestrator
        .analyze(&mut pipeline)
        .await
        .unwrap_err();
    assert!(err.is_unauthenticated());
    assert_eq!(harness.api.call_count(), calls_before);
    assert_eq!(
        harness.presenter.redirects(),
        vec![View::Landing, View::Login]
    );
}

#[tokio::test]
async fn test_auth_views_redirect_when_signed_in() {
    let harness = Harness::signed_in();
    let guard = harness.orchestrator.session_guard();

    let session = guard.redirect_if_authenticated().unwrap();
    assert_eq!(session.token, "tok-1");
    assert_eq!(harness.presenter.redirects(), vec![View::Dashboard]);

    let anonymous = Harness::immediate();
    assert!(
        anonymous
            .orchestrator
            .session_guard()
            .redirect_if_authenticated()
            .is_none()
    );
    assert!(anonymous.presenter.redirects().is_empty());
}

#[tokio::test]
async fn test_dashboard_shows_user() {
    let harness = Harness::signed_in();
    let mut pipeline = harness.orchestrator.new_pipeline();

    let session = harness.orchestrator.open_dashboard(&mut pipeline).unwrap();

    assert_eq!(session.display_email(), "ayse@example.com");
    assert_eq!(pipeline.state(), PipelineState::Authenticated);
    assert!(harness
        .presenter
        .contains(&common::Event::ShowUser("Ayşe".to_string())));
}

#[tokio::test]
async fn test_auth_view_with_stored_session_skips_form() {
    let harness = Harness::signed_in();
    let mut pipeline = harness.orchestrator.new_pipeline();

    let session = harness.orchestrator.enter_auth_view(&mut pipeline).unwrap();

    assert_eq!(session.token, "tok-1");
    assert_eq!(pipeline.state(), PipelineState::Authenticated);
    assert_eq!(harness.api.call_count(), 0);
    assert_eq!(harness.presenter.redirects(), vec![View::Dashboard]);
    assert!(harness
        .presenter
        .contains(&common::Event::ShowUser("Ayşe".to_string())));
}

#[tokio::test]
async fn test_auth_view_without_session_shows_form() {
    let harness = Harness::immediate();
    let mut pipeline = harness.orchestrator.new_pipeline();

    assert!(harness.orchestrator.enter_auth_view(&mut pipeline).is_none());
    assert_eq!(pipeline.state(), PipelineState::Unauthenticated);
    assert!(harness.presenter.redirects().is_empty());
}
