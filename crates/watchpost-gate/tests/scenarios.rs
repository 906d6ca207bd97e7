//! End-to-end routing scenarios over real stores.

use std::sync::Arc;

use tempfile::TempDir;
use url::Url;

use watchpost_core::token::LinkMode;
use watchpost_core::types::TokenId;
use watchpost_core::{CaptureVault, Credentials, TokenStore};
use watchpost_gate::{
    AdminAuthenticator, AdminConfig, CaptureGate, DashboardAccess, GateRequest, Outcome,
    INVALID_LINK,
};
use watchpost_store::{FileVault, MemoryTokenStore};

fn gate(dir: &TempDir) -> CaptureGate<MemoryTokenStore, FileVault> {
    let auth = AdminAuthenticator::new(AdminConfig::new("admin", "correct-pass").unwrap());
    CaptureGate::new(
        MemoryTokenStore::new(),
        FileVault::new(dir.path()),
        auth,
        Url::parse("https://cams.example.net/view").unwrap(),
    )
}

fn rejected() -> Outcome {
    Outcome::Rejected {
        reason: INVALID_LINK.to_string(),
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn single_link_admits_exactly_one_of_two_racing_requests() {
    let dir = TempDir::new().unwrap();
    let gate = Arc::new(gate(&dir));
    let token = gate.tokens().issue(LinkMode::Single).await.unwrap();

    let a = {
        let gate = gate.clone();
        let token = token.clone();
        tokio::spawn(async move { gate.route(&GateRequest::with_token(token)).await.unwrap() })
    };
    let b = {
        let gate = gate.clone();
        let token = token.clone();
        tokio::spawn(async move { gate.route(&GateRequest::with_token(token)).await.unwrap() })
    };

    let outcomes = [a.await.unwrap(), b.await.unwrap()];

    let flows = outcomes
        .iter()
        .filter(|o| **o == Outcome::CaptureFlow)
        .count();
    assert_eq!(flows, 1, "exactly one racing request may capture");
    assert!(outcomes.contains(&rejected()));
}

#[tokio::test]
async fn multiple_link_works_until_revoked() {
    let dir = TempDir::new().unwrap();
    let gate = gate(&dir);
    let token = gate.tokens().issue(LinkMode::Multiple).await.unwrap();

    for _ in 0..3 {
        let outcome = gate
            .route(&GateRequest::with_token(token.clone()))
            .await
            .unwrap();
        assert_eq!(outcome, Outcome::CaptureFlow);
    }

    gate.tokens().revoke(&token).await.unwrap();

    let outcome = gate
        .route(&GateRequest::with_token(token))
        .await
        .unwrap();
    assert_eq!(outcome, rejected());
}

#[tokio::test]
async fn admitted_capture_lands_in_the_vault() {
    let dir = TempDir::new().unwrap();
    let gate = gate(&dir);
    let token = gate.tokens().issue(LinkMode::Single).await.unwrap();

    let outcome = gate
        .route(&GateRequest::with_token(token))
        .await
        .unwrap();
    assert_eq!(outcome, Outcome::CaptureFlow);

    let image = b"\x89PNG\r\n\x1a\n".to_vec();
    let record = gate.record_capture(image.clone(), None).await.unwrap();
    assert!(!record.meta.has_audio);

    let records = gate.vault().list_all().await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].image, image);
    assert!(!records[0].meta.has_audio);
}

#[tokio::test]
async fn unknown_token_is_rejected_with_generic_reason() {
    let dir = TempDir::new().unwrap();
    let gate = gate(&dir);

    let outcome = gate
        .route(&GateRequest::with_token(TokenId::new("tok-guess").unwrap()))
        .await
        .unwrap();
    assert_eq!(outcome, rejected());
}

#[tokio::test]
async fn admin_path_prompts_then_shows_dashboard_after_login() {
    let dir = TempDir::new().unwrap();
    let gate = gate(&dir);
    let auth = gate.authenticator();

    // Unauthenticated request to the admin path.
    let session = auth.open_session().await;
    let outcome = gate
        .route(&GateRequest::with_session(session.clone()))
        .await
        .unwrap();
    assert_eq!(outcome, Outcome::LoginPrompt);

    // Same request shape after a successful login.
    assert!(auth
        .login(&session, &Credentials::new("admin", "correct-pass"))
        .await
        .unwrap());
    let outcome = gate
        .route(&GateRequest::with_session(session.clone()))
        .await
        .unwrap();
    assert_eq!(outcome, Outcome::Dashboard);

    // And logout flips it back.
    auth.logout(&session).await;
    let outcome = gate.route(&GateRequest::with_session(session)).await.unwrap();
    assert_eq!(outcome, Outcome::LoginPrompt);
}

#[tokio::test]
async fn bare_request_behaves_like_admin_path() {
    let dir = TempDir::new().unwrap();
    let gate = gate(&dir);

    let outcome = gate.route(&GateRequest::default()).await.unwrap();
    assert_eq!(outcome, Outcome::LoginPrompt);
}

#[tokio::test]
async fn dashboard_guard_returns_login_required_when_unauthenticated() {
    let dir = TempDir::new().unwrap();
    let gate = gate(&dir);
    let session = gate.authenticator().open_session().await;

    assert!(matches!(
        gate.dashboard(&session).await.unwrap(),
        DashboardAccess::LoginRequired
    ));
}

#[tokio::test]
async fn dashboard_view_reflects_captures_and_links() {
    let dir = TempDir::new().unwrap();
    let gate = gate(&dir);
    let auth = gate.authenticator();

    // One capture through the full flow.
    let token = gate.tokens().issue(LinkMode::Single).await.unwrap();
    assert_eq!(
        gate.route(&GateRequest::with_token(token)).await.unwrap(),
        Outcome::CaptureFlow
    );
    gate.record_capture(b"img".to_vec(), Some(b"wav".to_vec()))
        .await
        .unwrap();

    // One live link remains issued but unused.
    let live = gate.tokens().issue(LinkMode::Multiple).await.unwrap();

    let session = auth.open_session().await;
    auth.login(&session, &Credentials::new("admin", "correct-pass"))
        .await
        .unwrap();

    let view = match gate.dashboard(&session).await.unwrap() {
        DashboardAccess::Granted(view) => view,
        DashboardAccess::LoginRequired => panic!("authenticated session was refused"),
    };

    assert_eq!(view.captures.len(), 1);
    assert!(view.captures[0].meta.has_audio);
    assert_eq!(view.stats.total, 1);
    assert_eq!(view.stats.with_audio, 1);
    assert_eq!(view.stats.today, 1);
    assert_eq!(view.links.len(), 1);
    assert_eq!(view.links[0].id, live);
}

#[tokio::test]
async fn issued_link_embeds_the_token() {
    let dir = TempDir::new().unwrap();
    let gate = gate(&dir);

    let url = gate.issue_link(LinkMode::Single).await.unwrap();
    assert!(url.as_str().starts_with("https://cams.example.net/view?token="));

    let (_, id) = url
        .query_pairs()
        .find(|(k, _)| k == "token")
        .expect("link carries a token parameter");
    let token = TokenId::new(id.as_ref()).unwrap();

    // The embedded token routes to the capture flow.
    let outcome = gate
        .route(&GateRequest::with_token(token))
        .await
        .unwrap();
    assert_eq!(outcome, Outcome::CaptureFlow);
}

#[tokio::test]
async fn abandoned_single_flow_stays_consumed() {
    let dir = TempDir::new().unwrap();
    let gate = gate(&dir);
    let token = gate.tokens().issue(LinkMode::Single).await.unwrap();

    // The link-holder opens the link (consuming the token) but never
    // produces a capture.
    assert_eq!(
        gate.route(&GateRequest::with_token(token.clone()))
            .await
            .unwrap(),
        Outcome::CaptureFlow
    );

    // A retry is rejected: the link is used up by design.
    assert_eq!(
        gate.route(&GateRequest::with_token(token)).await.unwrap(),
        rejected()
    );
    assert!(gate.vault().list_all().await.unwrap().is_empty());
}
