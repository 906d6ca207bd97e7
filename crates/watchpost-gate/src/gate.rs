//! Per-request routing over the shared stores.

use chrono::Local;
use tracing::{debug, info, instrument};
use url::Url;

use watchpost_core::capture::{CaptureRecord, CaptureStats};
use watchpost_core::token::{CaptureLink, ConsumeResult, LinkMode};
use watchpost_core::types::{CaptureStamp, SessionId, TokenId};
use watchpost_core::{CaptureVault, Result, TokenStore};

use crate::authenticator::AdminAuthenticator;

/// The rejection text shown to a link-holder. Deliberately generic: it does
/// not distinguish unknown, revoked, and used-up tokens.
pub const INVALID_LINK: &str = "invalid or expired link";

/// One incoming request, reduced to what routing needs.
///
/// The URL `path` parameter does not appear here: a `path=admin` request
/// without a token and a bare root request are the same shape, and both fall
/// through to the session branch.
#[derive(Debug, Clone, Default)]
pub struct GateRequest {
    /// Capture-link token, if the URL carried one.
    pub token: Option<TokenId>,
    /// The requester's session, if the transport established one.
    pub session: Option<SessionId>,
}

impl GateRequest {
    /// A link-holder request presenting a token.
    pub fn with_token(token: TokenId) -> Self {
        Self {
            token: Some(token),
            session: None,
        }
    }

    /// An operator request riding on a session.
    pub fn with_session(session: SessionId) -> Self {
        Self {
            token: None,
            session: Some(session),
        }
    }
}

/// Terminal routing outcome for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The request may proceed to capture; its token has been consumed.
    CaptureFlow,
    /// The requester is an authenticated operator; show the dashboard.
    Dashboard,
    /// The requester must log in first.
    LoginPrompt,
    /// The request presented an unusable token.
    Rejected {
        /// Viewer-safe reason text.
        reason: String,
    },
}

/// Everything the dashboard renders.
#[derive(Debug, Clone)]
pub struct DashboardView {
    /// All capture records, newest first.
    pub captures: Vec<CaptureRecord>,
    /// Derived statistics, day boundary evaluated at read time.
    pub stats: CaptureStats,
    /// Live capture links, in issuance order.
    pub links: Vec<CaptureLink>,
}

/// Result of the explicit admin guard on the dashboard path.
#[derive(Debug, Clone)]
pub enum DashboardAccess {
    /// The session is authenticated.
    Granted(DashboardView),
    /// The session is missing or unauthenticated; show the login prompt.
    LoginRequired,
}

/// The orchestrating decision layer.
///
/// Holds the process-wide stores and the authenticator, and evaluates the
/// routing rule per request: token → consume-or-reject; no token →
/// dashboard-or-login. Token consumption completes before the external
/// capture collaborator runs, and the save happens after the blobs arrive;
/// no store lock spans the capture itself. A `Single` token consumed by a
/// flow that is then abandoned stays consumed.
#[derive(Debug, Clone)]
pub struct CaptureGate<T, V> {
    tokens: T,
    vault: V,
    auth: AdminAuthenticator,
    base_url: Url,
}

impl<T: TokenStore, V: CaptureVault> CaptureGate<T, V> {
    /// Assemble a gate over its collaborators.
    ///
    /// `base_url` is the operator-supplied prefix that issued share links
    /// are built on.
    pub fn new(tokens: T, vault: V, auth: AdminAuthenticator, base_url: Url) -> Self {
        Self {
            tokens,
            vault,
            auth,
            base_url,
        }
    }

    /// The underlying token store.
    pub fn tokens(&self) -> &T {
        &self.tokens
    }

    /// The underlying capture vault.
    pub fn vault(&self) -> &V {
        &self.vault
    }

    /// The authenticator backing the session branch.
    pub fn authenticator(&self) -> &AdminAuthenticator {
        &self.auth
    }

    /// Route one incoming request.
    #[instrument(skip(self, request), fields(has_token = request.token.is_some()))]
    pub async fn route(&self, request: &GateRequest) -> Result<Outcome> {
        if let Some(ref token) = request.token {
            let outcome = match self.tokens.validate_and_consume(token).await? {
                ConsumeResult::Valid => Outcome::CaptureFlow,
                ConsumeResult::Invalid => Outcome::Rejected {
                    reason: INVALID_LINK.to_string(),
                },
            };
            debug!(?outcome, "Routed token request");
            return Ok(outcome);
        }

        let authenticated = match request.session {
            Some(ref session) => self.auth.is_authenticated(session).await,
            None => false,
        };

        Ok(if authenticated {
            Outcome::Dashboard
        } else {
            Outcome::LoginPrompt
        })
    }

    /// Persist the blobs produced by an admitted capture flow.
    ///
    /// Stamps the record with the current local time. Called only after
    /// [`route`](Self::route) returned [`Outcome::CaptureFlow`].
    #[instrument(skip(self, image, audio))]
    pub async fn record_capture(
        &self,
        image: Vec<u8>,
        audio: Option<Vec<u8>>,
    ) -> Result<CaptureRecord> {
        let stamp = CaptureStamp::from_datetime(Local::now().naive_local());
        let record = self.vault.save(image, audio, stamp).await?;
        info!(key = %record.key(), "Recorded capture");
        Ok(record)
    }

    /// Issue a token and return the shareable link embedding it.
    #[instrument(skip(self))]
    pub async fn issue_link(&self, mode: LinkMode) -> Result<Url> {
        let id = self.tokens.issue(mode).await?;
        Ok(self.share_url(&id))
    }

    /// The share URL for an already-issued token: `<base_url>?token=<id>`.
    pub fn share_url(&self, id: &TokenId) -> Url {
        let mut url = self.base_url.clone();
        url.query_pairs_mut().append_pair("token", id.as_str());
        url
    }

    /// The dashboard path, behind the explicit admin guard.
    ///
    /// Returns [`DashboardAccess::LoginRequired`] instead of proceeding when
    /// the session is not authenticated.
    #[instrument(skip(self), fields(session = %session))]
    pub async fn dashboard(&self, session: &SessionId) -> Result<DashboardAccess> {
        if !self.auth.is_authenticated(session).await {
            return Ok(DashboardAccess::LoginRequired);
        }

        let captures = self.vault.list_all().await?;
        let stats = self.vault.stats(Local::now().naive_local()).await?;
        let links = self.tokens.list().await?;

        Ok(DashboardAccess::Granted(DashboardView {
            captures,
            stats,
            links,
        }))
    }
}
