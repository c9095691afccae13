//! Gateway trait implemented by remote-service adapters.

use async_trait::async_trait;

use crate::error::GatewayResult;
use crate::model::{
    Candidate, Credentials, Decision, Identity, PageCursor, ProfileId, ProfileUpdate, Registration,
};

/// Seam between the engine and the remote matching service.
///
/// The HTTP client in `devmatch-client` is the production adapter; engine
/// tests substitute an in-memory stub. All calls ride credential-bearing
/// transport (session cookie) except `login` and `signup`, which establish it.
#[async_trait]
pub trait MatchGateway: Send + Sync {
    /// Fetch the caller's own identity (`GET /user/profile`).
    async fn fetch_profile(&self) -> GatewayResult<Identity>;

    /// Authenticate with email and password (`POST /auth/login`).
    async fn login(&self, credentials: &Credentials) -> GatewayResult<Identity>;

    /// Register a new account (`POST /auth/signup`).
    async fn signup(&self, registration: &Registration) -> GatewayResult<Identity>;

    /// Invalidate the server-side session (`GET /auth/logout`).
    async fn logout(&self) -> GatewayResult<()>;

    /// Replace profile fields (`PATCH /user/profile`); the returned identity
    /// is authoritative.
    async fn update_profile(&self, update: &ProfileUpdate) -> GatewayResult<Identity>;

    /// Fetch one page of the candidate feed (`GET /user/feed`).
    async fn fetch_feed(&self, cursor: PageCursor) -> GatewayResult<Vec<Candidate>>;

    /// Record a decision on a candidate (`POST /request/send/{verdict}/{id}`).
    async fn send_decision(&self, candidate: &ProfileId, decision: Decision) -> GatewayResult<()>;
}
