//! Feed synchronization and optimistic mutation engine.
//!
//! The [`Engine`] owns the two stores (session and feed), talks to the
//! remote service through a [`MatchGateway`], and broadcasts state changes
//! over a [`SignalBus`]. Scheduling is cooperative: every store mutation
//! happens under a short `Mutex` section with no await held, network calls
//! are the only suspension points, and in-flight guards (a `Loading` status
//! for the feed, a boolean for the session refresher) keep a flood of
//! identical requests down to one.
//!
//! Layout:
//! - `feed.rs`: feed slot (queue + fetch status + cursor) and the view type
//! - `session.rs`: session state and the refresher's guard
//! - `signals.rs`: broadcast bus of engine-to-UI signals
//! - `notice.rs`: transient notices with a 3-second display window
//! - `error.rs`: operation error type

pub mod error;
pub mod feed;
mod notice;
pub mod session;
pub mod signals;

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use tokio::task::JoinHandle;

use devmatch_core::validate::{
    validate_credentials, validate_profile_update, validate_registration,
};
use devmatch_core::{
    Candidate, Credentials, Decision, FetchStatus, Identity, MatchGateway, PageCursor, ProfileId,
    ProfileUpdate, Registration, select_next,
};

pub use error::{EngineError, EngineResult};
pub use feed::FeedView;
pub use notice::NOTICE_TTL;
pub use session::SessionState;
pub use signals::{Destination, Signal, SignalBus};

use crate::feed::FeedSlot;
use crate::notice::NoticeBoard;
use crate::session::SessionSlot;

/// The engine: single writer for the session and feed stores.
///
/// Methods take `&self`; wrap the engine in an [`Arc`] to share it between
/// the UI task and any background driver. Must be used inside a Tokio
/// runtime: decisions and notice expiries are spawned tasks.
pub struct Engine {
    gateway: Arc<dyn MatchGateway>,
    session: Mutex<SessionSlot>,
    feed: Mutex<FeedSlot>,
    notices: NoticeBoard,
    signals: SignalBus,
    /// Bumped on logout/reset; completions from an earlier epoch are stale
    /// and get dropped instead of applied.
    epoch: AtomicU64,
    /// Decision tasks still in flight, awaited by [`Engine::drain_decisions`].
    decision_tasks: Mutex<Vec<JoinHandle<()>>>,
}

impl Engine {
    /// Build an engine starting at the first feed page with the default
    /// limit.
    #[must_use]
    pub fn new(gateway: Arc<dyn MatchGateway>) -> Self {
        Self::with_cursor(gateway, PageCursor::default())
    }

    /// Build an engine with an explicit initial cursor.
    #[must_use]
    pub fn with_cursor(gateway: Arc<dyn MatchGateway>, cursor: PageCursor) -> Self {
        let signals = SignalBus::new();
        Self {
            gateway,
            session: Mutex::new(SessionSlot::default()),
            feed: Mutex::new(FeedSlot::new(cursor)),
            notices: NoticeBoard::new(signals.clone()),
            signals,
            epoch: AtomicU64::new(0),
            decision_tasks: Mutex::new(Vec::new()),
        }
    }

    /// Subscribe to engine-to-UI signals.
    #[must_use]
    pub fn subscribe(&self) -> tokio::sync::broadcast::Receiver<Signal> {
        self.signals.subscribe()
    }

    /// Current session state.
    #[must_use]
    pub fn session_state(&self) -> SessionState {
        self.lock_session().state.clone()
    }

    /// Current feed snapshot: candidates, fetch status, and the last
    /// recorded fetch error.
    #[must_use]
    pub fn feed_view(&self) -> FeedView {
        let feed = self.lock_feed();
        FeedView {
            candidates: feed.queue.snapshot().to_vec(),
            status: feed.status,
            exhausted: feed.exhausted,
            last_error: feed.last_error.clone(),
        }
    }

    /// The transient notice currently on display, if any.
    #[must_use]
    pub fn current_notice(&self) -> Option<String> {
        self.notices.current()
    }

    /// Resolve the session against the backend, at most once per need.
    ///
    /// A no-op while a previous refresh is outstanding or once the session is
    /// authenticated. Failure of any kind resolves to `Unauthenticated` and
    /// signals a redirect to login; the state is never left ambiguous.
    pub async fn refresh_session(&self) -> SessionState {
        {
            let mut session = self.lock_session();
            if session.refresh_in_flight || session.state.is_authenticated() {
                return session.state.clone();
            }
            session.refresh_in_flight = true;
        }

        let epoch = self.epoch.load(Ordering::SeqCst);
        let outcome = self.gateway.fetch_profile().await;

        let mut session = self.lock_session();
        session.refresh_in_flight = false;
        if self.epoch.load(Ordering::SeqCst) != epoch {
            tracing::debug!("discarding stale session refresh");
            return session.state.clone();
        }

        match outcome {
            Ok(identity) => {
                session.state = SessionState::Authenticated(identity);
                self.signals.emit(Signal::SessionChanged(session.state.clone()));
            }
            Err(err) => {
                tracing::debug!(error = %err, "session refresh failed; treating as unauthenticated");
                session.state = SessionState::Unauthenticated;
                self.signals.emit(Signal::SessionChanged(session.state.clone()));
                self.signals.emit(Signal::Navigate(Destination::Login));
            }
        }
        session.state.clone()
    }

    /// Authenticate with email and password.
    ///
    /// Validation failures never reach the network. A backend rejection
    /// leaves the session untouched and posts a transient notice with the
    /// server's message.
    pub async fn login(&self, credentials: &Credentials) -> EngineResult<Identity> {
        validate_credentials(credentials).map_err(EngineError::Validation)?;

        match self.gateway.login(credentials).await {
            Ok(identity) => {
                self.install_identity(identity.clone(), Destination::Home);
                Ok(identity)
            }
            Err(err) => {
                self.notices.post(err.user_message());
                Err(EngineError::Remote(err))
            }
        }
    }

    /// Register a new account; mirrors [`Engine::login`] on success and
    /// failure.
    pub async fn signup(&self, registration: &Registration) -> EngineResult<Identity> {
        validate_registration(registration).map_err(EngineError::Validation)?;

        match self.gateway.signup(registration).await {
            Ok(identity) => {
                self.install_identity(identity.clone(), Destination::Home);
                Ok(identity)
            }
            Err(err) => {
                self.notices.post(err.user_message());
                Err(EngineError::Remote(err))
            }
        }
    }

    /// End the session. The remote call is best-effort: whatever it returns,
    /// local state is deauthenticated, the feed is dropped, and a redirect to
    /// login is signaled.
    pub async fn logout(&self) {
        if let Err(err) = self.gateway.logout().await {
            tracing::debug!(error = %err, "remote logout failed; clearing local session anyway");
        }

        self.epoch.fetch_add(1, Ordering::SeqCst);
        {
            let mut session = self.lock_session();
            session.refresh_in_flight = false;
            session.state = SessionState::Unauthenticated;
        }
        {
            let mut feed = self.lock_feed();
            feed.reset();
        }

        self.signals
            .emit(Signal::SessionChanged(SessionState::Unauthenticated));
        self.signals.emit(Signal::FetchStatusChanged(FetchStatus::Idle));
        self.signals.emit(Signal::FeedChanged { remaining: 0 });
        self.signals.emit(Signal::Navigate(Destination::Login));
    }

    /// Replace profile fields. The server's returned identity is
    /// authoritative and replaces the stored one wholesale; no local merge.
    pub async fn update_profile(&self, update: &ProfileUpdate) -> EngineResult<Identity> {
        validate_profile_update(update).map_err(EngineError::Validation)?;

        match self.gateway.update_profile(update).await {
            Ok(identity) => {
                self.install_identity(identity.clone(), Destination::Profile);
                Ok(identity)
            }
            Err(err) => {
                self.notices.post(err.user_message());
                Err(EngineError::Remote(err))
            }
        }
    }

    /// Keep the feed populated: fetch the current page if the queue is empty
    /// and nothing is in flight. Safe to call as often as the caller likes;
    /// while a fetch is outstanding every further call is a no-op.
    ///
    /// Fetch failures set `Errored` and are recorded, not retried; the next
    /// `ensure_fed` call is the retry. An empty page marks the feed
    /// exhausted (see [`Engine::reset_feed`]).
    pub async fn ensure_fed(&self) {
        let (cursor, epoch) = {
            let mut feed = self.lock_feed();
            if !feed.needs_fetch() {
                return;
            }
            feed.status = FetchStatus::Loading;
            (feed.cursor, self.epoch.load(Ordering::SeqCst))
        };
        self.signals
            .emit(Signal::FetchStatusChanged(FetchStatus::Loading));
        tracing::debug!(
            page = cursor.page_number(),
            limit = cursor.limit(),
            "fetching feed page"
        );

        let outcome = self.gateway.fetch_feed(cursor).await;

        let mut feed = self.lock_feed();
        if self.epoch.load(Ordering::SeqCst) != epoch {
            // Logout or reset superseded this fetch; the slot was already
            // restored to Idle, so just drop the completion.
            tracing::debug!("discarding stale feed page");
            return;
        }

        match outcome {
            Ok(page) => {
                let fetched = page.len();
                if fetched == 0 {
                    feed.exhausted = true;
                } else {
                    feed.cursor = feed.cursor.advanced();
                }
                let admitted = feed.queue.merge(page);
                feed.status = FetchStatus::Loaded;
                feed.last_error = None;
                let remaining = feed.queue.len();
                drop(feed);

                tracing::debug!(fetched, admitted, remaining, "feed page merged");
                self.signals
                    .emit(Signal::FetchStatusChanged(FetchStatus::Loaded));
                self.signals.emit(Signal::FeedChanged { remaining });
            }
            Err(err) => {
                feed.status = FetchStatus::Errored;
                feed.last_error = Some(err.to_string());
                drop(feed);

                tracing::warn!(error = %err, "feed fetch failed");
                self.signals
                    .emit(Signal::FetchStatusChanged(FetchStatus::Errored));
            }
        }
    }

    /// Throw away all feed state and return to Idle at the initial cursor.
    /// In-flight fetch completions from before the reset are dropped.
    pub fn reset_feed(&self) {
        self.epoch.fetch_add(1, Ordering::SeqCst);
        {
            let mut feed = self.lock_feed();
            feed.reset();
        }
        self.signals.emit(Signal::FetchStatusChanged(FetchStatus::Idle));
        self.signals.emit(Signal::FeedChanged { remaining: 0 });
    }

    /// Apply a user decision to the displayed candidate.
    ///
    /// Fires the remote mutation without awaiting it, then removes the
    /// candidate locally in the same event: the candidate is never offered
    /// again even while the call is in flight, and a remote failure is
    /// logged without re-inserting it. Returns `false` when the id is not in
    /// the current queue (stale reference); nothing is fired then.
    pub fn decide(&self, candidate: &ProfileId, decision: Decision) -> bool {
        let remaining = {
            let mut feed = self.lock_feed();
            if !feed.queue.contains(candidate) {
                tracing::debug!(candidate = %candidate, "decision on unknown candidate ignored");
                return false;
            }

            let gateway = Arc::clone(&self.gateway);
            let id = candidate.clone();
            let task = tokio::spawn(async move {
                if let Err(err) = gateway.send_decision(&id, decision).await {
                    tracing::warn!(
                        candidate = %id,
                        error = %err,
                        "decision not recorded remotely; keeping optimistic removal"
                    );
                }
            });
            {
                let mut tasks = self.lock_decision_tasks();
                tasks.retain(|task| !task.is_finished());
                tasks.push(task);
            }

            feed.queue.remove(candidate);
            feed.queue.len()
        };

        self.signals.emit(Signal::FeedChanged { remaining });
        true
    }

    /// Wait for every fired decision to resolve remotely. The optimistic
    /// removals are long applied; this only flushes the outstanding network
    /// calls, so a caller about to exit does not strand the last one.
    pub async fn drain_decisions(&self) {
        loop {
            let tasks = std::mem::take(&mut *self.lock_decision_tasks());
            if tasks.is_empty() {
                return;
            }
            for task in tasks {
                if let Err(err) = task.await {
                    tracing::warn!(error = %err, "decision task failed to join");
                }
            }
        }
    }

    /// Pick the candidate to display next: uniform random over the current
    /// queue, `None` when it is empty. Never cached; call again after every
    /// queue change.
    #[must_use]
    pub fn select_next(&self) -> Option<Candidate> {
        let feed = self.lock_feed();
        select_next(feed.queue.snapshot()).cloned()
    }

    fn install_identity(&self, identity: Identity, destination: Destination) {
        {
            let mut session = self.lock_session();
            session.state = SessionState::Authenticated(identity);
        }
        self.signals
            .emit(Signal::SessionChanged(self.session_state()));
        self.signals.emit(Signal::Navigate(destination));
    }

    fn lock_session(&self) -> MutexGuard<'_, SessionSlot> {
        self.session.lock().expect("session mutex poisoned")
    }

    fn lock_feed(&self) -> MutexGuard<'_, FeedSlot> {
        self.feed.lock().expect("feed mutex poisoned")
    }

    fn lock_decision_tasks(&self) -> MutexGuard<'_, Vec<JoinHandle<()>>> {
        self.decision_tasks
            .lock()
            .expect("decision task mutex poisoned")
    }
}
