//! Feed slot: candidate queue plus fetch bookkeeping.

use devmatch_core::{Candidate, CandidateQueue, FetchStatus, PageCursor};

/// Single-writer feed state owned by the engine.
#[derive(Debug)]
pub(crate) struct FeedSlot {
    pub(crate) queue: CandidateQueue,
    pub(crate) status: FetchStatus,
    pub(crate) cursor: PageCursor,
    /// Set when the last successful page came back empty; blocks refetching
    /// the same cursor until an explicit reset.
    pub(crate) exhausted: bool,
    pub(crate) last_error: Option<String>,
    initial_cursor: PageCursor,
}

impl FeedSlot {
    pub(crate) fn new(cursor: PageCursor) -> Self {
        Self {
            queue: CandidateQueue::new(),
            status: FetchStatus::Idle,
            cursor,
            exhausted: false,
            last_error: None,
            initial_cursor: cursor,
        }
    }

    /// Whether a fetch is warranted right now: the queue must be empty, no
    /// fetch may be in flight, and a definitively empty feed stays quiet
    /// until reset. `Errored` does not block; the caller's fresh call is the
    /// retry.
    pub(crate) fn needs_fetch(&self) -> bool {
        if !self.queue.is_empty() {
            return false;
        }
        match self.status {
            FetchStatus::Loading => false,
            FetchStatus::Loaded => !self.exhausted,
            FetchStatus::Idle | FetchStatus::Errored => true,
        }
    }

    /// Drop all feed state back to its pristine form (logout or explicit
    /// feed reset).
    pub(crate) fn reset(&mut self) {
        self.queue.clear();
        self.status = FetchStatus::Idle;
        self.cursor = self.initial_cursor;
        self.exhausted = false;
        self.last_error = None;
    }
}

/// Read-only view of the feed handed to consumers.
#[derive(Debug, Clone)]
pub struct FeedView {
    pub candidates: Vec<Candidate>,
    pub status: FetchStatus,
    /// True once the backend returned an empty page for the current cursor.
    pub exhausted: bool,
    pub last_error: Option<String>,
}
