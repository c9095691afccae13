//! Ordered, deduplicated store of candidates awaiting a decision.

use std::collections::HashSet;

use crate::model::{Candidate, ProfileId};

/// The candidate queue: insertion order defines merge priority, `ProfileId`
/// uniqueness is the invariant every mutation preserves.
///
/// Single-writer by construction; the owning engine serializes mutations, so
/// reads via [`CandidateQueue::snapshot`] never observe a partial merge.
#[derive(Debug, Default, Clone)]
pub struct CandidateQueue {
    items: Vec<Candidate>,
}

impl CandidateQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `incoming` to the queue, dropping every candidate whose id is
    /// already present. First occurrence wins; relative order is stable.
    /// Returns the number of candidates actually admitted.
    pub fn merge(&mut self, incoming: Vec<Candidate>) -> usize {
        if incoming.is_empty() {
            return 0;
        }

        let mut seen: HashSet<ProfileId> =
            self.items.iter().map(|candidate| candidate.id.clone()).collect();
        let mut admitted = 0;
        for candidate in incoming {
            if seen.insert(candidate.id.clone()) {
                self.items.push(candidate);
                admitted += 1;
            }
        }
        admitted
    }

    /// Remove the candidate with `id` if present. Removing an absent id is a
    /// no-op, not an error: a second removal request for an already-decided
    /// candidate must be tolerated.
    pub fn remove(&mut self, id: &ProfileId) -> bool {
        let before = self.items.len();
        self.items.retain(|candidate| candidate.id != *id);
        self.items.len() != before
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    #[must_use]
    pub fn contains(&self, id: &ProfileId) -> bool {
        self.items.iter().any(|candidate| candidate.id == *id)
    }

    /// Current ordered contents.
    #[must_use]
    pub fn snapshot(&self) -> &[Candidate] {
        &self.items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
