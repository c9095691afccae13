//! Selection policy: which candidate is shown next.

use rand::seq::IndexedRandom;

use crate::model::Candidate;

/// Pick the next candidate to display, uniformly at random among the current
/// members. Returns `None` when the queue is empty.
///
/// Callers must re-evaluate this on every queue change rather than caching
/// the result: the previously selected candidate may have been removed by a
/// decision in the meantime.
#[must_use]
pub fn select_next(candidates: &[Candidate]) -> Option<&Candidate> {
    candidates.choose(&mut rand::rng())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ProfileId;

    fn candidate(id: &str) -> Candidate {
        Candidate {
            id: ProfileId::from(id),
            first_name: "Test".into(),
            last_name: id.to_string(),
            email: format!("{id}@example.com"),
            profile_img: None,
            skill: Vec::new(),
        }
    }

    #[test]
    fn empty_queue_yields_none() {
        assert!(select_next(&[]).is_none());
    }

    #[test]
    fn single_candidate_is_always_chosen() {
        let pool = vec![candidate("only")];
        let chosen = select_next(&pool).expect("one candidate available");
        assert_eq!(chosen.id, ProfileId::from("only"));
    }

    #[test]
    fn selection_is_always_a_member() {
        let pool = vec![candidate("a"), candidate("b"), candidate("c")];
        for _ in 0..50 {
            let chosen = select_next(&pool).expect("pool is non-empty");
            assert!(pool.iter().any(|candidate| candidate.id == chosen.id));
        }
    }
}
