//! Session store state.

use devmatch_core::Identity;

/// Authentication state held by the engine.
///
/// `Unknown` exists only before the first refresh attempt resolves; once a
/// refresh, login, or signup completes the state is either `Authenticated`
/// or `Unauthenticated` and never returns to `Unknown` (short of logout,
/// which resolves to `Unauthenticated` directly).
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SessionState {
    #[default]
    Unknown,
    Authenticated(Identity),
    Unauthenticated,
}

impl SessionState {
    #[must_use]
    pub fn identity(&self) -> Option<&Identity> {
        match self {
            Self::Authenticated(identity) => Some(identity),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }
}

/// Session slot owned by the engine: state plus the refresher's in-flight
/// guard.
#[derive(Debug, Default)]
pub(crate) struct SessionSlot {
    pub(crate) state: SessionState,
    pub(crate) refresh_in_flight: bool,
}
