//! Broadcast channel carrying engine-to-UI signals.
//!
//! Built on `tokio::broadcast`: the engine never blocks on slow consumers,
//! and a subscriber that lags simply misses the oldest signals. Consumers
//! that need current state re-read it from the engine's snapshot accessors.

use devmatch_core::FetchStatus;
use tokio::sync::broadcast::{self, Receiver, Sender};

use crate::session::SessionState;

/// Default broadcast capacity; signals are small and consumers few.
const DEFAULT_CAPACITY: usize = 64;

/// Where the UI should navigate next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    Home,
    Login,
    Profile,
}

/// Signals surfaced to whatever renders the engine's state.
#[derive(Debug, Clone, PartialEq)]
pub enum Signal {
    /// The session store changed; carries the new state.
    SessionChanged(SessionState),
    /// The candidate queue changed; carries the remaining count.
    FeedChanged { remaining: usize },
    /// The fetch lifecycle advanced.
    FetchStatusChanged(FetchStatus),
    /// The UI should navigate somewhere (post-login home, redirect to login,
    /// back to the profile view).
    Navigate(Destination),
    /// A transient user-facing message was posted; auto-clears after the
    /// notice TTL.
    NoticePosted { message: String },
    /// The previously posted notice expired.
    NoticeCleared,
}

impl Signal {
    /// Machine-friendly discriminator for logging and routing.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::SessionChanged(_) => "session_changed",
            Self::FeedChanged { .. } => "feed_changed",
            Self::FetchStatusChanged(_) => "fetch_status_changed",
            Self::Navigate(_) => "navigate",
            Self::NoticePosted { .. } => "notice_posted",
            Self::NoticeCleared => "notice_cleared",
        }
    }
}

/// Shared signal bus; cloning hands out another sender handle to the same
/// channel.
#[derive(Clone)]
pub struct SignalBus {
    sender: Sender<Signal>,
}

impl SignalBus {
    /// Construct a bus with the provided broadcast capacity.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        assert!(capacity > 0, "signal bus capacity must be positive");
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Emit a signal; dropped silently when nobody is subscribed.
    pub fn emit(&self, signal: Signal) {
        let _ = self.sender.send(signal);
    }

    #[must_use]
    pub fn subscribe(&self) -> Receiver<Signal> {
        self.sender.subscribe()
    }
}

impl Default for SignalBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn subscribers_receive_emitted_signals() {
        let bus = SignalBus::with_capacity(8);
        let mut receiver = bus.subscribe();

        bus.emit(Signal::FeedChanged { remaining: 3 });
        bus.emit(Signal::Navigate(Destination::Home));

        assert_eq!(
            receiver.recv().await.expect("first signal"),
            Signal::FeedChanged { remaining: 3 }
        );
        assert_eq!(
            receiver.recv().await.expect("second signal"),
            Signal::Navigate(Destination::Home)
        );
    }

    #[test]
    fn emit_without_subscribers_is_harmless() {
        let bus = SignalBus::new();
        bus.emit(Signal::NoticeCleared);
    }
}
