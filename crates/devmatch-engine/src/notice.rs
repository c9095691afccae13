//! Transient user-facing notices with a fixed display duration.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::signals::{Signal, SignalBus};

/// How long a posted notice stays visible before it auto-clears.
pub const NOTICE_TTL: Duration = Duration::from_secs(3);

struct ActiveNotice {
    id: u64,
    message: String,
}

/// Holds at most one active notice; posting replaces the previous one and
/// schedules the expiry that clears it unless a newer notice superseded it.
#[derive(Clone)]
pub(crate) struct NoticeBoard {
    slot: Arc<Mutex<Option<ActiveNotice>>>,
    seq: Arc<AtomicU64>,
    signals: SignalBus,
}

impl NoticeBoard {
    pub(crate) fn new(signals: SignalBus) -> Self {
        Self {
            slot: Arc::new(Mutex::new(None)),
            seq: Arc::new(AtomicU64::new(0)),
            signals,
        }
    }

    /// Post a message and schedule its expiry. Must run inside a Tokio
    /// runtime; the expiry is a spawned sleep.
    pub(crate) fn post(&self, message: impl Into<String>) {
        let message = message.into();
        let id = self.seq.fetch_add(1, Ordering::Relaxed) + 1;
        {
            let mut slot = self.slot.lock().expect("notice mutex poisoned");
            *slot = Some(ActiveNotice {
                id,
                message: message.clone(),
            });
        }
        self.signals.emit(Signal::NoticePosted { message });

        let board = self.clone();
        tokio::spawn(async move {
            tokio::time::sleep(NOTICE_TTL).await;
            board.expire(id);
        });
    }

    /// The currently visible message, if any.
    pub(crate) fn current(&self) -> Option<String> {
        self.slot
            .lock()
            .expect("notice mutex poisoned")
            .as_ref()
            .map(|notice| notice.message.clone())
    }

    fn expire(&self, id: u64) {
        let cleared = {
            let mut slot = self.slot.lock().expect("notice mutex poisoned");
            // A newer notice may have replaced this one; only clear our own.
            match slot.as_ref() {
                Some(active) if active.id == id => {
                    *slot = None;
                    true
                }
                _ => false,
            }
        };
        if cleared {
            self.signals.emit(Signal::NoticeCleared);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::{advance, sleep};

    #[tokio::test(start_paused = true)]
    async fn notice_clears_after_ttl() {
        let bus = SignalBus::new();
        let board = NoticeBoard::new(bus.clone());
        let mut receiver = bus.subscribe();

        board.post("Something went wrong");
        assert_eq!(board.current().as_deref(), Some("Something went wrong"));
        assert_eq!(
            receiver.recv().await.expect("posted signal"),
            Signal::NoticePosted {
                message: "Something went wrong".into()
            }
        );

        advance(NOTICE_TTL + Duration::from_millis(10)).await;
        sleep(Duration::from_millis(1)).await;

        assert_eq!(board.current(), None);
        assert_eq!(
            receiver.recv().await.expect("cleared signal"),
            Signal::NoticeCleared
        );
    }

    #[tokio::test(start_paused = true)]
    async fn newer_notice_outlives_the_old_expiry() {
        let board = NoticeBoard::new(SignalBus::new());

        board.post("first");
        advance(Duration::from_secs(2)).await;
        board.post("second");

        // First notice's expiry fires now but must not clear the second.
        advance(Duration::from_millis(1100)).await;
        sleep(Duration::from_millis(1)).await;
        assert_eq!(board.current().as_deref(), Some("second"));

        advance(NOTICE_TTL).await;
        sleep(Duration::from_millis(1)).await;
        assert_eq!(board.current(), None);
    }
}
