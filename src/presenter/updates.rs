use std::{sync::Arc, time::Duration};

use dashmap::DashMap;
use tokio::{
    task::JoinHandle,
    time::{Instant, sleep},
};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::{
    common::types::{ChannelId, UserId},
    gateway::Gateway,
    presenter::state::{PresenceState, format_elapsed},
};

/// Handle to one running live-update loop.
pub(crate) struct UpdateTask {
    cancel: CancellationToken,
    #[allow(dead_code)]
    handle: JoinHandle<()>,
}

impl UpdateTask {
    pub(crate) fn spawn(ctx: UpdateCtx) -> Self {
        let cancel = CancellationToken::new();
        let handle = tokio::spawn(update_loop(ctx, cancel.clone()));
        Self { cancel, handle }
    }

    /// Request cooperative termination; the loop returns at its next
    /// suspension point.
    pub(crate) fn cancel(&self) {
        self.cancel.cancel();
    }
}

pub(crate) struct UpdateCtx {
    pub user_id: UserId,
    pub display_name: String,
    pub records: Arc<DashMap<UserId, PresenceState>>,
    pub gateway: Arc<dyn Gateway>,
    pub channel: ChannelId,
}

/// Per-presenter update loop: edits one announcement message in place once a
/// second, aligned to wall-clock second boundaries.
///
/// Gateway failures never escape this loop; a presenter whose message cannot
/// be delivered still gets their time tracked.
pub(crate) async fn update_loop(ctx: UpdateCtx, cancel: CancellationToken) {
    let initial = format_elapsed(&ctx.display_name, Duration::ZERO);
    let message = match ctx.gateway.send_message(ctx.channel, &initial).await {
        Ok(handle) => Some(handle),
        Err(e) => {
            warn!("Could not announce timer for {}: {}", ctx.display_name, e);
            None
        }
    };

    loop {
        let elapsed = {
            let now = Instant::now();
            match ctx.records.get(&ctx.user_id) {
                Some(state) if state.is_presenting() => state.elapsed(now),
                _ => break,
            }
        };

        if cancel.is_cancelled() {
            break;
        }

        if let Some(handle) = &message {
            let text = format_elapsed(&ctx.display_name, elapsed);
            if let Err(e) = ctx.gateway.edit_message(handle, &text).await {
                // The destination may be gone or unwritable; keep the loop
                // alive and keep trying on later ticks.
                debug!("Timer edit failed for {}: {}", ctx.display_name, e);
            }
        }

        tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            _ = sleep(until_next_second()) => {}
        }
    }
}

/// Time remaining until the next whole wall-clock second, so edits land on
/// second boundaries instead of drifting by the loop's own execution time.
fn until_next_second() -> Duration {
    Duration::from_millis(1000 - (now_ms() % 1000))
}

fn now_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        gateway::{VoiceFlags, VoiceStateUpdate, mock::MockGateway},
        presenter::tracker::PresentationTracker,
    };
    use std::sync::atomic::Ordering;

    fn start(user: u64) -> VoiceStateUpdate {
        VoiceStateUpdate {
            user_id: UserId(user),
            display_name: format!("user-{user}"),
            before: VoiceFlags::default(),
            after: VoiceFlags {
                streaming: true,
                muted: false,
            },
        }
    }

    fn stop(user: u64) -> VoiceStateUpdate {
        VoiceStateUpdate {
            user_id: UserId(user),
            display_name: format!("user-{user}"),
            before: VoiceFlags {
                streaming: true,
                muted: false,
            },
            after: VoiceFlags::default(),
        }
    }

    fn fixture() -> (Arc<PresentationTracker>, Arc<MockGateway>) {
        let gateway = Arc::new(MockGateway::default());
        let tracker = Arc::new(PresentationTracker::new(gateway.clone(), ChannelId(10)));
        (tracker, gateway)
    }

    #[tokio::test(start_paused = true)]
    async fn announces_once_then_edits_in_place() {
        let (tracker, gateway) = fixture();

        tracker.handle_voice_state(start(1));
        sleep(Duration::from_secs(5)).await;

        assert_eq!(gateway.sent_count(), 1);
        {
            let sent = gateway.sent.lock().unwrap();
            assert_eq!(sent[0].0, ChannelId(10));
            assert_eq!(sent[0].1, "user-1 presentation time: 0m 0s");
        }

        assert!(gateway.edit_count() >= 3);
        let last = gateway.last_edit().unwrap();
        assert!(
            last.starts_with("user-1 presentation time: 0m "),
            "unexpected rendering: {last}"
        );

        tracker.handle_voice_state(stop(1));
    }

    #[tokio::test(start_paused = true)]
    async fn no_edits_after_cancellation() {
        let (tracker, gateway) = fixture();

        tracker.handle_voice_state(start(2));
        sleep(Duration::from_secs(3)).await;
        tracker.handle_voice_state(stop(2));

        // Let any in-flight edit land before sampling the count.
        sleep(Duration::from_millis(50)).await;
        let settled = gateway.edit_count();

        sleep(Duration::from_secs(5)).await;
        assert_eq!(gateway.edit_count(), settled);
    }

    #[tokio::test(start_paused = true)]
    async fn missing_destination_still_tracks_time() {
        let (tracker, gateway) = fixture();
        gateway.fail_sends.store(true, Ordering::Relaxed);

        tracker.handle_voice_state(start(3));
        sleep(Duration::from_secs(4)).await;

        assert_eq!(gateway.edit_count(), 0);

        tracker.handle_voice_state(stop(3));
        let total = tracker.elapsed(UserId(3)).unwrap();
        assert!(total >= Duration::from_secs(4));
    }

    #[tokio::test(start_paused = true)]
    async fn edit_failures_do_not_kill_the_loop() {
        let (tracker, gateway) = fixture();
        gateway.fail_edits.store(true, Ordering::Relaxed);

        tracker.handle_voice_state(start(4));
        sleep(Duration::from_secs(3)).await;
        assert_eq!(gateway.edit_count(), 0);

        // Destination comes back; the loop picks up where it left off.
        gateway.fail_edits.store(false, Ordering::Relaxed);
        sleep(Duration::from_secs(3)).await;
        assert!(gateway.edit_count() >= 1);

        tracker.handle_voice_state(stop(4));
    }

    #[tokio::test(start_paused = true)]
    async fn resumed_presenter_renders_the_carried_total() {
        let (tracker, gateway) = fixture();

        tracker.handle_voice_state(start(5));
        sleep(Duration::from_secs(65)).await;
        tracker.handle_voice_state(stop(5));

        tracker.handle_voice_state(start(5));
        sleep(Duration::from_secs(10)).await;

        let last = gateway.last_edit().unwrap();
        assert!(
            last.starts_with("user-5 presentation time: 1m "),
            "expected a resumed total past one minute, got: {last}"
        );

        tracker.handle_voice_state(stop(5));
    }
}
