use std::time::Duration;

use tokio::time::Instant;

/// Per-participant timer state.
///
/// The tag is the single source of truth for whether a participant is
/// presenting; accumulated time survives across stop/start cycles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresenceState {
    /// Not presenting. Holds everything accumulated so far.
    Idle { accumulated: Duration },
    /// Presenting since `started_at`, with time from earlier runs in `prior`.
    Presenting { started_at: Instant, prior: Duration },
}

impl PresenceState {
    /// Transition into `Presenting`, carrying accumulated time forward.
    /// A start while already presenting changes nothing.
    pub fn start(self, now: Instant) -> Self {
        match self {
            Self::Idle { accumulated } => Self::Presenting {
                started_at: now,
                prior: accumulated,
            },
            presenting @ Self::Presenting { .. } => presenting,
        }
    }

    /// Transition into `Idle`, folding the current run into the total.
    /// A stop while idle changes nothing.
    pub fn stop(self, now: Instant) -> Self {
        match self {
            Self::Presenting { started_at, prior } => Self::Idle {
                accumulated: prior + now.duration_since(started_at),
            },
            idle @ Self::Idle { .. } => idle,
        }
    }

    pub fn is_presenting(&self) -> bool {
        matches!(self, Self::Presenting { .. })
    }

    /// Elapsed presenting time as of `now`.
    pub fn elapsed(&self, now: Instant) -> Duration {
        match *self {
            Self::Idle { accumulated } => accumulated,
            Self::Presenting { started_at, prior } => prior + now.duration_since(started_at),
        }
    }
}

/// Render elapsed time the way the announcement message shows it.
pub fn format_elapsed(name: &str, elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    format!("{} presentation time: {}m {}s", name, secs / 60, secs % 60)
}
