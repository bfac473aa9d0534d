use crate::common::types::UserId;

/// Broadcast/mute flags of one participant at a point in time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VoiceFlags {
    /// Screen share / "go live" active.
    pub streaming: bool,
    pub muted: bool,
}

/// A single voice-state transition reported by the platform.
///
/// Delivered at most once per actual transition, ordered per participant.
#[derive(Debug, Clone)]
pub struct VoiceStateUpdate {
    pub user_id: UserId,
    pub display_name: String,
    pub before: VoiceFlags,
    pub after: VoiceFlags,
}

impl VoiceStateUpdate {
    /// The participant now satisfies the presenting predicate.
    pub fn starts_presenting(&self) -> bool {
        self.after.streaming && !self.after.muted
    }

    /// The participant just dropped the broadcast.
    pub fn stops_presenting(&self) -> bool {
        self.before.streaming && !self.after.streaming
    }
}
