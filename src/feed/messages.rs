use crate::{common::types::ChannelId, gateway::VoiceStateUpdate};

/// Everything the embedding bot pushes into the core.
#[derive(Debug, Clone)]
pub enum InboundEvent {
    /// A participant's voice state changed.
    VoiceState(VoiceStateUpdate),
    /// An already-parsed command invocation. Replies go to `reply_to`.
    Command {
        command: Command,
        reply_to: ChannelId,
    },
}

/// Commands the core understands once the prefix layer has parsed them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Publish a randomized speaking order.
    Order,
    /// Delete every message in the announcement channel.
    ClearMessages,
}
