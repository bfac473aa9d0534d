pub mod events;
#[cfg(test)]
pub(crate) mod mock;

use async_trait::async_trait;

use crate::common::{
    errors::GatewayError,
    types::{ChannelId, MessageId, UserId},
};

pub use events::{VoiceFlags, VoiceStateUpdate};

/// Stable reference to a message previously sent through the gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageHandle {
    pub channel: ChannelId,
    pub message: MessageId,
}

/// A member of a voice channel as reported by the platform.
#[derive(Debug, Clone)]
pub struct Participant {
    pub id: UserId,
    pub display_name: String,
    /// Non-human members are excluded from speaking orders.
    pub bot: bool,
}

/// The messaging-platform surface the core depends on.
///
/// Implementations wrap the concrete chat platform; the core never touches
/// the wire directly.
#[async_trait]
pub trait Gateway: Send + Sync {
    /// Post a new message and return a handle usable for later edits.
    async fn send_message(
        &self,
        channel: ChannelId,
        text: &str,
    ) -> Result<MessageHandle, GatewayError>;

    /// Replace the content of a previously sent message.
    async fn edit_message(&self, handle: &MessageHandle, text: &str) -> Result<(), GatewayError>;

    /// Delete a previously sent message.
    async fn delete_message(&self, handle: &MessageHandle) -> Result<(), GatewayError>;

    /// Current members of the named voice channel.
    ///
    /// An existing channel with nobody in it yields `Ok` with an empty list;
    /// `ChannelNotFound` means the channel itself is absent.
    async fn voice_members(&self, channel_name: &str) -> Result<Vec<Participant>, GatewayError>;

    /// Every message currently in `channel`, oldest first.
    async fn channel_messages(
        &self,
        channel: ChannelId,
    ) -> Result<Vec<MessageHandle>, GatewayError>;
}
