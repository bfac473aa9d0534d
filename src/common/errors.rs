use thiserror::Error;

/// Errors surfaced by the messaging gateway.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    /// The target channel does not exist (or is not visible to the bot).
    #[error("channel not found")]
    ChannelNotFound,

    #[error("permission denied")]
    PermissionDenied,

    /// The message behind a handle no longer exists.
    #[error("message no longer exists")]
    MessageGone,

    /// Anything else the platform reported.
    #[error("transport error: {0}")]
    Transport(String),
}

/// Failures of interactive commands, rendered verbatim as the single reply
/// sent back to the invoking user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("no eligible participants in the voice channel")]
    EmptyChannel,

    #[error("channel not found, check the configured channel ids")]
    ChannelNotFound,

    #[error("missing permission to do that")]
    PermissionDenied,

    #[error(transparent)]
    Gateway(GatewayError),
}

impl From<GatewayError> for CommandError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::ChannelNotFound => Self::ChannelNotFound,
            GatewayError::PermissionDenied => Self::PermissionDenied,
            other => Self::Gateway(other),
        }
    }
}
