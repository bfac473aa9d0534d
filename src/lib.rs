pub mod common;
pub mod configs;
pub mod feed;
pub mod gateway;
pub mod presenter;

pub use common::errors::{CommandError, GatewayError};
pub use common::types::{ChannelId, MessageId, UserId};
pub use configs::Config;
pub use feed::handler::AppState;
pub use feed::messages::{Command, InboundEvent};
pub use gateway::{Gateway, MessageHandle, Participant, VoiceFlags, VoiceStateUpdate};
pub use presenter::tracker::PresentationTracker;
