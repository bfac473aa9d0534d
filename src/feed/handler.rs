use std::sync::Arc;

use tracing::{info, warn};

use crate::{
    common::types::ChannelId,
    configs::Config,
    feed::{messages::InboundEvent, ops::handle_command},
    gateway::Gateway,
    presenter::tracker::PresentationTracker,
};

/// Top-level shared state for the dispatch loop.
pub struct AppState {
    pub gateway: Arc<dyn Gateway>,
    pub tracker: Arc<PresentationTracker>,
    pub config: Config,
}

impl AppState {
    pub fn new(gateway: Arc<dyn Gateway>, config: Config) -> Self {
        let tracker = Arc::new(PresentationTracker::new(
            gateway.clone(),
            ChannelId(config.bot.announce_channel_id),
        ));
        Self {
            gateway,
            tracker,
            config,
        }
    }
}

/// Drain inbound events until every sender is gone.
///
/// Each event is processed to completion before the next one is taken, which
/// is what keeps per-participant transitions in arrival order without any
/// extra queueing.
pub async fn run(state: Arc<AppState>, rx: flume::Receiver<InboundEvent>) {
    info!("Event feed running");

    while let Ok(event) = rx.recv_async().await {
        match event {
            InboundEvent::VoiceState(update) => {
                state.tracker.handle_voice_state(update);
            }
            InboundEvent::Command { command, reply_to } => {
                if let Err(e) = handle_command(command, &state, reply_to).await {
                    // One human-readable reply per failure, then stop.
                    if let Err(send_err) =
                        state.gateway.send_message(reply_to, &e.to_string()).await
                    {
                        warn!("Could not report command failure: {}", send_err);
                    }
                }
            }
        }
    }

    info!("Event feed closed");
    state.tracker.shutdown();
}
