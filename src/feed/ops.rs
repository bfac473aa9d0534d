use std::sync::Arc;
use std::time::Duration;

use rand::seq::SliceRandom;
use tokio::time::sleep;
use tracing::info;

use crate::{
    common::{errors::CommandError, types::ChannelId},
    feed::{handler::AppState, messages::Command},
    gateway::Participant,
};

/// Dispatch one parsed command invocation.
pub async fn handle_command(
    command: Command,
    state: &Arc<AppState>,
    reply_to: ChannelId,
) -> Result<(), CommandError> {
    match command {
        Command::Order => announce_order(state).await,
        Command::ClearMessages => clear_messages(state, reply_to).await,
    }
}

/// Shuffle the voice channel's human members into a speaking order and post
/// it to the announcement channel.
async fn announce_order(state: &Arc<AppState>) -> Result<(), CommandError> {
    let members = state
        .gateway
        .voice_members(&state.config.bot.voice_channel)
        .await?;

    let mut humans: Vec<Participant> = members.into_iter().filter(|m| !m.bot).collect();
    if humans.is_empty() {
        return Err(CommandError::EmptyChannel);
    }

    humans.shuffle(&mut rand::thread_rng());

    let announce = ChannelId(state.config.bot.announce_channel_id);
    state
        .gateway
        .send_message(announce, &render_order(&humans))
        .await?;

    info!("Announced a speaking order for {} participants", humans.len());
    Ok(())
}

fn render_order(participants: &[Participant]) -> String {
    let mut text = String::from("# Presentation order");
    for (idx, member) in participants.iter().enumerate() {
        text.push_str(&format!("\n{}. {}", idx + 1, member.display_name));
    }
    text
}

/// Delete every message in the announcement channel, pacing the deletions.
///
/// Aborts on the first failure; the caller reports it to the invoking user.
async fn clear_messages(state: &Arc<AppState>, reply_to: ChannelId) -> Result<(), CommandError> {
    let announce = ChannelId(state.config.bot.announce_channel_id);

    // Courtesy notice to the invoker before the sweep starts.
    let _ = state
        .gateway
        .send_message(reply_to, "Deleting every message in the announcement channel")
        .await;

    let messages = state.gateway.channel_messages(announce).await?;
    let total = messages.len();

    let mut deleted = 0usize;
    for handle in &messages {
        state.gateway.delete_message(handle).await?;
        deleted += 1;
        // Fixed pacing; the platform rate limit is an external constraint.
        sleep(Duration::from_millis(state.config.bot.delete_pause_ms)).await;
    }

    info!("Cleared {}/{} messages from the announcement channel", deleted, total);
    Ok(())
}
