use std::{sync::Arc, time::Duration};

use dashmap::DashMap;
use tokio::time::Instant;
use tracing::{debug, info};

use crate::{
    common::types::{ChannelId, UserId},
    gateway::{Gateway, VoiceStateUpdate},
    presenter::{
        state::PresenceState,
        updates::{UpdateCtx, UpdateTask},
    },
};

/// Tracks presenting time per participant and owns the per-presenter
/// live-update tasks.
///
/// The feed handler is the only writer of voice-state transitions; update
/// tasks concurrently read elapsed time, which is what the sharded maps
/// guard against.
pub struct PresentationTracker {
    gateway: Arc<dyn Gateway>,
    announce_channel: ChannelId,
    records: Arc<DashMap<UserId, PresenceState>>,
    tasks: DashMap<UserId, UpdateTask>,
}

impl PresentationTracker {
    pub fn new(gateway: Arc<dyn Gateway>, announce_channel: ChannelId) -> Self {
        Self {
            gateway,
            announce_channel,
            records: Arc::new(DashMap::new()),
            tasks: DashMap::new(),
        }
    }

    /// Apply one voice-state transition.
    ///
    /// Anything that is neither a start nor a stop (mute toggles while not
    /// broadcasting, etc.) is ignored.
    pub fn handle_voice_state(&self, update: VoiceStateUpdate) {
        if update.starts_presenting() {
            self.start(update.user_id, update.display_name);
        } else if update.stops_presenting() {
            self.stop(update.user_id);
        }
    }

    fn start(&self, user_id: UserId, display_name: String) {
        let now = Instant::now();

        {
            let mut entry = self.records.entry(user_id).or_insert(PresenceState::Idle {
                accumulated: Duration::ZERO,
            });
            if entry.is_presenting() {
                debug!("{} already presenting, ignoring duplicate start", user_id);
                return;
            }
            *entry = entry.start(now);
        }

        info!("{} started presenting", display_name);

        let task = UpdateTask::spawn(UpdateCtx {
            user_id,
            display_name,
            records: self.records.clone(),
            gateway: self.gateway.clone(),
            channel: self.announce_channel,
        });
        if let Some(stale) = self.tasks.insert(user_id, task) {
            // The tag said idle, so any leftover handle is from a loop that
            // already ended; cancel it anyway rather than leak a live one.
            stale.cancel();
        }
    }

    fn stop(&self, user_id: UserId) {
        let now = Instant::now();

        let Some(mut entry) = self.records.get_mut(&user_id) else {
            return;
        };
        if !entry.is_presenting() {
            return;
        }

        if let Some((_, task)) = self.tasks.remove(&user_id) {
            task.cancel();
        }

        *entry = entry.stop(now);
        info!(
            "{} stopped presenting at a total of {:?}",
            user_id,
            entry.elapsed(now)
        );
    }

    /// Total presenting time so far, if the participant has ever presented.
    pub fn elapsed(&self, user_id: UserId) -> Option<Duration> {
        let now = Instant::now();
        self.records.get(&user_id).map(|state| state.elapsed(now))
    }

    pub fn is_presenting(&self, user_id: UserId) -> bool {
        self.records
            .get(&user_id)
            .map(|state| state.is_presenting())
            .unwrap_or(false)
    }

    /// Number of live-update tasks currently registered.
    pub fn active_tasks(&self) -> usize {
        self.tasks.len()
    }

    /// Cancel every live-update task and fold running timers into their
    /// totals. Accumulated durations stay in the store.
    pub fn shutdown(&self) {
        info!("Shutting down presentation tracker");
        let now = Instant::now();

        for item in self.tasks.iter() {
            item.value().cancel();
        }
        self.tasks.clear();

        for mut record in self.records.iter_mut() {
            *record = record.stop(now);
        }
    }
}

impl Drop for PresentationTracker {
    fn drop(&mut self) {
        for item in self.tasks.iter() {
            item.value().cancel();
        }
    }
}
