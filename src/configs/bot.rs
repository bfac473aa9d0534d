use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct BotConfig {
    /// Text channel (or thread) that receives timer and order announcements.
    pub announce_channel_id: u64,
    /// Voice channel whose members make up the speaking order.
    #[serde(default = "default_voice_channel")]
    pub voice_channel: String,
    /// Pause between deletions during a bulk clear, in milliseconds.
    #[serde(default = "default_delete_pause_ms")]
    pub delete_pause_ms: u64,
}

fn default_voice_channel() -> String {
    "general".to_string()
}

fn default_delete_pause_ms() -> u64 {
    500
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            announce_channel_id: 0,
            voice_channel: default_voice_channel(),
            delete_pause_ms: default_delete_pause_ms(),
        }
    }
}
