use std::{
    collections::HashMap,
    sync::{
        Mutex,
        atomic::{AtomicBool, AtomicU64, Ordering},
    },
};

use async_trait::async_trait;

use crate::{
    common::{
        errors::GatewayError,
        types::{ChannelId, MessageId},
    },
    gateway::{Gateway, MessageHandle, Participant},
};

/// In-memory gateway for exercising the core without a platform connection.
#[derive(Default)]
pub(crate) struct MockGateway {
    next_id: AtomicU64,
    pub sent: Mutex<Vec<(ChannelId, String)>>,
    pub edits: Mutex<Vec<(MessageHandle, String)>>,
    pub deleted: Mutex<Vec<MessageHandle>>,
    /// Voice channels by name; a missing name means `ChannelNotFound`.
    pub voice_channels: Mutex<HashMap<String, Vec<Participant>>>,
    /// Backlog returned by `channel_messages`.
    pub backlog: Mutex<Vec<MessageHandle>>,
    pub fail_sends: AtomicBool,
    pub fail_edits: AtomicBool,
    /// Deletions start failing once this many have succeeded.
    pub fail_delete_after: Mutex<Option<usize>>,
}

impl MockGateway {
    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }

    pub fn edit_count(&self) -> usize {
        self.edits.lock().unwrap().len()
    }

    pub fn last_edit(&self) -> Option<String> {
        self.edits.lock().unwrap().last().map(|(_, text)| text.clone())
    }

    pub fn add_voice_channel(&self, name: &str, members: Vec<Participant>) {
        self.voice_channels
            .lock()
            .unwrap()
            .insert(name.to_string(), members);
    }
}

#[async_trait]
impl Gateway for MockGateway {
    async fn send_message(
        &self,
        channel: ChannelId,
        text: &str,
    ) -> Result<MessageHandle, GatewayError> {
        if self.fail_sends.load(Ordering::Relaxed) {
            return Err(GatewayError::ChannelNotFound);
        }
        let handle = MessageHandle {
            channel,
            message: MessageId(self.next_id.fetch_add(1, Ordering::Relaxed)),
        };
        self.sent.lock().unwrap().push((channel, text.to_string()));
        Ok(handle)
    }

    async fn edit_message(&self, handle: &MessageHandle, text: &str) -> Result<(), GatewayError> {
        if self.fail_edits.load(Ordering::Relaxed) {
            return Err(GatewayError::MessageGone);
        }
        self.edits
            .lock()
            .unwrap()
            .push((handle.clone(), text.to_string()));
        Ok(())
    }

    async fn delete_message(&self, handle: &MessageHandle) -> Result<(), GatewayError> {
        if let Some(limit) = *self.fail_delete_after.lock().unwrap() {
            if self.deleted.lock().unwrap().len() >= limit {
                return Err(GatewayError::PermissionDenied);
            }
        }
        self.deleted.lock().unwrap().push(handle.clone());
        Ok(())
    }

    async fn voice_members(&self, channel_name: &str) -> Result<Vec<Participant>, GatewayError> {
        self.voice_channels
            .lock()
            .unwrap()
            .get(channel_name)
            .cloned()
            .ok_or(GatewayError::ChannelNotFound)
    }

    async fn channel_messages(
        &self,
        _channel: ChannelId,
    ) -> Result<Vec<MessageHandle>, GatewayError> {
        Ok(self.backlog.lock().unwrap().clone())
    }
}
