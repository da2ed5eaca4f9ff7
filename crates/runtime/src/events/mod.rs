//! Real-time battle event publishing.
//!
//! The publisher is an injected dependency constructed once at service start,
//! never a process-wide singleton. Publishing is fire-and-forget with
//! at-most-once delivery; the battle controller never depends on a publish
//! succeeding, and spectators who miss an event simply refetch on the next
//! one.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use battle_core::BattleId;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Channel name carrying one battle's update stream.
pub fn battle_channel(id: BattleId) -> String {
    format!("battle-{}", id.0)
}

/// Lightweight version-bump notification sent to spectators so they can
/// refetch promptly. Carries no battle state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleUpdateEvent {
    pub battle_id: u64,
    pub version: u64,
    pub round: u32,
}

/// Fire-and-forget channel publisher.
#[async_trait]
pub trait ChannelPublisher: Send + Sync {
    /// Publishes a payload to a channel. Must not fail the caller: delivery
    /// problems are logged and swallowed.
    async fn publish(&self, channel: &str, payload: serde_json::Value);
}

/// In-process publisher over tokio broadcast channels.
///
/// Channels are created lazily on first publish or subscribe. Subscribers
/// joining later miss earlier events, matching the at-most-once contract.
pub struct BroadcastPublisher {
    capacity: usize,
    channels: RwLock<HashMap<String, broadcast::Sender<serde_json::Value>>>,
}

impl BroadcastPublisher {
    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            channels: RwLock::new(HashMap::new()),
        }
    }

    /// Subscribes to a channel, creating it if needed.
    pub fn subscribe(&self, channel: &str) -> broadcast::Receiver<serde_json::Value> {
        let mut channels = match self.channels.write() {
            Ok(channels) => channels,
            Err(poisoned) => poisoned.into_inner(),
        };
        channels
            .entry(channel.to_string())
            .or_insert_with(|| broadcast::channel(self.capacity).0)
            .subscribe()
    }
}

impl Default for BroadcastPublisher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChannelPublisher for BroadcastPublisher {
    async fn publish(&self, channel: &str, payload: serde_json::Value) {
        let mut channels = match self.channels.write() {
            Ok(channels) => channels,
            Err(poisoned) => poisoned.into_inner(),
        };
        let sender = channels
            .entry(channel.to_string())
            .or_insert_with(|| broadcast::channel(self.capacity).0);
        if sender.send(payload).is_err() {
            // Nobody listening on this channel; normal, not an error.
            tracing::trace!(channel, "no subscribers for battle event");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn subscribers_receive_published_events() {
        let publisher = BroadcastPublisher::new();
        let channel = battle_channel(BattleId(7));
        let mut rx = publisher.subscribe(&channel);

        let event = BattleUpdateEvent {
            battle_id: 7,
            version: 3,
            round: 2,
        };
        publisher
            .publish(&channel, serde_json::to_value(&event).unwrap())
            .await;

        let received = rx.recv().await.unwrap();
        let decoded: BattleUpdateEvent = serde_json::from_value(received).unwrap();
        assert_eq!(decoded, event);
    }

    #[tokio::test]
    async fn publish_without_subscribers_is_silent() {
        let publisher = BroadcastPublisher::new();
        publisher
            .publish("battle-99", serde_json::json!({"version": 1}))
            .await;
    }
}
