//! Event Publisher Implementation
//!
//! 工作室事件的广播推送，订阅方自行决定如何呈现

use std::sync::Arc;

use tokio::sync::broadcast;

use crate::application::ports::{NotifierPort, StudioEvent};

/// 默认广播通道容量
const DEFAULT_CAPACITY: usize = 100;

/// 事件发布器
pub struct EventPublisher {
    channel: broadcast::Sender<StudioEvent>,
}

impl EventPublisher {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self { channel: tx }
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// 订阅工作室事件
    pub fn subscribe(&self) -> broadcast::Receiver<StudioEvent> {
        self.channel.subscribe()
    }

    pub fn receiver_count(&self) -> usize {
        self.channel.receiver_count()
    }
}

impl Default for EventPublisher {
    fn default() -> Self {
        Self::new()
    }
}

impl NotifierPort for EventPublisher {
    fn notify(&self, event: StudioEvent) {
        if let StudioEvent::SlotFailed { slot, kind, message } = &event {
            tracing::debug!(
                slot = %slot,
                kind = ?kind,
                message = %message,
                "Publishing failure notice"
            );
        }
        if let Err(e) = self.channel.send(event) {
            tracing::debug!(error = %e, "Failed to publish studio event (no receivers)");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::slots::SlotKey;
    use crate::domain::Stage;

    #[tokio::test]
    async fn test_subscribers_receive_events() {
        let publisher = EventPublisher::new();
        let mut rx = publisher.subscribe();

        publisher.notify(StudioEvent::StageChanged {
            from: Stage::Brief,
            to: Stage::Outline,
        });
        publisher.notify(StudioEvent::SlotStarted { slot: SlotKey::Cover });

        assert_eq!(
            rx.recv().await.unwrap(),
            StudioEvent::StageChanged {
                from: Stage::Brief,
                to: Stage::Outline
            }
        );
        assert_eq!(
            rx.recv().await.unwrap(),
            StudioEvent::SlotStarted { slot: SlotKey::Cover }
        );
    }

    #[test]
    fn test_notify_without_receivers_is_ignored() {
        let publisher = EventPublisher::default();
        assert_eq!(publisher.receiver_count(), 0);
        publisher.notify(StudioEvent::DraftReset);
    }

    #[test]
    fn test_event_wire_format() {
        let json = serde_json::to_value(StudioEvent::Published {
            title: "Nachtzug".to_string(),
            slug: "nachtzug".to_string(),
        })
        .unwrap();
        assert_eq!(json["event"], "Published");
        assert_eq!(json["data"]["slug"], "nachtzug");
    }
}
