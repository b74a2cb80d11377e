use async_trait::async_trait;
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;

use crate::domain::user::errors::EventPublisherError;
use crate::domain::user::events::UserRegisteredEvent;
use crate::domain::user::ports::EventPublisher;
use crate::outbound::events::messages::UserEventMessage;

/// In-process event bus for user events.
///
/// Fan-out to every subscriber; a slow subscriber loses the oldest events
/// once `capacity` messages are queued for it.
pub struct BroadcastEventPublisher {
    sender: broadcast::Sender<UserEventMessage>,
}

impl BroadcastEventPublisher {
    pub fn new(capacity: usize) -> Self {
        tracing::info!(capacity, "Initializing in-process user event bus");
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Register a new subscriber; it sees events published from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<UserEventMessage> {
        self.sender.subscribe()
    }

    fn publish(&self, message: UserEventMessage) -> Result<(), EventPublisherError> {
        let user_id = message.user_id().to_string();
        let event_type = message.event_type();

        self.sender
            .send(message)
            .map(|receivers| {
                tracing::debug!(event_type, user_id = %user_id, receivers, "Event published");
            })
            .map_err(|_| EventPublisherError::NoSubscribers)
    }
}

#[async_trait]
impl EventPublisher for BroadcastEventPublisher {
    async fn publish_user_registered(
        &self,
        event: &UserRegisteredEvent,
    ) -> Result<(), EventPublisherError> {
        self.publish(UserEventMessage::from(event))
    }
}

/// Spawn a subscriber that writes every user event to the log.
pub fn spawn_event_logger(mut receiver: broadcast::Receiver<UserEventMessage>) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            match receiver.recv().await {
                Ok(message) => {
                    let payload = serde_json::to_string(&message).unwrap_or_default();
                    tracing::info!(
                        event_type = message.event_type(),
                        user_id = %message.user_id(),
                        payload = %payload,
                        "User event"
                    );
                }
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Event logger lagged behind, events dropped");
                }
                Err(RecvError::Closed) => {
                    tracing::info!("User event bus closed");
                    break;
                }
            }
        }
    })
}
