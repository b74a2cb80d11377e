pub mod broadcast;
pub mod messages;

pub use broadcast::spawn_event_logger;
pub use broadcast::BroadcastEventPublisher;
