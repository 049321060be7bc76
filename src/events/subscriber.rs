// Event log subscriber
// Background task that writes every published event to the log

use super::{AppEvent, ChannelDispatcher};
use crate::logger;

/// Spawn the event log task.
///
/// Subscribes to the dispatcher and logs each event as it arrives. The task
/// ends when the dispatcher (and with it every sender) is dropped.
pub fn spawn_event_logger(dispatcher: &ChannelDispatcher) {
    let mut rx = dispatcher.subscribe();
    tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            match &event {
                AppEvent::ChatMessage(payload) => {
                    logger::log_event(event.name(), payload.as_deref());
                }
                AppEvent::Test => logger::log_event(event.name(), None),
            }
        }
    });
}
