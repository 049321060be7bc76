// Event dispatcher module
// Channel-based fan-out with an injectable trait seam for handlers

use std::fmt;
use std::sync::Mutex;

use tokio::sync::mpsc;

use super::AppEvent;

/// Error returned when an event could not be handed to every subscriber.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
    /// A subscriber channel was closed before the event could be queued.
    ChannelClosed,
}

impl fmt::Display for DispatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ChannelClosed => write!(f, "subscriber channel closed"),
        }
    }
}

impl std::error::Error for DispatchError {}

/// Publish seam used by route handlers.
///
/// Implementations must not block on listener processing: `dispatch` returns
/// as soon as the event is queued. Zero subscribers is a successful dispatch.
pub trait Dispatcher: Send + Sync {
    fn dispatch(&self, event: AppEvent) -> Result<(), DispatchError>;
}

/// Default dispatcher: clones each event into an unbounded channel per
/// subscriber. Delivery order across subscribers is unspecified.
pub struct ChannelDispatcher {
    subscribers: Mutex<Vec<mpsc::UnboundedSender<AppEvent>>>,
}

impl ChannelDispatcher {
    pub fn new() -> Self {
        Self {
            subscribers: Mutex::new(Vec::new()),
        }
    }

    /// Register a new subscriber and return its receiving end.
    pub fn subscribe(&self) -> mpsc::UnboundedReceiver<AppEvent> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.subscribers.lock().unwrap().push(tx);
        rx
    }

    /// Number of registered subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.lock().unwrap().len()
    }
}

impl Default for ChannelDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Dispatcher for ChannelDispatcher {
    fn dispatch(&self, event: AppEvent) -> Result<(), DispatchError> {
        let subscribers = self.subscribers.lock().unwrap();
        for tx in subscribers.iter() {
            // A closed receiver means the subscriber task died; surface it
            // instead of silently dropping the event.
            if tx.send(event.clone()).is_err() {
                return Err(DispatchError::ChannelClosed);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispatch_without_subscribers_succeeds() {
        let dispatcher = ChannelDispatcher::new();
        assert_eq!(dispatcher.subscriber_count(), 0);
        assert!(dispatcher.dispatch(AppEvent::Test).is_ok());
    }

    #[test]
    fn test_dispatch_fans_out_to_all_subscribers() {
        let dispatcher = ChannelDispatcher::new();
        let mut rx1 = dispatcher.subscribe();
        let mut rx2 = dispatcher.subscribe();

        let event = AppEvent::ChatMessage(Some("hello".to_string()));
        dispatcher.dispatch(event.clone()).unwrap();

        assert_eq!(rx1.try_recv().unwrap(), event);
        assert_eq!(rx2.try_recv().unwrap(), event);
    }

    #[test]
    fn test_dispatch_does_not_wait_for_consumption() {
        let dispatcher = ChannelDispatcher::new();
        let mut rx = dispatcher.subscribe();

        // Two dispatches complete before anything is consumed.
        dispatcher.dispatch(AppEvent::Test).unwrap();
        dispatcher
            .dispatch(AppEvent::ChatMessage(None))
            .unwrap();

        assert_eq!(rx.try_recv().unwrap(), AppEvent::Test);
        assert_eq!(rx.try_recv().unwrap(), AppEvent::ChatMessage(None));
    }

    #[test]
    fn test_dispatch_after_subscriber_dropped_fails() {
        let dispatcher = ChannelDispatcher::new();
        let rx = dispatcher.subscribe();
        drop(rx);

        assert_eq!(
            dispatcher.dispatch(AppEvent::Test),
            Err(DispatchError::ChannelClosed)
        );
    }

    #[test]
    fn test_event_names() {
        assert_eq!(AppEvent::Test.name(), "test");
        assert_eq!(AppEvent::ChatMessage(None).name(), "chat_message");
        assert_eq!(
            AppEvent::ChatMessage(Some("hi".to_string())).name(),
            "chat_message"
        );
    }
}
