//! Application event module
//!
//! Route handlers publish events through an explicitly injected
//! [`Dispatcher`] rather than a global facility, so the request path can be
//! tested against a substitute implementation.

mod dispatcher;
mod subscriber;

pub use dispatcher::{ChannelDispatcher, DispatchError, Dispatcher};
pub use subscriber::spawn_event_logger;

/// Events published by route handlers.
///
/// Fire-and-forget: publication completes before the response is built, but
/// listener processing is never awaited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// A chat message submitted via the chat endpoint. The payload is absent
    /// when the request carried no usable `message` field.
    ChatMessage(Option<String>),
    /// Parameterless ping emitted when the homepage is served (optional,
    /// config-controlled).
    Test,
}

impl AppEvent {
    /// Stable name used in logs.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::ChatMessage(_) => "chat_message",
            Self::Test => "test",
        }
    }
}

#[cfg(test)]
pub mod test_support {
    //! Substitute dispatchers for handler tests.

    use std::sync::Mutex;

    use super::{AppEvent, DispatchError, Dispatcher};

    /// Records every dispatched event for later assertions.
    pub struct RecordingDispatcher {
        events: Mutex<Vec<AppEvent>>,
    }

    impl RecordingDispatcher {
        pub fn new() -> Self {
            Self {
                events: Mutex::new(Vec::new()),
            }
        }

        pub fn events(&self) -> Vec<AppEvent> {
            self.events.lock().unwrap().clone()
        }
    }

    impl Dispatcher for RecordingDispatcher {
        fn dispatch(&self, event: AppEvent) -> Result<(), DispatchError> {
            self.events.lock().unwrap().push(event);
            Ok(())
        }
    }

    /// Fails every dispatch.
    pub struct FailingDispatcher;

    impl Dispatcher for FailingDispatcher {
        fn dispatch(&self, _event: AppEvent) -> Result<(), DispatchError> {
            Err(DispatchError::ChannelClosed)
        }
    }
}
