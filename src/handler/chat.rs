//! Chat endpoint module
//!
//! `POST /chat` publishes a `ChatMessage` event carrying the request's
//! optional `message` field and acknowledges with a fixed JSON body. A
//! missing or non-string field is accepted; the event then carries no
//! payload. A dispatch failure surfaces as the server's 500 response.

use http_body_util::{BodyExt, Full};
use hyper::body::Bytes;
use hyper::{Request, Response, StatusCode};
use std::sync::Arc;

use crate::config::AppState;
use crate::events::AppEvent;
use crate::http;
use crate::logger;

/// Handle `POST /chat`: collect the body, then publish and acknowledge
pub async fn handle_chat(
    req: Request<hyper::body::Incoming>,
    state: &Arc<AppState>,
) -> Response<Full<Bytes>> {
    let content_type = req
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string);

    let body = match req.collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(e) => {
            logger::log_warning(&format!("Failed to read chat request body: {e}"));
            return http::build_400_response("Failed to read request body");
        }
    };

    process_chat(content_type.as_deref(), &body, state)
}

/// Publish the chat event and build the acknowledgment.
///
/// The event is dispatched before the response is built; on failure no
/// acknowledgment is produced.
pub fn process_chat(
    content_type: Option<&str>,
    body: &[u8],
    state: &AppState,
) -> Response<Full<Bytes>> {
    let message = http::body::extract_message(content_type, body);

    match state.dispatcher.dispatch(AppEvent::ChatMessage(message)) {
        Ok(()) => http::json_response(
            StatusCode::OK,
            &serde_json::json!({ "message": "Event has been sent!" }),
        ),
        Err(e) => {
            logger::log_error(&format!("Failed to dispatch chat event: {e}"));
            http::build_500_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::events::test_support::{FailingDispatcher, RecordingDispatcher};

    fn state_with(dispatcher: Arc<dyn crate::events::Dispatcher>) -> AppState {
        let config = Config::load_from("nonexistent_config_file").unwrap();
        AppState::new(config, dispatcher)
    }

    async fn body_bytes(response: Response<Full<Bytes>>) -> Bytes {
        response.into_body().collect().await.unwrap().to_bytes()
    }

    #[tokio::test]
    async fn test_chat_with_json_message() {
        let dispatcher = Arc::new(RecordingDispatcher::new());
        let state = state_with(dispatcher.clone());

        let resp = process_chat(Some("application/json"), br#"{"message":"hello"}"#, &state);

        assert_eq!(resp.status(), 200);
        assert_eq!(
            dispatcher.events(),
            vec![AppEvent::ChatMessage(Some("hello".to_string()))]
        );
        assert_eq!(
            &body_bytes(resp).await[..],
            br#"{"message":"Event has been sent!"}"#
        );
    }

    #[tokio::test]
    async fn test_chat_with_form_message() {
        let dispatcher = Arc::new(RecordingDispatcher::new());
        let state = state_with(dispatcher.clone());

        let resp = process_chat(
            Some("application/x-www-form-urlencoded"),
            b"message=hello",
            &state,
        );

        assert_eq!(resp.status(), 200);
        assert_eq!(
            dispatcher.events(),
            vec![AppEvent::ChatMessage(Some("hello".to_string()))]
        );
    }

    #[tokio::test]
    async fn test_chat_without_message_still_publishes() {
        let dispatcher = Arc::new(RecordingDispatcher::new());
        let state = state_with(dispatcher.clone());

        let resp = process_chat(Some("application/json"), b"{}", &state);

        assert_eq!(resp.status(), 200);
        assert_eq!(dispatcher.events(), vec![AppEvent::ChatMessage(None)]);
        assert_eq!(
            &body_bytes(resp).await[..],
            br#"{"message":"Event has been sent!"}"#
        );
    }

    #[tokio::test]
    async fn test_chat_with_empty_body_publishes_without_payload() {
        let dispatcher = Arc::new(RecordingDispatcher::new());
        let state = state_with(dispatcher.clone());

        let resp = process_chat(None, b"", &state);

        assert_eq!(resp.status(), 200);
        assert_eq!(dispatcher.events(), vec![AppEvent::ChatMessage(None)]);
    }

    #[tokio::test]
    async fn test_chat_dispatch_failure_returns_500() {
        let state = state_with(Arc::new(FailingDispatcher));

        let resp = process_chat(Some("application/json"), br#"{"message":"hi"}"#, &state);

        assert_eq!(resp.status(), 500);
        let body = body_bytes(resp).await;
        let body = std::str::from_utf8(&body).unwrap();
        // No acknowledgment is produced when dispatch failed
        assert!(!body.contains("Event has been sent!"));
        assert!(body.contains("error"));
    }
}
