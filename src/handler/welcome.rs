//! Welcome page module
//!
//! Serves the homepage (built-in HTML, optionally overridden by a file from
//! the routes configuration) and the favicon. When the homepage test event
//! is enabled, a `Test` event is published before the page is rendered.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use std::sync::Arc;
use tokio::fs;

use crate::config::AppState;
use crate::events::AppEvent;
use crate::http;
use crate::logger;

const FAVICON_PATH: &str = "static/favicon.svg";

/// Serve `GET /`
///
/// With `events.test_on_home` enabled, the test event is published first;
/// a dispatch failure aborts rendering and returns the 500 response.
pub async fn serve_welcome(state: &Arc<AppState>, is_head: bool) -> Response<Full<Bytes>> {
    if state.config.events.test_on_home {
        if let Err(e) = state.dispatcher.dispatch(AppEvent::Test) {
            logger::log_error(&format!("Failed to dispatch test event: {e}"));
            return http::build_500_response();
        }
    }

    let html = match &state.config.routes.welcome_file {
        Some(path) => load_welcome_file(path).await,
        None => default_welcome_page(),
    };

    http::build_html_response(html, is_head)
}

/// Serve favicon from disk, 404 when the asset is absent
pub async fn serve_favicon(is_head: bool) -> Response<Full<Bytes>> {
    match fs::read(FAVICON_PATH).await {
        Ok(data) => {
            let content_length = data.len();
            let body = if is_head { Bytes::new() } else { Bytes::from(data) };
            Response::builder()
                .status(200)
                .header("Content-Type", "image/svg+xml")
                .header("Content-Length", content_length)
                .header("Cache-Control", "public, max-age=86400")
                .body(Full::new(body))
                .unwrap_or_else(|e| {
                    logger::log_error(&format!("Failed to build favicon response: {e}"));
                    Response::new(Full::new(Bytes::new()))
                })
        }
        Err(_) => http::build_404_response(),
    }
}

/// Load the configured welcome file, falling back to the built-in page
async fn load_welcome_file(path: &str) -> String {
    match fs::read_to_string(path).await {
        Ok(content) => content,
        Err(e) => {
            logger::log_warning(&format!(
                "Welcome file '{path}' not readable ({e}), using built-in page"
            ));
            default_welcome_page()
        }
    }
}

fn default_welcome_page() -> String {
    String::from(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>Chat Relay</title>
    <link rel="icon" type="image/svg+xml" href="/favicon.svg">
    <style>
        * {
            margin: 0;
            padding: 0;
            box-sizing: border-box;
        }
        body {
            font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, "Helvetica Neue", Arial, sans-serif;
            line-height: 1.6;
            background: linear-gradient(135deg, #667eea 0%, #764ba2 100%);
            min-height: 100vh;
            display: flex;
            align-items: center;
            justify-content: center;
            color: white;
        }
        .container {
            text-align: center;
            padding: 40px;
            background: rgba(255, 255, 255, 0.1);
            border-radius: 20px;
            backdrop-filter: blur(10px);
            box-shadow: 0 8px 32px 0 rgba(31, 38, 135, 0.37);
            border: 1px solid rgba(255, 255, 255, 0.18);
            max-width: 600px;
        }
        h1 {
            font-size: 3em;
            margin-bottom: 20px;
            font-weight: 700;
        }
        p {
            font-size: 1.2em;
            margin: 15px 0;
            opacity: 0.9;
        }
        code {
            background: rgba(0, 0, 0, 0.25);
            border-radius: 6px;
            padding: 2px 8px;
            font-size: 0.95em;
        }
    </style>
</head>
<body>
    <div class="container">
        <h1>Chat Relay</h1>
        <p>The server is up and relaying events.</p>
        <p>Send a message with <code>POST /chat</code> and a <code>message</code> field.</p>
    </div>
</body>
</html>
"#,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::events::test_support::{FailingDispatcher, RecordingDispatcher};
    use http_body_util::BodyExt;

    fn state_with(
        test_on_home: bool,
        dispatcher: Arc<dyn crate::events::Dispatcher>,
    ) -> Arc<AppState> {
        let mut config = Config::load_from("nonexistent_config_file").unwrap();
        config.events.test_on_home = test_on_home;
        Arc::new(AppState::new(config, dispatcher))
    }

    #[tokio::test]
    async fn test_homepage_without_event() {
        let dispatcher = Arc::new(RecordingDispatcher::new());
        let state = state_with(false, dispatcher.clone());

        let resp = serve_welcome(&state, false).await;

        assert_eq!(resp.status(), 200);
        assert_eq!(
            resp.headers().get("Content-Type").unwrap(),
            "text/html; charset=utf-8"
        );
        assert!(dispatcher.events().is_empty());
    }

    #[tokio::test]
    async fn test_homepage_with_test_event() {
        let dispatcher = Arc::new(RecordingDispatcher::new());
        let state = state_with(true, dispatcher.clone());

        let resp = serve_welcome(&state, false).await;

        assert_eq!(resp.status(), 200);
        assert_eq!(dispatcher.events(), vec![AppEvent::Test]);

        let body = resp.into_body().collect().await.unwrap().to_bytes();
        assert!(std::str::from_utf8(&body).unwrap().contains("<html>"));
    }

    #[tokio::test]
    async fn test_homepage_event_published_once_per_request() {
        let dispatcher = Arc::new(RecordingDispatcher::new());
        let state = state_with(true, dispatcher.clone());

        serve_welcome(&state, false).await;
        serve_welcome(&state, false).await;

        assert_eq!(dispatcher.events(), vec![AppEvent::Test, AppEvent::Test]);
    }

    #[tokio::test]
    async fn test_homepage_dispatch_failure_returns_500() {
        let state = state_with(true, Arc::new(FailingDispatcher));

        let resp = serve_welcome(&state, false).await;

        assert_eq!(resp.status(), 500);
    }

    #[tokio::test]
    async fn test_head_request_has_empty_body() {
        let dispatcher = Arc::new(RecordingDispatcher::new());
        let state = state_with(true, dispatcher.clone());

        let resp = serve_welcome(&state, true).await;

        assert_eq!(resp.status(), 200);
        // HEAD still counts as a homepage hit for the test event
        assert_eq!(dispatcher.events(), vec![AppEvent::Test]);

        let body = resp.into_body().collect().await.unwrap().to_bytes();
        assert!(body.is_empty());
    }

    #[tokio::test]
    async fn test_missing_welcome_file_falls_back() {
        let dispatcher = Arc::new(RecordingDispatcher::new());
        let mut config = Config::load_from("nonexistent_config_file").unwrap();
        config.routes.welcome_file = Some("does/not/exist.html".to_string());
        let state = Arc::new(AppState::new(config, dispatcher));

        let resp = serve_welcome(&state, false).await;

        assert_eq!(resp.status(), 200);
        let body = resp.into_body().collect().await.unwrap().to_bytes();
        assert!(std::str::from_utf8(&body).unwrap().contains("Chat Relay"));
    }
}
