//! Request body parsing module
//!
//! Extracts the optional `message` field from chat request bodies. Both
//! JSON objects and form-urlencoded bodies are accepted; anything that does
//! not carry a string `message` yields `None` rather than an error.

/// Pull the `message` field out of a request body.
///
/// A `Content-Type` of `application/x-www-form-urlencoded` selects form
/// parsing; everything else (including a missing header) is treated as JSON.
pub fn extract_message(content_type: Option<&str>, body: &[u8]) -> Option<String> {
    let media_type = content_type
        .unwrap_or("")
        .split(';')
        .next()
        .unwrap_or("")
        .trim();

    if media_type.eq_ignore_ascii_case("application/x-www-form-urlencoded") {
        extract_from_form(body)
    } else {
        extract_from_json(body)
    }
}

fn extract_from_json(body: &[u8]) -> Option<String> {
    let value: serde_json::Value = serde_json::from_slice(body).ok()?;
    value
        .get("message")
        .and_then(serde_json::Value::as_str)
        .map(String::from)
}

fn extract_from_form(body: &[u8]) -> Option<String> {
    form_urlencoded::parse(body)
        .find(|(key, _)| key == "message")
        .map(|(_, value)| value.into_owned())
}
