//! HTTP data types exchanged between the gateway and its transport.
//!
//! # Design
//! Requests and responses are plain data. The gateway builds an
//! `HttpRequest`, hands it to a `Transport`, and interprets the
//! `HttpResponse` it gets back. Nothing in here touches the network.
//!
//! Fields use owned types (`String`, `Vec`) so values can be recorded,
//! replayed from test vectors, or moved across threads freely.

use std::fmt;

/// Default header sent with every request before caller headers are applied.
pub const DEFAULT_CONTENT_TYPE: (&str, &str) = ("Content-Type", "application/json");

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HttpMethod {
    #[default]
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An HTTP request described as plain data.
///
/// `url` is the final, fully concatenated target. Header order is preserved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    /// First header value whose name matches `name`, ignoring ASCII case.
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }
}

/// An HTTP response described as plain data.
///
/// Non-success statuses are ordinary responses here; the transport must not
/// turn them into errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }

    pub fn is_success(&self) -> bool {
        (200..=299).contains(&self.status)
    }

    /// Whether the declared `Content-Type` names JSON.
    ///
    /// Accepts `application/json` and any `+json` structured suffix, ignoring
    /// parameters such as `charset` and letter case.
    pub fn declares_json(&self) -> bool {
        let Some(value) = self.header("content-type") else {
            return false;
        };
        let essence = value.split(';').next().unwrap_or_default().trim().to_ascii_lowercase();
        essence == "application/json" || essence.ends_with("+json")
    }

    /// Status line text, e.g. `HTTP 404: Not Found`.
    pub fn status_line(&self) -> String {
        format!("HTTP {}: {}", self.status, reason_phrase(self.status))
    }
}

fn find_header<'a>(headers: &'a [(String, String)], name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(name))
        .map(|(_, v)| v.as_str())
}

/// Merge `overrides` onto `base`. A later header replaces every earlier one
/// with the same name, compared case-insensitively.
pub fn merge_headers(
    base: Vec<(String, String)>,
    overrides: &[(String, String)],
) -> Vec<(String, String)> {
    let mut merged = base;
    for (name, value) in overrides {
        merged.retain(|(k, _)| !k.eq_ignore_ascii_case(name));
        merged.push((name.clone(), value.clone()));
    }
    merged
}

/// Canonical reason phrase for a status code.
pub fn reason_phrase(status: u16) -> &'static str {
    ureq::http::StatusCode::from_u16(status)
        .ok()
        .and_then(|s| s.canonical_reason())
        .unwrap_or("Unknown Status")
}
