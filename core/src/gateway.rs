//! The request gateway: one HTTP call, one normalized outcome.
//!
//! # Design
//! `RequestGateway` holds a `GatewayConfig` and a `Transport` and nothing
//! else. A call is split into `build_request` and `parse_response`, both
//! pure, with the transport round-trip in between. There are no retries and
//! no caching; overlapping calls share nothing but the immutable config.

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, error, warn};

use crate::config::GatewayConfig;
use crate::error::{ApiRequestError, GatewayError, ResponseError};
use crate::http::{merge_headers, HttpMethod, HttpRequest, HttpResponse};
use crate::transport::{Transport, UreqTransport};

/// Successful response body, shaped by the declared content type.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Json(serde_json::Value),
    Text(String),
}

impl Payload {
    pub fn as_json(&self) -> Option<&serde_json::Value> {
        match self {
            Payload::Json(v) => Some(v),
            Payload::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Payload::Text(s) => Some(s),
            Payload::Json(_) => None,
        }
    }
}

/// Per-call request settings. Everything is optional; the default is a GET
/// with no extra headers and no body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestOptions {
    pub method: HttpMethod,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl RequestOptions {
    pub fn new(method: HttpMethod) -> Self {
        Self {
            method,
            ..Self::default()
        }
    }

    pub fn get() -> Self {
        Self::new(HttpMethod::Get)
    }

    pub fn post() -> Self {
        Self::new(HttpMethod::Post)
    }

    pub fn put() -> Self {
        Self::new(HttpMethod::Put)
    }

    pub fn delete() -> Self {
        Self::new(HttpMethod::Delete)
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Serialize `value` as the JSON request body.
    pub fn json<B: Serialize + ?Sized>(mut self, value: &B) -> Result<Self, serde_json::Error> {
        self.body = Some(serde_json::to_string(value)?);
        Ok(self)
    }
}

/// How an error response body was interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorBody {
    /// JSON object with a non-empty `message` string.
    Message(String),
    /// JSON object with a non-empty `error` string and no usable `message`.
    Error(String),
    /// Valid JSON that carries neither field.
    Unrecognized,
    /// Not JSON at all. The status line is used instead.
    Unparseable,
}

impl ErrorBody {
    pub fn classify(body: &str) -> Self {
        let Ok(value) = serde_json::from_str::<serde_json::Value>(body) else {
            return ErrorBody::Unparseable;
        };
        let field = |key: &str| {
            value
                .get(key)
                .and_then(|v| v.as_str())
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };
        if let Some(message) = field("message") {
            ErrorBody::Message(message)
        } else if let Some(error) = field("error") {
            ErrorBody::Error(error)
        } else {
            ErrorBody::Unrecognized
        }
    }
}

/// Turn a non-success response into its normalized error.
pub fn normalize_error(response: &HttpResponse) -> ApiRequestError {
    let message = match ErrorBody::classify(&response.body) {
        ErrorBody::Message(m) | ErrorBody::Error(m) => m,
        ErrorBody::Unrecognized | ErrorBody::Unparseable => response.status_line(),
    };
    ApiRequestError {
        status: response.status,
        message,
    }
}

#[derive(Debug, Clone)]
pub struct RequestGateway<T = UreqTransport> {
    config: GatewayConfig,
    transport: T,
}

impl RequestGateway<UreqTransport> {
    /// Gateway over a default `UreqTransport`.
    pub fn with_config(config: GatewayConfig) -> Self {
        Self::new(config, UreqTransport::default())
    }
}

impl<T: Transport> RequestGateway<T> {
    pub fn new(config: GatewayConfig, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Issue one request and interpret the response.
    pub fn request(
        &self,
        endpoint: &str,
        options: RequestOptions,
    ) -> Result<Payload, GatewayError<T::Error>> {
        let request = self.build_request(endpoint, &options);
        debug!(method = %request.method, url = %request.url, "sending api request");

        let response = self.transport.execute(request).map_err(|e| {
            error!(endpoint, error = %e, "api request failed in transport");
            GatewayError::Transport(e)
        })?;

        Ok(self.parse_response(endpoint, response)?)
    }

    /// Like `request`, then deserialize the payload into `R`.
    ///
    /// A text payload is offered to `R` as a JSON string.
    pub fn request_json<R: DeserializeOwned>(
        &self,
        endpoint: &str,
        options: RequestOptions,
    ) -> Result<R, GatewayError<T::Error>> {
        let value = match self.request(endpoint, options)? {
            Payload::Json(value) => value,
            Payload::Text(text) => serde_json::Value::String(text),
        };
        serde_json::from_value(value).map_err(|e| {
            warn!(endpoint, error = %e, "api response did not match expected type");
            GatewayError::Payload(e)
        })
    }

    /// Serialize `body` and send it with `method`.
    pub fn send_json<B: Serialize + ?Sized, R: DeserializeOwned>(
        &self,
        method: HttpMethod,
        endpoint: &str,
        body: &B,
    ) -> Result<R, GatewayError<T::Error>> {
        let options = RequestOptions::new(method)
            .json(body)
            .map_err(GatewayError::Encode)?;
        self.request_json(endpoint, options)
    }

    /// The exact request `request` would send. URL is `base_url + endpoint`
    /// with no normalization.
    pub fn build_request(&self, endpoint: &str, options: &RequestOptions) -> HttpRequest {
        HttpRequest {
            method: options.method,
            url: format!("{}{}", self.config.base_url, endpoint),
            headers: merge_headers(self.config.default_headers(), &options.headers),
            body: options.body.clone(),
        }
    }

    /// Interpret a response the way `request` does.
    pub fn parse_response(
        &self,
        endpoint: &str,
        response: HttpResponse,
    ) -> Result<Payload, ResponseError> {
        if !response.is_success() {
            let err = normalize_error(&response);
            warn!(endpoint, status = err.status, message = %err.message, "api request rejected");
            return Err(err.into());
        }

        if response.status == 204 {
            return Ok(Payload::Text(String::new()));
        }

        if response.declares_json() {
            return serde_json::from_str(&response.body)
                .map(Payload::Json)
                .map_err(|e| {
                    warn!(endpoint, error = %e, "api response declared json but failed to parse");
                    ResponseError::Decode(e)
                });
        }

        Ok(Payload::Text(response.body))
    }
}
