//! Error types for the request gateway.
//!
//! # Design
//! A transport failure is returned exactly as the transport produced it,
//! inside `GatewayError::Transport`, so callers can match on their own
//! transport's error type. Every response that arrived with a non-success
//! status becomes an `ApiRequestError` carrying one normalized message.

use thiserror::Error;

/// The server answered, but with a non-success status.
///
/// `message` comes from the error body's `message` or `error` field when
/// present, otherwise from the status line (`HTTP 500: Internal Server Error`).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ApiRequestError {
    pub status: u16,
    pub message: String,
}

/// Failures the gateway can produce when interpreting a response.
#[derive(Debug, Error)]
pub enum ResponseError {
    #[error(transparent)]
    Api(#[from] ApiRequestError),

    /// Success status with a JSON content type, but the body is not JSON.
    #[error("response declared JSON but the body could not be parsed: {0}")]
    Decode(#[source] serde_json::Error),
}

/// Errors returned by `RequestGateway` calls.
///
/// `E` is the transport's error type.
#[derive(Debug, Error)]
pub enum GatewayError<E: std::error::Error + 'static> {
    /// The request never produced a response.
    #[error(transparent)]
    Transport(E),

    #[error(transparent)]
    Api(ApiRequestError),

    #[error("response declared JSON but the body could not be parsed: {0}")]
    Decode(#[source] serde_json::Error),

    /// The request body could not be serialized to JSON.
    #[error("failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),

    /// The success payload did not match the type the caller asked for.
    #[error("response payload did not match the expected shape: {0}")]
    Payload(#[source] serde_json::Error),
}

impl<E: std::error::Error + 'static> From<ResponseError> for GatewayError<E> {
    fn from(err: ResponseError) -> Self {
        match err {
            ResponseError::Api(e) => GatewayError::Api(e),
            ResponseError::Decode(e) => GatewayError::Decode(e),
        }
    }
}

impl<E: std::error::Error + 'static> GatewayError<E> {
    /// The normalized API error, if the server answered with a failure status.
    pub fn api_error(&self) -> Option<&ApiRequestError> {
        match self {
            GatewayError::Api(e) => Some(e),
            _ => None,
        }
    }

    /// HTTP status of the failed response, if any.
    pub fn status(&self) -> Option<u16> {
        self.api_error().map(|e| e.status)
    }
}
