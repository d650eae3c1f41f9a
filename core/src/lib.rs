//! Request gateway for the breeder storefront API.
//!
//! # Overview
//! `RequestGateway` issues one HTTP request per call against a configured
//! base URL, merges default headers with the caller's, and turns the
//! response into either a `Payload` or a normalized `ApiRequestError`.
//! Transport failures come back untouched.
//!
//! # Design
//! - Configuration is an explicit `GatewayConfig` value; nothing is read
//!   from the environment at call time.
//! - `build_request` and `parse_response` are pure; the `Transport` trait is
//!   the only I/O boundary, with `UreqTransport` as the default.
//! - `KennelApi` layers typed puppy and litter operations on top.
//! - The library emits `tracing` events and never installs a subscriber.

pub mod client;
pub mod config;
pub mod error;
pub mod gateway;
pub mod http;
pub mod transport;
pub mod types;

pub use client::KennelApi;
pub use config::{GatewayConfig, DEFAULT_BASE_URL};
pub use error::{ApiRequestError, GatewayError, ResponseError};
pub use gateway::{normalize_error, ErrorBody, Payload, RequestGateway, RequestOptions};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use transport::{Transport, UreqTransport};
pub use types::{Litter, LitterStatus, LitterUpdate, NewLitter, NewPuppy, Puppy, PuppyStatus, PuppyUpdate};
