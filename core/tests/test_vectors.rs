//! Verify the gateway against JSON test vectors stored in `test-vectors/`.
//!
//! Each case describes the call, the request the transport must receive, a
//! simulated response, and the expected outcome. The transport is scripted,
//! so the vectors pin down exactly what goes over the wire.

use std::cell::RefCell;
use std::fmt;

use kennel_gateway::{
    ApiRequestError, GatewayConfig, GatewayError, HttpMethod, HttpRequest, HttpResponse, Payload,
    RequestGateway, RequestOptions, Transport,
};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq)]
struct SocketClosed;

impl fmt::Display for SocketClosed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("socket closed before response")
    }
}

impl std::error::Error for SocketClosed {}

/// Replays one response and remembers what it was asked to send.
struct Replay {
    response: Option<HttpResponse>,
    sent: RefCell<Vec<HttpRequest>>,
}

impl Replay {
    fn new(response: Option<HttpResponse>) -> Self {
        Self {
            response,
            sent: RefCell::new(Vec::new()),
        }
    }
}

impl Transport for Replay {
    type Error = SocketClosed;

    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, SocketClosed> {
        self.sent.borrow_mut().push(request);
        self.response.clone().ok_or(SocketClosed)
    }
}

fn parse_method(s: &str) -> HttpMethod {
    match s {
        "GET" => HttpMethod::Get,
        "POST" => HttpMethod::Post,
        "PUT" => HttpMethod::Put,
        "PATCH" => HttpMethod::Patch,
        "DELETE" => HttpMethod::Delete,
        other => panic!("unknown method: {other}"),
    }
}

fn parse_headers(v: &Value) -> Vec<(String, String)> {
    v.as_array()
        .unwrap()
        .iter()
        .map(|h| {
            let arr = h.as_array().unwrap();
            (arr[0].as_str().unwrap().to_string(), arr[1].as_str().unwrap().to_string())
        })
        .collect()
}

#[test]
fn gateway_test_vectors() {
    let raw = include_str!("../../test-vectors/gateway.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();
    let base_url = vectors["base_url"].as_str().unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let endpoint = case["endpoint"].as_str().unwrap();

        let opts = &case["options"];
        let options = RequestOptions {
            method: parse_method(opts["method"].as_str().unwrap()),
            headers: parse_headers(&opts["headers"]),
            body: opts["body"].as_str().map(str::to_string),
        };

        let sim = &case["simulated_response"];
        let response = HttpResponse {
            status: sim["status"].as_u64().unwrap() as u16,
            headers: parse_headers(&sim["headers"]),
            body: sim["body"].as_str().unwrap().to_string(),
        };

        let gateway = RequestGateway::new(GatewayConfig::new(base_url), Replay::new(Some(response)));
        let result = gateway.request(endpoint, options);

        // Verify the single request that went out
        let sent = gateway.transport().sent.borrow();
        assert_eq!(sent.len(), 1, "{name}: request count");
        let expected_req = &case["expected_request"];
        assert_eq!(sent[0].method, parse_method(expected_req["method"].as_str().unwrap()), "{name}: method");
        assert_eq!(sent[0].url, expected_req["url"].as_str().unwrap(), "{name}: url");
        assert_eq!(sent[0].headers, parse_headers(&expected_req["headers"]), "{name}: headers");
        assert_eq!(
            sent[0].body.as_deref(),
            expected_req["body"].as_str(),
            "{name}: body"
        );

        // Verify the outcome
        if let Some(expected) = case.get("expected_error") {
            let err = result.unwrap_err();
            let expected = ApiRequestError {
                status: expected["status"].as_u64().unwrap() as u16,
                message: expected["message"].as_str().unwrap().to_string(),
            };
            assert_eq!(err.api_error(), Some(&expected), "{name}: error");
        } else if let Some(expected) = case.get("expected_json") {
            assert_eq!(result.unwrap(), Payload::Json(expected.clone()), "{name}: json payload");
        } else {
            let expected = case["expected_text"].as_str().unwrap();
            assert_eq!(result.unwrap(), Payload::Text(expected.to_string()), "{name}: text payload");
        }
    }
}

#[test]
fn unset_base_url_vector() {
    let config = GatewayConfig::from_lookup(|_| None);
    let gateway = RequestGateway::new(
        config,
        Replay::new(Some(HttpResponse {
            status: 200,
            headers: Vec::new(),
            body: String::new(),
        })),
    );
    gateway.request("/stud-dogs", RequestOptions::get()).unwrap();
    assert_eq!(gateway.transport().sent.borrow()[0].url, "/api/stud-dogs");
}

#[test]
fn transport_failure_vector() {
    let gateway = RequestGateway::new(GatewayConfig::default(), Replay::new(None));
    match gateway.request("/parents", RequestOptions::get()) {
        Err(GatewayError::Transport(e)) => assert_eq!(e, SocketClosed),
        other => panic!("expected transport failure, got {other:?}"),
    }
}
