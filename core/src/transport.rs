//! The I/O seam between the gateway and the network.
//!
//! # Design
//! `Transport` executes one `HttpRequest` and reports either a response or
//! its own error type. Any status code counts as a response. `UreqTransport`
//! is the stock implementation; tests plug in scripted transports.

use crate::http::{HttpMethod, HttpRequest, HttpResponse};

/// Executes a single HTTP round-trip.
pub trait Transport {
    type Error: std::error::Error + 'static;

    /// Send `request` and return the response, whatever its status.
    ///
    /// Returns `Err` only when no response was received (connection, DNS,
    /// timeout, malformed URL).
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, Self::Error>;
}

/// Blocking transport backed by a `ureq::Agent`.
///
/// Timeouts and connection reuse are whatever the agent is configured with.
#[derive(Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl std::fmt::Debug for UreqTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UreqTransport").finish_non_exhaustive()
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl UreqTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an existing agent. It must be built with
    /// `http_status_as_error(false)` or error statuses surface as transport
    /// failures.
    pub fn with_agent(agent: ureq::Agent) -> Self {
        Self { agent }
    }
}

impl Transport for UreqTransport {
    type Error = ureq::Error;

    fn execute(&self, req: HttpRequest) -> Result<HttpResponse, Self::Error> {
        let HttpRequest {
            method,
            url,
            headers,
            body,
        } = req;

        let mut response = match method {
            HttpMethod::Get | HttpMethod::Delete => {
                let mut builder = match method {
                    HttpMethod::Get => self.agent.get(&url),
                    _ => self.agent.delete(&url),
                };
                for (name, value) in &headers {
                    builder = builder.header(name.as_str(), value.as_str());
                }
                match body {
                    Some(body) => builder.force_send_body().send(body.as_bytes())?,
                    None => builder.call()?,
                }
            }
            HttpMethod::Post | HttpMethod::Put | HttpMethod::Patch => {
                let mut builder = match method {
                    HttpMethod::Post => self.agent.post(&url),
                    HttpMethod::Put => self.agent.put(&url),
                    _ => self.agent.patch(&url),
                };
                for (name, value) in &headers {
                    builder = builder.header(name.as_str(), value.as_str());
                }
                match body {
                    Some(body) => builder.send(body.as_bytes())?,
                    None => builder.send_empty()?,
                }
            }
        };

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        // A body that is not UTF-8 is still a response; let the gateway judge it.
        let bytes = response.body_mut().read_to_vec()?;
        let body = String::from_utf8_lossy(&bytes).into_owned();

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufRead, BufReader, Read, Write};
    use std::net::TcpListener;
    use std::thread::JoinHandle;

    /// What a single-shot server saw on the wire.
    struct Captured {
        request_line: String,
        body: Vec<u8>,
    }

    /// Accept one connection, record the request, answer with `status_line`
    /// and raw `body` bytes.
    fn serve_once(status_line: &'static str, body: &'static [u8]) -> (String, JoinHandle<Captured>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = std::thread::spawn(move || {
            let (stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream.try_clone().unwrap());

            let mut request_line = String::new();
            reader.read_line(&mut request_line).unwrap();

            let mut content_length = 0usize;
            loop {
                let mut line = String::new();
                reader.read_line(&mut line).unwrap();
                if line == "\r\n" || line.is_empty() {
                    break;
                }
                if let Some((name, value)) = line.split_once(':') {
                    if name.eq_ignore_ascii_case("content-length") {
                        content_length = value.trim().parse().unwrap();
                    }
                }
            }
            let mut request_body = vec![0u8; content_length];
            reader.read_exact(&mut request_body).unwrap();

            let mut stream = stream;
            let head = format!(
                "{status_line}\r\ncontent-length: {}\r\nconnection: close\r\n\r\n",
                body.len()
            );
            stream.write_all(head.as_bytes()).unwrap();
            stream.write_all(body).unwrap();
            stream.flush().unwrap();

            Captured {
                request_line: request_line.trim_end().to_string(),
                body: request_body,
            }
        });

        (format!("http://{addr}"), handle)
    }

    #[test]
    fn delete_with_body_sends_the_body() {
        let (base, server) = serve_once("HTTP/1.1 204 No Content", b"");
        let request = HttpRequest {
            method: HttpMethod::Delete,
            url: format!("{base}/users/1"),
            headers: vec![("Content-Type".to_string(), "application/json".to_string())],
            body: Some(r#"{"reason":"gdpr"}"#.to_string()),
        };

        let response = UreqTransport::new().execute(request).unwrap();
        assert_eq!(response.status, 204);

        let captured = server.join().unwrap();
        assert_eq!(captured.request_line, "DELETE /users/1 HTTP/1.1");
        assert_eq!(captured.body, br#"{"reason":"gdpr"}"#);
    }

    #[test]
    fn get_without_body_sends_nothing() {
        let (base, server) = serve_once("HTTP/1.1 200 OK", b"ok");
        let request = HttpRequest {
            method: HttpMethod::Get,
            url: format!("{base}/health"),
            headers: Vec::new(),
            body: None,
        };

        let response = UreqTransport::new().execute(request).unwrap();
        assert_eq!(response.body, "ok");

        let captured = server.join().unwrap();
        assert_eq!(captured.request_line, "GET /health HTTP/1.1");
        assert!(captured.body.is_empty());
    }

    #[test]
    fn non_utf8_body_is_still_a_response() {
        let (base, server) = serve_once("HTTP/1.1 500 Internal Server Error", &[0xff, 0xfe]);
        let request = HttpRequest {
            method: HttpMethod::Get,
            url: format!("{base}/litters"),
            headers: Vec::new(),
            body: None,
        };

        let response = UreqTransport::new().execute(request).unwrap();
        server.join().unwrap();
        assert_eq!(response.status, 500);
        assert_eq!(response.body, "\u{fffd}\u{fffd}");
    }

    #[test]
    fn non_utf8_error_body_normalizes_to_status_line() {
        use crate::{GatewayConfig, GatewayError, RequestGateway, RequestOptions};

        let (base, server) = serve_once("HTTP/1.1 500 Internal Server Error", &[0xff, 0xfe]);
        let gateway = RequestGateway::with_config(GatewayConfig::new(base));

        let err = gateway.request("/litters", RequestOptions::get()).unwrap_err();
        server.join().unwrap();
        match err {
            GatewayError::Api(e) => {
                assert_eq!(e.status, 500);
                assert_eq!(e.message, "HTTP 500: Internal Server Error");
            }
            other => panic!("expected api error, got {other:?}"),
        }
    }
}
