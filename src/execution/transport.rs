//! HTTP transport capability.
//!
//! The executor is transport-agnostic: it prepares a [`WireRequest`] and
//! hands it to an injected [`HttpTransport`], which performs the exchange
//! and reports the raw status line, headers, and body bytes. Connection
//! pooling, TLS, and socket-level retries all live behind this trait.

use async_trait::async_trait;
use url::Url;

use crate::types::request::Method;

/// A fully resolved wire-level request (the "verb object").
#[derive(Debug, Clone)]
pub struct WireRequest {
    pub method: Method,
    pub url: Url,
    /// Ordered header pairs; duplicate names are legal and must all be sent.
    pub headers: Vec<(String, String)>,
    pub payload: Option<WirePayload>,
    /// Only ever set for GET; the executor clears it for other verbs.
    pub follow_redirect: bool,
}

/// Body bytes plus the content type they travel under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WirePayload {
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// The raw reply as seen by the transport, before normalization.
#[derive(Debug, Clone)]
pub struct RawHttpResponse {
    pub status_code: u16,
    /// The full status line, e.g. `HTTP/1.1 200 OK`.
    pub status_text: String,
    /// Ordered header pairs, duplicates preserved.
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

/// Failure surface of a transport implementation.
#[derive(Debug)]
pub enum TransportError {
    /// Socket-level failure: connection reset, truncation, transport-level
    /// timeout.
    Io {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
    },
    /// The peer's reply was not valid HTTP framing.
    Protocol { message: String },
    /// The verb object could not be built from the wire request, e.g. a
    /// header the underlying library rejects. Signals a library mismatch,
    /// not bad response data.
    Configuration { message: String },
}

/// Minimal capability this crate requires from an HTTP stack.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Perform one HTTP exchange for the prepared wire request.
    async fn dispatch(&self, request: WireRequest) -> Result<RawHttpResponse, TransportError>;

    /// Release the connection used by the last exchange.
    ///
    /// Must be callable unconditionally after [`dispatch`](Self::dispatch);
    /// the executor invokes it exactly once per `execute` call, on success
    /// and on every failure path.
    fn release_connection(&self);

    /// Host to fall back to when neither an explicit host address nor a
    /// base URL is configured.
    fn default_host(&self) -> Option<String> {
        None
    }
}
