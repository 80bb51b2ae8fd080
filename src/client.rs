//! The request executor: turns a [`RestRequest`] into a wire exchange and
//! normalizes the raw reply into a [`RestResponse`].

use std::sync::Arc;

use tracing::debug;

use crate::error::{RestError, Result};
use crate::execution::payload;
use crate::execution::transport::{HttpTransport, TransportError, WireRequest};
use crate::execution::uri;
use crate::types::data::HasRestData;
use crate::types::request::{Method, RestRequest};
use crate::types::response::RestResponse;

/// Executes requests against an injected [`HttpTransport`].
///
/// The client is stateless with respect to in-flight requests: every
/// [`execute`](Self::execute) call is independent, and concurrent use is
/// safe as long as the transport itself is. No retry is performed here;
/// every failure is surfaced to the caller after the connection has been
/// released.
pub struct RestClient {
    transport: Arc<dyn HttpTransport>,
    base_url: Option<String>,
    allow_redirect: bool,
}

impl RestClient {
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            transport,
            base_url: None,
            allow_redirect: true,
        }
    }

    pub fn with_base_url(transport: Arc<dyn HttpTransport>, base_url: impl Into<String>) -> Self {
        let mut client = Self::new(transport);
        client.set_base_url(base_url);
        client
    }

    /// Default host used when no explicit host address is given per call.
    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }

    pub fn set_base_url(&mut self, base_url: impl Into<String>) {
        self.base_url = Some(base_url.into());
    }

    /// Toggle redirect-following for GET requests. Redirects are never
    /// followed for other verbs; when disabled here, they are not followed
    /// for GET either, regardless of the request's own flag.
    pub fn set_allow_redirect(&mut self, allow: bool) {
        self.allow_redirect = allow;
    }

    pub fn transport(&self) -> &Arc<dyn HttpTransport> {
        &self.transport
    }

    /// Execute `request` against the configured base URL.
    pub async fn execute(&self, request: &mut RestRequest) -> Result<RestResponse> {
        self.execute_with_host(None, request).await
    }

    /// Execute `request` against an explicit host address, overriding the
    /// configured base URL.
    pub async fn execute_with_host(
        &self,
        host_address: Option<&str>,
        request: &mut RestRequest,
    ) -> Result<RestResponse> {
        let method = match request.method() {
            Some(method) if request.is_valid() => method,
            _ => {
                return Err(RestError::InvalidArgument(format!(
                    "invalid request {request}"
                )));
            }
        };
        // Assign-if-absent, exactly once: the id stays on the request so the
        // caller can correlate it with the response and with log lines.
        if request.transaction_id().is_none() {
            request.set_transaction_id(chrono::Utc::now().timestamp_millis());
        }
        debug!(transaction_id = request.transaction_id(), "request:\n{request}");

        let host = self.resolve_host(host_address)?;
        let url = uri::resolve(&host, request)?;

        let wire_payload = if method.encloses_body() {
            Some(payload::build(request).await?)
        } else {
            None
        };
        let wire = WireRequest {
            method,
            url,
            headers: request
                .headers()
                .iter()
                .map(|h| (h.name().to_string(), h.value().to_string()))
                .collect(),
            payload: wire_payload,
            follow_redirect: method == Method::Get
                && self.allow_redirect
                && request.follow_redirect(),
        };
        debug!(method = %wire.method, uri = %wire.url, "dispatching http request");

        let outcome = self.transport.dispatch(wire).await;
        // The connection is released on every exit path, before any error
        // propagates.
        self.transport.release_connection();
        let raw = outcome.map_err(translate_transport_error)?;

        let mut response = RestResponse::new();
        if let Some(id) = request.transaction_id() {
            response.set_transaction_id(id);
        }
        if let Some(resource) = request.resource() {
            response.set_resource(resource);
        }
        for (name, value) in &raw.headers {
            response.add_header(name, value);
        }
        response.set_status_code(raw.status_code);
        response.set_status_text(raw.status_text);
        response.set_raw_body(Some(raw.body));
        debug!(transaction_id = response.transaction_id(), "response:\n{response}");
        Ok(response)
    }

    /// Effective host: explicit argument, then the configured base URL, then
    /// whatever default the transport exposes.
    fn resolve_host(&self, host_address: Option<&str>) -> Result<String> {
        if let Some(host) = host_address {
            return Ok(host.to_string());
        }
        if let Some(host) = &self.base_url {
            return Ok(host.clone());
        }
        if let Some(host) = self.transport.default_host() {
            return Ok(host);
        }
        Err(RestError::Configuration(
            "hostAddress is null: please pass a valid host address or configure a base url on this client"
                .to_string(),
        ))
    }
}

fn translate_transport_error(error: TransportError) -> RestError {
    match error {
        TransportError::Io { message, source } => RestError::Transport { message, source },
        TransportError::Protocol { message } => RestError::Protocol { message },
        TransportError::Configuration { message } => RestError::Configuration(message),
    }
}
