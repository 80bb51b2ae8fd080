//! restwire
//!
//! A declarative REST request/response layer over a pluggable HTTP transport.
//!
//! Callers describe an HTTP interaction as data — method, resource, query,
//! headers, body or file/multipart payload — and hand it to a [`RestClient`],
//! which resolves the target URI, selects the payload strategy, dispatches
//! through an injected [`HttpTransport`], and normalizes the raw reply into a
//! [`RestResponse`] carrying a per-transaction correlation id.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use restwire::prelude::*;
//!
//! # async fn run() -> restwire::Result<()> {
//! let client = RestClient::with_base_url(
//!     Arc::new(ReqwestTransport::new()?),
//!     "http://localhost:8080",
//! );
//! let mut request = RestRequest::new();
//! request
//!     .set_method(Method::Get)
//!     .set_resource("/a/resource")
//!     .set_query("aQuery")
//!     .add_header("Accept", "application/json");
//! let response = client.execute(&mut request).await?;
//! println!("[{}] {}", response.status_code().unwrap_or(0), response.body().unwrap_or_default());
//! # Ok(())
//! # }
//! ```
//!
//! Retry policy, response parsing, and connection-level tuning are out of
//! scope: they belong to the transport implementation or to a caller wrapping
//! [`RestClient::execute`].
#![deny(unsafe_code)]

pub mod client;
pub mod error;
pub mod execution;
pub mod types;
pub mod utils;

pub use client::RestClient;
pub use error::{RestError, Result};
pub use execution::reqwest::ReqwestTransport;
pub use execution::transport::{
    HttpTransport, RawHttpResponse, TransportError, WirePayload, WireRequest,
};
pub use types::data::{HasRestData, Header, RestData};
pub use types::multipart::{RestMultipart, RestMultipartKind};
pub use types::request::{Method, RestRequest};
pub use types::response::RestResponse;

/// Convenience re-exports for the common surface.
pub mod prelude {
    pub use crate::client::RestClient;
    pub use crate::error::{RestError, Result};
    pub use crate::execution::reqwest::ReqwestTransport;
    pub use crate::execution::transport::HttpTransport;
    pub use crate::types::data::{HasRestData, Header};
    pub use crate::types::multipart::{RestMultipart, RestMultipartKind};
    pub use crate::types::request::{Method, RestRequest};
    pub use crate::types::response::RestResponse;
}
