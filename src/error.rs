//! Error types for the restwire crate.
//!
//! Every failure raised by [`RestClient::execute`](crate::RestClient::execute)
//! is one of the variants below. None of them are retried or suppressed
//! internally; the transport connection is released before the error
//! propagates to the caller.

use thiserror::Error;

/// Errors raised while turning a request model into a wire-level exchange.
#[derive(Error, Debug)]
pub enum RestError {
    /// The request was unusable before any I/O was attempted: missing method
    /// or resource, or an otherwise invalid argument.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Caller or transport misconfiguration: no resolvable host address, or
    /// the transport could not build a verb object for the request. Fatal and
    /// not retryable.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The concatenation of host, resource, and query did not form a valid
    /// URI.
    #[error("problem when building URI '{uri}': {message}")]
    UriSyntax {
        /// The offending URI string as it was assembled.
        uri: String,
        message: String,
    },

    /// A referenced upload file (single-file or multipart FILE part) could
    /// not be used as a payload.
    #[error("{0}")]
    Payload(String),

    /// I/O failure while dispatching: connection reset, truncated stream,
    /// transport-level timeout.
    #[error("http call failed for IO failure: {message}")]
    Transport {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
    },

    /// The reply could not be understood as HTTP framing.
    #[error("http call failed for protocol failure: {message}")]
    Protocol { message: String },
}

/// Result type used across the crate.
pub type Result<T> = std::result::Result<T, RestError>;
