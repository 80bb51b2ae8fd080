//! Payload strategy selection for body-enclosing verbs.
//!
//! A request body is produced one of three ways, by priority: the bytes of
//! a single referenced file, a multipart/form-data envelope, or the
//! request's own raw body. First match wins; non-enclosing verbs never get
//! a payload at all.

use crate::error::{RestError, Result};
use crate::execution::multipart;
use crate::execution::transport::WirePayload;
use crate::types::data::HasRestData;
use crate::types::multipart::RestMultipart;
use crate::types::request::RestRequest;
use crate::utils::mime;

/// Content type assumed for plain bodies when the caller set none.
///
/// `text/xml` is a deliberate legacy default kept for compatibility with
/// long-standing callers; changing it would silently change wire behavior.
pub const DEFAULT_BODY_CONTENT_TYPE: &str = "text/xml";

/// The closed set of payload strategies.
#[derive(Debug, PartialEq, Eq)]
enum Strategy<'a> {
    SingleFile(&'a str),
    Multipart(&'a [(String, RestMultipart)]),
    PlainBody,
}

fn select(request: &RestRequest) -> Strategy<'_> {
    if let Some(file_name) = request.file_name() {
        return Strategy::SingleFile(file_name);
    }
    if !request.multipart().is_empty() {
        return Strategy::Multipart(request.multipart());
    }
    Strategy::PlainBody
}

/// Produce the payload for a body-enclosing verb.
pub async fn build(request: &RestRequest) -> Result<WirePayload> {
    match select(request) {
        Strategy::SingleFile(file_name) => {
            let bytes = tokio::fs::read(file_name)
                .await
                .map_err(|_| RestError::Payload(format!("File not found: {file_name}")))?;
            let content_type = request
                .content_type()
                .unwrap_or(mime::OCTET_STREAM)
                .to_string();
            Ok(WirePayload {
                content_type,
                bytes,
            })
        }
        Strategy::Multipart(parts) => {
            let body = multipart::encode(parts).await?;
            Ok(WirePayload {
                content_type: body.content_type,
                bytes: body.bytes,
            })
        }
        Strategy::PlainBody => {
            let content_type = request
                .content_type()
                .unwrap_or(DEFAULT_BODY_CONTENT_TYPE)
                .to_string();
            Ok(WirePayload {
                content_type,
                bytes: request.raw_body().map(<[u8]>::to_vec).unwrap_or_default(),
            })
        }
    }
}
