//! Default [`HttpTransport`] backed by `reqwest`.

use async_trait::async_trait;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use reqwest::redirect;

use crate::error::{RestError, Result};
use crate::execution::transport::{HttpTransport, RawHttpResponse, TransportError, WireRequest};
use crate::types::request::Method;

/// Transport over pooled `reqwest` clients.
///
/// Redirect policy in `reqwest` is client-wide, so two inner clients are
/// kept: one following up to ten redirects and one following none. The
/// wire request's `follow_redirect` flag picks between them per dispatch.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    following: reqwest::Client,
    direct: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Result<Self> {
        let following = reqwest::Client::builder()
            .redirect(redirect::Policy::limited(10))
            .build()
            .map_err(|e| RestError::Configuration(format!("cannot build http client: {e}")))?;
        let direct = reqwest::Client::builder()
            .redirect(redirect::Policy::none())
            .build()
            .map_err(|e| RestError::Configuration(format!("cannot build http client: {e}")))?;
        Ok(Self { following, direct })
    }
}

fn to_reqwest_method(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Put => reqwest::Method::PUT,
        Method::Delete => reqwest::Method::DELETE,
        Method::Head => reqwest::Method::HEAD,
        Method::Options => reqwest::Method::OPTIONS,
        Method::Trace => reqwest::Method::TRACE,
        Method::Patch => reqwest::Method::PATCH,
    }
}

fn to_header_map(pairs: &[(String, String)]) -> std::result::Result<HeaderMap, TransportError> {
    let mut headers = HeaderMap::new();
    for (name, value) in pairs {
        let name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
            TransportError::Configuration {
                message: format!("invalid header name '{name}': {e}"),
            }
        })?;
        let value = HeaderValue::from_str(value).map_err(|e| TransportError::Configuration {
            message: format!("invalid header value: {e}"),
        })?;
        // append, not insert: duplicate names must all be sent
        headers.append(name, value);
    }
    Ok(headers)
}

fn map_reqwest_error(e: reqwest::Error) -> TransportError {
    if e.is_decode() {
        TransportError::Protocol {
            message: e.to_string(),
        }
    } else {
        TransportError::Io {
            message: e.to_string(),
            source: Some(Box::new(e)),
        }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn dispatch(&self, request: WireRequest) -> std::result::Result<RawHttpResponse, TransportError> {
        let client = if request.follow_redirect {
            &self.following
        } else {
            &self.direct
        };
        let mut headers = to_header_map(&request.headers)?;
        if let Some(payload) = &request.payload {
            let value = HeaderValue::from_str(&payload.content_type).map_err(|e| {
                TransportError::Configuration {
                    message: format!("invalid content type '{}': {e}", payload.content_type),
                }
            })?;
            headers.insert(CONTENT_TYPE, value);
        }
        let mut builder = client
            .request(to_reqwest_method(request.method), request.url.clone())
            .headers(headers);
        if let Some(payload) = request.payload {
            builder = builder.body(payload.bytes);
        }

        let response = builder.send().await.map_err(map_reqwest_error)?;
        let status = response.status();
        let status_text = format!(
            "{:?} {} {}",
            response.version(),
            status.as_u16(),
            status.canonical_reason().unwrap_or_default()
        );
        let response_headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();
        let body = response.bytes().await.map_err(map_reqwest_error)?.to_vec();

        Ok(RawHttpResponse {
            status_code: status.as_u16(),
            status_text,
            headers: response_headers,
            body,
        })
    }

    fn release_connection(&self) {
        // reqwest returns connections to its pool when the response body has
        // been fully read, which dispatch() always does.
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_verbs_map_to_their_reqwest_counterpart() {
        for (ours, theirs) in [
            (Method::Get, reqwest::Method::GET),
            (Method::Post, reqwest::Method::POST),
            (Method::Put, reqwest::Method::PUT),
            (Method::Delete, reqwest::Method::DELETE),
            (Method::Head, reqwest::Method::HEAD),
            (Method::Options, reqwest::Method::OPTIONS),
            (Method::Trace, reqwest::Method::TRACE),
            (Method::Patch, reqwest::Method::PATCH),
        ] {
            assert_eq!(to_reqwest_method(ours), theirs);
        }
    }

    #[test]
    fn duplicate_headers_survive_conversion() {
        let pairs = vec![
            ("Set-Cookie".to_string(), "a=1".to_string()),
            ("Set-Cookie".to_string(), "b=2".to_string()),
        ];
        let map = to_header_map(&pairs).unwrap();
        let values: Vec<_> = map.get_all("set-cookie").iter().collect();
        assert_eq!(values.len(), 2);
    }

    #[test]
    fn an_unusable_header_name_is_a_configuration_failure() {
        let pairs = vec![("bad header".to_string(), "v".to_string())];
        assert!(matches!(
            to_header_map(&pairs),
            Err(TransportError::Configuration { .. })
        ));
    }
}
