//! Target URI resolution: host + resource concatenation, escaping, and the
//! query component.

use url::Url;

use crate::error::{RestError, Result};
use crate::types::data::HasRestData;
use crate::types::request::RestRequest;

/// Build the target URI for `request` against `host`.
///
/// The resource is appended to the host verbatim and the query string is
/// attached as the URI's query component. Requests flagged as already
/// percent-escaped are decoded first so that `Url`'s own encoding pass does
/// not escape them a second time.
pub fn resolve(host: &str, request: &RestRequest) -> Result<Url> {
    let resource = request.resource().unwrap_or_default();
    let joined = format!("{host}{resource}");
    let uri_string = if request.is_resource_uri_escaped() {
        match urlencoding::decode(&joined) {
            Ok(decoded) => decoded.into_owned(),
            Err(e) => {
                return Err(RestError::UriSyntax {
                    uri: joined,
                    message: e.to_string(),
                });
            }
        }
    } else {
        joined
    };
    let mut url = Url::parse(&uri_string).map_err(|e| RestError::UriSyntax {
        uri: uri_string.clone(),
        message: e.to_string(),
    })?;
    url.set_query(request.query());
    Ok(url)
}
