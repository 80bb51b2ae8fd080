//! State shared between request and response models: the ordered header
//! list, the raw body, the resource path, and the transaction id.

use std::collections::HashMap;
use std::fmt;

use crate::utils::charset;

/// Charset assumed for request bodies when the `Content-Type` header does
/// not declare one.
pub const DEFAULT_ENCODING: &str = "UTF-8";

/// A single HTTP header as sent or received on the wire.
///
/// Duplicate names are legal and preserved in insertion order. Lookup is
/// case-insensitive, but the stored name keeps the caller's casing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    name: String,
    value: String,
}

impl Header {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for Header {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.name, self.value)
    }
}

/// Data common to [`RestRequest`](crate::RestRequest) and
/// [`RestResponse`](crate::RestResponse).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RestData {
    headers: Vec<Header>,
    raw: Option<Vec<u8>>,
    resource: Option<String>,
    transaction_id: Option<i64>,
}

impl RestData {
    /// Render headers and body the way an HTTP message reads, for logging.
    pub(crate) fn render(&self, charset_label: &str) -> String {
        let mut out = String::new();
        for h in &self.headers {
            out.push_str(&h.to_string());
            out.push('\n');
        }
        match &self.raw {
            Some(raw) => {
                out.push('\n');
                out.push_str(&charset::decode(raw, charset_label));
            }
            None => out.push_str("[empty/null body]"),
        }
        out
    }
}

/// Accessor surface shared by the request and response models.
///
/// Implementors expose their embedded [`RestData`] plus the charset used to
/// decode the body when the `Content-Type` header does not carry one: UTF-8
/// on the request side, ISO-8859-1 on the response side.
pub trait HasRestData {
    fn data(&self) -> &RestData;
    fn data_mut(&mut self) -> &mut RestData;

    /// Charset assumed when the `Content-Type` header does not declare one.
    fn default_charset(&self) -> &str;

    /// All headers, in insertion order.
    fn headers(&self) -> &[Header] {
        &self.data().headers
    }

    /// Every header whose name matches `name` case-insensitively, in
    /// insertion order.
    fn header(&self, name: &str) -> Vec<&Header> {
        self.data()
            .headers
            .iter()
            .filter(|h| h.name.eq_ignore_ascii_case(name))
            .collect()
    }

    /// Value of the first header matching `name` case-insensitively.
    fn header_value(&self, name: &str) -> Option<&str> {
        self.data()
            .headers
            .iter()
            .find(|h| h.name.eq_ignore_ascii_case(name))
            .map(|h| h.value.as_str())
    }

    fn add_header(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self
    where
        Self: Sized,
    {
        self.data_mut().headers.push(Header::new(name, value));
        self
    }

    fn add_headers(&mut self, headers: HashMap<String, String>) -> &mut Self
    where
        Self: Sized,
    {
        for (name, value) in headers {
            self.add_header(name, value);
        }
        self
    }

    fn raw_body(&self) -> Option<&[u8]> {
        self.data().raw.as_deref()
    }

    fn set_raw_body(&mut self, raw: Option<Vec<u8>>) -> &mut Self
    where
        Self: Sized,
    {
        self.data_mut().raw = raw;
        self
    }

    /// The body decoded under the resolved charset, or `None` when there is
    /// no raw body.
    fn body(&self) -> Option<String> {
        let cs = self.charset();
        self.raw_body().map(|raw| charset::decode(raw, &cs))
    }

    /// Set the body as text; the raw bytes are re-derived under the resolved
    /// charset. `None` clears the raw body as well.
    fn set_body(&mut self, body: Option<&str>) -> &mut Self
    where
        Self: Sized,
    {
        let cs = self.charset();
        let raw = body.map(|b| charset::encode(b, &cs));
        self.set_raw_body(raw)
    }

    fn resource(&self) -> Option<&str> {
        self.data().resource.as_deref()
    }

    fn set_resource(&mut self, resource: impl Into<String>) -> &mut Self
    where
        Self: Sized,
    {
        self.data_mut().resource = Some(resource.into());
        self
    }

    /// Correlation id tying a dispatched request to its response in logs.
    fn transaction_id(&self) -> Option<i64> {
        self.data().transaction_id
    }

    fn set_transaction_id(&mut self, id: i64) -> &mut Self
    where
        Self: Sized,
    {
        self.data_mut().transaction_id = Some(id);
        self
    }

    /// Value of the first `Content-Type` header, if any.
    fn content_type(&self) -> Option<&str> {
        self.header_value("Content-Type")
    }

    /// Value of the first `Content-Length` header, if any.
    fn content_length(&self) -> Option<&str> {
        self.header_value("Content-Length")
    }

    /// The resolved charset: the `charset=` parameter of the `Content-Type`
    /// header when present and well-formed, otherwise the entity default.
    fn charset(&self) -> String {
        self.content_type()
            .and_then(charset::from_content_type)
            .unwrap_or_else(|| self.default_charset().to_string())
    }
}
