//! The declarative request model handed to [`RestClient`](crate::RestClient).

use std::fmt;
use std::str::FromStr;

use crate::error::RestError;
use crate::types::data::{DEFAULT_ENCODING, HasRestData, RestData};
use crate::types::multipart::RestMultipart;

/// Field name used by the [`RestRequest::add_multipart_file`] conveniences.
const FILE_PARAM_NAME: &str = "file";

/// HTTP verbs supported by the executor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
    Head,
    Options,
    Trace,
    Patch,
}

impl Method {
    /// Whether this verb encloses a request body on the wire.
    ///
    /// Payload selection only applies to enclosing verbs; the others never
    /// carry one regardless of what the request sets.
    pub fn encloses_body(self) -> bool {
        matches!(self, Method::Post | Method::Put | Method::Patch)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
            Method::Head => "HEAD",
            Method::Options => "OPTIONS",
            Method::Trace => "TRACE",
            Method::Patch => "PATCH",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Method {
    type Err = RestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(Method::Get),
            "POST" => Ok(Method::Post),
            "PUT" => Ok(Method::Put),
            "DELETE" => Ok(Method::Delete),
            "HEAD" => Ok(Method::Head),
            "OPTIONS" => Ok(Method::Options),
            "TRACE" => Ok(Method::Trace),
            "PATCH" => Ok(Method::Patch),
            other => Err(RestError::InvalidArgument(format!(
                "unsupported http method: {other}"
            ))),
        }
    }
}

/// A REST request described as data.
///
/// Built and populated entirely by the caller; the executor treats it as
/// read-only except for the transaction id, which is assigned exactly once
/// at dispatch time when the caller left it unset.
#[derive(Debug, Clone, PartialEq)]
pub struct RestRequest {
    data: RestData,
    method: Option<Method>,
    query: Option<String>,
    file_name: Option<String>,
    multipart: Vec<(String, RestMultipart)>,
    follow_redirect: bool,
    resource_uri_escaped: bool,
}

impl Default for RestRequest {
    fn default() -> Self {
        Self {
            data: RestData::default(),
            method: None,
            query: None,
            file_name: None,
            multipart: Vec::new(),
            follow_redirect: true,
            resource_uri_escaped: false,
        }
    }
}

impl RestRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn method(&self) -> Option<Method> {
        self.method
    }

    pub fn set_method(&mut self, method: Method) -> &mut Self {
        self.method = Some(method);
        self
    }

    /// Raw query string appended to the target URI.
    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    pub fn set_query(&mut self, query: impl Into<String>) -> &mut Self {
        self.query = Some(query.into());
        self
    }

    /// Path of a single file whose bytes become the whole request body.
    ///
    /// Takes priority over multipart parts when both are set.
    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    pub fn set_file_name(&mut self, file_name: impl Into<String>) -> &mut Self {
        self.file_name = Some(file_name.into());
        self
    }

    /// Named multipart parts in insertion order.
    pub fn multipart(&self) -> &[(String, RestMultipart)] {
        &self.multipart
    }

    /// Add a named part. A later part with the same field name overwrites
    /// the earlier one in place, keeping its position.
    pub fn add_multipart(
        &mut self,
        name: impl Into<String>,
        part: RestMultipart,
    ) -> &mut Self {
        let name = name.into();
        match self.multipart.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = part,
            None => self.multipart.push((name, part)),
        }
        self
    }

    /// Add a FILE part under the default `file` field name.
    pub fn add_multipart_file(&mut self, file_name: impl Into<String>) -> &mut Self {
        self.add_multipart(FILE_PARAM_NAME, RestMultipart::file(file_name))
    }

    /// Add a FILE part under the default `file` field name with an explicit
    /// content type.
    pub fn add_multipart_file_with_content_type(
        &mut self,
        file_name: impl Into<String>,
        content_type: impl Into<String>,
    ) -> &mut Self {
        self.add_multipart(
            FILE_PARAM_NAME,
            RestMultipart::file(file_name).with_content_type(content_type),
        )
    }

    /// Add a FILE part under the default `file` field name with explicit
    /// content type and charset.
    pub fn add_multipart_file_with_charset(
        &mut self,
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        charset: impl Into<String>,
    ) -> &mut Self {
        self.add_multipart(
            FILE_PARAM_NAME,
            RestMultipart::file(file_name)
                .with_content_type(content_type)
                .with_charset(charset),
        )
    }

    pub fn follow_redirect(&self) -> bool {
        self.follow_redirect
    }

    pub fn set_follow_redirect(&mut self, follow: bool) -> &mut Self {
        self.follow_redirect = follow;
        self
    }

    /// Whether `resource` is already percent-encoded.
    pub fn is_resource_uri_escaped(&self) -> bool {
        self.resource_uri_escaped
    }

    pub fn set_resource_uri_escaped(&mut self, escaped: bool) -> &mut Self {
        self.resource_uri_escaped = escaped;
        self
    }

    /// A request is dispatchable iff both method and resource are set.
    pub fn is_valid(&self) -> bool {
        self.method.is_some() && self.resource().is_some()
    }
}

impl HasRestData for RestRequest {
    fn data(&self) -> &RestData {
        &self.data
    }

    fn data_mut(&mut self) -> &mut RestData {
        &mut self.data
    }

    fn default_charset(&self) -> &str {
        DEFAULT_ENCODING
    }
}

impl fmt::Display for RestRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(method) = self.method {
            write!(f, "{method} ")?;
        }
        if let Some(resource) = self.resource() {
            f.write_str(resource)?;
        }
        if let Some(query) = &self.query {
            write!(f, "?{query}")?;
        }
        writeln!(f)?;
        f.write_str(&self.data.render(&self.charset()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn methods_parse_case_insensitively_and_render_upper_case() {
        for (token, method) in [
            ("get", Method::Get),
            ("POST", Method::Post),
            ("Put", Method::Put),
            ("delete", Method::Delete),
            ("head", Method::Head),
            ("options", Method::Options),
            ("trace", Method::Trace),
            ("patch", Method::Patch),
        ] {
            assert_eq!(token.parse::<Method>().unwrap(), method);
        }
        assert_eq!(Method::Options.to_string(), "OPTIONS");
        assert!("CONNECT".parse::<Method>().is_err());
    }

    #[test]
    fn only_post_put_patch_enclose_a_body() {
        assert!(Method::Post.encloses_body());
        assert!(Method::Put.encloses_body());
        assert!(Method::Patch.encloses_body());
        for m in [Method::Get, Method::Head, Method::Delete, Method::Options, Method::Trace] {
            assert!(!m.encloses_body());
        }
    }

    #[test]
    fn validity_needs_method_and_resource() {
        let mut r = RestRequest::new();
        assert!(!r.is_valid());
        r.set_method(Method::Get);
        assert!(!r.is_valid());
        r.set_resource("/a/resource");
        assert!(r.is_valid());
    }

    #[test]
    fn defaults_follow_redirect_and_unescaped_resource() {
        let r = RestRequest::new();
        assert!(r.follow_redirect());
        assert!(!r.is_resource_uri_escaped());
    }

    #[test]
    fn add_multipart_overwrites_in_place_and_keeps_order() {
        let mut r = RestRequest::new();
        r.add_multipart("first", RestMultipart::string("1"))
            .add_multipart("second", RestMultipart::string("2"))
            .add_multipart("first", RestMultipart::string("override"));
        let parts = r.multipart();
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0].0, "first");
        assert_eq!(parts[0].1.value(), "override");
        assert_eq!(parts[1].0, "second");
    }

    #[test]
    fn multipart_file_helpers_use_the_default_field_name() {
        let mut r = RestRequest::new();
        r.add_multipart_file("/tmp/upload.bin");
        assert_eq!(r.multipart()[0].0, "file");
    }

    #[test]
    fn display_renders_the_request_line() {
        let mut r = RestRequest::new();
        r.set_method(Method::Get).set_resource("/a/resource").set_query("aQuery");
        let rendered = r.to_string();
        assert!(rendered.starts_with("GET /a/resource?aQuery"));
    }
}
