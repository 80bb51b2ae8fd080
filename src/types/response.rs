//! The normalized response model returned by the executor.

use std::fmt;

use crate::types::data::{HasRestData, RestData};

/// Charset assumed for response bodies when the server did not declare one.
///
/// ISO-8859-1 on purpose, distinct from the request-side UTF-8 default: it
/// is the historical HTTP/1.1 default and what legacy servers actually send.
pub const DEFAULT_RESPONSE_ENCODING: &str = "ISO-8859-1";

/// A REST response: status line, headers, raw body, and the correlation id
/// copied from the originating request.
///
/// Created fresh by the executor for every dispatch and never mutated after
/// being returned.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RestResponse {
    data: RestData,
    status_code: Option<u16>,
    status_text: Option<String>,
    response_charset: Option<String>,
}

impl RestResponse {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status_code(&self) -> Option<u16> {
        self.status_code
    }

    pub fn set_status_code(&mut self, code: u16) -> &mut Self {
        self.status_code = Some(code);
        self
    }

    /// The transport's status line text, e.g. `HTTP/1.1 200 OK`.
    pub fn status_text(&self) -> Option<&str> {
        self.status_text.as_deref()
    }

    pub fn set_status_text(&mut self, text: impl Into<String>) -> &mut Self {
        self.status_text = Some(text.into());
        self
    }

    /// Fallback charset used when the response `Content-Type` carries none.
    pub fn response_charset(&self) -> &str {
        self.response_charset
            .as_deref()
            .unwrap_or(DEFAULT_RESPONSE_ENCODING)
    }

    pub fn set_response_charset(&mut self, charset: impl Into<String>) -> &mut Self {
        self.response_charset = Some(charset.into());
        self
    }
}

impl HasRestData for RestResponse {
    fn data(&self) -> &RestData {
        &self.data
    }

    fn data_mut(&mut self) -> &mut RestData {
        &mut self.data
    }

    fn default_charset(&self) -> &str {
        self.response_charset()
    }
}

impl fmt::Display for RestResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(code) = self.status_code {
            write!(f, "[{}] {}", code, self.status_text().unwrap_or_default())?;
        }
        writeln!(f)?;
        f.write_str(&self.data.render(&self.charset()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_charset_defaults_to_latin1() {
        let r = RestResponse::new();
        assert_eq!(r.response_charset(), "ISO-8859-1");
        assert_eq!(r.charset(), "ISO-8859-1");
    }

    #[test]
    fn latin1_bytes_decode_without_mangling() {
        let mut r = RestResponse::new();
        // 0xE9 is 'é' in ISO-8859-1 and invalid on its own in UTF-8.
        r.set_raw_body(Some(vec![0x63, 0x61, 0x66, 0xE9]));
        assert_eq!(r.body().as_deref(), Some("café"));
    }

    #[test]
    fn content_type_charset_wins_over_the_response_default() {
        let mut r = RestResponse::new();
        r.add_header("Content-Type", "application/json; charset=utf-8");
        r.set_raw_body(Some("héllo".as_bytes().to_vec()));
        assert_eq!(r.charset(), "utf-8");
        assert_eq!(r.body().as_deref(), Some("héllo"));
    }

    #[test]
    fn display_renders_the_status_line() {
        let mut r = RestResponse::new();
        r.set_status_code(200).set_status_text("HTTP/1.1 200 OK");
        assert!(r.to_string().starts_with("[200] HTTP/1.1 200 OK"));
    }
}
