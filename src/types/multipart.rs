//! Multipart part descriptors.
//!
//! A part either references a file on disk or carries an inline string
//! value; content type and charset can be overridden per part.

/// What a part carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestMultipartKind {
    /// The part value is a path; the file's bytes become the part content.
    File,
    /// The part value is embedded literally.
    String,
}

/// One named part of a `multipart/form-data` upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestMultipart {
    kind: RestMultipartKind,
    value: String,
    content_type: Option<String>,
    charset: Option<String>,
}

impl RestMultipart {
    pub fn new(kind: RestMultipartKind, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
            content_type: None,
            charset: None,
        }
    }

    /// A part whose content is read from the file at `path` at dispatch time.
    pub fn file(path: impl Into<String>) -> Self {
        Self::new(RestMultipartKind::File, path)
    }

    /// A part embedding `value` literally.
    pub fn string(value: impl Into<String>) -> Self {
        Self::new(RestMultipartKind::String, value)
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    pub fn with_charset(mut self, charset: impl Into<String>) -> Self {
        self.charset = Some(charset.into());
        self
    }

    pub fn kind(&self) -> RestMultipartKind {
        self.kind
    }

    /// File path for [`RestMultipartKind::File`] parts, literal content for
    /// [`RestMultipartKind::String`] parts.
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    pub fn charset(&self) -> Option<&str> {
        self.charset.as_deref()
    }
}
