//! `multipart/form-data` envelope encoding (RFC 2046 / RFC 7578).
//!
//! The envelope is produced in-crate so that any [`HttpTransport`]
//! implementation receives plain bytes plus the composite content type
//! carrying the boundary token.
//!
//! [`HttpTransport`]: crate::execution::transport::HttpTransport

use std::path::Path;

use rand::Rng;

use crate::error::{RestError, Result};
use crate::types::multipart::{RestMultipart, RestMultipartKind};
use crate::utils::{charset, mime};

const CRLF: &str = "\r\n";
const BOUNDARY_LEN: usize = 32;

/// Default content type for STRING parts without an override.
const TEXT_PLAIN: &str = "text/plain";

/// An encoded multipart body and the composite content type describing it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultipartBody {
    /// `multipart/form-data; boundary=<token>`
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Random alphanumeric boundary token.
///
/// 32 alphanumeric characters make an accidental collision with file
/// content vanishingly unlikely, which is the uniqueness guarantee the
/// envelope needs.
fn boundary_token() -> String {
    rand::thread_rng()
        .sample_iter(&rand::distributions::Alphanumeric)
        .take(BOUNDARY_LEN)
        .map(char::from)
        .collect()
}

/// Encode `parts` into a multipart/form-data envelope, in insertion order.
///
/// FILE parts are read from disk here; a missing file fails the whole
/// payload before anything is dispatched.
pub async fn encode(parts: &[(String, RestMultipart)]) -> Result<MultipartBody> {
    let boundary = boundary_token();
    let mut bytes = Vec::new();
    for (name, part) in parts {
        bytes.extend_from_slice(format!("--{boundary}{CRLF}").as_bytes());
        match part.kind() {
            RestMultipartKind::File => encode_file_part(&mut bytes, name, part).await?,
            RestMultipartKind::String => encode_string_part(&mut bytes, name, part),
        }
        bytes.extend_from_slice(CRLF.as_bytes());
    }
    bytes.extend_from_slice(format!("--{boundary}--{CRLF}").as_bytes());
    Ok(MultipartBody {
        content_type: format!("multipart/form-data; boundary={boundary}"),
        bytes,
    })
}

async fn encode_file_part(
    bytes: &mut Vec<u8>,
    name: &str,
    part: &RestMultipart,
) -> Result<()> {
    let path = part.value();
    let content = tokio::fs::read(path)
        .await
        .map_err(|_| RestError::Payload(format!("File not found: {path}")))?;
    let file_name = Path::new(path)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string());
    let content_type = part
        .content_type()
        .map(str::to_string)
        .unwrap_or_else(|| mime::content_type_for_file(&content, path));
    let content_type = with_charset(content_type, part.charset());
    bytes.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"{CRLF}"
        )
        .as_bytes(),
    );
    bytes.extend_from_slice(format!("Content-Type: {content_type}{CRLF}{CRLF}").as_bytes());
    bytes.extend_from_slice(&content);
    Ok(())
}

fn encode_string_part(bytes: &mut Vec<u8>, name: &str, part: &RestMultipart) {
    let content_type = part.content_type().unwrap_or(TEXT_PLAIN).to_string();
    let content_type = with_charset(content_type, part.charset());
    // A charset override applies to the content, not just the label.
    let content = match part.charset() {
        Some(cs) => charset::encode(part.value(), cs),
        None => part.value().as_bytes().to_vec(),
    };
    bytes.extend_from_slice(
        format!("Content-Disposition: form-data; name=\"{name}\"{CRLF}").as_bytes(),
    );
    bytes.extend_from_slice(format!("Content-Type: {content_type}{CRLF}{CRLF}").as_bytes());
    bytes.extend_from_slice(&content);
}

fn with_charset(content_type: String, charset: Option<&str>) -> String {
    match charset {
        Some(cs) => format!("{content_type}; charset={cs}"),
        None => content_type,
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn part_list(parts: Vec<(&str, RestMultipart)>) -> Vec<(String, RestMultipart)> {
        parts.into_iter().map(|(n, p)| (n.to_string(), p)).collect()
    }

    #[tokio::test]
    async fn envelope_contains_each_part_once_with_a_single_boundary() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "File1_Content").unwrap();
        let parts = part_list(vec![
            ("uploadFile", RestMultipart::file(file.path().to_string_lossy())),
            (
                "json",
                RestMultipart::string("{\"lastname\":\"Boby\",\"firstname\":\"Bob\"}")
                    .with_content_type("application/json"),
            ),
        ]);

        let body = encode(&parts).await.unwrap();
        let text = String::from_utf8_lossy(&body.bytes);

        assert!(text.contains("Content-Disposition: form-data; name=\"uploadFile\""));
        assert!(text.contains("Content-Disposition: form-data; name=\"json\""));
        assert!(text.contains("File1_Content"));
        assert!(text.contains("{\"lastname\":\"Boby\",\"firstname\":\"Bob\"}"));
        assert!(text.contains("Content-Type: application/json\r\n"));

        let boundary = body
            .content_type
            .strip_prefix("multipart/form-data; boundary=")
            .unwrap()
            .to_string();
        // One delimiter per part plus the closing delimiter.
        assert_eq!(text.matches(&boundary).count(), parts.len() + 1);
        assert!(text.ends_with(&format!("--{boundary}--\r\n")));
    }

    #[tokio::test]
    async fn string_parts_default_to_text_plain() {
        let parts = part_list(vec![("field", RestMultipart::string("value"))]);
        let body = encode(&parts).await.unwrap();
        let text = String::from_utf8_lossy(&body.bytes);
        assert!(text.contains("Content-Type: text/plain\r\n"));
    }

    #[tokio::test]
    async fn part_charset_override_is_appended() {
        let parts = part_list(vec![(
            "field",
            RestMultipart::string("value")
                .with_content_type("text/plain")
                .with_charset("ISO-8859-1"),
        )]);
        let body = encode(&parts).await.unwrap();
        let text = String::from_utf8_lossy(&body.bytes);
        assert!(text.contains("Content-Type: text/plain; charset=ISO-8859-1\r\n"));
    }

    #[tokio::test]
    async fn string_part_charset_override_reencodes_the_content() {
        let parts = part_list(vec![(
            "field",
            RestMultipart::string("café").with_charset("ISO-8859-1"),
        )]);
        let body = encode(&parts).await.unwrap();
        // The "é" travels as the single Latin-1 byte, not the UTF-8 pair.
        assert!(body.bytes.windows(4).any(|w| w == [0x63, 0x61, 0x66, 0xE9]));
        assert!(!body.bytes.windows(2).any(|w| w == [0xC3, 0xA9]));
    }

    #[tokio::test]
    async fn file_parts_carry_the_file_name() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "data").unwrap();
        let path = file.path().to_string_lossy().into_owned();
        let expected_name = std::path::Path::new(&path)
            .file_name()
            .unwrap()
            .to_string_lossy()
            .into_owned();
        let parts = part_list(vec![("f", RestMultipart::file(path.clone()))]);
        let body = encode(&parts).await.unwrap();
        let text = String::from_utf8_lossy(&body.bytes);
        assert!(text.contains(&format!("filename=\"{expected_name}\"")));
    }

    #[tokio::test]
    async fn a_missing_file_part_fails_the_payload() {
        let parts = part_list(vec![("f", RestMultipart::file("/path/does/not/exist"))]);
        let err = encode(&parts).await.unwrap_err();
        match err {
            RestError::Payload(msg) => assert_eq!(msg, "File not found: /path/does/not/exist"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn boundaries_differ_between_envelopes() {
        let parts = part_list(vec![("field", RestMultipart::string("value"))]);
        let a = encode(&parts).await.unwrap();
        let b = encode(&parts).await.unwrap();
        assert_ne!(a.content_type, b.content_type);
    }
}
