//! Charset resolution and byte/string conversion for message bodies.
//!
//! Only the two charsets this layer defaults to are decoded exactly: UTF-8
//! (request side) and ISO-8859-1 (response side). Any other label falls
//! back to lossy UTF-8 rather than failing the exchange.

/// Extract the `charset=` parameter from a `Content-Type` header value.
///
/// Returns `None` when the parameter is absent or malformed (e.g. a bare
/// `charset=` with no value).
pub fn from_content_type(value: &str) -> Option<String> {
    let at = value.find("charset")?;
    let eq = value[at..].find('=')? + at;
    let label = value[eq + 1..].trim().trim_matches('"');
    if label.is_empty() {
        None
    } else {
        Some(label.to_string())
    }
}

/// Decode `raw` under the given charset label.
pub fn decode(raw: &[u8], charset: &str) -> String {
    if is_latin1(charset) {
        // ISO-8859-1 maps each byte to the same code point.
        raw.iter().map(|&b| b as char).collect()
    } else {
        String::from_utf8_lossy(raw).into_owned()
    }
}

/// Encode `text` under the given charset label.
///
/// Characters outside Latin-1 are replaced with `?` when encoding for a
/// Latin-1 body, matching what lenient HTTP stacks do.
pub fn encode(text: &str, charset: &str) -> Vec<u8> {
    if is_latin1(charset) {
        text.chars()
            .map(|c| if (c as u32) < 256 { c as u8 } else { b'?' })
            .collect()
    } else {
        text.as_bytes().to_vec()
    }
}

fn is_latin1(charset: &str) -> bool {
    matches!(
        charset.to_ascii_lowercase().as_str(),
        "iso-8859-1" | "latin1" | "latin-1" | "us-ascii"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn charset_parameter_is_extracted_and_trimmed() {
        assert_eq!(
            from_content_type("text/html; charset= UTF-8 ").as_deref(),
            Some("UTF-8")
        );
        assert_eq!(
            from_content_type("text/html; charset=\"utf-8\"").as_deref(),
            Some("utf-8")
        );
    }

    #[test]
    fn missing_or_empty_charset_yields_none() {
        assert!(from_content_type("text/html").is_none());
        assert!(from_content_type("text/html; charset=").is_none());
    }

    #[test]
    fn latin1_round_trip() {
        let bytes = encode("café", "ISO-8859-1");
        assert_eq!(bytes, vec![0x63, 0x61, 0x66, 0xE9]);
        assert_eq!(decode(&bytes, "latin1"), "café");
    }

    #[test]
    fn non_latin1_chars_degrade_to_question_marks() {
        assert_eq!(encode("日本", "ISO-8859-1"), b"??".to_vec());
    }

    #[test]
    fn unknown_labels_fall_back_to_utf8() {
        assert_eq!(decode("héllo".as_bytes(), "x-weird"), "héllo");
    }
}
