//! MIME type detection for file payloads.
//!
//! Used when a multipart FILE part carries no explicit content-type
//! override: magic numbers first, file extension second, and the generic
//! binary type as the last resort.

/// Generic binary content type used when nothing better can be derived.
pub const OCTET_STREAM: &str = "application/octet-stream";

/// Guess by magic numbers in the content bytes.
fn sniff_bytes(bytes: &[u8]) -> Option<String> {
    infer::get(bytes).map(|k| k.mime_type().to_string())
}

/// Guess by file extension.
fn sniff_path(path: &str) -> Option<String> {
    mime_guess::from_path(path).first_raw().map(str::to_string)
}

/// Content type for a file part: bytes beat extension, octet-stream last.
pub fn content_type_for_file(bytes: &[u8], path: &str) -> String {
    sniff_bytes(bytes)
        .or_else(|| sniff_path(path))
        .unwrap_or_else(|| OCTET_STREAM.to_string())
}
