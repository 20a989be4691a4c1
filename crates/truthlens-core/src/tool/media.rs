//! Image container sniffing for uploaded files.
//!
//! The declared file name or content type of an upload is never trusted;
//! the format is read from the leading magic bytes.

/// MIME types the image tool forwards to the model.
pub const ACCEPTED_MIME_TYPES: &[&str] = &["image/png", "image/jpeg"];

/// Detect an image MIME type from its leading bytes.
pub fn sniff_mime(bytes: &[u8]) -> Option<&'static str> {
    if bytes.len() >= 8 && bytes[..8] == [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A] {
        return Some("image/png");
    }
    if bytes.len() >= 3 && bytes[..3] == [0xFF, 0xD8, 0xFF] {
        return Some("image/jpeg");
    }
    if bytes.len() >= 6 && (bytes[..6] == *b"GIF87a" || bytes[..6] == *b"GIF89a") {
        return Some("image/gif");
    }
    if bytes.len() >= 12 && bytes[..4] == *b"RIFF" && bytes[8..12] == *b"WEBP" {
        return Some("image/webp");
    }
    None
}

/// Whether a sniffed MIME type can be sent to the model.
pub fn is_accepted(mime: &str) -> bool {
    ACCEPTED_MIME_TYPES.contains(&mime)
}
