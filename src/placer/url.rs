//! Public URL derivation.

use std::path::Path;

use super::Placer;

/// Percent-encode one path segment byte by byte.
///
/// RFC 3986 unreserved characters pass through; everything else, including
/// every byte of a multi-byte UTF-8 sequence, becomes `%XX` (uppercase hex).
pub fn encode_segment(bytes: &[u8]) -> String {
    let mut encoded = String::with_capacity(bytes.len());
    for &b in bytes {
        if b.is_ascii_alphanumeric() || matches!(b, b'-' | b'.' | b'_' | b'~') {
            encoded.push(b as char);
        } else {
            encoded.push_str(&format!("%{:02X}", b));
        }
    }
    encoded
}

impl Placer {
    /// URL of a resolved path inside the public root.
    ///
    /// # Panics
    /// If `path` is not inside the root. Callers that cannot guarantee this
    /// check [`Placer::is_inside_root`] first.
    pub fn to_public_url(&self, path: &Path) -> String {
        assert!(
            self.is_inside_root(path),
            "to_public_url called with a path outside the public root: {}",
            path.display()
        );
        let relative: Vec<String> = path
            .components()
            .skip(self.root().components().count())
            .map(|c| encode_segment(c.as_os_str().as_encoded_bytes()))
            .collect();
        format!("{}{}", self.url_base(), relative.join("/"))
    }
}
