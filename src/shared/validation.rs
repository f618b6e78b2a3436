use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Regex for image reference strings attached to reports and log entries.
    /// Accepts an absolute http(s) URL or a server-relative upload path.
    /// - Valid: "https://cdn.example.org/a.jpg", "/uploads/reports/17_ab3f.png"
    /// - Invalid: "ftp://x/y.jpg", "uploads/x.jpg", "javascript:alert(1)"
    pub static ref IMAGE_REF_REGEX: Regex =
        Regex::new(r"^(?:https?://[^\s]+|/[a-zA-Z0-9_\-./]+)$").unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_ref_valid() {
        assert!(IMAGE_REF_REGEX.is_match("https://cdn.example.org/a.jpg"));
        assert!(IMAGE_REF_REGEX.is_match("http://localhost:9000/bucket/key.png"));
        assert!(IMAGE_REF_REGEX.is_match("/uploads/reports/17_ab3f.png"));
        assert!(IMAGE_REF_REGEX.is_match("/static/evidence/2026/01/img.webp"));
    }

    #[test]
    fn test_image_ref_invalid() {
        assert!(!IMAGE_REF_REGEX.is_match("ftp://x/y.jpg")); // wrong scheme
        assert!(!IMAGE_REF_REGEX.is_match("uploads/x.jpg")); // not rooted
        assert!(!IMAGE_REF_REGEX.is_match("javascript:alert(1)"));
        assert!(!IMAGE_REF_REGEX.is_match(""));
        assert!(!IMAGE_REF_REGEX.is_match("https://host with space/a.jpg"));
    }
}
