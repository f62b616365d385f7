/// Upper bound for a single KYC document.
pub const MAX_DOCUMENT_BYTES: usize = 5 * 1024 * 1024;

const ALLOWED_CONTENT_TYPES: [&str; 3] = ["image/jpeg", "image/png", "application/pdf"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentPolicyError {
    UnsupportedContentType(String),
    TooLarge(usize),
}

impl std::fmt::Display for DocumentPolicyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocumentPolicyError::UnsupportedContentType(ct) => {
                write!(f, "Unsupported document type: {}", ct)
            }
            DocumentPolicyError::TooLarge(size) => write!(
                f,
                "Document of {} bytes exceeds the {} byte limit",
                size, MAX_DOCUMENT_BYTES
            ),
        }
    }
}

impl std::error::Error for DocumentPolicyError {}

/// Validate a document before any bytes leave the process. Uploads are
/// rejected locally so a bad file never reaches object storage.
pub fn validate_document(content_type: &str, size: usize) -> Result<(), DocumentPolicyError> {
    let normalized = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    if !ALLOWED_CONTENT_TYPES.contains(&normalized.as_str()) {
        return Err(DocumentPolicyError::UnsupportedContentType(
            content_type.to_string(),
        ));
    }

    if size > MAX_DOCUMENT_BYTES {
        return Err(DocumentPolicyError::TooLarge(size));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_allowed_types() {
        assert!(validate_document("image/jpeg", 1024).is_ok());
        assert!(validate_document("image/png", 1024).is_ok());
        assert!(validate_document("application/pdf", 1024).is_ok());
    }

    #[test]
    fn test_normalizes_content_type() {
        assert!(validate_document("IMAGE/JPEG", 1024).is_ok());
        assert!(validate_document("image/png; charset=binary", 1024).is_ok());
    }

    #[test]
    fn test_rejects_other_types() {
        assert!(matches!(
            validate_document("image/gif", 1024),
            Err(DocumentPolicyError::UnsupportedContentType(_))
        ));
        assert!(matches!(
            validate_document("text/html", 1024),
            Err(DocumentPolicyError::UnsupportedContentType(_))
        ));
    }

    #[test]
    fn test_size_limit_is_inclusive() {
        assert!(validate_document("image/png", MAX_DOCUMENT_BYTES).is_ok());
        assert!(matches!(
            validate_document("image/png", MAX_DOCUMENT_BYTES + 1),
            Err(DocumentPolicyError::TooLarge(_))
        ));
    }
}
