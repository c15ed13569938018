use std::sync::Arc;

use crate::error::SignerError;

pub const PDF_MEDIA_TYPE: &str = "application/pdf";

/// In-memory PDF as received from the host. Cloning shares the buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    name: Option<String>,
    bytes: Arc<[u8]>,
}

impl Document {
    pub fn new(bytes: impl Into<Arc<[u8]>>, name: Option<&str>) -> Self {
        Self {
            name: name.map(|n| n.to_string()).filter(|n| !n.trim().is_empty()),
            bytes: bytes.into(),
        }
    }

    /// A transform output keeps the display name of its source.
    pub fn derive(&self, bytes: Vec<u8>) -> Self {
        Self {
            name: self.name.clone(),
            bytes: bytes.into(),
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Accepts `application/pdf`, ignoring case and media-type parameters.
pub fn ensure_pdf_media_type(declared: Option<&str>) -> Result<(), SignerError> {
    let raw = declared.unwrap_or_default();
    let essence = raw.split(';').next().unwrap_or_default().trim();
    if essence.eq_ignore_ascii_case(PDF_MEDIA_TYPE) {
        Ok(())
    } else {
        Err(SignerError::InvalidInput {
            declared: raw.trim().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pdf_media_type_variants_are_accepted() {
        assert!(ensure_pdf_media_type(Some("application/pdf")).is_ok());
        assert!(ensure_pdf_media_type(Some("Application/PDF")).is_ok());
        assert!(ensure_pdf_media_type(Some("application/pdf; charset=binary")).is_ok());
    }

    #[test]
    fn other_media_types_are_rejected() {
        for declared in [
            Some("text/plain"),
            Some("image/png"),
            Some("application/pdfx"),
            Some("application/octet-stream"),
            Some(""),
            None,
        ] {
            let err = ensure_pdf_media_type(declared).unwrap_err();
            assert!(
                matches!(err, SignerError::InvalidInput { .. }),
                "{declared:?} should be rejected"
            );
        }
    }

    #[test]
    fn derived_document_keeps_name_and_shares_nothing_with_input() {
        let original = Document::new(vec![1u8, 2, 3], Some("contract.pdf"));
        let signed = original.derive(vec![4, 5]);
        assert_eq!(signed.name(), Some("contract.pdf"));
        assert_eq!(original.bytes(), &[1, 2, 3]);
        assert_eq!(signed.len(), 2);
        assert!(Document::new(Vec::new(), Some(" ")).name().is_none());
    }
}
