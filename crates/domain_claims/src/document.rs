//! Supporting document contract
//!
//! Uploaded documents live in an opaque blob store behind
//! [`DocumentStorePort`]; the claim only keeps the returned reference.
//! Extension and size rules are enforced here so every adapter applies the
//! same policy before anything is written.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use core_kernel::{DomainPort, PortError};

/// File extensions accepted as supporting documents
pub const ALLOWED_EXTENSIONS: [&str; 3] = ["pdf", "docx", "xlsx"];

/// Maximum accepted document size (5 MiB)
pub const MAX_DOCUMENT_BYTES: usize = 5 * 1024 * 1024;

/// Reference to a stored supporting document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupportingDocument {
    /// Location in the blob store
    pub path: String,
    /// Name the file was uploaded under
    pub original_name: String,
}

/// Checks the upload policy: allowed extension, size within the cap
///
/// Runs before any byte is persisted, in every adapter.
pub fn validate_upload(bytes: &[u8], original_name: &str) -> Result<(), PortError> {
    let extension = original_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase());

    match extension {
        Some(ext) if ALLOWED_EXTENSIONS.contains(&ext.as_str()) => {}
        _ => {
            return Err(PortError::validation(format!(
                "Only {} files are allowed",
                ALLOWED_EXTENSIONS.join(", ").to_uppercase()
            )))
        }
    }

    if bytes.len() > MAX_DOCUMENT_BYTES {
        return Err(PortError::validation(format!(
            "File exceeds the maximum size of {} MB",
            MAX_DOCUMENT_BYTES / (1024 * 1024)
        )));
    }

    Ok(())
}

/// Port to the external blob store
#[async_trait]
pub trait DocumentStorePort: DomainPort {
    /// Stores the uploaded bytes and returns the reference to keep on the
    /// claim; rejects disallowed extensions and oversized files
    async fn store(
        &self,
        bytes: &[u8],
        original_name: &str,
    ) -> Result<SupportingDocument, PortError>;
}

/// In-memory mock implementation of DocumentStorePort for testing
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::RwLock;
    use uuid::Uuid;

    /// Mock store keeping documents in memory
    #[derive(Debug, Default)]
    pub struct MockDocumentStore {
        documents: Arc<RwLock<HashMap<String, Vec<u8>>>>,
    }

    impl MockDocumentStore {
        /// Creates a new mock store
        pub fn new() -> Self {
            Self::default()
        }

        /// Returns the stored bytes for a path, if any
        pub async fn bytes_at(&self, path: &str) -> Option<Vec<u8>> {
            self.documents.read().await.get(path).cloned()
        }
    }

    impl DomainPort for MockDocumentStore {}

    #[async_trait]
    impl DocumentStorePort for MockDocumentStore {
        async fn store(
            &self,
            bytes: &[u8],
            original_name: &str,
        ) -> Result<SupportingDocument, PortError> {
            validate_upload(bytes, original_name)?;

            let extension = original_name
                .rsplit_once('.')
                .map(|(_, ext)| ext.to_ascii_lowercase())
                .unwrap_or_default();
            let path = format!("/uploads/{}.{extension}", Uuid::new_v4());

            self.documents
                .write()
                .await
                .insert(path.clone(), bytes.to_vec());

            Ok(SupportingDocument {
                path,
                original_name: original_name.to_string(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::mock::MockDocumentStore;
    use super::*;

    #[test]
    fn test_allowed_extensions_are_case_insensitive() {
        assert!(validate_upload(b"x", "timesheet.pdf").is_ok());
        assert!(validate_upload(b"x", "timesheet.PDF").is_ok());
        assert!(validate_upload(b"x", "timesheet.Docx").is_ok());
        assert!(validate_upload(b"x", "timesheet.xlsx").is_ok());
    }

    #[test]
    fn test_disallowed_extensions_are_rejected() {
        assert!(validate_upload(b"x", "malware.exe").is_err());
        assert!(validate_upload(b"x", "archive.zip").is_err());
        assert!(validate_upload(b"x", "no_extension").is_err());
    }

    #[test]
    fn test_size_cap() {
        let at_cap = vec![0u8; MAX_DOCUMENT_BYTES];
        assert!(validate_upload(&at_cap, "big.pdf").is_ok());

        let over_cap = vec![0u8; MAX_DOCUMENT_BYTES + 1];
        assert!(validate_upload(&over_cap, "too_big.pdf").is_err());
    }

    #[tokio::test]
    async fn test_mock_store_round_trip() {
        let store = MockDocumentStore::new();
        let document = store.store(b"hello", "timesheet.pdf").await.unwrap();

        assert_eq!(document.original_name, "timesheet.pdf");
        assert!(document.path.starts_with("/uploads/"));
        assert!(document.path.ends_with(".pdf"));
        assert_eq!(store.bytes_at(&document.path).await.unwrap(), b"hello");
    }

    #[tokio::test]
    async fn test_mock_store_rejects_bad_upload() {
        let store = MockDocumentStore::new();
        let result = store.store(b"hello", "script.sh").await;
        assert!(result.is_err());
    }
}
