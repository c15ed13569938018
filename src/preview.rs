//! Revocable preview handles. Each handle is a private temporary file holding
//! a document's bytes, addressed by a `file://` URI the host viewer can open.

use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tempfile::NamedTempFile;

use crate::error::SignerError;
use crate::features::document::Document;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreviewHandle {
    id: u64,
    uri: String,
}

impl PreviewHandle {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }
}

pub struct PreviewRegistry {
    dir: Option<PathBuf>,
    live: BTreeMap<u64, NamedTempFile>,
    next_id: u64,
}

impl PreviewRegistry {
    pub const fn new() -> Self {
        Self {
            dir: None,
            live: BTreeMap::new(),
            next_id: 0,
        }
    }

    /// Directory for files created from now on; `None` uses the system temp dir.
    pub fn set_dir(&mut self, dir: Option<PathBuf>) {
        self.dir = dir;
    }

    pub fn create(&mut self, doc: &Document) -> Result<PreviewHandle, SignerError> {
        if doc.is_empty() {
            return Err(SignerError::Preview("empty_document".into()));
        }
        let mut builder = tempfile::Builder::new();
        builder.prefix("preview-").suffix(".pdf");
        let created = match &self.dir {
            Some(dir) => builder.tempfile_in(dir),
            None => builder.tempfile(),
        };
        let mut file = created.map_err(|e| SignerError::Preview(format!("create:{e}")))?;
        file.write_all(doc.bytes())
            .and_then(|_| file.flush())
            .map_err(|e| SignerError::Preview(format!("write:{e}")))?;

        self.next_id += 1;
        let handle = PreviewHandle {
            id: self.next_id,
            uri: file_uri(file.path()),
        };
        self.live.insert(handle.id, file);
        log::debug!("preview {} created at {}", handle.id, handle.uri);
        Ok(handle)
    }

    /// Delete the backing file. Returns false for unknown or already revoked handles.
    pub fn revoke(&mut self, handle: &PreviewHandle) -> bool {
        match self.live.remove(&handle.id) {
            Some(file) => {
                if let Err(e) = file.close() {
                    log::warn!("preview {} cleanup failed: {e}", handle.id);
                }
                true
            }
            None => false,
        }
    }

    pub fn revoke_all(&mut self) {
        let ids: Vec<u64> = self.live.keys().copied().collect();
        for id in ids {
            if let Some(file) = self.live.remove(&id) {
                if let Err(e) = file.close() {
                    log::warn!("preview {id} cleanup failed: {e}");
                }
            }
        }
    }

    pub fn resolve(&self, handle: &PreviewHandle) -> Option<&Path> {
        self.live.get(&handle.id).map(|f| f.path())
    }

    pub fn live_count(&self) -> usize {
        self.live.len()
    }
}

impl Default for PreviewRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn file_uri(path: &Path) -> String {
    format!("file://{}", path.display())
}
