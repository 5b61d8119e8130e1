use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::info;

use super::{BlobError, BlobRef, BlobStore};

/// Stores documents in a local directory; the durable URL is a `file://` link.
/// A parent folder becomes a subdirectory.
#[derive(Debug, Clone)]
pub struct LocalBlobStore {
    root: PathBuf,
}

impl LocalBlobStore {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    async fn free_name(dir: &Path, name: &str) -> Result<String, BlobError> {
        if !fs::try_exists(dir.join(name)).await? {
            return Ok(name.to_string());
        }
        let (stem, ext) = match name.rsplit_once('.') {
            Some((stem, ext)) if !stem.is_empty() => (stem, format!(".{ext}")),
            _ => (name, String::new()),
        };
        let mut n = 1;
        loop {
            let candidate = format!("{stem}-{n}{ext}");
            if !fs::try_exists(dir.join(&candidate)).await? {
                return Ok(candidate);
            }
            n += 1;
        }
    }
}

#[async_trait]
impl BlobStore for LocalBlobStore {
    async fn upload(
        &self,
        bytes: Vec<u8>,
        suggested_name: &str,
        content_type: &str,
        parent_folder: Option<String>,
    ) -> Result<BlobRef, BlobError> {
        let dir = match parent_folder.as_deref() {
            Some(folder) => self.root.join(sanitize_file_name(folder)),
            None => self.root.clone(),
        };
        fs::create_dir_all(&dir).await?;

        let name = Self::free_name(&dir, &sanitize_file_name(suggested_name)).await?;
        let path = dir.join(&name);
        fs::write(&path, &bytes).await?;

        let absolute = fs::canonicalize(&path).await?;
        info!(
            path = %absolute.display(),
            bytes = bytes.len(),
            content_type,
            "Stored document locally"
        );
        Ok(BlobRef {
            url: format!("file://{}", absolute.display()),
            name,
        })
    }
}

/// Replaces characters that would escape the target directory or break the
/// interview cell encoding.
pub fn sanitize_file_name(name: &str) -> String {
    let cleaned: String = name
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | ';' | '|' | '\0' => '_',
            other => other,
        })
        .collect();
    match cleaned.trim_matches('.') {
        "" => "document".to_string(),
        _ => cleaned,
    }
}
