use std::{io::ErrorKind, path::PathBuf};

use async_trait::async_trait;
use common::error::{AppError, Res};
use uuid::Uuid;

use crate::{DocumentStorage, StoredDocument, Upload, sanitize_file_name};

/// Writes documents below a directory that is served at `public_url`.
pub struct LocalStorage {
    root: PathBuf,
    public_url: String,
}

impl LocalStorage {
    pub fn new(root: PathBuf, public_url: String) -> Self {
        Self {
            root,
            public_url: public_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl DocumentStorage for LocalStorage {
    async fn upload(&self, folder: &str, upload: Upload) -> Res<StoredDocument> {
        let folder = folder.trim_matches('/');
        if folder.split('/').any(|part| part.is_empty() || part == "..") {
            return Err(AppError::Internal(format!("Invalid storage folder: {}", folder)));
        }

        let file_name = format!("{}-{}", Uuid::new_v4(), sanitize_file_name(&upload.file_name));
        let dir = self.root.join(folder);
        tokio::fs::create_dir_all(&dir).await?;
        tokio::fs::write(dir.join(&file_name), &upload.bytes).await?;

        let id = format!("{}/{}", folder, file_name);
        Ok(StoredDocument {
            url: format!("{}/{}", self.public_url, id),
            id,
        })
    }

    async fn delete(&self, document: &StoredDocument) -> Res<()> {
        match tokio::fs::remove_file(self.root.join(&document.id)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::from(e)),
        }
    }
}
