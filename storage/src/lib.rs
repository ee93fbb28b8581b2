use std::sync::Arc;

use async_trait::async_trait;
use common::{
    env_config::{StorageBackend, StorageConfig},
    error::Res,
};

pub mod cloudinary;
pub mod local;
pub mod memory;

/// Handle shared by every request handler.
pub type SharedStorage = Arc<dyn DocumentStorage>;

/// A file received from a client, held in memory until it is stored.
#[derive(Debug, Clone)]
pub struct Upload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Where a stored document ended up. `id` is what `delete` needs,
/// `url` is the permanent reference saved on the account.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredDocument {
    pub id: String,
    pub url: String,
}

#[async_trait]
pub trait DocumentStorage: Send + Sync {
    /// Stores the upload under `folder` and returns its reference.
    async fn upload(&self, folder: &str, upload: Upload) -> Res<StoredDocument>;

    /// Removes a previously stored document. Removing a missing document is not an error.
    async fn delete(&self, document: &StoredDocument) -> Res<()>;
}

/// Builds the storage backend selected in the configuration.
pub fn from_config(config: &StorageConfig) -> SharedStorage {
    match &config.backend {
        StorageBackend::Cloudinary {
            cloud_name,
            api_key,
            api_secret,
        } => Arc::new(cloudinary::CloudinaryStorage::new(
            cloud_name.clone(),
            api_key.clone(),
            api_secret.clone(),
        )),
        StorageBackend::Local { dir, public_url } => {
            Arc::new(local::LocalStorage::new(dir.into(), public_url.clone()))
        }
        StorageBackend::Memory => Arc::new(memory::MemoryStorage::new()),
    }
}

/// Deletes every document in `documents`, logging failures instead of
/// returning them. Used to undo uploads of a registration that did not complete.
pub async fn discard_all(storage: &dyn DocumentStorage, documents: &[StoredDocument]) {
    for document in documents {
        if let Err(e) = storage.delete(document).await {
            log::error!("Failed to discard stored document {}: {}", document.id, e);
        }
    }
}

/// Reduces a client file name to characters safe in a storage path.
pub(crate) fn sanitize_file_name(name: &str) -> String {
    let cleaned: String = name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    let cleaned = cleaned.trim_start_matches('.');
    if cleaned.is_empty() {
        "upload".to_string()
    } else {
        cleaned.to_string()
    }
}
