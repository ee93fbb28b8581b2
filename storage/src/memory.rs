use async_trait::async_trait;
use common::error::Res;
use dashmap::DashMap;
use uuid::Uuid;

use crate::{DocumentStorage, StoredDocument, Upload};

/// Keeps documents in process memory. Handy for local runs and tests.
#[derive(Default)]
pub struct MemoryStorage {
    documents: DashMap<String, Upload>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn contains(&self, document: &StoredDocument) -> bool {
        self.documents.contains_key(&document.id)
    }
}

#[async_trait]
impl DocumentStorage for MemoryStorage {
    async fn upload(&self, folder: &str, upload: Upload) -> Res<StoredDocument> {
        let id = format!("{}/{}", folder, Uuid::new_v4());
        let url = format!("memory://{}", id);
        self.documents.insert(id.clone(), upload);
        Ok(StoredDocument { id, url })
    }

    async fn delete(&self, document: &StoredDocument) -> Res<()> {
        self.documents.remove(&document.id);
        Ok(())
    }
}
