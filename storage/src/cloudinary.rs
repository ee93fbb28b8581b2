use async_trait::async_trait;
use chrono::Utc;
use common::error::{AppError, Res};
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use sha2::{Digest, Sha256};

use crate::{DocumentStorage, StoredDocument, Upload};

const API_BASE: &str = "https://api.cloudinary.com/v1_1";

/// Signed uploads to a Cloudinary cloud.
pub struct CloudinaryStorage {
    client: reqwest::Client,
    cloud_name: String,
    api_key: String,
    api_secret: String,
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    public_id: String,
    secure_url: String,
}

#[derive(Debug, Deserialize)]
struct DestroyResponse {
    result: String,
}

impl CloudinaryStorage {
    pub fn new(cloud_name: String, api_key: String, api_secret: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            cloud_name,
            api_key,
            api_secret,
        }
    }

    fn endpoint(&self, action: &str) -> String {
        format!("{}/{}/image/{}", API_BASE, self.cloud_name, action)
    }

    /// Signature over the request parameters: sorted `key=value` pairs joined
    /// with `&`, followed by the API secret, hashed with SHA-256.
    fn sign(&self, params: &[(&str, &str)]) -> String {
        let mut params = params.to_vec();
        params.sort_by_key(|(key, _)| *key);
        let payload = params
            .iter()
            .map(|(key, value)| format!("{}={}", key, value))
            .collect::<Vec<_>>()
            .join("&");

        let mut hasher = Sha256::new();
        hasher.update(payload.as_bytes());
        hasher.update(self.api_secret.as_bytes());
        hex::encode(hasher.finalize())
    }
}

#[async_trait]
impl DocumentStorage for CloudinaryStorage {
    async fn upload(&self, folder: &str, upload: Upload) -> Res<StoredDocument> {
        let timestamp = Utc::now().timestamp().to_string();
        let signature = self.sign(&[("folder", folder), ("timestamp", timestamp.as_str())]);

        let file = Part::bytes(upload.bytes)
            .file_name(upload.file_name)
            .mime_str(&upload.content_type)?;
        let form = Form::new()
            .part("file", file)
            .text("api_key", self.api_key.clone())
            .text("folder", folder.to_string())
            .text("timestamp", timestamp)
            .text("signature_algorithm", "sha256")
            .text("signature", signature);

        let response = self
            .client
            .post(self.endpoint("upload"))
            .multipart(form)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AppError::Internal(format!(
                "Cloudinary upload returned error status: {}",
                response.status()
            )));
        }

        let body: UploadResponse = response.json().await?;
        Ok(StoredDocument {
            id: body.public_id,
            url: body.secure_url,
        })
    }

    async fn delete(&self, document: &StoredDocument) -> Res<()> {
        let timestamp = Utc::now().timestamp().to_string();
        let signature = self.sign(&[
            ("public_id", document.id.as_str()),
            ("timestamp", timestamp.as_str()),
        ]);

        let response = self
            .client
            .post(self.endpoint("destroy"))
            .form(&[
                ("public_id", document.id.as_str()),
                ("api_key", self.api_key.as_str()),
                ("timestamp", timestamp.as_str()),
                ("signature_algorithm", "sha256"),
                ("signature", signature.as_str()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AppError::Internal(format!(
                "Cloudinary destroy returned error status: {}",
                response.status()
            )));
        }

        let body: DestroyResponse = response.json().await?;
        match body.result.as_str() {
            "ok" | "not found" => Ok(()),
            other => Err(AppError::Internal(format!(
                "Cloudinary destroy failed: {}",
                other
            ))),
        }
    }
}
