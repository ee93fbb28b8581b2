use std::collections::HashMap;

use actix_multipart::{Field, Multipart};
use actix_web::web::BytesMut;
use common::error::{AppError, Res};
use futures::StreamExt;
use storage::Upload;

use super::documents::DocumentKind;

/// Text fields accepted by the driver registration form.
pub const TEXT_FIELDS: [&str; 8] = [
    "firstName",
    "lastName",
    "password",
    "phoneNumber",
    "dob",
    "email",
    "licenseNumber",
    "vehicleModel",
];

const MAX_TEXT_FIELD_BYTES: usize = 1024;

/// Raw multipart content, before any business validation.
#[derive(Debug, Default)]
pub struct RegistrationForm {
    pub fields: HashMap<String, String>,
    pub documents: HashMap<DocumentKind, Upload>,
}

/// Drains the multipart payload. Unknown fields, oversized parts and
/// malformed payloads are validation errors. Empty file parts count as absent.
pub async fn read_registration_form(
    mut payload: Multipart,
    max_file_bytes: usize,
) -> Res<RegistrationForm> {
    let mut form = RegistrationForm::default();

    while let Some(item) = payload.next().await {
        let mut field = item.map_err(invalid_payload)?;
        let name = field
            .name()
            .map(str::to_owned)
            .ok_or_else(|| AppError::Validation("Form field without a name".to_string()))?;

        if let Some(kind) = DocumentKind::from_field_name(&name) {
            let file_name = field
                .content_disposition()
                .and_then(|cd| cd.get_filename())
                .unwrap_or(kind.field_name())
                .to_owned();
            let content_type = field
                .content_type()
                .map(|mime| mime.essence_str().to_owned())
                .unwrap_or_default();
            let bytes = read_field(&mut field, max_file_bytes, &name).await?;
            if bytes.is_empty() {
                continue;
            }
            form.documents.insert(
                kind,
                Upload {
                    file_name,
                    content_type,
                    bytes,
                },
            );
        } else if TEXT_FIELDS.contains(&name.as_str()) {
            let bytes = read_field(&mut field, MAX_TEXT_FIELD_BYTES, &name).await?;
            let value = String::from_utf8(bytes)
                .map_err(|_| AppError::Validation(format!("{} must be valid UTF-8 text", name)))?;
            form.fields.insert(name, value);
        } else {
            return Err(AppError::Validation(format!("Unexpected field: {}", name)));
        }
    }

    Ok(form)
}

async fn read_field(field: &mut Field, limit: usize, name: &str) -> Res<Vec<u8>> {
    let mut buf = BytesMut::new();
    while let Some(chunk) = field.next().await {
        let chunk = chunk.map_err(invalid_payload)?;
        if buf.len() + chunk.len() > limit {
            return Err(AppError::Validation(format!(
                "{} exceeds the {} byte limit",
                name, limit
            )));
        }
        buf.extend_from_slice(&chunk);
    }
    Ok(buf.to_vec())
}

fn invalid_payload(err: actix_multipart::MultipartError) -> AppError {
    AppError::Validation(format!("Invalid multipart payload: {}", err))
}
