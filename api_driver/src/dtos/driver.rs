use chrono::NaiveDate;
use common::{
    error::{AppError, Res},
    validation::{parse_dob, require_fields, validate_email, validate_password, validate_phone_number},
};
use db::models::driver::Driver;
use serde::Serialize;
use storage::Upload;

use crate::misc::{documents::DocumentKind, form::RegistrationForm};

/// A driver registration that passed boundary validation.
#[derive(Debug)]
pub struct DriverRegistration {
    pub first_name: String,
    pub last_name: String,
    pub password: String,
    pub phone_number: String,
    pub dob: NaiveDate,
    pub email: Option<String>,
    pub license_number: String,
    pub vehicle_model: String,
    pub documents: DriverDocuments,
}

#[derive(Debug)]
pub struct DriverDocuments {
    pub profile_picture: Upload,
    pub vehicle_front_picture: Upload,
    pub license_certificate_picture: Upload,
}

impl DriverDocuments {
    /// Documents paired with their kind, in upload order.
    pub fn into_ordered(self) -> [(DocumentKind, Upload); 3] {
        [
            (DocumentKind::ProfilePicture, self.profile_picture),
            (DocumentKind::VehicleFrontPicture, self.vehicle_front_picture),
            (
                DocumentKind::LicenseCertificatePicture,
                self.license_certificate_picture,
            ),
        ]
    }
}

impl TryFrom<RegistrationForm> for DriverRegistration {
    type Error = AppError;

    fn try_from(mut form: RegistrationForm) -> Res<Self> {
        let text = |name: &str| {
            form.fields
                .get(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let first_name = text("firstName");
        let last_name = text("lastName");
        let phone_number = text("phoneNumber");
        let dob = text("dob");
        let email = text("email");
        let license_number = text("licenseNumber");
        let vehicle_model = text("vehicleModel");
        let password = form
            .fields
            .get("password")
            .filter(|value| !value.trim().is_empty())
            .cloned();

        require_fields(&[
            ("firstName", first_name.as_deref()),
            ("lastName", last_name.as_deref()),
            ("password", password.as_deref()),
            ("phoneNumber", phone_number.as_deref()),
            ("dob", dob.as_deref()),
            ("licenseNumber", license_number.as_deref()),
            ("vehicleModel", vehicle_model.as_deref()),
        ])?;

        let mut take_document = |kind: DocumentKind| -> Res<Upload> {
            let upload = form
                .documents
                .remove(&kind)
                .ok_or_else(|| AppError::Validation("All files are required".to_string()))?;
            if !upload.content_type.starts_with("image/") {
                return Err(AppError::Validation(format!(
                    "{} must be an image",
                    kind.field_name()
                )));
            }
            Ok(upload)
        };
        let documents = DriverDocuments {
            profile_picture: take_document(DocumentKind::ProfilePicture)?,
            vehicle_front_picture: take_document(DocumentKind::VehicleFrontPicture)?,
            license_certificate_picture: take_document(DocumentKind::LicenseCertificatePicture)?,
        };

        let phone_number = phone_number.unwrap_or_default();
        let password = password.unwrap_or_default();
        validate_phone_number(&phone_number)?;
        validate_password(&password)?;
        let dob = parse_dob(&dob.unwrap_or_default())?;
        if let Some(email) = &email {
            validate_email(email)?;
        }

        Ok(DriverRegistration {
            first_name: first_name.unwrap_or_default(),
            last_name: last_name.unwrap_or_default(),
            password,
            phone_number,
            dob,
            email,
            license_number: license_number.unwrap_or_default(),
            vehicle_model: vehicle_model.unwrap_or_default(),
            documents,
        })
    }
}

/// Driver returned together with a status message. Never carries the password hash.
#[derive(Debug, Serialize)]
pub struct DriverResponse {
    pub message: String,
    pub driver: Driver,
}

#[derive(Debug, Serialize)]
pub struct DriverRosterResponse {
    pub count: usize,
    pub drivers: Vec<Driver>,
}

#[derive(Debug, Serialize)]
pub struct CurrentDriverResponse {
    pub driver: Driver,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(name: &str) -> Upload {
        Upload {
            file_name: name.to_string(),
            content_type: "image/jpeg".to_string(),
            bytes: vec![0xff, 0xd8, 0xff],
        }
    }

    fn complete_form() -> RegistrationForm {
        let mut form = RegistrationForm::default();
        for (name, value) in [
            ("firstName", "Bilal"),
            ("lastName", "Khan"),
            ("password", "hunter22"),
            ("phoneNumber", "03001234567"),
            ("dob", "17/05/1990"),
            ("licenseNumber", "LHR-22-4411"),
            ("vehicleModel", "Suzuki Cultus"),
        ] {
            form.fields.insert(name.to_string(), value.to_string());
        }
        for kind in DocumentKind::ALL {
            form.documents.insert(kind, image(kind.field_name()));
        }
        form
    }

    #[test]
    fn accepts_a_complete_form() {
        let registration = DriverRegistration::try_from(complete_form()).unwrap();
        assert_eq!(registration.first_name, "Bilal");
        assert_eq!(registration.dob, NaiveDate::from_ymd_opt(1990, 5, 17).unwrap());
        assert_eq!(registration.email, None);
        assert_eq!(
            registration.documents.vehicle_front_picture.file_name,
            "vehicleFrontPicture"
        );
    }

    #[test]
    fn lists_every_missing_text_field() {
        let mut form = complete_form();
        form.fields.remove("licenseNumber");
        form.fields.insert("lastName".to_string(), "  ".to_string());
        let err = DriverRegistration::try_from(form).unwrap_err();
        assert_eq!(err.to_string(), "Details missing: lastName, licenseNumber");
    }

    #[test]
    fn requires_all_three_documents() {
        let mut form = complete_form();
        form.documents.remove(&DocumentKind::LicenseCertificatePicture);
        let err = DriverRegistration::try_from(form).unwrap_err();
        assert_eq!(err.to_string(), "All files are required");
    }

    #[test]
    fn documents_must_be_images() {
        let mut form = complete_form();
        form.documents.insert(
            DocumentKind::ProfilePicture,
            Upload {
                file_name: "cv.pdf".to_string(),
                content_type: "application/pdf".to_string(),
                bytes: vec![1],
            },
        );
        let err = DriverRegistration::try_from(form).unwrap_err();
        assert_eq!(err.to_string(), "profilePicture must be an image");
    }

    #[test]
    fn validates_formats() {
        let mut form = complete_form();
        form.fields.insert("phoneNumber".to_string(), "12345".to_string());
        assert!(DriverRegistration::try_from(form).is_err());

        let mut form = complete_form();
        form.fields.insert("email".to_string(), "not-an-email".to_string());
        assert_eq!(
            DriverRegistration::try_from(form).unwrap_err().to_string(),
            "Invalid email format"
        );
    }
}
