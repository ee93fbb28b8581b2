use common::{
    error::{AppError, Res},
    password::hash_password,
};
use db::{
    PHONE_NUMBER_TAKEN, dtos::driver::DriverCreateRequest, models::driver::Driver,
    store::AccountStore,
};
use storage::{DocumentStorage, StoredDocument, discard_all};

use crate::dtos::driver::DriverRegistration;

/// Registers a driver in `pending` status.
///
/// The phone number is checked before anything is uploaded, so a duplicate
/// registration never touches document storage. Documents are uploaded one
/// at a time; if an upload or the final insert fails, every document already
/// stored for this registration is deleted again before the error is returned.
///
/// # Arguments
///
/// * `store` - The account store.
/// * `storage` - Where the documents are kept.
/// * `folder_root` - Root folder for document paths.
/// * `registration` - The validated registration.
///
/// # Returns
///
/// The created `Driver`, or `AppError::Conflict` when the phone number is taken.
pub async fn register_driver(
    store: &dyn AccountStore,
    storage: &dyn DocumentStorage,
    folder_root: &str,
    registration: DriverRegistration,
) -> Res<Driver> {
    if store
        .exists_driver_by_phone(&registration.phone_number)
        .await?
    {
        return Err(AppError::Conflict(PHONE_NUMBER_TAKEN.to_string()));
    }

    let password_hash = hash_password(&registration.password)?;

    let mut stored: Vec<StoredDocument> = Vec::with_capacity(3);
    for (kind, upload) in registration.documents.into_ordered() {
        match storage.upload(&kind.folder_path(folder_root), upload).await {
            Ok(document) => stored.push(document),
            Err(e) => {
                log::error!("Upload of {} failed: {}", kind.field_name(), e);
                discard_all(storage, &stored).await;
                return Err(e);
            }
        }
    }

    let Ok([profile, front, license]) = <[StoredDocument; 3]>::try_from(stored.clone()) else {
        discard_all(storage, &stored).await;
        return Err(AppError::Internal(
            "Expected three stored documents".to_string(),
        ));
    };

    let request = DriverCreateRequest {
        first_name: registration.first_name,
        last_name: registration.last_name,
        phone_number: registration.phone_number,
        dob: registration.dob,
        email: registration.email,
        license_number: registration.license_number,
        vehicle_model: registration.vehicle_model,
        profile_picture: profile.url,
        vehicle_front_picture: front.url,
        license_certificate: license.url,
        password_hash,
    };

    match store.insert_driver(request).await {
        Ok(driver) => {
            log::info!("Driver {} registered, awaiting approval", driver.id);
            Ok(driver)
        }
        Err(e) => {
            discard_all(storage, &stored).await;
            Err(e)
        }
    }
}
