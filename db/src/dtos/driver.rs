use chrono::NaiveDate;

pub struct DriverCreateRequest {
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    pub dob: NaiveDate,
    pub email: Option<String>,
    pub license_number: String,
    pub vehicle_model: String,
    pub profile_picture: String,
    pub vehicle_front_picture: String,
    pub license_certificate: String,
    pub password_hash: String,
}
