use chrono::NaiveDate;

pub struct PassengerCreateRequest {
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    pub dob: NaiveDate,
    pub email: String,
    pub password_hash: String,
}
