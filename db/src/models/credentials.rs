use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct AuthCredentials {
    pub account_id: Uuid,
    pub password_hash: String,
}
