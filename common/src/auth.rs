use serde::Deserialize;

use crate::{error::Res, validation::require_fields};

/// Body of `POST /api/{role}/login`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct LoginRequest {
    pub phone_number: Option<String>,
    pub password: Option<String>,
}

/// Login input after the presence check. The phone number is only trimmed;
/// a malformed number is simply one that no account has.
#[derive(Debug, Clone)]
pub struct PhoneCredentials {
    pub phone_number: String,
    pub password: String,
}

impl LoginRequest {
    pub fn into_credentials(self) -> Res<PhoneCredentials> {
        require_fields(&[
            ("phoneNumber", self.phone_number.as_deref()),
            ("password", self.password.as_deref()),
        ])?;
        let phone_number = self.phone_number.unwrap_or_default().trim().to_string();
        Ok(PhoneCredentials {
            phone_number,
            password: self.password.unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_are_named() {
        let err = LoginRequest {
            phone_number: Some("03001234567".to_string()),
            password: None,
        }
        .into_credentials()
        .unwrap_err();
        assert_eq!(err.to_string(), "Details missing: password");
    }

    #[test]
    fn trims_phone_number_but_not_password() {
        let credentials = LoginRequest {
            phone_number: Some(" 03001234567 ".to_string()),
            password: Some(" secret ".to_string()),
        }
        .into_credentials()
        .unwrap();
        assert_eq!(credentials.phone_number, "03001234567");
        assert_eq!(credentials.password, " secret ");
    }

    #[test]
    fn phone_format_is_left_to_the_lookup() {
        let credentials = LoginRequest {
            phone_number: Some("0300123".to_string()),
            password: Some("secret".to_string()),
        }
        .into_credentials()
        .unwrap();
        assert_eq!(credentials.phone_number, "0300123");
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let parsed = serde_json::from_str::<LoginRequest>(
            r#"{"phoneNumber":"03001234567","password":"secret","role":"admin"}"#,
        );
        assert!(parsed.is_err());
    }
}
