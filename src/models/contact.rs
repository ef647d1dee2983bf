use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct ContactMessageDto {
    #[validate(length(min = 3, message = "Name must be at least 3 characters long"))]
    #[serde(default)]
    pub name: String,
    #[validate(email(message = "Invalid email address"))]
    #[serde(default)]
    pub email: String,
    #[validate(length(min = 3, message = "Subject must be at least 3 characters long"))]
    #[serde(default)]
    pub subject: String,
    #[validate(length(min = 10, message = "Message must be at least 10 characters long"))]
    #[serde(default)]
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_well_formed_message() {
        let msg = ContactMessageDto {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            subject: "Hey".to_string(),
            message: "Loved the last article.".to_string(),
        };
        assert!(msg.validate().is_ok());
    }

    #[test]
    fn reports_every_bad_field() {
        let msg = ContactMessageDto {
            name: "Al".to_string(),
            email: "not-an-email".to_string(),
            subject: "".to_string(),
            message: "too short".to_string(),
        };
        let errors = msg.validate().unwrap_err();
        let fields = errors.field_errors();
        for field in ["name", "email", "subject", "message"] {
            assert!(fields.contains_key(field), "{field} should fail");
        }
    }
}
