use serde::{Deserialize, Serialize};
use validator::ValidateEmail;

use crate::domain::errors::DomainError;

const MAX_EMAIL_LENGTH: usize = 254;

/// Validated e-mail address
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let trimmed = raw.trim();

        if trimmed.is_empty() {
            return Err(DomainError::invalid_field("email", "empty email"));
        }

        if trimmed.len() > MAX_EMAIL_LENGTH {
            return Err(DomainError::invalid_field(
                "email",
                format!("email must be at most {MAX_EMAIL_LENGTH} characters long"),
            ));
        }

        if !trimmed.validate_email() {
            return Err(DomainError::invalid_field("email", "invalid email address"));
        }

        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Email {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Email> for String {
    fn from(email: Email) -> Self {
        email.0
    }
}

impl std::fmt::Display for Email {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
