use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("Invalid field '{field}': {reason}")]
    InvalidField { field: &'static str, reason: String },
}

impl DomainError {
    pub fn invalid_field(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidField {
            field,
            reason: reason.into(),
        }
    }

    /// Name of the offending input field
    pub fn field(&self) -> &'static str {
        match self {
            DomainError::InvalidField { field, .. } => field,
        }
    }

    pub fn reason(&self) -> &str {
        match self {
            DomainError::InvalidField { reason, .. } => reason,
        }
    }
}
