//! Input parsing shared by the use cases and the HTTP layer

use std::str::FromStr;

use crate::domain::errors::DomainError;

/// Parse a caller-supplied identifier, reporting failures against field `id`
pub fn parse_id<T>(raw: &str) -> Result<T, DomainError>
where
    T: FromStr<Err = uuid::Error>,
{
    raw.parse::<T>()
        .map_err(|e| DomainError::invalid_field("id", e.to_string()))
}
