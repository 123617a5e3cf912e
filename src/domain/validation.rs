//! Pure validation rules for adverts and user credentials
//!
//! Nothing in here touches the network or the disk; every function is
//! deterministic given its input, so callers can run it before any side
//! effect happens.

use rust_decimal::Decimal;

use crate::domain::errors::DomainError;

/// Minimum number of images an advert must carry
pub const MIN_IMAGES: usize = 1;
/// Maximum number of images an advert may carry
pub const MAX_IMAGES: usize = 7;

pub const MIN_PASSWORD_LENGTH: usize = 6;
pub const MAX_PASSWORD_LENGTH: usize = 18;

/// Advert fields after validation and normalization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedAdvert {
    pub title: String,
    pub description: String,
    pub price: Decimal,
}

/// Validate advert input in the order title, price, images.
///
/// Title and description come back trimmed of surrounding whitespace.
pub fn validate_advert(
    title: &str,
    description: &str,
    price: Decimal,
    image_count: usize,
) -> Result<ValidatedAdvert, DomainError> {
    let title = validate_title(title)?;
    validate_price(&price)?;
    validate_image_count(image_count)?;

    Ok(ValidatedAdvert {
        title,
        description: description.trim().to_string(),
        price,
    })
}

/// Returns the trimmed title, or an error when nothing is left after trimming
pub fn validate_title(title: &str) -> Result<String, DomainError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(DomainError::invalid_field("title", "empty title"));
    }
    Ok(trimmed.to_string())
}

/// Zero is a valid price.
pub fn validate_price(price: &Decimal) -> Result<(), DomainError> {
    if price.is_sign_negative() && !price.is_zero() {
        return Err(DomainError::invalid_field("price", "negative price"));
    }
    Ok(())
}

pub fn validate_image_count(count: usize) -> Result<(), DomainError> {
    if count < MIN_IMAGES {
        return Err(DomainError::invalid_field("images", "no images"));
    }
    if count > MAX_IMAGES {
        return Err(DomainError::invalid_field(
            "images",
            format!("max number of images is {MAX_IMAGES}"),
        ));
    }
    Ok(())
}

/// Password policy applied at sign-up
pub fn validate_password(password: &str) -> Result<(), DomainError> {
    let length = password.chars().count();

    if length < MIN_PASSWORD_LENGTH {
        return Err(DomainError::invalid_field(
            "password",
            format!("min password length is {MIN_PASSWORD_LENGTH}"),
        ));
    }
    if length > MAX_PASSWORD_LENGTH {
        return Err(DomainError::invalid_field(
            "password",
            format!("max password length is {MAX_PASSWORD_LENGTH}"),
        ));
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err(DomainError::invalid_field(
            "password",
            "password must contain at least 1 digit",
        ));
    }
    if password.contains(' ') {
        return Err(DomainError::invalid_field(
            "password",
            "password must not contain a space symbol",
        ));
    }
    if !password.chars().any(char::is_uppercase) {
        return Err(DomainError::invalid_field(
            "password",
            "password must contain at least 1 upper case symbol",
        ));
    }
    if !password.chars().any(char::is_lowercase) {
        return Err(DomainError::invalid_field(
            "password",
            "password must contain at least 1 lower case symbol",
        ));
    }

    Ok(())
}
