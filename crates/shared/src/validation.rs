//! Common validation utilities used by `validator` derives.

use validator::ValidationError;

use crate::money::Money;

lazy_static::lazy_static! {
    static ref HEX_COLOR_REGEX: regex::Regex =
        regex::Regex::new(r"^#[0-9A-Fa-f]{6}$").unwrap();
    static ref USERNAME_REGEX: regex::Regex =
        regex::Regex::new(r"^[A-Za-z0-9@.+_-]{1,150}$").unwrap();
}

/// Validates a `#RRGGBB` color string.
pub fn validate_hex_color(color: &str) -> Result<(), ValidationError> {
    if HEX_COLOR_REGEX.is_match(color) {
        Ok(())
    } else {
        let mut err = ValidationError::new("hex_color");
        err.message = Some("Color must be in #RRGGBB format".into());
        Err(err)
    }
}

/// Validates a username: 1-150 characters of letters, digits and `@.+-_`.
pub fn validate_username(username: &str) -> Result<(), ValidationError> {
    if USERNAME_REGEX.is_match(username) {
        Ok(())
    } else {
        let mut err = ValidationError::new("username");
        err.message = Some(
            "Username may contain only letters, digits and @/./+/-/_ (max 150)".into(),
        );
        Err(err)
    }
}

/// Validates that a price is not negative.
pub fn validate_price(price: &Money) -> Result<(), ValidationError> {
    if price.is_negative() {
        let mut err = ValidationError::new("price_range");
        err.message = Some("Price cannot be negative".into());
        Err(err)
    } else {
        Ok(())
    }
}

/// Validates that a string is not blank after trimming.
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("Value cannot be blank".into());
        Err(err)
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_color() {
        assert!(validate_hex_color("#FF0000").is_ok());
        assert!(validate_hex_color("#ffffff").is_ok());
        assert!(validate_hex_color("FF0000").is_err());
        assert!(validate_hex_color("#FFF").is_err());
        assert!(validate_hex_color("#GG0000").is_err());
    }

    #[test]
    fn test_username() {
        assert!(validate_username("rocky.balboa+1@philly").is_ok());
        assert!(validate_username("").is_err());
        assert!(validate_username("has space").is_err());
        assert!(validate_username(&"a".repeat(151)).is_err());
    }

    #[test]
    fn test_price() {
        assert!(validate_price(&Money::from_cents(0)).is_ok());
        assert!(validate_price(&Money::from_cents(4999)).is_ok());
        assert!(validate_price(&Money::from_cents(-1)).is_err());
    }

    #[test]
    fn test_not_blank() {
        assert!(validate_not_blank("Boxing 101").is_ok());
        assert!(validate_not_blank("   ").is_err());
    }

    #[test]
    fn test_error_carries_message() {
        let err = validate_hex_color("red").unwrap_err();
        assert_eq!(err.code, "hex_color");
        assert!(err.message.is_some());
    }
}
