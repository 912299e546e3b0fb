//! Input validation for the service layer.

use crate::types::{ServiceError, ServiceResult};

pub const NOTIFICATION_FIELD_MAX_CHARS: usize = 100;

pub const PHONE_REQUIRED_MESSAGE: &str =
    "Phone number is required when transfer to human is enabled";

pub struct Validator;

impl Validator {
    /// Rejects blank values.
    pub fn required(field: &str, value: &str) -> ServiceResult<()> {
        if value.trim().is_empty() {
            return Err(ServiceError::Validation(format!("{field} cannot be empty")));
        }
        Ok(())
    }

    /// Between 1 and `max` characters, counted as chars rather than bytes.
    pub fn bounded(field: &str, value: &str, max: usize) -> ServiceResult<()> {
        Self::required(field, value)?;

        if value.chars().count() > max {
            return Err(ServiceError::Validation(format!(
                "{field} too long (max {max} characters)"
            )));
        }
        Ok(())
    }

    /// Returns the trimmed phone number, or `None` when none was supplied.
    /// Enabling transfer-to-human without a number is rejected.
    pub fn transfer_phone(enabled: bool, phone: Option<&str>) -> ServiceResult<Option<String>> {
        let phone = phone
            .map(str::trim)
            .filter(|phone| !phone.is_empty())
            .map(str::to_string);

        if enabled && phone.is_none() {
            return Err(ServiceError::Validation(PHONE_REQUIRED_MESSAGE.to_string()));
        }
        Ok(phone)
    }
}
