//! Rejected configuration and malformed stored values

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ValidationError {
    /// The website list cannot be used as configured
    #[error("Invalid website configuration: {message}")]
    InvalidConfiguration { message: String },

    /// A value read back from storage is outside its known range
    #[error("Unexpected {parameter}: {reason}")]
    InvalidParameter { parameter: String, reason: String },
}

impl ValidationError {
    pub fn invalid_configuration(message: &str) -> Self {
        Self::InvalidConfiguration {
            message: message.to_string(),
        }
    }

    pub fn invalid_parameter(parameter: &str, reason: &str) -> Self {
        Self::InvalidParameter {
            parameter: parameter.to_string(),
            reason: reason.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_message() {
        let error = ValidationError::invalid_configuration("store 3 belongs to websites 1 and 2");
        assert_eq!(
            error.to_string(),
            "Invalid website configuration: store 3 belongs to websites 1 and 2"
        );
    }

    #[test]
    fn test_stored_value_message() {
        let error = ValidationError::invalid_parameter("import_status", "unknown status code 9");
        assert_eq!(
            error.to_string(),
            "Unexpected import_status: unknown status code 9"
        );
    }
}
