use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single validation error with a positional field key and message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    /// Positional path to the invalid field (e.g. "records[2].ncf").
    ///
    /// This is the stable identifier for programmatic handling.
    pub field: String,
    /// User-facing description (Spanish).
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl ValidationError {
    /// Create a validation error.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create an error for field `name` of the record at `index`.
    pub fn at(index: usize, name: &str, message: impl Into<String>) -> Self {
        Self::new(format!("records[{index}].{name}"), message)
    }

    /// Index of the offending record, parsed back from the field key.
    pub fn record_index(&self) -> Option<usize> {
        let rest = self.field.strip_prefix("records[")?;
        let end = rest.find(']')?;
        rest[..end].parse().ok()
    }
}

/// Month outside 1..=12.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid period {month}/{year}: month must be between 1 and 12")]
pub struct InvalidPeriod {
    pub month: u32,
    pub year: i32,
}

/// A date string that is not ISO-like (`YYYY-MM-DD[Thh:mm:ss...]`).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid ISO date '{0}'")]
pub struct InvalidDate(pub String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positional_field_key() {
        let err = ValidationError::at(3, "ncf", "NCF inválido");
        assert_eq!(err.field, "records[3].ncf");
        assert_eq!(err.record_index(), Some(3));
        assert_eq!(err.to_string(), "records[3].ncf: NCF inválido");
    }

    #[test]
    fn record_index_absent_for_free_form_keys() {
        assert_eq!(ValidationError::new("period", "x").record_index(), None);
    }
}
