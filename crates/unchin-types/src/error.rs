//! Error types for unchin

use thiserror::Error;

use crate::types::FareScheme;

/// Failure reported by a rate table backend
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RateLookupError {
    #[error("Rate not found: {0}")]
    NotFound(String),

    #[error("Rate backend error: {0}")]
    Backend(String),
}

/// Failure of a single fare calculation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FareError {
    #[error("Invalid {field}: {value} (expected {expected})")]
    InvalidInput {
        field: &'static str,
        value: String,
        expected: &'static str,
    },

    #[error("{context}: {source}")]
    RateLookupFailed {
        context: &'static str,
        #[source]
        source: RateLookupError,
    },
}

impl FareError {
    pub fn invalid_input(
        field: &'static str,
        value: impl std::fmt::Display,
        expected: &'static str,
    ) -> Self {
        FareError::InvalidInput {
            field,
            value: value.to_string(),
            expected,
        }
    }

    pub fn lookup(context: &'static str, source: RateLookupError) -> Self {
        FareError::RateLookupFailed { context, source }
    }

    pub fn is_invalid_input(&self) -> bool {
        matches!(self, FareError::InvalidInput { .. })
    }

    pub fn is_rate_lookup_failure(&self) -> bool {
        matches!(self, FareError::RateLookupFailed { .. })
    }
}

/// A fare comparison aborted because one scheme failed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{scheme} fare calculation failed: {source}")]
pub struct ComparisonError {
    pub scheme: FareScheme,
    #[source]
    pub source: FareError,
}

impl ComparisonError {
    pub fn new(scheme: FareScheme, source: FareError) -> Self {
        Self { scheme, source }
    }

    pub fn is_invalid_input(&self) -> bool {
        self.source.is_invalid_input()
    }

    pub fn is_rate_lookup_failure(&self) -> bool {
        self.source.is_rate_lookup_failure()
    }
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration not found")]
    NotFound,

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Failed to save configuration: {0}")]
    SaveError(String),
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Fare error: {0}")]
    Fare(#[from] FareError),

    #[error("Comparison error: {0}")]
    Comparison(#[from] ComparisonError),

    #[error("Rate table error: {0}")]
    RateTable(String),

    #[error("File not found: {0}")]
    FileNotFound(String),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_names_field() {
        let err = FareError::invalid_input("distance_km", 0, "1 or more");
        assert_eq!(err.to_string(), "Invalid distance_km: 0 (expected 1 or more)");
        assert!(err.is_invalid_input());
        assert!(!err.is_rate_lookup_failure());
    }

    #[test]
    fn test_lookup_failure_keeps_source() {
        let err = FareError::lookup(
            "base fare lookup",
            RateLookupError::NotFound("region=3".to_string()),
        );
        assert!(err.is_rate_lookup_failure());
        let source = std::error::Error::source(&err).unwrap();
        assert_eq!(source.to_string(), "Rate not found: region=3");
    }

    #[test]
    fn test_comparison_error_names_scheme() {
        let err = ComparisonError::new(
            FareScheme::Time,
            FareError::invalid_input("driving_minutes", 0, "1 or more"),
        );
        assert!(err.to_string().starts_with("時間制 fare calculation failed"));
        assert!(err.is_invalid_input());
    }
}
