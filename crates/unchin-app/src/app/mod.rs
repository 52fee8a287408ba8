//! Application Layer
//!
//! Orchestrates between the CLI and the domain/infrastructure layers:
//! - `fare_service`: request assembly and the fare comparison use case
//! - `rate_service`: rate table inspection and billing distances

pub mod fare_service;
pub mod rate_service;

pub use fare_service::{
    build_request, compare_fares, compare_with, departure_flags, FareQuery, FareServiceError,
};
pub use rate_service::{billing_distance, rate_summary, RateSummary, RoundedDistance};
