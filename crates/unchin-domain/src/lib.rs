//! Fare domain: request and tariff models, rate lookup trait, and the
//! calculation services for each tariff scheme.

pub mod model;
pub mod repository;
pub mod service;

pub use model::*;
pub use repository::RateLookup;
