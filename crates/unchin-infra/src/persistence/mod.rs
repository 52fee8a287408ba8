//! Persistence implementations
//!
//! File-based implementations of the `RateLookup` repository trait.

mod file_rate_table_repo;

pub use file_rate_table_repo::FileRateTableRepository;
