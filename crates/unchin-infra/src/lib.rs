//! Infrastructure layer: rate table loading and file-backed `RateLookup`

pub mod distance_fare_csv;
pub mod persistence;
pub mod rate_table;
pub mod rate_table_loader;

pub use distance_fare_csv::{load_distance_fares_csv, DistanceFareCsvError};
pub use persistence::FileRateTableRepository;
pub use rate_table::{DistanceFareRow, RateTable, RegionTimeTariff};
pub use rate_table_loader::RateTableLoader;
