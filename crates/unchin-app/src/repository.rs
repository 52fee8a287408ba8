//! Rate repository wiring

use tracing::debug;
use unchin_infra::FileRateTableRepository;
use unchin_types::Result;

use crate::config::Config;

/// Open the rate table named in the config, or the built-in one
pub fn open_rate_repository(config: &Config) -> Result<FileRateTableRepository> {
    debug!(
        rate_table = ?config.rate_table,
        distance_fare_csv = ?config.distance_fare_csv,
        "opening rate repository"
    );
    FileRateTableRepository::open(config.rate_table.clone(), config.distance_fare_csv.clone())
}
