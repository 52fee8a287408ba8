//! File-based implementation of RateLookup
//!
//! The time tariff comes from a TOML file when one is given, else the
//! built-in standard table. Distance fares from a CSV file are merged on top.

use std::path::{Path, PathBuf};

use tracing::info;
use unchin_domain::model::{AkabouTariff, TimeBaseFare};
use unchin_domain::RateLookup;
use unchin_types::{Error, HoursSystem, RateLookupError, Region, Result, SurchargeKind, TruckTier, Yen};

use crate::distance_fare_csv::load_distance_fares_csv;
use crate::rate_table::RateTable;
use crate::rate_table_loader::RateTableLoader;

/// Rate table bound to its source files
pub struct FileRateTableRepository {
    toml_path: Option<PathBuf>,
    csv_path: Option<PathBuf>,
    table: RateTable,
}

impl FileRateTableRepository {
    pub fn open(toml_path: Option<PathBuf>, csv_path: Option<PathBuf>) -> Result<Self> {
        let table = load(toml_path.as_deref(), csv_path.as_deref())?;
        Ok(Self {
            toml_path,
            csv_path,
            table,
        })
    }

    /// Built-in standard time tariff only
    pub fn standard() -> Result<Self> {
        Self::open(None, None)
    }

    pub fn toml_path(&self) -> Option<&Path> {
        self.toml_path.as_deref()
    }

    pub fn csv_path(&self) -> Option<&Path> {
        self.csv_path.as_deref()
    }

    pub fn table(&self) -> &RateTable {
        &self.table
    }

    pub fn akabou_tariff(&self) -> &AkabouTariff {
        self.table.akabou()
    }

    /// Reload data from the source files
    pub fn reload(&mut self) -> Result<()> {
        self.table = load(self.toml_path.as_deref(), self.csv_path.as_deref())?;
        Ok(())
    }
}

fn load(toml_path: Option<&Path>, csv_path: Option<&Path>) -> Result<RateTable> {
    let mut table = match toml_path {
        Some(path) => RateTableLoader::load_from_file(path)?,
        None => RateTableLoader::standard()?,
    };

    if let Some(path) = csv_path {
        if !path.exists() {
            return Err(Error::FileNotFound(path.display().to_string()));
        }
        let rows = load_distance_fares_csv(path)
            .map_err(|e| Error::RateTable(format!("{}: {}", path.display(), e)))?;
        table.extend_distance_fares(rows);
    }

    info!(
        source = toml_path.map_or("built-in".to_string(), |p| p.display().to_string()),
        distance_fares = table.distance_fare_count(),
        "rate table ready"
    );
    Ok(table)
}

impl RateLookup for FileRateTableRepository {
    fn base_fare(
        &self,
        region: Region,
        tier: TruckTier,
        hours: HoursSystem,
    ) -> std::result::Result<TimeBaseFare, RateLookupError> {
        self.table.base_fare(region, tier, hours)
    }

    fn surcharge_unit(
        &self,
        region: Region,
        tier: TruckTier,
        kind: SurchargeKind,
    ) -> std::result::Result<Yen, RateLookupError> {
        self.table.surcharge_unit(region, tier, kind)
    }

    fn distance_fare(
        &self,
        region: Region,
        tier: TruckTier,
        rounded_km: u32,
    ) -> std::result::Result<Yen, RateLookupError> {
        self.table.distance_fare(region, tier, rounded_km)
    }
}
