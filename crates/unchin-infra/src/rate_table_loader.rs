//! Rate table loader from TOML
//!
//! ```toml
//! [[time_tariff]]
//! region = 3
//! fare_4h = [23630, 27980, 36050, 46100]
//! fare_8h = [39380, 46640, 60090, 76840]
//! allowance_4h_km = [50, 60, 60, 60]
//! allowance_8h_km = [100, 130, 130, 130]
//! distance_surcharge = [410, 410, 630, 920]
//! time_surcharge = [3710, 3890, 4180, 4920]
//!
//! [[distance_fares]]
//! region = 3
//! vehicle = 3
//! upto_km = 100
//! fare_yen = 40000
//!
//! [akabou]
//! area_surcharge = 500
//! ```

use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;
use unchin_domain::model::AkabouTariff;
use unchin_types::{ConfigError, Error, Region, Result, Yen};

use crate::rate_table::{DistanceFareRow, RateTable, RegionTimeTariff};

/// 標準的運賃（時間制）, embedded at build time
pub const STANDARD_TIME_TARIFF: &str = include_str!("../data/standard_time_rates.toml");

/// Container for parsing a rate table file
#[derive(Debug, Deserialize)]
struct RateTableFile {
    #[serde(default)]
    time_tariff: Vec<TimeTariffEntry>,
    #[serde(default)]
    distance_fares: Vec<DistanceFareRow>,
    akabou: Option<AkabouTariff>,
}

#[derive(Debug, Deserialize)]
struct TimeTariffEntry {
    region: Region,
    fare_4h: [Yen; 4],
    fare_8h: [Yen; 4],
    allowance_4h_km: [u32; 4],
    allowance_8h_km: [u32; 4],
    distance_surcharge: [Yen; 4],
    time_surcharge: [Yen; 4],
}

impl From<TimeTariffEntry> for RegionTimeTariff {
    fn from(e: TimeTariffEntry) -> Self {
        RegionTimeTariff {
            fare_4h: e.fare_4h,
            fare_8h: e.fare_8h,
            allowance_4h_km: e.allowance_4h_km,
            allowance_8h_km: e.allowance_8h_km,
            distance_surcharge: e.distance_surcharge,
            time_surcharge: e.time_surcharge,
        }
    }
}

pub struct RateTableLoader;

impl RateTableLoader {
    /// Load a rate table from a TOML file
    pub fn load_from_file(path: &Path) -> Result<RateTable> {
        if !path.exists() {
            return Err(Error::FileNotFound(path.display().to_string()));
        }
        let content = fs::read_to_string(path).map_err(|e| {
            Error::Config(ConfigError::ParseError(format!(
                "Failed to read rate table file: {}",
                e
            )))
        })?;

        Self::load_from_str(&content)
    }

    /// Load a rate table from a TOML string
    pub fn load_from_str(toml_content: &str) -> Result<RateTable> {
        let file: RateTableFile = toml::from_str(toml_content).map_err(|e| {
            Error::Config(ConfigError::ParseError(format!(
                "Failed to parse rate table TOML: {}",
                e
            )))
        })?;

        let mut table = RateTable::new();
        for entry in file.time_tariff {
            let region = entry.region;
            if table.time_tariff(region).is_some() {
                return Err(Error::RateTable(format!(
                    "duplicate time_tariff for region {}",
                    region.code()
                )));
            }
            table.insert_time_tariff(region, entry.into());
        }
        table.extend_distance_fares(file.distance_fares);
        if let Some(akabou) = file.akabou {
            akabou.validate().map_err(|e| {
                Error::Config(ConfigError::ParseError(format!(
                    "Invalid akabou tariff: {}",
                    e
                )))
            })?;
            table.set_akabou(akabou);
        }

        debug!(
            regions = table.regions().len(),
            distance_fares = table.distance_fare_count(),
            "loaded rate table"
        );
        Ok(table)
    }

    /// The built-in time tariff for all regions, without distance fares
    pub fn standard() -> Result<RateTable> {
        Self::load_from_str(STANDARD_TIME_TARIFF)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use unchin_domain::RateLookup;
    use unchin_types::{HoursSystem, SurchargeKind, TruckTier};

    const TEST_TOML: &str = r#"
[[time_tariff]]
region = 6
fare_4h = [22580, 25060, 34610, 44380]
fare_8h = [37640, 43190, 57690, 73970]
allowance_4h_km = [50, 60, 60, 60]
allowance_8h_km = [100, 130, 130, 130]
distance_surcharge = [410, 410, 630, 920]
time_surcharge = [3430, 3090, 3470, 4050]

[[distance_fares]]
region = 6
vehicle = 2
upto_km = 10
fare_yen = 18000

[[distance_fares]]
region = 6
vehicle = 2
upto_km = 20
fare_yen = 20500

[akabou]
area_surcharge = 500
"#;

    #[test]
    fn test_load_from_str() {
        let table = RateTableLoader::load_from_str(TEST_TOML).unwrap();
        assert_eq!(table.regions(), vec![Region::Kinki]);
        assert_eq!(table.distance_fare_count(), 2);
        assert_eq!(table.akabou().area_surcharge, 500);
        assert_eq!(table.akabou().distance_base_fare, 5500);

        let fare = table
            .distance_fare(Region::Kinki, TruckTier::Medium, 20)
            .unwrap();
        assert_eq!(fare, 20500);
    }

    #[test]
    fn test_standard_covers_every_region_and_tier() {
        let table = RateTableLoader::standard().unwrap();
        assert_eq!(table.regions(), Region::ALL.to_vec());
        assert_eq!(table.distance_fare_count(), 0);
        for region in Region::ALL {
            for tier in TruckTier::ALL {
                for hours in [HoursSystem::FourHour, HoursSystem::EightHour] {
                    let base = table.base_fare(region, tier, hours).unwrap();
                    assert!(base.fare_yen > 0);
                }
                for kind in [SurchargeKind::Distance, SurchargeKind::Time] {
                    assert!(table.surcharge_unit(region, tier, kind).unwrap() > 0);
                }
            }
        }
    }

    #[test]
    fn test_standard_kanto_values() {
        let table = RateTableLoader::standard().unwrap();
        let base = table
            .base_fare(Region::Kanto, TruckTier::Large, HoursSystem::FourHour)
            .unwrap();
        assert_eq!(base.fare_yen, 36050);
        assert_eq!(base.allowance_km, 60);

        let small = table
            .base_fare(Region::Kanto, TruckTier::Small, HoursSystem::EightHour)
            .unwrap();
        assert_eq!(small.fare_yen, 39380);
        assert_eq!(small.allowance_km, 100);
    }

    #[test]
    fn test_wrong_array_length_is_rejected() {
        let toml = TEST_TOML.replace("fare_4h = [22580, 25060, 34610, 44380]", "fare_4h = [1, 2]");
        let err = RateTableLoader::load_from_str(&toml).unwrap_err();
        assert!(matches!(err, Error::Config(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_invalid_codes_are_rejected() {
        let toml = TEST_TOML.replace("region = 6", "region = 11");
        assert!(RateTableLoader::load_from_str(&toml).is_err());

        let toml = TEST_TOML.replace("vehicle = 2", "vehicle = 0");
        assert!(RateTableLoader::load_from_str(&toml).is_err());
    }

    #[test]
    fn test_duplicate_region_is_rejected() {
        let toml = format!("{}\n{}", STANDARD_TIME_TARIFF, STANDARD_TIME_TARIFF);
        let err = RateTableLoader::load_from_str(&toml).unwrap_err();
        assert!(matches!(err, Error::RateTable(_)));
    }

    #[test]
    fn test_malformed_akabou_tariff_is_rejected() {
        let cases = [
            "[akabou]\nbrackets = [{ floor_km = 50, ceiling_km = 30, yen_per_km = 100 }]",
            "[akabou]\nbrackets = [\n  { floor_km = 20, ceiling_km = 60, yen_per_km = 242 },\n  { floor_km = 50, yen_per_km = 187 },\n]",
            "[akabou]\nbrackets = [\n  { floor_km = 20, yen_per_km = 242 },\n  { floor_km = 100, ceiling_km = 150, yen_per_km = 154 },\n]",
            "[akabou]\novertime_unit_minutes = 0",
            "[akabou.work_fee]\nfree_minutes = 30\nunit_minutes = 0\nunit_fare = 550",
        ];
        for toml in cases {
            let err = RateTableLoader::load_from_str(toml).unwrap_err();
            assert!(
                matches!(err, Error::Config(ConfigError::ParseError(ref msg)) if msg.contains("akabou")),
                "{toml}: {err}"
            );
        }
    }

    #[test]
    fn test_akabou_bracket_override() {
        let toml = "[akabou]\nbrackets = [\n  { floor_km = 20, ceiling_km = 100, yen_per_km = 200 },\n  { floor_km = 100, yen_per_km = 100 },\n]";
        let table = RateTableLoader::load_from_str(toml).unwrap();
        assert_eq!(table.akabou().brackets.len(), 2);
        assert_eq!(table.akabou().time_base_fare, 6050);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(TEST_TOML.as_bytes()).unwrap();
        let table = RateTableLoader::load_from_file(file.path()).unwrap();
        assert_eq!(table.distance_fare_count(), 2);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = RateTableLoader::load_from_file(&dir.path().join("rates.toml")).unwrap_err();
        assert!(matches!(err, Error::FileNotFound(_)));
    }
}
