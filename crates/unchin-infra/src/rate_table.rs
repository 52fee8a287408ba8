//! In-memory rate table

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use unchin_domain::model::{AkabouTariff, TimeBaseFare};
use unchin_domain::RateLookup;
use unchin_types::{HoursSystem, RateLookupError, Region, SurchargeKind, TruckTier, Yen};

/// Time-based tariff of one region, indexed by tier (small, medium, large, trailer)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionTimeTariff {
    pub fare_4h: [Yen; 4],
    pub fare_8h: [Yen; 4],
    pub allowance_4h_km: [u32; 4],
    pub allowance_8h_km: [u32; 4],
    /// Per 10 km over the allowance
    pub distance_surcharge: [Yen; 4],
    /// Per started hour over the included time
    pub time_surcharge: [Yen; 4],
}

impl RegionTimeTariff {
    pub fn base_fare(&self, tier: TruckTier, hours: HoursSystem) -> TimeBaseFare {
        let i = tier.index();
        match hours {
            HoursSystem::FourHour => TimeBaseFare {
                allowance_km: self.allowance_4h_km[i],
                fare_yen: self.fare_4h[i],
            },
            HoursSystem::EightHour => TimeBaseFare {
                allowance_km: self.allowance_8h_km[i],
                fare_yen: self.fare_8h[i],
            },
        }
    }

    pub fn surcharge_unit(&self, tier: TruckTier, kind: SurchargeKind) -> Yen {
        let i = tier.index();
        match kind {
            SurchargeKind::Distance => self.distance_surcharge[i],
            SurchargeKind::Time => self.time_surcharge[i],
        }
    }
}

/// One distance-tariff row: the fare for billing distances up to `upto_km`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistanceFareRow {
    pub region: Region,
    #[serde(rename = "vehicle")]
    pub tier: TruckTier,
    pub upto_km: u32,
    pub fare_yen: Yen,
}

/// Rate table for all regions
#[derive(Debug, Clone, Default)]
pub struct RateTable {
    time_tariffs: HashMap<Region, RegionTimeTariff>,
    distance_fares: HashMap<(Region, TruckTier), BTreeMap<u32, Yen>>,
    akabou: AkabouTariff,
}

impl RateTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_time_tariff(&mut self, region: Region, tariff: RegionTimeTariff) {
        self.time_tariffs.insert(region, tariff);
    }

    /// Later rows replace earlier ones with the same key
    pub fn insert_distance_fare(&mut self, row: DistanceFareRow) {
        self.distance_fares
            .entry((row.region, row.tier))
            .or_default()
            .insert(row.upto_km, row.fare_yen);
    }

    pub fn extend_distance_fares(&mut self, rows: impl IntoIterator<Item = DistanceFareRow>) {
        for row in rows {
            self.insert_distance_fare(row);
        }
    }

    pub fn set_akabou(&mut self, tariff: AkabouTariff) {
        self.akabou = tariff;
    }

    pub fn akabou(&self) -> &AkabouTariff {
        &self.akabou
    }

    pub fn time_tariff(&self, region: Region) -> Option<&RegionTimeTariff> {
        self.time_tariffs.get(&region)
    }

    /// Regions with a time tariff, in code order
    pub fn regions(&self) -> Vec<Region> {
        Region::ALL
            .into_iter()
            .filter(|r| self.time_tariffs.contains_key(r))
            .collect()
    }

    pub fn distance_fare_count(&self) -> usize {
        self.distance_fares.values().map(BTreeMap::len).sum()
    }

    fn region_tariff(&self, region: Region) -> Result<&RegionTimeTariff, RateLookupError> {
        self.time_tariffs.get(&region).ok_or_else(|| {
            RateLookupError::NotFound(format!("time tariff for region {}", region.code()))
        })
    }
}

impl RateLookup for RateTable {
    fn base_fare(
        &self,
        region: Region,
        tier: TruckTier,
        hours: HoursSystem,
    ) -> Result<TimeBaseFare, RateLookupError> {
        Ok(self.region_tariff(region)?.base_fare(tier, hours))
    }

    fn surcharge_unit(
        &self,
        region: Region,
        tier: TruckTier,
        kind: SurchargeKind,
    ) -> Result<Yen, RateLookupError> {
        Ok(self.region_tariff(region)?.surcharge_unit(tier, kind))
    }

    /// Fare of the first row whose `upto_km` covers the distance
    fn distance_fare(
        &self,
        region: Region,
        tier: TruckTier,
        rounded_km: u32,
    ) -> Result<Yen, RateLookupError> {
        self.distance_fares
            .get(&(region, tier))
            .and_then(|rows| rows.range(rounded_km..).next())
            .map(|(_, fare)| *fare)
            .ok_or_else(|| {
                RateLookupError::NotFound(format!(
                    "distance fare for region {}, vehicle {}, {}km",
                    region.code(),
                    tier.code(),
                    rounded_km
                ))
            })
    }
}
