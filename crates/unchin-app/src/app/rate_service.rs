//! Rate Service - Inspect Rates and Billing Distances

use serde::Serialize;
use unchin_domain::model::TimeBaseFare;
use unchin_domain::service::round_distance;
use unchin_domain::RateLookup;
use unchin_types::{FareError, HoursSystem, Region, SurchargeKind, TruckTier, Yen};

/// Time-tariff rates of one region and tier
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RateSummary {
    pub region: Region,
    pub region_name: &'static str,
    pub tier: TruckTier,
    pub tier_name: &'static str,
    pub four_hour: TimeBaseFare,
    pub eight_hour: TimeBaseFare,
    /// Per 10 km
    pub distance_surcharge: Yen,
    /// Per hour
    pub time_surcharge: Yen,
}

impl RateSummary {
    pub fn report(&self) -> String {
        let mut report = format!("【時間制運賃表】{} / {}\n", self.region_name, self.tier_name);
        report.push_str(&format!(
            "  4時間制: {}円（基礎走行キロ {}km）\n",
            self.four_hour.fare_yen, self.four_hour.allowance_km
        ));
        report.push_str(&format!(
            "  8時間制: {}円（基礎走行キロ {}km）\n",
            self.eight_hour.fare_yen, self.eight_hour.allowance_km
        ));
        report.push_str(&format!("  距離超過: {}円 / 10km\n", self.distance_surcharge));
        report.push_str(&format!("  時間超過: {}円 / 1時間\n", self.time_surcharge));
        report
    }
}

pub fn rate_summary(
    rates: &dyn RateLookup,
    region_code: i64,
    vehicle_code: i64,
) -> Result<RateSummary, FareError> {
    let region = Region::from_code(region_code)?;
    let tier = TruckTier::from_code(vehicle_code)?;

    let base = |hours| {
        rates
            .base_fare(region, tier, hours)
            .map_err(|e| FareError::lookup("base fare lookup", e))
    };
    let unit = |kind| {
        rates
            .surcharge_unit(region, tier, kind)
            .map_err(|e| FareError::lookup("surcharge lookup", e))
    };

    Ok(RateSummary {
        region,
        region_name: region.name(),
        tier,
        tier_name: tier.name(),
        four_hour: base(HoursSystem::FourHour)?,
        eight_hour: base(HoursSystem::EightHour)?,
        distance_surcharge: unit(SurchargeKind::Distance)?,
        time_surcharge: unit(SurchargeKind::Time)?,
    })
}

/// Billing distance of the distance tariff
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RoundedDistance {
    pub region: Region,
    pub distance_km: u32,
    pub rounded_km: u32,
}

pub fn billing_distance(region_code: i64, distance_km: u32) -> Result<RoundedDistance, FareError> {
    let region = Region::from_code(region_code)?;
    let rounded_km = round_distance(distance_km, region)?;
    Ok(RoundedDistance {
        region,
        distance_km,
        rounded_km,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use unchin_infra::RateTableLoader;

    #[test]
    fn test_rate_summary_from_standard_table() {
        let table = RateTableLoader::standard().unwrap();
        let summary = rate_summary(&table, 10, 1).unwrap();
        assert_eq!(summary.region, Region::Okinawa);
        assert_eq!(summary.four_hour.fare_yen, 18790);
        assert_eq!(summary.eight_hour.allowance_km, 100);
        assert_eq!(summary.time_surcharge, 2550);

        let report = summary.report();
        assert!(report.contains("沖縄 / 小型車(2t)"));
        assert!(report.contains("8時間制: 31310円（基礎走行キロ 100km）"));
    }

    #[test]
    fn test_rate_summary_rejects_light_vehicle() {
        let table = RateTableLoader::standard().unwrap();
        let err = rate_summary(&table, 3, 0).unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_billing_distance() {
        let rounded = billing_distance(3, 201).unwrap();
        assert_eq!(rounded.rounded_km, 220);
        let rounded = billing_distance(10, 7).unwrap();
        assert_eq!(rounded.rounded_km, 10);
        assert!(billing_distance(3, 0).is_err());
        assert!(billing_distance(0, 10).is_err());
        assert!(billing_distance(3, u32::MAX).unwrap_err().is_invalid_input());
    }
}
