//! Official distance tariff (距離制運賃) for trucks

use serde::{Deserialize, Serialize};
use tracing::debug;
use unchin_types::{FareError, Region, TruckTier, Yen};

use crate::model::{SurchargeFlags, SurchargeRates};
use crate::repository::RateLookup;
use crate::service::distance_rounder::round_distance;
use crate::service::surcharge::{apply_surcharges, SurchargeBreakdown};

/// Result of a distance tariff calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistanceFareResult {
    pub region: Region,
    pub tier: TruckTier,
    /// Route distance (km)
    pub distance_km: u32,
    /// Billing distance after rounding (km)
    pub rounded_km: u32,
    pub base_fare: Yen,
    #[serde(flatten)]
    pub surcharges: SurchargeBreakdown,
}

impl DistanceFareResult {
    pub fn total_fare(&self) -> Yen {
        self.surcharges.total_fare
    }

    /// 計算根拠
    pub fn breakdown(&self) -> String {
        let mut report = String::from("【計算根拠・距離制】\n");
        report.push_str(&format!("  運輸局: {}\n", self.region.name()));
        report.push_str(&format!("  車格: {}\n", self.tier.name()));
        report.push_str(&format!(
            "  経路距離: {}km → 運賃計算距離: {}km\n",
            self.distance_km, self.rounded_km
        ));
        report.push_str(&format!("  基本運賃: {}円\n", self.base_fare));
        report.push_str(&self.surcharges.breakdown_lines());
        report.push_str(&format!("  合計運賃: {}円\n", self.total_fare()));
        report
    }
}

/// Distance tariff calculator backed by a rate table
pub struct DistanceFareService<'a> {
    rates: &'a dyn RateLookup,
}

impl<'a> DistanceFareService<'a> {
    pub fn new(rates: &'a dyn RateLookup) -> Self {
        Self { rates }
    }

    pub fn calculate(
        &self,
        region: Region,
        tier: TruckTier,
        distance_km: u32,
        flags: SurchargeFlags,
    ) -> Result<DistanceFareResult, FareError> {
        let rounded_km = round_distance(distance_km, region)?;
        debug!(region = region.code(), distance_km, rounded_km, "rounded billing distance");

        let base_fare = self
            .rates
            .distance_fare(region, tier, rounded_km)
            .map_err(|e| FareError::lookup("distance fare lookup", e))?;

        let surcharges = apply_surcharges(base_fare, flags, SurchargeRates::STANDARD);

        Ok(DistanceFareResult {
            region,
            tier,
            distance_km,
            rounded_km,
            base_fare,
            surcharges,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TimeBaseFare;
    use std::cell::Cell;
    use unchin_types::{HoursSystem, RateLookupError, SurchargeKind};

    /// Returns a fixed distance fare and records the distance it was asked for
    struct FixedDistanceFare {
        fare: Yen,
        asked_km: Cell<u32>,
    }

    impl FixedDistanceFare {
        fn new(fare: Yen) -> Self {
            Self {
                fare,
                asked_km: Cell::new(0),
            }
        }
    }

    impl RateLookup for FixedDistanceFare {
        fn base_fare(
            &self,
            _region: Region,
            _tier: TruckTier,
            _hours: HoursSystem,
        ) -> Result<TimeBaseFare, RateLookupError> {
            Err(RateLookupError::NotFound("time".to_string()))
        }

        fn surcharge_unit(
            &self,
            _region: Region,
            _tier: TruckTier,
            _kind: SurchargeKind,
        ) -> Result<Yen, RateLookupError> {
            Err(RateLookupError::NotFound("time".to_string()))
        }

        fn distance_fare(
            &self,
            _region: Region,
            _tier: TruckTier,
            rounded_km: u32,
        ) -> Result<Yen, RateLookupError> {
            self.asked_km.set(rounded_km);
            if self.fare == 0 {
                return Err(RateLookupError::NotFound(format!("upto_km={}", rounded_km)));
            }
            Ok(self.fare)
        }
    }

    fn calculate(fare: Yen, km: u32, night: bool, holiday: bool) -> DistanceFareResult {
        let rates = FixedDistanceFare::new(fare);
        DistanceFareService::new(&rates)
            .calculate(
                Region::Kanto,
                TruckTier::Large,
                km,
                SurchargeFlags::new(night, holiday),
            )
            .unwrap()
    }

    #[test]
    fn test_no_surcharge_equals_base() {
        let result = calculate(50000, 100, false, false);
        assert_eq!(result.base_fare, 50000);
        assert_eq!(result.total_fare(), 50000);
    }

    #[test]
    fn test_night_surcharge() {
        let result = calculate(50000, 100, true, false);
        assert_eq!(result.surcharges.night_surcharge, 15000);
        assert_eq!(result.total_fare(), 65000);
    }

    #[test]
    fn test_holiday_surcharge() {
        let result = calculate(50000, 100, false, true);
        assert_eq!(result.total_fare(), 60000);
    }

    #[test]
    fn test_night_and_holiday_compound() {
        let result = calculate(50000, 100, true, true);
        assert_eq!(result.total_fare(), 78000);
    }

    #[test]
    fn test_lookup_uses_rounded_distance() {
        let rates = FixedDistanceFare::new(30000);
        let result = DistanceFareService::new(&rates)
            .calculate(Region::Kanto, TruckTier::Small, 123, SurchargeFlags::NONE)
            .unwrap();
        assert_eq!(rates.asked_km.get(), 130);
        assert_eq!(result.distance_km, 123);
        assert_eq!(result.rounded_km, 130);
    }

    #[test]
    fn test_zero_distance_is_invalid_input() {
        let rates = FixedDistanceFare::new(30000);
        let err = DistanceFareService::new(&rates)
            .calculate(Region::Kanto, TruckTier::Small, 0, SurchargeFlags::NONE)
            .unwrap_err();
        assert!(err.is_invalid_input());
        assert_eq!(rates.asked_km.get(), 0, "no lookup before validation");
    }

    #[test]
    fn test_missing_rate_is_lookup_failure() {
        let rates = FixedDistanceFare::new(0);
        let err = DistanceFareService::new(&rates)
            .calculate(Region::Okinawa, TruckTier::Medium, 30, SurchargeFlags::NONE)
            .unwrap_err();
        assert!(err.is_rate_lookup_failure());
        assert!(err.to_string().contains("upto_km=30"));
    }

    #[test]
    fn test_breakdown() {
        let report = calculate(50000, 95, true, false).breakdown();
        assert!(report.contains("運輸局: 関東"));
        assert!(report.contains("車格: 大型車(10t)"));
        assert!(report.contains("経路距離: 95km → 運賃計算距離: 100km"));
        assert!(report.contains("深夜割増: +15000円（30%増）"));
        assert!(report.contains("合計運賃: 65000円"));
        assert!(!report.contains("休日割増"));
    }
}
