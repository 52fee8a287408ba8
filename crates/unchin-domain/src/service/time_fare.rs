//! Official time-based tariff (時間制運賃) for trucks
//!
//! Jobs up to 4 hours use the 4-hour system, longer jobs the 8-hour
//! system. Distance beyond the allowance is billed per full 10 km, time
//! beyond the included hours per started hour.

use serde::{Deserialize, Serialize};
use tracing::debug;
use unchin_types::{FareError, HoursSystem, Region, SurchargeKind, TruckTier, Yen};

use crate::model::{SurchargeFlags, SurchargeRates};
use crate::repository::RateLookup;
use crate::service::surcharge::{apply_surcharges, SurchargeBreakdown};

/// Which kilometre allowance applies to the base fare
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AllowanceMode {
    /// Per-tier allowance from the rate table (トラ協PDF版)
    #[default]
    Tariff,
    /// Fixed 30 km (4h) / 50 km (8h) for every tier (シンプル版)
    Simple,
}

impl AllowanceMode {
    pub const SIMPLE_4H_KM: u32 = 30;
    pub const SIMPLE_8H_KM: u32 = 50;

    pub fn from_simple_flag(use_simple: bool) -> Self {
        if use_simple {
            AllowanceMode::Simple
        } else {
            AllowanceMode::Tariff
        }
    }

    fn label(self) -> &'static str {
        match self {
            AllowanceMode::Tariff => "トラ協PDF版",
            AllowanceMode::Simple => "シンプル版",
        }
    }
}

/// Inputs of a time tariff calculation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeFareInput {
    pub region: Region,
    pub tier: TruckTier,
    pub distance_km: u32,
    pub driving_minutes: u32,
    pub loading_minutes: u32,
    pub flags: SurchargeFlags,
    pub allowance: AllowanceMode,
}

/// Result of a time tariff calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeFareResult {
    pub region: Region,
    pub tier: TruckTier,
    pub distance_km: u32,
    pub driving_minutes: u32,
    pub loading_minutes: u32,
    pub total_minutes: u32,

    pub hours_system: HoursSystem,
    pub allowance: AllowanceMode,
    /// 基礎走行キロ actually used
    pub allowance_km: u32,

    pub excess_km: u32,
    pub excess_minutes: u32,
    /// Started hours beyond the included time
    pub excess_hours: u32,

    pub base_fare: Yen,
    pub distance_unit_fare: Yen,
    pub time_unit_fare: Yen,
    pub distance_surcharge: Yen,
    pub time_surcharge: Yen,
    /// 小計（割増前）
    pub subtotal: Yen,
    #[serde(flatten)]
    pub surcharges: SurchargeBreakdown,
}

impl TimeFareResult {
    pub fn total_fare(&self) -> Yen {
        self.surcharges.total_fare
    }

    /// 計算根拠
    pub fn breakdown(&self) -> String {
        let mut report = String::from("【計算根拠・時間制】\n");
        report.push_str(&format!("  運輸局: {}\n", self.region.name()));
        report.push_str(&format!("  車格: {}\n", self.tier.name()));
        report.push_str(&format!("  適用制度: {}時間制\n", self.hours_system.hours()));
        report.push_str(&format!(
            "  走行距離: {}km（基礎走行キロ: {}km [{}]）\n",
            self.distance_km,
            self.allowance_km,
            self.allowance.label()
        ));
        report.push_str(&format!("  走行時間: {}\n", hours_minutes(self.driving_minutes)));
        report.push_str(&format!("  荷役時間: {}\n", hours_minutes(self.loading_minutes)));
        report.push_str(&format!("  総作業時間: {}\n", hours_minutes(self.total_minutes)));
        report.push_str(&format!("  基礎額: {}円\n", self.base_fare));
        if self.excess_km > 0 {
            report.push_str(&format!(
                "  距離超過: +{}km → +{}円\n",
                self.excess_km, self.distance_surcharge
            ));
        }
        if self.excess_minutes > 0 {
            report.push_str(&format!(
                "  時間超過: +{}分（{}時間） → +{}円\n",
                self.excess_minutes, self.excess_hours, self.time_surcharge
            ));
        }
        report.push_str(&format!("  小計（割増前）: {}円\n", self.subtotal));
        report.push_str(&self.surcharges.breakdown_lines());
        report.push_str(&format!("  合計運賃: {}円\n", self.total_fare()));
        report
    }
}

fn hours_minutes(minutes: u32) -> String {
    format!("{}時間{}分", minutes / 60, minutes % 60)
}

/// Time tariff calculator backed by a rate table
pub struct TimeFareService<'a> {
    rates: &'a dyn RateLookup,
}

impl<'a> TimeFareService<'a> {
    pub fn new(rates: &'a dyn RateLookup) -> Self {
        Self { rates }
    }

    pub fn calculate(&self, input: &TimeFareInput) -> Result<TimeFareResult, FareError> {
        validate(input)?;

        let total_minutes = input.driving_minutes.saturating_add(input.loading_minutes);
        let hours_system = HoursSystem::for_total_minutes(total_minutes);
        debug!(total_minutes, hours = hours_system.hours(), "selected hours system");

        let base = self
            .rates
            .base_fare(input.region, input.tier, hours_system)
            .map_err(|e| FareError::lookup("base fare lookup", e))?;
        let distance_unit_fare = self
            .rates
            .surcharge_unit(input.region, input.tier, SurchargeKind::Distance)
            .map_err(|e| FareError::lookup("distance surcharge lookup", e))?;
        let time_unit_fare = self
            .rates
            .surcharge_unit(input.region, input.tier, SurchargeKind::Time)
            .map_err(|e| FareError::lookup("time surcharge lookup", e))?;

        let allowance_km = match input.allowance {
            AllowanceMode::Tariff => base.allowance_km,
            AllowanceMode::Simple => match hours_system {
                HoursSystem::FourHour => AllowanceMode::SIMPLE_4H_KM,
                HoursSystem::EightHour => AllowanceMode::SIMPLE_8H_KM,
            },
        };

        let excess_km = input.distance_km.saturating_sub(allowance_km);
        let distance_surcharge = u64::from(excess_km / 10) * distance_unit_fare;

        let excess_minutes = total_minutes.saturating_sub(hours_system.included_minutes());
        let excess_hours = excess_minutes.div_ceil(60);
        let time_surcharge = u64::from(excess_hours) * time_unit_fare;

        let subtotal = base.fare_yen + distance_surcharge + time_surcharge;
        let surcharges = apply_surcharges(subtotal, input.flags, SurchargeRates::STANDARD);

        Ok(TimeFareResult {
            region: input.region,
            tier: input.tier,
            distance_km: input.distance_km,
            driving_minutes: input.driving_minutes,
            loading_minutes: input.loading_minutes,
            total_minutes,
            hours_system,
            allowance: input.allowance,
            allowance_km,
            excess_km,
            excess_minutes,
            excess_hours,
            base_fare: base.fare_yen,
            distance_unit_fare,
            time_unit_fare,
            distance_surcharge,
            time_surcharge,
            subtotal,
            surcharges,
        })
    }
}

fn validate(input: &TimeFareInput) -> Result<(), FareError> {
    if input.distance_km < 1 {
        return Err(FareError::invalid_input(
            "distance_km",
            input.distance_km,
            "1 or more",
        ));
    }
    if input.driving_minutes < 1 {
        return Err(FareError::invalid_input(
            "driving_minutes",
            input.driving_minutes,
            "1 or more",
        ));
    }
    Ok(())
}
