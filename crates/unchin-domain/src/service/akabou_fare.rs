//! Light-vehicle (赤帽) fares
//!
//! Two independent forms share the area and night/holiday rules: a
//! distance form with bracket pricing past the base distance, and a time
//! form billed in overtime units past the base block. Work and waiting
//! fees are computed separately.

use serde::{Deserialize, Serialize};
use tracing::debug;
use unchin_types::{FareError, Yen};

use crate::model::{AkabouTariff, SurchargeFlags};
use crate::service::surcharge::{apply_surcharges, SurchargeBreakdown};

/// Akabou distance-form result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AkabouDistanceFareResult {
    pub distance_km: u32,
    pub base_fare: Yen,
    /// 距離加算 over all brackets
    pub distance_charge: Yen,
    pub area: String,
    pub area_surcharge: Yen,
    pub subtotal: Yen,
    #[serde(flatten)]
    pub surcharges: SurchargeBreakdown,
}

impl AkabouDistanceFareResult {
    pub fn total_fare(&self) -> Yen {
        self.surcharges.total_fare
    }

    pub fn breakdown(&self) -> String {
        let mut report = String::from("【計算根拠・赤帽距離制】\n");
        report.push_str(&format!("  距離: {}km\n", self.distance_km));
        report.push_str(&format!("  基本料金: {}円\n", self.base_fare));
        if self.distance_charge > 0 {
            report.push_str(&format!("  距離加算: +{}円\n", self.distance_charge));
        }
        push_area_line(&mut report, &self.area, self.area_surcharge);
        report.push_str(&self.surcharges.breakdown_lines());
        report.push_str(&format!("  合計運賃: {}円\n", self.total_fare()));
        report
    }
}

/// Akabou time-form result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AkabouTimeFareResult {
    pub duration_minutes: u32,
    pub base_fare: Yen,
    pub overtime_minutes: u32,
    pub overtime_charge: Yen,
    pub area: String,
    pub area_surcharge: Yen,
    pub subtotal: Yen,
    #[serde(flatten)]
    pub surcharges: SurchargeBreakdown,
}

impl AkabouTimeFareResult {
    pub fn total_fare(&self) -> Yen {
        self.surcharges.total_fare
    }

    pub fn breakdown(&self) -> String {
        let mut report = String::from("【計算根拠・赤帽時間制】\n");
        report.push_str(&format!("  作業時間: {}分\n", self.duration_minutes));
        report.push_str(&format!("  基本料金: {}円\n", self.base_fare));
        if self.overtime_minutes > 0 {
            report.push_str(&format!(
                "  超過料金: +{}円（超過{}分）\n",
                self.overtime_charge, self.overtime_minutes
            ));
        }
        push_area_line(&mut report, &self.area, self.area_surcharge);
        report.push_str(&self.surcharges.breakdown_lines());
        report.push_str(&format!("  合計運賃: {}円\n", self.total_fare()));
        report
    }
}

fn push_area_line(report: &mut String, area: &str, surcharge: Yen) {
    if surcharge > 0 {
        report.push_str(&format!("  地区割増（{}）: +{}円\n", area, surcharge));
    }
}

/// Work (作業) and waiting (待機) fees
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdditionalFeesResult {
    pub work_minutes: i64,
    pub work_fee: Yen,
    pub waiting_minutes: i64,
    pub waiting_fee: Yen,
    pub total_fee: Yen,
}

impl AdditionalFeesResult {
    pub fn breakdown(&self) -> String {
        let mut report = String::from("【付帯料金】\n");
        report.push_str(&format!(
            "  作業料金: {}円（{}分）\n",
            self.work_fee,
            self.work_minutes.max(0)
        ));
        report.push_str(&format!(
            "  待機時間料: {}円（{}分）\n",
            self.waiting_fee,
            self.waiting_minutes.max(0)
        ));
        report.push_str(&format!("  付帯料金合計: {}円\n", self.total_fee));
        report
    }
}

/// Akabou calculator over a fixed tariff
#[derive(Debug, Clone, Default)]
pub struct AkabouFareService {
    tariff: AkabouTariff,
}

impl AkabouFareService {
    pub fn new(tariff: AkabouTariff) -> Self {
        Self { tariff }
    }

    pub fn tariff(&self) -> &AkabouTariff {
        &self.tariff
    }

    pub fn calculate_distance_fare(
        &self,
        distance_km: u32,
        flags: SurchargeFlags,
        area: &str,
    ) -> Result<AkabouDistanceFareResult, FareError> {
        if distance_km < 1 {
            return Err(FareError::invalid_input(
                "distance_km",
                distance_km,
                "1 or more",
            ));
        }

        let base_fare = self.tariff.distance_base_fare;
        let distance_charge = self.distance_charge(distance_km);
        let area_surcharge = self.area_surcharge(area);
        let subtotal = base_fare + distance_charge + area_surcharge;
        debug!(distance_km, distance_charge, area_surcharge, "akabou distance subtotal");

        Ok(AkabouDistanceFareResult {
            distance_km,
            base_fare,
            distance_charge,
            area: area.to_string(),
            area_surcharge,
            subtotal,
            surcharges: apply_surcharges(subtotal, flags, self.tariff.surcharge_rates),
        })
    }

    pub fn calculate_time_fare(
        &self,
        duration_minutes: u32,
        flags: SurchargeFlags,
        area: &str,
    ) -> Result<AkabouTimeFareResult, FareError> {
        if duration_minutes < 1 {
            return Err(FareError::invalid_input(
                "duration_minutes",
                duration_minutes,
                "1 or more",
            ));
        }

        let t = &self.tariff;
        let overtime_minutes = duration_minutes.saturating_sub(t.time_base_minutes);
        let overtime_charge = if overtime_minutes > 0 && t.overtime_unit_minutes > 0 {
            u64::from(overtime_minutes.div_ceil(t.overtime_unit_minutes)) * t.overtime_unit_fare
        } else {
            0
        };
        let area_surcharge = self.area_surcharge(area);
        let subtotal = t.time_base_fare + overtime_charge + area_surcharge;
        debug!(duration_minutes, overtime_minutes, area_surcharge, "akabou time subtotal");

        Ok(AkabouTimeFareResult {
            duration_minutes,
            base_fare: t.time_base_fare,
            overtime_minutes,
            overtime_charge,
            area: area.to_string(),
            area_surcharge,
            subtotal,
            surcharges: apply_surcharges(subtotal, flags, t.surcharge_rates),
        })
    }

    /// Negative minutes are billed as zero
    pub fn calculate_additional_fees(
        &self,
        work_minutes: i64,
        waiting_minutes: i64,
    ) -> AdditionalFeesResult {
        let work_fee = self.tariff.work_fee.fee_for(work_minutes);
        let waiting_fee = self.tariff.waiting_fee.fee_for(waiting_minutes);
        AdditionalFeesResult {
            work_minutes,
            work_fee,
            waiting_minutes,
            waiting_fee,
            total_fee: work_fee.saturating_add(waiting_fee),
        }
    }

    fn distance_charge(&self, distance_km: u32) -> Yen {
        if distance_km <= self.tariff.distance_base_km {
            return 0;
        }
        self.tariff
            .brackets
            .iter()
            .map(|b| u64::from(b.covered_km(distance_km)) * b.yen_per_km)
            .sum()
    }

    fn area_surcharge(&self, area: &str) -> Yen {
        if self.tariff.is_surcharge_area(area) {
            self.tariff.area_surcharge
        } else {
            0
        }
    }
}
