//! Tariff definitions
//!
//! `TimeBaseFare` is a row of the official time-based table served by a
//! `RateLookup`. The Akabou tariff is a single fixed schedule (税込) that
//! rate tables may override as a whole.

use serde::{Deserialize, Serialize};
use unchin_types::Yen;

/// Base fare of the time-based tariff with its included kilometres
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeBaseFare {
    /// 基礎走行キロ
    pub allowance_km: u32,
    pub fare_yen: Yen,
}

/// Night and holiday surcharge percentages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurchargeRates {
    /// 深夜割増 (22:00-05:00)
    pub night_percent: u64,
    /// 休日割増 (日祝日)
    pub holiday_percent: u64,
}

impl SurchargeRates {
    pub const STANDARD: SurchargeRates = SurchargeRates {
        night_percent: 30,
        holiday_percent: 20,
    };
}

impl Default for SurchargeRates {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Fee billed per started unit after a free period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitFee {
    pub free_minutes: u32,
    pub unit_minutes: u32,
    pub unit_fare: Yen,
}

impl UnitFee {
    /// Fee for the given minutes; negative minutes cost nothing.
    /// Saturates at `Yen::MAX`.
    pub fn fee_for(&self, minutes: i64) -> Yen {
        let billable = minutes.max(0).saturating_sub(i64::from(self.free_minutes));
        if billable <= 0 || self.unit_minutes == 0 {
            return 0;
        }
        let units = billable.unsigned_abs().div_ceil(u64::from(self.unit_minutes));
        units.saturating_mul(self.unit_fare)
    }
}

/// Per-kilometre rate for the part of a trip falling past `floor_km`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistanceBracket {
    pub floor_km: u32,
    /// Open-ended when absent
    #[serde(default)]
    pub ceiling_km: Option<u32>,
    pub yen_per_km: Yen,
}

impl DistanceBracket {
    /// Kilometres of `distance_km` that fall inside this bracket
    pub fn covered_km(&self, distance_km: u32) -> u32 {
        if distance_km <= self.floor_km {
            return 0;
        }
        let upper = match self.ceiling_km {
            Some(ceiling) => distance_km.min(ceiling),
            None => distance_km,
        };
        upper.saturating_sub(self.floor_km)
    }
}

/// Light-vehicle (赤帽) tariff
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AkabouTariff {
    /// 基本料金 for the distance form
    pub distance_base_fare: Yen,
    /// Distance covered by the base fare
    pub distance_base_km: u32,
    pub brackets: Vec<DistanceBracket>,
    /// 基本料金 for the time form
    pub time_base_fare: Yen,
    pub time_base_minutes: u32,
    pub overtime_unit_minutes: u32,
    pub overtime_unit_fare: Yen,
    pub surcharge_rates: SurchargeRates,
    /// 地区割増
    pub area_surcharge: Yen,
    pub surcharge_areas: Vec<String>,
    /// 作業料金
    pub work_fee: UnitFee,
    /// 待機時間料
    pub waiting_fee: UnitFee,
}

impl Default for AkabouTariff {
    fn default() -> Self {
        Self {
            distance_base_fare: 5500,
            distance_base_km: 20,
            brackets: vec![
                DistanceBracket {
                    floor_km: 20,
                    ceiling_km: Some(50),
                    yen_per_km: 242,
                },
                DistanceBracket {
                    floor_km: 50,
                    ceiling_km: Some(100),
                    yen_per_km: 187,
                },
                DistanceBracket {
                    floor_km: 100,
                    ceiling_km: Some(150),
                    yen_per_km: 154,
                },
                DistanceBracket {
                    floor_km: 150,
                    ceiling_km: None,
                    yen_per_km: 132,
                },
            ],
            time_base_fare: 6050,
            time_base_minutes: 120,
            overtime_unit_minutes: 30,
            overtime_unit_fare: 1375,
            surcharge_rates: SurchargeRates::STANDARD,
            area_surcharge: 440,
            surcharge_areas: vec!["東京23区".to_string(), "大阪市内".to_string()],
            work_fee: UnitFee {
                free_minutes: 30,
                unit_minutes: 15,
                unit_fare: 550,
            },
            waiting_fee: UnitFee {
                free_minutes: 30,
                unit_minutes: 30,
                unit_fare: 1100,
            },
        }
    }
}

impl AkabouTariff {
    /// Exact match against the surcharge zones
    pub fn is_surcharge_area(&self, area: &str) -> bool {
        self.surcharge_areas.iter().any(|a| a == area)
    }

    /// Check that brackets start past the base distance, are ordered and
    /// do not overlap, and that every billing unit is non-zero.
    pub fn validate(&self) -> Result<(), String> {
        let mut covered_to = Some(self.distance_base_km);
        for (i, bracket) in self.brackets.iter().enumerate() {
            let Some(previous) = covered_to else {
                return Err(format!(
                    "akabou bracket {} follows an open-ended bracket",
                    i + 1
                ));
            };
            if bracket.floor_km < previous {
                return Err(format!(
                    "akabou bracket {} starts at {}km, before {}km",
                    i + 1,
                    bracket.floor_km,
                    previous
                ));
            }
            if let Some(ceiling) = bracket.ceiling_km {
                if ceiling <= bracket.floor_km {
                    return Err(format!(
                        "akabou bracket {} ends at {}km, not past its floor {}km",
                        i + 1,
                        ceiling,
                        bracket.floor_km
                    ));
                }
            }
            covered_to = bracket.ceiling_km;
        }

        let units = [
            ("overtime_unit_minutes", self.overtime_unit_minutes),
            ("work_fee.unit_minutes", self.work_fee.unit_minutes),
            ("waiting_fee.unit_minutes", self.waiting_fee.unit_minutes),
        ];
        for (name, minutes) in units {
            if minutes == 0 {
                return Err(format!("akabou {} must be at least 1", name));
            }
        }
        Ok(())
    }
}
