//! Night and holiday surcharge compounding
//!
//! Night is applied first, holiday second on the night-adjusted amount.
//! Each step truncates to whole yen before the next one sees it.

use serde::{Deserialize, Serialize};
use unchin_types::Yen;

use crate::model::{SurchargeFlags, SurchargeRates};

/// Surcharges applied on top of a pre-surcharge subtotal
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurchargeBreakdown {
    pub is_night: bool,
    pub is_holiday: bool,
    /// 深夜割増額
    pub night_surcharge: Yen,
    /// 休日割増額
    pub holiday_surcharge: Yen,
    /// 1.0, or 1.3 for the standard night rate
    pub night_rate: f64,
    /// 1.0, or 1.2 for the standard holiday rate
    pub holiday_rate: f64,
    pub total_fare: Yen,
}

impl SurchargeBreakdown {
    /// Breakdown lines for the applied surcharges, already indented
    pub fn breakdown_lines(&self) -> String {
        let mut lines = String::new();
        if self.is_night {
            lines.push_str(&format!(
                "  深夜割増: +{}円（{:.0}%増）\n",
                self.night_surcharge,
                (self.night_rate - 1.0) * 100.0
            ));
        }
        if self.is_holiday {
            lines.push_str(&format!(
                "  休日割増: +{}円（{:.0}%増）\n",
                self.holiday_surcharge,
                (self.holiday_rate - 1.0) * 100.0
            ));
        }
        lines
    }
}

/// Compound the night and holiday surcharges onto `subtotal`
pub fn apply_surcharges(
    subtotal: Yen,
    flags: SurchargeFlags,
    rates: SurchargeRates,
) -> SurchargeBreakdown {
    let mut total = subtotal;
    let mut breakdown = SurchargeBreakdown {
        is_night: flags.night,
        is_holiday: flags.holiday,
        night_surcharge: 0,
        holiday_surcharge: 0,
        night_rate: 1.0,
        holiday_rate: 1.0,
        total_fare: subtotal,
    };

    if flags.night {
        breakdown.night_surcharge = percent_of(total, rates.night_percent);
        breakdown.night_rate = multiplier(rates.night_percent);
        total += breakdown.night_surcharge;
    }

    if flags.holiday {
        breakdown.holiday_surcharge = percent_of(total, rates.holiday_percent);
        breakdown.holiday_rate = multiplier(rates.holiday_percent);
        total += breakdown.holiday_surcharge;
    }

    breakdown.total_fare = total;
    breakdown
}

fn percent_of(amount: Yen, percent: u64) -> Yen {
    amount * percent / 100
}

fn multiplier(percent: u64) -> f64 {
    1.0 + percent as f64 / 100.0
}
