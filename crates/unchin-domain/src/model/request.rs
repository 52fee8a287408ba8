//! Fare calculation request

use serde::{Deserialize, Serialize};
use unchin_types::{Region, VehicleClass};

/// Night (深夜) and holiday (休日) conditions of a job
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurchargeFlags {
    pub night: bool,
    pub holiday: bool,
}

impl SurchargeFlags {
    pub const NONE: SurchargeFlags = SurchargeFlags {
        night: false,
        holiday: false,
    };

    pub fn new(night: bool, holiday: bool) -> Self {
        Self { night, holiday }
    }
}

/// Everything needed to price one job under every applicable scheme
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FareRequest {
    pub region: Region,
    pub vehicle: VehicleClass,
    /// Billing distance (km)
    pub distance_km: u32,
    /// Route distance before truncation, for display
    pub raw_distance_km: f64,
    pub driving_minutes: u32,
    pub loading_minutes: u32,
    pub is_night: bool,
    pub is_holiday: bool,
    /// Use the fixed 30 km / 50 km allowance instead of the per-tier table value
    pub use_simple_allowance: bool,
    /// Pickup area matched against the Akabou surcharge zones
    pub area: String,
    /// Akabou handling work time (作業時間)
    pub work_minutes: i64,
    /// Akabou waiting time (待機時間)
    pub waiting_minutes: i64,
}

impl FareRequest {
    pub fn new(region: Region, vehicle: VehicleClass, distance_km: u32) -> Self {
        Self {
            region,
            vehicle,
            distance_km,
            raw_distance_km: f64::from(distance_km),
            driving_minutes: 0,
            loading_minutes: 0,
            is_night: false,
            is_holiday: false,
            use_simple_allowance: false,
            area: String::new(),
            work_minutes: 0,
            waiting_minutes: 0,
        }
    }

    /// Build from a route distance; the billing distance drops the fraction
    pub fn from_route_distance(region: Region, vehicle: VehicleClass, raw_km: f64) -> Self {
        let mut request = Self::new(region, vehicle, billing_km(raw_km));
        request.raw_distance_km = raw_km;
        request
    }

    pub fn with_driving_minutes(mut self, minutes: u32) -> Self {
        self.driving_minutes = minutes;
        self
    }

    pub fn with_loading_minutes(mut self, minutes: u32) -> Self {
        self.loading_minutes = minutes;
        self
    }

    pub fn with_night(mut self, night: bool) -> Self {
        self.is_night = night;
        self
    }

    pub fn with_holiday(mut self, holiday: bool) -> Self {
        self.is_holiday = holiday;
        self
    }

    pub fn with_simple_allowance(mut self, enabled: bool) -> Self {
        self.use_simple_allowance = enabled;
        self
    }

    pub fn with_area(mut self, area: impl Into<String>) -> Self {
        self.area = area.into();
        self
    }

    pub fn with_ancillary_minutes(mut self, work: i64, waiting: i64) -> Self {
        self.work_minutes = work;
        self.waiting_minutes = waiting;
        self
    }

    /// Driving plus loading time
    pub fn total_minutes(&self) -> u32 {
        self.driving_minutes.saturating_add(self.loading_minutes)
    }

    pub fn surcharge_flags(&self) -> SurchargeFlags {
        SurchargeFlags::new(self.is_night, self.is_holiday)
    }
}

fn billing_km(raw_km: f64) -> u32 {
    if raw_km.is_finite() && raw_km > 0.0 {
        raw_km.trunc() as u32
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use unchin_types::TruckTier;

    #[test]
    fn test_route_distance_truncates() {
        let req = FareRequest::from_route_distance(
            Region::Kanto,
            VehicleClass::Truck(TruckTier::Large),
            123.9,
        );
        assert_eq!(req.distance_km, 123);
        assert!((req.raw_distance_km - 123.9).abs() < f64::EPSILON);
    }

    #[test]
    fn test_non_positive_route_distance_bills_zero() {
        for raw in [0.0, -4.2, f64::NAN] {
            let req = FareRequest::from_route_distance(Region::Kanto, VehicleClass::Light, raw);
            assert_eq!(req.distance_km, 0);
        }
    }

    #[test]
    fn test_total_minutes() {
        let req = FareRequest::new(Region::Kinki, VehicleClass::Light, 10)
            .with_driving_minutes(95)
            .with_loading_minutes(60);
        assert_eq!(req.total_minutes(), 155);
    }

    #[test]
    fn test_surcharge_flags() {
        let req = FareRequest::new(Region::Kinki, VehicleClass::Light, 10)
            .with_night(true)
            .with_holiday(false);
        assert_eq!(req.surcharge_flags(), SurchargeFlags::new(true, false));
    }
}
