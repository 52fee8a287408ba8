//! Tariff codes shared by every layer
//!
//! Region and vehicle codes arrive as plain integers (forms, CSV rows, TOML
//! tables). They are parsed once into these enums so the calculators never
//! see an out-of-range code.

use serde::{Deserialize, Serialize};

use crate::error::FareError;

/// Amount of money in yen
pub type Yen = u64;

/// Regional transport bureau (運輸局) whose rate table applies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Region {
    Hokkaido,
    Tohoku,
    Kanto,
    HokurikuShinetsu,
    Chubu,
    Kinki,
    Chugoku,
    Shikoku,
    Kyushu,
    Okinawa,
}

impl Region {
    pub const ALL: [Region; 10] = [
        Region::Hokkaido,
        Region::Tohoku,
        Region::Kanto,
        Region::HokurikuShinetsu,
        Region::Chubu,
        Region::Kinki,
        Region::Chugoku,
        Region::Shikoku,
        Region::Kyushu,
        Region::Okinawa,
    ];

    /// Parse a region code (1-10)
    pub fn from_code(code: i64) -> Result<Self, FareError> {
        if !(1..=10).contains(&code) {
            return Err(FareError::invalid_input("region_code", code, "1-10"));
        }
        Ok(Self::ALL[(code - 1) as usize])
    }

    pub fn code(self) -> u8 {
        match self {
            Region::Hokkaido => 1,
            Region::Tohoku => 2,
            Region::Kanto => 3,
            Region::HokurikuShinetsu => 4,
            Region::Chubu => 5,
            Region::Kinki => 6,
            Region::Chugoku => 7,
            Region::Shikoku => 8,
            Region::Kyushu => 9,
            Region::Okinawa => 10,
        }
    }

    /// Bureau name as printed on the tariff
    pub fn name(self) -> &'static str {
        match self {
            Region::Hokkaido => "北海道",
            Region::Tohoku => "東北",
            Region::Kanto => "関東",
            Region::HokurikuShinetsu => "北陸信越",
            Region::Chubu => "中部",
            Region::Kinki => "近畿",
            Region::Chugoku => "中国",
            Region::Shikoku => "四国",
            Region::Kyushu => "九州",
            Region::Okinawa => "沖縄",
        }
    }

    pub fn is_okinawa(self) -> bool {
        self == Region::Okinawa
    }
}

impl TryFrom<u8> for Region {
    type Error = FareError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Self::from_code(i64::from(code))
    }
}

impl From<Region> for u8 {
    fn from(region: Region) -> Self {
        region.code()
    }
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Truck tonnage tier (車格) used by the official tariffs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum TruckTier {
    /// 小型車 (2t)
    Small,
    /// 中型車 (4t)
    Medium,
    /// 大型車 (10t)
    Large,
    /// トレーラー (20t)
    Trailer,
}

impl TruckTier {
    pub const ALL: [TruckTier; 4] = [
        TruckTier::Small,
        TruckTier::Medium,
        TruckTier::Large,
        TruckTier::Trailer,
    ];

    /// Parse a truck vehicle code (1-4)
    pub fn from_code(code: i64) -> Result<Self, FareError> {
        if !(1..=4).contains(&code) {
            return Err(FareError::invalid_input("vehicle_code", code, "1-4"));
        }
        Ok(Self::ALL[(code - 1) as usize])
    }

    pub fn code(self) -> u8 {
        match self {
            TruckTier::Small => 1,
            TruckTier::Medium => 2,
            TruckTier::Large => 3,
            TruckTier::Trailer => 4,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            TruckTier::Small => "小型車(2t)",
            TruckTier::Medium => "中型車(4t)",
            TruckTier::Large => "大型車(10t)",
            TruckTier::Trailer => "トレーラー(20t)",
        }
    }

    /// Position in per-tier rate arrays
    pub fn index(self) -> usize {
        usize::from(self.code() - 1)
    }
}

impl TryFrom<u8> for TruckTier {
    type Error = FareError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Self::from_code(i64::from(code))
    }
}

impl From<TruckTier> for u8 {
    fn from(tier: TruckTier) -> Self {
        tier.code()
    }
}

impl std::fmt::Display for TruckTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Billing class of the requested vehicle
///
/// Light vehicles are priced only under the Akabou tariff, trucks only under
/// the official tariffs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum VehicleClass {
    /// 軽貨物 (赤帽)
    Light,
    Truck(TruckTier),
}

impl VehicleClass {
    /// Parse a vehicle code: 0 = light, 1-4 = truck tiers
    pub fn from_code(code: i64) -> Result<Self, FareError> {
        match code {
            0 => Ok(VehicleClass::Light),
            1..=4 => TruckTier::from_code(code).map(VehicleClass::Truck),
            _ => Err(FareError::invalid_input("vehicle_code", code, "0-4")),
        }
    }

    pub fn code(self) -> u8 {
        match self {
            VehicleClass::Light => 0,
            VehicleClass::Truck(tier) => tier.code(),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            VehicleClass::Light => "軽貨物(赤帽)",
            VehicleClass::Truck(tier) => tier.name(),
        }
    }
}

impl TryFrom<u8> for VehicleClass {
    type Error = FareError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Self::from_code(i64::from(code))
    }
}

impl From<VehicleClass> for u8 {
    fn from(class: VehicleClass) -> Self {
        class.code()
    }
}

impl std::fmt::Display for VehicleClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Tariff scheme a ranked fare was computed under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FareScheme {
    Distance,
    Time,
    AkabouDistance,
    AkabouTime,
}

impl FareScheme {
    pub fn label(self) -> &'static str {
        match self {
            FareScheme::Distance => "距離制",
            FareScheme::Time => "時間制",
            FareScheme::AkabouDistance => "赤帽（距離制）",
            FareScheme::AkabouTime => "赤帽（時間制）",
        }
    }
}

impl std::fmt::Display for FareScheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Billing system of the time-based tariff
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum HoursSystem {
    FourHour,
    EightHour,
}

impl HoursSystem {
    /// Longest job, in minutes, still billed under the 4-hour system
    pub const FOUR_HOUR_LIMIT_MINUTES: u32 = 240;

    pub fn for_total_minutes(total_minutes: u32) -> Self {
        if total_minutes <= Self::FOUR_HOUR_LIMIT_MINUTES {
            HoursSystem::FourHour
        } else {
            HoursSystem::EightHour
        }
    }

    pub fn hours(self) -> u32 {
        match self {
            HoursSystem::FourHour => 4,
            HoursSystem::EightHour => 8,
        }
    }

    pub fn included_minutes(self) -> u32 {
        self.hours() * 60
    }
}

impl TryFrom<u8> for HoursSystem {
    type Error = FareError;

    fn try_from(hours: u8) -> Result<Self, Self::Error> {
        match hours {
            4 => Ok(HoursSystem::FourHour),
            8 => Ok(HoursSystem::EightHour),
            other => Err(FareError::invalid_input("hours", other, "4 or 8")),
        }
    }
}

impl From<HoursSystem> for u8 {
    fn from(system: HoursSystem) -> Self {
        system.hours() as u8
    }
}

/// Excess surcharge unit of the time-based tariff
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SurchargeKind {
    /// Per 10 km beyond the allowance
    Distance,
    /// Per started hour beyond the included time
    Time,
}

impl std::fmt::Display for SurchargeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SurchargeKind::Distance => write!(f, "distance"),
            SurchargeKind::Time => write!(f, "time"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_codes_round_trip() {
        for code in 1..=10 {
            let region = Region::from_code(code).unwrap();
            assert_eq!(i64::from(region.code()), code);
        }
        assert_eq!(Region::from_code(3).unwrap(), Region::Kanto);
        assert!(Region::from_code(10).unwrap().is_okinawa());
    }

    #[test]
    fn test_region_out_of_range() {
        for code in [0, 11, -1] {
            let err = Region::from_code(code).unwrap_err();
            assert!(err.is_invalid_input());
            assert!(err.to_string().contains("region_code"));
        }
    }

    #[test]
    fn test_vehicle_class_dispatch() {
        assert_eq!(VehicleClass::from_code(0).unwrap(), VehicleClass::Light);
        assert_eq!(
            VehicleClass::from_code(3).unwrap(),
            VehicleClass::Truck(TruckTier::Large)
        );
        let err = VehicleClass::from_code(5).unwrap_err();
        assert!(err.to_string().contains("vehicle_code"));
    }

    #[test]
    fn test_truck_tier_rejects_light_code() {
        assert!(TruckTier::from_code(0).is_err());
        assert_eq!(TruckTier::from_code(4).unwrap(), TruckTier::Trailer);
    }

    #[test]
    fn test_hours_system_threshold() {
        assert_eq!(HoursSystem::for_total_minutes(1), HoursSystem::FourHour);
        assert_eq!(HoursSystem::for_total_minutes(240), HoursSystem::FourHour);
        assert_eq!(HoursSystem::for_total_minutes(241), HoursSystem::EightHour);
        assert_eq!(HoursSystem::EightHour.included_minutes(), 480);
    }

    #[test]
    fn test_serde_uses_numeric_codes() {
        let json = serde_json::to_string(&Region::Kinki).unwrap();
        assert_eq!(json, "6");
        let tier: TruckTier = serde_json::from_str("2").unwrap();
        assert_eq!(tier, TruckTier::Medium);
        assert!(serde_json::from_str::<Region>("11").is_err());
    }

    #[test]
    fn test_scheme_labels() {
        assert_eq!(FareScheme::Distance.to_string(), "距離制");
        assert_eq!(FareScheme::AkabouTime.to_string(), "赤帽（時間制）");
    }
}
