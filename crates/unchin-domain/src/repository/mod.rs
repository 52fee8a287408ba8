//! Repository trait definitions for rate tables

use unchin_types::{HoursSystem, RateLookupError, Region, SurchargeKind, TruckTier, Yen};

use crate::model::TimeBaseFare;

/// Read-only provider of official tariff amounts
///
/// Implementations may be backed by files, a database, or a remote service.
/// Calls are synchronous and may fail; callers never retry.
pub trait RateLookup {
    /// Base fare and its included kilometres for the time-based tariff
    fn base_fare(
        &self,
        region: Region,
        tier: TruckTier,
        hours: HoursSystem,
    ) -> Result<TimeBaseFare, RateLookupError>;

    /// Excess surcharge unit price (per 10 km, or per hour)
    fn surcharge_unit(
        &self,
        region: Region,
        tier: TruckTier,
        kind: SurchargeKind,
    ) -> Result<Yen, RateLookupError>;

    /// Distance-tariff fare for an already rounded billing distance
    fn distance_fare(
        &self,
        region: Region,
        tier: TruckTier,
        rounded_km: u32,
    ) -> Result<Yen, RateLookupError>;
}
