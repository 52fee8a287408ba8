//! Domain services
//!
//! Pure fare calculations. Only the official tariffs consult a `RateLookup`;
//! the Akabou tariff is self-contained.

pub mod akabou_fare;
pub mod distance_fare;
pub mod distance_rounder;
pub mod fare_calculator;
pub mod region_resolver;
pub mod surcharge;
pub mod time_fare;

pub use akabou_fare::{
    AdditionalFeesResult, AkabouDistanceFareResult, AkabouFareService, AkabouTimeFareResult,
};
pub use distance_fare::{DistanceFareResult, DistanceFareService};
pub use distance_rounder::round_distance;
pub use fare_calculator::{
    AkabouResults, FareCalculatorService, FareComparisonResult, FareRanking, SchemeResults,
    TruckResults,
};
pub use region_resolver::{resolve_akabou_area, resolve_region};
pub use surcharge::{apply_surcharges, SurchargeBreakdown};
pub use time_fare::{AllowanceMode, TimeFareInput, TimeFareResult, TimeFareService};
