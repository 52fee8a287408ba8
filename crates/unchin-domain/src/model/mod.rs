//! Domain model types

pub mod request;
pub mod tariff;

pub use request::{FareRequest, SurchargeFlags};
pub use tariff::{AkabouTariff, DistanceBracket, SurchargeRates, TimeBaseFare, UnitFee};
