//! Fare Service - Compare Fares for One Job
//!
//! Turns loosely specified user input into a `FareRequest` (falling back
//! to configured defaults) and runs the comparison against the configured
//! rate table.

use chrono::{Datelike, NaiveDateTime, Timelike, Weekday};
use thiserror::Error;
use tracing::info;
use unchin_domain::service::{
    resolve_akabou_area, resolve_region, AkabouFareService, FareCalculatorService,
    FareComparisonResult,
};
use unchin_domain::{FareRequest, RateLookup};
use unchin_types::{ComparisonError, FareError, Region, VehicleClass};

use crate::config::Config;
use crate::repository::open_rate_repository;

pub const DEPARTURE_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Errors specific to the fare service
#[derive(Debug, Error)]
pub enum FareServiceError {
    #[error("Rate table unavailable: {0}")]
    Repository(#[from] unchin_types::Error),

    #[error(transparent)]
    InvalidRequest(#[from] FareError),

    #[error(transparent)]
    Comparison(#[from] ComparisonError),
}

/// User input for a comparison; unset fields fall back to the config
#[derive(Debug, Clone, Default)]
pub struct FareQuery {
    pub region: Option<i64>,
    /// Overrides `region` (e.g. 東京都)
    pub prefecture: Option<String>,
    pub vehicle: Option<i64>,
    /// Route distance (km)
    pub distance_km: f64,
    pub driving_minutes: Option<u32>,
    pub loading_minutes: Option<u32>,
    pub night: bool,
    pub holiday: bool,
    /// "YYYY-MM-DD HH:MM"; sets night/holiday in addition to the flags
    pub departure: Option<String>,
    pub simple_allowance: bool,
    pub area: Option<String>,
    /// Pickup address, used for the area when `area` is unset
    pub address: Option<String>,
    pub work_minutes: i64,
    pub waiting_minutes: i64,
}

/// Build a `FareRequest` from a query and the configured defaults
pub fn build_request(query: &FareQuery, config: &Config) -> Result<FareRequest, FareError> {
    let region = match query.prefecture.as_deref() {
        Some(prefecture) => resolve_region(prefecture)?,
        None => Region::from_code(query.region.unwrap_or(i64::from(config.default_region)))?,
    };
    let vehicle =
        VehicleClass::from_code(query.vehicle.unwrap_or(i64::from(config.default_vehicle)))?;

    let (mut night, mut holiday) = (query.night, query.holiday);
    if let Some(departure) = query.departure.as_deref() {
        let (dep_night, dep_holiday) = departure_flags(departure)?;
        night |= dep_night;
        holiday |= dep_holiday;
    }

    let area = match (&query.area, &query.address) {
        (Some(area), _) => area.clone(),
        (None, Some(address)) => resolve_akabou_area(address).to_string(),
        (None, None) => String::new(),
    };

    Ok(FareRequest::from_route_distance(region, vehicle, query.distance_km)
        .with_driving_minutes(
            query
                .driving_minutes
                .unwrap_or(config.default_driving_minutes),
        )
        .with_loading_minutes(
            query
                .loading_minutes
                .unwrap_or(config.default_loading_minutes),
        )
        .with_night(night)
        .with_holiday(holiday)
        .with_simple_allowance(query.simple_allowance || config.use_simple_allowance)
        .with_area(area)
        .with_ancillary_minutes(query.work_minutes, query.waiting_minutes))
}

/// (night, holiday) for a departure time: night is 22:00-04:59, holiday is Sunday
pub fn departure_flags(departure: &str) -> Result<(bool, bool), FareError> {
    let at = NaiveDateTime::parse_from_str(departure.trim(), DEPARTURE_FORMAT)
        .map_err(|_| FareError::invalid_input("departure", departure, "YYYY-MM-DD HH:MM"))?;
    let hour = at.hour();
    Ok((hour >= 22 || hour < 5, at.weekday() == Weekday::Sun))
}

/// Compare fares using the rate table named in the config
pub fn compare_fares(
    config: &Config,
    query: &FareQuery,
) -> Result<FareComparisonResult, FareServiceError> {
    let request = build_request(query, config)?;
    let repo = open_rate_repository(config)?;
    let akabou = AkabouFareService::new(repo.akabou_tariff().clone());
    compare_with(&repo, akabou, &request)
}

/// Compare fares against an explicit rate source
pub fn compare_with(
    rates: &dyn RateLookup,
    akabou: AkabouFareService,
    request: &FareRequest,
) -> Result<FareComparisonResult, FareServiceError> {
    let result = FareCalculatorService::new(rates, akabou).compare(request)?;
    info!(
        region = request.region.code(),
        vehicle = request.vehicle.code(),
        distance_km = request.distance_km,
        cheapest = %result.cheapest_scheme(),
        fare = result.cheapest_fare(),
        "fare comparison complete"
    );
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use unchin_types::TruckTier;

    #[test]
    fn test_defaults_come_from_config() {
        let query = FareQuery {
            distance_km: 42.7,
            ..FareQuery::default()
        };
        let request = build_request(&query, &Config::default()).unwrap();
        assert_eq!(request.region, Region::Kanto);
        assert_eq!(request.vehicle, VehicleClass::Truck(TruckTier::Large));
        assert_eq!(request.distance_km, 42);
        assert_eq!(request.driving_minutes, 60);
        assert_eq!(request.loading_minutes, 60);
        assert!(!request.use_simple_allowance);
    }

    #[test]
    fn test_prefecture_overrides_region_code() {
        let query = FareQuery {
            region: Some(1),
            prefecture: Some("福岡県".to_string()),
            distance_km: 10.0,
            ..FareQuery::default()
        };
        let request = build_request(&query, &Config::default()).unwrap();
        assert_eq!(request.region, Region::Kyushu);
    }

    #[test]
    fn test_invalid_codes_name_the_field() {
        let query = FareQuery {
            region: Some(11),
            ..FareQuery::default()
        };
        let err = build_request(&query, &Config::default()).unwrap_err();
        assert!(err.to_string().contains("region_code"));

        let query = FareQuery {
            vehicle: Some(5),
            ..FareQuery::default()
        };
        let err = build_request(&query, &Config::default()).unwrap_err();
        assert!(err.to_string().contains("vehicle_code"));
    }

    #[test]
    fn test_area_from_address() {
        let query = FareQuery {
            vehicle: Some(0),
            address: Some("東京都渋谷区道玄坂1-2-3".to_string()),
            ..FareQuery::default()
        };
        let request = build_request(&query, &Config::default()).unwrap();
        assert_eq!(request.area, "東京23区");

        let query = FareQuery {
            area: Some("大阪市内".to_string()),
            address: Some("北海道札幌市".to_string()),
            ..query
        };
        let request = build_request(&query, &Config::default()).unwrap();
        assert_eq!(request.area, "大阪市内");
    }

    #[test]
    fn test_departure_flags() {
        // 2026-10-18 is a Sunday
        assert_eq!(departure_flags("2026-10-18 23:30").unwrap(), (true, true));
        assert_eq!(departure_flags("2026-10-19 04:59").unwrap(), (true, false));
        assert_eq!(departure_flags("2026-10-19 05:00").unwrap(), (false, false));
        assert_eq!(departure_flags("2026-10-19 21:59").unwrap(), (false, false));
        assert!(departure_flags("tomorrow").unwrap_err().is_invalid_input());
    }

    #[test]
    fn test_departure_adds_to_explicit_flags() {
        let query = FareQuery {
            holiday: true,
            departure: Some("2026-10-20 22:00".to_string()),
            distance_km: 10.0,
            ..FareQuery::default()
        };
        let request = build_request(&query, &Config::default()).unwrap();
        assert!(request.is_night);
        assert!(request.is_holiday);
    }

    #[test]
    fn test_simple_allowance_from_config() {
        let config = Config {
            use_simple_allowance: true,
            ..Config::default()
        };
        let request = build_request(&FareQuery::default(), &config).unwrap();
        assert!(request.use_simple_allowance);
    }
}
