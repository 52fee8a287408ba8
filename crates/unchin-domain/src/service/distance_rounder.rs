//! Billing distance for the official distance tariff
//!
//! Outside Okinawa: up to 200 km in 10 km steps, up to 500 km in 20 km
//! steps, beyond that in 50 km steps. Okinawa: up to 10 km in 5 km steps,
//! up to 200 km in 10 km steps, beyond that in 20 km steps.

use unchin_types::{FareError, Region};

/// Round a route distance up to the billing unit of its band
pub fn round_distance(distance_km: u32, region: Region) -> Result<u32, FareError> {
    if distance_km < 1 {
        return Err(FareError::invalid_input("distance_km", distance_km, "1 or more"));
    }
    round_up(distance_km, billing_unit(distance_km, region)).ok_or_else(|| {
        FareError::invalid_input(
            "distance_km",
            distance_km,
            "a distance within the billing range",
        )
    })
}

/// Step size applied to `distance_km` in `region`
pub fn billing_unit(distance_km: u32, region: Region) -> u32 {
    if region.is_okinawa() {
        match distance_km {
            0..=10 => 5,
            11..=200 => 10,
            _ => 20,
        }
    } else {
        match distance_km {
            0..=200 => 10,
            201..=500 => 20,
            _ => 50,
        }
    }
}

fn round_up(value: u32, unit: u32) -> Option<u32> {
    value.div_ceil(unit).checked_mul(unit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mainland_bands() {
        let cases = [
            (1, 10),
            (10, 10),
            (11, 20),
            (195, 200),
            (200, 200),
            (201, 220),
            (215, 220),
            (500, 500),
            (501, 550),
            (549, 550),
            (551, 600),
        ];
        for (km, expected) in cases {
            assert_eq!(round_distance(km, Region::Kanto).unwrap(), expected, "{}km", km);
        }
    }

    #[test]
    fn test_okinawa_bands() {
        let cases = [
            (1, 5),
            (5, 5),
            (6, 10),
            (10, 10),
            (11, 20),
            (200, 200),
            (201, 220),
            (290, 300),
        ];
        for (km, expected) in cases {
            assert_eq!(round_distance(km, Region::Okinawa).unwrap(), expected, "{}km", km);
        }
    }

    #[test]
    fn test_zero_distance_rejected() {
        let err = round_distance(0, Region::Kanto).unwrap_err();
        assert!(err.is_invalid_input());
        assert!(err.to_string().contains("distance_km"));
    }

    #[test]
    fn test_upper_bound() {
        assert_eq!(round_distance(4_294_967_250, Region::Kanto).unwrap(), 4_294_967_250);
        assert_eq!(round_distance(4_294_967_280, Region::Okinawa).unwrap(), 4_294_967_280);

        for region in [Region::Kanto, Region::Okinawa] {
            let err = round_distance(u32::MAX, region).unwrap_err();
            assert!(err.is_invalid_input());
            assert!(err.to_string().contains("distance_km"));
        }
    }

    #[test]
    fn test_smallest_multiple_and_idempotent() {
        for region in Region::ALL {
            for km in 1..=800 {
                let rounded = round_distance(km, region).unwrap();
                let unit = billing_unit(km, region);
                assert!(rounded >= km);
                assert_eq!(rounded % unit, 0);
                assert!(rounded - km < unit);
                assert_eq!(round_distance(rounded, region).unwrap(), rounded);
            }
        }
    }
}
