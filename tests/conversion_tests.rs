//! Conversion core tests

use probe_record_sdk::convert::{
    COORDINATE_PRECISION, DensityError, DmsParseError, density_per_hectare, format_decimal,
    parse_decimal, parse_pair, to_square_meters,
};

mod locale_tests {
    use super::*;

    #[test]
    fn test_round_trip_at_coordinate_precision() {
        let values = [
            -33.17133333,
            -70.75033333,
            0.0,
            0.00000001,
            89.99999999,
            179.99999999,
            -179.99999999,
            12.5,
        ];
        for value in values {
            let text = format_decimal(value, COORDINATE_PRECISION);
            assert_eq!(parse_decimal(&text).unwrap(), value, "value {}", value);
        }
    }

    #[test]
    fn test_comma_is_the_stored_separator() {
        assert_eq!(format_decimal(-33.17133333, 8), "-33,17133333");
    }

    #[test]
    fn test_empty_input_is_distinct_from_zero() {
        assert!(parse_decimal("").is_err());
        assert_eq!(parse_decimal("0").unwrap(), 0.0);
    }
}

mod dms_tests {
    use super::*;

    #[test]
    fn test_known_angle_converts_to_decimal() {
        let (lat, lon) = parse_pair("33°10'16.8\"S 70°45'1.2\"W").unwrap();
        assert_eq!(lat.to_decimal_degrees(), -33.17133333);
        assert_eq!(lon.to_decimal_degrees(), -70.75033333);
    }

    #[test]
    fn test_seconds_rounding_carries_into_minutes() {
        let (lat, _) = parse_pair("33°10'59.97\"S 70°45'1.2\"W").unwrap();
        assert_eq!(lat.minutes, 11);
        assert_eq!(lat.seconds, 0.0);
    }

    #[test]
    fn test_malformed_text_is_a_parse_error() {
        assert!(matches!(
            parse_pair("not a coordinate"),
            Err(DmsParseError::PatternMismatch(_) | DmsParseError::NotAPair(_))
        ));
    }
}

mod density_tests {
    use super::*;

    #[test]
    fn test_area_derivation_is_exact() {
        assert_eq!(to_square_meters(2.5), 25_000.0);
    }

    #[test]
    fn test_density_rounds_up() {
        assert_eq!(density_per_hectare(101, 10.0).unwrap(), 11);
    }

    #[test]
    fn test_density_is_undefined_on_zero_area() {
        assert_eq!(
            density_per_hectare(100, 0.0),
            Err(DensityError::NonPositiveArea(0.0))
        );
    }
}
