//! DMS coordinate parsing and conversion
//!
//! Parses Degrees-Minutes-Seconds coordinate text (e.g. `33°10'16.8"S`) into
//! structured angles and converts them to signed decimal degrees. Two entry
//! points exist because call sites hand over either a full latitude/longitude
//! pair or a single angle token.
//!
//! Pattern mismatch is detected by regex before any numeric interpretation,
//! so malformed text never reaches the arithmetic below.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Minutes per degree
const MINUTES_PER_DEGREE: f64 = 60.0;

/// Seconds per degree
const SECONDS_PER_DEGREE: f64 = 3600.0;

/// Highest valid minutes value after carry
const MAX_MINUTES: u32 = 59;

/// Seconds at which the value carries into minutes
const CARRY_SECONDS: f64 = 60.0;

/// Scale factor for the 8-fractional-digit decimal-degree rounding
const DECIMAL_DEGREE_SCALE: f64 = 1e8;

static ANGLE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^(\d+)°(\d+)'(\d+(?:\.\d+)?)"([NSEW])$"#).expect("valid regex"));

/// Errors that can occur while parsing DMS coordinate text
#[derive(Debug, Clone, Error, PartialEq, Serialize)]
pub enum DmsParseError {
    /// Input does not match the `D°M'S"H` grammar
    #[error("coordinate does not match the D°M'S\"H pattern: {0}")]
    PatternMismatch(String),

    /// Expected two whitespace-separated angle tokens
    #[error("expected a latitude and a longitude token: {0}")]
    NotAPair(String),

    /// Pair tokens are on the wrong axes (e.g. longitude first)
    #[error("expected a {expected} hemisphere, found {found}")]
    WrongAxis {
        expected: &'static str,
        found: Hemisphere,
    },

    /// Minutes outside 0-59
    #[error("minutes out of range (0-59): {0}")]
    MinutesOutOfRange(u32),

    /// Seconds outside 0.0-60.0
    #[error("seconds out of range (0.0-60.0): {0}")]
    SecondsOutOfRange(f64),

    /// Angle magnitude exceeds the axis bound, carry included
    #[error("{axis} angle exceeds {limit}°")]
    OutOfRange { axis: &'static str, limit: f64 },
}

/// Hemisphere letter of a DMS angle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Hemisphere {
    North,
    South,
    East,
    West,
}

impl Hemisphere {
    fn from_letter(letter: &str) -> Option<Self> {
        match letter {
            "N" => Some(Self::North),
            "S" => Some(Self::South),
            "E" => Some(Self::East),
            "W" => Some(Self::West),
            _ => None,
        }
    }

    /// Sign applied to the decimal magnitude (S and W are negative)
    pub fn sign(self) -> f64 {
        match self {
            Self::North | Self::East => 1.0,
            Self::South | Self::West => -1.0,
        }
    }

    /// Whether this hemisphere belongs to the latitude axis
    pub fn is_latitude(self) -> bool {
        matches!(self, Self::North | Self::South)
    }

    /// Whether this hemisphere belongs to the longitude axis
    pub fn is_longitude(self) -> bool {
        !self.is_latitude()
    }

    fn axis(self) -> &'static str {
        if self.is_latitude() { "latitude" } else { "longitude" }
    }

    fn degree_limit(self) -> f64 {
        if self.is_latitude() { 90.0 } else { 180.0 }
    }
}

impl fmt::Display for Hemisphere {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = match self {
            Self::North => "N",
            Self::South => "S",
            Self::East => "E",
            Self::West => "W",
        };
        write!(f, "{}", letter)
    }
}

/// A parsed DMS angle
///
/// Ranges are enforced at construction: minutes 0-59 and seconds below 60.0
/// after the rounding carry, so a stored angle never holds a literal 60.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DmsAngle {
    pub degrees: u32,
    pub minutes: u32,
    pub seconds: f64,
    pub hemisphere: Hemisphere,
}

impl DmsAngle {
    /// Build an angle from raw parsed parts.
    ///
    /// Seconds are rounded to one fractional digit; an exact 60.0 carries into
    /// minutes, and minutes reaching 60 carry onward into degrees. The final
    /// magnitude is then checked against the hemisphere's degree bound.
    pub fn new(
        degrees: u32,
        minutes: u32,
        seconds: f64,
        hemisphere: Hemisphere,
    ) -> Result<Self, DmsParseError> {
        if minutes > MAX_MINUTES {
            return Err(DmsParseError::MinutesOutOfRange(minutes));
        }
        if !(0.0..=CARRY_SECONDS).contains(&seconds) {
            return Err(DmsParseError::SecondsOutOfRange(seconds));
        }

        let mut degrees = degrees;
        let mut minutes = minutes;
        let mut seconds = (seconds * 10.0).round() / 10.0;
        if seconds >= CARRY_SECONDS {
            seconds = 0.0;
            minutes += 1;
        }
        if minutes > MAX_MINUTES {
            minutes = 0;
            degrees += 1;
        }

        let angle = Self {
            degrees,
            minutes,
            seconds,
            hemisphere,
        };
        if angle.magnitude() > hemisphere.degree_limit() {
            return Err(DmsParseError::OutOfRange {
                axis: hemisphere.axis(),
                limit: hemisphere.degree_limit(),
            });
        }
        Ok(angle)
    }

    /// Unsigned decimal magnitude of the angle
    fn magnitude(&self) -> f64 {
        self.degrees as f64
            + self.minutes as f64 / MINUTES_PER_DEGREE
            + self.seconds / SECONDS_PER_DEGREE
    }

    /// Signed decimal degrees, rounded to 8 fractional digits
    pub fn to_decimal_degrees(&self) -> f64 {
        let signed = self.hemisphere.sign() * self.magnitude();
        (signed * DECIMAL_DEGREE_SCALE).round() / DECIMAL_DEGREE_SCALE
    }
}

/// Parse a single DMS angle token (legacy call sites pass one angle per call).
pub fn parse_angle(input: &str) -> Result<DmsAngle, DmsParseError> {
    let captures = ANGLE_PATTERN
        .captures(input.trim())
        .ok_or_else(|| DmsParseError::PatternMismatch(input.to_string()))?;

    // The pattern guarantees digit-only groups; absurdly long digit runs still
    // overflow, so keep those as typed failures too.
    let degrees: u32 = captures[1]
        .parse()
        .map_err(|_| DmsParseError::PatternMismatch(input.to_string()))?;
    let minutes: u32 = captures[2]
        .parse()
        .map_err(|_| DmsParseError::PatternMismatch(input.to_string()))?;
    let seconds: f64 = captures[3]
        .parse()
        .map_err(|_| DmsParseError::PatternMismatch(input.to_string()))?;
    let hemisphere = Hemisphere::from_letter(&captures[4])
        .ok_or_else(|| DmsParseError::PatternMismatch(input.to_string()))?;

    DmsAngle::new(degrees, minutes, seconds, hemisphere)
}

/// Parse a whitespace-separated latitude/longitude pair.
///
/// The first token must carry an N/S hemisphere and the second an E/W one.
pub fn parse_pair(input: &str) -> Result<(DmsAngle, DmsAngle), DmsParseError> {
    let tokens: Vec<&str> = input.split_whitespace().collect();
    if tokens.len() != 2 {
        return Err(DmsParseError::NotAPair(input.to_string()));
    }

    let latitude = parse_angle(tokens[0])?;
    let longitude = parse_angle(tokens[1])?;

    if !latitude.hemisphere.is_latitude() {
        return Err(DmsParseError::WrongAxis {
            expected: "latitude",
            found: latitude.hemisphere,
        });
    }
    if !longitude.hemisphere.is_longitude() {
        return Err(DmsParseError::WrongAxis {
            expected: "longitude",
            found: longitude.hemisphere,
        });
    }

    Ok((latitude, longitude))
}
