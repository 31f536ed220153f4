use crate::domain::model::{FlightCode, SeatCode};
use crate::utils::error::{ReservationError, Result};
use chrono::NaiveTime;
use regex::Regex;
use std::sync::LazyLock;

static FLIGHT_CODE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]{2}-[0-9]{3}$").expect("flight code pattern compiles"));

static SEAT_CODE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z][0-9]{1,2}$").expect("seat code pattern compiles"));

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

fn normalize(raw: &str) -> String {
    raw.trim().to_uppercase()
}

/// Checks the shape of a flight code (`XX-###`) after uppercasing.
/// Catalog membership is not checked here.
pub fn validate_flight_code(raw: &str) -> Result<FlightCode> {
    let code = normalize(raw);
    if FLIGHT_CODE_PATTERN.is_match(&code) {
        Ok(FlightCode::from_validated(code))
    } else {
        Err(ReservationError::MalformedInput {
            field: "flight code",
            value: raw.to_string(),
            expected: "two letters, a dash, and three digits (e.g., AV-123)",
        })
    }
}

/// Checks the shape of a seat identifier (letter + one or two digits) after
/// uppercasing. Availability is not checked here.
pub fn validate_seat_code(raw: &str) -> Result<SeatCode> {
    let seat = normalize(raw);
    if SEAT_CODE_PATTERN.is_match(&seat) {
        Ok(SeatCode::from_validated(seat))
    } else {
        Err(ReservationError::MalformedInput {
            field: "seat",
            value: raw.to_string(),
            expected: "a letter followed by one or two digits (e.g., A1 or D12)",
        })
    }
}

pub fn validate_departure_time(field_name: &str, value: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(value.trim(), "%H:%M").map_err(|e| {
        ReservationError::ConfigValidationError {
            field: field_name.to_string(),
            message: format!("'{}' is not a valid HH:MM time: {}", value, e),
        }
    })
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(ReservationError::ConfigValidationError {
            field: field_name.to_string(),
            message: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(ReservationError::ConfigValidationError {
            field: field_name.to_string(),
            message: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ReservationError::ConfigValidationError {
            field: field_name.to_string(),
            message: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}
