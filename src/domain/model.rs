use crate::utils::error::{ReservationError, Result};
use crate::utils::validation::{validate_flight_code, validate_seat_code};
use chrono::NaiveTime;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::str::FromStr;

/// A flight code in `XX-###` form. Only obtainable through validation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FlightCode(String);

impl FlightCode {
    pub(crate) fn from_validated(code: String) -> Self {
        Self(code)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for FlightCode {
    type Err = ReservationError;

    fn from_str(s: &str) -> Result<Self> {
        validate_flight_code(s)
    }
}

impl fmt::Display for FlightCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A seat identifier: one letter followed by one or two digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SeatCode(String);

impl SeatCode {
    pub(crate) fn from_validated(seat: String) -> Self {
        Self(seat)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for SeatCode {
    type Err = ReservationError;

    fn from_str(s: &str) -> Result<Self> {
        validate_seat_code(s)
    }
}

impl fmt::Display for SeatCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flight {
    pub code: FlightCode,
    pub origin: String,
    pub destination: String,
    pub departure: NaiveTime,
    pub seat_layout: Vec<SeatCode>,
}

impl Flight {
    pub fn capacity(&self) -> usize {
        self.seat_layout.len()
    }

    pub fn departure_label(&self) -> String {
        self.departure.format("%H:%M").to_string()
    }
}

/// Immutable flight catalog, kept in load order.
#[derive(Debug, Clone)]
pub struct Catalog {
    flights: Vec<Flight>,
    index: HashMap<FlightCode, usize>,
}

impl Catalog {
    /// Builds a catalog, rejecting duplicate flight codes, duplicate seats
    /// within a flight and empty seat layouts.
    pub fn new(flights: Vec<Flight>) -> Result<Self> {
        let mut index = HashMap::with_capacity(flights.len());

        for (position, flight) in flights.iter().enumerate() {
            if flight.seat_layout.is_empty() {
                return Err(ReservationError::DegenerateFlight {
                    code: flight.code.to_string(),
                });
            }

            let mut seen = HashSet::with_capacity(flight.seat_layout.len());
            if let Some(dup) = flight.seat_layout.iter().find(|seat| !seen.insert(*seat)) {
                return Err(ReservationError::InvalidCatalog {
                    message: format!("seat {} appears twice on flight {}", dup, flight.code),
                });
            }

            if index.insert(flight.code.clone(), position).is_some() {
                return Err(ReservationError::InvalidCatalog {
                    message: format!("flight code {} is defined more than once", flight.code),
                });
            }
        }

        Ok(Self { flights, index })
    }

    pub fn get(&self, code: &FlightCode) -> Option<&Flight> {
        self.index.get(code).map(|&position| &self.flights[position])
    }

    pub fn contains(&self, code: &FlightCode) -> bool {
        self.index.contains_key(code)
    }

    pub fn flights(&self) -> &[Flight] {
        &self.flights
    }

    pub fn len(&self) -> usize {
        self.flights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flights.is_empty()
    }
}
