use crate::domain::model::FlightCode;
use crate::utils::error::{ReservationError, Result};
use std::fmt;

/// Reserved seats against fixed capacity for one flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Occupancy {
    pub occupied: usize,
    pub total: usize,
}

impl Occupancy {
    /// Fails with `DegenerateFlight` when the flight has no capacity.
    pub fn compute(flight: &FlightCode, occupied: usize, total: usize) -> Result<Self> {
        if total == 0 {
            return Err(ReservationError::DegenerateFlight {
                code: flight.to_string(),
            });
        }
        Ok(Self { occupied, total })
    }

    pub fn percentage(&self) -> f64 {
        self.occupied as f64 / self.total as f64 * 100.0
    }
}

impl fmt::Display for Occupancy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}%", self.percentage())
    }
}
