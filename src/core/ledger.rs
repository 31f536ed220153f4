use crate::domain::model::{Catalog, FlightCode, SeatCode};
use crate::utils::error::{ReservationError, Result};
use std::collections::{BTreeMap, HashMap, HashSet};

/// Working inventory of unreserved seats per flight.
///
/// Seeded once from the catalog layouts; afterwards seats only ever leave it,
/// and they keep the relative order of the catalog layout.
#[derive(Debug, Clone, Default)]
pub struct AvailabilityLedger {
    seats: HashMap<FlightCode, Vec<SeatCode>>,
}

impl AvailabilityLedger {
    pub fn seeded_from(catalog: &Catalog) -> Self {
        let seats = catalog
            .flights()
            .iter()
            .map(|flight| (flight.code.clone(), flight.seat_layout.clone()))
            .collect();
        Self { seats }
    }

    pub fn available(&self, flight: &FlightCode) -> &[SeatCode] {
        self.seats.get(flight).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Removes `seat` and returns whether it was present.
    pub(crate) fn take(&mut self, flight: &FlightCode, seat: &SeatCode) -> bool {
        let Some(seats) = self.seats.get_mut(flight) else {
            return false;
        };
        match seats.iter().position(|s| s == seat) {
            Some(position) => {
                seats.remove(position);
                true
            }
            None => false,
        }
    }
}

/// Append-only record of reserved seats, in reservation order.
#[derive(Debug, Clone, Default)]
pub struct ReservationLedger {
    entries: BTreeMap<FlightCode, Vec<SeatCode>>,
}

impl ReservationLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reserved(&self, flight: &FlightCode) -> &[SeatCode] {
        self.entries.get(flight).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn has_entry(&self, flight: &FlightCode) -> bool {
        self.entries.contains_key(flight)
    }

    pub fn count(&self, flight: &FlightCode) -> usize {
        self.reserved(flight).len()
    }

    pub(crate) fn append(&mut self, flight: &FlightCode, seat: SeatCode) {
        self.entries.entry(flight.clone()).or_default().push(seat);
    }
}

/// Checks that `available ⊎ reserved` is exactly the flight's seat layout.
pub fn check_partition(
    flight: &FlightCode,
    layout: &[SeatCode],
    available: &[SeatCode],
    reserved: &[SeatCode],
) -> Result<()> {
    let violation = |message: String| ReservationError::InvariantViolation {
        flight: flight.to_string(),
        message,
    };

    let layout_set: HashSet<&SeatCode> = layout.iter().collect();
    let mut seen: HashSet<&SeatCode> = HashSet::with_capacity(layout.len());

    for seat in available.iter().chain(reserved) {
        if !layout_set.contains(seat) {
            return Err(violation(format!("seat {} is not part of the layout", seat)));
        }
        if !seen.insert(seat) {
            return Err(violation(format!("seat {} is tracked twice", seat)));
        }
    }

    if let Some(missing) = layout.iter().find(|seat| !seen.contains(seat)) {
        return Err(violation(format!(
            "seat {} is neither available nor reserved",
            missing
        )));
    }

    Ok(())
}
