use crate::core::ledger::{check_partition, AvailabilityLedger, ReservationLedger};
use crate::core::occupancy::Occupancy;
use crate::domain::model::{Catalog, Flight, FlightCode, SeatCode};
use crate::utils::error::{ReservationError, Result};

/// Receipt for a committed reservation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reservation {
    pub flight: FlightCode,
    pub seat: SeatCode,
}

/// Owns the catalog and both ledgers. `reserve_seat` is the only mutator, and
/// it takes `&mut self`, so two reservations can never observe the same seat
/// as free.
#[derive(Debug, Clone)]
pub struct ReservationEngine {
    catalog: Catalog,
    availability: AvailabilityLedger,
    reservations: ReservationLedger,
}

impl ReservationEngine {
    pub fn new(catalog: Catalog) -> Self {
        let availability = AvailabilityLedger::seeded_from(&catalog);
        tracing::debug!("Seeded availability for {} flights", catalog.len());
        Self {
            catalog,
            availability,
            reservations: ReservationLedger::new(),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn flight(&self, code: &FlightCode) -> Result<&Flight> {
        self.catalog
            .get(code)
            .ok_or_else(|| ReservationError::UnknownFlight {
                code: code.to_string(),
            })
    }

    pub fn available_seats(&self, code: &FlightCode) -> &[SeatCode] {
        self.availability.available(code)
    }

    pub fn reserved_seats(&self, code: &FlightCode) -> &[SeatCode] {
        self.reservations.reserved(code)
    }

    pub fn has_reservation_ledger(&self, code: &FlightCode) -> bool {
        self.reservations.has_entry(code)
    }

    /// Reserves `seat` on `flight`.
    ///
    /// Rejects with `UnknownFlight` when the code is not in the catalog (ask for
    /// a new flight code) and with `SeatUnavailable` when the seat is not free
    /// on that flight (ask for another seat on the same flight). Rejections
    /// leave both ledgers untouched.
    pub fn reserve_seat(&mut self, flight: &FlightCode, seat: &SeatCode) -> Result<Reservation> {
        if !self.catalog.contains(flight) {
            tracing::debug!("Rejected reservation: unknown flight {}", flight);
            return Err(ReservationError::UnknownFlight {
                code: flight.to_string(),
            });
        }

        if !self.availability.take(flight, seat) {
            tracing::debug!("Rejected reservation: seat {} unavailable on {}", seat, flight);
            return Err(ReservationError::SeatUnavailable {
                flight: flight.to_string(),
                seat: seat.to_string(),
            });
        }
        self.reservations.append(flight, seat.clone());

        debug_assert!(self.verify_flight(flight).is_ok());
        tracing::info!(
            "Reserved seat {} on flight {} ({} seats left)",
            seat,
            flight,
            self.availability.available(flight).len()
        );

        Ok(Reservation {
            flight: flight.clone(),
            seat: seat.clone(),
        })
    }

    /// Occupancy against the catalog capacity, never the shrinking availability.
    pub fn occupancy(&self, code: &FlightCode) -> Result<Occupancy> {
        let flight = self.flight(code)?;
        Occupancy::compute(code, self.reservations.count(code), flight.capacity())
    }

    pub fn occupancy_all(&self) -> Result<Vec<(&Flight, Occupancy)>> {
        self.catalog
            .flights()
            .iter()
            .map(|flight| {
                self.occupancy(&flight.code)
                    .map(|occupancy| (flight, occupancy))
            })
            .collect()
    }

    pub fn verify_invariants(&self) -> Result<()> {
        self.catalog
            .flights()
            .iter()
            .try_for_each(|flight| self.verify_flight(&flight.code))
    }

    fn verify_flight(&self, code: &FlightCode) -> Result<()> {
        let flight = self.flight(code)?;
        check_partition(
            code,
            &flight.seat_layout,
            self.availability.available(code),
            self.reservations.reserved(code),
        )
    }
}
