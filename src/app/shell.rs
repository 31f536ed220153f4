use crate::core::engine::ReservationEngine;
use crate::core::report::{export_report, ScheduleReport};
use crate::domain::model::FlightCode;
use crate::domain::ports::Storage;
use crate::utils::error::{ReservationError, Result};
use crate::utils::validation::{validate_flight_code, validate_seat_code};
use std::io::Write;
use std::ops::ControlFlow;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Reserve,
    Occupancy,
    ExportReport,
    Exit,
}

impl MenuChoice {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(MenuChoice::Reserve),
            "2" => Some(MenuChoice::Occupancy),
            "3" => Some(MenuChoice::ExportReport),
            "4" => Some(MenuChoice::Exit),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    Exited,
    InputClosed,
}

enum Attempt {
    Reserved,
    ChooseFlight,
    Closed,
}

/// Line-oriented operator session around a [`ReservationEngine`].
///
/// All retry-until-valid loops live here; the engine only ever sees
/// validated codes. Input reads are the only await points besides the
/// report write, so an interrupted session never leaves a half-applied
/// reservation behind.
pub struct Shell<R, W, S> {
    engine: ReservationEngine,
    storage: S,
    input: R,
    output: W,
}

impl<R, W, S> Shell<R, W, S>
where
    R: AsyncBufRead + Unpin,
    W: Write,
    S: Storage,
{
    pub fn new(engine: ReservationEngine, storage: S, input: R, output: W) -> Self {
        Self {
            engine,
            storage,
            input,
            output,
        }
    }

    pub fn engine(&self) -> &ReservationEngine {
        &self.engine
    }

    pub fn output(&self) -> &W {
        &self.output
    }

    pub async fn run(&mut self) -> Result<SessionEnd> {
        loop {
            self.print_menu()?;
            let Some(line) = self
                .prompt("\n👉 Enter the number of the action you want to perform: ")
                .await?
            else {
                return Ok(SessionEnd::InputClosed);
            };

            match MenuChoice::parse(&line) {
                Some(MenuChoice::Reserve) => {
                    self.say("\n -------------------- RESERVE A SEAT --------------------")?;
                    if self.reserve_seats().await?.is_break() {
                        return Ok(SessionEnd::InputClosed);
                    }
                }
                Some(MenuChoice::Occupancy) => {
                    self.say("\n -------- CALCULATE OCCUPANCY PERCENTAGE --------")?;
                    self.show_occupancy()?;
                }
                Some(MenuChoice::ExportReport) => {
                    self.say("\n --------- EXPORT SORTED FLIGHTS REPORT ---------")?;
                    self.export_schedule().await?;
                }
                Some(MenuChoice::Exit) => {
                    self.say("\n👋 Thank you for using the Flight Reservation System. Goodbye!")?;
                    return Ok(SessionEnd::Exited);
                }
                None => {
                    tracing::debug!("Unrecognized menu option: {:?}", line);
                    self.say("\n❌ Invalid option. Please enter a number between 1 and 4.")?;
                }
            }
        }
    }

    fn print_menu(&mut self) -> Result<()> {
        self.say("\n---------- 📊 Flight Reservation System ----------\n")?;
        self.say("1. Reserve a seat")?;
        self.say("2. Calculate occupancy percentage per flight")?;
        self.say("3. Export sorted flights report")?;
        self.say("4. 🚪 Exit")
    }

    async fn reserve_seats(&mut self) -> Result<ControlFlow<()>> {
        loop {
            let Some(flight) = self
                .ask_until_valid("\nEnter the flight code (format: XX-###): ", validate_flight_code)
                .await?
            else {
                return Ok(ControlFlow::Break(()));
            };

            if let Err(e) = self.engine.flight(&flight) {
                self.say(&format!("❌ {}", e.user_friendly_message()))?;
                continue;
            }
            if self.engine.available_seats(&flight).is_empty() {
                self.say(&format!("❌ Flight {} is fully booked. Please choose another flight.", flight))?;
                continue;
            }

            match self.reserve_on(&flight).await? {
                Attempt::Reserved => {}
                Attempt::ChooseFlight => continue,
                Attempt::Closed => return Ok(ControlFlow::Break(())),
            }

            let Some(answer) = self
                .prompt("\nWould you like to reserve another seat? (y/n): ")
                .await?
            else {
                return Ok(ControlFlow::Break(()));
            };
            if !answer.trim().eq_ignore_ascii_case("y") {
                return Ok(ControlFlow::Continue(()));
            }
        }
    }

    async fn reserve_on(&mut self, flight: &FlightCode) -> Result<Attempt> {
        loop {
            let seats: Vec<&str> = self
                .engine
                .available_seats(flight)
                .iter()
                .map(|seat| seat.as_str())
                .collect();
            let listing = format!("\nAvailable seats for flight {}: {}", flight, seats.join(", "));
            self.say(&listing)?;

            let Some(seat) = self
                .ask_until_valid(
                    "\nEnter the seat you wish to reserve (e.g., A1 or D12): ",
                    validate_seat_code,
                )
                .await?
            else {
                return Ok(Attempt::Closed);
            };

            match self.engine.reserve_seat(flight, &seat) {
                Ok(reservation) => {
                    self.say(&format!(
                        "✅ Seat {} has been successfully reserved for flight {}.",
                        reservation.seat, reservation.flight
                    ))?;
                    return Ok(Attempt::Reserved);
                }
                Err(e @ ReservationError::SeatUnavailable { .. }) => {
                    self.say(&format!("❌ {}", e.user_friendly_message()))?;
                }
                Err(e @ ReservationError::UnknownFlight { .. }) => {
                    self.say(&format!("❌ {}", e.user_friendly_message()))?;
                    return Ok(Attempt::ChooseFlight);
                }
                Err(e) => return Err(e),
            }
        }
    }

    fn show_occupancy(&mut self) -> Result<()> {
        let rows: Vec<String> = self
            .engine
            .occupancy_all()?
            .into_iter()
            .map(|(flight, occupancy)| {
                format!(
                    "\nFlight {}:\nTotal seats: {}\nOccupied seats: {}\nOccupancy rate: {}",
                    flight.code, occupancy.total, occupancy.occupied, occupancy
                )
            })
            .collect();

        for row in rows {
            self.say(&row)?;
        }
        Ok(())
    }

    async fn export_schedule(&mut self) -> Result<()> {
        let report = ScheduleReport::generate_now(&self.engine)?;
        match export_report(&self.storage, &report).await {
            Ok(path) => {
                self.say(&format!(
                    "\n✅ Flight schedule report has been generated successfully! ({})",
                    path
                ))?;
            }
            Err(e) if e.is_recoverable() => {
                tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
                self.say(&format!("❌ {}", e.user_friendly_message()))?;
            }
            Err(e) => return Err(e),
        }
        Ok(())
    }

    /// Re-prompts until `validate` accepts the input. `None` means input ended.
    async fn ask_until_valid<T>(
        &mut self,
        prompt: &str,
        validate: fn(&str) -> Result<T>,
    ) -> Result<Option<T>> {
        loop {
            let Some(raw) = self.prompt(prompt).await? else {
                return Ok(None);
            };
            match validate(&raw) {
                Ok(value) => return Ok(Some(value)),
                Err(e) => {
                    tracing::debug!("Rejected input: {}", e);
                    self.say(&format!("⚠️ {}", e.user_friendly_message()))?;
                }
            }
        }
    }

    async fn prompt(&mut self, text: &str) -> Result<Option<String>> {
        write!(self.output, "{}", text)?;
        self.output.flush()?;

        // Undecodable bytes become U+FFFD and fail validation like any other typo.
        let mut raw = Vec::new();
        if self.input.read_until(b'\n', &mut raw).await? == 0 {
            return Ok(None);
        }
        let line = String::from_utf8_lossy(&raw);
        Ok(Some(line.trim_end_matches(['\n', '\r']).to_string()))
    }

    fn say(&mut self, text: &str) -> Result<()> {
        writeln!(self.output, "{}", text)?;
        Ok(())
    }
}
