use crate::core::engine::ReservationEngine;
use crate::core::occupancy::Occupancy;
use crate::domain::model::FlightCode;
use crate::domain::ports::Storage;
use crate::utils::error::{ReservationError, Result};
use chrono::{Local, NaiveDateTime, NaiveTime};

pub const REPORT_FILE_NAME: &str = "flight_schedule_report.txt";

const RULE_WIDTH: usize = 50;
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, PartialEq)]
pub struct ReportEntry {
    pub code: FlightCode,
    pub departure: NaiveTime,
    pub origin: String,
    pub destination: String,
    pub available_seats: usize,
    pub occupancy: Occupancy,
}

/// Point-in-time snapshot of the schedule, ordered by departure time and then
/// flight code.
#[derive(Debug, Clone)]
pub struct ScheduleReport {
    entries: Vec<ReportEntry>,
    generated_at: NaiveDateTime,
}

impl ScheduleReport {
    pub fn generate(engine: &ReservationEngine, generated_at: NaiveDateTime) -> Result<Self> {
        let mut flights: Vec<_> = engine.catalog().flights().iter().collect();
        flights.sort_by(|a, b| {
            a.departure
                .cmp(&b.departure)
                .then_with(|| a.code.cmp(&b.code))
        });

        let entries = flights
            .into_iter()
            .map(|flight| -> Result<ReportEntry> {
                Ok(ReportEntry {
                    code: flight.code.clone(),
                    departure: flight.departure,
                    origin: flight.origin.clone(),
                    destination: flight.destination.clone(),
                    available_seats: engine.available_seats(&flight.code).len(),
                    occupancy: engine.occupancy(&flight.code)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            entries,
            generated_at,
        })
    }

    pub fn generate_now(engine: &ReservationEngine) -> Result<Self> {
        Self::generate(engine, Local::now().naive_local())
    }

    pub fn entries(&self) -> &[ReportEntry] {
        &self.entries
    }

    /// The per-flight section lines, without header or timestamp.
    pub fn flight_lines(&self) -> Vec<String> {
        let mut lines = Vec::with_capacity(self.entries.len() * 8);
        for entry in &self.entries {
            lines.push(format!("Flight Code: {}", entry.code));
            lines.push(format!("Departure Time: {}", entry.departure.format("%H:%M")));
            lines.push(format!("Origin: {}", entry.origin));
            lines.push(format!("Destination: {}", entry.destination));
            lines.push(format!("Available Seats: {}", entry.available_seats));
            lines.push(format!("Occupancy Rate: {}", entry.occupancy));
            lines.push("-".repeat(RULE_WIDTH));
            lines.push(String::new());
        }
        lines
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str("FLIGHT SCHEDULE REPORT\n");
        out.push_str(&"=".repeat(RULE_WIDTH));
        out.push_str("\n\n");
        for line in self.flight_lines() {
            out.push_str(&line);
            out.push('\n');
        }
        out.push_str(&format!(
            "\nReport generated at: {}\n",
            self.generated_at.format(TIMESTAMP_FORMAT)
        ));
        out
    }
}

/// Writes the rendered report as `flight_schedule_report.txt`. Any I/O
/// failure is reported as `ReportWriteFailure`; engine state is never touched.
pub async fn export_report<S: Storage>(storage: &S, report: &ScheduleReport) -> Result<String> {
    match storage
        .write_file(REPORT_FILE_NAME, report.render().as_bytes())
        .await
    {
        Ok(path) => {
            tracing::info!(
                "Exported schedule report with {} flights to {}",
                report.entries().len(),
                path
            );
            Ok(path)
        }
        Err(ReservationError::IoError(source)) => {
            tracing::warn!("Schedule report export failed: {}", source);
            Err(ReservationError::ReportWriteFailure {
                path: REPORT_FILE_NAME.to_string(),
                source,
            })
        }
        Err(other) => Err(other),
    }
}
