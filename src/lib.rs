pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use app::shell::{SessionEnd, Shell};
pub use config::{catalog_config::CatalogConfig, cli::LocalStorage, CliConfig};
pub use core::{
    engine::{Reservation, ReservationEngine},
    occupancy::Occupancy,
    report::{export_report, ScheduleReport, REPORT_FILE_NAME},
};
pub use domain::model::{Catalog, Flight, FlightCode, SeatCode};
pub use utils::error::{ReservationError, Result};
