use chrono::NaiveDate;
use flight_reservations::utils::validation::validate_flight_code;
use flight_reservations::{
    export_report, CatalogConfig, FlightCode, LocalStorage, ReservationEngine, ReservationError,
    ScheduleReport, SeatCode, SessionEnd, Shell, REPORT_FILE_NAME,
};
use tempfile::TempDir;

fn engine() -> ReservationEngine {
    ReservationEngine::new(CatalogConfig::embedded().unwrap().into_catalog().unwrap())
}

fn code(s: &str) -> FlightCode {
    s.parse().unwrap()
}

fn seat(s: &str) -> SeatCode {
    s.parse().unwrap()
}

fn strs(seats: &[SeatCode]) -> Vec<&str> {
    seats.iter().map(|s| s.as_str()).collect()
}

#[test]
fn test_fresh_start_occupancy() {
    let engine = engine();
    assert_eq!(engine.occupancy(&code("AV-201")).unwrap().to_string(), "0.00%");
}

#[test]
fn test_first_reservation_and_rejections() {
    let mut engine = engine();
    let av201 = code("AV-201");

    engine.reserve_seat(&av201, &seat("A1")).unwrap();
    assert_eq!(strs(engine.available_seats(&av201)), vec!["A2", "B1", "B2", "C1", "C2"]);
    assert_eq!(strs(engine.reserved_seats(&av201)), vec!["A1"]);
    assert_eq!(engine.occupancy(&av201).unwrap().to_string(), "16.67%");

    let err = engine.reserve_seat(&av201, &seat("A1")).unwrap_err();
    assert!(matches!(err, ReservationError::SeatUnavailable { .. }));
    assert_eq!(strs(engine.available_seats(&av201)), vec!["A2", "B1", "B2", "C1", "C2"]);
    assert_eq!(strs(engine.reserved_seats(&av201)), vec!["A1"]);

    let zz = code("ZZ-999");
    let err = engine.reserve_seat(&zz, &seat("A1")).unwrap_err();
    assert!(matches!(err, ReservationError::UnknownFlight { .. }));
    assert!(!engine.has_reservation_ledger(&zz));

    engine.verify_invariants().unwrap();
}

#[test]
fn test_report_order_after_reservation() {
    let mut engine = engine();
    engine.reserve_seat(&code("AV-201"), &seat("A1")).unwrap();

    let generated_at = NaiveDate::from_ymd_opt(2025, 1, 2)
        .unwrap()
        .and_hms_opt(3, 4, 5)
        .unwrap();
    let report = ScheduleReport::generate(&engine, generated_at).unwrap();
    let codes: Vec<&str> = report.entries().iter().map(|e| e.code.as_str()).collect();
    assert_eq!(codes, vec!["AV-201", "AV-305", "AV-408"]);
    assert_eq!(report.entries()[0].available_seats, 5);

    let lines = report.flight_lines();
    assert_eq!(lines[0], "Flight Code: AV-201");
    assert_eq!(lines[1], "Departure Time: 09:45");
    assert_eq!(lines[4], "Available Seats: 5");
    assert_eq!(lines[5], "Occupancy Rate: 16.67%");
    assert!(report.render().ends_with("Report generated at: 2025-01-02 03:04:05\n"));
}

#[test]
fn test_malformed_flight_code_leaves_ledgers_alone() {
    let engine = engine();
    assert!(matches!(
        validate_flight_code("av1234"),
        Err(ReservationError::MalformedInput { .. })
    ));
    assert!(!engine.has_reservation_ledger(&code("AV-201")));
    engine.verify_invariants().unwrap();
}

#[tokio::test]
async fn test_export_overwrites_existing_report() {
    let temp_dir = TempDir::new().unwrap();
    let report_path = temp_dir.path().join(REPORT_FILE_NAME);
    std::fs::write(&report_path, "stale contents").unwrap();

    let mut engine = engine();
    engine.reserve_seat(&code("AV-305"), &seat("E1")).unwrap();

    let storage = LocalStorage::new(temp_dir.path().to_str().unwrap().to_string());
    let report = ScheduleReport::generate_now(&engine).unwrap();
    let written = export_report(&storage, &report).await.unwrap();
    assert!(written.ends_with(REPORT_FILE_NAME));

    let content = std::fs::read_to_string(&report_path).unwrap();
    assert!(content.starts_with("FLIGHT SCHEDULE REPORT\n"));
    assert!(!content.contains("stale contents"));
    assert!(content.contains("Flight Code: AV-305\nDeparture Time: 14:15\nOrigin: New York\nDestination: Miami\nAvailable Seats: 5\nOccupancy Rate: 16.67%"));
}

#[tokio::test]
async fn test_export_failure_is_reported_not_fatal() {
    let temp_dir = TempDir::new().unwrap();
    // A regular file where the report directory should be.
    let blocker = temp_dir.path().join("not-a-dir");
    std::fs::write(&blocker, "").unwrap();

    let mut engine = engine();
    engine.reserve_seat(&code("AV-201"), &seat("C2")).unwrap();

    let storage = LocalStorage::new(blocker.to_str().unwrap().to_string());
    let report = ScheduleReport::generate_now(&engine).unwrap();
    let err = export_report(&storage, &report).await.unwrap_err();

    assert!(matches!(err, ReservationError::ReportWriteFailure { .. }));
    assert!(err.is_recoverable());
    assert_eq!(strs(engine.reserved_seats(&code("AV-201"))), vec!["C2"]);
    engine.verify_invariants().unwrap();
}

#[tokio::test]
async fn test_full_session_against_local_storage() {
    let temp_dir = TempDir::new().unwrap();
    let storage = LocalStorage::new(temp_dir.path().to_str().unwrap().to_string());

    let script = "1\nAV-408\nd2\ny\nav-201\nB1\nn\n2\n3\n4\n";
    let mut shell = Shell::new(engine(), storage, script.as_bytes(), Vec::new());
    let end = shell.run().await.unwrap();
    assert_eq!(end, SessionEnd::Exited);

    let output = String::from_utf8(shell.output().clone()).unwrap();
    assert!(output.contains("Seat D2 has been successfully reserved for flight AV-408."));
    assert!(output.contains("Seat B1 has been successfully reserved for flight AV-201."));
    assert!(output.contains("Goodbye!"));

    let content = std::fs::read_to_string(temp_dir.path().join(REPORT_FILE_NAME)).unwrap();
    let av201 = content.find("Flight Code: AV-201").unwrap();
    let av305 = content.find("Flight Code: AV-305").unwrap();
    let av408 = content.find("Flight Code: AV-408").unwrap();
    assert!(av201 < av305 && av305 < av408);
    assert_eq!(content.matches("Available Seats: 5").count(), 2);
}
