use anyhow::Context;
use clap::Parser;
use flight_reservations::utils::error::ErrorSeverity;
use flight_reservations::utils::{logger, validation::Validate};
use flight_reservations::{CliConfig, LocalStorage, ReservationEngine, SessionEnd, Shell};
use tokio::io::BufReader;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose, config.log_format);

    tracing::info!("Starting flight-reservations");
    tracing::debug!("CLI config: {:?}", config);

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let catalog = config
        .load_catalog()
        .inspect_err(|e| {
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
        })
        .context("failed to load flight catalog")?;

    let engine = ReservationEngine::new(catalog);
    let storage = LocalStorage::new(config.report_dir.clone());
    let stdin = BufReader::new(tokio::io::stdin());
    let mut shell = Shell::new(engine, storage, stdin, std::io::stdout());

    // Input reads are the only points where the interrupt can win the race,
    // so a reservation is never cut in half.
    let outcome = tokio::select! {
        result = shell.run() => Some(result),
        _ = tokio::signal::ctrl_c() => None,
    };

    match outcome {
        Some(Ok(SessionEnd::Exited)) => {
            tracing::info!("Session ended by operator");
        }
        Some(Ok(SessionEnd::InputClosed)) => {
            tracing::info!("Input closed, ending session");
            println!("\n👋 Input closed. Goodbye!");
        }
        Some(Err(e)) => {
            tracing::error!(
                "❌ Session failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());

            let exit_code = match e.severity() {
                ErrorSeverity::Low | ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };
            std::process::exit(exit_code);
        }
        None => {
            tracing::warn!("Interrupted by operator");
            println!("\n\n❌ Program interrupted. Exiting...");
        }
    }

    let engine = shell.engine();
    let reserved: usize = engine
        .catalog()
        .flights()
        .iter()
        .map(|flight| engine.reserved_seats(&flight.code).len())
        .sum();
    tracing::info!("Session summary: {} seats reserved", reserved);

    // The stdin reader may still be parked on a blocking read; don't wait for it.
    std::process::exit(0);
}
