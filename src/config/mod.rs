pub mod catalog_config;
pub mod cli;

use crate::domain::model::Catalog;
use crate::utils::error::Result;
use crate::utils::logger::LogFormat;
use crate::utils::validation::{validate_path, Validate};
use catalog_config::CatalogConfig;
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "flight-reservations")]
#[command(about = "Interactive seat reservation and schedule reporting for a fixed flight catalog")]
pub struct CliConfig {
    /// TOML flight catalog to use instead of the built-in one
    #[arg(long)]
    pub catalog: Option<String>,

    /// Directory the schedule report is written to
    #[arg(long, default_value = ".")]
    pub report_dir: String,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

impl CliConfig {
    pub fn load_catalog(&self) -> Result<Catalog> {
        let config = match &self.catalog {
            Some(path) => {
                tracing::info!("Loading catalog from {}", path);
                CatalogConfig::from_file(path)?
            }
            None => CatalogConfig::embedded()?,
        };
        config.into_catalog()
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_path("report_dir", &self.report_dir)?;
        if let Some(path) = &self.catalog {
            validate_path("catalog", path)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CliConfig::parse_from(["flight-reservations"]);
        assert_eq!(config.report_dir, ".");
        assert!(config.catalog.is_none());
        assert_eq!(config.log_format, LogFormat::Compact);
        assert!(config.validate().is_ok());
        assert_eq!(config.load_catalog().unwrap().len(), 3);
    }

    #[test]
    fn test_flags() {
        let config = CliConfig::parse_from([
            "flight-reservations",
            "--report-dir",
            "/tmp/reports",
            "--log-format",
            "json",
            "-v",
        ]);
        assert_eq!(config.report_dir, "/tmp/reports");
        assert_eq!(config.log_format, LogFormat::Json);
        assert!(config.verbose);
    }

    #[test]
    fn test_empty_report_dir_is_rejected() {
        let config = CliConfig::parse_from(["flight-reservations", "--report-dir", ""]);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_catalog_file() {
        let config = CliConfig::parse_from([
            "flight-reservations",
            "--catalog",
            "/definitely/not/here/catalog.toml",
        ]);
        assert!(config.load_catalog().is_err());
    }
}
