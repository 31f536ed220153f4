use crate::domain::model::{Catalog, Flight};
use crate::utils::error::{ReservationError, Result};
use crate::utils::validation::{
    validate_departure_time, validate_flight_code, validate_non_empty_string, validate_seat_code,
    Validate,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

const EMBEDDED_CATALOG: &str = include_str!("../../config/catalog.toml");

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    pub flights: Vec<FlightConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlightConfig {
    pub code: String,
    pub origin: String,
    pub destination: String,
    /// Departure time as `HH:MM`.
    pub departure: String,
    pub seats: Vec<String>,
}

impl CatalogConfig {
    /// The catalog shipped with the binary.
    pub fn embedded() -> Result<Self> {
        Self::from_toml_str(EMBEDDED_CATALOG)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ReservationError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| ReservationError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Validates every entry and builds the immutable catalog.
    pub fn into_catalog(self) -> Result<Catalog> {
        if self.flights.is_empty() {
            return Err(ReservationError::InvalidCatalog {
                message: "catalog defines no flights".to_string(),
            });
        }

        let flights = self
            .flights
            .iter()
            .enumerate()
            .map(|(i, entry)| entry.to_flight(i))
            .collect::<Result<Vec<_>>>()?;

        let catalog = Catalog::new(flights)?;
        tracing::debug!("Loaded catalog with {} flights", catalog.len());
        Ok(catalog)
    }
}

impl FlightConfig {
    fn to_flight(&self, index: usize) -> Result<Flight> {
        let field = |name: &str| format!("flights[{}].{}", index, name);

        validate_non_empty_string(&field("origin"), &self.origin)?;
        validate_non_empty_string(&field("destination"), &self.destination)?;

        let code = validate_flight_code(&self.code).map_err(|e| catalog_error(&field("code"), e))?;
        let departure = validate_departure_time(&field("departure"), &self.departure)?;
        let seat_layout = self
            .seats
            .iter()
            .map(|seat| validate_seat_code(seat).map_err(|e| catalog_error(&field("seats"), e)))
            .collect::<Result<Vec<_>>>()?;

        Ok(Flight {
            code,
            origin: self.origin.trim().to_string(),
            destination: self.destination.trim().to_string(),
            departure,
            seat_layout,
        })
    }
}

fn catalog_error(field: &str, error: ReservationError) -> ReservationError {
    ReservationError::InvalidCatalog {
        message: format!("{}: {}", field, error),
    }
}

impl Validate for CatalogConfig {
    fn validate(&self) -> Result<()> {
        self.clone().into_catalog().map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_embedded_catalog() {
        let catalog = CatalogConfig::embedded().unwrap().into_catalog().unwrap();
        let codes: Vec<&str> = catalog.flights().iter().map(|f| f.code.as_str()).collect();
        assert_eq!(codes, vec!["AV-201", "AV-305", "AV-408"]);

        let av305 = &catalog.flights()[1];
        assert_eq!(av305.origin, "New York");
        assert_eq!(av305.departure_label(), "14:15");
        assert_eq!(av305.capacity(), 6);
    }

    #[test]
    fn test_seat_codes_are_normalized() {
        let toml_content = r#"
[[flights]]
code = "xy-100"
origin = "Lima"
destination = "Quito"
departure = "07:05"
seats = ["a1", "B12"]
"#;
        let catalog = CatalogConfig::from_toml_str(toml_content)
            .unwrap()
            .into_catalog()
            .unwrap();
        let flight = &catalog.flights()[0];
        assert_eq!(flight.code.as_str(), "XY-100");
        assert_eq!(flight.seat_layout[0].as_str(), "A1");
        assert_eq!(flight.seat_layout[1].as_str(), "B12");
    }

    #[test]
    fn test_catalog_validation_failures() {
        let cases = [
            // malformed code
            r#"[[flights]]
code = "AV201"
origin = "A"
destination = "B"
departure = "09:00"
seats = ["A1"]"#,
            // empty origin
            r#"[[flights]]
code = "AV-201"
origin = "  "
destination = "B"
departure = "09:00"
seats = ["A1"]"#,
            // bad time
            r#"[[flights]]
code = "AV-201"
origin = "A"
destination = "B"
departure = "25:00"
seats = ["A1"]"#,
            // bad seat
            r#"[[flights]]
code = "AV-201"
origin = "A"
destination = "B"
departure = "09:00"
seats = ["AA1"]"#,
            // empty layout
            r#"[[flights]]
code = "AV-201"
origin = "A"
destination = "B"
departure = "09:00"
seats = []"#,
        ];

        for case in cases {
            let config = CatalogConfig::from_toml_str(case).unwrap();
            assert!(config.validate().is_err(), "expected rejection for:\n{}", case);
        }
    }

    #[test]
    fn test_empty_layout_is_degenerate() {
        let config = CatalogConfig::from_toml_str(
            r#"[[flights]]
code = "AV-201"
origin = "A"
destination = "B"
departure = "09:00"
seats = []"#,
        )
        .unwrap();
        assert!(matches!(
            config.into_catalog(),
            Err(ReservationError::DegenerateFlight { .. })
        ));
    }

    #[test]
    fn test_invalid_toml() {
        assert!(CatalogConfig::from_toml_str("flights = 3").is_err());
        assert!(CatalogConfig::from_toml_str("flights = []")
            .unwrap()
            .into_catalog()
            .is_err());
    }

    #[test]
    fn test_catalog_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();

        let toml_content = r#"
[[flights]]
code = "QF-001"
origin = "Sydney"
destination = "London"
departure = "16:00"
seats = ["A1", "A2"]
"#;

        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = CatalogConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.flights[0].code, "QF-001");
        assert!(config.validate().is_ok());
    }
}
