use super::domain::{CalculationError, StaffCategory, StaffingInput};
use super::format::parse_hours;
use serde::Deserialize;
use std::io::Read;
use std::path::Path;

#[derive(Debug)]
pub enum TimesheetImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    Row {
        line: usize,
        source: CalculationError,
    },
}

impl std::fmt::Display for TimesheetImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TimesheetImportError::Io(err) => write!(f, "failed to read timesheet: {}", err),
            TimesheetImportError::Csv(err) => write!(f, "invalid timesheet CSV data: {}", err),
            TimesheetImportError::Row { line, source } => {
                write!(f, "timesheet line {}: {}", line, source)
            }
        }
    }
}

impl std::error::Error for TimesheetImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TimesheetImportError::Io(err) => Some(err),
            TimesheetImportError::Csv(err) => Some(err),
            TimesheetImportError::Row { source, .. } => Some(source),
        }
    }
}

impl From<std::io::Error> for TimesheetImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for TimesheetImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

#[derive(Debug, Deserialize)]
struct TimesheetRow {
    #[serde(rename = "Categoria", alias = "Categoría", alias = "categoria", alias = "Category")]
    category: String,
    #[serde(rename = "Horas", alias = "horas", alias = "Hours")]
    hours: String,
}

/// Loads weekly hours per category from a `Categoria,Horas` CSV export.
pub struct TimesheetImporter;

impl TimesheetImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<StaffingInput, TimesheetImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    /// Repeated categories are summed.
    pub fn from_reader<R: Read>(reader: R) -> Result<StaffingInput, TimesheetImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut input = StaffingInput::new();

        for (index, record) in csv_reader.deserialize::<TimesheetRow>().enumerate() {
            let row = record?;
            let line = index + 2;
            let row_error = |source| TimesheetImportError::Row { line, source };

            let category = row.category.parse::<StaffCategory>().map_err(row_error)?;
            let hours = parse_hours(&row.hours).map_err(row_error)?;
            input.add(category, hours);
        }

        Ok(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn accumulates_repeated_categories() {
        let csv = "Categoria,Horas\nGerocultor,120\nATS/DUE,40\ngerocultor,\"37,5\"\n";
        let input = TimesheetImporter::from_reader(Cursor::new(csv)).expect("timesheet parses");

        assert!((input.hours(StaffCategory::Gerocultor) - 157.5).abs() < 1e-9);
        assert!((input.hours(StaffCategory::Nurse) - 40.0).abs() < 1e-9);
    }

    #[test]
    fn reports_line_of_unknown_category() {
        let csv = "Categoria,Horas\nGerocultor,10\nAstronauta,5\n";
        let err = TimesheetImporter::from_reader(Cursor::new(csv)).expect_err("unknown category");

        match err {
            TimesheetImportError::Row { line, source } => {
                assert_eq!(line, 3);
                assert_eq!(
                    source,
                    CalculationError::UnknownCategory("Astronauta".to_string())
                );
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn rejects_unparseable_hours() {
        let csv = "Categoria,Horas\nGerocultor,muchas\n";
        let err = TimesheetImporter::from_reader(Cursor::new(csv)).expect_err("bad hours");
        assert!(matches!(
            err,
            TimesheetImportError::Row {
                source: CalculationError::UnparseableHours(_),
                ..
            }
        ));
    }
}
