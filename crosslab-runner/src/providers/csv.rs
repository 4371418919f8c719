//! CSV price provider: `<root>/<SYMBOL>.csv` with a `date,close` header.
//!
//! An empty `close` field is a missing day.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::Deserialize;

use crosslab_core::data::{DataError, PriceProvider, RawPrice};

#[derive(Debug, Deserialize)]
struct CsvRow {
    date: NaiveDate,
    close: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct CsvProvider {
    root: PathBuf,
}

impl CsvProvider {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn path_for(&self, symbol: &str) -> PathBuf {
        self.root.join(format!("{symbol}.csv"))
    }

    /// Read every row of one file, in file order.
    pub fn read_file(path: &Path) -> Result<Vec<RawPrice>, DataError> {
        let mut reader = ::csv::Reader::from_path(path).map_err(csv_error)?;
        reader
            .deserialize::<CsvRow>()
            .map(|row| {
                row.map(|r| RawPrice::new(r.date, r.close))
                    .map_err(csv_error)
            })
            .collect()
    }
}

impl PriceProvider for CsvProvider {
    fn name(&self) -> &str {
        "csv"
    }

    fn fetch(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<RawPrice>, DataError> {
        let path = self.path_for(symbol);
        if !path.exists() {
            return Err(DataError::SymbolNotFound {
                symbol: symbol.to_string(),
            });
        }
        let rows = Self::read_file(&path)?;
        Ok(rows
            .into_iter()
            .filter(|r| r.date >= start && r.date <= end)
            .collect())
    }
}

fn csv_error(e: ::csv::Error) -> DataError {
    DataError::Parse(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
    }

    fn write_fixture(dir: &Path) {
        std::fs::write(
            dir.join("SPY.csv"),
            "date,close\n2024-01-02,470.5\n2024-01-03,\n2024-01-04,468.0\n2024-01-05,469.25\n",
        )
        .unwrap();
    }

    #[test]
    fn reads_rows_with_gaps() {
        let dir = tempfile::tempdir().unwrap();
        write_fixture(dir.path());
        let provider = CsvProvider::new(dir.path());

        let rows = provider.fetch("SPY", d(1), d(31)).unwrap();
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0], RawPrice::new(d(2), Some(470.5)));
        assert_eq!(rows[1], RawPrice::new(d(3), None));
        assert_eq!(rows[3].close, Some(469.25));
    }

    #[test]
    fn filters_by_date_range() {
        let dir = tempfile::tempdir().unwrap();
        write_fixture(dir.path());
        let provider = CsvProvider::new(dir.path());

        let rows = provider.fetch("SPY", d(3), d(4)).unwrap();
        let dates: Vec<NaiveDate> = rows.iter().map(|r| r.date).collect();
        assert_eq!(dates, vec![d(3), d(4)]);
    }

    #[test]
    fn missing_symbol() {
        let dir = tempfile::tempdir().unwrap();
        let provider = CsvProvider::new(dir.path());
        assert!(matches!(
            provider.fetch("QQQ", d(1), d(31)),
            Err(DataError::SymbolNotFound { symbol }) if symbol == "QQQ"
        ));
    }

    #[test]
    fn malformed_row_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("BAD.csv"), "date,close\nnot-a-date,1.0\n").unwrap();
        let provider = CsvProvider::new(dir.path());
        assert!(matches!(
            provider.fetch("BAD", d(1), d(31)),
            Err(DataError::Parse(_))
        ));
    }
}
