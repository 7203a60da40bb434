//! Daily demand series and CSV ingestion

use crate::error::{ForecastError, Result};
use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, warn};

/// A single daily demand reading
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimePoint {
    /// Day of the reading
    pub date: NaiveDate,
    /// Demand in megawatts
    pub demand_mw: f64,
}

impl TimePoint {
    /// Create a new reading
    pub fn new(date: NaiveDate, demand_mw: f64) -> Self {
        Self { date, demand_mw }
    }
}

/// Ordered, read-only demand history for one region.
///
/// Dates are strictly increasing and every value is finite and non-negative.
/// The series has no write path once built.
#[derive(Debug, Clone, PartialEq)]
pub struct DemandSeries {
    /// Region the readings belong to
    region: String,
    /// Readings in ascending date order
    points: Vec<TimePoint>,
}

impl DemandSeries {
    /// Create a series, validating ordering and values
    pub fn new(region: impl Into<String>, points: Vec<TimePoint>) -> Result<Self> {
        for (i, point) in points.iter().enumerate() {
            if !point.demand_mw.is_finite() || point.demand_mw < 0.0 {
                return Err(ForecastError::DataError(format!(
                    "Demand on {} must be a non-negative number, got {}",
                    point.date, point.demand_mw
                )));
            }

            if i > 0 && points[i - 1].date >= point.date {
                return Err(ForecastError::DataError(format!(
                    "Dates must be strictly increasing: {} follows {}",
                    point.date,
                    points[i - 1].date
                )));
            }
        }

        Ok(Self {
            region: region.into(),
            points,
        })
    }

    /// Create a series of consecutive days starting at `start`
    pub fn from_values(region: impl Into<String>, start: NaiveDate, values: &[f64]) -> Result<Self> {
        let points = values
            .iter()
            .enumerate()
            .map(|(offset, &value)| TimePoint::new(start + Duration::days(offset as i64), value))
            .collect();

        Self::new(region, points)
    }

    /// Region name
    pub fn region(&self) -> &str {
        &self.region
    }

    /// All readings in ascending date order
    pub fn points(&self) -> &[TimePoint] {
        &self.points
    }

    /// Demand values in ascending date order
    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.demand_mw).collect()
    }

    /// Date of the most recent reading
    pub fn last_date(&self) -> Option<NaiveDate> {
        self.points.last().map(|p| p.date)
    }

    /// The `n` most recent values, oldest first
    pub fn last_n(&self, n: usize) -> Result<Vec<f64>> {
        if self.points.len() < n {
            return Err(ForecastError::DataInsufficient(format!(
                "Need the last {} readings, series has {}",
                n,
                self.points.len()
            )));
        }

        Ok(self.points[self.points.len() - n..]
            .iter()
            .map(|p| p.demand_mw)
            .collect())
    }

    /// Value `offset` steps back from the end; offset 1 is the most recent
    pub fn value_from_end(&self, offset: usize) -> Result<f64> {
        if offset == 0 {
            return Err(ForecastError::ValidationError(
                "Offset from end starts at 1".to_string(),
            ));
        }

        self.points
            .len()
            .checked_sub(offset)
            .map(|i| self.points[i].demand_mw)
            .ok_or_else(|| {
                ForecastError::DataInsufficient(format!(
                    "No reading {} steps back, series has {}",
                    offset,
                    self.points.len()
                ))
            })
    }

    /// Check if the series is empty
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Number of readings
    pub fn len(&self) -> usize {
        self.points.len()
    }
}

/// Row of the cleaned demand CSV (`date,demand_mw`)
#[derive(Debug, Deserialize)]
struct DemandRecord {
    date: String,
    demand_mw: Option<f64>,
}

/// Data loader for demand series
#[derive(Debug)]
pub struct DataLoader;

impl DataLoader {
    /// Load a demand series from a CSV file
    pub fn from_csv<P: AsRef<Path>>(path: P, region: &str) -> Result<DemandSeries> {
        let path = path.as_ref();
        debug!(path = %path.display(), "loading demand series");
        let file = File::open(path)?;
        Self::from_reader(file, region)
    }

    /// Load a demand series from any CSV source.
    ///
    /// Rows with an unparseable date or a blank demand are skipped; the rest
    /// are sorted by date. Duplicate dates and negative demand are rejected.
    pub fn from_reader<R: Read>(reader: R, region: &str) -> Result<DemandSeries> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut points = Vec::new();
        let mut skipped = 0usize;

        for record in csv_reader.deserialize::<DemandRecord>() {
            let record = record?;

            let Some(date) = Self::parse_date(&record.date) else {
                skipped += 1;
                continue;
            };

            match record.demand_mw {
                Some(demand_mw) => points.push(TimePoint::new(date, demand_mw)),
                None => skipped += 1,
            }
        }

        if skipped > 0 {
            warn!(skipped, region, "skipped demand rows with missing date or value");
        }

        points.sort_by_key(|p| p.date);

        if let Some(pair) = points.windows(2).find(|w| w[0].date == w[1].date) {
            return Err(ForecastError::DataError(format!(
                "Duplicate reading for {}",
                pair[0].date
            )));
        }

        let series = DemandSeries::new(region, points)?;
        debug!(points = series.len(), region, "demand series loaded");
        Ok(series)
    }

    /// Parse `YYYY-MM-DD`, tolerating a trailing time of day
    fn parse_date(raw: &str) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S").map(|dt| dt.date()))
            .ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 1, d).unwrap()
    }

    #[test]
    fn test_rejects_unordered_dates() {
        let points = vec![TimePoint::new(day(2), 10.0), TimePoint::new(day(1), 11.0)];
        assert!(matches!(
            DemandSeries::new("MH", points),
            Err(ForecastError::DataError(_))
        ));
    }

    #[test]
    fn test_rejects_negative_demand() {
        let points = vec![TimePoint::new(day(1), -1.0)];
        assert!(DemandSeries::new("MH", points).is_err());
    }

    #[test]
    fn test_offsets_from_end() {
        let series = DemandSeries::from_values("MH", day(1), &[90.0, 95.0, 100.0]).unwrap();
        assert_eq!(series.value_from_end(1).unwrap(), 100.0);
        assert_eq!(series.value_from_end(2).unwrap(), 95.0);
        assert!(matches!(
            series.value_from_end(4),
            Err(ForecastError::DataInsufficient(_))
        ));
        assert!(matches!(
            series.value_from_end(0),
            Err(ForecastError::ValidationError(_))
        ));
    }

    #[test]
    fn test_parse_date_with_time() {
        assert_eq!(DataLoader::parse_date("2023-01-05 00:00:00"), Some(day(5)));
        assert_eq!(DataLoader::parse_date("05/01/2023"), None);
    }
}
