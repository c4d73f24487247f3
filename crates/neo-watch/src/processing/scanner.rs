//! Batch scan over many asteroids
//!
//! Runs the close-approach filter for each asteroid against its stored
//! historic orbit date and advances the stored date after every non-stale,
//! successful evaluation.

use serde::Serialize;

use crate::config::NeoWatchConfig;
use crate::error::Result;
use crate::filter::{CloseApproachFilter, FilterOutcome};
use crate::storage::HistoricDateStore;
use crate::types::{CloseApproachRecord, NearEarthObject};

/// Result for one asteroid
#[derive(Debug, Clone, PartialEq)]
pub struct ScanEntry {
    pub asteroid_id: String,
    pub name: String,
    /// Historic date the asteroid was compared against
    pub historic_orbit_date: String,
    /// Orbit date found in the new data
    pub current_orbit_date: String,
    pub outcome: FilterOutcome,
}

impl ScanEntry {
    pub fn upcoming(&self) -> Option<&[CloseApproachRecord]> {
        match &self.outcome {
            FilterOutcome::Upcoming(records) => Some(records),
            _ => None,
        }
    }
}

/// An asteroid skipped because its data could not be evaluated
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScanFailure {
    pub asteroid_id: String,
    pub name: String,
    pub error: String,
}

/// Counts per outcome
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScanSummary {
    pub scanned: usize,
    pub upcoming: usize,
    pub no_future_approaches: usize,
    pub stale: usize,
    pub failed: usize,
    /// Asteroids whose historic date was advanced
    pub updated: usize,
}

/// Everything a scan produced
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScanReport {
    pub entries: Vec<ScanEntry>,
    pub failures: Vec<ScanFailure>,
}

impl ScanReport {
    /// Entries with upcoming approaches, in scan order
    pub fn upcoming(&self) -> impl Iterator<Item = &ScanEntry> {
        self.entries.iter().filter(|e| e.upcoming().is_some())
    }

    pub fn summary(&self) -> ScanSummary {
        let mut summary = ScanSummary {
            scanned: self.entries.len() + self.failures.len(),
            failed: self.failures.len(),
            ..Default::default()
        };
        for entry in &self.entries {
            match entry.outcome {
                FilterOutcome::Stale => summary.stale += 1,
                FilterOutcome::NoFutureApproaches => {
                    summary.no_future_approaches += 1;
                    summary.updated += 1;
                }
                FilterOutcome::Upcoming(_) => {
                    summary.upcoming += 1;
                    summary.updated += 1;
                }
            }
        }
        summary
    }
}

/// Runs the filter over batches of asteroids
#[derive(Debug, Clone)]
pub struct ApproachScanner {
    filter: CloseApproachFilter,
    baseline_orbit_date: String,
    fail_fast: bool,
}

impl ApproachScanner {
    pub fn new(filter: CloseApproachFilter, baseline_orbit_date: impl Into<String>) -> Self {
        Self {
            filter,
            baseline_orbit_date: baseline_orbit_date.into(),
            fail_fast: false,
        }
    }

    /// Build from configuration
    pub fn from_config(config: &NeoWatchConfig) -> Self {
        Self::new(
            CloseApproachFilter::new(config.formats.clone()),
            config.history.baseline_orbit_determination_date.clone(),
        )
        .with_fail_fast(config.scan.fail_fast)
    }

    /// Abort on the first malformed asteroid instead of skipping it
    pub fn with_fail_fast(mut self, fail_fast: bool) -> Self {
        self.fail_fast = fail_fast;
        self
    }

    pub fn filter(&self) -> &CloseApproachFilter {
        &self.filter
    }

    /// Evaluate every asteroid and update `store`
    ///
    /// Malformed upstream data is logged and reported per asteroid; its
    /// stored date is left untouched. Store failures abort the scan.
    pub fn scan(
        &self,
        asteroids: &[NearEarthObject],
        store: &dyn HistoricDateStore,
    ) -> Result<ScanReport> {
        let mut report = ScanReport::default();

        for asteroid in asteroids {
            let historic = store
                .get(&asteroid.id)?
                .unwrap_or_else(|| self.baseline_orbit_date.clone());
            let current = asteroid.orbit_determination_date();

            match self
                .filter
                .evaluate(&asteroid.close_approach_data, current, &historic)
            {
                Ok(outcome) => {
                    if !outcome.is_stale() {
                        store.record(&asteroid.id, current)?;
                    }
                    tracing::debug!("[{}] {}", asteroid.name, outcome.label());
                    report.entries.push(ScanEntry {
                        asteroid_id: asteroid.id.clone(),
                        name: asteroid.name.clone(),
                        historic_orbit_date: historic,
                        current_orbit_date: current.to_string(),
                        outcome,
                    });
                }
                Err(e) if e.is_data_quality() && !self.fail_fast => {
                    tracing::warn!("Skipping {} ({}): {}", asteroid.name, asteroid.id, e);
                    report.failures.push(ScanFailure {
                        asteroid_id: asteroid.id.clone(),
                        name: asteroid.name.clone(),
                        error: e.to_string(),
                    });
                }
                Err(e) => return Err(e),
            }
        }

        let summary = report.summary();
        tracing::info!(
            "Scanned {} asteroids via {} store: {} upcoming, {} without future approaches, {} stale, {} failed",
            summary.scanned,
            store.name(),
            summary.upcoming,
            summary.no_future_approaches,
            summary.stale,
            summary.failed
        );

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::storage::MemoryHistoricStore;
    use serde_json::json;

    fn neo(id: &str, orbit_date: &str, approaches: &[&str]) -> NearEarthObject {
        let data: Vec<_> = approaches
            .iter()
            .map(|d| json!({ "close_approach_date_full": d }))
            .collect();
        serde_json::from_value(json!({
            "id": id,
            "name": format!("({id})"),
            "orbital_data": { "orbit_determination_date": orbit_date },
            "close_approach_data": data
        }))
        .unwrap()
    }

    fn scanner() -> ApproachScanner {
        ApproachScanner::from_config(&NeoWatchConfig::default())
    }

    #[test]
    fn test_fresh_asteroid_uses_baseline() {
        let store = MemoryHistoricStore::new();
        let report = scanner()
            .scan(&[neo("1", "2001-01-06 12:00:00", &["2002-Jan-01 12:00"])], &store)
            .unwrap();

        assert_eq!(report.entries[0].historic_orbit_date, "1900-01-01 00:00:00");
        assert_eq!(report.upcoming().count(), 1);
        assert_eq!(store.get("1").unwrap().as_deref(), Some("2001-01-06 12:00:00"));
    }

    #[test]
    fn test_stale_asteroid_keeps_stored_date() {
        let store = MemoryHistoricStore::with_entries([("1", "2001-01-05 12:00:00")]);
        let report = scanner()
            .scan(&[neo("1", "2001-01-04 12:00:00", &["2002-Jan-01 12:00"])], &store)
            .unwrap();

        assert!(report.entries[0].outcome.is_stale());
        assert_eq!(store.get("1").unwrap().as_deref(), Some("2001-01-05 12:00:00"));
        assert_eq!(report.summary().updated, 0);
    }

    #[test]
    fn test_no_future_approaches_still_advances_date() {
        let store = MemoryHistoricStore::with_entries([("1", "2001-01-01 12:00:00")]);
        let report = scanner()
            .scan(&[neo("1", "2001-01-05 12:00:00", &["2000-Jan-01 12:00"])], &store)
            .unwrap();

        assert_eq!(report.entries[0].outcome, FilterOutcome::NoFutureApproaches);
        assert_eq!(store.get("1").unwrap().as_deref(), Some("2001-01-05 12:00:00"));
    }

    #[test]
    fn test_second_scan_is_stale() {
        let store = MemoryHistoricStore::new();
        let batch = [neo("1", "2001-01-06 12:00:00", &["2002-Jan-01 12:00"])];
        let first = scanner().scan(&batch, &store).unwrap();
        let second = scanner().scan(&batch, &store).unwrap();
        assert_eq!(first.summary().upcoming, 1);
        assert_eq!(second.summary().stale, 1);
    }

    #[test]
    fn test_malformed_asteroid_is_skipped() {
        let store = MemoryHistoricStore::new();
        let batch = [
            neo("bad", "06/01/2001", &[]),
            neo("worse", "2001-01-06 12:00:00", &["Jan 1st"]),
            neo("ok", "2001-01-06 12:00:00", &["2002-Jan-01 12:00"]),
        ];
        let report = scanner().scan(&batch, &store).unwrap();

        let summary = report.summary();
        assert_eq!(summary.scanned, 3);
        assert_eq!(summary.failed, 2);
        assert_eq!(summary.upcoming, 1);
        assert_eq!(report.failures[0].asteroid_id, "bad");
        assert_eq!(store.get("bad").unwrap(), None);
        assert_eq!(store.get("worse").unwrap(), None);
    }

    #[test]
    fn test_fail_fast_propagates() {
        let store = MemoryHistoricStore::new();
        let batch = [
            neo("bad", "06/01/2001", &[]),
            neo("ok", "2001-01-06 12:00:00", &["2002-Jan-01 12:00"]),
        ];
        let err = scanner().with_fail_fast(true).scan(&batch, &store).unwrap_err();
        assert!(matches!(err, Error::MalformedDate { .. }));
        assert!(store.is_empty());
    }
}
