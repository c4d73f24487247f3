//! Close-approach filtering
//!
//! Decides whether an asteroid's orbit solution is newer than the one seen on
//! the previous run and, if so, which of its close approaches lie after that
//! orbit solution.

pub mod dates;

use chrono::NaiveDateTime;

use crate::config::DateFormats;
use crate::error::Result;
use crate::types::CloseApproachRecord;

use dates::parse_with;

/// What the filter concluded for one asteroid
#[derive(Debug, Clone, PartialEq)]
pub enum FilterOutcome {
    /// Current orbit date is not strictly newer than the historic one
    Stale,
    /// Orbit data is newer but no approach lies after it
    NoFutureApproaches,
    /// Approaches after the current orbit date, in input order
    Upcoming(Vec<CloseApproachRecord>),
}

impl FilterOutcome {
    /// Collapse to "something to show" / "nothing new"
    pub fn into_option(self) -> Option<Vec<CloseApproachRecord>> {
        match self {
            FilterOutcome::Upcoming(records) => Some(records),
            FilterOutcome::Stale | FilterOutcome::NoFutureApproaches => None,
        }
    }

    pub fn is_stale(&self) -> bool {
        matches!(self, FilterOutcome::Stale)
    }

    pub fn label(&self) -> &'static str {
        match self {
            FilterOutcome::Stale => "stale",
            FilterOutcome::NoFutureApproaches => "no_future_approaches",
            FilterOutcome::Upcoming(_) => "upcoming",
        }
    }
}

/// Stateless close-approach filter
///
/// Holds only the two timestamp formats; every call is a pure function of its
/// arguments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CloseApproachFilter {
    formats: DateFormats,
}

impl CloseApproachFilter {
    /// Filter using the given formats
    pub fn new(formats: DateFormats) -> Self {
        Self { formats }
    }

    pub fn formats(&self) -> &DateFormats {
        &self.formats
    }

    /// Classify `records` against the current and historic orbit dates
    ///
    /// Both orbit dates are parsed before anything else, current first. When
    /// the current date is not strictly newer, records are never inspected.
    /// Otherwise every record's `close_approach_date_full` must be present and
    /// well formed; the first failure aborts the whole call.
    pub fn evaluate(
        &self,
        records: &[CloseApproachRecord],
        current_orbit_date: &str,
        historic_orbit_date: &str,
    ) -> Result<FilterOutcome> {
        let current = parse_with(
            "orbit_determination_date",
            current_orbit_date,
            &self.formats.orbit_determination_date,
        )?;
        let historic = parse_with(
            "historic_orbit_determination_date",
            historic_orbit_date,
            &self.formats.orbit_determination_date,
        )?;

        if current <= historic {
            tracing::debug!(
                "Orbit date {} is not newer than {}, skipping",
                current_orbit_date,
                historic_orbit_date
            );
            return Ok(FilterOutcome::Stale);
        }

        let upcoming = self.after(records, current)?;
        tracing::debug!(
            "{} of {} close approaches after {}",
            upcoming.len(),
            records.len(),
            current_orbit_date
        );

        if upcoming.is_empty() {
            Ok(FilterOutcome::NoFutureApproaches)
        } else {
            Ok(FilterOutcome::Upcoming(upcoming))
        }
    }

    /// Upcoming approaches, or `None` when there is nothing new to show
    pub fn apply(
        &self,
        records: &[CloseApproachRecord],
        current_orbit_date: &str,
        historic_orbit_date: &str,
    ) -> Result<Option<Vec<CloseApproachRecord>>> {
        self.evaluate(records, current_orbit_date, historic_orbit_date)
            .map(FilterOutcome::into_option)
    }

    fn after(
        &self,
        records: &[CloseApproachRecord],
        current: NaiveDateTime,
    ) -> Result<Vec<CloseApproachRecord>> {
        let mut upcoming = Vec::new();
        for record in records {
            let approach = self.formats.parse_close_approach_date(record.date_full()?)?;
            if approach > current {
                upcoming.push(record.clone());
            }
        }
        Ok(upcoming)
    }
}

/// Filter with the standard NeoWs formats
///
/// Returns `Ok(None)` both when the orbit data is stale and when no approach
/// lies after the current orbit-determination date.
pub fn filter_close_approaches(
    records: &[CloseApproachRecord],
    current_orbit_date: &str,
    historic_orbit_date: &str,
) -> Result<Option<Vec<CloseApproachRecord>>> {
    CloseApproachFilter::default().apply(records, current_orbit_date, historic_orbit_date)
}
