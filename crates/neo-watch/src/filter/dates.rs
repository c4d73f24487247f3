//! Timestamp formats used by NeoWs

use chrono::NaiveDateTime;

use crate::config::DateFormats;
use crate::error::{Error, Result};

/// `orbital_data.orbit_determination_date`, e.g. `2001-01-06 12:00:00`
pub const ORBIT_DETERMINATION_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// `close_approach_date_full`, e.g. `2002-Jan-01 12:00`
pub const CLOSE_APPROACH_DATE_FORMAT: &str = "%Y-%b-%d %H:%M";

/// Parse an orbit-determination timestamp with the default format
pub fn parse_orbit_date(value: &str) -> Result<NaiveDateTime> {
    parse_with("orbit_determination_date", value, ORBIT_DETERMINATION_DATE_FORMAT)
}

/// Parse a close-approach timestamp with the default format
pub fn parse_close_approach_date(value: &str) -> Result<NaiveDateTime> {
    parse_with("close_approach_date_full", value, CLOSE_APPROACH_DATE_FORMAT)
}

pub(crate) fn parse_with(field: &'static str, value: &str, format: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, format)
        .map_err(|e| Error::malformed_date(field, value, format, e))
}

impl DateFormats {
    /// Parse an orbit-determination timestamp
    pub fn parse_orbit_date(&self, value: &str) -> Result<NaiveDateTime> {
        parse_with("orbit_determination_date", value, &self.orbit_determination_date)
    }

    /// Parse a close-approach timestamp
    pub fn parse_close_approach_date(&self, value: &str) -> Result<NaiveDateTime> {
        parse_with("close_approach_date_full", value, &self.close_approach_date_full)
    }
}
