//! neo-watch: surfaces upcoming asteroid close approaches from NeoWs data
//!
//! The core is [`filter::CloseApproachFilter`]: given an asteroid's close
//! approaches, its current orbit-determination date and the date seen on the
//! previous run, it returns the approaches that lie after the current orbit
//! solution, or nothing when the orbit data is not newer or no approach
//! qualifies. The remaining modules feed it NeoWs documents, remember the
//! last processed date per asteroid and summarise approach velocities.

pub mod analysis;
pub mod config;
pub mod error;
pub mod filter;
pub mod processing;
pub mod storage;
pub mod types;

pub use config::NeoWatchConfig;
pub use error::{Error, Result};
pub use filter::{filter_close_approaches, CloseApproachFilter, FilterOutcome};
pub use processing::{ApproachScanner, ScanReport};
pub use storage::{HistoricDateStore, JsonFileHistoricStore, MemoryHistoricStore};
pub use types::{BrowsePage, CloseApproachRecord, NearEarthObject};
