//! Storage for historic orbit-determination dates
//!
//! The filter never touches stored state; the scanner reads the last seen
//! date per asteroid from a [`HistoricDateStore`] and records the new one
//! after a successful run.

pub mod history;

pub use history::{JsonFileHistoricStore, MemoryHistoricStore};

use crate::error::Result;

/// Trait for historic date storage
///
/// Implementations:
/// - `MemoryHistoricStore`: process-local map
/// - `JsonFileHistoricStore`: flat JSON object on disk
pub trait HistoricDateStore: Send + Sync {
    /// Last processed orbit-determination date for an asteroid
    fn get(&self, asteroid_id: &str) -> Result<Option<String>>;

    /// Remember `orbit_date` as the latest processed date for an asteroid
    fn record(&self, asteroid_id: &str, orbit_date: &str) -> Result<()>;

    /// Number of asteroids with a stored date
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Persist pending changes
    fn flush(&self) -> Result<()> {
        Ok(())
    }

    /// Get store name for logging
    fn name(&self) -> &str;
}
