//! Batch processing

pub mod scanner;

pub use scanner::{ApproachScanner, ScanEntry, ScanFailure, ScanReport, ScanSummary};
