//! NeoWs data model

pub mod asteroid;
pub mod close_approach;

pub use asteroid::{BrowsePage, NearEarthObject, OrbitalData};
pub use close_approach::{CloseApproachRecord, CLOSE_APPROACH_DATE_FULL};
