//! Descriptive analysis of close-approach data

pub mod velocity;

pub use velocity::{VelocityPoint, VelocitySeries, YearlyVelocity};
