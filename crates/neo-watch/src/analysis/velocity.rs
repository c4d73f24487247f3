//! Relative-velocity series per asteroid
//!
//! Collects `(close_approach_date, km/s)` points and aggregates them by year,
//! the data behind a velocity-over-time chart.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::types::NearEarthObject;

/// One close approach with its velocity
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VelocityPoint {
    /// `YYYY-MM-DD`
    pub date: String,
    pub velocity_kps: f64,
}

impl VelocityPoint {
    /// Year prefix of the date
    pub fn year(&self) -> &str {
        self.date.get(..4).unwrap_or(&self.date)
    }
}

/// Aggregate for one year
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearlyVelocity {
    pub year: String,
    pub count: usize,
    pub min_kps: f64,
    pub mean_kps: f64,
    pub max_kps: f64,
}

/// Velocity points of one or more asteroids
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct VelocitySeries {
    pub points: Vec<VelocityPoint>,
    /// Approaches without a usable date or velocity
    pub skipped: usize,
}

impl VelocitySeries {
    /// Collect points from every asteroid, optionally restricted to one name
    pub fn collect<'a, I>(asteroids: I, name: Option<&str>) -> Self
    where
        I: IntoIterator<Item = &'a NearEarthObject>,
    {
        let mut series = Self::default();
        for asteroid in asteroids {
            if name.is_some_and(|n| n != asteroid.name) {
                continue;
            }
            for record in &asteroid.close_approach_data {
                match (record.close_approach_date(), record.relative_velocity_kps()) {
                    (Some(date), Some(velocity_kps)) if velocity_kps.is_finite() => {
                        series.points.push(VelocityPoint {
                            date: date.to_string(),
                            velocity_kps,
                        });
                    }
                    _ => {
                        tracing::warn!(
                            "Skipping close approach of {} without usable date or velocity",
                            asteroid.name
                        );
                        series.skipped += 1;
                    }
                }
            }
        }
        series
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Per-year aggregates sorted by year
    pub fn yearly(&self) -> Vec<YearlyVelocity> {
        let mut by_year: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
        for point in &self.points {
            by_year.entry(point.year()).or_default().push(point.velocity_kps);
        }

        by_year
            .into_iter()
            .map(|(year, values)| {
                let count = values.len();
                let min_kps = values.iter().copied().fold(f64::INFINITY, f64::min);
                let max_kps = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
                let mean_kps = values.iter().sum::<f64>() / count as f64;
                YearlyVelocity {
                    year: year.to_string(),
                    count,
                    min_kps,
                    mean_kps,
                    max_kps,
                }
            })
            .collect()
    }
}
