//! Department-level price metrics over degraded snapshots.

use std::collections::BTreeMap;

use prixcarb_core::FuelType;
use serde::ser::{SerializeMap, SerializeStruct};
use serde::{Serialize, Serializer};

use crate::department::Department;
use crate::snapshot::DegradedSalePoint;

/// Key of the national rollup in the serialized report.
pub const TOTAL_KEY: &str = "total";

/// Count and sum of the latest prices reported for one fuel.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FuelMetrics {
    pub count: u32,
    pub total: f64,
}

impl FuelMetrics {
    /// Average reported when no station contributed.
    pub const NO_AVERAGE: f64 = -1.0;

    /// Mean price, or [`Self::NO_AVERAGE`] when `count` is zero.
    #[must_use]
    pub fn average(&self) -> f64 {
        if self.count == 0 {
            Self::NO_AVERAGE
        } else {
            self.total / f64::from(self.count)
        }
    }

    fn add_price(&mut self, price: f64) {
        self.count += 1;
        self.total += price;
    }

    fn absorb(&mut self, other: FuelMetrics) {
        self.count += other.count;
        self.total += other.total;
    }
}

impl Serialize for FuelMetrics {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("FuelMetrics", 3)?;
        s.serialize_field("count", &self.count)?;
        s.serialize_field("total", &self.total)?;
        s.serialize_field("average", &self.average())?;
        s.end()
    }
}

/// Metrics for every fuel type of one department.
///
/// Always holds every [`FuelType`], zeroed when nothing was reported.
#[derive(Debug, Clone, PartialEq)]
pub struct FuelBreakdown(BTreeMap<FuelType, FuelMetrics>);

impl FuelBreakdown {
    #[must_use]
    pub fn zeroed() -> Self {
        Self(
            FuelType::ALL
                .into_iter()
                .map(|fuel| (fuel, FuelMetrics::default()))
                .collect(),
        )
    }

    #[must_use]
    pub fn get(&self, fuel: FuelType) -> FuelMetrics {
        self.0.get(&fuel).copied().unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FuelType, FuelMetrics)> + '_ {
        self.0.iter().map(|(fuel, metrics)| (*fuel, *metrics))
    }

    fn add_price(&mut self, fuel: FuelType, price: f64) {
        self.0.entry(fuel).or_default().add_price(price);
    }

    fn absorb(&mut self, other: &FuelBreakdown) {
        for (fuel, metrics) in other.iter() {
            self.0.entry(fuel).or_default().absorb(metrics);
        }
    }
}

/// Serialized keyed by fuel name (`"GAZOLE"`), not ordinal.
impl Serialize for FuelBreakdown {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (fuel, metrics) in &self.0 {
            map.serialize_entry(fuel.name(), metrics)?;
        }
        map.end()
    }
}

/// Per-department and national fuel metrics from one aggregation run.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricsReport {
    departments: BTreeMap<Department, FuelBreakdown>,
    total: FuelBreakdown,
    skipped: usize,
}

impl MetricsReport {
    #[must_use]
    pub fn department(&self, department: Department) -> Option<&FuelBreakdown> {
        self.departments.get(&department)
    }

    /// Departments in display order (`01`..`19`, `2A`, `2B`, `21`..).
    pub fn departments(&self) -> impl Iterator<Item = (Department, &FuelBreakdown)> {
        self.departments.iter().map(|(dept, breakdown)| (*dept, breakdown))
    }

    /// National rollup, the sum of every department.
    #[must_use]
    pub fn total(&self) -> &FuelBreakdown {
        &self.total
    }

    /// Stations left out because their postcode maps to no department.
    #[must_use]
    pub fn skipped(&self) -> usize {
        self.skipped
    }
}

/// Serialized as `{"01": {"GAZOLE": {...}, ...}, ..., "total": {...}}`.
impl Serialize for MetricsReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.departments.len() + 1))?;
        for (department, breakdown) in &self.departments {
            map.serialize_entry(&department.code(), breakdown)?;
        }
        map.serialize_entry(TOTAL_KEY, &self.total)?;
        map.end()
    }
}

/// Aggregates degraded sale points into department metrics.
///
/// Every metropolitan department is reported, zeroed when it has no station.
/// The `total` rollup is summed from the department figures rather than from
/// the stations, so it always equals the sum of the departments. Stations
/// whose postcode yields no department are logged and skipped.
#[must_use]
pub fn aggregate(sale_points: &[DegradedSalePoint]) -> MetricsReport {
    tracing::debug!(count = sale_points.len(), "building metrics");

    let seeded: BTreeMap<Department, FuelBreakdown> = Department::metropolitan()
        .into_iter()
        .map(|department| (department, FuelBreakdown::zeroed()))
        .collect();

    let (departments, skipped) =
        sale_points
            .iter()
            .fold((seeded, 0_usize), |(mut departments, skipped), sale_point| {
                match Department::from_postcode(&sale_point.postcode) {
                    Ok(department) => {
                        let breakdown = departments
                            .entry(department)
                            .or_insert_with(FuelBreakdown::zeroed);
                        for (fuel, observation) in &sale_point.prices {
                            breakdown.add_price(*fuel, observation.price);
                        }
                        (departments, skipped)
                    }
                    Err(e) => {
                        tracing::warn!(
                            id = %sale_point.id,
                            error = %e,
                            "skipping sale point with no department"
                        );
                        (departments, skipped + 1)
                    }
                }
            });

    let total = departments
        .values()
        .fold(FuelBreakdown::zeroed(), |mut total, breakdown| {
            total.absorb(breakdown);
            total
        });

    MetricsReport {
        departments,
        total,
        skipped,
    }
}

#[cfg(test)]
#[path = "metrics_test.rs"]
mod tests;
