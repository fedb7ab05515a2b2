use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::fuel::FuelType;
use crate::schedule::WorkDay;

/// GPS position as published by the feed (degrees times 100 000).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Address {
    /// Five-character French postcode; the leading two characters encode the
    /// department (`"2A"`/`"2B"` for Corsica).
    pub postcode: String,
    pub street: String,
    pub city: String,
}

/// A price reported for one fuel at a given time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PriceObservation {
    pub timestamp: NaiveDateTime,
    pub price: f64,
}

/// Price history of a sale point, keyed by fuel type.
///
/// Always holds an entry for every [`FuelType`]; fuels the station never
/// reported map to an empty history. Observations keep feed order, which is
/// not chronological.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Prices(BTreeMap<FuelType, Vec<PriceObservation>>);

impl Prices {
    #[must_use]
    pub fn new() -> Self {
        Self(FuelType::ALL.into_iter().map(|f| (f, Vec::new())).collect())
    }

    /// Appends an observation to the history of `fuel`.
    pub fn record(&mut self, fuel: FuelType, observation: PriceObservation) {
        self.0.entry(fuel).or_default().push(observation);
    }

    #[must_use]
    pub fn observations(&self, fuel: FuelType) -> &[PriceObservation] {
        self.0.get(&fuel).map(Vec::as_slice).unwrap_or_default()
    }

    /// Iterates every fuel type, in ordinal order, with its history.
    pub fn iter(&self) -> impl Iterator<Item = (FuelType, &[PriceObservation])> {
        self.0.iter().map(|(fuel, obs)| (*fuel, obs.as_slice()))
    }

    /// Total number of observations across all fuels.
    #[must_use]
    pub fn observation_count(&self) -> usize {
        self.0.values().map(Vec::len).sum()
    }
}

impl Default for Prices {
    fn default() -> Self {
        Self::new()
    }
}

/// A fuel temporarily unavailable at a station.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutOfOrder {
    pub fuel_type: FuelType,
    pub start_time: NaiveDateTime,
    /// `None` while the outage is ongoing.
    pub end_time: Option<NaiveDateTime>,
}

impl OutOfOrder {
    #[must_use]
    pub fn is_ongoing(&self) -> bool {
        self.end_time.is_none()
    }
}

/// How a closure period ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ClosingEnd {
    /// Temporary closure: open-ended whatever end time the feed carries.
    Temporary,
    Timed(NaiveDateTime),
    /// Closure with no announced end.
    Indefinite,
}

/// A period during which the whole station is closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ClosingTime {
    pub start_time: NaiveDateTime,
    pub end: ClosingEnd,
}

impl ClosingTime {
    #[must_use]
    pub fn end_time(&self) -> Option<NaiveDateTime> {
        match self.end {
            ClosingEnd::Timed(at) => Some(at),
            ClosingEnd::Temporary | ClosingEnd::Indefinite => None,
        }
    }

    #[must_use]
    pub fn is_temporary(&self) -> bool {
        matches!(self.end, ClosingEnd::Temporary)
    }
}

/// A fuel station of the feed (`pdv` element).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalePoint {
    pub id: String,
    pub location: Location,
    pub address: Address,
    pub prices: Prices,
    pub out_of_orders: Vec<OutOfOrder>,
    pub closing_times: Vec<ClosingTime>,
    pub services: Option<BTreeSet<String>>,
    pub is_24h_automated: bool,
    /// One entry per day listed in the feed; `None` when no schedule is published.
    pub opening_days: Option<Vec<WorkDay>>,
}
