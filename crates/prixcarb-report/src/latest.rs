//! Compact `latest.json` shape: a key header plus one positional row per
//! station, as read by the map front-end.

use prixcarb_core::FuelType;
use serde::ser::SerializeSeq;
use serde::{Serialize, Serializer};

use crate::snapshot::DegradedSalePoint;

/// Price written for a fuel the station does not report.
pub const MISSING_PRICE: f64 = -1.0;

const FIELD_KEYS: [&str; 5] = ["latitude", "longitude", "address", "postcode", "city"];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LatestSnapshot {
    /// Field names, then one fuel name per ordinal.
    pub keys: Vec<&'static str>,
    pub data: Vec<SnapshotRow>,
}

impl LatestSnapshot {
    #[must_use]
    pub fn from_degraded(sale_points: &[DegradedSalePoint]) -> Self {
        let keys = FIELD_KEYS
            .into_iter()
            .chain(FuelType::ALL.iter().map(|fuel| fuel.name()))
            .collect();
        let data = sale_points.iter().map(SnapshotRow::from).collect();
        Self { keys, data }
    }
}

/// One station, serialized as a JSON array following [`LatestSnapshot::keys`].
#[derive(Debug, Clone, PartialEq)]
pub struct SnapshotRow {
    pub latitude: f64,
    pub longitude: f64,
    pub address: String,
    pub postcode: String,
    pub city: String,
    /// Latest price per fuel ordinal, [`MISSING_PRICE`] when absent.
    pub prices: [f64; 6],
}

impl From<&DegradedSalePoint> for SnapshotRow {
    fn from(sale_point: &DegradedSalePoint) -> Self {
        Self {
            latitude: sale_point.latitude,
            longitude: sale_point.longitude,
            address: sale_point.address.clone(),
            postcode: sale_point.postcode.clone(),
            city: sale_point.city.clone(),
            prices: FuelType::ALL.map(|fuel| sale_point.price(fuel).unwrap_or(MISSING_PRICE)),
        }
    }
}

impl Serialize for SnapshotRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(FIELD_KEYS.len() + self.prices.len()))?;
        seq.serialize_element(&self.latitude)?;
        seq.serialize_element(&self.longitude)?;
        seq.serialize_element(&self.address)?;
        seq.serialize_element(&self.postcode)?;
        seq.serialize_element(&self.city)?;
        for price in &self.prices {
            seq.serialize_element(price)?;
        }
        seq.end()
    }
}
