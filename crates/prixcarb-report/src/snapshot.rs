use std::collections::BTreeMap;

use prixcarb_core::{FuelType, PriceObservation, SalePoint};
use serde::Serialize;

/// A sale point reduced to its most recent price per fuel type.
///
/// Fuels the station never reported are absent from `prices`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DegradedSalePoint {
    pub id: String,
    pub latitude: f64,
    pub longitude: f64,
    pub address: String,
    pub postcode: String,
    pub city: String,
    pub prices: BTreeMap<FuelType, PriceObservation>,
}

impl DegradedSalePoint {
    #[must_use]
    pub fn from_sale_point(sale_point: &SalePoint) -> Self {
        let prices = sale_point
            .prices
            .iter()
            .filter_map(|(fuel, history)| latest_observation(history).map(|obs| (fuel, *obs)))
            .collect();

        Self {
            id: sale_point.id.clone(),
            latitude: sale_point.location.latitude,
            longitude: sale_point.location.longitude,
            address: sale_point.address.street.clone(),
            postcode: sale_point.address.postcode.clone(),
            city: sale_point.address.city.clone(),
            prices,
        }
    }

    /// Latest price of `fuel`, if the station reports it.
    #[must_use]
    pub fn price(&self, fuel: FuelType) -> Option<f64> {
        self.prices.get(&fuel).map(|obs| obs.price)
    }
}

/// Picks the observation with the greatest timestamp.
///
/// Observations sharing the greatest timestamp resolve to the last one in
/// feed order. Returns `None` for an empty history.
#[must_use]
pub fn latest_observation(history: &[PriceObservation]) -> Option<&PriceObservation> {
    history.iter().max_by_key(|obs| obs.timestamp)
}

/// Degrades every sale point to its latest prices, preserving input order.
#[must_use]
pub fn degrade(sale_points: &[SalePoint]) -> Vec<DegradedSalePoint> {
    tracing::debug!(count = sale_points.len(), "degrading sale points to latest prices");
    sale_points
        .iter()
        .map(DegradedSalePoint::from_sale_point)
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveDateTime};
    use prixcarb_core::{Address, Location, Prices};

    use super::*;

    fn at(hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn obs(hour: u32, price: f64) -> PriceObservation {
        PriceObservation {
            timestamp: at(hour),
            price,
        }
    }

    fn station(id: &str, prices: &[(FuelType, PriceObservation)]) -> SalePoint {
        let mut history = Prices::new();
        for (fuel, observation) in prices {
            history.record(*fuel, *observation);
        }
        SalePoint {
            id: id.to_string(),
            location: Location {
                latitude: 4_886_000.0,
                longitude: 235_000.0,
            },
            address: Address {
                postcode: "75001".to_string(),
                street: "1 RUE DE RIVOLI".to_string(),
                city: "PARIS".to_string(),
            },
            prices: history,
            out_of_orders: vec![],
            closing_times: vec![],
            services: None,
            is_24h_automated: false,
            opening_days: None,
        }
    }

    /// Rebuilds a single-observation sale point from a degraded one.
    fn reinflate(degraded: &DegradedSalePoint) -> SalePoint {
        let prices: Vec<(FuelType, PriceObservation)> =
            degraded.prices.iter().map(|(f, o)| (*f, *o)).collect();
        station(&degraded.id, &prices)
    }

    #[test]
    fn keeps_newest_observation_not_last_parsed() {
        let sp = station(
            "A",
            &[
                (FuelType::Gazole, obs(14, 1.85)),
                (FuelType::Gazole, obs(10, 1.80)),
            ],
        );
        let degraded = DegradedSalePoint::from_sale_point(&sp);
        assert_eq!(degraded.price(FuelType::Gazole), Some(1.85));
        assert_eq!(degraded.prices[&FuelType::Gazole].timestamp, at(14));
    }

    #[test]
    fn fuels_without_history_are_absent() {
        let sp = station("A", &[(FuelType::E10, obs(9, 1.79))]);
        let degraded = DegradedSalePoint::from_sale_point(&sp);
        assert_eq!(degraded.prices.len(), 1);
        assert_eq!(degraded.price(FuelType::Gazole), None);
        assert!(!degraded.prices.contains_key(&FuelType::Sp98));
    }

    #[test]
    fn identical_timestamps_resolve_to_last_in_feed_order() {
        let history = [obs(10, 1.70), obs(10, 1.75), obs(8, 1.90)];
        let latest = latest_observation(&history).unwrap();
        assert!((latest.price - 1.75).abs() < f64::EPSILON);
    }

    #[test]
    fn empty_history_has_no_latest() {
        assert!(latest_observation(&[]).is_none());
    }

    #[test]
    fn copies_identity_and_address_fields() {
        let degraded = DegradedSalePoint::from_sale_point(&station("X1", &[]));
        assert_eq!(degraded.id, "X1");
        assert_eq!(degraded.address, "1 RUE DE RIVOLI");
        assert_eq!(degraded.postcode, "75001");
        assert_eq!(degraded.city, "PARIS");
        assert!((degraded.latitude - 4_886_000.0).abs() < f64::EPSILON);
        assert!(degraded.prices.is_empty());
    }

    #[test]
    fn degrade_is_idempotent_on_single_observations() {
        let points = vec![
            station(
                "A",
                &[
                    (FuelType::Gazole, obs(10, 1.80)),
                    (FuelType::Gazole, obs(14, 1.85)),
                    (FuelType::Sp95, obs(7, 1.95)),
                ],
            ),
            station("B", &[(FuelType::E85, obs(9, 0.99))]),
        ];
        let once = degrade(&points);
        let again = degrade(&once.iter().map(reinflate).collect::<Vec<_>>());
        assert_eq!(once, again);
    }

    #[test]
    fn degrade_never_increases_observations() {
        let points = vec![
            station(
                "A",
                &[
                    (FuelType::Gazole, obs(10, 1.80)),
                    (FuelType::Gazole, obs(14, 1.85)),
                    (FuelType::Gazole, obs(12, 1.83)),
                ],
            ),
            station("B", &[]),
        ];
        for (sp, degraded) in points.iter().zip(degrade(&points)) {
            for (fuel, history) in sp.prices.iter() {
                let kept = usize::from(degraded.prices.contains_key(&fuel));
                assert!(kept <= history.len());
                assert_eq!(kept == 1, !history.is_empty());
            }
        }
    }
}
