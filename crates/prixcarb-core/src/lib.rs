//! Domain model for the French fuel-price open-data feed.
//!
//! A [`SalePoint`] is one station of the feed with its full price history,
//! outages, closures and weekly schedule. Everything downstream (degraded
//! snapshots, department metrics) is derived from these types.

pub mod app_config;
pub mod config;
pub mod error;
pub mod fuel;
pub mod sale_point;
pub mod schedule;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use error::{ConfigError, CoreError};
pub use fuel::FuelType;
pub use sale_point::{
    Address, ClosingEnd, ClosingTime, Location, OutOfOrder, PriceObservation, Prices, SalePoint,
};
pub use schedule::{OpeningHours, WeekDay, WorkDay};
