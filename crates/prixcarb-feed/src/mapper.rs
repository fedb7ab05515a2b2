//! Mapping of `pdv` elements to [`SalePoint`]s.
//!
//! The tag grammar of a station is closed: `adresse`, `ville`, `prix`,
//! `services`, `horaires`, `rupture` and `fermeture`. Anything else fails the
//! mapping with [`FeedError::MalformedFeed`] so that format drift in the feed
//! is noticed instead of silently dropped.

use std::collections::BTreeSet;

use chrono::NaiveDateTime;
use prixcarb_core::{
    Address, ClosingEnd, ClosingTime, FuelType, Location, OpeningHours, OutOfOrder,
    PriceObservation, Prices, SalePoint, WeekDay, WorkDay,
};

use crate::element::Element;
use crate::error::FeedError;
use crate::parse::{parse_decimal, parse_flag, parse_hour, parse_timestamp};

/// Closure type marking a temporary closure in `<fermeture type="T">`.
const TEMPORARY_CLOSURE: &str = "T";

/// Maps one `pdv` element to a [`SalePoint`].
///
/// `prix`, `rupture` and `fermeture` children without attributes are feed
/// placeholders and contribute nothing. Each attributed `prix` appends to the
/// fuel's history.
///
/// # Errors
///
/// Returns [`FeedError::MalformedFeed`] for a child tag outside the grammar,
/// [`FeedError::MissingChild`] without `adresse` or `ville`,
/// [`FeedError::MissingAttribute`]/[`FeedError::InvalidAttribute`] for bad
/// attributes, and [`FeedError::Model`] for unknown fuel or day names.
pub fn map_sale_point(element: &Element) -> Result<SalePoint, FeedError> {
    let id = required(element, "id")?.trim().to_string();
    let context = format!("sale point {id}");
    let location = Location {
        latitude: decimal(element, "latitude")?,
        longitude: decimal(element, "longitude")?,
    };
    let postcode = required(element, "cp")?.trim().to_string();

    let mut street = None;
    let mut city = None;
    let mut prices = Prices::new();
    let mut out_of_orders = Vec::new();
    let mut closing_times = Vec::new();
    let mut services = None;
    let mut is_24h_automated = false;
    let mut opening_days = None;

    for child in &element.children {
        match child.name.as_str() {
            "adresse" => street = Some(child.text.clone()),
            "ville" => city = Some(child.text.clone()),
            "prix" => {
                if child.has_attributes() {
                    let (fuel, observation) = map_price(child)?;
                    prices.record(fuel, observation);
                }
            }
            "services" => services = Some(map_services(child, &context)?),
            "horaires" => {
                is_24h_automated = parse_flag(child.attribute("automate-24-24"));
                opening_days = Some(map_schedule(child, &context)?);
            }
            "rupture" => {
                if child.has_attributes() {
                    out_of_orders.push(map_out_of_order(child)?);
                }
            }
            "fermeture" => {
                if child.has_attributes() {
                    closing_times.push(map_closing_time(child)?);
                }
            }
            other => {
                return Err(FeedError::MalformedFeed {
                    tag: other.to_string(),
                    context,
                })
            }
        }
    }

    let street = street.ok_or_else(|| FeedError::MissingChild {
        tag: "adresse",
        context: context.clone(),
    })?;
    let city = city.ok_or_else(|| FeedError::MissingChild {
        tag: "ville",
        context: context.clone(),
    })?;

    Ok(SalePoint {
        id,
        location,
        address: Address {
            postcode,
            street,
            city,
        },
        prices,
        out_of_orders,
        closing_times,
        services,
        is_24h_automated,
        opening_days,
    })
}

/// Maps `<prix nom="Gazole" maj="..." valeur="1.906"/>`.
fn map_price(element: &Element) -> Result<(FuelType, PriceObservation), FeedError> {
    let fuel = fuel_type(element)?;
    let observation = PriceObservation {
        timestamp: timestamp(element, "maj")?,
        price: decimal(element, "valeur")?,
    };
    Ok((fuel, observation))
}

/// Maps `<rupture nom="E85" debut="..." fin=""/>`; a blank `fin` means ongoing.
fn map_out_of_order(element: &Element) -> Result<OutOfOrder, FeedError> {
    Ok(OutOfOrder {
        fuel_type: fuel_type(element)?,
        start_time: timestamp(element, "debut")?,
        end_time: optional_timestamp(element, "fin")?,
    })
}

/// Maps `<fermeture type="T|D" debut="..." fin="..."/>`.
fn map_closing_time(element: &Element) -> Result<ClosingTime, FeedError> {
    let start_time = timestamp(element, "debut")?;
    let end = if element.attribute("type").map(str::trim) == Some(TEMPORARY_CLOSURE) {
        ClosingEnd::Temporary
    } else {
        optional_timestamp(element, "fin")?.map_or(ClosingEnd::Indefinite, ClosingEnd::Timed)
    };
    Ok(ClosingTime { start_time, end })
}

fn map_services(element: &Element, context: &str) -> Result<BTreeSet<String>, FeedError> {
    element
        .children
        .iter()
        .map(|child| {
            if child.name == "service" {
                Ok(child.text.clone())
            } else {
                Err(FeedError::MalformedFeed {
                    tag: child.name.clone(),
                    context: format!("services of {context}"),
                })
            }
        })
        .collect()
}

fn map_schedule(element: &Element, context: &str) -> Result<Vec<WorkDay>, FeedError> {
    element
        .children
        .iter()
        .map(|child| {
            if child.name == "jour" {
                map_work_day(child, context)
            } else {
                Err(FeedError::MalformedFeed {
                    tag: child.name.clone(),
                    context: format!("schedule of {context}"),
                })
            }
        })
        .collect()
}

/// Maps `<jour id="1" nom="Lundi" ferme="">` and its `horaire` intervals.
fn map_work_day(element: &Element, context: &str) -> Result<WorkDay, FeedError> {
    let day = match element.attribute("id") {
        Some(raw) => {
            let ordinal = raw
                .trim()
                .parse::<u8>()
                .map_err(|_| invalid(element, "id", raw))?;
            WeekDay::from_ordinal(ordinal)?
        }
        None => WeekDay::from_name(required(element, "nom")?)?,
    };

    let opening_hours = element
        .children
        .iter()
        .map(|child| {
            if child.name != "horaire" {
                return Err(FeedError::MalformedFeed {
                    tag: child.name.clone(),
                    context: format!("{day} of {context}"),
                });
            }
            Ok(OpeningHours {
                open_minute: hour(child, "ouverture")?,
                close_minute: hour(child, "fermeture")?,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(WorkDay {
        day,
        closed: parse_flag(element.attribute("ferme")),
        opening_hours,
    })
}

/// Resolves the fuel from `nom`, falling back to the numeric `id` some
/// elements carry instead.
fn fuel_type(element: &Element) -> Result<FuelType, FeedError> {
    if let Some(name) = element.attribute("nom") {
        return Ok(FuelType::from_name(name)?);
    }
    let raw = required(element, "id")?;
    let ordinal = raw
        .trim()
        .parse::<u8>()
        .map_err(|_| invalid(element, "id", raw))?;
    Ok(FuelType::from_ordinal(ordinal)?)
}

fn required<'a>(element: &'a Element, attribute: &'static str) -> Result<&'a str, FeedError> {
    element
        .attribute(attribute)
        .ok_or_else(|| FeedError::MissingAttribute {
            tag: element.name.clone(),
            attribute,
        })
}

fn invalid(element: &Element, attribute: &'static str, value: &str) -> FeedError {
    FeedError::InvalidAttribute {
        tag: element.name.clone(),
        attribute,
        value: value.to_string(),
    }
}

fn decimal(element: &Element, attribute: &'static str) -> Result<f64, FeedError> {
    let raw = required(element, attribute)?;
    parse_decimal(raw).ok_or_else(|| invalid(element, attribute, raw))
}

fn hour(element: &Element, attribute: &'static str) -> Result<u16, FeedError> {
    let raw = required(element, attribute)?;
    parse_hour(raw).ok_or_else(|| invalid(element, attribute, raw))
}

fn timestamp(element: &Element, attribute: &'static str) -> Result<NaiveDateTime, FeedError> {
    let raw = required(element, attribute)?;
    parse_timestamp(raw).ok_or_else(|| invalid(element, attribute, raw))
}

/// Absent and blank attributes both read as `None`.
fn optional_timestamp(
    element: &Element,
    attribute: &'static str,
) -> Result<Option<NaiveDateTime>, FeedError> {
    match element.attribute(attribute).map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => parse_timestamp(raw)
            .map(Some)
            .ok_or_else(|| invalid(element, attribute, raw)),
    }
}

#[cfg(test)]
#[path = "mapper_test.rs"]
mod tests;
