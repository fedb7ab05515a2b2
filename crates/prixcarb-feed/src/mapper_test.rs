use chrono::NaiveDate;
use prixcarb_core::CoreError;

use super::*;
use crate::element::parse_document;

fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, min, 0)
        .unwrap()
}

fn map(xml: &str) -> Result<SalePoint, FeedError> {
    map_sale_point(&parse_document(xml).expect("fixture should be well-formed XML"))
}

const FULL_STATION: &str = r#"<pdv id="1000001" latitude="4620114" longitude="519791" cp="01000" pop="R">
  <adresse>596 AVENUE DE TREVOUX</adresse>
  <ville>SAINT-DENIS-LES-BOURG</ville>
  <horaires automate-24-24="1">
    <jour id="1" nom="Lundi" ferme="">
      <horaire ouverture="06.00" fermeture="12.30"/>
      <horaire ouverture="14.00" fermeture="20.00"/>
    </jour>
    <jour id="7" nom="Dimanche" ferme="1"/>
  </horaires>
  <services>
    <service>Station de gonflage</service>
    <service>Laverie</service>
  </services>
  <prix nom="Gazole" id="1" maj="2024-03-01 07:53:00" valeur="1.906"/>
  <prix nom="Gazole" id="1" maj="2024-02-28T10:00:00" valeur="1.889"/>
  <prix nom="E10" id="5" maj="2024-03-01 07:53:00" valeur="1.899"/>
  <prix/>
  <rupture id="3" nom="E85" debut="2024-02-20 08:00:00" fin=""/>
  <rupture id="2" nom="SP95" debut="2024-01-02T00:00:00" fin="2024-01-05T00:00:00"/>
  <rupture/>
  <fermeture type="T" debut="2024-03-10 00:00:00" fin="2024-03-12 00:00:00"/>
  <fermeture type="D" debut="2024-04-01 00:00:00" fin="2024-04-02 00:00:00"/>
  <fermeture type="D" debut="2024-05-01 00:00:00" fin=""/>
  <fermeture/>
</pdv>"#;

#[test]
fn maps_identity_location_and_address() {
    let sp = map(FULL_STATION).expect("station should map");
    assert_eq!(sp.id, "1000001");
    assert!((sp.location.latitude - 4_620_114.0).abs() < f64::EPSILON);
    assert!((sp.location.longitude - 519_791.0).abs() < f64::EPSILON);
    assert_eq!(sp.address.postcode, "01000");
    assert_eq!(sp.address.street, "596 AVENUE DE TREVOUX");
    assert_eq!(sp.address.city, "SAINT-DENIS-LES-BOURG");
}

#[test]
fn prices_are_total_and_keep_full_history() {
    let sp = map(FULL_STATION).unwrap();
    assert_eq!(sp.prices.iter().count(), FuelType::ALL.len());

    let gazole = sp.prices.observations(FuelType::Gazole);
    assert_eq!(gazole.len(), 2, "both Gazole observations should be kept");
    assert_eq!(gazole[0].timestamp, at(2024, 3, 1, 7, 53));
    assert_eq!(gazole[1].timestamp, at(2024, 2, 28, 10, 0));
    assert_eq!(sp.prices.observations(FuelType::E10).len(), 1);

    for fuel in [FuelType::Sp95, FuelType::E85, FuelType::Gplc, FuelType::Sp98] {
        assert!(sp.prices.observations(fuel).is_empty(), "{fuel} should be empty");
    }
    assert_eq!(sp.prices.observation_count(), 3);
}

#[test]
fn outages_keep_open_ended_ones_open() {
    let sp = map(FULL_STATION).unwrap();
    assert_eq!(sp.out_of_orders.len(), 2);
    assert_eq!(sp.out_of_orders[0].fuel_type, FuelType::E85);
    assert!(sp.out_of_orders[0].is_ongoing());
    assert_eq!(sp.out_of_orders[1].fuel_type, FuelType::Sp95);
    assert_eq!(sp.out_of_orders[1].end_time, Some(at(2024, 1, 5, 0, 0)));
}

#[test]
fn temporary_closures_drop_their_end_time() {
    let sp = map(FULL_STATION).unwrap();
    assert_eq!(sp.closing_times.len(), 3);
    assert_eq!(sp.closing_times[0].end, ClosingEnd::Temporary);
    assert_eq!(sp.closing_times[0].end_time(), None);
    assert_eq!(
        sp.closing_times[1].end,
        ClosingEnd::Timed(at(2024, 4, 2, 0, 0))
    );
    assert_eq!(sp.closing_times[2].end, ClosingEnd::Indefinite);
}

#[test]
fn schedule_and_services_are_mapped() {
    let sp = map(FULL_STATION).unwrap();
    assert!(sp.is_24h_automated);

    let days = sp.opening_days.expect("schedule should be present");
    assert_eq!(days.len(), 2);
    assert_eq!(days[0].day, WeekDay::Monday);
    assert!(!days[0].closed);
    assert_eq!(
        days[0].opening_hours,
        vec![
            OpeningHours {
                open_minute: 360,
                close_minute: 750,
            },
            OpeningHours {
                open_minute: 840,
                close_minute: 1200,
            },
        ]
    );
    assert_eq!(days[1].day, WeekDay::Sunday);
    assert!(days[1].closed);
    assert!(days[1].opening_hours.is_empty());

    let services = sp.services.expect("services should be present");
    assert_eq!(services.len(), 2);
    assert!(services.contains("Laverie"));
}

#[test]
fn station_without_schedule_or_services() {
    let sp = map(
        r#"<pdv id="42" latitude="1" longitude="2" cp="75001">
            <adresse>1 RUE DE RIVOLI</adresse><ville>PARIS</ville>
        </pdv>"#,
    )
    .unwrap();
    assert!(sp.opening_days.is_none());
    assert!(sp.services.is_none());
    assert!(!sp.is_24h_automated);
    assert_eq!(sp.prices.observation_count(), 0);
    assert_eq!(sp.prices.iter().count(), FuelType::ALL.len());
}

#[test]
fn attribute_less_price_contributes_nothing() {
    let sp = map(
        r#"<pdv id="7" latitude="1" longitude="2" cp="75001">
            <adresse>A</adresse><ville>B</ville><prix/><prix></prix>
        </pdv>"#,
    )
    .unwrap();
    assert!(sp.prices.iter().all(|(_, obs)| obs.is_empty()));
}

#[test]
fn unknown_child_tag_is_malformed() {
    let err = map(
        r#"<pdv id="9" latitude="1" longitude="2" cp="75001">
            <adresse>A</adresse><ville>B</ville><lavage/>
        </pdv>"#,
    )
    .unwrap_err();
    assert!(
        matches!(err, FeedError::MalformedFeed { ref tag, ref context } if tag == "lavage" && context == "sale point 9"),
        "expected MalformedFeed(lavage), got: {err:?}"
    );
}

#[test]
fn unknown_fuel_name_is_reported() {
    let err = map(
        r#"<pdv id="9" latitude="1" longitude="2" cp="75001">
            <adresse>A</adresse><ville>B</ville>
            <prix nom="Kerosene" maj="2024-01-01 00:00:00" valeur="1.0"/>
        </pdv>"#,
    )
    .unwrap_err();
    assert!(
        matches!(err, FeedError::Model(CoreError::UnknownEnumValue { ref value, .. }) if value == "Kerosene"),
        "got: {err:?}"
    );
}

#[test]
fn fuel_falls_back_to_numeric_id() {
    let sp = map(
        r#"<pdv id="9" latitude="1" longitude="2" cp="75001">
            <adresse>A</adresse><ville>B</ville>
            <prix id="6" maj="2024-01-01 00:00:00" valeur="1.999"/>
        </pdv>"#,
    )
    .unwrap();
    assert_eq!(sp.prices.observations(FuelType::Sp98).len(), 1);
}

#[test]
fn unknown_day_ordinal_is_reported() {
    let err = map(
        r#"<pdv id="9" latitude="1" longitude="2" cp="75001">
            <adresse>A</adresse><ville>B</ville>
            <horaires><jour id="8" nom="Octodi"/></horaires>
        </pdv>"#,
    )
    .unwrap_err();
    assert!(
        matches!(err, FeedError::Model(CoreError::UnknownEnumValue { kind: "week day", .. })),
        "got: {err:?}"
    );
}

#[test]
fn unexpected_tag_inside_schedule_is_malformed() {
    let err = map(
        r#"<pdv id="9" latitude="1" longitude="2" cp="75001">
            <adresse>A</adresse><ville>B</ville>
            <horaires><jour id="1"><pause debut="12.00"/></jour></horaires>
        </pdv>"#,
    )
    .unwrap_err();
    assert!(
        matches!(err, FeedError::MalformedFeed { ref tag, .. } if tag == "pause"),
        "got: {err:?}"
    );
}

#[test]
fn invalid_price_value_names_the_attribute() {
    let err = map(
        r#"<pdv id="9" latitude="1" longitude="2" cp="75001">
            <adresse>A</adresse><ville>B</ville>
            <prix nom="Gazole" maj="2024-01-01 00:00:00" valeur="cher"/>
        </pdv>"#,
    )
    .unwrap_err();
    assert!(
        matches!(err, FeedError::InvalidAttribute { attribute: "valeur", ref value, .. } if value == "cher"),
        "got: {err:?}"
    );
}

#[test]
fn invalid_timestamp_is_rejected() {
    let err = map(
        r#"<pdv id="9" latitude="1" longitude="2" cp="75001">
            <adresse>A</adresse><ville>B</ville>
            <prix nom="Gazole" maj="01/03/2024" valeur="1.8"/>
        </pdv>"#,
    )
    .unwrap_err();
    assert!(
        matches!(err, FeedError::InvalidAttribute { attribute: "maj", .. }),
        "got: {err:?}"
    );
}

#[test]
fn missing_id_and_missing_city_are_errors() {
    let err = map(r#"<pdv latitude="1" longitude="2" cp="75001"/>"#).unwrap_err();
    assert!(
        matches!(err, FeedError::MissingAttribute { attribute: "id", .. }),
        "got: {err:?}"
    );

    let err = map(r#"<pdv id="1" latitude="1" longitude="2" cp="75001"><adresse>A</adresse></pdv>"#)
        .unwrap_err();
    assert!(
        matches!(err, FeedError::MissingChild { tag: "ville", .. }),
        "got: {err:?}"
    );
}
