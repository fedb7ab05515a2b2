//! Parse -> degrade -> aggregate over an inline feed.

use prixcarb_core::FuelType;
use prixcarb_feed::{parse_sale_points, FeedError};
use prixcarb_report::{aggregate, degrade, Department, LatestSnapshot};

const TWO_PARIS_STATIONS: &str = r#"<?xml version="1.0" encoding="ISO-8859-1" standalone="yes"?>
<pdv_liste>
  <pdv id="75001001" latitude="4886000" longitude="235000" cp="75001" pop="R">
    <adresse>1 RUE DE RIVOLI</adresse>
    <ville>PARIS</ville>
    <prix nom="Gazole" id="1" maj="2024-03-01T10:00:00" valeur="1.80"/>
    <prix nom="Gazole" id="1" maj="2024-03-01 14:00:00" valeur="1.85"/>
    <prix/>
  </pdv>
  <pdv id="75002001" latitude="4886900" longitude="234100" cp="75002" pop="R">
    <adresse>2 RUE DE LA PAIX</adresse>
    <ville>PARIS</ville>
    <prix nom="Gazole" id="1" maj="2024-03-01 09:00:00" valeur="1.90"/>
  </pdv>
</pdv_liste>"#;

#[test]
fn two_paris_stations_end_to_end() {
    let sale_points = parse_sale_points(TWO_PARIS_STATIONS).expect("feed should parse");
    let degraded = degrade(&sale_points);

    assert_eq!(degraded.len(), 2);
    assert_eq!(degraded[0].price(FuelType::Gazole), Some(1.85));
    assert_eq!(degraded[1].price(FuelType::Gazole), Some(1.90));
    assert!(degraded.iter().all(|d| d.prices.len() == 1));

    let report = aggregate(&degraded);
    let gazole = report
        .department(Department::Numbered(75))
        .expect("Paris should be reported")
        .get(FuelType::Gazole);
    assert_eq!(gazole.count, 2);
    assert!((gazole.total - 3.75).abs() < 1e-9);
    assert!((gazole.average() - 1.875).abs() < 1e-9);

    let national = report.total().get(FuelType::Gazole);
    assert_eq!(national.count, 2);
    assert!((national.total - gazole.total).abs() < f64::EPSILON);
    assert!((report.total().get(FuelType::E85).average() + 1.0).abs() < f64::EPSILON);
}

#[test]
fn latest_snapshot_matches_degraded_order() {
    let degraded = degrade(&parse_sale_points(TWO_PARIS_STATIONS).unwrap());
    let snapshot = LatestSnapshot::from_degraded(&degraded);
    assert_eq!(snapshot.data.len(), 2);
    assert_eq!(snapshot.data[0].postcode, "75001");
    assert_eq!(snapshot.data[1].prices[0], 1.90);
}

#[test]
fn unknown_tag_produces_no_report() {
    let feed = TWO_PARIS_STATIONS.replace("<prix/>", "<promo/>");
    let result = parse_sale_points(&feed);
    assert!(
        matches!(result, Err(FeedError::MalformedFeed { ref tag, .. }) if tag == "promo"),
        "expected MalformedFeed(promo), got: {result:?}"
    );
}
