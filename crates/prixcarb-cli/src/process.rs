use std::path::Path;

use anyhow::Context;
use prixcarb_report::{aggregate, degrade, LatestSnapshot};

use crate::output::save_as_json;

pub(crate) const LATEST_FILE: &str = "latest.json";
pub(crate) const METRICS_FILE: &str = "metrics.json";
pub(crate) const SALE_POINTS_FILE: &str = "sale_points.json";

/// Parse `feed`, then write the latest snapshot and department metrics to
/// `output_dir`. With `full`, the complete parsed model is written too.
///
/// Nothing is written when the feed fails to parse.
///
/// # Errors
///
/// Returns an error if the feed cannot be loaded or an output file cannot be
/// written.
pub(crate) fn run_process(feed: &Path, output_dir: &Path, full: bool) -> anyhow::Result<()> {
    let sale_points = prixcarb_feed::load_sale_points(feed)
        .with_context(|| format!("failed to load feed {}", feed.display()))?;

    let degraded = degrade(&sale_points);
    let metrics = aggregate(&degraded);
    if metrics.skipped() > 0 {
        tracing::warn!(
            skipped = metrics.skipped(),
            "some sale points were left out of the metrics"
        );
    }

    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("failed to create {}", output_dir.display()))?;

    save_as_json(
        &LatestSnapshot::from_degraded(&degraded),
        &output_dir.join(LATEST_FILE),
    )?;
    save_as_json(&metrics, &output_dir.join(METRICS_FILE))?;
    if full {
        save_as_json(&sale_points, &output_dir.join(SALE_POINTS_FILE))?;
    }

    let ongoing_outages = sale_points
        .iter()
        .flat_map(|sale_point| &sale_point.out_of_orders)
        .filter(|outage| outage.is_ongoing())
        .count();
    tracing::info!(
        sale_points = sale_points.len(),
        ongoing_outages,
        output_dir = %output_dir.display(),
        full,
        "feed processed"
    );
    println!(
        "processed {} sale points into {}",
        sale_points.len(),
        output_dir.display()
    );
    Ok(())
}
