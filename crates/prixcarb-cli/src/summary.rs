use std::path::Path;

use anyhow::Context;
use prixcarb_core::FuelType;
use prixcarb_report::{aggregate, degrade, FuelMetrics, MetricsReport, TOTAL_KEY};

/// Print the station count and average price per department for `fuel`.
///
/// # Errors
///
/// Returns an error if the feed cannot be loaded.
pub(crate) fn run_summary(feed: &Path, fuel: FuelType) -> anyhow::Result<()> {
    let sale_points = prixcarb_feed::load_sale_points(feed)
        .with_context(|| format!("failed to load feed {}", feed.display()))?;
    let report = aggregate(&degrade(&sale_points));

    if report.total().get(fuel).count == 0 {
        println!("no {fuel} prices found in {}", feed.display());
        return Ok(());
    }

    for line in summary_lines(&report, fuel) {
        println!("{line}");
    }
    if report.skipped() > 0 {
        tracing::warn!(
            skipped = report.skipped(),
            "some sale points were left out of the metrics"
        );
    }
    Ok(())
}

/// Table rows for one fuel, departments in display order then the total.
pub(crate) fn summary_lines(report: &MetricsReport, fuel: FuelType) -> Vec<String> {
    let mut lines = vec![format!("{:<7}{:>10}{:>10}", "DEPT", "STATIONS", fuel.name())];
    lines.extend(
        report
            .departments()
            .map(|(department, breakdown)| row(&department.code(), breakdown.get(fuel))),
    );
    lines.push(row(TOTAL_KEY, report.total().get(fuel)));
    lines
}

fn row(label: &str, metrics: FuelMetrics) -> String {
    format!(
        "{:<7}{:>10}{:>10}",
        label,
        metrics.count,
        fmt_average(metrics)
    )
}

fn fmt_average(metrics: FuelMetrics) -> String {
    if metrics.count == 0 {
        "\u{2014}".to_string()
    } else {
        format!("{:.3}", metrics.average())
    }
}
