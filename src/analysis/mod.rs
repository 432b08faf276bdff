//! Renders the analysis charts for the transaction table to files.

mod aggregation;
mod charts;
mod correlation;
mod endpoint;
mod prepare;

use std::path::{Path, PathBuf};

use charming::Chart;

pub use charts::ChartKind;
pub use endpoint::run_analysis_endpoint;

use crate::{Error, transaction::Transaction};

use aggregation::{expense_by_category, monthly_totals};
use charts::{correlation_heatmap_chart, expense_distribution_chart, monthly_trend_chart};
use correlation::correlation_matrix;
use prepare::prepare;

/// Render every [ChartKind] for `transactions` into `output_dir`.
///
/// The directory is created if it does not exist and existing charts are
/// overwritten.
///
/// # Returns
/// The paths of the written files, in [ChartKind::ALL] order.
///
/// # Errors
/// Returns [Error::NoData] if `transactions` is empty, [Error::IoError] if the
/// directory could not be created, or [Error::ChartRenderError] if a chart
/// could not be saved.
pub fn generate_analytics(
    transactions: &[Transaction],
    output_dir: &Path,
) -> Result<Vec<PathBuf>, Error> {
    if transactions.is_empty() {
        return Err(Error::NoData);
    }

    std::fs::create_dir_all(output_dir).map_err(|error| {
        tracing::error!(
            "could not create output directory {}: {error}",
            output_dir.display()
        );
        Error::IoError(error.to_string())
    })?;

    let rows = prepare(transactions);

    let charts = [
        (
            ChartKind::MonthlyTrend,
            monthly_trend_chart(&monthly_totals(&rows)),
        ),
        (
            ChartKind::ExpenseDistribution,
            expense_distribution_chart(&expense_by_category(&rows)),
        ),
        (
            ChartKind::CorrelationHeatmap,
            correlation_heatmap_chart(&correlation_matrix(&rows)),
        ),
    ];

    let mut paths = Vec::with_capacity(charts.len());

    for (kind, chart) in charts {
        let path = chart_path(output_dir, kind);
        save_chart(&chart, kind, &path)?;
        tracing::debug!("Saved {}", path.display());
        paths.push(path);
    }

    tracing::info!(
        "All analytics visuals generated in '{}'",
        output_dir.display()
    );

    Ok(paths)
}

/// The path a chart of `kind` is saved to in `output_dir`.
pub fn chart_path(output_dir: &Path, kind: ChartKind) -> PathBuf {
    output_dir.join(kind.file_name())
}

#[cfg(not(feature = "png"))]
fn save_chart(chart: &Chart, kind: ChartKind, path: &Path) -> Result<(), Error> {
    use charming::HtmlRenderer;

    let (width, height) = kind.size();

    HtmlRenderer::new(kind.title(), width, height)
        .save(chart, path)
        .map_err(|error| {
            tracing::error!("could not render {}: {error:?}", kind.file_name());
            Error::ChartRenderError(format!("{error:?}"))
        })
}

#[cfg(feature = "png")]
fn save_chart(chart: &Chart, kind: ChartKind, path: &Path) -> Result<(), Error> {
    use charming::{ImageFormat, ImageRenderer};

    let (width, height) = kind.size();

    ImageRenderer::new(width as u32, height as u32)
        .save_format(ImageFormat::Png, chart, path)
        .map_err(|error| {
            tracing::error!("could not render {}: {error:?}", kind.file_name());
            Error::ChartRenderError(format!("{error:?}"))
        })
}
