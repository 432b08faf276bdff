//! Chart generation for the analysis visuals.
//!
//! This module creates ECharts visualizations for the transaction table:
//! - **Monthly Trend**: Monthly income and expense totals as two lines
//! - **Expense Distribution**: Total expenses per category as horizontal bars
//! - **Correlation Heatmap**: Pearson correlation between the numeric columns

use charming::{
    Chart,
    component::{Axis, Grid, Legend, Title, VisualMap, VisualMapPiece},
    datatype::DataFrame,
    df,
    element::{
        AxisLabel, AxisPointer, AxisPointerType, AxisType, JsFunction, Label, Symbol, Tooltip,
        Trigger,
    },
    series::{Bar, Heatmap, Line},
};

use crate::{html::CURRENCY_SYMBOL, transaction::TransactionType};

use super::{
    aggregation::{MonthlyTotal, format_month_labels, series_for_type, sorted_months},
    correlation::{CORRELATION_COLUMNS, CorrelationMatrix},
};

/// The file extension of rendered charts.
#[cfg(not(feature = "png"))]
pub const CHART_FILE_EXTENSION: &str = "html";
/// The file extension of rendered charts.
#[cfg(feature = "png")]
pub const CHART_FILE_EXTENSION: &str = "png";

/// The charts produced by an analysis run, each saved under a fixed name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    /// Monthly income and expense totals.
    MonthlyTrend,
    /// Total expenses per category.
    ExpenseDistribution,
    /// Correlation between the numeric columns.
    CorrelationHeatmap,
}

impl ChartKind {
    /// Every chart, in display order.
    pub const ALL: [ChartKind; 3] = [
        ChartKind::MonthlyTrend,
        ChartKind::ExpenseDistribution,
        ChartKind::CorrelationHeatmap,
    ];

    /// The file name without its extension, e.g. "monthly_trend".
    pub fn file_stem(&self) -> &'static str {
        match self {
            ChartKind::MonthlyTrend => "monthly_trend",
            ChartKind::ExpenseDistribution => "expense_distribution",
            ChartKind::CorrelationHeatmap => "correlation_heatmap",
        }
    }

    /// The file name the chart is saved under, e.g. "monthly_trend.html".
    pub fn file_name(&self) -> String {
        format!("{}.{CHART_FILE_EXTENSION}", self.file_stem())
    }

    /// The chart title.
    pub fn title(&self) -> &'static str {
        match self {
            ChartKind::MonthlyTrend => "Monthly Income vs Expense Trend",
            ChartKind::ExpenseDistribution => "Expense Distribution by Category",
            ChartKind::CorrelationHeatmap => "Feature Correlation Heatmap",
        }
    }

    /// The rendered size in pixels as `(width, height)`.
    pub fn size(&self) -> (u64, u64) {
        match self {
            ChartKind::MonthlyTrend => (900, 500),
            ChartKind::ExpenseDistribution => (600, 400),
            ChartKind::CorrelationHeatmap => (600, 500),
        }
    }
}

pub(super) fn monthly_trend_chart(totals: &[MonthlyTotal]) -> Chart {
    let months = sorted_months(totals);
    let labels = format_month_labels(&months);

    let mut chart = Chart::new()
        .title(Title::new().text(ChartKind::MonthlyTrend.title()))
        .tooltip(currency_tooltip())
        .legend(Legend::new().top("8%"))
        .grid(
            Grid::new()
                .left("3%")
                .right("4%")
                .bottom("3%")
                .top(80)
                .contain_label(true),
        )
        .x_axis(
            Axis::new()
                .type_(AxisType::Category)
                .name("Month")
                .axis_label(AxisLabel::new().rotate(45.0))
                .data(labels),
        )
        .y_axis(
            Axis::new()
                .type_(AxisType::Value)
                .name(format!("Amount ({CURRENCY_SYMBOL})")),
        );

    for type_ in [TransactionType::Expense, TransactionType::Income] {
        if !totals.iter().any(|total| total.type_ == type_) {
            continue;
        }

        chart = chart.series(
            Line::new()
                .name(type_.as_str())
                .symbol(Symbol::Circle)
                .data(series_for_type(totals, &months, type_)),
        );
    }

    chart
}

pub(super) fn expense_distribution_chart(expenses: &[(String, f64)]) -> Chart {
    let (categories, totals): (Vec<String>, Vec<f64>) = expenses.iter().cloned().unzip();

    Chart::new()
        .title(Title::new().text(ChartKind::ExpenseDistribution.title()))
        .tooltip(currency_tooltip())
        .grid(
            Grid::new()
                .left("3%")
                .right("8%")
                .bottom("3%")
                .top(60)
                .contain_label(true),
        )
        .x_axis(
            Axis::new()
                .type_(AxisType::Value)
                .name(format!("Total Expense ({CURRENCY_SYMBOL})")),
        )
        .y_axis(
            Axis::new()
                .type_(AxisType::Category)
                .name("Category")
                .data(categories),
        )
        .series(Bar::new().name("Total Expense").data(totals))
}

pub(super) fn correlation_heatmap_chart(matrix: &CorrelationMatrix) -> Chart {
    let labels: Vec<String> = CORRELATION_COLUMNS
        .iter()
        .map(|label| (*label).to_owned())
        .collect();

    // Undefined coefficients are left out so their cells stay blank.
    let mut points: Vec<DataFrame> = Vec::new();
    for (y, _) in CORRELATION_COLUMNS.iter().enumerate() {
        for (x, _) in CORRELATION_COLUMNS.iter().enumerate() {
            if let Some(value) = matrix.get(y, x) {
                points.push(df![x as f64, y as f64, round_to_hundredths(value)]);
            }
        }
    }

    Chart::new()
        .title(Title::new().text(ChartKind::CorrelationHeatmap.title()))
        .tooltip(Tooltip::new().trigger(Trigger::Item))
        .grid(
            Grid::new()
                .left("3%")
                .right("4%")
                .bottom(60)
                .top(60)
                .contain_label(true),
        )
        .x_axis(
            Axis::new()
                .type_(AxisType::Category)
                .data(labels.clone()),
        )
        .y_axis(Axis::new().type_(AxisType::Category).data(labels))
        .visual_map(VisualMap::new().show(true).pieces(vec![
            VisualMapPiece::new().gte(-1).lte(-0.5).color("#3b4cc0"),
            VisualMapPiece::new().gte(-0.5).lte(0).color("#aac7fd"),
            VisualMapPiece::new().gte(0).lte(0.5).color("#f7b89c"),
            VisualMapPiece::new().gte(0.5).lte(1).color("#b40426"),
        ]))
        .series(
            Heatmap::new()
                .name("Correlation")
                .label(Label::new().show(true).formatter(coefficient_formatter()))
                .data(points),
        )
}

fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Shows the coefficient stored in a heatmap cell's third value with two decimals.
fn coefficient_formatter() -> JsFunction {
    JsFunction::new_with_args("params", "return Number(params.value[2]).toFixed(2);")
}

#[inline]
fn currency_formatter() -> JsFunction {
    JsFunction::new_with_args(
        "number",
        "const currencyFormatter = new Intl.NumberFormat('en-IN', {
              style: 'currency',
              currency: 'INR',
              maximumFractionDigits: 0
            });
            return (number) ? currencyFormatter.format(number) : \"-\";",
    )
}

/// Creates a tooltip configuration for currency values
fn currency_tooltip() -> Tooltip {
    Tooltip::new()
        .trigger(Trigger::Axis)
        .value_formatter(currency_formatter())
        .axis_pointer(AxisPointer::new().type_(AxisPointerType::Shadow))
}
