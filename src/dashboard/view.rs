//! HTML views for the dashboard page and its partials.

use maud::{Markup, html};
use unicode_segmentation::UnicodeSegmentation;

use crate::{
    alert::Alert,
    endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, BUTTON_SECONDARY_STYLE, FORM_LABEL_STYLE,
        TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE, base, format_currency, link,
    },
    streaming::{MAX_REFRESH_SECS, MIN_REFRESH_SECS},
    transaction::{Transaction, manual_transaction_form},
};

use super::snapshot::{ChartFile, DashboardSnapshot};

/// The title shown at the top of the dashboard.
pub(super) const DASHBOARD_TITLE: &str = "Dynamic Personal Finance Dashboard";

/// The max number of graphemes to display in the recent transactions table
/// before truncating and displaying ellipses.
const MAX_DESCRIPTION_GRAPHEMES: usize = 32;

/// Charts are embedded as images when they are rendered to PNG, and as
/// standalone pages otherwise.
const EMBED_CHARTS_AS_IMAGES: bool = cfg!(feature = "png");

/// The full dashboard page.
pub(super) fn dashboard_view(snapshot: &DashboardSnapshot) -> Markup {
    let content = html!(
        header class="w-full px-6 pt-6 text-gray-900 dark:text-white"
        {
            h1 class="text-3xl font-bold" { (DASHBOARD_TITLE) }
        }

        (dashboard_content_view(snapshot, None))
    );

    base("Dashboard", &content)
}

/// Everything below the page title: the controls, the overview and the
/// visual insights.
///
/// Handlers that change session state respond with this partial so every
/// control reflects the new state.
pub(super) fn dashboard_content_view(snapshot: &DashboardSnapshot, alert: Option<Alert>) -> Markup {
    html!(
        div
            id="dashboard-content"
            class="flex flex-col lg:flex-row gap-6 px-2 lg:px-6 py-6 mx-auto
                max-w-screen-xl text-gray-900 dark:text-white"
        {
            aside class="w-full lg:w-80 shrink-0 space-y-6"
            {
                (controls_view(snapshot))
            }

            main class="flex-1 min-w-0 space-y-8"
            {
                div id="dashboard-alert"
                {
                    @if let Some(alert) = alert {
                        (alert.into_html())
                    }
                }

                (overview_view(snapshot))
                (visuals_view(&snapshot.charts))
            }
        }
    )
}

fn controls_view(snapshot: &DashboardSnapshot) -> Markup {
    let settings = snapshot.settings;
    let toggle_label = if snapshot.is_streaming {
        "Stop Streaming"
    } else {
        "Start Streaming"
    };

    html!(
        section id="controls" class="space-y-4"
        {
            h2 class="text-xl font-semibold" { "Controls" }

            button
                id="streaming-toggle"
                type="button"
                hx-post=(endpoints::STREAMING_API)
                hx-target="#dashboard-content"
                hx-swap="outerHTML"
                hx-target-error="#alert-container"
                class=(BUTTON_PRIMARY_STYLE)
            {
                (toggle_label)
            }

            form
                id="settings-form"
                hx-put=(endpoints::SETTINGS_API)
                hx-trigger="change"
                hx-target="#dashboard-content"
                hx-swap="outerHTML"
                hx-target-error="#alert-container"
                class="space-y-4"
            {
                div
                {
                    label for="refresh_secs" class=(FORM_LABEL_STYLE)
                    {
                        "Refresh every (seconds): "
                        span id="refresh-secs-value" { (settings.refresh_secs) }
                    }

                    input
                        name="refresh_secs"
                        id="refresh_secs"
                        type="range"
                        min=(MIN_REFRESH_SECS)
                        max=(MAX_REFRESH_SECS)
                        step="1"
                        value=(settings.refresh_secs)
                        class="w-full cursor-pointer";
                }

                label class="flex items-center gap-2 text-sm font-medium"
                {
                    input
                        name="persist"
                        id="persist"
                        type="checkbox"
                        checked[settings.persist]
                        class="rounded-sm border-gray-300 text-blue-600";

                    "Save generated data to CSV"
                }
            }

            button
                id="run-analysis"
                type="button"
                hx-post=(endpoints::ANALYSIS_API)
                hx-target="#dashboard-content"
                hx-swap="outerHTML"
                hx-target-error="#alert-container"
                class=(BUTTON_SECONDARY_STYLE)
            {
                "Run Analysis Now"
            }

            p class="text-sm"
            {
                (link(endpoints::TRANSACTIONS_CSV, "Download transactions as CSV"))
            }

            (manual_transaction_form(snapshot.today))
        }
    )
}

/// The summary metrics and recent transactions.
///
/// While streaming, the section polls for a fresh copy of itself every
/// refresh interval.
pub(super) fn overview_view(snapshot: &DashboardSnapshot) -> Markup {
    let poll_trigger = snapshot
        .is_streaming
        .then(|| format!("every {}s", snapshot.settings.refresh_secs));

    html!(
        section
            id="overview"
            hx-get=[poll_trigger.as_ref().map(|_| endpoints::DASHBOARD_OVERVIEW)]
            hx-trigger=[poll_trigger.as_deref()]
            hx-swap=[poll_trigger.as_ref().map(|_| "outerHTML")]
            class="space-y-6"
        {
            @if snapshot.recent.is_empty() {
                (Alert::info("No data yet. Start streaming or add a transaction manually.").into_html())
            } @else {
                h2 class="text-xl font-semibold" { "Overview" }

                div class="grid grid-cols-1 md:grid-cols-3 gap-4"
                {
                    (metric_view("Total Income", snapshot.summary.income))
                    (metric_view("Total Expense", snapshot.summary.expense))
                    (metric_view("Net Savings", snapshot.summary.net_savings))
                }

                h2 class="text-xl font-semibold" { "Recent Transactions" }

                (recent_transactions_table(&snapshot.recent))
            }
        }
    )
}

fn metric_view(label: &str, amount: f64) -> Markup {
    html!(
        div class="metric p-4 rounded-lg bg-white dark:bg-gray-800 shadow-sm"
        {
            p class="text-sm text-gray-500 dark:text-gray-400" { (label) }
            p class="metric-value text-2xl font-bold" { (format_currency(amount)) }
        }
    )
}

fn recent_transactions_table(transactions: &[Transaction]) -> Markup {
    html!(
        div class="relative overflow-x-auto shadow-md sm:rounded-lg"
        {
            table id="recent-transactions" class="w-full text-sm text-left rtl:text-right"
            {
                thead class=(TABLE_HEADER_STYLE)
                {
                    tr
                    {
                        th scope="col" class=(TABLE_CELL_STYLE) { "Date" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Description" }
                        th scope="col" class="px-6 py-4 text-right" { "Amount" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Type" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Payment Method" }
                    }
                }

                tbody
                {
                    @for transaction in transactions {
                        (transaction_row_view(transaction))
                    }
                }
            }
        }
    )
}

fn transaction_row_view(transaction: &Transaction) -> Markup {
    let (description, tooltip) = format_description(&transaction.description);

    html!(
        tr class=(TABLE_ROW_STYLE)
        {
            td class=(TABLE_CELL_STYLE) { (transaction.formatted_date()) }
            td class=(TABLE_CELL_STYLE) { (transaction.category) }
            td class=(TABLE_CELL_STYLE) title=[tooltip] { (description) }
            td class="px-6 py-4 text-right" { (format_currency(transaction.amount)) }
            td class=(TABLE_CELL_STYLE) { (transaction.type_) }
            td class=(TABLE_CELL_STYLE) { (transaction.payment_method) }
        }
    )
}

fn visuals_view(charts: &[ChartFile]) -> Markup {
    html!(
        section id="visual-insights" class="space-y-4"
        {
            h2 class="text-xl font-semibold" { "Visual Insights" }

            div class="grid grid-cols-1 xl:grid-cols-2 gap-4"
            {
                @for chart in charts {
                    (chart_view(chart))
                }
            }
        }
    )
}

fn chart_view(chart: &ChartFile) -> Markup {
    let file_name = chart.kind.file_name();

    html!(
        figure class="chart rounded bg-white dark:bg-gray-100" data-chart=(chart.kind.file_stem())
        {
            @match chart.version {
                Some(version) => {
                    @let url = format!("{}/{file_name}?v={version}", endpoints::VISUALS);

                    @if EMBED_CHARTS_AS_IMAGES {
                        img src=(url) alt=(chart.kind.title()) class="w-full";
                    } @else {
                        @let (width, height) = chart.kind.size();

                        iframe
                            src=(url)
                            title=(chart.kind.title())
                            width=(width)
                            height=(height)
                            class="w-full border-0"
                        {}
                    }
                }
                None => {
                    (Alert::info(&format!("Run analysis to generate {file_name}.")).into_html())
                }
            }
        }
    )
}

fn format_description(description: &str) -> (String, Option<&str>) {
    let description_length = description.graphemes(true).count();

    if description_length <= MAX_DESCRIPTION_GRAPHEMES {
        (description.to_owned(), None)
    } else {
        let truncated: String = description
            .graphemes(true)
            .take(MAX_DESCRIPTION_GRAPHEMES - 3)
            .collect();
        let truncated = truncated + "...";
        (truncated, Some(description))
    }
}
