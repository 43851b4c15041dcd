//! Markup for each dashboard region. Every function takes the slice of view
//! state it needs and returns the HTML of the region it owns; user-supplied
//! text is always escaped.

use crate::charts::ChartSet;
use crate::columns::Column;
use crate::format::{escape_html, format_count, format_currency, format_percent};
use crate::locale::{language_tag, text_direction, Labels};
use crate::palette::badge_class;
use crate::view::{ClientViewState, Phase, SortState};
use dashboard_core::config::DisplayConfig;
use dashboard_core::types::is_unset;
use dashboard_core::{PurchaseRow, ReportTotals};
use dashboard_reporting::source_medium_breakdown;
use std::fmt::Write;

/// Minimum bar width, in percent, so tiny shares stay visible.
const MIN_BAR_WIDTH: f64 = 1.0;

/// Which regions are shown for a phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Visibility {
    pub loading: bool,
    pub error: bool,
    pub empty: bool,
    pub content: bool,
}

impl Visibility {
    pub fn for_phase(phase: &Phase) -> Self {
        Visibility {
            loading: matches!(phase, Phase::Loading),
            error: matches!(phase, Phase::Error(_)),
            empty: matches!(phase, Phase::Empty),
            content: matches!(phase, Phase::Populated),
        }
    }
}

pub fn render_summary_cards(totals: &ReportTotals, labels: &Labels, currency: &str) -> String {
    let cards = [
        ("totalRevenue", labels.total_revenue, format_currency(totals.total_revenue, currency)),
        ("totalTransactions", labels.total_transactions, format_count(totals.total_transactions)),
        ("totalItems", labels.total_items, format_count(totals.total_items)),
        (
            "avgTransaction",
            labels.average_transaction,
            format_currency(totals.average_transaction_value(), currency),
        ),
    ];
    let mut html = String::new();
    for (id, title, value) in cards {
        let _ = write!(
            html,
            r#"<div class="card"><div class="card-title">{title}</div><div class="card-value" id="{id}">{value}</div></div>"#,
            title = escape_html(title),
            value = escape_html(&value),
        );
    }
    html
}

/// Sortable headers; the active column carries the direction class.
pub fn render_table_header(sort: SortState, labels: &Labels) -> String {
    let mut html = String::from("<tr>");
    for column in Column::ALL {
        let class = if column == sort.column {
            format!("sortable {}", sort.direction.as_str())
        } else {
            "sortable".to_string()
        };
        let _ = write!(
            html,
            r#"<th class="{class}" data-col="{key}">{label}</th>"#,
            key = column.key(),
            label = escape_html(column.header(labels)),
        );
    }
    html.push_str("</tr>");
    html
}

fn render_cell(column: Column, row: &PurchaseRow, currency: &str) -> String {
    let Some(text) = column.text(row) else {
        return format!(
            r#"<td class="revenue">{}</td>"#,
            escape_html(&format_currency(row.revenue, currency))
        );
    };
    if column.is_attribution() && is_unset(text) {
        return r#"<td class="empty-utm">-</td>"#.to_string();
    }
    if column.is_source() {
        return format!(
            r#"<td><span class="badge {}">{}</span></td>"#,
            badge_class(text),
            escape_html(text)
        );
    }
    format!("<td>{}</td>", escape_html(text))
}

/// Body rows for one page of the table.
pub fn render_table_body(rows: &[PurchaseRow], currency: &str) -> String {
    let mut html = String::new();
    for row in rows {
        html.push_str("<tr>");
        for column in Column::ALL {
            html.push_str(&render_cell(column, row, currency));
        }
        html.push_str("</tr>");
    }
    html
}

pub fn render_pagination(current_page: usize, total_pages: usize, labels: &Labels) -> String {
    let disabled = |off: bool| if off { " disabled" } else { "" };
    let mut html = String::from(r#"<div class="pagination">"#);
    let _ = write!(
        html,
        r#"<button class="page-btn" data-page="{}"{}>{}</button>"#,
        current_page.saturating_sub(1).max(1),
        disabled(current_page <= 1),
        escape_html(labels.previous),
    );
    for page in 1..=total_pages {
        let active = if page == current_page { " active" } else { "" };
        let _ = write!(
            html,
            r#"<button class="page-btn{active}" data-page="{page}">{page}</button>"#
        );
    }
    let _ = write!(
        html,
        r#"<button class="page-btn" data-page="{}"{}>{}</button>"#,
        (current_page + 1).min(total_pages),
        disabled(current_page >= total_pages),
        escape_html(labels.next),
    );
    html.push_str("</div>");
    html
}

/// Grouped first-touch source/medium summary over the full row set.
pub fn render_source_summary(rows: &[PurchaseRow], labels: &Labels, currency: &str) -> String {
    let mut html = format!(
        "<table class=\"source-summary\"><thead><tr><th>{}</th><th>{}</th><th>{}</th><th>{}</th></tr></thead><tbody>",
        escape_html(labels.source_medium),
        escape_html(labels.revenue),
        escape_html(labels.transactions),
        escape_html(labels.share),
    );
    for group in source_medium_breakdown(rows) {
        let _ = write!(
            html,
            concat!(
                r#"<tr><td><span class="badge {badge}">{source}</span> / {medium}</td>"#,
                r#"<td class="revenue">{revenue}</td><td>{transactions}</td>"#,
                r#"<td><div class="share-bar"><div class="share-fill" style="width: {width:.1}%"></div></div>"#,
                r#"<span class="share-label">{share}</span></td></tr>"#,
            ),
            badge = badge_class(&group.source),
            source = escape_html(&group.source),
            medium = escape_html(&group.medium),
            revenue = escape_html(&format_currency(group.revenue, currency)),
            transactions = format_count(group.transactions),
            width = group.share_percent.max(MIN_BAR_WIDTH),
            share = format_percent(group.share_percent),
        );
    }
    html.push_str("</tbody></table>");
    html
}

/// JSON inside a `<script>` element must not close the element early.
fn script_json(value: &serde_json::Value) -> String {
    value.to_string().replace("</", "<\\/")
}

pub fn render_chart_configs(charts: &ChartSet, labels: &Labels) -> String {
    format!(
        concat!(
            r#"<script type="application/json" id="sourceChartConfig">{}</script>"#,
            r#"<script type="application/json" id="timelineChartConfig">{}</script>"#,
        ),
        script_json(&charts.doughnut.config(labels.revenue_by_source)),
        script_json(&charts.line.config(labels.revenue_over_time)),
    )
}

fn hidden(visible: bool) -> &'static str {
    if visible {
        ""
    } else {
        " hidden"
    }
}

/// The whole dashboard document for the current state.
pub fn render_page(state: &ClientViewState, display: &DisplayConfig) -> String {
    let labels = Labels::for_language(display.language);
    let currency = display.currency_symbol.as_str();
    let visible = Visibility::for_phase(state.phase());
    let (start_date, end_date) = state
        .range()
        .map(|r| (r.start_date.as_str(), r.end_date.as_str()))
        .unwrap_or(("", ""));

    let mut html = String::new();
    let _ = write!(
        html,
        r#"<!DOCTYPE html><html lang="{lang}" dir="{dir}"><head><meta charset="utf-8"><title>{title}</title></head><body>"#,
        lang = language_tag(display.language),
        dir = text_direction(display.language),
        title = escape_html(labels.title),
    );
    let _ = write!(
        html,
        r#"<h1>{}</h1><div class="range">{} – {}</div>"#,
        escape_html(labels.title),
        escape_html(start_date),
        escape_html(end_date),
    );
    let _ = write!(
        html,
        r#"<div id="loading"{}>{}</div>"#,
        hidden(visible.loading),
        escape_html(labels.loading)
    );
    let error_text = match state.phase() {
        Phase::Error(message) => escape_html(message),
        _ => String::new(),
    };
    let _ = write!(html, r#"<div id="errorMsg"{}>{}</div>"#, hidden(visible.error), error_text);
    let _ = write!(
        html,
        r#"<div id="emptyState"{}>{}</div>"#,
        hidden(visible.empty),
        escape_html(labels.empty)
    );

    if visible.content {
        let _ = write!(
            html,
            r#"<div id="summaryCards">{}</div>"#,
            render_summary_cards(state.totals(), labels, currency)
        );
        let _ = write!(
            html,
            r#"<section id="sourceSummary">{}</section>"#,
            render_source_summary(state.all_rows(), labels, currency)
        );
        if let Some(charts) = state.charts() {
            html.push_str(&render_chart_configs(charts, labels));
        }
        let _ = write!(
            html,
            r#"<div id="tableWrapper"><table><thead>{}</thead><tbody id="tableBody">{}</tbody></table>{}</div>"#,
            render_table_header(state.sort(), labels),
            render_table_body(state.page_rows(), currency),
            render_pagination(state.current_page(), state.total_pages(), labels),
        );
    }

    html.push_str("</body></html>");
    html
}
