//! Pure render functions: data in, page ops out.

use covered_call_common::{BacktestResult, ChartConfig, ModelStatus, ValidationError};

use crate::page::{targets, DomOp};

/// Class of a line in the update progress log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogClass {
    Step,
    Success,
    Error,
}

impl LogClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogClass::Step => "step",
            LogClass::Success => "success",
            LogClass::Error => "error",
        }
    }

    pub fn from_success(success: bool) -> Self {
        if success {
            LogClass::Success
        } else {
            LogClass::Error
        }
    }
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

/// Clear previous results before a new submission is checked.
pub fn backtest_reset(has_chart: bool) -> Vec<DomOp> {
    let mut ops = vec![DomOp::clear(targets::BACKTEST_RESULTS)];
    if has_chart {
        ops.push(DomOp::hide(targets::BACKTEST_CHART));
    }
    ops
}

pub fn validation_error(err: &ValidationError) -> Vec<DomOp> {
    vec![DomOp::SetHtml {
        target: targets::BACKTEST_RESULTS,
        html: format!(
            r#"<div style="color:red; font-weight:bold;">{}</div>"#,
            escape_html(&err.to_string())
        ),
    }]
}

pub fn backtest_loading() -> Vec<DomOp> {
    vec![DomOp::show(targets::BACKTEST_LOADING)]
}

/// Missing statistics print as the page always showed them.
fn stat(value: Option<f64>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => "undefined".to_string(),
    }
}

/// Summary list of the eight statistics.
pub fn results_summary(result: &BacktestResult) -> String {
    let rows = [
        ("Total Profit", format!("${}", stat(result.total_profit))),
        ("Total Trades", stat(result.total_trades)),
        ("Successful Trades", stat(result.successful_trades)),
        ("Stop Losses Hit", stat(result.stop_losses_hit)),
        ("Negative Trades", stat(result.negative_trades)),
        ("Neutral Trades", stat(result.neutral_trades)),
        ("Success Rate", format!("{}%", stat(result.success_rate))),
        (
            "Avg Gain per Successful Trade",
            format!("${}", stat(result.avg_gain_per_successful_trade)),
        ),
    ];

    let mut html = String::from("<h3>Backtest Results</h3>\n<ul>\n");
    for (label, value) in rows {
        html.push_str(&format!("    <li><strong>{}:</strong> {}</li>\n", label, value));
    }
    html.push_str("</ul>\n");
    html
}

/// Results list, chart, and the loading indicator switched off.
pub fn backtest_results(result: &BacktestResult) -> Vec<DomOp> {
    vec![
        DomOp::SetHtml {
            target: targets::BACKTEST_RESULTS,
            html: results_summary(result),
        },
        DomOp::show(targets::BACKTEST_CHART),
        DomOp::DrawChart {
            target: targets::BACKTEST_CHART,
            chart: ChartConfig::profit_curve(&result.profit_curve),
        },
        DomOp::hide(targets::BACKTEST_LOADING),
    ]
}

pub fn log_entry(message: &str, class: LogClass) -> DomOp {
    DomOp::AppendHtml {
        target: targets::LOG,
        html: format!(r#"<div class="{}">{}</div>"#, class.as_str(), escape_html(message)),
    }
}

pub fn update_started() -> Vec<DomOp> {
    vec![DomOp::show(targets::SPINNER), DomOp::clear(targets::LOG)]
}

pub fn update_finished(message: &str) -> Vec<DomOp> {
    vec![
        DomOp::hide(targets::SPINNER),
        DomOp::show(targets::ALERT),
        DomOp::SetText {
            target: targets::ALERT,
            text: message.to_string(),
        },
    ]
}

/// Status badge for the dashboard header.
pub fn model_status(latest_date: Option<&str>, last_market_day: Option<&str>) -> Vec<DomOp> {
    let status = ModelStatus::from_dates(latest_date, last_market_day);
    let latest = latest_date.map(str::trim).unwrap_or("");
    let color = status.color();

    vec![
        DomOp::SetBackground {
            target: targets::STATUS_INDICATOR,
            color: color.to_string(),
        },
        DomOp::SetHtml {
            target: targets::STATUS,
            html: format!(
                r#"<span class="status-indicator" style="background:{color};"></span> Model Status: <span style="color:{color};font-weight:bold;">{label}</span> | Latest Trading Data: <span id="last-update">{latest}</span>"#,
                color = color,
                label = status.label(),
                latest = escape_html(latest),
            ),
        },
    ]
}
