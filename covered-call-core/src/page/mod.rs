//! Page abstraction the controllers render into.
//!
//! Controllers never hold a document. They produce [`DomOp`] values through the
//! pure functions in [`crate::render`] and hand them to an injected [`Page`].

pub mod console;
pub mod memory;

pub use console::ConsolePage;
pub use memory::MemoryPage;

use covered_call_common::ChartConfig;
use std::fmt;

/// Element ids and class selectors the page template provides.
pub mod targets {
    pub const BACKTEST_FORM: &str = "backtest-form";
    pub const BACKTEST_LOADING: &str = "backtest-loading";
    pub const BACKTEST_RESULTS: &str = "backtest-results";
    pub const BACKTEST_CHART: &str = "backtest-chart";
    pub const PREDICT_FORM: &str = "predict-form";
    pub const SPINNER: &str = "spinner";
    pub const LOG: &str = "log";
    pub const UPDATE_MODELS_BTN: &str = "update-models-btn";
    pub const ALERT: &str = "alert";
    pub const STATUS_INDICATOR: &str = ".status-indicator";
    pub const STATUS: &str = ".status";
    pub const LAST_UPDATE: &str = "last-update";
    pub const LAST_MARKET_DAY: &str = "last-market-day";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Display {
    Block,
    None,
}

impl fmt::Display for Display {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Display::Block => f.write_str("block"),
            Display::None => f.write_str("none"),
        }
    }
}

/// A single mutation of the page.
#[derive(Debug, Clone, PartialEq)]
pub enum DomOp {
    SetHtml { target: &'static str, html: String },
    AppendHtml { target: &'static str, html: String },
    SetText { target: &'static str, text: String },
    SetDisplay { target: &'static str, display: Display },
    SetBackground { target: &'static str, color: String },
    DrawChart { target: &'static str, chart: ChartConfig },
}

impl DomOp {
    pub fn target(&self) -> &'static str {
        match self {
            DomOp::SetHtml { target, .. }
            | DomOp::AppendHtml { target, .. }
            | DomOp::SetText { target, .. }
            | DomOp::SetDisplay { target, .. }
            | DomOp::SetBackground { target, .. }
            | DomOp::DrawChart { target, .. } => target,
        }
    }

    pub fn show(target: &'static str) -> Self {
        DomOp::SetDisplay {
            target,
            display: Display::Block,
        }
    }

    pub fn hide(target: &'static str) -> Self {
        DomOp::SetDisplay {
            target,
            display: Display::None,
        }
    }

    pub fn clear(target: &'static str) -> Self {
        DomOp::SetHtml {
            target,
            html: String::new(),
        }
    }
}

impl fmt::Display for DomOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DomOp::SetHtml { target, html } => write!(f, "[{}] html = {}", target, html.trim()),
            DomOp::AppendHtml { target, html } => write!(f, "[{}] += {}", target, html.trim()),
            DomOp::SetText { target, text } => write!(f, "[{}] text = {}", target, text),
            DomOp::SetDisplay { target, display } => write!(f, "[{}] display = {}", target, display),
            DomOp::SetBackground { target, color } => write!(f, "[{}] background = {}", target, color),
            DomOp::DrawChart { target, chart } => write!(
                f,
                "[{}] {} chart, labels {:?}, {} point(s)",
                target,
                chart.chart_type,
                chart.data.labels,
                chart.point_count()
            ),
        }
    }
}

/// Rendering surface injected into every controller.
pub trait Page: Send + Sync {
    fn apply(&self, op: DomOp);

    /// Text content of an element, if it exists and carries any.
    fn text(&self, target: &str) -> Option<String>;

    fn exists(&self, target: &str) -> bool;

    fn apply_all(&self, ops: Vec<DomOp>) {
        for op in ops {
            self.apply(op);
        }
    }
}
