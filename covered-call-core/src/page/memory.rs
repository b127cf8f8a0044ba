// page/memory.rs

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use super::{Display, DomOp, Page};
use covered_call_common::ChartConfig;

/// State of one element after all ops applied so far
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ElementState {
    pub html: String,
    pub text: Option<String>,
    pub display: Option<Display>,
    pub background: Option<String>,
    pub chart: Option<ChartConfig>,
}

#[derive(Debug, Default)]
struct Inner {
    elements: HashMap<String, ElementState>,
    journal: Vec<DomOp>,
}

/// Headless page: keeps element state and the ordered journal of applied ops.
#[derive(Debug, Default)]
pub struct MemoryPage {
    inner: Mutex<Inner>,
}

impl MemoryPage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Page whose template provides the given elements, all empty.
    pub fn with_elements(targets: &[&str]) -> Self {
        let page = Self::new();
        {
            let mut inner = page.lock();
            for target in targets {
                inner.elements.insert(target.to_string(), ElementState::default());
            }
        }
        page
    }

    /// Seed an element's text as the template would render it.
    pub fn with_text(self, target: &str, text: &str) -> Self {
        {
            let mut inner = self.lock();
            let element = inner.elements.entry(target.to_string()).or_default();
            element.text = Some(text.to_string());
            element.html = text.to_string();
        }
        self
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn element(&self, target: &str) -> Option<ElementState> {
        self.lock().elements.get(target).cloned()
    }

    pub fn html(&self, target: &str) -> String {
        self.element(target).map(|e| e.html).unwrap_or_default()
    }

    pub fn display(&self, target: &str) -> Option<Display> {
        self.element(target).and_then(|e| e.display)
    }

    pub fn is_visible(&self, target: &str) -> bool {
        self.display(target) == Some(Display::Block)
    }

    pub fn background(&self, target: &str) -> Option<String> {
        self.element(target).and_then(|e| e.background)
    }

    pub fn chart(&self, target: &str) -> Option<ChartConfig> {
        self.element(target).and_then(|e| e.chart)
    }

    pub fn journal(&self) -> Vec<DomOp> {
        self.lock().journal.clone()
    }
}

impl Page for MemoryPage {
    fn apply(&self, op: DomOp) {
        let mut inner = self.lock();
        let element = inner.elements.entry(op.target().to_string()).or_default();

        match &op {
            DomOp::SetHtml { html, .. } => {
                element.html = html.clone();
                element.text = None;
            }
            DomOp::AppendHtml { html, .. } => {
                element.html.push_str(html);
                element.text = None;
            }
            DomOp::SetText { text, .. } => {
                element.html = text.clone();
                element.text = Some(text.clone());
            }
            DomOp::SetDisplay { display, .. } => element.display = Some(*display),
            DomOp::SetBackground { color, .. } => element.background = Some(color.clone()),
            DomOp::DrawChart { chart, .. } => element.chart = Some(chart.clone()),
        }

        inner.journal.push(op);
    }

    fn text(&self, target: &str) -> Option<String> {
        self.lock().elements.get(target).and_then(|e| e.text.clone())
    }

    fn exists(&self, target: &str) -> bool {
        self.lock().elements.contains_key(target)
    }
}
