// page/console.rs

use super::{DomOp, MemoryPage, Page};

/// Page for the command line: prints every op as it lands and keeps state in
/// an inner [`MemoryPage`] so reads behave like the browser.
pub struct ConsolePage {
    state: MemoryPage,
}

impl ConsolePage {
    pub fn new(state: MemoryPage) -> Self {
        Self { state }
    }
}

impl Page for ConsolePage {
    fn apply(&self, op: DomOp) {
        println!("{}", op);
        self.state.apply(op);
    }

    fn text(&self, target: &str) -> Option<String> {
        self.state.text(target)
    }

    fn exists(&self, target: &str) -> bool {
        self.state.exists(target)
    }
}
