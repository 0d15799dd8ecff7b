//! View nodes owned by the checker
//!
//! The checker writes to exactly three nodes: a spinner, the compact
//! status line, and the detail panel. [`CheckerView`] abstracts over
//! where they live; [`MemoryView`] keeps them in memory.

use crate::render::{DetailPanel, StatusLine};
use std::sync::{Arc, Mutex, PoisonError};

/// The set of display nodes a checker exclusively owns.
pub trait CheckerView: Send + 'static {
    fn set_spinner(&mut self, visible: bool);

    fn set_status(&mut self, status: StatusLine);

    fn clear_status(&mut self);

    /// Replace the detail panel content and make it visible.
    fn show_details(&mut self, panel: &DetailPanel);

    /// Hide the detail panel, keeping whatever it last displayed.
    fn hide_details(&mut self);
}

/// Current contents of a [`MemoryView`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewSnapshot {
    pub spinner: bool,
    pub status: Option<StatusLine>,
    pub details_visible: bool,
    pub details: Option<DetailPanel>,
    /// Number of node writes performed so far.
    pub writes: usize,
}

impl ViewSnapshot {
    /// Status text, empty when cleared.
    #[must_use]
    pub fn status_text(&self) -> &str {
        self.status.as_ref().map_or("", |s| s.text.as_str())
    }

    /// The detail panel, if it is currently shown.
    #[must_use]
    pub fn visible_details(&self) -> Option<&DetailPanel> {
        self.details.as_ref().filter(|_| self.details_visible)
    }
}

/// In-memory view; clones share the same nodes.
#[derive(Debug, Clone, Default)]
pub struct MemoryView {
    nodes: Arc<Mutex<ViewSnapshot>>,
}

impl MemoryView {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn snapshot(&self) -> ViewSnapshot {
        self.nodes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn update(&self, f: impl FnOnce(&mut ViewSnapshot)) {
        let mut nodes = self.nodes.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut nodes);
        nodes.writes += 1;
    }
}

impl CheckerView for MemoryView {
    fn set_spinner(&mut self, visible: bool) {
        self.update(|n| n.spinner = visible);
    }

    fn set_status(&mut self, status: StatusLine) {
        self.update(|n| n.status = Some(status));
    }

    fn clear_status(&mut self) {
        self.update(|n| n.status = None);
    }

    fn show_details(&mut self, panel: &DetailPanel) {
        self.update(|n| {
            n.details = Some(panel.clone());
            n.details_visible = true;
        });
    }

    fn hide_details(&mut self) {
        self.update(|n| n.details_visible = false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DomainCheckResult;

    fn panel() -> DetailPanel {
        let result: DomainCheckResult =
            serde_json::from_str(r#"{"spoofable":true,"message":"ok"}"#).unwrap();
        DetailPanel::from_result("example.com", &result)
    }

    #[test]
    fn starts_empty() {
        let snap = MemoryView::new().snapshot();
        assert!(!snap.spinner);
        assert_eq!(snap.status_text(), "");
        assert!(snap.visible_details().is_none());
        assert_eq!(snap.writes, 0);
    }

    #[test]
    fn clones_share_nodes() {
        let view = MemoryView::new();
        let mut writer = view.clone();
        writer.set_status(StatusLine::checking());
        writer.set_spinner(true);

        let snap = view.snapshot();
        assert_eq!(snap.status_text(), "Checking...");
        assert!(snap.spinner);
        assert_eq!(snap.writes, 2);
    }

    #[test]
    fn hiding_keeps_content() {
        let mut view = MemoryView::new();
        view.show_details(&panel());
        view.hide_details();

        let snap = view.snapshot();
        assert!(snap.visible_details().is_none());
        assert_eq!(snap.details.unwrap().domain, "example.com");
    }
}
