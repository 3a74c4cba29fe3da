//! UI surface the controller drives.
//!
//! A [`ScanView`] stands for the host page elements the controller is bound
//! to: target and ports inputs (read by the host), the trigger control, the
//! status display, the result table body, the summary line and the results
//! container.

use crate::types::{ResultRow, ScanStatus};

pub trait ScanView {
    /// Blocking user notice, used for rejected input.
    fn notify(&mut self, message: &str);

    /// Remove every row from the result table.
    fn clear_rows(&mut self);

    fn set_summary(&mut self, text: &str);

    /// Make the results container visible.
    fn show_results(&mut self);

    /// Update status text; the style class follows `status`.
    fn set_status(&mut self, status: ScanStatus, text: &str);

    fn set_trigger_enabled(&mut self, enabled: bool);

    fn append_row(&mut self, row: &ResultRow);
}

/// One recorded call on a [`MemoryView`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEvent {
    Notice(String),
    ClearRows,
    Summary(String),
    ShowResults,
    Status { class: &'static str, text: String },
    Trigger(bool),
    Row(ResultRow),
}

/// Headless view holding element state plus a journal of every mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryView {
    pub status_text: String,
    pub status_class: &'static str,
    pub summary: String,
    pub rows: Vec<ResultRow>,
    pub results_visible: bool,
    pub trigger_enabled: bool,
    pub notices: Vec<String>,
    pub events: Vec<ViewEvent>,
}

impl MemoryView {
    pub fn new() -> Self {
        Self {
            status_text: String::new(),
            status_class: ScanStatus::Idle.as_class(),
            summary: String::new(),
            rows: Vec::new(),
            results_visible: false,
            trigger_enabled: true,
            notices: Vec::new(),
            events: Vec::new(),
        }
    }

    /// Drop the journal, keeping element state.
    pub fn take_events(&mut self) -> Vec<ViewEvent> {
        std::mem::take(&mut self.events)
    }
}

impl Default for MemoryView {
    fn default() -> Self {
        Self::new()
    }
}

impl ScanView for MemoryView {
    fn notify(&mut self, message: &str) {
        self.notices.push(message.to_string());
        self.events.push(ViewEvent::Notice(message.to_string()));
    }

    fn clear_rows(&mut self) {
        self.rows.clear();
        self.events.push(ViewEvent::ClearRows);
    }

    fn set_summary(&mut self, text: &str) {
        self.summary = text.to_string();
        self.events.push(ViewEvent::Summary(text.to_string()));
    }

    fn show_results(&mut self) {
        self.results_visible = true;
        self.events.push(ViewEvent::ShowResults);
    }

    fn set_status(&mut self, status: ScanStatus, text: &str) {
        self.status_text = text.to_string();
        self.status_class = status.as_class();
        self.events.push(ViewEvent::Status {
            class: self.status_class,
            text: text.to_string(),
        });
    }

    fn set_trigger_enabled(&mut self, enabled: bool) {
        self.trigger_enabled = enabled;
        self.events.push(ViewEvent::Trigger(enabled));
    }

    fn append_row(&mut self, row: &ResultRow) {
        self.rows.push(row.clone());
        self.events.push(ViewEvent::Row(row.clone()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_idle_hidden_and_enabled() {
        let v = MemoryView::new();
        assert_eq!(v.status_class, "idle");
        assert!(!v.results_visible);
        assert!(v.trigger_enabled);
        assert!(v.events.is_empty());
    }

    #[test]
    fn journal_records_in_call_order() {
        let mut v = MemoryView::new();
        v.clear_rows();
        v.set_status(ScanStatus::Scanning, "busy");
        v.set_trigger_enabled(false);
        assert_eq!(
            v.take_events(),
            vec![
                ViewEvent::ClearRows,
                ViewEvent::Status { class: "scanning", text: "busy".into() },
                ViewEvent::Trigger(false),
            ]
        );
        assert!(v.events.is_empty());
        assert_eq!(v.status_text, "busy");
    }
}
