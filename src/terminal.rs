use std::io::Write;

use crossterm::style::Stylize;
use tracing::warn;

use crate::types::{ResultRow, ScanStatus, PORT_OPEN_CLASS};
use crate::view::ScanView;

const PORT_W: usize = 5;
const STATE_W: usize = 8;
const SERVICE_MAX: usize = 40;

/// Line-oriented view that renders status, notices and the open-port table
/// to any writer.
#[derive(Debug)]
pub struct TerminalView<W> {
    out: W,
    color: bool,
    trigger_enabled: bool,
    header_pending: bool,
    rows: usize,
}

impl<W: Write> TerminalView<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            color: false,
            trigger_enabled: true,
            header_pending: false,
            rows: 0,
        }
    }

    /// Style open ports, completion and errors with ANSI colours.
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    pub fn trigger_enabled(&self) -> bool {
        self.trigger_enabled
    }

    /// Rows rendered since the table was last cleared.
    pub fn row_count(&self) -> usize {
        self.rows
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, text: &str) {
        if let Err(e) = writeln!(self.out, "{text}").and_then(|_| self.out.flush()) {
            warn!(error = %e, "failed to write to terminal");
        }
    }

    fn write_header(&mut self) {
        self.line(&format!(
            "{:>port_w$}  {:<state_w$}  {}",
            "port",
            "state",
            "service",
            port_w = PORT_W,
            state_w = STATE_W
        ));
        self.line(&format!(
            "{:->port_w$}  {:-<state_w$}  {:-<service_w$}",
            "",
            "",
            "",
            port_w = PORT_W,
            state_w = STATE_W,
            service_w = SERVICE_MAX
        ));
    }
}

/// Flatten line breaks and cut long service banners to the column width.
fn service_snippet(service: &str) -> String {
    let flat = service.replace('\r', "").replace('\n', " ");
    if flat.chars().count() > SERVICE_MAX {
        let mut cut: String = flat.chars().take(SERVICE_MAX - 3).collect();
        cut.push_str("...");
        cut
    } else {
        flat
    }
}

impl<W: Write> ScanView for TerminalView<W> {
    fn notify(&mut self, message: &str) {
        self.line(&format!("! {message}"));
    }

    fn clear_rows(&mut self) {
        self.rows = 0;
    }

    fn set_summary(&mut self, text: &str) {
        if !text.is_empty() {
            self.line(text);
        }
    }

    /// The table header is printed with the first row.
    fn show_results(&mut self) {
        self.header_pending = true;
    }

    fn set_status(&mut self, status: ScanStatus, text: &str) {
        let plain = format!("[{}] {}", status.as_class(), text);
        let styled = match status {
            _ if !self.color => plain,
            ScanStatus::Scanning => plain.yellow().to_string(),
            ScanStatus::Completed => plain.green().to_string(),
            ScanStatus::Errored => plain.red().to_string(),
            ScanStatus::Idle => plain,
        };
        self.line(&styled);
    }

    fn set_trigger_enabled(&mut self, enabled: bool) {
        self.trigger_enabled = enabled;
    }

    fn append_row(&mut self, row: &ResultRow) {
        if self.header_pending {
            self.header_pending = false;
            self.write_header();
        }
        self.rows += 1;
        let service = service_snippet(&row.service);
        // Pad before styling; escape codes would break the column width.
        let port = format!("{:>port_w$}", row.port, port_w = PORT_W);
        let port = if self.color && row.port_class == PORT_OPEN_CLASS {
            port.green().to_string()
        } else {
            port
        };
        self.line(&format!(
            "{}  {:<state_w$}  {}",
            port,
            row.state,
            service,
            state_w = STATE_W
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(f: impl FnOnce(&mut TerminalView<Vec<u8>>)) -> String {
        let mut v = TerminalView::new(Vec::new());
        f(&mut v);
        String::from_utf8(v.into_inner()).unwrap()
    }

    #[test]
    fn status_and_notice_lines() {
        let out = render(|v| {
            v.notify("Please enter ports to scan.");
            v.set_status(ScanStatus::Scanning, "Scanning... Please wait.");
        });
        assert_eq!(
            out,
            "! Please enter ports to scan.\n[scanning] Scanning... Please wait.\n"
        );
    }

    #[test]
    fn rows_are_aligned_under_header() {
        let out = render(|v| {
            v.show_results();
            v.append_row(&ResultRow::open("22", "ssh"));
        });
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], " port  state     service");
        assert_eq!(lines[2], "   22  open      ssh");
    }

    #[test]
    fn empty_summary_is_not_printed() {
        let out = render(|v| {
            v.set_summary("");
            v.set_summary("Scanned 1 ports, found 0 open port(s).");
        });
        assert_eq!(out, "Scanned 1 ports, found 0 open port(s).\n");
    }

    #[test]
    fn long_banner_is_flattened_and_cut() {
        let banner = format!("SSH-2.0-OpenSSH\r\n{}", "x".repeat(60));
        let s = service_snippet(&banner);
        assert_eq!(s.chars().count(), SERVICE_MAX);
        assert!(s.starts_with("SSH-2.0-OpenSSH x"));
        assert!(s.ends_with("..."));
    }

    #[test]
    fn color_marks_open_ports_and_outcomes() {
        let mut v = TerminalView::new(Vec::new()).with_color(true);
        v.set_status(ScanStatus::Errored, "Error: boom");
        v.append_row(&ResultRow::open("22", "ssh"));
        let out = String::from_utf8(v.into_inner()).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "[error] Error: boom".red().to_string());
        assert!(lines[1].starts_with(&"   22".green().to_string()));
        assert!(lines[1].ends_with("  open      ssh"));
    }

    #[test]
    fn no_escape_codes_without_color() {
        let out = render(|v| {
            v.set_status(ScanStatus::Completed, "Scan completed!");
            v.append_row(&ResultRow::open("22", "ssh"));
        });
        assert!(!out.contains('\u{1b}'));
    }

    #[test]
    fn trigger_and_row_tracking() {
        let mut v = TerminalView::new(std::io::sink());
        v.set_trigger_enabled(false);
        v.append_row(&ResultRow::open("1", "Unknown"));
        assert!(!v.trigger_enabled());
        assert_eq!(v.row_count(), 1);
        v.clear_rows();
        assert_eq!(v.row_count(), 0);
    }
}
