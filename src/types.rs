use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Literal state value the scan engine reports for a reachable port.
pub const OPEN_STATE: &str = "open";

/// Service cell text used when the engine did not identify a service.
pub const UNKNOWN_SERVICE: &str = "Unknown";

/// Style class carried by the port cell of every rendered row.
pub const PORT_OPEN_CLASS: &str = "port-open";

/// Body of `POST /api/scan`. Both fields are trimmed and non-empty.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ScanRequest {
    pub target: String,
    pub ports: String,
}

impl ScanRequest {
    /// Trim and validate raw form input. The target is checked first.
    pub fn new(target: &str, ports: &str) -> Result<Self, ValidationError> {
        let target = target.trim();
        if target.is_empty() {
            return Err(ValidationError::EmptyTarget);
        }
        let ports = ports.trim();
        if ports.is_empty() {
            return Err(ValidationError::EmptyPorts);
        }
        Ok(Self {
            target: target.to_string(),
            ports: ports.to_string(),
        })
    }
}

/// Port as reported by the engine: usually a number, sometimes a string.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum PortNumber {
    Number(serde_json::Number),
    Text(String),
}

impl fmt::Display for PortNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PortNumber::Number(n) => write!(f, "{n}"),
            PortNumber::Text(s) => f.write_str(s),
        }
    }
}

impl From<u16> for PortNumber {
    fn from(port: u16) -> Self {
        PortNumber::Number(port.into())
    }
}

/// One per-port entry of a scan response. Field casing is fixed by the engine.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct PortResult {
    pub port: PortNumber,
    pub state: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,
}

impl PortResult {
    pub fn is_open(&self) -> bool {
        self.state == OPEN_STATE
    }

    /// Service name for display; absent and empty both render as `Unknown`.
    pub fn service_label(&self) -> &str {
        match self.service.as_deref() {
            Some(s) if !s.is_empty() => s,
            _ => UNKNOWN_SERVICE,
        }
    }
}

/// Successful scan payload. Only `results` is required.
///
/// The engine metadata fields are kept as raw JSON: they are only logged,
/// so their shape never fails a decode.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ScanResponse {
    pub results: Vec<PortResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<serde_json::Value>,
    #[serde(default, rename = "scanTime", skip_serializing_if = "Option::is_none")]
    pub scan_time: Option<serde_json::Value>,
    #[serde(default, rename = "totalPorts", skip_serializing_if = "Option::is_none")]
    pub total_ports: Option<serde_json::Value>,
}

impl ScanResponse {
    /// Open entries in their original relative order.
    pub fn open_ports(&self) -> impl Iterator<Item = &PortResult> {
        self.results.iter().filter(|r| r.is_open())
    }

    pub fn summary_line(&self) -> String {
        summary_line(self.results.len(), self.open_ports().count())
    }
}

/// `Scanned {total} ports, found {open} open port(s).`
pub fn summary_line(total: usize, open: usize) -> String {
    format!("Scanned {total} ports, found {open} open port(s).")
}

/// Controller state shown by the status display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanStatus {
    #[default]
    Idle,
    Scanning,
    Completed,
    Errored,
}

impl ScanStatus {
    /// Style class for the status display.
    pub fn as_class(&self) -> &'static str {
        match self {
            ScanStatus::Idle => "idle",
            ScanStatus::Scanning => "scanning",
            ScanStatus::Completed => "completed",
            ScanStatus::Errored => "error",
        }
    }

    /// The trigger is usable in every state except `Scanning`.
    pub fn trigger_enabled(&self) -> bool {
        !matches!(self, ScanStatus::Scanning)
    }
}

/// Rendered cells of one open-port table row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultRow {
    pub port: String,
    /// Style class of the port cell.
    pub port_class: &'static str,
    pub state: String,
    pub service: String,
}

impl ResultRow {
    pub fn open(port: impl Into<String>, service: impl Into<String>) -> Self {
        Self {
            port: port.into(),
            port_class: PORT_OPEN_CLASS,
            state: OPEN_STATE.to_string(),
            service: service.into(),
        }
    }
}

impl From<&PortResult> for ResultRow {
    fn from(r: &PortResult) -> Self {
        Self {
            port: r.port.to_string(),
            port_class: PORT_OPEN_CLASS,
            state: r.state.clone(),
            service: r.service_label().to_string(),
        }
    }
}
