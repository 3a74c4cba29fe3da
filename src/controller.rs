use tracing::{debug, error, info};

use crate::client::{HttpReply, ScanTransport};
use crate::error::{ScanError, ValidationError};
use crate::types::{ResultRow, ScanRequest, ScanResponse, ScanStatus};
use crate::view::ScanView;

pub const SCANNING_TEXT: &str = "Scanning... Please wait.";
pub const COMPLETED_TEXT: &str = "Scan completed!";

/// What a call to [`ScanController::submit_scan`] ended with.
#[derive(Debug)]
pub enum ScanOutcome {
    /// Input failed validation; nothing was sent or rendered.
    Rejected(ValidationError),
    Completed { total: usize, open: usize },
    Failed(ScanError),
}

impl ScanOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, ScanOutcome::Completed { .. })
    }
}

/// Turns one trigger into one scan request and renders its outcome.
///
/// The controller owns its view and transport for its whole life. Taking
/// `&mut self` in [`submit_scan`](Self::submit_scan) keeps at most one
/// request outstanding.
#[derive(Debug)]
pub struct ScanController<V, T> {
    view: V,
    transport: T,
    status: ScanStatus,
}

impl<V: ScanView, T: ScanTransport> ScanController<V, T> {
    pub fn new(view: V, transport: T) -> Self {
        Self {
            view,
            transport,
            status: ScanStatus::Idle,
        }
    }

    pub fn status(&self) -> ScanStatus {
        self.status
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn into_parts(self) -> (V, T) {
        (self.view, self.transport)
    }

    /// Validate the form input, send one request and render the result.
    pub async fn submit_scan(&mut self, target: &str, ports: &str) -> ScanOutcome {
        let request = match ScanRequest::new(target, ports) {
            Ok(r) => r,
            Err(e) => {
                self.view.notify(&e.to_string());
                return ScanOutcome::Rejected(e);
            }
        };

        self.view.clear_rows();
        self.view.set_summary("");
        self.view.show_results();
        self.set_status(ScanStatus::Scanning, SCANNING_TEXT);
        self.view.set_trigger_enabled(false);

        info!(host = %request.target, ports = %request.ports, "starting scan");

        match self.transport.post_scan(&request).await.and_then(decode_reply) {
            Ok(response) => self.render_response(&response),
            Err(e) => self.render_error(e),
        }
    }

    fn render_response(&mut self, response: &ScanResponse) -> ScanOutcome {
        if response.scan_time.is_some() || response.total_ports.is_some() {
            debug!(
                scan_time = ?response.scan_time,
                total_ports = ?response.total_ports,
                "engine metadata"
            );
        }
        let total = response.results.len();
        let open = response.open_ports().count();

        self.set_status(ScanStatus::Completed, COMPLETED_TEXT);
        self.view.set_summary(&response.summary_line());
        for result in response.open_ports() {
            self.view.append_row(&ResultRow::from(result));
        }
        self.view.set_trigger_enabled(true);

        info!(total, open, "scan completed");
        ScanOutcome::Completed { total, open }
    }

    fn render_error(&mut self, err: ScanError) -> ScanOutcome {
        self.set_status(ScanStatus::Errored, &format!("Error: {err}"));
        self.view.set_trigger_enabled(true);
        error!(error = %err.detail(), debug = ?err, "scan failed");
        ScanOutcome::Failed(err)
    }

    fn set_status(&mut self, status: ScanStatus, text: &str) {
        self.status = status;
        self.view.set_status(status, text);
    }
}

/// Classify a raw reply: non-2xx bodies are surfaced verbatim, 2xx bodies
/// must decode as a [`ScanResponse`].
pub fn decode_reply(reply: HttpReply) -> Result<ScanResponse, ScanError> {
    debug!(status = reply.status, "classifying scan reply");
    if !reply.is_success() {
        return Err(ScanError::Protocol {
            status: reply.status,
            body: reply.body,
        });
    }
    Ok(serde_json::from_str(&reply.body)?)
}
