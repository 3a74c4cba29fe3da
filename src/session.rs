use std::io::Write;

use anyhow::Result;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::debug;

use crate::client::ScanTransport;
use crate::controller::{ScanController, ScanOutcome};
use crate::view::ScanView;

/// Counters for one interactive session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionSummary {
    pub attempts: u64,
    pub rejected: u64,
    pub completed: u64,
    pub failed: u64,
}

impl SessionSummary {
    fn record(&mut self, outcome: &ScanOutcome) {
        self.attempts += 1;
        match outcome {
            ScanOutcome::Rejected(_) => self.rejected += 1,
            ScanOutcome::Completed { .. } => self.completed += 1,
            ScanOutcome::Failed(_) => self.failed += 1,
        }
    }
}

/// Drive `controller` from `input`: a target line, then a ports line, one
/// scan per pair, until EOF.
///
/// A blank target is submitted without asking for ports so the target
/// notice is shown. Each scan is awaited before the next prompt.
pub async fn run_session<V, T, R, P>(
    controller: &mut ScanController<V, T>,
    input: R,
    prompt: &mut P,
) -> Result<SessionSummary>
where
    V: ScanView,
    T: ScanTransport,
    R: AsyncBufRead + Unpin,
    P: Write,
{
    let mut summary = SessionSummary::default();
    let mut lines = input.lines();

    loop {
        write!(prompt, "target> ")?;
        prompt.flush()?;
        let Some(target) = lines.next_line().await? else {
            break;
        };

        let ports = if target.trim().is_empty() {
            String::new()
        } else {
            write!(prompt, "ports> ")?;
            prompt.flush()?;
            match lines.next_line().await? {
                Some(p) => p,
                None => break,
            }
        };

        let outcome = controller.submit_scan(&target, &ports).await;
        summary.record(&outcome);
    }

    writeln!(prompt)?;
    debug!(?summary, "session ended");
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::HttpReply;
    use crate::error::ScanError;
    use crate::types::ScanRequest;
    use crate::view::MemoryView;

    struct Echo;

    impl ScanTransport for Echo {
        async fn post_scan(&self, request: &ScanRequest) -> Result<HttpReply, ScanError> {
            if request.target == "down" {
                return Err(ScanError::Transport("unreachable".into()));
            }
            Ok(HttpReply {
                status: 200,
                body: r#"{"results":[{"Port":80,"State":"open","Service":"http"}]}"#.into(),
            })
        }
    }

    #[tokio::test]
    async fn counts_each_outcome() {
        let input: &[u8] = b"host\n80\n\nhost\n  \ndown\n80\n";
        let mut c = ScanController::new(MemoryView::new(), Echo);
        let mut prompt = Vec::new();
        let s = run_session(&mut c, input, &mut prompt).await.unwrap();
        assert_eq!(
            s,
            SessionSummary { attempts: 4, rejected: 2, completed: 1, failed: 1 }
        );
        assert_eq!(
            c.view().notices,
            vec![
                "Please enter a target IP address or domain name.",
                "Please enter ports to scan."
            ]
        );
        assert_eq!(c.view().status_text, "Error: unreachable");
        let shown = String::from_utf8(prompt).unwrap();
        assert_eq!(shown.matches("target> ").count(), 5);
        assert_eq!(shown.matches("ports> ").count(), 3);
    }

    #[tokio::test]
    async fn eof_at_ports_prompt_submits_nothing() {
        let input: &[u8] = b"host\n";
        let mut c = ScanController::new(MemoryView::new(), Echo);
        let mut prompt = Vec::new();
        let s = run_session(&mut c, input, &mut prompt).await.unwrap();
        assert_eq!(s.attempts, 0);
        assert!(c.view().events.is_empty());
        let shown = String::from_utf8(prompt).unwrap();
        assert_eq!(shown, "target> ports> \n");
    }
}
