use std::error::Error as _;

use thiserror::Error;

/// Form input rejected before any request is made.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter a target IP address or domain name.")]
    EmptyTarget,

    #[error("Please enter ports to scan.")]
    EmptyPorts,
}

/// Failure of a submitted scan attempt.
#[derive(Debug, Error)]
pub enum ScanError {
    /// The HTTP exchange never completed (connect, send, or body read failed).
    #[error(transparent)]
    Network(#[from] reqwest::Error),

    /// Non-HTTP transports that can only describe their failure.
    #[error("{0}")]
    Transport(String),

    /// The engine answered outside the 2xx range.
    #[error("Server responded with status {status}: {body}")]
    Protocol { status: u16, body: String },

    /// 2xx response whose body is not a scan response.
    #[error(transparent)]
    Decode(#[from] serde_json::Error),
}

impl ScanError {
    /// The request did not complete, as opposed to a bad reply.
    pub fn is_transport(&self) -> bool {
        matches!(self, ScanError::Network(_) | ScanError::Transport(_))
    }

    /// Display text of this error followed by every source in its chain.
    pub fn detail(&self) -> String {
        let mut out = self.to_string();
        let mut source = self.source();
        while let Some(cause) = source {
            out.push_str(": ");
            out.push_str(&cause.to_string());
            source = cause.source();
        }
        out
    }
}
