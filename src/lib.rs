//! Library crate for portscan-ui-rs: the scan controller, its views and the
//! HTTP transport to the scan engine.
pub mod client;
pub mod controller;
pub mod error;
pub mod logging;
pub mod session;
pub mod terminal;
pub mod types;
pub mod view;

pub use client::{HttpTransport, ScanTransport};
pub use controller::{ScanController, ScanOutcome};
pub use view::{MemoryView, ScanView};
