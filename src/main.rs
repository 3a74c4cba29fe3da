use std::io::{self, IsTerminal};
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tokio::io::BufReader;

use portscan_ui_rs::client::HttpTransport;
use portscan_ui_rs::controller::ScanController;
use portscan_ui_rs::session::run_session;
use portscan_ui_rs::logging;
use portscan_ui_rs::terminal::TerminalView;

/// portscan-ui: submit port scans to a remote scan engine and show the open ports.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "portscan-ui",
    version,
    about = "Submit port scans to a remote scan engine and show the open ports.",
    long_about = None
)]
struct Cli {
    /// Base URL of the scan engine; requests go to `<server>/api/scan`.
    #[arg(long, default_value = "http://127.0.0.1:8080")]
    server: String,

    /// Target IP address or domain name. With --ports, runs one scan and exits.
    #[arg(long)]
    target: Option<String>,

    /// Ports to scan, forwarded verbatim (e.g. `22,80,443` or `1-1000`).
    #[arg(long)]
    ports: Option<String>,

    /// Default log filter when RUST_LOG is unset.
    #[arg(long = "log-level", default_value = "warn")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    logging::init(&cli.log_level);

    let transport = HttpTransport::new(cli.server.as_str());

    println!("portscan-ui configuration:");
    println!("  endpoint     : {}", transport.endpoint_url());
    println!(
        "  mode         : {}",
        if cli.target.is_some() && cli.ports.is_some() {
            "one-shot"
        } else {
            "interactive"
        }
    );
    println!("  log_level    : {}", cli.log_level);

    let mut controller = ScanController::new(
        TerminalView::new(io::stdout()).with_color(io::stdout().is_terminal()),
        transport,
    );

    if let (Some(target), Some(ports)) = (cli.target.as_deref(), cli.ports.as_deref()) {
        let outcome = controller.submit_scan(target, ports).await;
        return Ok(if outcome.is_completed() {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        });
    }

    println!("Enter a target, then a port spec. Ctrl+D to quit.");
    let stdin = BufReader::new(tokio::io::stdin());
    let summary = run_session(&mut controller, stdin, &mut io::stdout()).await?;
    println!(
        "Session: {} attempt(s), {} completed, {} failed, {} rejected",
        summary.attempts, summary.completed, summary.failed, summary.rejected
    );

    Ok(ExitCode::SUCCESS)
}
