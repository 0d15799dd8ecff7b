#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

//! CLI for checking whether sender domains can be spoofed

use clap::{Parser, Subcommand};
use spoofcheck::{
    CheckReport, CheckerConfig, CheckerState, CheckerView, DetailPanel, DomainChecker, ERROR_TEXT,
    FieldMode, HttpCheckApi, MemoryView, StatusLine, suggest_spoof_domain,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "spoofcheck-cli")]
#[command(about = "Check whether a sender domain can be spoofed")]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Output as JSON (one-shot checks only)
    #[arg(long, global = true)]
    json: bool,

    /// Render the detail panel as HTML
    #[arg(long, global = true)]
    html: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Check the domain of a single sender address
    Check {
        /// Sender address, e.g. "ceo@example.com"
        address: String,
    },

    /// Check addresses read from stdin, one edit per line
    ///
    /// Lines go through the same debounce as typing into the form.
    /// `!mailbox <addr>` switches to a fixed mailbox, `!custom`
    /// switches back, `!envelope <addr>` suggests a spoof domain.
    Watch,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = CheckerConfig::from_env()?;
    let api = HttpCheckApi::new(&config)?;

    match &args.command {
        Command::Check { address } => cmd_check(api, &config, &args, address).await,
        Command::Watch => cmd_watch(api, &config, &args).await,
    }
}

async fn cmd_check(
    api: HttpCheckApi,
    config: &CheckerConfig,
    args: &Args,
    address: &str,
) -> anyhow::Result<()> {
    let view = MemoryView::new();
    let checker = DomainChecker::new(api, view.clone(), config);
    checker.evaluate(address).await;

    match checker.state() {
        CheckerState::Resolved { domain, result } => {
            if args.json {
                let report = CheckReport::new(domain, result);
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                let snapshot = view.snapshot();
                println!("{}", snapshot.status_text());
                if let Some(panel) = snapshot.visible_details() {
                    println!();
                    print_panel(panel, args.html);
                }
            }
            Ok(())
        }
        CheckerState::Failed { domain, reason } => {
            anyhow::bail!("{ERROR_TEXT} {domain}: {reason}")
        }
        CheckerState::Idle | CheckerState::Checking { .. } => {
            anyhow::bail!("'{address}' has no domain part")
        }
    }
}

async fn cmd_watch(api: HttpCheckApi, config: &CheckerConfig, args: &Args) -> anyhow::Result<()> {
    let view = TerminalView { html: args.html };
    let checker = DomainChecker::new(api, view, config);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut text = String::new();
    let mut spoof_domain = String::new();

    while let Some(line) = lines.next_line().await? {
        if let Some(mailbox) = line.strip_prefix("!mailbox ") {
            checker.set_mode(FieldMode::mailbox(mailbox.trim()), &text);
        } else if line.trim() == "!custom" {
            checker.set_mode(FieldMode::Custom, &text);
        } else if let Some(envelope) = line.strip_prefix("!envelope ") {
            if let Some(domain) = suggest_spoof_domain(envelope.trim(), &spoof_domain) {
                println!("Suggested spoof domain: {domain}");
                spoof_domain = domain;
            }
        } else {
            text = line;
            checker.request(text.clone());
        }
    }

    // Let the last edit's debounced check run to completion.
    checker.settle().await;

    Ok(())
}

fn print_panel(panel: &DetailPanel, html: bool) {
    if html {
        println!("{}", panel.to_html());
    } else {
        println!("{panel}");
    }
}

/// Prints every node update to stdout.
struct TerminalView {
    html: bool,
}

impl CheckerView for TerminalView {
    fn set_spinner(&mut self, _visible: bool) {}

    fn set_status(&mut self, status: StatusLine) {
        println!("{status}");
    }

    fn clear_status(&mut self) {}

    fn show_details(&mut self, panel: &DetailPanel) {
        print_panel(panel, self.html);
    }

    fn hide_details(&mut self) {}
}
