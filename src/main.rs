use std::io::{self, BufRead, Write};

use clap::Parser;
use serde_json::json;
use tracing_subscriber::EnvFilter;

use smsui::api::ApiClient;
use smsui::ui::{self, Event, UiState};

/// UI-state sidecar for the student records web UI. Reads one JSON event
/// per line on stdin, answers one JSON envelope per line on stdout.
#[derive(Parser)]
#[command(name = "smsui", version)]
struct Cli {
    /// Base URL of the records API (origin + /api prefix).
    #[arg(long, default_value = "http://127.0.0.1:8000/api")]
    api_base: String,

    /// CSRF token the hosting page read from its markup. Falls back to
    /// the SMSUI_CSRF_TOKEN environment variable.
    #[arg(long)]
    csrf_token: Option<String>,
}

fn main() -> anyhow::Result<()> {
    // stdout is the protocol channel; logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let csrf_token = match cli.csrf_token {
        Some(t) => t,
        None => std::env::var("SMSUI_CSRF_TOKEN").unwrap_or_default(),
    };

    let backend = ApiClient::new(cli.api_base.clone(), csrf_token);
    let mut state = UiState::new(Box::new(backend), cli.api_base);

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(v) => v,
            Err(_) => break,
        };
        if line.trim().is_empty() {
            continue;
        }

        let ev: Event = match serde_json::from_str(&line) {
            Ok(v) => v,
            Err(e) => {
                // Can't echo an id we failed to parse.
                let resp = json!({
                    "ok": false,
                    "error": { "code": "bad_json", "message": e.to_string() },
                });
                let _ = writeln!(stdout, "{resp}");
                let _ = stdout.flush();
                continue;
            }
        };

        tracing::debug!(id = %ev.id, method = %ev.method, "event");
        let resp = ui::handle_event(&mut state, ev);
        let _ = writeln!(
            stdout,
            "{}",
            serde_json::to_string(&resp).unwrap_or_else(|_| "{\"ok\":false}".to_string())
        );
        let _ = stdout.flush();
    }

    Ok(())
}
