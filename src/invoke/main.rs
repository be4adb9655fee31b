use std::io::Read;

use anyhow::{bail, Context};

// Import from the main crate
use groovi_users::config::Config;
use groovi_users::envelope::{dispatch, Event, Operation};
use groovi_users::state::AppState;

const USAGE: &str = "usage: invoke <operation> [event.json]";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr; stdout carries only the response envelope
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut args = std::env::args().skip(1);
    let Some(name) = args.next() else {
        let names: Vec<&str> = Operation::ALL.iter().map(Operation::as_str).collect();
        bail!("{USAGE}\noperations: {}", names.join(", "));
    };
    let operation: Operation = name.parse()?;
    let event = read_event(args.next().as_deref())?;

    let config = Config::from_env().context("Failed to load configuration")?;
    let state = AppState::new(config)
        .await
        .context("Failed to initialize application state")?;

    let response = dispatch(&state, operation, event).await;
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}

/// Read the event from a file, or from stdin when no path is given
fn read_event(path: Option<&str>) -> anyhow::Result<Event> {
    let raw = match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read {path}"))?
        }
        None => {
            let mut raw = String::new();
            std::io::stdin()
                .read_to_string(&mut raw)
                .context("Failed to read event from stdin")?;
            raw
        }
    };

    if raw.trim().is_empty() {
        return Ok(Event::default());
    }
    serde_json::from_str(&raw).context("Event must be a JSON object")
}
