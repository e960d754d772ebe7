use std::path::PathBuf;
use std::process;
use std::str::FromStr;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use riftline_client::{Client, ClientConfig};
use riftline_model::{EventKind, serialize_event};
use serde_json::json;
use tracing_subscriber::EnvFilter;

/// Environment variable consulted for the log filter.
const LOG_ENV: &str = "RIFTLINE_LOG";
/// Filter installed when the environment does not provide one.
const DEFAULT_LOG_FILTER: &str = "info";

fn main() {
    init_logging();
    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        eprintln!("error: {err:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Watch(args) => handle_watch(&args),
        Command::Schema(args) => handle_schema(&args),
    }
}

fn init_logging() {
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

#[derive(Parser)]
#[command(name = "riftline", about = "Interact with the riftline daemon")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Tail events from the daemon. Currently streams in-memory stubs.
    Watch(WatchArgs),
    /// Print the JSON schema for the wire contract.
    Schema(SchemaArgs),
}

#[derive(Args, Default)]
struct WatchArgs {
    /// Filter to a specific event kind.
    #[arg(long, value_parser = parse_kind)]
    event: Option<EventKind>,
}

#[derive(Args, Default)]
struct SchemaArgs {
    /// Emit the batch schema instead of the single-event schema.
    #[arg(long)]
    batch: bool,
    /// Write the batch schema to this path instead of printing to stdout.
    #[arg(long)]
    out: Option<PathBuf>,
}

fn parse_kind(input: &str) -> Result<EventKind, String> {
    EventKind::from_str(input).map_err(|err| {
        let known = EventKind::ALL.map(EventKind::as_str).join(", ");
        format!("{err} (expected one of: {known})")
    })
}

fn handle_watch(args: &WatchArgs) -> Result<()> {
    let client = Client::new(ClientConfig::default());
    client.connect();

    let filter = args.event;
    let target = filter.unwrap_or(EventKind::Heartbeat);
    let handle = client.subscribe(target, move |event| {
        if filter.is_none() || filter == Some(event.kind) {
            println!("{}", serialize_event(event));
        }
    });

    // Bootstrap heartbeat so the command prints something useful while the
    // daemon transport is still a stub.
    client
        .emit_raw(&json!({
            "kind": target.as_str(),
            "ts": 0,
            "payload": {"payloadKind": "heartbeat", "seq": 0},
        }))
        .context("bootstrap heartbeat was rejected")?;

    handle.close();
    client.close();
    Ok(())
}

fn handle_schema(args: &SchemaArgs) -> Result<()> {
    if let Some(path) = &args.out {
        riftline_model::schema::write_event_batch_schema(path)
            .with_context(|| format!("failed to write schema to {}", path.display()))?;
        return Ok(());
    }

    let schema = if args.batch {
        riftline_model::schema::event_batch_schema()
    } else {
        riftline_model::schema::event_schema()
    };
    let text = serde_json::to_string_pretty(&schema).context("failed to render schema JSON")?;
    println!("{text}");
    Ok(())
}
