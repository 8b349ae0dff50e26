//! # Swipe Replay
//!
//! Replays a pointer script and prints the JSON report to stdout.

use anyhow::Context;
use clap::Parser;
use swipe_replay::{run, CliArgs, Script};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize structured tracing on stderr, leaving stdout for the report.
///
/// Set `RUST_LOG` to control log levels (default: swipe_replay=info,swipe_core=debug).
/// Set `RUST_LOG_FORMAT=json` for JSON output.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("swipe_replay=info,swipe_core=debug"));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(true)
        .with_line_number(true);

    if std::env::var("RUST_LOG_FORMAT").as_deref() == Ok("json") {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer.json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let args = CliArgs::parse();
    let script = Script::load(&args.script)
        .with_context(|| format!("loading script {}", args.script.display()))?;
    let config = script.resolve_config(args.density);
    tracing::info!(?config, "Resolved gesture configuration");

    let report = run(&script, config).context("replay failed")?;

    let json = if args.pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    println!("{json}");
    Ok(())
}
