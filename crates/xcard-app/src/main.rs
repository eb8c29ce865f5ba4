use std::io;
use std::num::NonZeroUsize;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, reload, util::SubscriberInitExt};
use xcard_app::output::CardPrinter;
use xcard_core::config::load_config;
use xcard_rfc::rfc::xcard::XCardReader;

#[derive(Parser)]
#[command(name = "xcard")]
#[command(version)]
#[command(about = "Read xCard (RFC 6351) files and print their cards", long_about = None)]
struct Cli {
    /// xCard files to read ('-' reads standard input)
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Stop after this many cards per file (overrides reader.max_cards)
    #[arg(long)]
    max_cards: Option<NonZeroUsize>,

    /// Do not print parse warnings (overrides reader.show_warnings)
    #[arg(long)]
    no_warnings: bool,
}

fn main() -> anyhow::Result<()> {
    let (filter_layer, filter_handle) = reload::Layer::new(EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(
            fmt::layer()
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_writer(io::stderr),
        )
        .init();

    let cli = Cli::parse();
    let mut config = load_config()?;

    tracing::debug!(config = ?config, "Configuration loaded");

    if let Ok(filter) = EnvFilter::try_new(config.logging.level.as_str()) {
        if let Err(e) = filter_handle.modify(|current| *current = filter) {
            tracing::warn!(error = %e, "Failed to update log filter from config");
        }
    } else {
        tracing::warn!(level = %config.logging.level, "Invalid log level in config, keeping info");
    }

    if let Some(max_cards) = cli.max_cards {
        config.reader.max_cards = Some(max_cards.get());
    }
    if cli.no_warnings {
        config.reader.show_warnings = false;
    }

    let mut printer = CardPrinter::new(io::stdout().lock(), config.reader.show_warnings);
    for path in &cli.files {
        let reader = if path.as_os_str() == "-" {
            XCardReader::from_reader(io::stdin().lock())
        } else {
            XCardReader::from_path(path)
                .with_context(|| format!("failed to open {}", path.display()))?
        };

        let delivered = reader
            .read_limited(&config.reader, &mut printer)
            .with_context(|| format!("failed to read {}", path.display()))?;
        printer.take_error().context("failed to write output")?;

        tracing::info!(path = %path.display(), cards = delivered, "File read");
    }

    Ok(())
}
