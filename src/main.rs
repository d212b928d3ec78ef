use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

use pipegrid::cli::{CliArgs, Command};
use pipegrid::table::{ByteRange, Mutation};
use pipegrid::update::update;
use pipegrid::{TableBuffer, TableConfig};

/// Machine-readable result of one command
#[derive(Serialize)]
struct Report<'a> {
    mutation: &'a Mutation,
    caret: usize,
    highlight: Option<ByteRange>,
    clipboard: &'a str,
    text: &'a str,
}

fn main() -> Result<()> {
    let args = CliArgs::parse();
    pipegrid::tracing::init();

    let config = match &args.config {
        Some(path) => TableConfig::load_from(path),
        None => TableConfig::load(),
    };

    let mut buffer = TableBuffer::from_file(args.file.clone())
        .with_context(|| format!("Failed to read {}", args.file.display()))?;
    buffer.set_caret(args.caret);
    if !args.select.is_empty() {
        buffer.select(&args.select);
    }

    let reads_clipboard = matches!(args.command, Command::Paste { text: None });
    let clipboard = if args.system_clipboard && reads_clipboard {
        Some(
            arboard::Clipboard::new()
                .and_then(|mut clipboard| clipboard.get_text())
                .context("Failed to read the system clipboard")?,
        )
    } else {
        None
    };

    let copies = args.command.copies();
    let msg = args
        .command
        .into_msg(clipboard)
        .map_err(anyhow::Error::msg)?;
    let mutation = update(&mut buffer, msg, &config);
    tracing::info!(?mutation, "command finished");

    if copies && args.system_clipboard {
        arboard::Clipboard::new()
            .and_then(|mut clipboard| clipboard.set_text(buffer.clipboard().to_string()))
            .context("Failed to write the system clipboard")?;
    }

    let text = buffer.text();
    if args.in_place && buffer.is_modified {
        std::fs::write(&args.file, &text)
            .with_context(|| format!("Failed to write {}", args.file.display()))?;
    }

    if args.json {
        let report = Report {
            mutation: &mutation,
            caret: buffer.caret(),
            highlight: buffer.highlight(),
            clipboard: buffer.clipboard(),
            text: &text,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else if copies {
        print!("{}", buffer.clipboard());
    } else if !args.in_place {
        print!("{}", text);
    }

    if mutation.is_blocked() {
        eprintln!("Edit blocked: it would break the table structure");
    }
    Ok(())
}
