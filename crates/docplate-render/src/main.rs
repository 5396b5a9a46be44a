/*
 * main.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Command-line renderer for a single document part
 */

use anyhow::{Context, Result};
use clap::Parser;
use docplate_xml::StructureTags;
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "docplate-render")]
#[command(about = "Fill placeholders and run triggers in an XML document part")]
struct Args {
    /// XML part to render (e.g. word/document.xml)
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// JSON object with the parameter data
    #[arg(short = 'd', long = "data", value_name = "JSON")]
    data: PathBuf,

    /// TOML file overriding the structure tags per scope
    #[arg(long = "tags", value_name = "TOML")]
    tags: Option<PathBuf>,

    /// Output file; stdout when omitted
    #[arg(short = 'o', long = "output", value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Verbose output (-v for debug, -vv for trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = match args.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("docplate_render={level},docplate_params={level}").into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let xml = fs::read_to_string(&args.input)
        .context(format!("Failed to read input: {:?}", args.input))?;

    let data_text = fs::read_to_string(&args.data)
        .context(format!("Failed to read data file: {:?}", args.data))?;
    let data: serde_json::Value = serde_json::from_str(&data_text)
        .context(format!("Invalid JSON in data file: {:?}", args.data))?;

    let tags = match &args.tags {
        Some(path) => {
            let source = fs::read_to_string(path)
                .context(format!("Failed to read tags file: {:?}", path))?;
            StructureTags::from_toml_str(&source)
                .context(format!("Invalid tags file: {:?}", path))?
        }
        None => StructureTags::default(),
    };

    let output = docplate_render::render(&xml, &data, tags)?;
    tracing::info!(
        placeholders = output.placeholders,
        triggers = output.triggers_run,
        "Rendered {:?}",
        args.input
    );

    match &args.output {
        Some(path) => fs::write(path, &output.xml)
            .context(format!("Failed to write output file: {:?}", path))?,
        None => print!("{}", output.xml),
    }

    Ok(())
}
