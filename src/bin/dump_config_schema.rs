//! Prints the JSON schema of `config.toml`, for editor completion and docs.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(about = "Print the JSON schema of the fingerpaint config file")]
struct Args {
    /// Write the schema to this file instead of stdout
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let schema = serde_json::to_string_pretty(&fingerpaint::Config::json_schema())?;

    match args.output {
        Some(path) => std::fs::write(&path, schema + "\n")
            .with_context(|| format!("Failed to write schema to {}", path.display()))?,
        None => println!("{schema}"),
    }
    Ok(())
}
