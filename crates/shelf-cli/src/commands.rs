use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Context;
use colored::Colorize;
use shelf_server::{ServerConfig, ShelfServer};
use shelf_types::Attributes;
use tracing_subscriber::EnvFilter;

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Serve(args) => cmd_serve(args, cli.verbose),
        Command::Inspect(args) => {
            init_tracing(if cli.verbose { "debug" } else { "warn" });
            cmd_inspect(args)
        }
    }
}

/// `RUST_LOG` wins over the default level.
fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn cmd_serve(args: ServeArgs, verbose: bool) -> anyhow::Result<()> {
    let mut config = match &args.config {
        Some(path) => ServerConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => ServerConfig::default(),
    };
    if let Some(bind) = args.bind {
        config.bind_addr = bind;
    }
    init_tracing(if verbose { "debug" } else { config.log_level.as_str() });
    tracing::debug!(?config, "configuration loaded");

    println!("{} Shelf server on {}", "✓".green().bold(), config.bind_addr.to_string().bold());
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(ShelfServer::new(config).serve())?;
    Ok(())
}

fn cmd_inspect(args: InspectArgs) -> anyhow::Result<()> {
    let mut entries = Vec::with_capacity(args.paths.len());
    for path in &args.paths {
        let entry = inspect_file(path)?;
        tracing::debug!(name = %entry.name, attributes = entry.attributes.len(), "inspected");
        entries.push(entry);
    }

    match args.format {
        OutputFormat::Json => {
            let info: Vec<BTreeMap<String, Attributes>> = entries
                .into_iter()
                .map(|entry| BTreeMap::from([(entry.name, entry.attributes)]))
                .collect();
            println!("{}", serde_json::to_string_pretty(&info)?);
        }
        OutputFormat::Text => {
            for entry in &entries {
                println!("{}", entry.name.bold());
                if let Some(reason) = &entry.failure {
                    println!("  {}", format!("no metadata: {reason}").dimmed());
                }
                for (key, value) in &entry.attributes {
                    println!("  {}: {}", key.cyan(), value);
                }
            }
        }
    }
    Ok(())
}

struct Inspected {
    name: String,
    attributes: Attributes,
    failure: Option<String>,
}

/// Extract as an upload of this file would, named by its file name.
fn inspect_file(path: &Path) -> anyhow::Result<Inspected> {
    let data = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .with_context(|| format!("{} has no file name", path.display()))?;

    Ok(match shelf_meta::try_extract(&name, &data) {
        Ok(attributes) => Inspected {
            name,
            attributes,
            failure: None,
        },
        Err(err) => Inspected {
            name,
            attributes: Attributes::new(),
            failure: Some(err.to_string()),
        },
    })
}
