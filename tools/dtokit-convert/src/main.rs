// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! dtokit converter CLI
//!
//! Loads a schema document, hydrates raw JSON/YAML input into typed objects
//! and prints the flattened result.
//!
//! # Usage
//!
//! ```bash
//! # Hydrate a file
//! dtokit-convert hydrate --schema schema.yaml --type User user.json
//!
//! # Hydrate stdin with an extra alias table
//! cat form.yaml | dtokit-convert hydrate -s schema.yaml -t User --aliases aliases.json
//!
//! # Show resolved field shapes
//! dtokit-convert inspect --schema schema.yaml --type User
//!
//! # Check a schema document
//! dtokit-convert validate --schema schema.yaml
//!
//! # Generate an example configuration
//! dtokit-convert gen-config --output dtokit.toml
//! ```

mod config;
mod input;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use config::ConvertConfig;
use dtokit::{AliasTable, DtoObject, FieldKind, SchemaDocument, SchemaRegistry};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// dtokit converter
#[derive(Parser, Debug)]
#[command(name = "dtokit-convert")]
#[command(about = "Hydrate untyped JSON/YAML through a dtokit schema")]
#[command(version)]
struct Args {
    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error); overrides the config
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Hydrate input and print the flattened JSON
    Hydrate {
        /// Schema document (JSON or YAML)
        #[arg(short, long)]
        schema: Option<PathBuf>,

        /// Target type name
        #[arg(short = 't', long = "type")]
        type_name: String,

        /// Alias table file (JSON or YAML)
        #[arg(short, long)]
        aliases: Option<PathBuf>,

        /// Print compact JSON
        #[arg(long)]
        compact: bool,

        /// Input file (stdin when omitted or `-`)
        input: Option<PathBuf>,
    },

    /// Print the resolved shape table of each type
    Inspect {
        /// Schema document (JSON or YAML)
        #[arg(short, long)]
        schema: Option<PathBuf>,

        /// Only this type
        #[arg(short = 't', long = "type")]
        type_name: Option<String>,
    },

    /// Validate a schema document
    Validate {
        /// Schema document (JSON or YAML)
        #[arg(short, long)]
        schema: Option<PathBuf>,
    },

    /// Generate example configuration file
    GenConfig {
        /// Output file path
        #[arg(short, long, default_value = "dtokit.toml")]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => ConvertConfig::from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => ConvertConfig::default(),
    };

    // Initialize logging
    let level = args.log_level.as_deref().unwrap_or(&config.log_level);
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match args.command {
        Commands::Hydrate {
            schema,
            type_name,
            aliases,
            compact,
            input,
        } => cmd_hydrate(
            &config,
            schema.as_deref(),
            &type_name,
            aliases.as_deref(),
            compact,
            input.as_deref(),
        ),
        Commands::Inspect { schema, type_name } => {
            cmd_inspect(&config, schema.as_deref(), type_name.as_deref())
        }
        Commands::Validate { schema } => cmd_validate(&config, schema.as_deref()),
        Commands::GenConfig { output } => cmd_gen_config(&output),
    }
}

fn load_registry(config: &ConvertConfig, schema: Option<&Path>) -> Result<SchemaRegistry> {
    let path = schema
        .or(config.schema.as_deref())
        .context("No schema given (use --schema or set `schema` in the config)")?;

    let mut document = SchemaDocument::from_file(path)
        .with_context(|| format!("Failed to load schema {}", path.display()))?;
    if let Some(options) = config.hydrate {
        tracing::debug!("hydrate options overridden by config: {:?}", options);
        document.options = options;
    }

    let registry = document
        .into_registry()
        .with_context(|| format!("Invalid schema {}", path.display()))?;
    tracing::info!(
        "Loaded {} types from {}",
        registry.len(),
        path.display()
    );
    Ok(registry)
}

fn cmd_hydrate(
    config: &ConvertConfig,
    schema: Option<&Path>,
    type_name: &str,
    aliases: Option<&Path>,
    compact: bool,
    input: Option<&Path>,
) -> Result<()> {
    let registry = load_registry(config, schema)?.into_shared();
    if !registry.contains(type_name) {
        anyhow::bail!(
            "Unknown type `{}` (known: {})",
            type_name,
            registry.type_names().join(", ")
        );
    }

    let aliases = match aliases {
        Some(path) => {
            let raw = input::read_input(Some(path))?;
            let table: AliasTable = serde_json::from_value(raw)
                .with_context(|| format!("Invalid alias table {}", path.display()))?;
            Some(table)
        }
        None => None,
    };

    let raw = input::read_input(input)?;
    let object = DtoObject::construct(&registry, type_name, Some(&raw), aliases)
        .with_context(|| format!("Failed to hydrate {}", type_name))?;

    let flat = object.to_flat_data();
    let output = if compact || !config.pretty {
        serde_json::to_string(&flat)?
    } else {
        serde_json::to_string_pretty(&flat)?
    };
    println!("{}", output);
    Ok(())
}

fn cmd_inspect(config: &ConvertConfig, schema: Option<&Path>, only: Option<&str>) -> Result<()> {
    let registry = load_registry(config, schema)?;
    let names = match only {
        Some(name) if registry.contains(name) => vec![name.to_string()],
        Some(name) => anyhow::bail!("Unknown type `{}`", name),
        None => registry.type_names(),
    };

    for name in names {
        let Some(descriptor) = registry.get(&name) else {
            continue;
        };
        println!("{}", name);
        for field in descriptor.fields() {
            let shape = registry.shape_of(field).to_string();
            print!("  {:<20} {:<24} declared {}", field.name, shape, field.kind);
            if let Some(default) = &field.default {
                print!(", default {}", default);
            }
            if let Some(raw_key) = descriptor.aliases().raw_key_for(&field.name) {
                print!(", read from `{}`", raw_key);
            }
            println!();
        }
        println!();
    }
    Ok(())
}

fn cmd_validate(config: &ConvertConfig, schema: Option<&Path>) -> Result<()> {
    let registry = match load_registry(config, schema) {
        Ok(registry) => registry,
        Err(e) => {
            eprintln!("Schema invalid: {:#}", e);
            std::process::exit(1);
        }
    };

    println!("Schema valid!");
    println!();
    println!("Types: {}", registry.len());
    println!("Max depth: {}", registry.options().max_depth);

    for name in registry.type_names() {
        let Some(descriptor) = registry.get(&name) else {
            continue;
        };
        for field in descriptor.fields() {
            if let FieldKind::List {
                element: Some(element),
            } = &field.kind
            {
                if !registry.contains(element) {
                    println!(
                        "  note: {}.{} is list<{}> but {} is not a registered type; values are kept as-is",
                        name, field.name, element, element
                    );
                }
            }
        }
    }

    let cycles = registry.find_cycles();
    if !cycles.is_empty() {
        println!("Recursive types (bounded by max depth):");
        for cycle in cycles {
            println!("  {}", cycle.join(" -> "));
        }
    }
    Ok(())
}

fn cmd_gen_config(output: &Path) -> Result<()> {
    let toml_str = toml::to_string_pretty(&ConvertConfig::example())?;

    // Add comments
    let content = format!(
        r#"# dtokit-convert configuration
# Generated by dtokit-convert gen-config

{}
"#,
        toml_str
    );

    std::fs::write(output, content)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    println!("Generated configuration file: {}", output.display());
    Ok(())
}
