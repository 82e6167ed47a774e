//! Configload CLI - validate and transform CMS configuration CSVs
//!
//! # Commands
//!
//! ```bash
//! configload parse input.csv                      # Parse CSV to JSON rows
//! configload validate sites input.csv             # Column + row validation
//! configload transform sites input.csv            # Full pipeline to records
//! configload columns sections                     # Show allowed columns
//! ```
//!
//! Existence checks (site handles, group names, entry types, filesystems)
//! run against a host snapshot loaded with `--registry <file.json>`; without
//! one, an empty snapshot is used and every lookup misses.

use clap::{Parser, Subcommand};
use configload::{
    allowed_columns, parse_bytes, required_columns, run_bytes, EntityType, HostSnapshot,
};
use serde_json::json;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "configload")]
#[command(about = "Validate and transform CMS configuration CSVs", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a CSV file and output its raw rows as JSON
    Parse {
        /// Input CSV file
        input: PathBuf,

        /// CSV delimiter (auto-detect if not specified)
        #[arg(short, long)]
        delimiter: Option<char>,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Validate a CSV file without transforming it
    Validate {
        /// Entity type (sites, entryTypes, sections, filesystems, assets)
        entity: String,

        /// Input CSV file
        input: PathBuf,

        /// CSV delimiter (auto-detect if not specified)
        #[arg(short, long)]
        delimiter: Option<char>,

        /// Host snapshot JSON for existence checks
        #[arg(short, long)]
        registry: Option<PathBuf>,
    },

    /// Full pipeline: parse, validate, and transform to import-ready records
    Transform {
        /// Entity type (sites, entryTypes, sections, filesystems, assets)
        entity: String,

        /// Input CSV file
        input: PathBuf,

        /// CSV delimiter (auto-detect if not specified)
        #[arg(short, long)]
        delimiter: Option<char>,

        /// Host snapshot JSON for existence checks
        #[arg(short, long)]
        registry: Option<PathBuf>,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show allowed and required columns per entity type
    Columns {
        /// Entity type (all types when omitted)
        entity: Option<String>,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Parse {
            input,
            delimiter,
            output,
        } => cmd_parse(&input, delimiter, output.as_deref()),

        Commands::Validate {
            entity,
            input,
            delimiter,
            registry,
        } => cmd_validate(&entity, &input, delimiter, registry.as_deref()),

        Commands::Transform {
            entity,
            input,
            delimiter,
            registry,
            output,
        } => cmd_transform(&entity, &input, delimiter, registry.as_deref(), output.as_deref()),

        Commands::Columns { entity } => cmd_columns(entity.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn cmd_parse(
    input: &Path,
    delimiter: Option<char>,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("Parsing: {}", input.display());

    let bytes = fs::read(input)?;
    let parsed = parse_bytes(&bytes, delimiter)?;

    eprintln!("  Encoding: {}", parsed.encoding);
    eprintln!("  Delimiter: '{}'", format_delimiter(parsed.delimiter));
    eprintln!("  Columns: {}", parsed.columns.join(", "));
    eprintln!("  Rows: {}", parsed.rows.len());

    let json = serde_json::to_string_pretty(&json!({
        "encoding": parsed.encoding,
        "delimiter": parsed.delimiter,
        "columns": parsed.columns,
        "rows": parsed.rows,
    }))?;
    write_output(&json, output)?;

    Ok(())
}

fn cmd_validate(
    entity: &str,
    input: &Path,
    delimiter: Option<char>,
    registry: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let host = load_snapshot(registry)?;
    let bytes = fs::read(input)?;
    let report = run_bytes(entity, &bytes, delimiter, host.registries())?;

    if !report.column_validation.valid {
        eprintln!("Column check failed:");
        if let Some(ref error) = report.column_validation.error {
            eprintln!("  {}", error);
        }
        for column in &report.column_validation.invalid_columns {
            eprintln!("  Invalid column: {}", column);
        }
        for column in &report.column_validation.missing_required {
            eprintln!("  Missing required column: {}", column);
        }
        std::process::exit(1);
    }

    if let Some(ref row_validation) = report.row_validation {
        if !row_validation.valid {
            eprintln!("Row check failed:");
            for errors in row_validation.row_errors.values() {
                for error in errors {
                    eprintln!("  {}", error);
                }
            }
            std::process::exit(1);
        }
    }

    eprintln!("{} rows valid", report.row_count);
    Ok(())
}

fn cmd_transform(
    entity: &str,
    input: &Path,
    delimiter: Option<char>,
    registry: Option<&Path>,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let host = load_snapshot(registry)?;
    let bytes = fs::read(input)?;
    let report = run_bytes(entity, &bytes, delimiter, host.registries())?;

    let json = serde_json::to_string_pretty(&report)?;
    write_output(&json, output)?;

    if !report.valid() {
        std::process::exit(1);
    }
    Ok(())
}

fn cmd_columns(entity: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let types: Vec<EntityType> = match entity {
        Some(name) => match EntityType::parse(name) {
            Some(entity_type) => vec![entity_type],
            None => return Err(format!("Unknown element type: {}", name).into()),
        },
        None => EntityType::ALL.to_vec(),
    };

    for entity_type in types {
        println!("{}:", entity_type);
        println!("  allowed:  {}", allowed_columns(entity_type).join(", "));
        println!("  required: {}", required_columns(entity_type).join(", "));
    }
    Ok(())
}

fn load_snapshot(registry: Option<&Path>) -> Result<HostSnapshot, Box<dyn std::error::Error>> {
    match registry {
        Some(path) => Ok(HostSnapshot::from_file(path)?),
        None => Ok(HostSnapshot::default()),
    }
}

fn format_delimiter(d: char) -> String {
    match d {
        '\t' => "\\t".to_string(),
        c => c.to_string(),
    }
}

fn write_output(content: &str, path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    match path {
        Some(p) => {
            fs::write(p, content)?;
            eprintln!("Output written to: {}", p.display());
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
