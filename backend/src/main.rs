//! GTIN Collector CLI - build a review-collector import file
//!
//! ```bash
//! gtin-collector process                          # default file names in the current dir
//! gtin-collector process --catalog export.csv --output import.csv
//! gtin-collector process --identity-mode fixed --missing-gtin empty
//! gtin-collector process --dry-run                # everything except the write
//! gtin-collector inspect export.csv --encoding auto
//! ```
//!
//! Paths can also come from `GTIN_CUSTOMER_FILE`, `GTIN_CATALOG_FILE` and
//! `GTIN_OUTPUT_FILE`, including via a `.env` file.

use clap::{Parser, Subcommand};
use gtin_collector::config::{
    DEFAULT_CATALOG_FILE, DEFAULT_CUSTOMER_FILE, DEFAULT_OUTPUT_FILE, ENV_CATALOG_FILE,
    ENV_CUSTOMER_FILE, ENV_OUTPUT_FILE,
};
use gtin_collector::{
    process_gtin_files, read_csv_file, IdentityMode, MissingGtinPolicy, ProcessOptions,
    TextEncoding,
};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "gtin-collector")]
#[command(
    about = "Replace catalog GTINs with customer GTINs and build a review-collector import CSV",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Merge the customer GTINs into the catalog export and write the import file
    Process {
        /// Customer SKU/GTIN file
        #[arg(long, env = ENV_CUSTOMER_FILE, default_value = DEFAULT_CUSTOMER_FILE)]
        customer: PathBuf,

        /// Catalog product export
        #[arg(long, env = ENV_CATALOG_FILE, default_value = DEFAULT_CATALOG_FILE)]
        catalog: PathBuf,

        /// Output import file
        #[arg(short, long, env = ENV_OUTPUT_FILE, default_value = DEFAULT_OUTPUT_FILE)]
        output: PathBuf,

        /// Encoding of the customer file (utf-8, iso-8859-1, windows-1252, auto)
        #[arg(long, default_value = "utf-8")]
        customer_encoding: TextEncoding,

        /// Encoding of the catalog export
        #[arg(long, default_value = "iso-8859-1")]
        catalog_encoding: TextEncoding,

        /// Placeholder values: random per row, or fixed literals
        #[arg(long, default_value = "random")]
        identity_mode: IdentityMode,

        /// GTIN for SKUs missing from the customer file: catalog or empty
        #[arg(long, default_value = "catalog")]
        missing_gtin: MissingGtinPolicy,

        /// Run without writing the output file
        #[arg(long)]
        dry_run: bool,
    },

    /// Load a CSV file and show its encoding, columns and row count
    Inspect {
        /// Input CSV file
        input: PathBuf,

        /// Text encoding (auto-detect if not specified)
        #[arg(short, long, default_value = "auto")]
        encoding: TextEncoding,
    },
}

fn main() {
    // Load .env file (if present)
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Process {
            customer,
            catalog,
            output,
            customer_encoding,
            catalog_encoding,
            identity_mode,
            missing_gtin,
            dry_run,
        } => {
            let options = ProcessOptions {
                customer_encoding,
                catalog_encoding,
                identity_mode,
                missing_gtin,
                dry_run,
            };
            cmd_process(&customer, &catalog, &output, &options)
        }

        Commands::Inspect { input, encoding } => cmd_inspect(&input, encoding),
    };

    if let Err(e) = result {
        eprintln!("❌ Error: {}", e);
        std::process::exit(1);
    }
}

fn cmd_process(
    customer: &Path,
    catalog: &Path,
    output: &Path,
    options: &ProcessOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let summary = process_gtin_files(customer, catalog, output, options)?;

    if !summary.unmatched.is_empty() {
        eprintln!(
            "⚠️  {} SKUs without customer GTIN (policy: {})",
            summary.unmatched.len(),
            options.missing_gtin
        );
    }

    if summary.written {
        eprintln!(
            "✨ Import file '{}' has been created successfully ({} rows).",
            summary.output.display(),
            summary.row_count
        );
    } else {
        eprintln!(
            "✨ Dry run complete: '{}' would contain {} rows.",
            summary.output.display(),
            summary.row_count
        );
    }
    Ok(())
}

fn cmd_inspect(input: &Path, encoding: TextEncoding) -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("📄 Inspecting CSV: {}", input.display());

    let result = read_csv_file(input, encoding)?;

    eprintln!(
        "   Encoding: {}{}",
        result.encoding,
        if encoding == TextEncoding::Auto { " (auto-detected)" } else { "" }
    );
    eprintln!("   Columns: {}", result.table.headers.join(", "));
    eprintln!("✅ {} rows", result.table.len());
    Ok(())
}
