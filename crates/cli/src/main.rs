// camcheck CLI - headless inventory-to-catalog compatibility matching

mod exit_codes;
mod report;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use camcheck_engine::engine::{load_catalog_csv, load_table_csv};
use camcheck_engine::clean::clean_label;
use camcheck_engine::column_scan::scan_columns;
use camcheck_engine::config::CatalogColumns;
use camcheck_engine::vocab::ManufacturerVocabulary;
use camcheck_engine::RunConfig;

use exit_codes::{EXIT_INVALID_CONFIG, EXIT_RUNTIME, EXIT_SUCCESS, EXIT_UNMATCHED, EXIT_USAGE};

#[derive(Parser)]
#[command(name = "camcheck")]
#[command(about = "Match noisy inventory model labels against a compatibility catalog")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a matching pass from a TOML run config
    #[command(after_help = "\
Examples:
  camcheck run survey.toml
  camcheck run survey.toml --json
  camcheck run survey.toml --output result.json --csv report.csv
  camcheck run survey.toml --strict")]
    Run {
        /// Path to the run config file
        config: PathBuf,

        /// Output JSON to stdout instead of human summary
        #[arg(long)]
        json: bool,

        /// Write JSON output to file
        #[arg(long)]
        output: Option<PathBuf>,

        /// Write report CSV to file
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Exit nonzero when any model classifies as none
        #[arg(long)]
        strict: bool,
    },

    /// Validate a run config without running
    #[command(after_help = "\
Examples:
  camcheck validate survey.toml")]
    Validate {
        /// Path to the run config file
        config: PathBuf,
    },

    /// Clean a single label and show the audit trail
    #[command(after_help = "\
Examples:
  camcheck clean 'AXS-4000 192.168.1.5 Axis' --catalog catalog.csv")]
    Clean {
        /// Raw model label
        label: String,

        /// Catalog CSV providing the manufacturer vocabulary
        #[arg(long)]
        catalog: PathBuf,

        /// Output JSON instead of the human form
        #[arg(long)]
        json: bool,
    },

    /// Scan an inventory CSV for columns that look like serials/IPs/MACs/dates
    #[command(after_help = "\
Examples:
  camcheck scan export.csv")]
    Scan {
        /// Inventory CSV file
        inventory: PathBuf,

        /// Output JSON instead of the human form
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run {
            config,
            json,
            output,
            csv,
            strict,
        } => cmd_run(config, json, output, csv, strict),
        Commands::Validate { config } => cmd_validate(config),
        Commands::Clean {
            label,
            catalog,
            json,
        } => cmd_clean(&label, catalog, json),
        Commands::Scan { inventory, json } => cmd_scan(inventory, json),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {message}");
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {hint}");
            }
            ExitCode::from(code)
        }
    }
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    fn usage(msg: impl Into<String>) -> Self {
        Self {
            code: EXIT_USAGE,
            message: msg.into(),
            hint: None,
        }
    }

    fn invalid_config(msg: impl Into<String>) -> Self {
        Self {
            code: EXIT_INVALID_CONFIG,
            message: msg.into(),
            hint: None,
        }
    }

    fn runtime(msg: impl Into<String>) -> Self {
        Self {
            code: EXIT_RUNTIME,
            message: msg.into(),
            hint: None,
        }
    }

    fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

// ============================================================================
// run
// ============================================================================

fn cmd_run(
    config_path: PathBuf,
    json_output: bool,
    output_file: Option<PathBuf>,
    csv_file: Option<PathBuf>,
    strict: bool,
) -> Result<(), CliError> {
    let config_str = std::fs::read_to_string(&config_path)
        .map_err(|e| CliError::usage(format!("cannot read config: {e}")))?;
    let config = RunConfig::from_toml(&config_str).map_err(|e| CliError::invalid_config(e.to_string()))?;

    // Resolve data files relative to the config file's directory
    let base_dir = config_path
        .parent()
        .unwrap_or_else(|| Path::new("."));

    let catalog = load_catalog(&base_dir.join(&config.catalog), &config.catalog_columns)?;
    if catalog.is_empty() {
        eprintln!("warning: reference catalog is empty; every model will classify as none");
    }

    let table = load_table(&base_dir.join(&config.inventory))?;

    let report =
        camcheck_engine::run(&config, &catalog, &table).map_err(|e| CliError::runtime(e.to_string()))?;

    for w in &report.column_warnings {
        eprintln!(
            "warning: column {} ('{}') looks like {} data ({:.0}% of cells)",
            w.index,
            w.header,
            w.kind,
            w.ratio * 100.0
        );
    }

    let json_str = serde_json::to_string_pretty(&report)
        .map_err(|e| CliError::runtime(format!("JSON serialization error: {e}")))?;

    let json_path = output_file.or_else(|| config.output.json.as_ref().map(PathBuf::from));
    if let Some(ref path) = json_path {
        std::fs::write(path, &json_str)
            .map_err(|e| CliError::runtime(format!("cannot write output: {e}")))?;
        eprintln!("wrote {}", path.display());
    }

    let csv_path = csv_file.or_else(|| config.output.csv.as_ref().map(PathBuf::from));
    if let Some(ref path) = csv_path {
        let file = std::fs::File::create(path)
            .map_err(|e| CliError::runtime(format!("cannot write report CSV: {e}")))?;
        report::write_report_csv(&report, file)
            .map_err(|e| CliError::runtime(format!("cannot write report CSV: {e}")))?;
        eprintln!("wrote {}", path.display());
    }

    if json_output {
        println!("{json_str}");
    }

    // Human summary to stderr
    let s = &report.summary;
    eprintln!(
        "{} models ({} devices): {} exact, {} potential, {} unmatched",
        s.total_models,
        report::format_count(s.total_devices),
        s.exact,
        s.potential,
        s.none,
    );

    if strict && s.none > 0 {
        return Err(CliError {
            code: EXIT_UNMATCHED,
            message: format!("{} model(s) without a catalog match", s.none),
            hint: None,
        });
    }

    Ok(())
}

// ============================================================================
// validate
// ============================================================================

fn cmd_validate(config_path: PathBuf) -> Result<(), CliError> {
    let config_str = std::fs::read_to_string(&config_path)
        .map_err(|e| CliError::usage(format!("cannot read config: {e}")))?;

    match RunConfig::from_toml(&config_str) {
        Ok(config) => {
            eprintln!(
                "valid: '{}' matching column '{}' against {}",
                config.name, config.columns.model, config.catalog,
            );
            Ok(())
        }
        Err(e) => Err(CliError::invalid_config(e.to_string())),
    }
}

// ============================================================================
// clean
// ============================================================================

fn cmd_clean(label: &str, catalog_path: PathBuf, json: bool) -> Result<(), CliError> {
    let catalog = load_catalog(&catalog_path, &CatalogColumns::default())?;
    let vocab = ManufacturerVocabulary::build(&catalog);
    let result = clean_label(label, &vocab);

    if json {
        let json_str = serde_json::to_string_pretty(&result)
            .map_err(|e| CliError::runtime(format!("JSON serialization error: {e}")))?;
        println!("{json_str}");
        return Ok(());
    }

    println!("cleaned: {:?}", result.cleaned);
    if result.removed.is_empty() {
        println!("removed: (nothing)");
    } else {
        for (i, r) in result.removed.iter().enumerate() {
            if i == 0 {
                println!("removed: {r}");
            } else {
                println!("         {r}");
            }
        }
    }
    Ok(())
}

// ============================================================================
// scan
// ============================================================================

fn cmd_scan(inventory_path: PathBuf, json: bool) -> Result<(), CliError> {
    let table = load_table(&inventory_path)?;
    let suspicions = scan_columns(&table);

    if json {
        let json_str = serde_json::to_string_pretty(&suspicions)
            .map_err(|e| CliError::runtime(format!("JSON serialization error: {e}")))?;
        println!("{json_str}");
        return Ok(());
    }

    if suspicions.is_empty() {
        println!("no suspicious columns");
        return Ok(());
    }
    for s in &suspicions {
        println!(
            "column {} ('{}'): {} data in {:.0}% of cells",
            s.index,
            s.header,
            s.kind,
            s.ratio * 100.0
        );
    }
    Ok(())
}

// ============================================================================
// shared loaders
// ============================================================================

fn load_catalog(
    path: &Path,
    columns: &CatalogColumns,
) -> Result<Vec<camcheck_engine::ReferenceEntry>, CliError> {
    let data = std::fs::read_to_string(path)
        .map_err(|e| CliError::runtime(format!("cannot read {}: {e}", path.display())))?;
    load_catalog_csv(&data, columns).map_err(|e| {
        CliError::runtime(e.to_string())
            .with_hint("check [catalog_columns] header names against the catalog CSV")
    })
}

fn load_table(path: &Path) -> Result<camcheck_engine::RawTable, CliError> {
    let data = std::fs::read_to_string(path)
        .map_err(|e| CliError::runtime(format!("cannot read {}: {e}", path.display())))?;
    load_table_csv(&data).map_err(|e| CliError::runtime(e.to_string()))
}
