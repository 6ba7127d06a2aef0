//! Runway - multi-period financial projections from the command line.

mod config;
mod table;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use runway_core::storage::{self, FileStore};
use runway_core::{Document, ModelSnapshot, Questionnaire};
use runway_engine::engine::{CalcOptions, DisplayFormat, RowType, ViewMode, format_number};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use config::{Settings, load_settings};

#[derive(Parser)]
#[command(name = "runway")]
#[command(about = "Multi-period financial projections with row formulas")]
#[command(version)]
struct Cli {
    /// Settings file (default: <config dir>/runway/config.toml)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Directory holding model snapshots
    #[arg(long, global = true, value_name = "DIR")]
    store: Option<PathBuf>,

    /// Log calculation details to stderr
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a model from questionnaire answers and print its id
    New {
        /// Current annual salary
        #[arg(long)]
        salary: f64,

        /// Current age
        #[arg(long)]
        age: u32,

        /// Target retirement age
        #[arg(long)]
        retire_at: u32,

        /// Expected annual salary growth, in percent
        #[arg(long, default_value_t = 0.0)]
        growth: f64,
    },

    /// List stored model ids
    List,

    /// Calculate a model and print it as a table
    Show {
        model: String,

        /// Display granularity (yearly or monthly)
        #[arg(long)]
        view: Option<ViewMode>,
    },

    /// Set an input cell, recalculate and save
    Set {
        model: String,
        category: String,

        /// Period number as shown in the table (1-based)
        period: usize,

        #[arg(allow_negative_numbers = true)]
        value: f64,
    },

    /// Append a formula row, recalculate and save
    #[command(after_help = "\
Examples:
  runway formula <id> tax 'ROW(annual_salary) * 0.2' --type expense
  runway formula <id> savings 'PREV(savings) + ROW(annual_salary) - ROW(tax)'")]
    Formula {
        model: String,
        category: String,
        formula: String,

        /// Display label (defaults to the category)
        #[arg(long)]
        label: Option<String>,

        /// Row type: income, expense, debt, investment, calculation
        #[arg(long = "type", default_value = "calculation")]
        row_type: RowType,

        /// Display format: currency, percentage, number
        #[arg(long, default_value = "currency")]
        format: DisplayFormat,
    },

    /// Calculate a snapshot file and write the result as JSON
    Calc {
        input: PathBuf,

        /// Output file (default: stdout)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        /// Maximum passes per period
        #[arg(long)]
        max_passes: Option<usize>,
    },

    /// Calculate a model and export it as markdown
    Export {
        model: String,

        /// Output file (default: stdout)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        /// Display granularity (yearly or monthly)
        #[arg(long)]
        view: Option<ViewMode>,
    },
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let (settings, warnings) = load_settings(cli.config.as_ref());
    for warning in warnings {
        eprintln!("Warning: {}", warning);
    }

    if let Err(e) = run(cli, settings) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli, settings: Settings) -> Result<()> {
    let store_dir = cli
        .store
        .clone()
        .unwrap_or_else(|| settings.store_dir_or_default());
    let options = CalcOptions::with_max_passes(settings.max_passes);
    tracing::debug!(store = %store_dir.display(), max_passes = settings.max_passes, "settings");

    match cli.command {
        Commands::New {
            salary,
            age,
            retire_at,
            growth,
        } => {
            let answers = Questionnaire {
                annual_salary: salary,
                age,
                target_retirement_age: retire_at,
                salary_growth_rate: growth,
            };
            let store = open_store(&store_dir)?;
            let snapshot = store.create_model(&answers)?;
            eprintln!(
                "{} working years; monthly growth rate {}%",
                answers.working_years(),
                format_number(Some(answers.monthly_growth_rate()))
            );
            println!("{}", snapshot.model.id);
        }
        Commands::List => {
            let store = open_store(&store_dir)?;
            for id in store.list_models()? {
                println!("{}", id);
            }
        }
        Commands::Show { model, view } => {
            let store = open_store(&store_dir)?;
            let mut doc = load_document(&store, &model, options)?;
            apply_view(&mut doc, view.or(settings.view_mode));
            doc.calculate();
            report_cycles(&doc);
            print!("{}", table::render_table(&doc));
        }
        Commands::Set {
            model,
            category,
            period,
            value,
        } => {
            if period == 0 {
                bail!("periods are numbered from 1");
            }
            let store = open_store(&store_dir)?;
            let mut doc = load_document(&store, &model, options)?;
            doc.set_input(&category, period - 1, value)
                .with_context(|| format!("cannot set {} in period {}", category, period))?;
            doc.calculate();
            store.save(&doc.to_snapshot())?;
        }
        Commands::Formula {
            model,
            category,
            formula,
            label,
            row_type,
            format,
        } => {
            let store = open_store(&store_dir)?;
            let mut doc = load_document(&store, &model, options)?;
            let label = label.unwrap_or_else(|| category.clone());
            let row_id = doc.add_formula_row(&category, &label, row_type, &formula, format)?;
            doc.calculate();
            report_cycles(&doc);
            store.save(&doc.to_snapshot())?;
            println!("{}", row_id);
        }
        Commands::Calc {
            input,
            output,
            max_passes,
        } => {
            let snapshot = storage::parse_snapshot(&input)
                .with_context(|| format!("failed to load {}", input.display()))?;
            let options = CalcOptions::with_max_passes(max_passes.unwrap_or(settings.max_passes));
            let mut doc = Document::from_snapshot(snapshot).with_options(options);
            let report = doc.calculate();
            for failure in &report.failures {
                eprintln!(
                    "Warning: row {} period {}: {}",
                    failure.row_id,
                    failure.period + 1,
                    failure.message
                );
            }
            write_json(&doc.into_snapshot(), output.as_deref())?;
        }
        Commands::Export {
            model,
            output,
            view,
        } => {
            let store = open_store(&store_dir)?;
            let mut doc = load_document(&store, &model, options)?;
            apply_view(&mut doc, view.or(settings.view_mode));
            doc.calculate();
            match output {
                Some(path) => {
                    storage::write_markdown(&path, &doc)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    println!("Exported to {}", path.display());
                }
                None => print!("{}", storage::write_markdown_content(&doc)),
            }
        }
    }

    Ok(())
}

fn open_store(dir: &Path) -> Result<FileStore> {
    FileStore::open(dir).with_context(|| format!("failed to open store {}", dir.display()))
}

fn load_document(store: &FileStore, model: &str, options: CalcOptions) -> Result<Document> {
    let snapshot = store.get_model(model)?;
    Ok(Document::from_snapshot(snapshot).with_options(options))
}

fn apply_view(doc: &mut Document, view: Option<ViewMode>) {
    if let Some(view) = view {
        doc.model.view_mode = view;
    }
}

fn report_cycles(doc: &Document) {
    for cycle in doc.cycles() {
        eprintln!("Warning: circular rows: {}", cycle.join(" -> "));
    }
}

fn write_json(snapshot: &ModelSnapshot, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => storage::write_snapshot(path, snapshot)
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => print!("{}", storage::write_snapshot_content(snapshot)?),
    }
    Ok(())
}
