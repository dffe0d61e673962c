use assignment_export::{
    Clock, ExportConfig, ExportError, ExportResult, FixedClock, JsonFileSource, SystemClock,
    TemplateKind, Transformer, export_all, load_platforms_from_json, scrape_all,
    source::AssignmentSource, write_json_document,
};
use chrono::DateTime;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "cli")]
#[command(about = "Export assignments to spreadsheet, notion and todo formats", long_about = None)]
struct Cli {
    /// JSON config file (defaults to the built-in paths)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Freeze "now" at an RFC 3339 timestamp
    #[arg(long, global = true)]
    now: Option<String>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Write all three export documents (default)
    Run,

    /// List assignments with their days until due and bucket
    Show,

    /// Run the platform scrapers listed in a platforms file
    Scrape {
        /// JSON file with a top-level `platforms` list
        platforms: PathBuf,
    },

    /// Write the default template skeletons into a directory
    InitTemplates {
        /// Target directory
        dir: PathBuf,
    },
}

fn init_tracing(verbose: bool) {
    let default = if verbose {
        "assignment_export=debug,cli=debug,info"
    } else {
        "assignment_export=info,cli=info,warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

fn load_config(path: Option<&Path>) -> ExportResult<ExportConfig> {
    match path {
        Some(path) => ExportConfig::load(path),
        None => Ok(ExportConfig::default()),
    }
}

fn clock_from(now: Option<&str>) -> ExportResult<Box<dyn Clock>> {
    match now {
        Some(raw) => {
            let now = DateTime::parse_from_rfc3339(raw)
                .map_err(|err| ExportError::Config(format!("invalid --now '{raw}': {err}")))?;
            Ok(Box::new(FixedClock::new(now)))
        }
        None => Ok(Box::new(SystemClock)),
    }
}

fn run(cli: Cli) -> ExportResult<()> {
    let config = load_config(cli.config.as_deref())?;
    let clock = clock_from(cli.now.as_deref())?;

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => {
            let summary = export_all(&config, clock)?;
            println!("Exported {} assignments", summary.assignments);
            println!("  urgent   : {}", summary.urgent);
            println!("  important: {}", summary.important);
            println!("  regular  : {}", summary.regular);
            for kind in TemplateKind::ALL {
                println!("  {:<9}: {}", kind, config.outputs.get(kind).display());
            }
        }
        Commands::Show => {
            let assignments = JsonFileSource::new(&config.assignments_path).fetch()?;
            let transformer = Transformer::with_clock(clock);
            println!("{:<20} {:<26} {:>6}  {}", "id", "due_date", "days", "bucket");
            for assignment in &assignments {
                let days = transformer
                    .derive_days_until_due(assignment.due_date.as_deref())
                    .map(|d| d.to_string())
                    .unwrap_or_default();
                println!(
                    "{:<20} {:<26} {:>6}  {}",
                    assignment.id,
                    assignment.due_date(),
                    days,
                    transformer.categorize(assignment)
                );
            }
        }
        Commands::Scrape { platforms } => {
            let platforms = load_platforms_from_json(&platforms)?;
            let assignments = scrape_all(&platforms)?;
            println!("Total assignments scraped: {}", assignments.len());
        }
        Commands::InitTemplates { dir } => {
            for kind in TemplateKind::ALL {
                let path = dir.join(kind.file_name());
                write_json_document(&kind.default_skeleton(), &path)?;
                println!("Wrote {} template to {}", kind, path.display());
            }
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
