use anyhow::{Context, Result};
use chrono::Datelike;
use clap::{Parser, Subcommand};
use prodawn_core::attributes::weekday_name;
use prodawn_core::{
    CoreError, FeatureVector, HeuristicScorer, ModelBackedClassifier, ModelCache, Predictor, RandomQuotes,
    Strategy, TaskInput,
};
use std::path::PathBuf;
use std::process::ExitCode;

mod config;
mod interactive;
mod logging;
mod render;
mod state;

use config::Config;
use render::{render_text, Report};

const EXIT_CODES: &str = "\
Exit codes:
  0  success
  1  unexpected failure
  2  bad input (unknown flag or value, duration out of range)
  3  model artifacts or scoring weights unusable
  4  the trained model failed";

#[derive(Parser, Debug)]
#[command(
    name = "prodawn",
    version,
    long_version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("PRODAWN_BUILD_SHA"), ")"),
    about = "Predict how productive a task session is likely to be",
    after_help = EXIT_CODES
)]
struct Cli {
    /// Log at debug level (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

/// Where verdicts come from; flags override `config.toml`.
#[derive(clap::Args, Debug, Clone, Default)]
struct EngineArgs {
    /// heuristic, model or auto (model with heuristic fallback)
    #[arg(long)]
    engine: Option<Strategy>,

    /// JSON model export (default: ~/.prodawn/model.json)
    #[arg(long)]
    model: Option<PathBuf>,

    /// JSON array of training-time column names (default: ~/.prodawn/columns.json)
    #[arg(long)]
    columns: Option<PathBuf>,

    /// Seed the quote picker for reproducible output
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Score a single task
    Predict {
        /// Task duration in minutes (1-1440)
        #[arg(long, allow_negative_numbers = true)]
        duration: i64,

        /// Low, Medium or High
        #[arg(long, default_value = "Medium")]
        procrastination: String,

        /// Low, Medium or High
        #[arg(long, default_value = "Medium")]
        energy: String,

        /// Bad, Okay or Good
        #[arg(long, default_value = "Good")]
        mood: String,

        /// Work, Study, Personal, Errand or Creative
        #[arg(long, default_value = "Work")]
        category: String,

        /// Weekday name (default: today)
        #[arg(long)]
        day: Option<String>,

        /// One-sentence goal or subtask
        #[arg(long)]
        note: Option<String>,

        /// Show the per-rule heuristic contributions
        #[arg(long)]
        explain: bool,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        engine: EngineArgs,
    },

    /// Prompt for tasks one after another until `q`
    Interactive {
        #[command(flatten)]
        engine: EngineArgs,
    },

    /// Print the feature columns the encoder produces, in order
    Columns {
        /// Print as a JSON array (the columns artifact format)
        #[arg(long)]
        json: bool,
    },

    /// Manage ~/.prodawn/config.toml
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write the default config if none exists
    Init,
    /// Print the effective config
    Show,
    /// Print the config file location
    Path,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => report_error(&e),
    }
}

fn run(cli: Cli) -> Result<()> {
    let cfg = config::load_config()?;
    logging::init(&cfg.logging, cli.verbose);

    match cli.command {
        Command::Predict {
            duration,
            procrastination,
            energy,
            mood,
            category,
            day,
            note,
            explain,
            json,
            engine,
        } => {
            let task = TaskInput {
                duration_minutes: duration,
                procrastination,
                energy,
                mood,
                category,
                day_of_week: day.unwrap_or_else(today),
            };
            let attrs = task.parse().map_err(CoreError::from)?;

            let predictor = build_predictor(&cfg, &engine)?;
            let mut quotes = RandomQuotes::new(engine.seed.or(cfg.presentation.quote_seed));
            let verdict = predictor.predict(&attrs, &mut quotes)?;

            let breakdown = explain.then(|| predictor.heuristic().breakdown(&attrs));
            let report = Report::new(verdict, attrs, breakdown, note);
            if json {
                println!("{}", serde_json::to_string_pretty(&report).context("serialize report")?);
            } else {
                print!("{}", render_text(&report));
            }
        }

        Command::Interactive { engine } => {
            let predictor = build_predictor(&cfg, &engine)?;
            let mut quotes = RandomQuotes::new(engine.seed.or(cfg.presentation.quote_seed));
            let stdin = std::io::stdin();
            interactive::run_interactive(&predictor, &mut quotes, &mut stdin.lock(), &today())?;
        }

        Command::Columns { json } => {
            let names = FeatureVector::column_names();
            if json {
                println!("{}", serde_json::to_string_pretty(&names)?);
            } else {
                for n in names {
                    println!("{}", n);
                }
            }
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config()?,
            ConfigCommand::Show => {
                print!("{}", toml::to_string_pretty(&cfg).context("serialize config")?);
            }
            ConfigCommand::Path => println!("{}", config::config_path()?.display()),
        },
    }

    Ok(())
}

/// Build the predictor for this process. The model is loaded through the
/// global cache; a missing model only fails the `model` strategy.
fn build_predictor(cfg: &Config, args: &EngineArgs) -> Result<Predictor> {
    let strategy = args.engine.unwrap_or(cfg.engine.strategy);
    let heuristic = HeuristicScorer::new(cfg.scoring.clone()).map_err(CoreError::from)?;

    let handle = if strategy == Strategy::Heuristic {
        None
    } else {
        let mut artifacts = cfg.model.artifacts()?;
        if let Some(p) = &args.model {
            artifacts.model_path = p.clone();
        }
        if let Some(p) = &args.columns {
            artifacts.columns_path = p.clone();
        }

        match ModelCache::global().get_or_load(&artifacts) {
            Ok(h) => Some(h),
            Err(e) if strategy == Strategy::Model => return Err(CoreError::from(e).into()),
            Err(e) => {
                tracing::info!(error = %e, "model artifacts unavailable");
                None
            }
        }
    };

    tracing::debug!(%strategy, model_loaded = handle.is_some(), "predictor ready");
    Ok(Predictor::new(strategy, heuristic, ModelBackedClassifier::new(handle)))
}

fn today() -> String {
    weekday_name(chrono::Local::now().weekday()).to_string()
}

/// Request boundary: every failure becomes a message and an exit code.
fn report_error(e: &anyhow::Error) -> ExitCode {
    match e.downcast_ref::<CoreError>() {
        Some(core) => {
            eprintln!("error: {}", core.user_message());
            ExitCode::from(match core {
                CoreError::Validation(_) => 2,
                CoreError::Configuration(_) => 3,
                CoreError::Prediction(_) => 4,
            })
        }
        None => {
            eprintln!("error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
