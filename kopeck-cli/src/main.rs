use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use kopeck_core::{EmotionVector, analyze_emotions, score_friendliness, time};
use kopeck_finance::{extract_transactions, fallback_reply, try_answer};
use kopeck_ingest::{RawRecord, load_records};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

mod config;
mod state;

use config::Config;

#[derive(Parser, Debug)]
#[command(name = "kopeck", version, about = "Money notes and spending analytics from plain messages")]
struct Cli {
    /// Config file (default: ~/.kopeck/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Treat this date (YYYY-MM-DD) as today instead of the local date
    #[arg(long, global = true)]
    today: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract transactions from a message and print them as JSON
    Extract {
        #[arg(long)]
        message: String,

        /// Extra text used when the message alone does not tell type or category
        #[arg(long)]
        context: Option<String>,
    },

    /// Answer an analytics question over prior records
    Analyze {
        #[arg(long)]
        message: String,

        /// Prior transactions (.json array or .csv with a header row)
        #[arg(long)]
        records: PathBuf,
    },

    /// Score how friendly a message is
    Friendliness {
        #[arg(long)]
        message: String,

        /// Emotion distribution as JSON, e.g. '{"joy":0.7,"neutral":0.3}'
        #[arg(long)]
        emotions: Option<String>,
    },

    /// Emotion distribution with dominant emotion and sentiment score
    Emotions {
        #[arg(long)]
        text: String,

        #[arg(long)]
        emotions: Option<String>,
    },

    /// Reply the way chat does without a language model
    Chat {
        #[arg(long)]
        message: String,

        #[arg(long)]
        records: Option<PathBuf>,
    },

    /// Write the default config file
    InitConfig,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    if let Command::InitConfig = cli.command {
        return config::init_config(cli.config.as_deref());
    }

    let cfg = config::load_config(cli.config.as_deref())?;
    let today = resolve_today(cli.today.as_deref(), &cfg)?;
    tracing::debug!(%today, timezone = %cfg.locale.timezone, "resolved today");

    match cli.command {
        Command::Extract { message, context } => {
            let result = extract_transactions(&message, context.as_deref(), today, &cfg.engine);
            print_json(&result)?;
        }

        Command::Analyze { message, records } => {
            let records = read_records(&records)?;
            match try_answer(&message, &records, today, &cfg.engine) {
                Some(report) => println!("{report}"),
                None => println!("Сообщение не похоже на запрос аналитики, или записей нет."),
            }
        }

        Command::Friendliness { message, emotions } => {
            let vector = parse_emotions(emotions.as_deref())?;
            print_json(&score_friendliness(&message, vector.as_ref()))?;
        }

        Command::Emotions { text, emotions } => {
            let vector = parse_emotions(emotions.as_deref())?;
            print_json(&analyze_emotions(&text, vector.as_ref()))?;
        }

        Command::Chat { message, records } => {
            let records = match records {
                Some(p) => read_records(&p)?,
                None => Vec::new(),
            };
            println!("{}", fallback_reply(&message, &records, today, &cfg.engine));
        }

        Command::InitConfig => {}
    }

    Ok(())
}

fn resolve_today(flag: Option<&str>, cfg: &Config) -> Result<NaiveDate> {
    match flag {
        Some(s) => time::parse_iso_date(s).context("--today"),
        None => time::today_in(&cfg.locale.timezone),
    }
}

fn read_records(path: &Path) -> Result<Vec<RawRecord>> {
    let records = load_records(path).with_context(|| format!("loading {}", path.display()))?;
    tracing::info!(count = records.len(), path = %path.display(), "loaded records");
    Ok(records)
}

fn parse_emotions(raw: Option<&str>) -> Result<Option<EmotionVector>> {
    raw.map(|s| serde_json::from_str::<EmotionVector>(s).context("parse --emotions JSON"))
        .transpose()
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
