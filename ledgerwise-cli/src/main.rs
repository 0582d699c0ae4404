use anyhow::Result;
use clap::{Parser, Subcommand};
use ledgerwise_finance::preprocess_statement_text;
use std::io;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod advise;
mod auth;
mod config;
mod error;
mod llm;
mod session;
mod state;

use config::Config;
use llm::OpenAiClient;

#[derive(Parser, Debug)]
#[command(
    name = "ledgerwise",
    version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("LEDGERWISE_BUILD_SHA"), ")"),
    about = "Summarize PDF bank statements and ask an LLM for budgeting advice"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Read statements, print advice, then start a Q&A session (default)
    Advise {
        /// Folder containing statement PDFs (default: ./statements)
        #[arg(long)]
        dir: Option<PathBuf>,

        /// Chat model to use (overrides config)
        #[arg(long)]
        model: Option<String>,
    },

    /// Print the parsed statement summary without contacting the API
    Summary {
        /// Folder containing statement PDFs (default: ./statements)
        #[arg(long)]
        dir: Option<PathBuf>,

        /// Emit totals and periods as JSON
        #[arg(long)]
        json: bool,
    },

    /// Ask free-form questions only
    Ask {
        /// Chat model to use (overrides config)
        #[arg(long)]
        model: Option<String>,
    },

    /// Manage ~/.ledgerwise/config.toml
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write the default config (never overwrites)
    Init,
    /// Print the effective config
    Show,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_logging();

    let cli = Cli::parse();
    let mut cfg = config::load_config()?;

    match cli.command.unwrap_or(Command::Advise {
        dir: None,
        model: None,
    }) {
        Command::Advise { dir, model } => {
            apply_overrides(&mut cfg, dir, model);
            advise(&cfg).await?;
        }

        Command::Summary { dir, json } => {
            apply_overrides(&mut cfg, dir, None);
            summary(&cfg.statements.dir, json)?;
        }

        Command::Ask { model } => {
            apply_overrides(&mut cfg, None, model);
            let client = OpenAiClient::new(auth::resolve_api_key()?, &cfg.llm);
            run_session(&client).await?;
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config()?,
            ConfigCommand::Show => config::show_config(&cfg)?,
        },
    }

    Ok(())
}

fn init_logging() {
    let filter = EnvFilter::try_from_env("LEDGERWISE_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn apply_overrides(cfg: &mut Config, dir: Option<PathBuf>, model: Option<String>) {
    if let Some(dir) = dir {
        cfg.statements.dir = dir;
    }
    if let Some(model) = model {
        cfg.llm.model = model;
    }
}

async fn advise(cfg: &Config) -> Result<()> {
    let api_key = auth::resolve_api_key()?;
    let client = OpenAiClient::new(api_key, &cfg.llm);
    info!(model = client.model(), "using chat model");

    let stdin = io::stdin();
    advise::run_advice(&client, &cfg.statements.dir, &mut stdin.lock(), &mut io::stdout()).await
}

async fn run_session(client: &OpenAiClient) -> Result<()> {
    let stdin = io::stdin();
    let asked = session::interactive_session(client, &mut stdin.lock(), &mut io::stdout()).await?;
    info!(questions = asked, "session ended");
    Ok(())
}

fn summary(dir: &Path, json: bool) -> Result<()> {
    let Some(pdf_text) = advise::load_statement_text(dir, !json, &mut io::stdout())? else {
        return Ok(());
    };

    let summary = preprocess_statement_text(&pdf_text);
    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    if let Some((start, end)) = summary.coverage() {
        println!("Statements cover {start} to {end}\n");
    }
    print!("{}", summary.render());
    Ok(())
}
