//! CLI entry and dispatch.

use anyhow::{Context, Result};
use clap::Parser;
use redraft_core::config;
use redraft_core::options::{RephraseLanguage, Tone, WritingStyle};

use crate::logging;

mod commands;

#[derive(Parser)]
#[command(name = "redraft")]
#[command(version)]
#[command(about = "Rephrase and translate text from the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Rephrase text once and print the result
    Rephrase {
        /// Text to rephrase (reads stdin when omitted)
        #[arg(value_name = "TEXT")]
        text: Option<String>,

        /// Output language (en, de)
        #[arg(short, long)]
        language: Option<RephraseLanguage>,

        /// Writing style (simple, business, academic, casual, prefer_*)
        #[arg(short, long, conflicts_with = "tone")]
        style: Option<WritingStyle>,

        /// Tone (enthusiastic, friendly, confident, diplomatic, prefer_*)
        #[arg(short, long)]
        tone: Option<Tone>,

        /// Print the result as markup with additions wrapped in spans
        #[arg(long)]
        diff: bool,
    },

    /// Translate text once and print the result
    Translate {
        /// Text to translate (reads stdin when omitted)
        #[arg(value_name = "TEXT")]
        text: Option<String>,

        /// Target language code, e.g. DE, EN-US
        #[arg(long, value_name = "CODE")]
        to: Option<String>,

        /// Source language code (auto-detected when omitted)
        #[arg(long, value_name = "CODE")]
        from: Option<String>,
    },

    /// Show character usage reported by the proxy
    Usage {
        /// Print the full usage object as JSON
        #[arg(long)]
        json: bool,
    },

    /// Run the DeepL proxy server
    Serve {
        /// Listen address (overrides server.addr)
        #[arg(long, value_name = "ADDR")]
        addr: Option<String>,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Show the path to the config file
    Path,
    /// Initialize a default config file (if not present)
    Init,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // one tokio runtime for everything
    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;

    rt.block_on(async move { dispatch(cli).await })
}

fn load_config() -> Result<config::Config> {
    config::Config::load().context("load config")
}

async fn dispatch(cli: Cli) -> Result<()> {
    // default to the interactive editor
    let Some(command) = cli.command else {
        let _guard = logging::init_file();
        return commands::editor::run(&load_config()?).await;
    };

    logging::init_stderr(if matches!(command, Commands::Serve { .. }) {
        "info"
    } else {
        "warn"
    });

    match command {
        Commands::Rephrase {
            text,
            language,
            style,
            tone,
            diff,
        } => {
            commands::rephrase::run(commands::rephrase::RephraseOptions {
                config: &load_config()?,
                text,
                language,
                style,
                tone,
                diff,
            })
            .await
        }
        Commands::Translate { text, to, from } => {
            commands::translate::run(&load_config()?, text, to.as_deref(), from.as_deref()).await
        }
        Commands::Usage { json } => commands::usage::run(&load_config()?, json).await,
        Commands::Serve { addr } => commands::serve::run(&load_config()?, addr).await,

        // Config commands work even when the file is broken.
        Commands::Config { command } => match command {
            ConfigCommands::Path => {
                commands::config::path();
                Ok(())
            }
            ConfigCommands::Init => commands::config::init(),
        },
    }
}
