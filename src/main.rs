//! # Faqbot — FAQ matching service
//!
//! Answers free-text questions from a fixed FAQ corpus.
//!
//! Usage:
//!   faqbot serve                         # Start HTTP API (default 127.0.0.1:5000)
//!   faqbot serve --port 8080             # Custom port
//!   faqbot ask "how do i reset my password"
//!   faqbot faqs                          # List corpus questions
//!   faqbot init                          # Write default config

use anyhow::Result;
use clap::{Parser, Subcommand};
use faqbot_core::FaqbotConfig;
use faqbot_matcher::Matcher;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "faqbot", version, about = "FAQ matching service")]
struct Cli {
    /// Config file (default: $FAQBOT_CONFIG or ~/.faqbot/config.toml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Start the HTTP API
    Serve {
        #[arg(long)]
        host: Option<String>,
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Answer one message and print the JSON reply
    Ask { message: String },
    /// Print the corpus questions
    Faqs,
    /// Write the default config file
    Init {
        #[arg(long)]
        force: bool,
    },
}

fn config_path(cli: &Cli) -> PathBuf {
    let explicit = cli
        .config
        .as_deref()
        .map(|p| PathBuf::from(shellexpand::tilde(p).to_string()));
    FaqbotConfig::resolve_path(explicit.as_deref())
}

fn load_config(path: &std::path::Path) -> Result<FaqbotConfig> {
    let mut config = if path.exists() {
        FaqbotConfig::load_from(path)?
    } else {
        tracing::debug!("No config at {}, using defaults", path.display());
        FaqbotConfig::default()
    };
    config.apply_env();
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        "faqbot=debug,faqbot_gateway=debug,faqbot_matcher=debug,tower_http=debug"
    } else {
        "faqbot=info,faqbot_gateway=info,faqbot_matcher=info,tower_http=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();

    let path = config_path(&cli);

    match &cli.command {
        Command::Init { force } => {
            if path.exists() && !force {
                anyhow::bail!("{} already exists (use --force to overwrite)", path.display());
            }
            FaqbotConfig::default().save_to(&path)?;
            println!("Wrote default config to {}", path.display());
        }
        Command::Faqs => {
            let config = load_config(&path)?;
            for (i, entry) in config.corpus().iter().enumerate() {
                println!("{i:>3}  {}", entry.question);
            }
        }
        Command::Ask { message } => {
            let config = load_config(&path)?;
            let matcher = Matcher::new(config.corpus(), config.matcher.clone());
            let reply = matcher.decide(message);
            println!("{}", serde_json::to_string_pretty(&reply)?);
        }
        Command::Serve { host, port } => {
            let mut config = load_config(&path)?;
            if let Some(h) = host {
                config.gateway.host = h.clone();
            }
            if let Some(p) = port {
                config.gateway.port = *p;
            }
            faqbot_gateway::start(&config).await?;
        }
    }

    Ok(())
}
