use std::path::PathBuf;

use anyhow::Context;
use catalog::LoadPolicy;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Offline helpers for POI map catalogs")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load the configured catalog from local files and print it as JSON
    Normalize {
        /// Explorer config (JSON)
        #[arg(long)]
        config: PathBuf,

        /// Directory that relative source URLs resolve against
        #[arg(long, default_value = ".")]
        root: PathBuf,

        /// Override the config's load policy
        #[arg(long, value_enum)]
        policy: Option<Policy>,
    },

    /// Print the id slug of each argument
    Slug {
        #[arg(required = true)]
        text: Vec<String>,
    },

    /// Validate a config and print the resolved values
    CheckConfig { file: PathBuf },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Policy {
    AllOrNothing,
    SkipFailed,
}

impl From<Policy> for LoadPolicy {
    fn from(policy: Policy) -> Self {
        match policy {
            Policy::AllOrNothing => LoadPolicy::AllOrNothing,
            Policy::SkipFailed => LoadPolicy::SkipFailedSources,
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    match Args::parse().command {
        Command::Normalize {
            config,
            root,
            policy,
        } => {
            let explorer_config = tools::read_config(&config)?;
            let pois = tools::normalize_catalog(&explorer_config, &root, policy.map(Into::into))?;
            tracing::info!(count = pois.len(), "catalog normalized");
            println!("{}", serde_json::to_string_pretty(&pois)?);
        }
        Command::Slug { text } => {
            for slug in tools::slugs(text.iter().map(String::as_str)) {
                println!("{slug}");
            }
        }
        Command::CheckConfig { file } => {
            let config = tools::read_config(&file)?;
            let summary = tools::summarize(&config);
            println!(
                "{}",
                serde_json::to_string_pretty(&summary).context("encoding config summary")?
            );
        }
    }
    Ok(())
}
