use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use rand::Rng;

use dailyscp::config::DailyScpConfig;
use dailyscp::extract::MentionParser;
use dailyscp::record::Designation;
use dailyscp::service::{
    DailyScpBot, DryRunPoster, EntryLookup, HttpFetcher, LoggingIncidentReporter,
};

#[derive(Parser)]
#[command(name = "dailyscp", version, about = "Daily SCP entry bot tooling")]
struct Cli {
    /// JSON configuration file (defaults apply when omitted)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch an entry and print its record
    Lookup {
        /// Designation such as 173 or 049-J
        designation: String,
    },
    /// Print the designation a message asks for
    Mention {
        /// Message text, including the bot's handle
        text: String,
    },
    /// Print a random designation
    Random,
    /// Post an entry without publishing it (random when omitted)
    Post {
        /// Designation to post
        designation: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => DailyScpConfig::from_json_file(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => DailyScpConfig::default(),
    };
    config.validate()?;

    match cli.command {
        Commands::Lookup { designation } => {
            let fetcher = Arc::new(HttpFetcher::new(&config.fetch)?);
            let lookup = EntryLookup::new(fetcher, &config.catalog);
            let record = lookup.lookup(&Designation::parse(&designation)?).await?;
            println!("{record}");
        }
        Commands::Mention { text } => {
            let parser = MentionParser::from_config(&config)?;
            match parser.parse(&text) {
                Some(designation) => println!("{designation}"),
                None => println!("No designation found."),
            }
        }
        Commands::Random => {
            let number = rand::thread_rng().gen_range(1..=config.catalog.entries);
            println!("{}", Designation::from_number(number));
        }
        Commands::Post { designation } => {
            let bot = DailyScpBot::new(
                &config,
                Arc::new(HttpFetcher::new(&config.fetch)?),
                Arc::new(DryRunPoster),
                Arc::new(LoggingIncidentReporter::default()),
            )?;
            let record = match designation {
                Some(designation) => bot.post_entry(&Designation::parse(&designation)?).await?,
                None => bot.scheduled_post().await?,
            };
            println!("{record}");
        }
    }

    Ok(())
}
