mod center;
mod places;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use worldwise_store::{CitiesClient, RecordStore};

use crate::center::CenterArgs;
use crate::places::PlacesCommands;

#[derive(Debug, Parser)]
#[command(name = "worldwise")]
#[command(about = "WorldWise place tracker command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List, inspect, add and delete visited places
    Places {
        #[command(subcommand)]
        command: PlacesCommands,
    },
    /// Resolve the map center from a URL, the device location and clicks
    Center(CenterArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = worldwise_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Places { command }) => {
            let store = RecordStore::new(CitiesClient::from_config(&config)?);
            match command {
                PlacesCommands::List => places::run_list(&store).await?,
                PlacesCommands::Show { id } => places::run_show(&store, &id).await?,
                PlacesCommands::Add(args) => places::run_add(&store, args).await?,
                PlacesCommands::Delete { id } => places::run_delete(&store, &id).await?,
            }
        }
        Some(Commands::Center(args)) => center::run_center(&config, &args).await?,
        None => println!("nothing to do; see `worldwise --help`"),
    }

    Ok(())
}

#[cfg(test)]
mod tests;
