use clap::Parser;
use config::Config;
use eyre::Result;
use std::path::PathBuf;
use tracing_subscriber::{prelude::*, EnvFilter};

mod config;
mod error;
mod job;
mod property;
mod query_root;
mod request_context;
mod server;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the config file. Defaults to config.toml in the user config directory
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    action: Action,
}

#[derive(clap::Subcommand, Debug)]
enum Action {
    /// Run the GraphQL server
    Serve,
    /// Print the GraphQL schema
    Schema,
    /// Write the current configuration (or the defaults) to the config file
    Init,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(tracing::metadata::LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .init();

    let args = Args::parse();
    let config_path = match args.config {
        Some(config_path) => config_path,
        None => Config::default_path()?,
    };
    let config = Config::load(&config_path).await?;

    match args.action {
        Action::Serve => server::serve(config).await?,
        Action::Schema => println!("{}", query_root::build_schema().sdl()),
        Action::Init => {
            config.save(&config_path).await?;
            println!("Config written to {}", config_path.display());
        }
    };

    Ok(())
}
