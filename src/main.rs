use clap::Parser;
use polydesk::app::Desk;
use polydesk::cli::{self, Cli};
use polydesk::config::Config;
use tracing::info;

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let config = match Config::load("config.toml") {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load config: {e}");
            std::process::exit(1);
        }
    };

    config.init_logging();
    info!("polydesk starting");

    let desk = match Desk::connect(&config).await {
        Ok(desk) => desk,
        Err(e) => {
            cli::output::error(format!("Failed to connect: {e}"));
            std::process::exit(1);
        }
    };

    if let Err(e) = cli::run(cli, &desk).await {
        cli::output::error(e);
        std::process::exit(1);
    }
}
