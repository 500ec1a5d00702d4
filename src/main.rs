use crate::config::ProcessConfig;
use crate::db::connection::{init_offers_db, Database};
use crate::errors::AppError;
use clap::{Parser, Subcommand};

mod config;
mod db;
mod discovery;
mod domain;
mod enrich;
mod errors;
mod geo;
mod process;
mod scraper;
mod spreadsheets;

#[cfg(test)]
mod tests;

#[derive(Parser)]
#[command(
    name = "metro_flats",
    about = "Otodom rental offers filtered by Warsaw metro proximity"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Fetch the search results and write the work queue of unseen offers
    Discover,
    /// Fetch, normalize and append a single offer by slug
    Process { slug: String },
    /// Render the offer store as a spreadsheet for review
    Export {
        #[arg(default_value = "offers.xlsx")]
        path: String,
    },
}

fn main() {
    dotenvy::dotenv().ok();
    env_logger::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli.command) {
        eprintln!("❌ {e}");
        std::process::exit(1);
    }
}

fn run(command: Command) -> Result<(), AppError> {
    match command {
        Command::Discover => {
            let db = open_store(config::store_path()?)?;
            discovery::run_discovery(&db)
        }
        Command::Process { slug } => {
            // All required configuration resolves before any network call.
            let config = ProcessConfig::from_env()?;
            let db = open_store(config.store_path.clone())?;
            process::run_process(&config, &db, slug.trim())
        }
        Command::Export { path } => {
            let db = open_store(config::store_path()?)?;
            let offers = db::offers::all_offers(&db)?;
            spreadsheets::export_offers_xlsx(&offers, std::path::Path::new(&path))?;
            println!("Exported {} offers to {path}", offers.len());
            Ok(())
        }
    }
}

fn open_store(path: String) -> Result<Database, AppError> {
    let db = Database::new(path);
    init_offers_db(&db)?;
    Ok(db)
}
