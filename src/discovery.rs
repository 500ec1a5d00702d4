// discovery.rs
use crate::db::connection::Database;
use crate::db::offers;
use crate::errors::AppError;
use crate::scraper::models::SearchItem;
use crate::scraper::OtodomScraper;
use chrono::Local;
use log::{info, warn};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Fixed work-queue path the per-offer pass is fed from.
pub const WORK_QUEUE_PATH: &str = "current_offers.csv";
const ARCHIVE_DIR: &str = "output";

/// Search items whose ids are not yet in the sink, in page order.
/// Items without an id cannot be deduplicated and are dropped.
pub fn filter_new_offers(items: Vec<SearchItem>, existing: &HashSet<String>) -> Vec<SearchItem> {
    items
        .into_iter()
        .filter(|item| match item.id {
            Some(id) => !existing.contains(&id.to_string()),
            None => {
                warn!("⚠️ Search item without id, skipping");
                false
            }
        })
        .collect()
}

/// One slug per line under a header row.
pub fn write_work_queue(slugs: &[String], path: &Path) -> Result<(), AppError> {
    let mut writer = csv::Writer::from_path(path).map_err(|e| AppError::Io(e.to_string()))?;

    writer
        .write_record(["slug"])
        .map_err(|e| AppError::Io(e.to_string()))?;
    for slug in slugs {
        writer
            .write_record([slug.as_str()])
            .map_err(|e| AppError::Io(e.to_string()))?;
    }

    writer.flush().map_err(|e| AppError::Io(e.to_string()))
}

pub fn run_discovery(db: &Database) -> Result<(), AppError> {
    let scraper = OtodomScraper::new()?;

    info!("📄 Fetching offer list from Otodom");
    let items = scraper.fetch_search_items()?;
    info!("Search page returned {} offers", items.len());

    let existing = offers::existing_ids(db)?;
    let fresh = filter_new_offers(items, &existing);

    let slugs: Vec<String> = fresh.into_iter().filter_map(|item| item.slug).collect();
    if slugs.is_empty() {
        println!("No new offers found");
        return Ok(());
    }

    fs::create_dir_all(ARCHIVE_DIR).map_err(|e| AppError::Io(e.to_string()))?;
    let timestamp = Local::now().format("%Y%m%d_%H%M%S");
    let archive_path = format!("{ARCHIVE_DIR}/offers_{timestamp}.csv");

    write_work_queue(&slugs, Path::new(WORK_QUEUE_PATH))?;
    write_work_queue(&slugs, Path::new(&archive_path))?;

    println!(
        "Saved {} new slugs to {WORK_QUEUE_PATH} and {archive_path}",
        slugs.len()
    );
    println!("\nTo process these offers, run:");
    println!("cat {WORK_QUEUE_PATH} | tail -n +2 | xargs -I {{}} metro_flats process {{}}");
    println!("\nOr process them one by one:");
    for slug in &slugs {
        println!("metro_flats process {slug}");
    }

    Ok(())
}
