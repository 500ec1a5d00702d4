use crate::db::connection::{init_offers_db, Database};
use std::time::{SystemTime, UNIX_EPOCH};

/// Fresh database under a unique temp path, with the production schema
/// applied.
pub fn test_db(tag: &str) -> Database {
    let path = std::env::temp_dir().join(format!(
        "metro_flats_{tag}_{}.sqlite",
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ));

    let db = Database::new(path.to_string_lossy().to_string());
    init_offers_db(&db).unwrap_or_else(|e| panic!("Database initialization failed: {e}"));
    db
}
