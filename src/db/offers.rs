use crate::db::connection::Database;
use crate::domain::{NormalizedOffer, OfferRow};
use crate::errors::AppError;
use chrono::Utc;
use rusqlite::{params, OptionalExtension};
use std::collections::HashSet;

/// Ids of every offer already appended, for the discovery dedup pass.
pub fn existing_ids(db: &Database) -> Result<HashSet<String>, AppError> {
    db.with_conn(|conn| {
        let mut stmt = conn
            .prepare("SELECT offer_id FROM offers")
            .map_err(|e| AppError::Db(e.to_string()))?;

        let rows = stmt
            .query_map([], |row| row.get::<_, String>(0))
            .map_err(|e| AppError::Db(e.to_string()))?;

        let mut ids = HashSet::new();
        for row in rows {
            ids.insert(row.map_err(|e| AppError::Db(e.to_string()))?);
        }
        Ok(ids)
    })
}

pub fn offer_exists(db: &Database, offer_id: &str) -> Result<bool, AppError> {
    db.with_conn(|conn| {
        conn.query_row(
            "SELECT 1 FROM offers WHERE offer_id = ?1 LIMIT 1",
            params![offer_id],
            |_| Ok(()),
        )
        .optional()
        .map(|row| row.is_some())
        .map_err(|e| AppError::Db(e.to_string()))
    })
}

/// Append-only; the status marker is derived from the proximity flag
/// here, at write time. Uniqueness is the caller's job (discovery checks
/// existing ids first). Two invocations racing past that check would
/// both append; acceptable for a single-operator tool.
pub fn append_offer(db: &Database, offer: &NormalizedOffer) -> Result<(), AppError> {
    let now = Utc::now().naive_utc();

    db.with_conn(|conn| {
        conn.execute(
            r#"
            INSERT INTO offers (
                status, closest_station, base_cost, total_cost, url,
                area, address, walking_time, transit_time, rent,
                offer_id, slug, available_from, total_monthly_cost, key_advantages,
                latitude, longitude, distance_km, appended_at
            ) VALUES (
                ?1, ?2, ?3, ?4, ?5,
                ?6, ?7, ?8, ?9, ?10,
                ?11, ?12, ?13, ?14, ?15,
                ?16, ?17, ?18, ?19
            )
            "#,
            params![
                offer.status_marker(),
                offer.closest_station,
                offer.base_cost,
                offer.total_cost,
                offer.url,
                offer.area,
                offer.address,
                offer.walking_time,
                offer.transit_time,
                offer.rent,
                offer.id,
                offer.slug,
                offer.available_from,
                offer.total_monthly_cost,
                offer.key_advantages,
                offer.latitude,
                offer.longitude,
                offer.distance_km,
                now,
            ],
        )
        .map_err(|e| AppError::Db(e.to_string()))?;
        Ok(())
    })
}

/// Every stored offer in append order, shaped for the spreadsheet.
pub fn all_offers(db: &Database) -> Result<Vec<OfferRow>, AppError> {
    db.with_conn(|conn| {
        let mut stmt = conn
            .prepare(
                r#"
                SELECT
                    status,             -- 0
                    closest_station,    -- 1
                    base_cost,          -- 2
                    total_cost,         -- 3
                    url,                -- 4
                    area,               -- 5
                    address,            -- 6
                    walking_time,       -- 7
                    transit_time,       -- 8
                    rent,               -- 9
                    offer_id,           -- 10
                    slug,               -- 11
                    available_from,     -- 12
                    total_monthly_cost, -- 13
                    key_advantages      -- 14
                FROM offers
                ORDER BY appended_at, rowid
                "#,
            )
            .map_err(|e| AppError::Db(e.to_string()))?;

        let rows = stmt
            .query_map([], |row| {
                Ok(OfferRow {
                    status: row.get(0)?,
                    closest_station: row.get(1)?,
                    base_cost: row.get(2)?,
                    total_cost: row.get(3)?,
                    url: row.get(4)?,
                    area: row.get(5)?,
                    address: row.get(6)?,
                    walking_time: row.get(7)?,
                    transit_time: row.get(8)?,
                    rent: row.get(9)?,
                    offer_id: row.get(10)?,
                    slug: row.get(11)?,
                    available_from: row.get(12)?,
                    total_monthly_cost: row.get(13)?,
                    key_advantages: row.get(14)?,
                })
            })
            .map_err(|e| AppError::Db(e.to_string()))?;

        let mut results = Vec::new();
        for row in rows {
            results.push(row.map_err(|e| AppError::Db(e.to_string()))?);
        }
        Ok(results)
    })
}
