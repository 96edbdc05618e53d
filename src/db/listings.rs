use crate::db::connection::Database;
use crate::domain::listing::{Listing, ListingTable};
use crate::errors::DbError;
use chrono::Utc;
use rusqlite::{params, Connection};

/// Upserts every row, keyed by listing link. Re-seen listings keep their
/// `first_seen_at` and get the latest scraped values.
pub fn save_listings(db: &Database, table: &ListingTable, search_url: &str) -> Result<usize, DbError> {
    let now = Utc::now().naive_utc();

    db.with_conn(|conn| {
        let tx = conn.transaction()?;

        for listing in table.rows() {
            let amenities = listing
                .amenities
                .as_ref()
                .map(serde_json::to_string)
                .transpose()?;

            tx.execute(
                r#"
                INSERT INTO listings (
                    link, date, title, price,
                    bedrooms, sqft, neighborhood,
                    bathrooms, amenities,
                    search_url, first_seen_at, last_seen_at
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?11)
                ON CONFLICT(link) DO UPDATE SET
                    date = excluded.date,
                    title = excluded.title,
                    price = excluded.price,
                    bedrooms = excluded.bedrooms,
                    sqft = excluded.sqft,
                    neighborhood = excluded.neighborhood,
                    bathrooms = excluded.bathrooms,
                    amenities = excluded.amenities,
                    search_url = excluded.search_url,
                    last_seen_at = excluded.last_seen_at
                "#,
                params![
                    listing.link,
                    listing.date,
                    listing.title,
                    listing.price,
                    listing.bedrooms,
                    listing.sqft,
                    listing.neighborhood,
                    listing.bathrooms,
                    amenities,
                    search_url,
                    now,
                ],
            )?;
        }

        tx.commit()?;
        Ok(table.len())
    })
}

pub fn load_listings(db: &Database) -> Result<Vec<Listing>, DbError> {
    db.with_conn(|conn| query_listings(conn))
}

fn query_listings(conn: &Connection) -> Result<Vec<Listing>, DbError> {
    let mut stmt = conn.prepare(
        r#"
        SELECT date, title, link, price, bedrooms, sqft, neighborhood, bathrooms, amenities
        FROM listings
        ORDER BY first_seen_at, link
        "#,
    )?;

    let rows = stmt.query_map([], |row| {
        Ok((
            Listing {
                date: row.get(0)?,
                title: row.get(1)?,
                link: row.get(2)?,
                price: row.get(3)?,
                bedrooms: row.get(4)?,
                sqft: row.get(5)?,
                neighborhood: row.get(6)?,
                bathrooms: row.get(7)?,
                amenities: None,
            },
            row.get::<_, Option<String>>(8)?,
        ))
    })?;

    let mut out = Vec::new();
    for r in rows {
        let (mut listing, amenities) = r?;
        listing.amenities = amenities
            .as_deref()
            .map(serde_json::from_str)
            .transpose()?;
        out.push(listing);
    }
    Ok(out)
}
