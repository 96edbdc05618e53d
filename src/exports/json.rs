// exports/json.rs
use crate::domain::listing::ListingTable;
use crate::errors::ExportError;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Array of listing records; missing values serialize as `null`.
pub fn export_listings_json(table: &ListingTable, path: &Path) -> Result<(), ExportError> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, table)?;
    Ok(())
}
