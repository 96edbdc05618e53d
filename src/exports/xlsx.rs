// exports/xlsx.rs
use crate::domain::listing::{ListingTable, COLUMNS};
use crate::errors::ExportError;
use rust_xlsxwriter::{Workbook, Worksheet};
use std::path::Path;

/// Writes the table to a workbook: header row, then one row per listing.
/// Missing values are left blank.
pub fn export_listings_xlsx(table: &ListingTable, path: &Path) -> Result<(), ExportError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    for (col, header) in COLUMNS.iter().enumerate() {
        worksheet
            .write_string(0, col as u16, *header)
            .map_err(|e| {
                ExportError::Xlsx(format!("Failed to write header '{}': {}", header, e))
            })?;
    }

    for (i, listing) in table.rows().iter().enumerate() {
        let r = (i + 1) as u32;

        write_text(worksheet, r, 0, &listing.date, "date")?;
        write_text(worksheet, r, 1, &listing.title, "title")?;
        write_text(worksheet, r, 2, &listing.link, "link")?;

        worksheet
            .write_number(r, 3, listing.price as f64)
            .map_err(|e| ExportError::Xlsx(format!("Failed to write price: {}", e)))?;

        if let Some(brs) = listing.bedrooms {
            worksheet
                .write_number(r, 4, brs as f64)
                .map_err(|e| ExportError::Xlsx(format!("Failed to write bedrooms: {}", e)))?;
        }

        if let Some(sqft) = listing.sqft {
            worksheet
                .write_number(r, 5, sqft as f64)
                .map_err(|e| ExportError::Xlsx(format!("Failed to write sqft: {}", e)))?;
        }

        if let Some(hood) = &listing.neighborhood {
            write_text(worksheet, r, 6, hood, "neighborhood")?;
        }

        if let Some(bath) = &listing.bathrooms {
            write_text(worksheet, r, 7, bath, "bathrooms")?;
        }

        if let Some(amenities) = &listing.amenities {
            write_text(worksheet, r, 8, &amenities.join(", "), "amenities")?;
        }
    }

    workbook
        .save(path)
        .map_err(|e| ExportError::Xlsx(format!("Failed to save workbook: {}", e)))?;

    Ok(())
}

fn write_text(
    worksheet: &mut Worksheet,
    row: u32,
    col: u16,
    value: &str,
    what: &str,
) -> Result<(), ExportError> {
    worksheet
        .write_string(row, col, value)
        .map_err(|e| ExportError::Xlsx(format!("Failed to write {what}: {e}")))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::listing::Listing;

    #[test]
    fn workbook_is_written() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("listings.xlsx");

        let table: ListingTable = vec![Listing {
            date: "Jun 3".to_string(),
            title: "Loft".to_string(),
            link: "https://x/1.html".to_string(),
            price: 3100,
            bedrooms: Some(2),
            sqft: None,
            neighborhood: Some("soma".to_string()),
            bathrooms: None,
            amenities: Some(vec!["gym".to_string(), "no smoking".to_string()]),
        }]
        .into_iter()
        .collect();

        export_listings_xlsx(&table, &path).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        // xlsx is a zip container
        assert_eq!(&bytes[..2], b"PK");
    }
}
