use anyhow::{Context, Result};
use std::io::Read;

use crate::listing::Listing;

/// Parse a JSON array of listing records.
pub fn parse_json<R: Read>(reader: R) -> Result<Vec<Listing>> {
    serde_json::from_reader(reader).context("Expected a JSON array of listings")
}

/// Parse CSV with a header row naming listing fields. Empty cells are absent.
pub fn parse_csv<R: Read>(reader: R) -> Result<Vec<Listing>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);
    let mut listings = Vec::new();

    for (i, record) in csv_reader.deserialize::<Listing>().enumerate() {
        // Row 1 is the header
        let listing = record.with_context(|| format!("Invalid CSV row {}", i + 2))?;
        listings.push(listing);
    }

    Ok(listings)
}
