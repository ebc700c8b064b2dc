use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use std::fs;
use std::io::Write;
use std::path::Path;

use crate::listing::Listing;
use crate::rank::ScoredListing;

/// Listings in rank order with `score` set from the current scoring run.
pub fn with_scores(scored: &[ScoredListing]) -> Vec<Listing> {
    scored
        .iter()
        .map(|s| Listing {
            score: Some(s.result.score),
            ..s.listing.clone()
        })
        .collect()
}

/// Write scored listings to `path` as a JSON array, atomically.
///
/// The file is either fully replaced or left untouched. Creates the parent
/// directory if it doesn't exist.
pub fn export_scored(path: &Path, scored: &[ScoredListing]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;

    serde_json::to_writer_pretty(&mut file, &with_scores(scored))
        .context("Failed to serialize scored listings")?;
    file.write_all(b"\n")
        .context("Failed to write scored listings")?;

    file.commit()
        .with_context(|| format!("Failed to save scored listings to {}", path.display()))?;

    Ok(())
}
