pub mod parse;

pub use parse::{parse_csv, parse_json};

use anyhow::{Context, Result};
use std::collections::HashSet;
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::config::SourceConfig;
use crate::listing::Listing;

/// Load listings from every configured source, then de-duplicate by id.
///
/// A source that matches no files is skipped with a warning. A file that
/// cannot be read or parsed fails its source; the call only fails when no
/// source succeeded.
pub fn load_listings(sources: &[SourceConfig]) -> Result<Vec<Listing>> {
    let mut all_listings = Vec::new();
    let mut any_succeeded = false;
    let mut last_error = None;

    for source in sources {
        match load_source(source) {
            Ok(listings) => {
                debug!(
                    source = source.display_name(),
                    count = listings.len(),
                    "loaded listings"
                );
                all_listings.extend(listings);
                any_succeeded = true;
            }
            Err(e) => {
                warn!(source = source.display_name(), "source failed: {:#}", e);
                last_error = Some(e);
            }
        }
    }

    if !any_succeeded {
        if let Some(e) = last_error {
            return Err(e.context("All listing sources failed"));
        }
    }

    let unique = dedupe_by_id(all_listings);
    debug!(count = unique.len(), "after de-duplication");
    Ok(unique)
}

/// Load every file matched by one source's glob pattern, in path order.
pub fn load_source(source: &SourceConfig) -> Result<Vec<Listing>> {
    let paths = resolve_paths(&source.path)?;
    if paths.is_empty() {
        warn!(pattern = %source.path, "no files matched");
    }

    let mut listings = Vec::new();
    for path in paths {
        let loaded = load_file(&path)?;
        debug!(path = %path.display(), count = loaded.len(), "read listing file");
        listings.extend(loaded);
    }
    Ok(listings)
}

fn resolve_paths(pattern: &str) -> Result<Vec<PathBuf>> {
    let mut paths = glob::glob(pattern)
        .with_context(|| format!("Invalid source pattern '{}'", pattern))?
        .collect::<Result<Vec<_>, _>>()
        .with_context(|| format!("Failed to read paths matching '{}'", pattern))?;
    paths.retain(|p| p.is_file());
    paths.sort();
    Ok(paths)
}

/// Parse a single export file; `.csv` files as CSV, anything else as a JSON array.
pub fn load_file(path: &Path) -> Result<Vec<Listing>> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open listing file at {}", path.display()))?;

    let is_csv = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));

    let listings = if is_csv {
        parse_csv(file)
    } else {
        parse_json(file)
    };
    listings.with_context(|| format!("Failed to parse listings in {}", path.display()))
}

/// Drop repeated ids, keeping the first occurrence. Listings without an id are kept.
pub fn dedupe_by_id(listings: Vec<Listing>) -> Vec<Listing> {
    let mut seen_ids = HashSet::new();
    listings
        .into_iter()
        .filter(|listing| match listing.id.as_deref() {
            Some(id) if !id.trim().is_empty() => seen_ids.insert(id.trim().to_string()),
            _ => true,
        })
        .collect()
}
