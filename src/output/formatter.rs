use std::io::IsTerminal;

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use terminal_size::{terminal_size, Width};

use crate::rank::ScoredListing;
use crate::scoring::{LabelColor, ScoreLabel};

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Paint `text` in the color token of `label`
pub fn paint_label(label: ScoreLabel, text: &str, use_colors: bool) -> String {
    if !use_colors {
        return text.to_string();
    }
    match label.color() {
        LabelColor::Red => text.red().bold().to_string(),
        LabelColor::Orange => text.yellow().to_string(),
        LabelColor::Blue => text.blue().to_string(),
        LabelColor::Slate => text.bright_black().to_string(),
    }
}

/// "today", "3d ago", "in 2d", or "-" when the expiry is unknown
pub fn format_expiry(days_since: Option<i64>) -> String {
    match days_since {
        None => "-".to_string(),
        Some(0) => "today".to_string(),
        Some(d) if d < 0 => format!("in {}d", -d),
        Some(d) => format!("{}d ago", d),
    }
}

/// Whole-dollar price with thousands separators, "unknown" when absent
pub fn format_price(price: Option<f64>) -> String {
    let Some(price) = price.filter(|p| p.is_finite() && *p != 0.0) else {
        return "unknown".to_string();
    };
    let whole = price.abs().round() as u64;
    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if price < 0.0 {
        format!("-${}", grouped)
    } else {
        format!("${}", grouped)
    }
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate text to fit available width, accounting for Unicode
fn truncate(text: &str, max_width: usize) -> String {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= max_width {
        text.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

/// Format listings as a ranked table: Index, Score, Label, Expiry, Listing
/// No headers. Index column is 3 chars ("99."), right-aligned.
pub fn format_scored_table(listings: &[ScoredListing], use_colors: bool) -> String {
    if listings.is_empty() {
        return "No listings found.".to_string();
    }

    let term_width = get_terminal_width();

    let index_width = 3;
    let score_width = 3;
    let label_width = 4;
    let expiry_width = 8;
    let separator = "  ";
    let fixed_width =
        index_width + 1 + score_width + label_width + expiry_width + separator.len() * 3;

    listings
        .iter()
        .enumerate()
        .map(|(idx, scored)| {
            let index_str = format!("{:>2}.", idx + 1);
            let score_str = format!("{:>width$}", scored.result.score, width = score_width);
            let label_str = format!(
                "{:<width$}",
                scored.result.label.as_str(),
                width = label_width
            );
            let expiry_str = format!(
                "{:>width$}",
                format_expiry(scored.days_since_expiry),
                width = expiry_width
            );

            let name = scored.listing.display_name();
            let name = match term_width {
                Some(width) if width > fixed_width + 10 => truncate(&name, width - fixed_width),
                // Very narrow terminal
                Some(_) => truncate(&name, 20),
                // No terminal (pipe), don't truncate
                None => name,
            };

            if use_colors {
                format!(
                    "{} {}{}{}{}{}{}{}",
                    index_str.dimmed(),
                    score_str.bold(),
                    separator,
                    paint_label(scored.result.label, &label_str, true),
                    separator,
                    expiry_str.dimmed(),
                    separator,
                    name
                )
            } else {
                format!(
                    "{} {}{}{}{}{}{}{}",
                    index_str, score_str, separator, label_str, separator, expiry_str, separator, name
                )
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format listings as tab-separated values for scripting
/// Columns: score, label, address, city, id (no headers, no colors)
pub fn format_tsv(listings: &[ScoredListing]) -> String {
    listings
        .iter()
        .map(|scored| {
            let listing = &scored.listing;
            format!(
                "{}\t{}\t{}\t{}\t{}",
                scored.result.score,
                scored.result.label,
                listing.address.as_deref().unwrap_or(""),
                listing.city.as_deref().unwrap_or(""),
                listing.id.as_deref().unwrap_or("")
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format listings as a pretty JSON array of {listing, score, label, breakdown}
pub fn format_json(listings: &[ScoredListing]) -> Result<String> {
    serde_json::to_string_pretty(listings).context("Failed to serialize scored listings")
}

/// Format a single listing with its factor breakdown (multi-line)
pub fn format_listing_detail(scored: &ScoredListing, use_colors: bool) -> String {
    let listing = &scored.listing;
    let result = &scored.result;

    let title = listing.display_name();
    let title = if use_colors {
        title.bold().to_string()
    } else {
        title
    };
    let score_line = paint_label(
        result.label,
        &format!("{} ({})", result.score, result.label),
        use_colors,
    );
    let expiry = match listing.expiry_date.as_deref() {
        Some(raw) => format!("{} ({})", raw, format_expiry(scored.days_since_expiry)),
        None => "unknown".to_string(),
    };
    let property_type = listing
        .property_type
        .map(|t| t.as_str())
        .unwrap_or("unknown");
    let owner = [
        ("name", listing.has_owner_name()),
        ("phone", listing.has_owner_phone()),
        ("email", listing.has_owner_email()),
    ]
    .iter()
    .filter(|(_, present)| *present)
    .map(|(field, _)| *field)
    .collect::<Vec<_>>();
    let owner = if owner.is_empty() {
        "none".to_string()
    } else {
        owner.join(", ")
    };

    let mut lines = vec![
        title,
        format!("  Score: {}", score_line),
        format!("  Expiry: {}", expiry),
        format!("  Price: {}", format_price(listing.price)),
        format!("  Type: {}", property_type),
        format!("  Owner info: {}", owner),
        format!("  City: {}", listing.city.as_deref().unwrap_or("unknown")),
        "  Breakdown:".to_string(),
    ];

    for c in &result.breakdown {
        lines.push(format!(
            "    {:<18} {:>3} x {:>2}% = {:>3}",
            c.label(),
            c.score,
            c.weight,
            c.contribution
        ));
    }

    let total = result.breakdown_total();
    lines.push(format!("    {:<18} {:>13}", "Total", total));
    if total != result.score as u32 {
        lines.push(format!(
            "    (per-factor rounding; the score rounds the exact total to {})",
            result.score
        ));
    }

    lines.join("\n")
}
