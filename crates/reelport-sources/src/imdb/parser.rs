use anyhow::{anyhow, Result};
use csv::ReaderBuilder;
use reelport_models::ExportEntry;
use std::collections::HashMap;
use std::fs::File;
use std::path::Path;
use tracing::warn;

/// Parse an IMDb watchlist CSV into entries, in file order.
///
/// Columns are looked up by header name, not position, so IMDb reordering
/// the export doesn't break anything silently. A missing required column is
/// a hard error; a broken row is logged and skipped.
pub fn parse_watchlist_csv<P: AsRef<Path>>(path: P) -> Result<Vec<ExportEntry>> {
    parse_export_csv(path, &[])
}

/// Parse an IMDb ratings CSV. Same layout contract as the watchlist plus a
/// `Your Rating` column; an unparseable rating degrades to None rather than
/// dropping the row, since the seenlist import only needs the title.
pub fn parse_ratings_csv<P: AsRef<Path>>(path: P) -> Result<Vec<ExportEntry>> {
    parse_export_csv(path, &["Your Rating"])
}

fn parse_export_csv<P: AsRef<Path>>(path: P, extra_required: &[&str]) -> Result<Vec<ExportEntry>> {
    let file = File::open(path.as_ref())?;
    // flexible: under-width rows surface as missing cells we can skip,
    // instead of failing the whole parse
    let mut reader = ReaderBuilder::new().flexible(true).from_reader(file);
    let mut entries = Vec::new();

    let headers = reader.headers()?.clone();
    let header_map: HashMap<String, usize> = headers
        .iter()
        .enumerate()
        .map(|(i, h)| (h.to_string(), i))
        .collect();

    let available_columns: Vec<String> = headers.iter().map(|h| h.to_string()).collect();
    tracing::debug!("Available CSV columns: {:?}", available_columns);

    let mut required = vec!["Const", "Title", "Title Type", "Year"];
    required.extend_from_slice(extra_required);
    for col in &required {
        if !header_map.contains_key(*col) {
            return Err(anyhow!(
                "Missing required column: {}. Available columns: {:?}",
                col,
                available_columns
            ));
        }
    }

    let rating_idx = header_map.get("Your Rating").copied();

    let mut row_count = 0;
    for result in reader.records() {
        row_count += 1;
        // +1 for the header line
        let line = row_count + 1;

        let record = match result {
            Ok(record) => record,
            Err(e) => {
                warn!(line, "Skipping malformed row: {}", e);
                continue;
            }
        };

        let imdb_id = record.get(header_map["Const"]).unwrap_or("").trim();
        let title = record.get(header_map["Title"]).unwrap_or("").trim();
        let title_type = record.get(header_map["Title Type"]).unwrap_or("").trim();
        let year_str = record.get(header_map["Year"]).unwrap_or("").trim();

        if imdb_id.is_empty() || title.is_empty() {
            warn!(line, "Skipping row with empty Const or Title");
            continue;
        }

        let year = match year_str.parse::<u32>() {
            Ok(y) => Some(y),
            Err(_) if year_str.is_empty() => None,
            Err(_) => {
                warn!(line, title, year = year_str, "Invalid year, searching without it");
                None
            }
        };

        let rating = rating_idx.and_then(|idx| {
            let raw = record.get(idx).unwrap_or("").trim();
            match raw.parse::<u8>() {
                Ok(r) => Some(r),
                Err(_) => {
                    if !raw.is_empty() {
                        warn!(line, title, rating = raw, "Invalid rating value, ignoring");
                    }
                    None
                }
            }
        });

        entries.push(ExportEntry {
            imdb_id: imdb_id.to_string(),
            title: title.to_string(),
            title_type: title_type.to_string(),
            year,
            rating,
        });
    }

    tracing::info!(
        "Parsed {} total rows, {} usable entries",
        row_count,
        entries.len()
    );
    Ok(entries)
}
