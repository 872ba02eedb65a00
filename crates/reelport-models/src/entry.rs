use serde::{Deserialize, Serialize};

/// One data row from an IMDb list export.
///
/// `rating` is only populated for rows from ratings.csv; the watchlist export
/// has no rating column.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExportEntry {
    /// IMDb title id (the `Const` column, e.g. "tt0111161")
    pub imdb_id: String,
    pub title: String,
    /// Raw IMDb `Title Type` string ("Movie", "TV Series", ...)
    pub title_type: String,
    pub year: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<u8>,
}
