use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of title as JustWatch models it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum TitleKind {
    Movie,
    Show,
}

impl TitleKind {
    /// Derive the JustWatch kind from an IMDb `Title Type` string.
    ///
    /// Keyword matching instead of an exhaustive list: "Movie" catches
    /// "TV Movie", "Series" catches "TV Series" and "TV Mini Series".
    /// Returns None for types JustWatch has no list equivalent for
    /// (episodes, shorts, video games, ...).
    pub fn from_imdb_title_type(title_type: &str) -> Option<Self> {
        if title_type.contains("Movie") {
            Some(TitleKind::Movie)
        } else if title_type.contains("Series") {
            Some(TitleKind::Show)
        } else {
            None
        }
    }

    /// GraphQL `objectType` value for the search filter.
    pub fn object_type(&self) -> &'static str {
        match self {
            TitleKind::Movie => "MOVIE",
            TitleKind::Show => "SHOW",
        }
    }
}

impl fmt::Display for TitleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.object_type())
    }
}
