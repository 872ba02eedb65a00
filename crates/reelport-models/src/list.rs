use serde::{Deserialize, Serialize};
use std::fmt;

/// Which JustWatch list an import run writes to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ListKind {
    /// Titles the user plans to watch (from watchlist.csv)
    Watchlist,
    /// Titles the user has seen (from ratings.csv)
    Seenlist,
}

impl fmt::Display for ListKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListKind::Watchlist => f.write_str("watchlist"),
            ListKind::Seenlist => f.write_str("seenlist"),
        }
    }
}
