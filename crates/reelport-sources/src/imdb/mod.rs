pub mod parser;

pub use parser::{parse_ratings_csv, parse_watchlist_csv};
