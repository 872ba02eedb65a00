use crate::title::TitleKind;
use serde::{Deserialize, Serialize};

/// A title resolved against JustWatch search.
///
/// `id` is JustWatch's internal object id (e.g. "tm92641") and is the only
/// field the mutation calls need; title/year/kind are kept for logging.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResolvedTitle {
    pub id: String,
    pub title: String,
    pub year: Option<u32>,
    pub kind: TitleKind,
}
