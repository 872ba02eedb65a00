use reelport_models::ListKind;
use serde::Serialize;

/// Final state of one export row after the pipeline ran over it.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RowOutcome {
    /// Looked up and mutated successfully
    Added { title_id: String },
    /// Search returned no candidates; no mutation attempted
    NotFound,
    /// Row never reached the remote service (e.g. unsupported title type)
    Skipped { reason: String },
    /// Lookup or mutation failed
    Failed { reason: String },
}

#[derive(Debug, Clone, Serialize)]
pub struct RowReport {
    /// 1-based data-row number, matching file order
    pub row: usize,
    pub imdb_id: String,
    pub title: String,
    #[serde(flatten)]
    pub outcome: RowOutcome,
}

/// Structured record of an import run. Per-row progress streams through
/// tracing as it happens; this is the machine-readable aggregate that
/// `--output json` prints and tests assert on.
#[derive(Debug, Serialize)]
pub struct ImportReport {
    pub list: ListKind,
    pub rows: Vec<RowReport>,
    /// Set when the batch stopped early; remaining rows are absent from
    /// `rows` entirely.
    pub aborted: Option<String>,
}

impl ImportReport {
    pub fn new(list: ListKind) -> Self {
        Self {
            list,
            rows: Vec::new(),
            aborted: None,
        }
    }

    pub fn record(&mut self, row: RowReport) {
        self.rows.push(row);
    }

    pub fn added(&self) -> usize {
        self.count(|o| matches!(o, RowOutcome::Added { .. }))
    }

    pub fn not_found(&self) -> usize {
        self.count(|o| matches!(o, RowOutcome::NotFound))
    }

    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, RowOutcome::Skipped { .. }))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, RowOutcome::Failed { .. }))
    }

    fn count(&self, pred: impl Fn(&RowOutcome) -> bool) -> usize {
        self.rows.iter().filter(|r| pred(&r.outcome)).count()
    }
}
