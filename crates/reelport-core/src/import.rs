use crate::pacer::Pacer;
use crate::report::{ImportReport, RowOutcome, RowReport};
use reelport_models::{ExportEntry, ListKind, TitleKind};
use reelport_sources::{ServiceError, TitleCatalog};
use tracing::{error, info, warn};

/// Replay parsed export rows against the remote catalog, one row at a time,
/// in file order.
///
/// Per-row failures never stop the batch; the one exception is a rejected
/// auth token, which would fail every remaining call identically, so the
/// run aborts on its first occurrence and says so in the report.
pub async fn run_import(
    catalog: &dyn TitleCatalog,
    pacer: &dyn Pacer,
    list: ListKind,
    entries: &[ExportEntry],
) -> ImportReport {
    let mut report = ImportReport::new(list);
    let mut made_remote_call = false;

    info!(%list, rows = entries.len(), "Starting import");

    for (index, entry) in entries.iter().enumerate() {
        let row = index + 1;

        let Some(kind) = TitleKind::from_imdb_title_type(&entry.title_type) else {
            warn!(row, title = %entry.title, title_type = %entry.title_type, "Unsupported title type, skipping");
            report.record(row_report(row, entry, RowOutcome::Skipped {
                reason: format!("unsupported title type '{}'", entry.title_type),
            }));
            continue;
        };

        if made_remote_call {
            pacer.pause().await;
        }
        let lookup = catalog.lookup_title(&entry.title, kind, entry.year).await;
        made_remote_call = true;

        let resolved = match lookup {
            Ok(Some(resolved)) => resolved,
            Ok(None) => {
                warn!(row, title = %entry.title, "No match on JustWatch, skipping");
                report.record(row_report(row, entry, RowOutcome::NotFound));
                continue;
            }
            Err(e) => {
                error!(row, title = %entry.title, "Lookup failed: {}", e);
                let aborting = e.is_auth();
                report.record(row_report(row, entry, RowOutcome::Failed {
                    reason: e.to_string(),
                }));
                if aborting {
                    abort(&mut report, e);
                    break;
                }
                continue;
            }
        };

        pacer.pause().await;
        match catalog.set_in_list(list, &resolved.id).await {
            Ok(()) => {
                info!(row, title = %entry.title, id = %resolved.id, "Added to {}", list);
                report.record(row_report(row, entry, RowOutcome::Added {
                    title_id: resolved.id,
                }));
            }
            Err(e) => {
                error!(row, title = %entry.title, id = %resolved.id, "Mutation failed: {}", e);
                let aborting = e.is_auth();
                report.record(row_report(row, entry, RowOutcome::Failed {
                    reason: e.to_string(),
                }));
                if aborting {
                    abort(&mut report, e);
                    break;
                }
            }
        }
    }

    info!(
        %list,
        added = report.added(),
        not_found = report.not_found(),
        skipped = report.skipped(),
        failed = report.failed(),
        "Import finished"
    );
    report
}

fn abort(report: &mut ImportReport, cause: ServiceError) {
    error!("Aborting batch: {}", cause);
    report.aborted = Some(cause.to_string());
}

fn row_report(row: usize, entry: &ExportEntry, outcome: RowOutcome) -> RowReport {
    RowReport {
        row,
        imdb_id: entry.imdb_id.clone(),
        title: entry.title.clone(),
        outcome,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pacer::NoopPacer;
    use async_trait::async_trait;
    use reelport_models::ResolvedTitle;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    fn entry(imdb_id: &str, title: &str, title_type: &str) -> ExportEntry {
        ExportEntry {
            imdb_id: imdb_id.to_string(),
            title: title.to_string(),
            title_type: title_type.to_string(),
            year: Some(2000),
            rating: None,
        }
    }

    /// Scripted catalog: resolves titles from a fixed table and records
    /// every call it receives.
    #[derive(Default)]
    struct FakeCatalog {
        known: Vec<(String, String)>,
        lookups: Mutex<Vec<String>>,
        mutations: Mutex<Vec<(ListKind, String)>>,
        fail_lookup_with: Mutex<Option<fn() -> ServiceError>>,
    }

    impl FakeCatalog {
        fn with_title(mut self, title: &str, id: &str) -> Self {
            self.known.push((title.to_string(), id.to_string()));
            self
        }

        fn failing_lookups(self, f: fn() -> ServiceError) -> Self {
            *self.fail_lookup_with.lock().unwrap() = Some(f);
            self
        }

        fn lookup_count(&self) -> usize {
            self.lookups.lock().unwrap().len()
        }

        fn mutations(&self) -> Vec<(ListKind, String)> {
            self.mutations.lock().unwrap().clone()
        }

        fn total_calls(&self) -> usize {
            self.lookup_count() + self.mutations.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl TitleCatalog for FakeCatalog {
        async fn lookup_title(
            &self,
            title: &str,
            kind: TitleKind,
            year: Option<u32>,
        ) -> Result<Option<ResolvedTitle>, ServiceError> {
            self.lookups.lock().unwrap().push(title.to_string());
            if let Some(f) = *self.fail_lookup_with.lock().unwrap() {
                return Err(f());
            }
            Ok(self
                .known
                .iter()
                .find(|(t, _)| t == title)
                .map(|(t, id)| ResolvedTitle {
                    id: id.clone(),
                    title: t.clone(),
                    year,
                    kind,
                }))
        }

        async fn set_in_list(
            &self,
            list: ListKind,
            title_id: &str,
        ) -> Result<(), ServiceError> {
            self.mutations
                .lock()
                .unwrap()
                .push((list, title_id.to_string()));
            Ok(())
        }
    }

    /// Pacer that counts how often the runner paused.
    #[derive(Default)]
    struct CountingPacer {
        pauses: AtomicUsize,
    }

    #[async_trait]
    impl Pacer for CountingPacer {
        async fn pause(&self) {
            self.pauses.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[tokio::test]
    async fn test_watchlist_row_added_exactly_once() {
        let catalog = FakeCatalog::default().with_title("Example Movie", "jw-99");
        let entries = vec![entry("tt1234567", "Example Movie", "Movie")];

        let report =
            run_import(&catalog, &NoopPacer, ListKind::Watchlist, &entries).await;

        assert_eq!(catalog.lookup_count(), 1);
        assert_eq!(
            catalog.mutations(),
            vec![(ListKind::Watchlist, "jw-99".to_string())]
        );
        assert_eq!(report.added(), 1);
        assert_eq!(report.rows.len(), 1);
        assert_eq!(
            report.rows[0].outcome,
            RowOutcome::Added {
                title_id: "jw-99".to_string()
            }
        );
        assert!(report.aborted.is_none());
    }

    #[tokio::test]
    async fn test_not_found_issues_no_mutation() {
        let catalog = FakeCatalog::default();
        let entries = vec![entry("tt0000001", "Obscure Film", "Movie")];

        let report =
            run_import(&catalog, &NoopPacer, ListKind::Watchlist, &entries).await;

        assert_eq!(catalog.lookup_count(), 1);
        assert!(catalog.mutations().is_empty());
        assert_eq!(report.not_found(), 1);
    }

    #[tokio::test]
    async fn test_unsupported_type_makes_no_remote_call() {
        let catalog = FakeCatalog::default().with_title("Some Game", "jw-1");
        let entries = vec![entry("tt0000002", "Some Game", "Video Game")];

        let report =
            run_import(&catalog, &NoopPacer, ListKind::Watchlist, &entries).await;

        assert_eq!(catalog.total_calls(), 0);
        assert_eq!(report.skipped(), 1);
    }

    #[tokio::test]
    async fn test_network_error_continues_batch() {
        struct FlakyCatalog {
            calls: AtomicUsize,
        }

        #[async_trait]
        impl TitleCatalog for FlakyCatalog {
            async fn lookup_title(
                &self,
                _title: &str,
                kind: TitleKind,
                year: Option<u32>,
            ) -> Result<Option<ResolvedTitle>, ServiceError> {
                // First lookup blows up, second succeeds
                if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
                    Err(ServiceError::Api("HTTP 500: server error".to_string()))
                } else {
                    Ok(Some(ResolvedTitle {
                        id: "jw-2".to_string(),
                        title: "Second".to_string(),
                        year,
                        kind,
                    }))
                }
            }

            async fn set_in_list(
                &self,
                _list: ListKind,
                _title_id: &str,
            ) -> Result<(), ServiceError> {
                Ok(())
            }
        }

        let catalog = FlakyCatalog {
            calls: AtomicUsize::new(0),
        };
        let entries = vec![
            entry("tt0000003", "First", "Movie"),
            entry("tt0000004", "Second", "Movie"),
        ];

        let report =
            run_import(&catalog, &NoopPacer, ListKind::Seenlist, &entries).await;

        assert_eq!(report.rows.len(), 2);
        assert_eq!(report.failed(), 1);
        assert_eq!(report.added(), 1);
        assert!(report.aborted.is_none());
    }

    #[tokio::test]
    async fn test_auth_error_aborts_batch() {
        let catalog = FakeCatalog::default()
            .failing_lookups(|| ServiceError::Auth { status: 401 });
        let entries = vec![
            entry("tt0000005", "First", "Movie"),
            entry("tt0000006", "Second", "Movie"),
            entry("tt0000007", "Third", "Movie"),
        ];

        let report =
            run_import(&catalog, &NoopPacer, ListKind::Watchlist, &entries).await;

        // Only the first row was touched before the abort
        assert_eq!(catalog.lookup_count(), 1);
        assert_eq!(report.rows.len(), 1);
        assert_eq!(report.failed(), 1);
        assert!(report.aborted.is_some());
    }

    #[tokio::test]
    async fn test_duplicate_rows_are_not_deduplicated() {
        let catalog = FakeCatalog::default().with_title("Example Movie", "jw-99");
        let entries = vec![
            entry("tt1234567", "Example Movie", "Movie"),
            entry("tt1234567", "Example Movie", "Movie"),
        ];

        let report =
            run_import(&catalog, &NoopPacer, ListKind::Watchlist, &entries).await;

        assert_eq!(catalog.lookup_count(), 2);
        assert_eq!(catalog.mutations().len(), 2);
        assert_eq!(report.added(), 2);
    }

    #[tokio::test]
    async fn test_pacer_runs_between_every_pair_of_calls() {
        let catalog = FakeCatalog::default()
            .with_title("One", "jw-1")
            .with_title("Two", "jw-2")
            .with_title("Three", "jw-3");
        let pacer = CountingPacer::default();
        let entries = vec![
            entry("tt0000008", "One", "Movie"),
            entry("tt0000009", "Two", "Movie"),
            entry("tt0000010", "Three", "Movie"),
        ];

        run_import(&catalog, &pacer, ListKind::Watchlist, &entries).await;

        // 6 remote calls (3 lookups + 3 mutations) => 5 gaps
        assert_eq!(catalog.total_calls(), 6);
        assert_eq!(pacer.pauses.load(Ordering::SeqCst), 5);
    }

    #[tokio::test]
    async fn test_seenlist_uses_seenlist_mutation() {
        let catalog = FakeCatalog::default().with_title("Example Movie", "jw-99");
        let entries = vec![entry("tt1234567", "Example Movie", "Movie")];

        run_import(&catalog, &NoopPacer, ListKind::Seenlist, &entries).await;

        assert_eq!(
            catalog.mutations(),
            vec![(ListKind::Seenlist, "jw-99".to_string())]
        );
    }

    #[test]
    fn test_report_serializes_outcomes() {
        let mut report = ImportReport::new(ListKind::Watchlist);
        report.record(RowReport {
            row: 1,
            imdb_id: "tt1234567".to_string(),
            title: "Example Movie".to_string(),
            outcome: RowOutcome::Added {
                title_id: "jw-99".to_string(),
            },
        });

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["list"], "Watchlist");
        assert_eq!(json["rows"][0]["outcome"], "added");
        assert_eq!(json["rows"][0]["title_id"], "jw-99");
        assert!(json["aborted"].is_null());
    }
}
