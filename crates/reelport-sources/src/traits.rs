use crate::error::ServiceError;
use async_trait::async_trait;
use reelport_models::{ListKind, ResolvedTitle, TitleKind};

/// Remote side of the import pipeline: resolve a title to an internal id,
/// then flip its membership in a list.
///
/// `JustWatchClient` is the production implementation; tests drive the
/// runner with in-memory fakes.
#[async_trait]
pub trait TitleCatalog: Send + Sync {
    /// Search the catalog by title name. `Ok(None)` means the service
    /// returned no candidates; that is not an error.
    async fn lookup_title(
        &self,
        title: &str,
        kind: TitleKind,
        year: Option<u32>,
    ) -> Result<Option<ResolvedTitle>, ServiceError>;

    /// Add the resolved title to the given list. Expected to be idempotent
    /// per (title id, list) on the service side.
    async fn set_in_list(&self, list: ListKind, title_id: &str) -> Result<(), ServiceError>;
}
