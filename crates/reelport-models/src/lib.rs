pub mod entry;
pub mod list;
pub mod resolved;
pub mod title;

pub use entry::ExportEntry;
pub use list::ListKind;
pub use resolved::ResolvedTitle;
pub use title::TitleKind;
