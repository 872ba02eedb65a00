pub mod import;
pub mod pacer;
pub mod report;

pub use import::run_import;
pub use pacer::{FixedDelayPacer, NoopPacer, Pacer};
pub use report::{ImportReport, RowOutcome, RowReport};
