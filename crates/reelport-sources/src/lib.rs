pub mod error;
pub mod imdb;
pub mod justwatch;
pub mod traits;

pub use error::ServiceError;
pub use justwatch::JustWatchClient;
pub use traits::TitleCatalog;
