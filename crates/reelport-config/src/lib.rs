pub mod config;
pub mod credentials;
pub mod paths;

pub use config::{Config, ImportConfig, JustWatchConfig};
pub use credentials::{AuthToken, CredentialError};
pub use paths::PathManager;
