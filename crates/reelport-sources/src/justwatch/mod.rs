pub mod api;
pub mod client;
pub mod queries;

pub use client::JustWatchClient;
