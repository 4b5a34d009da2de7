//! CLI command implementations

pub mod config;
pub mod fetch;

pub use config::ConfigArgs;
pub use fetch::FetchArgs;
