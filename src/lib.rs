pub mod apis;
pub mod common;
pub mod config;
pub mod dates;
pub mod logging;
pub mod metrics;
pub mod server;
pub mod templates;
