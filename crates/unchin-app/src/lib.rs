//! Application layer for unchin: configuration, logging, and use cases

pub mod app;
pub mod config;
pub mod logging;
pub mod repository;

pub use app::*;
pub use config::Config;
pub use logging::init_logging;
pub use repository::open_rate_repository;
