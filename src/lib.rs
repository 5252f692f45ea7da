pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{LocalStorage, ReqwestFetcher};
pub use app::pipelines::LookupPipeline;
pub use config::SiteConfig;
pub use crate::core::{driver::BatchDriver, engine::LookupEngine, resolver::SiteResolver};
pub use utils::error::{LookupError, Result};
pub use utils::monitor::TracingObserver;
