pub mod driver;
pub mod engine;
pub mod extract;
pub mod resolver;

pub use crate::domain::model::{BatchResult, IdentityQuery, InputRow, Resolution};
pub use crate::domain::ports::{BatchObserver, LookupSettings, PageFetcher, Pipeline, Resolver, Storage};
pub use crate::utils::error::Result;
