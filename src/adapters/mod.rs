// Adapters layer: concrete implementations for external systems (http, storage, csv).

pub mod http;
pub mod storage;
pub mod tabular;

pub use http::ReqwestFetcher;
pub use storage::LocalStorage;
