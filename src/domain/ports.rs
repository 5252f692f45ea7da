use crate::domain::model::{
    BatchResult, BatchSummary, FailurePolicy, IdentityQuery, InputRow, OutputTargets, Resolution,
};
use crate::utils::error::Result;
use async_trait::async_trait;
use url::Url;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait LookupSettings: Send + Sync {
    fn input_path(&self) -> &str;
    fn output_targets(&self) -> OutputTargets;
    fn progress_interval(&self) -> usize;
    fn failure_policy(&self) -> FailurePolicy;
}

/// Performs an HTTP GET and returns the response body.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &Url) -> Result<String>;
}

#[async_trait]
pub trait Resolver: Send + Sync {
    async fn resolve(&self, query: &IdentityQuery) -> Resolution;
}

/// Receives the batch driver's progress and diagnostics.
pub trait BatchObserver: Send + Sync {
    fn row_skipped(&self, row: &InputRow);
    fn unresolved(&self, query: &IdentityQuery, resolution: &Resolution);
    fn progress(&self, processed: usize);
    fn finished(&self, summary: &BatchSummary);
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<InputRow>>;
    async fn transform(&self, rows: Vec<InputRow>) -> Result<BatchResult>;
    async fn load(&self, result: BatchResult) -> Result<OutputTargets>;
}
