use crate::domain::model::OutputTargets;
use crate::domain::ports::Pipeline;
use crate::utils::error::Result;

pub struct LookupEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> LookupEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<OutputTargets> {
        let rows = self.pipeline.extract().await?;
        tracing::debug!("Read {} input rows", rows.len());

        let result = self.pipeline.transform(rows).await?;
        tracing::debug!(
            "Resolved {} of {} queries",
            result.resolved.len(),
            result.processed
        );

        self.pipeline.load(result).await
    }
}
