use crate::domain::model::{
    BatchResult, BatchSummary, FailedQuery, FailurePolicy, InputRow, OutputTargets, Resolution,
    ResolvedRecord,
};
use crate::domain::ports::{BatchObserver, Resolver};
use crate::utils::error::{LookupError, Result};
use chrono::Local;

pub const DEFAULT_PROGRESS_INTERVAL: usize = 200;

/// Runs the resolver over every input row, one at a time, and partitions the
/// outcomes into resolved and failed tables.
pub struct BatchDriver<R: Resolver, O: BatchObserver> {
    resolver: R,
    observer: O,
    policy: FailurePolicy,
    progress_interval: usize,
}

impl<R: Resolver, O: BatchObserver> BatchDriver<R, O> {
    pub fn new(resolver: R, observer: O) -> Self {
        Self {
            resolver,
            observer,
            policy: FailurePolicy::default(),
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
        }
    }

    pub fn with_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Values below 1 are treated as 1.
    pub fn with_progress_interval(mut self, progress_interval: usize) -> Self {
        self.progress_interval = progress_interval.max(1);
        self
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    /// Rows without exactly three fields are reported to the observer and
    /// dropped; they appear in neither table. Every other row ends up in exactly
    /// one of them, in input order.
    pub async fn run(&self, rows: Vec<InputRow>, targets: &OutputTargets) -> Result<BatchResult> {
        let started = Local::now();
        let mut result = BatchResult::default();

        for row in rows {
            let query = match row.into_query() {
                Ok(query) => query,
                Err(row) => {
                    self.observer.row_skipped(&row);
                    result.skipped += 1;
                    continue;
                }
            };

            let resolution = self.resolver.resolve(&query).await;
            match resolution {
                Resolution::Resolved(address) => {
                    result.resolved.push(ResolvedRecord::new(query, &address));
                }
                Resolution::FetchFailed(source) | Resolution::ParseFailed(source)
                    if self.policy == FailurePolicy::Abort =>
                {
                    return Err(LookupError::BatchAborted {
                        query: query.to_string(),
                        source: Box::new(source),
                    });
                }
                resolution => {
                    self.observer.unresolved(&query, &resolution);
                    result.failed.push(FailedQuery::from(query));
                }
            }

            result.processed += 1;
            if result.processed % self.progress_interval == 0 {
                self.observer.progress(result.processed);
            }
        }

        let summary = BatchSummary::new(&result, targets, Local::now() - started);
        self.observer.finished(&summary);

        Ok(result)
    }
}
