use crate::domain::model::{BatchSummary, IdentityQuery, InputRow, Resolution};
use crate::domain::ports::BatchObserver;

/// Default observer: reports batch progress as `tracing` events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl BatchObserver for TracingObserver {
    fn row_skipped(&self, row: &InputRow) {
        tracing::warn!(
            "Could not parse row {} ({} fields, expected 3), skipping...",
            row.line,
            row.fields.len()
        );
    }

    fn unresolved(&self, query: &IdentityQuery, resolution: &Resolution) {
        match resolution {
            Resolution::NotFound => tracing::debug!("No match for {}", query),
            Resolution::Ambiguous { candidates } => {
                tracing::debug!("Found {} matches for {}", candidates, query)
            }
            Resolution::FetchFailed(e) => tracing::warn!("Fetch failed for {}: {}", query, e),
            Resolution::ParseFailed(e) => tracing::warn!("Parse failed for {}: {}", query, e),
            Resolution::Resolved(_) => {}
        }
    }

    fn progress(&self, processed: usize) {
        tracing::info!("Processed {} queries", processed);
    }

    fn finished(&self, summary: &BatchSummary) {
        tracing::info!(
            "Processed {} records, writing results to '{}' and '{}'",
            summary.processed,
            summary.targets.resolved,
            summary.targets.failed
        );
        tracing::info!(
            "📊 Resolved: {}, Failed: {}, Skipped rows: {}, Time: {:.1}s",
            summary.resolved,
            summary.failed,
            summary.skipped,
            summary.elapsed.num_milliseconds() as f64 / 1000.0
        );
    }
}
