use crate::adapters::tabular;
use crate::core::driver::BatchDriver;
use crate::domain::model::{BatchResult, InputRow, OutputTargets};
use crate::domain::ports::{BatchObserver, LookupSettings, Pipeline, Resolver, Storage};
use crate::utils::error::Result;

/// Reads the query CSV from storage, resolves every row and writes the
/// resolved and failed tables back to storage.
pub struct LookupPipeline<S: Storage, R: Resolver, O: BatchObserver> {
    storage: S,
    driver: BatchDriver<R, O>,
    input_path: String,
    targets: OutputTargets,
}

impl<S: Storage, R: Resolver, O: BatchObserver> LookupPipeline<S, R, O> {
    pub fn new<C: LookupSettings>(storage: S, resolver: R, observer: O, settings: &C) -> Self {
        let driver = BatchDriver::new(resolver, observer)
            .with_policy(settings.failure_policy())
            .with_progress_interval(settings.progress_interval());

        Self {
            storage,
            driver,
            input_path: settings.input_path().to_string(),
            targets: settings.output_targets(),
        }
    }
}

#[async_trait::async_trait]
impl<S: Storage, R: Resolver, O: BatchObserver> Pipeline for LookupPipeline<S, R, O> {
    async fn extract(&self) -> Result<Vec<InputRow>> {
        tracing::info!("Starting processing of queries from '{}'", self.input_path);
        let data = self.storage.read_file(&self.input_path).await?;
        tabular::read_rows(&data)
    }

    async fn transform(&self, rows: Vec<InputRow>) -> Result<BatchResult> {
        self.driver.run(rows, &self.targets).await
    }

    async fn load(&self, result: BatchResult) -> Result<OutputTargets> {
        let resolved = tabular::write_rows(&result.resolved)?;
        self.storage.write_file(&self.targets.resolved, &resolved).await?;

        let failed = tabular::write_rows(&result.failed)?;
        self.storage.write_file(&self.targets.failed, &failed).await?;

        tracing::debug!(
            "Wrote {} resolved and {} failed rows",
            result.resolved.len(),
            result.failed.len()
        );
        Ok(self.targets.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{Address, FailurePolicy, IdentityQuery, Resolution};
    use crate::utils::error::LookupError;
    use crate::utils::monitor::TracingObserver;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Clone)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    }

    impl MockStorage {
        fn with_input(path: &str, data: &str) -> Self {
            let mut files = HashMap::new();
            files.insert(path.to_string(), data.as_bytes().to_vec());
            Self {
                files: Arc::new(Mutex::new(files)),
            }
        }

        async fn get_file(&self, path: &str) -> Option<String> {
            let files = self.files.lock().await;
            files
                .get(path)
                .map(|data| String::from_utf8_lossy(data).into_owned())
        }
    }

    impl Storage for MockStorage {
        async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned().ok_or_else(|| {
                LookupError::IoError(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("File not found: {}", path),
                ))
            })
        }

        async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.to_vec());
            Ok(())
        }
    }

    struct MockSettings {
        policy: FailurePolicy,
    }

    impl LookupSettings for MockSettings {
        fn input_path(&self) -> &str {
            "people.csv"
        }

        fn output_targets(&self) -> OutputTargets {
            OutputTargets::new("out/found.csv", "out/missing.csv")
        }

        fn progress_interval(&self) -> usize {
            200
        }

        fn failure_policy(&self) -> FailurePolicy {
            self.policy
        }
    }

    /// Resolves Anna, errors on Erik, finds nobody else.
    struct NameResolver;

    #[async_trait]
    impl Resolver for NameResolver {
        async fn resolve(&self, query: &IdentityQuery) -> Resolution {
            match query.first_name.as_str() {
                "Anna" => Resolution::Resolved(Address::new("Storgatan 1", "123 45 Stockholm")),
                "Erik" => Resolution::FetchFailed(LookupError::IoError(std::io::Error::new(
                    std::io::ErrorKind::TimedOut,
                    "timed out",
                ))),
                _ => Resolution::NotFound,
            }
        }
    }

    fn pipeline(
        storage: MockStorage,
        policy: FailurePolicy,
    ) -> LookupPipeline<MockStorage, NameResolver, TracingObserver> {
        LookupPipeline::new(storage, NameResolver, TracingObserver, &MockSettings { policy })
    }

    #[tokio::test]
    async fn test_extract_reads_all_rows() {
        let storage = MockStorage::with_input("people.csv", "Anna,Svensson,19800101-1234\nbad,row\n");
        let pipeline = pipeline(storage, FailurePolicy::RecordAndContinue);

        let rows = pipeline.extract().await.unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].fields, vec!["bad", "row"]);
    }

    #[tokio::test]
    async fn test_extract_missing_input_file() {
        let storage = MockStorage::with_input("other.csv", "");
        let pipeline = pipeline(storage, FailurePolicy::RecordAndContinue);

        let err = pipeline.extract().await.unwrap_err();

        assert!(matches!(err, LookupError::IoError(_)));
    }

    #[tokio::test]
    async fn test_full_run_writes_both_tables() {
        let storage = MockStorage::with_input(
            "people.csv",
            "Anna,Svensson,19800101-1234\nbad,row\nErik,Lund,19700101-0000\nPer,Ek,19900101-0000\n",
        );
        let pipeline = pipeline(storage.clone(), FailurePolicy::RecordAndContinue);

        let rows = pipeline.extract().await.unwrap();
        let result = pipeline.transform(rows).await.unwrap();
        let targets = pipeline.load(result).await.unwrap();

        assert_eq!(targets, OutputTargets::new("out/found.csv", "out/missing.csv"));
        assert_eq!(
            storage.get_file("out/found.csv").await.unwrap(),
            "Anna,Svensson,19800101-1234,\"Storgatan 1\n123 45 Stockholm\"\n"
        );
        assert_eq!(
            storage.get_file("out/missing.csv").await.unwrap(),
            "Erik,Lund,19700101-0000\nPer,Ek,19900101-0000\n"
        );
    }

    #[tokio::test]
    async fn test_abort_policy_writes_nothing() {
        let storage = MockStorage::with_input(
            "people.csv",
            "Anna,Svensson,19800101-1234\nErik,Lund,19700101-0000\n",
        );
        let pipeline = pipeline(storage.clone(), FailurePolicy::Abort);

        let rows = pipeline.extract().await.unwrap();
        let err = pipeline.transform(rows).await.unwrap_err();

        assert!(matches!(err, LookupError::BatchAborted { .. }));
        assert!(storage.get_file("out/found.csv").await.is_none());
    }
}
