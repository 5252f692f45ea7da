use crate::utils::error::LookupError;
use chrono::TimeDelta;
use serde::Serialize;
use std::fmt;

pub const DEFAULT_RESOLVED_OUTPUT: &str = "successful_queries.csv";
pub const DEFAULT_FAILED_OUTPUT: &str = "failed_queries.csv";

/// One parsed row of the input table, before its field count has been checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputRow {
    /// 1-based position in the input file.
    pub line: usize,
    pub fields: Vec<String>,
}

impl InputRow {
    pub fn new(line: usize, fields: Vec<String>) -> Self {
        Self { line, fields }
    }

    /// Returns the identity triple, or the row itself unless it has exactly three fields.
    pub fn into_query(self) -> std::result::Result<IdentityQuery, InputRow> {
        match <[String; 3]>::try_from(self.fields) {
            Ok([first_name, last_name, national_id]) => Ok(IdentityQuery {
                first_name,
                last_name,
                national_id,
            }),
            Err(fields) => Err(InputRow {
                line: self.line,
                fields,
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityQuery {
    pub first_name: String,
    pub last_name: String,
    pub national_id: String,
}

impl IdentityQuery {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        national_id: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            national_id: national_id.into(),
        }
    }
}

impl fmt::Display for IdentityQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "('{}', '{}', '{}')",
            self.first_name, self.last_name, self.national_id
        )
    }
}

/// Swedish two-line postal address: street, then postal code and city.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Address {
    pub line1: String,
    pub line2: String,
}

impl Address {
    pub fn new(line1: impl Into<String>, line2: impl Into<String>) -> Self {
        Self {
            line1: line1.into(),
            line2: line2.into(),
        }
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\n{}", self.line1, self.line2)
    }
}

/// Outcome of resolving a single identity.
#[derive(Debug)]
pub enum Resolution {
    Resolved(Address),
    NotFound,
    Ambiguous { candidates: usize },
    FetchFailed(LookupError),
    ParseFailed(LookupError),
}

/// Serialized as `first_name, last_name, national_id, address`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedRecord {
    pub first_name: String,
    pub last_name: String,
    pub national_id: String,
    pub address: String,
}

impl ResolvedRecord {
    pub fn new(query: IdentityQuery, address: &Address) -> Self {
        Self {
            first_name: query.first_name,
            last_name: query.last_name,
            national_id: query.national_id,
            address: address.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedQuery {
    pub first_name: String,
    pub last_name: String,
    pub national_id: String,
}

impl From<IdentityQuery> for FailedQuery {
    fn from(query: IdentityQuery) -> Self {
        Self {
            first_name: query.first_name,
            last_name: query.last_name,
            national_id: query.national_id,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchResult {
    pub resolved: Vec<ResolvedRecord>,
    pub failed: Vec<FailedQuery>,
    /// Rows handed to the resolver.
    pub processed: usize,
    /// Rows dropped for having the wrong number of fields.
    pub skipped: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputTargets {
    pub resolved: String,
    pub failed: String,
}

impl OutputTargets {
    pub fn new(resolved: impl Into<String>, failed: impl Into<String>) -> Self {
        Self {
            resolved: resolved.into(),
            failed: failed.into(),
        }
    }
}

impl Default for OutputTargets {
    fn default() -> Self {
        Self::new(DEFAULT_RESOLVED_OUTPUT, DEFAULT_FAILED_OUTPUT)
    }
}

#[derive(Debug, Clone)]
pub struct BatchSummary {
    pub processed: usize,
    pub resolved: usize,
    pub failed: usize,
    pub skipped: usize,
    pub targets: OutputTargets,
    pub elapsed: TimeDelta,
}

impl BatchSummary {
    pub fn new(result: &BatchResult, targets: &OutputTargets, elapsed: TimeDelta) -> Self {
        Self {
            processed: result.processed,
            resolved: result.resolved.len(),
            failed: result.failed.len(),
            skipped: result.skipped,
            targets: targets.clone(),
            elapsed,
        }
    }
}

/// What the driver does with a fetch or parse failure.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Write the query to the failure table and keep going.
    #[default]
    RecordAndContinue,
    /// Stop the batch with an error.
    Abort,
}
