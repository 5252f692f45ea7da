use crate::config::site::SiteConfig;
use crate::core::driver::DEFAULT_PROGRESS_INTERVAL;
use crate::domain::model::{FailurePolicy, OutputTargets, DEFAULT_FAILED_OUTPUT, DEFAULT_RESOLVED_OUTPUT};
use crate::domain::ports::LookupSettings;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "ratsit-query")]
#[command(
    about = "Query Ratsit.se for address information based on personal number and name. Careful!"
)]
pub struct CliConfig {
    /// CSV file with first name(s), last name, personal number, on each row.
    #[arg(value_name = "QUERY.CSV")]
    pub query: String,

    /// Output file to write query results to
    #[arg(short = 'o', long = "output", value_name = "OUTFILE", default_value = DEFAULT_RESOLVED_OUTPUT)]
    pub output: String,

    /// Write failed queries to csv file
    #[arg(short = 'f', long = "failed", value_name = "FAILFILE", default_value = DEFAULT_FAILED_OUTPUT)]
    pub failed: String,

    /// TOML file overriding site URLs, selectors and HTTP settings
    #[arg(long, value_name = "TOML")]
    pub site_config: Option<String>,

    /// Override the site base URL
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, value_name = "SECONDS")]
    pub timeout_secs: Option<u64>,

    /// Log progress every N processed rows
    #[arg(long, value_name = "N", default_value_t = DEFAULT_PROGRESS_INTERVAL)]
    pub progress_interval: usize,

    /// Stop the whole batch on the first network or markup error
    #[arg(long)]
    pub abort_on_error: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    /// Loads `--site-config` if given and applies the command line overrides on top.
    pub fn load_site_config(&self) -> Result<SiteConfig> {
        let mut site = match &self.site_config {
            Some(path) => SiteConfig::from_file(path)?,
            None => SiteConfig::default(),
        };

        if let Some(base_url) = &self.base_url {
            site = site.with_base_url(base_url.clone());
        }
        if let Some(timeout) = self.timeout_secs {
            site = site.with_timeout_seconds(timeout);
        }

        site.validate()?;
        Ok(site)
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("QUERY.CSV", &self.query)?;
        validation::validate_path("--output", &self.output)?;
        validation::validate_path("--failed", &self.failed)?;
        validation::validate_positive_number("--progress-interval", self.progress_interval, 1)?;
        if let Some(base_url) = &self.base_url {
            validation::validate_url("--base-url", base_url)?;
        }
        Ok(())
    }
}

impl LookupSettings for CliConfig {
    fn input_path(&self) -> &str {
        &self.query
    }

    fn output_targets(&self) -> OutputTargets {
        OutputTargets::new(self.output.clone(), self.failed.clone())
    }

    fn progress_interval(&self) -> usize {
        self.progress_interval
    }

    fn failure_policy(&self) -> FailurePolicy {
        if self.abort_on_error {
            FailurePolicy::Abort
        } else {
            FailurePolicy::RecordAndContinue
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CliConfig::try_parse_from(["ratsit-query", "people.csv"]).unwrap();

        assert_eq!(config.query, "people.csv");
        assert_eq!(config.output, "successful_queries.csv");
        assert_eq!(config.failed, "failed_queries.csv");
        assert_eq!(config.progress_interval, 200);
        assert_eq!(config.failure_policy(), FailurePolicy::RecordAndContinue);
        assert!(config.validate().is_ok());
        assert_eq!(config.load_site_config().unwrap(), SiteConfig::default());
    }

    #[test]
    fn test_short_flags_and_overrides() {
        let config = CliConfig::try_parse_from([
            "ratsit-query",
            "people.csv",
            "-o",
            "found.csv",
            "-f",
            "missing.csv",
            "--base-url",
            "http://127.0.0.1:8080",
            "--timeout-secs",
            "10",
            "--abort-on-error",
        ])
        .unwrap();

        assert_eq!(
            config.output_targets(),
            OutputTargets::new("found.csv", "missing.csv")
        );
        assert_eq!(config.failure_policy(), FailurePolicy::Abort);

        let site = config.load_site_config().unwrap();
        assert_eq!(site.site.base_url, "http://127.0.0.1:8080");
        assert_eq!(site.http.timeout_seconds, Some(10));
    }

    #[test]
    fn test_zero_progress_interval_is_rejected() {
        let config =
            CliConfig::try_parse_from(["ratsit-query", "people.csv", "--progress-interval", "0"])
                .unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_query_file_is_required() {
        assert!(CliConfig::try_parse_from(["ratsit-query"]).is_err());
    }
}
