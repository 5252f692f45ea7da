use crate::utils::error::{LookupError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;

pub const DEFAULT_BASE_URL: &str = "https://www.ratsit.se";

static ENV_VAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("valid env var pattern"));

/// Where and how to query the people-search site. Every field has a default
/// matching the live Ratsit layout, so an empty TOML document is a valid config.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub site: SiteSection,
    pub search: SearchConfig,
    pub address: AddressLayout,
    pub http: HttpConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteSection {
    pub base_url: String,
}

impl Default for SiteSection {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub path: String,
    pub result_selector: String,
    pub params: SearchParams,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            path: "/sok/avancerat/person".to_string(),
            result_selector: "a.search-list-content".to_string(),
            params: SearchParams::default(),
        }
    }
}

/// Query parameter names the search form expects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchParams {
    pub first_name: String,
    pub last_name: String,
    pub national_id: String,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            first_name: "fnamn".to_string(),
            last_name: "enamn".to_string(),
            national_id: "pnr".to_string(),
        }
    }
}

/// The address container holds the street as child node 0 and the postal
/// code and city as child node 2, separated by a `<br>`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AddressLayout {
    pub selector: String,
    pub street_child: usize,
    pub city_child: usize,
}

impl Default for AddressLayout {
    fn default() -> Self {
        Self {
            selector: "address".to_string(),
            street_child: 0,
            city_child: 2,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Unset leaves the client's default (no timeout).
    pub timeout_seconds: Option<u64>,
    pub user_agent: Option<String>,
}

impl SiteConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(LookupError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| LookupError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown variables are left as-is.
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.site.base_url = base_url.into();
        self
    }

    pub fn with_timeout_seconds(mut self, timeout_seconds: u64) -> Self {
        self.http.timeout_seconds = Some(timeout_seconds);
        self
    }
}

impl Validate for SiteConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("site.base_url", &self.site.base_url)?;
        validation::validate_non_empty_string("search.path", &self.search.path)?;
        validation::validate_non_empty_string("search.result_selector", &self.search.result_selector)?;
        validation::validate_non_empty_string("search.params.first_name", &self.search.params.first_name)?;
        validation::validate_non_empty_string("search.params.last_name", &self.search.params.last_name)?;
        validation::validate_non_empty_string(
            "search.params.national_id",
            &self.search.params.national_id,
        )?;
        validation::validate_non_empty_string("address.selector", &self.address.selector)?;

        if self.address.street_child == self.address.city_child {
            return Err(LookupError::InvalidConfigValueError {
                field: "address.city_child".to_string(),
                value: self.address.city_child.to_string(),
                reason: "Must differ from address.street_child".to_string(),
            });
        }

        if let Some(timeout) = self.http.timeout_seconds {
            validation::validate_range("http.timeout_seconds", timeout, 1, 600)?;
        }

        Ok(())
    }
}
