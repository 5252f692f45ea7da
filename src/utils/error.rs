use thiserror::Error;

#[derive(Error, Debug)]
pub enum LookupError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid URL: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("Invalid CSS selector: {selector}")]
    SelectorError { selector: String },

    #[error("Unexpected page markup: {message}")]
    MarkupError { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Batch aborted while resolving {query}: {source}")]
    BatchAborted {
        query: String,
        #[source]
        source: Box<LookupError>,
    },
}

impl LookupError {
    pub fn markup(message: impl Into<String>) -> Self {
        LookupError::MarkupError {
            message: message.into(),
        }
    }

    /// True for failures of the remote transport rather than of the page contents.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            LookupError::HttpError(_) | LookupError::UrlError(_) | LookupError::IoError(_)
        )
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            LookupError::HttpError(_) => "Check the network connection and that the site is reachable",
            LookupError::CsvError(_) | LookupError::IoError(_) => {
                "Check that the input file exists and the output paths are writable"
            }
            LookupError::UrlError(_) | LookupError::InvalidConfigValueError { .. } => {
                "Check the base URL and other values in the site configuration"
            }
            LookupError::SelectorError { .. } => "Fix the CSS selectors in the site configuration",
            LookupError::MarkupError { .. } => {
                "The site layout may have changed; update the selectors or address line indices"
            }
            LookupError::ConfigError { .. } => "Review the command line arguments and site configuration",
            LookupError::BatchAborted { source, .. } => source.recovery_suggestion(),
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self {
            LookupError::ConfigError { .. }
            | LookupError::InvalidConfigValueError { .. }
            | LookupError::SelectorError { .. }
            | LookupError::UrlError(_) => 2,
            LookupError::BatchAborted { .. } => 3,
            _ => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, LookupError>;
