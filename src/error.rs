use thiserror::Error;

/// Everything that can stop a scrape run. The run is fail-fast: callers
/// propagate these up to `main`, which logs and exits.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("cannot build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} answered with status {status}")]
    Status { url: String, status: u16 },

    #[error("extraction rule '{rule}' has an invalid selector: {reason}")]
    Selector { rule: String, reason: String },

    #[error("rule '{rule}' matched nothing")]
    MissingElement { rule: String },

    #[error("element matched by '{rule}' has no '{attr}' attribute")]
    MissingAttribute { rule: String, attr: String },

    #[error("cannot resolve link '{href}': {source}")]
    InvalidUrl {
        href: String,
        #[source]
        source: url::ParseError,
    },

    #[error("rule '{rule}' matched a node with no text (position {index})")]
    EmptyText { rule: String, index: usize },

    #[error("rule '{values}' found {found} values for {expected} names from '{names}'")]
    LengthMismatch {
        names: String,
        values: String,
        expected: usize,
        found: usize,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ScrapeError>;
