use thiserror::Error;

#[derive(Error, Debug)]
pub enum EtlError {
    /// Network, TLS or HTTP status failure while fetching the source page.
    #[error("fetch failed: {0}")]
    Fetch(#[from] reqwest::Error),

    /// Embedded payload missing from the page, or not decodable as records.
    #[error("extraction failed: {message}")]
    Extraction { message: String },

    /// Input batch had an unexpected structural shape.
    #[error("normalization failed: {message}")]
    Normalization { message: String },

    /// Database connection or insert failure.
    #[error("load failed: {message}")]
    Load { message: String },

    /// Monitoring ping failure. Always non-fatal.
    #[error("monitoring ping failed: {0}")]
    Monitoring(#[source] reqwest::Error),

    #[error("invalid configuration for {field}: {reason}")]
    InvalidConfig { field: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, EtlError>;
