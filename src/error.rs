use thiserror::Error;

#[derive(Error, Debug)]
pub enum EnrollmentError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Course not found: {0}")]
    CourseNotFound(String),
    #[error("Promo code not recognised: {0}")]
    PromoNotFound(String),
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl From<toml::de::Error> for EnrollmentError {
    fn from(err: toml::de::Error) -> Self {
        Self::ConfigError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, EnrollmentError>;

/// Failure raised inside a single marketing channel.
///
/// Never crosses the sync coordinator: it is logged and folded into a `false`
/// entry of the report.
#[derive(Error, Debug)]
pub enum ChannelError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("endpoint rejected contact with status {status}")]
    Rejected { status: u16 },
    #[error("{0}")]
    Other(String),
}
