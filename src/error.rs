use chrono::NaiveDate;
use thiserror::Error;
use uuid::Uuid;

/// Errors raised by the roadmap store, persistence and configuration layers.
#[derive(Debug, Error)]
pub enum RoadmapError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid roadmap document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("invalid config file: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("could not encode config: {0}")]
    ConfigEncode(#[from] toml::ser::Error),

    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: Uuid },

    #[error("start date {start} is after end date {end}")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },

    #[error("CSV is missing required columns (found: {found}); need title, start date and end date")]
    MissingColumns { found: String },

    #[error("no valid rows found in CSV ({skipped} rows skipped)")]
    NoValidRows { skipped: usize },
}

impl RoadmapError {
    pub fn not_found(kind: &'static str, id: Uuid) -> Self {
        Self::NotFound { kind, id }
    }
}

pub type Result<T> = std::result::Result<T, RoadmapError>;
