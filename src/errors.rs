use axum::Json;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum AnalyticsError {
    #[error("No portfolio data found")]
    NoData,
    #[error("Timeline has {actual} points, at least {required} are required")]
    InsufficientHistory { required: usize, actual: usize },
    #[error("Timeline is not in ascending date order at point {index}")]
    UnorderedTimeline { index: usize },
    #[error("Division by zero: {context}")]
    DivisionByZero { context: String },
    #[error("Malformed record '{symbol}': field '{field}' has invalid value '{value}'")]
    MalformedRecord {
        symbol: String,
        field: String,
        value: String,
    },
    #[error("Non-finite value: {context}")]
    NonFiniteValue { context: String },
    #[error("Invalid query: {0}")]
    InvalidQuery(String),
}

impl AnalyticsError {
    pub fn division_by_zero(context: impl Into<String>) -> Self {
        AnalyticsError::DivisionByZero {
            context: context.into(),
        }
    }

    pub fn malformed(symbol: &str, field: &str, value: impl Into<String>) -> Self {
        AnalyticsError::MalformedRecord {
            symbol: symbol.to_string(),
            field: field.to_string(),
            value: value.into(),
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            AnalyticsError::NoData => "NoData",
            AnalyticsError::InsufficientHistory { .. } => "InsufficientHistory",
            AnalyticsError::UnorderedTimeline { .. } => "UnorderedTimeline",
            AnalyticsError::DivisionByZero { .. } => "DivisionByZero",
            AnalyticsError::MalformedRecord { .. } => "MalformedRecord",
            AnalyticsError::NonFiniteValue { .. } => "NonFiniteValue",
            AnalyticsError::InvalidQuery(_) => "InvalidQuery",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AnalyticsError::NoData => StatusCode::NOT_FOUND,
            AnalyticsError::InvalidQuery(_) => StatusCode::BAD_REQUEST,
            AnalyticsError::InsufficientHistory { .. }
            | AnalyticsError::UnorderedTimeline { .. }
            | AnalyticsError::DivisionByZero { .. }
            | AnalyticsError::MalformedRecord { .. }
            | AnalyticsError::NonFiniteValue { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }
}

impl IntoResponse for AnalyticsError {
    fn into_response(self) -> axum::response::Response {
        let body = json!({
            "success": false,
            "error": self.kind(),
            "message": self.to_string(),
        });
        (self.status(), Json(body)).into_response()
    }
}

/// Failures while loading fixture files at startup.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error reading '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Unsupported fixture format for '{0}' (expected .json or .csv)")]
    UnsupportedFormat(String),
    #[error("Duplicate holding symbol '{0}'")]
    DuplicateSymbol(String),
    #[error("Invalid date '{value}' in timeline: {source}")]
    Date {
        value: String,
        #[source]
        source: chrono::ParseError,
    },
    #[error(transparent)]
    Record(#[from] AnalyticsError),
}
