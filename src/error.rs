// src/error.rs
use std::time::Duration;

/// Any failure reaching an upstream statistics API. Adapters absorb these into
/// fallback payloads; they never reach the dashboard.
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{source_name} responded with status: {status}")]
    Status {
        source_name: &'static str,
        status: reqwest::StatusCode,
    },

    #[error("{source_name} API error: {message}")]
    Rejected {
        source_name: &'static str,
        message: String,
    },

    #[error("JSON error: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Failure while assembling the reconciled price list. The price service
/// answers these with the catalog baseline.
#[derive(Debug, thiserror::Error)]
pub enum AggregationError {
    #[error("aggregation did not finish within {0:?}")]
    Timeout(Duration),

    #[error("reconciliation failed: {0}")]
    Reconcile(String),

    #[error("catalog is invalid: {0}")]
    Catalog(String),
}

pub type Result<T> = std::result::Result<T, UpstreamError>;
