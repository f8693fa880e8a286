//! Error types shared across the tutor.

use thiserror::Error;

/// Errors raised while loading the embedded lesson catalog.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CatalogError {
    #[error("catalog YAML could not be parsed: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("exercise id '{0}' appears more than once")]
    DuplicateExercise(String),
    #[error("section '{0}' contains an exercise without an id")]
    EmptyExerciseId(String),
}

/// Errors raised by a [`crate::store::KeyValueStore`] backend.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StoreError {
    #[error("store file error: {0}")]
    Io(#[from] std::io::Error),
    #[error("store contents are not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("browser storage is unavailable")]
    Unavailable,
    #[error("browser storage rejected the write for '{0}'")]
    Rejected(String),
}

/// Errors raised while talking to the remote execution service.
///
/// These never leave the gateway: they are folded into an
/// [`crate::model::ExecutionResult`] carrying a transport diagnostic.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GatewayError {
    #[cfg(not(target_arch = "wasm32"))]
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("service answered HTTP {status}{}", message_suffix(.message))]
    Status { status: u16, message: Option<String> },
    #[error("service response is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("fetch failed: {0}")]
    Fetch(String),
}

fn message_suffix(message: &Option<String>) -> String {
    match message {
        Some(m) if !m.trim().is_empty() => format!(": {}", m.trim()),
        _ => String::new(),
    }
}
