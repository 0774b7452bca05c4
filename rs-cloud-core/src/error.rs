use thiserror::Error;

/// Errors raised at the edges of the library (files and configuration).
///
/// Counting and layout never fail; only reading inputs does.
#[derive(Debug, Error)]
pub enum Error {
	#[error("I/O error: {0}")]
	Io(#[from] std::io::Error),

	#[error("Invalid JSON: {0}")]
	Json(#[from] serde_json::Error),

	#[error("Invalid configuration: {0}")]
	InvalidConfig(String),
}
