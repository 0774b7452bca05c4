//! Word-frequency cloud library.
//!
//! This crate turns free-form text into a small, animated word cloud:
//! - Stop-word aware word counting
//! - Deterministic single-line layout of the top words, sized by frequency
//! - Keyed enter/update/exit reconciliation for smooth re-renders
//! - JSON configuration and session state for UI and HTTP front ends
//!
//! Counting and layout are total functions: they never fail and never
//! keep hidden state between calls.

/// Counting, layout and animation model.
pub mod model;

/// JSON configuration (viewport, layout settings, durations, stop words).
pub mod config;

/// Library error type.
pub mod error;

/// File helpers.
pub mod io;

pub use config::CloudConfig;
pub use error::Error;
