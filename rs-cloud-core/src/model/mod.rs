//! Word-frequency cloud model.
//!
//! The pipeline runs in two pure steps followed by an animation step:
//! - Counting words in raw text (`frequency`, filtered by `stop_words`)
//! - Laying the most frequent words out on one line (`layout`, sized with `scale`)
//! - Reconciling successive layouts by word for enter/update/exit animation (`transition`)
//!
//! `session` ties the first two together around the current text.

/// Text normalization, tokenization and occurrence counting.
///
/// Produces a `FrequencyTable` that keeps words in encounter order.
pub mod frequency;

/// Built-in and user-provided words excluded from counting.
pub mod stop_words;

/// Linear scale with tick-aligned domain rounding.
///
/// Maps word counts to font sizes.
pub mod scale;

/// Top-K selection and single-line placement of words.
pub mod layout;

/// Keyed enter/update/exit reconciliation and interpolation.
///
/// Hosts feed it successive layouts and sample it once per frame.
pub mod transition;

/// Per-session state: current text, last frequency table, generation counter.
pub mod session;
