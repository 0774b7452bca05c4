use log::debug;
use serde::{Deserialize, Serialize};

use super::frequency::{count, FrequencyTable};
use super::layout::{layout, LayoutSettings, PositionedGlyph, Viewport};
use super::stop_words::StopWords;
use crate::config::CloudConfig;

/// Result of one "generate" action.
///
/// `revision` increases on every generation, even when the text did not
/// change, so consumers can tell a fresh layout from a repeated one.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Generation {
	pub revision: u64,
	pub glyphs: Vec<PositionedGlyph>,
}

/// State of one interactive session.
///
/// Owns the current text and the frequency table computed from it. The
/// table only changes on `generate`, never while the text is being edited.
///
/// # Responsibilities
/// - Hold the raw text between edits
/// - Count words on demand and keep the resulting table
/// - Lay the stored table out for the configured viewport
#[derive(Clone, Debug)]
pub struct Session {
	text: String,
	table: FrequencyTable,
	revision: u64,
	stop_words: StopWords,
	viewport: Viewport,
	settings: LayoutSettings,
}

impl Session {
	/// Creates a session with the built-in stop words and default geometry.
	pub fn new() -> Self {
		Self::with_config(&CloudConfig::default())
	}

	/// Creates a session from a configuration.
	///
	/// `extra_stop_words` are added to the built-in list.
	pub fn with_config(config: &CloudConfig) -> Self {
		let mut stop_words = StopWords::english();
		stop_words.extend(&config.extra_stop_words);
		Self {
			text: String::new(),
			table: FrequencyTable::new(),
			revision: 0,
			stop_words,
			viewport: config.viewport,
			settings: config.layout,
		}
	}

	pub fn text(&self) -> &str {
		&self.text
	}

	/// Replaces the text. The stored table is left untouched.
	pub fn set_text(&mut self, text: impl Into<String>) {
		self.text = text.into();
	}

	pub fn table(&self) -> &FrequencyTable {
		&self.table
	}

	pub fn revision(&self) -> u64 {
		self.revision
	}

	pub fn stop_words(&self) -> &StopWords {
		&self.stop_words
	}

	pub fn viewport(&self) -> &Viewport {
		&self.viewport
	}

	pub fn settings(&self) -> &LayoutSettings {
		&self.settings
	}

	/// Counts the current text, stores the table and lays it out.
	pub fn generate(&mut self) -> Generation {
		self.table = count(&self.text, &self.stop_words);
		self.revision += 1;
		debug!(
			"Generation {}: {} distinct words, {} tokens",
			self.revision,
			self.table.len(),
			self.table.total()
		);
		Generation { revision: self.revision, glyphs: self.layout() }
	}

	/// Lays the stored table out with the session's viewport and settings.
	pub fn layout(&self) -> Vec<PositionedGlyph> {
		layout(&self.table, &self.viewport, &self.settings)
	}

	/// Lays the stored table out with other geometry, leaving the session
	/// configuration unchanged.
	pub fn layout_with(&self, viewport: &Viewport, settings: &LayoutSettings) -> Vec<PositionedGlyph> {
		layout(&self.table, viewport, settings)
	}
}

impl Default for Session {
	fn default() -> Self {
		Self::new()
	}
}
