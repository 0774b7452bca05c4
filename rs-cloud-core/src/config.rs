use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::io::read_text;
use crate::model::layout::{LayoutSettings, Viewport};
use crate::model::transition::Durations;

/// Environment variable holding the path of a JSON configuration file.
pub const CONFIG_ENV: &str = "RS_CLOUD_CONFIG";

/// Every tunable value of the word cloud.
///
/// All fields are optional in the JSON file; missing ones take their
/// defaults (1000×300 canvas, top 5 words, fonts 20 to 72, 650/700/400 ms).
///
/// ```json
/// { "layout": { "top_k": 8 }, "extra_stop_words": ["lorem", "ipsum"] }
/// ```
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct CloudConfig {
	pub viewport: Viewport,
	pub layout: LayoutSettings,
	pub durations: Durations,
	/// Words ignored on top of the built-in English list.
	pub extra_stop_words: Vec<String>,
}

impl CloudConfig {
	/// Reads and validates a JSON configuration file.
	///
	/// # Errors
	/// Returns an error if the file cannot be read, is not valid JSON, or
	/// holds invalid values (see `validate`).
	pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
		let contents = read_text(&path)?;
		let config: Self = serde_json::from_str(&contents)?;
		config.validate()?;
		info!("Configuration loaded from {}", path.as_ref().display());
		Ok(config)
	}

	/// Loads the file named by `RS_CLOUD_CONFIG`, or the defaults when the
	/// variable is unset.
	///
	/// # Errors
	/// Same as `load`.
	pub fn from_env() -> Result<Self, Error> {
		match std::env::var_os(CONFIG_ENV) {
			Some(path) => Self::load(path),
			None => Ok(Self::default()),
		}
	}

	/// Checks that the values describe a drawable layout.
	///
	/// # Errors
	/// Returns `Error::InvalidConfig` if:
	/// - the viewport size is not positive and finite
	/// - the margins leave a negative inner area
	/// - the font range is not finite, negative, or inverted
	/// - `char_width` is not strictly positive
	pub fn validate(&self) -> Result<(), Error> {
		let viewport = &self.viewport;
		if !(viewport.width.is_finite() && viewport.width > 0.0 && viewport.height.is_finite() && viewport.height > 0.0) {
			return Err(Error::InvalidConfig(format!(
				"viewport must be positive, got {}x{}",
				viewport.width, viewport.height
			)));
		}
		if !(viewport.inner_width() >= 0.0 && viewport.inner_height() >= 0.0) {
			return Err(Error::InvalidConfig("margins are larger than the viewport".to_owned()));
		}

		let [min, max] = self.layout.font_range;
		if !(min.is_finite() && max.is_finite() && min >= 0.0 && min <= max) {
			return Err(Error::InvalidConfig(format!("font range must be ordered, got [{min}, {max}]")));
		}
		if !(self.layout.char_width.is_finite() && self.layout.char_width > 0.0) {
			return Err(Error::InvalidConfig(format!(
				"char_width must be positive, got {}",
				self.layout.char_width
			)));
		}
		Ok(())
	}
}
