use serde::{Deserialize, Serialize};

use super::frequency::FrequencyTable;
use super::scale::LinearScale;

/// Space reserved around the drawing area, in canvas units.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
#[serde(default)]
pub struct Margin {
	pub top: f64,
	pub right: f64,
	pub bottom: f64,
	pub left: f64,
}

impl Default for Margin {
	fn default() -> Self {
		Self { top: 10.0, right: 20.0, bottom: 10.0, left: 20.0 }
	}
}

/// Canvas dimensions and margins.
///
/// Glyph coordinates are relative to the inner area, whose origin sits at
/// `(margin.left, margin.top)` on the canvas.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
#[serde(default)]
pub struct Viewport {
	pub width: f64,
	pub height: f64,
	pub margin: Margin,
}

impl Viewport {
	/// A viewport of the given size with the default margins.
	pub fn new(width: f64, height: f64) -> Self {
		Self { width, height, margin: Margin::default() }
	}

	pub fn inner_width(&self) -> f64 {
		self.width - self.margin.left - self.margin.right
	}

	pub fn inner_height(&self) -> f64 {
		self.height - self.margin.top - self.margin.bottom
	}

	/// Converts inner-area coordinates to canvas coordinates.
	pub fn to_canvas(&self, x: f64, y: f64) -> (f64, f64) {
		(x + self.margin.left, y + self.margin.top)
	}
}

impl Default for Viewport {
	fn default() -> Self {
		Self::new(1000.0, 300.0)
	}
}

/// Tunable parameters of the layout.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
#[serde(default)]
pub struct LayoutSettings {
	/// Maximum number of words displayed.
	pub top_k: usize,
	/// Font sizes of the least and most frequent displayed words.
	pub font_range: [f64; 2],
	/// Average glyph width as a fraction of the font size.
	pub char_width: f64,
	/// Round the count domain to tick boundaries before scaling.
	pub nice: bool,
}

impl Default for LayoutSettings {
	fn default() -> Self {
		Self { top_k: 5, font_range: [20.0, 72.0], char_width: 0.6, nice: true }
	}
}

/// A word selected for display with its 0-based position in the ranking.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct RankedWord {
	pub word: String,
	pub count: usize,
	pub rank: usize,
}

/// A sized and positioned word, ready to be drawn centered on `(x, y)`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PositionedGlyph {
	pub word: String,
	pub count: usize,
	pub rank: usize,
	pub font_size: f64,
	pub x: f64,
	pub y: f64,
}

/// Estimated rendered width of `word` at `font_size`.
///
/// No font metrics are involved: every character is assumed to be
/// `char_width * font_size` wide.
pub fn estimate_width(word: &str, font_size: f64, char_width: f64) -> f64 {
	char_width * font_size * word.chars().count() as f64
}

/// Picks the `k` most frequent words, count descending.
///
/// The sort is stable, so equal counts keep the table's encounter order.
pub fn select_top(table: &FrequencyTable, k: usize) -> Vec<RankedWord> {
	let mut entries: Vec<_> = table.iter().collect();
	entries.sort_by(|a, b| b.count.cmp(&a.count));

	entries
		.into_iter()
		.take(k)
		.enumerate()
		.map(|(rank, entry)| RankedWord { word: entry.word.clone(), count: entry.count, rank })
		.collect()
}

/// Builds the font-size scale for the selected words.
///
/// Returns `None` when nothing is selected.
pub fn font_scale(selected: &[RankedWord], settings: &LayoutSettings) -> Option<LinearScale> {
	let min = selected.iter().map(|word| word.count).min()?;
	let max = selected.iter().map(|word| word.count).max()?;

	let scale = LinearScale::new([min as f64, max as f64], settings.font_range);
	Some(if settings.nice { scale.nice() } else { scale })
}

/// Lays the most frequent words of `table` out on a single line.
///
/// Words are sized by count, ordered by rank from left to right, spaced
/// evenly across the inner width and vertically centered. When the words
/// are wider than the viewport the spacing goes negative and they overlap.
///
/// An empty table yields no glyphs. When every selected word has the same
/// count, all of them get the middle of the font range.
///
/// Identical inputs always give identical outputs.
pub fn layout(table: &FrequencyTable, viewport: &Viewport, settings: &LayoutSettings) -> Vec<PositionedGlyph> {
	let selected = select_top(table, settings.top_k);
	let Some(scale) = font_scale(&selected, settings) else {
		return Vec::new();
	};

	let sized: Vec<(RankedWord, f64, f64)> = selected
		.into_iter()
		.map(|word| {
			let font_size = scale.scale(word.count as f64);
			let width = estimate_width(&word.word, font_size, settings.char_width);
			(word, font_size, width)
		})
		.collect();

	let total_width: f64 = sized.iter().map(|(_, _, width)| width).sum();
	let spacing = (viewport.inner_width() - total_width) / (sized.len() + 1) as f64;
	let y = viewport.inner_height() / 2.0;

	let mut cursor = spacing;
	sized
		.into_iter()
		.map(|(word, font_size, width)| {
			let x = cursor + width / 2.0;
			cursor += width + spacing;
			PositionedGlyph { word: word.word, count: word.count, rank: word.rank, font_size, x, y }
		})
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;

	fn table(entries: &[(&str, usize)]) -> FrequencyTable {
		entries.iter().map(|&(word, count)| (word, count)).collect()
	}

	#[test]
	fn test_empty_table_gives_no_glyphs() {
		assert!(layout(&FrequencyTable::new(), &Viewport::default(), &LayoutSettings::default()).is_empty());
	}

	#[test]
	fn test_single_word_is_centered_at_mid_font() {
		let glyphs = layout(&table(&[("x", 5)]), &Viewport::default(), &LayoutSettings::default());
		assert_eq!(glyphs.len(), 1);
		let glyph = &glyphs[0];
		assert_eq!(glyph.font_size, 46.0);
		assert_eq!(glyph.rank, 0);
		assert!((glyph.x - 480.0).abs() < 1e-9);
		assert_eq!(glyph.y, 140.0);
	}

	#[test]
	fn test_select_top_is_stable() {
		let selected = select_top(&table(&[("a", 1), ("b", 3), ("c", 1), ("d", 3), ("e", 2), ("f", 1)]), 5);
		let words: Vec<&str> = selected.iter().map(|word| word.word.as_str()).collect();
		assert_eq!(words, vec!["b", "d", "e", "a", "c"]);
		let ranks: Vec<usize> = selected.iter().map(|word| word.rank).collect();
		assert_eq!(ranks, vec![0, 1, 2, 3, 4]);
	}

	#[test]
	fn test_select_top_smaller_table() {
		assert_eq!(select_top(&table(&[("a", 1), ("b", 2)]), 5).len(), 2);
		assert!(select_top(&table(&[("a", 1)]), 0).is_empty());
	}

	#[test]
	fn test_font_sizes_span_range() {
		let glyphs = layout(&table(&[("one", 1), ("two", 2), ("three", 3)]), &Viewport::default(), &LayoutSettings::default());
		let sizes: Vec<f64> = glyphs.iter().map(|glyph| glyph.font_size).collect();
		assert_eq!(sizes, vec![72.0, 46.0, 20.0]);
	}

	#[test]
	fn test_positions_follow_spacing() {
		let glyphs = layout(&table(&[("ab", 2), ("c", 1)]), &Viewport::default(), &LayoutSettings::default());
		// widths: 0.6 * 72 * 2 = 86.4 and 0.6 * 20 * 1 = 12
		let spacing = (960.0 - 86.4 - 12.0) / 3.0;
		assert!((glyphs[0].x - (spacing + 43.2)).abs() < 1e-9);
		assert!((glyphs[1].x - (spacing + 86.4 + spacing + 6.0)).abs() < 1e-9);
		assert!(glyphs.iter().all(|glyph| glyph.y == 140.0));
	}

	#[test]
	fn test_overflow_gives_negative_spacing() {
		let long = "w".repeat(100);
		let glyphs = layout(&table(&[(long.as_str(), 1)]), &Viewport::default(), &LayoutSettings::default());
		// Still centered even though the word is wider than the viewport.
		assert!((glyphs[0].x - 480.0).abs() < 1e-9);
	}

	#[test]
	fn test_layout_without_nice() {
		let settings = LayoutSettings { nice: false, ..LayoutSettings::default() };
		let glyphs = layout(&table(&[("a", 7), ("b", 3)]), &Viewport::default(), &settings);
		assert_eq!(glyphs[0].font_size, 72.0);
		assert_eq!(glyphs[1].font_size, 20.0);
	}

	#[test]
	fn test_glyph_serializes_camel_case() {
		let glyph = PositionedGlyph { word: "x".into(), count: 1, rank: 0, font_size: 46.0, x: 1.0, y: 2.0 };
		let json = serde_json::to_string(&glyph).unwrap();
		assert!(json.contains("\"fontSize\":46.0"));
	}

	#[test]
	fn test_viewport_to_canvas() {
		let viewport = Viewport::default();
		assert_eq!(viewport.inner_width(), 960.0);
		assert_eq!(viewport.inner_height(), 280.0);
		assert_eq!(viewport.to_canvas(0.0, 0.0), (20.0, 10.0));
	}
}
