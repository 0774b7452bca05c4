use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::stop_words::StopWords;

/// Characters treated as word separators.
///
/// Every occurrence is replaced by a space before splitting, so
/// `"well-known"` yields two tokens and `"end."` yields `"end"`.
pub const PUNCTUATION: &[char] = &[
	'.', ',', '/', '#', '!', '$', '%', '^', '&', '*', ';', ':', '{', '}', '=', '-', '_', '`', '~',
	'(', ')', '"',
];

/// A word and how many times it was seen.
///
/// # Invariants
/// - `word` is non-empty, lowercase and contains no `PUNCTUATION` character
/// - `count >= 1`
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct FrequencyEntry {
	pub word: String,
	pub count: usize,
}

/// Word occurrence counts with unique keys.
///
/// Entries keep the order in which each word was first encountered. That
/// order carries no meaning by itself, but it is the tie-break used by the
/// layout's stable sort.
///
/// Serialized as a plain list of `FrequencyEntry`.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(from = "Vec<FrequencyEntry>", into = "Vec<FrequencyEntry>")]
pub struct FrequencyTable {
	/// Entries in encounter order.
	entries: Vec<FrequencyEntry>,
	/// Word -> position in `entries`.
	index: HashMap<String, usize>,
}

impl FrequencyTable {
	/// Creates an empty table.
	pub fn new() -> Self {
		Self::default()
	}

	/// Records one occurrence of `word`.
	///
	/// Unknown words start at 0 and are incremented, so a new word ends at 1.
	pub fn record(&mut self, word: &str) {
		self.add(word, 1);
	}

	/// Adds `count` occurrences of `word`. A zero count is ignored.
	fn add(&mut self, word: &str, count: usize) {
		if count == 0 || word.is_empty() {
			return;
		}
		match self.index.get(word) {
			Some(&position) => self.entries[position].count += count,
			None => {
				self.index.insert(word.to_owned(), self.entries.len());
				self.entries.push(FrequencyEntry { word: word.to_owned(), count });
			}
		}
	}

	/// Returns the count of `word`, if it was seen.
	pub fn get(&self, word: &str) -> Option<usize> {
		self.index.get(word).map(|&position| self.entries[position].count)
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Iterates over entries in encounter order.
	pub fn iter(&self) -> impl Iterator<Item = &FrequencyEntry> {
		self.entries.iter()
	}

	/// Total number of counted tokens.
	pub fn total(&self) -> usize {
		self.entries.iter().map(|entry| entry.count).sum()
	}
}

/// Order-independent equality: same words with the same counts.
impl PartialEq for FrequencyTable {
	fn eq(&self, other: &Self) -> bool {
		self.len() == other.len()
			&& self.entries.iter().all(|entry| other.get(&entry.word) == Some(entry.count))
	}
}

impl Eq for FrequencyTable {}

/// Duplicated words are merged, blank words and zero counts dropped.
impl From<Vec<FrequencyEntry>> for FrequencyTable {
	fn from(entries: Vec<FrequencyEntry>) -> Self {
		let mut table = Self::new();
		for entry in entries {
			table.add(&entry.word, entry.count);
		}
		table
	}
}

impl From<FrequencyTable> for Vec<FrequencyEntry> {
	fn from(table: FrequencyTable) -> Self {
		table.entries
	}
}

impl<S: AsRef<str>> FromIterator<(S, usize)> for FrequencyTable {
	fn from_iter<I: IntoIterator<Item = (S, usize)>>(iter: I) -> Self {
		let mut table = Self::new();
		for (word, count) in iter {
			table.add(word.as_ref(), count);
		}
		table
	}
}

/// Lowercases `text`, turns punctuation into spaces, collapses whitespace
/// runs into a single space and trims both ends.
///
/// Returns an empty string when nothing but separators remain.
pub fn normalize(text: &str) -> String {
	let lowered = text.to_lowercase();
	let mut cleaned = String::with_capacity(lowered.len());
	let mut pending_space = false;

	for c in lowered.chars() {
		if c.is_whitespace() || PUNCTUATION.contains(&c) {
			pending_space = true;
			continue;
		}
		if pending_space && !cleaned.is_empty() {
			cleaned.push(' ');
		}
		pending_space = false;
		cleaned.push(c);
	}

	cleaned
}

/// Splits normalized text into tokens, skipping stop words.
pub fn tokens<'a>(normalized: &'a str, stop_words: &'a StopWords) -> impl Iterator<Item = &'a str> {
	normalized
		.split(' ')
		.filter(move |token| !token.is_empty() && !stop_words.contains(token))
}

/// Counts word occurrences in `text`, ignoring punctuation, case and
/// stop words.
///
/// Total over all inputs: empty or separator-only text gives an empty table.
///
/// # Example
/// `"Cats chase cats. Cats run."` → `{cats: 3, chase: 1, run: 1}`
pub fn count(text: &str, stop_words: &StopWords) -> FrequencyTable {
	let normalized = normalize(text);
	let mut table = FrequencyTable::new();
	if normalized.is_empty() {
		return table;
	}

	for token in tokens(&normalized, stop_words) {
		table.record(token);
	}
	table
}
