use std::collections::HashSet;

/// Built-in English function words excluded from counting.
///
/// Articles, pronouns, conjunctions, prepositions, auxiliaries and a few
/// frequent adverbs. All entries are lowercase.
pub const ENGLISH: &[&str] = &[
	"the", "a", "an", "and", "or", "but", "of", "to", "in", "on", "for", "with", "at", "by", "from",
	"is", "are", "was", "were", "be", "been", "being", "that", "this", "it", "as", "into", "over",
	"up", "down", "out", "about", "between", "through", "there", "their", "them", "they", "you",
	"your", "yours", "i", "me", "my", "we", "our", "ours", "he", "him", "his", "she", "her", "hers",
	"who", "whom", "which", "what", "when", "where", "why", "how", "not", "no", "yes", "so", "if",
	"also", "very", "just", "than", "then", "too", "can", "could", "should", "would", "will",
	"had", "has", "have", "do", "does", "did", "all", "any", "each", "few", "more", "most", "other",
	"some", "such", "only", "own", "same", "both", "every", "because", "while",
];

/// Set of words ignored by the frequency counter.
///
/// Words are stored lowercase and matched case-insensitively.
///
/// # Invariants
/// - Every stored word is lowercase and non-empty
#[derive(Clone, Debug, PartialEq)]
pub struct StopWords {
	words: HashSet<String>,
}

impl StopWords {
	/// The built-in English list (`ENGLISH`).
	pub fn english() -> Self {
		Self::from_words(ENGLISH.iter().copied())
	}

	/// An empty set: every token is counted.
	pub fn empty() -> Self {
		Self { words: HashSet::new() }
	}

	/// Builds a set from arbitrary words.
	///
	/// Words are lowercased and trimmed; blank entries are ignored.
	pub fn from_words<I, S>(words: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		let mut stop_words = Self::empty();
		stop_words.extend(words);
		stop_words
	}

	/// Adds more words to the set (same normalization as `from_words`).
	pub fn extend<I, S>(&mut self, words: I)
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		for word in words {
			let word = word.as_ref().trim().to_lowercase();
			if !word.is_empty() {
				self.words.insert(word);
			}
		}
	}

	/// Returns `true` if `word` is a stop word, ignoring case.
	pub fn contains(&self, word: &str) -> bool {
		if word.chars().any(char::is_uppercase) {
			self.words.contains(&word.to_lowercase())
		} else {
			self.words.contains(word)
		}
	}

	pub fn len(&self) -> usize {
		self.words.len()
	}

	pub fn is_empty(&self) -> bool {
		self.words.is_empty()
	}

	/// All stop words in alphabetical order.
	pub fn sorted(&self) -> Vec<&str> {
		let mut words: Vec<&str> = self.words.iter().map(String::as_str).collect();
		words.sort_unstable();
		words
	}
}

impl Default for StopWords {
	fn default() -> Self {
		Self::english()
	}
}
