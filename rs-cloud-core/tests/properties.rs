use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use rs_cloud_core::model::frequency::{count, FrequencyTable, PUNCTUATION};
use rs_cloud_core::model::layout::{layout, select_top, LayoutSettings, Viewport};
use rs_cloud_core::model::stop_words::StopWords;
use rs_cloud_core::model::transition::Stage;

const ALPHABET: &[char] = &[
	'a', 'b', 'c', 'E', 'F', 'x', 'y', 'z', 'é', ' ', ' ', '\n', '\t', '.', ',', '-', '"', '(', ')',
	'!', '?', '\'', '#', '_', '~', '1', '2',
];

const VOCABULARY: &[&str] = &[
	"the", "a", "rust", "Rust", "crab", "cargo", "borrow", "borrow-checker", "of", "lifetimes",
	"trait", "impl", "while", "async", "zero-cost",
];

fn random_text(rng: &mut StdRng) -> String {
	let len = rng.random_range(0..200);
	(0..len).map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())]).collect()
}

fn random_sentence(rng: &mut StdRng) -> String {
	let len = rng.random_range(0..60);
	let words: Vec<&str> = (0..len).map(|_| VOCABULARY[rng.random_range(0..VOCABULARY.len())]).collect();
	words.join(" ")
}

#[test]
fn test_counted_words_are_clean() {
	let mut rng = StdRng::seed_from_u64(7);
	let stop_words = StopWords::english();
	for _ in 0..500 {
		let text = random_text(&mut rng);
		let table = count(&text, &stop_words);
		for entry in table.iter() {
			assert!(!entry.word.is_empty(), "empty word from {text:?}");
			assert!(!entry.word.contains(PUNCTUATION), "punctuation in {:?} from {text:?}", entry.word);
			assert!(!entry.word.contains(char::is_whitespace));
			assert_eq!(entry.word, entry.word.to_lowercase());
			assert!(entry.count >= 1);
			assert!(!stop_words.contains(&entry.word));
		}
	}
}

#[test]
fn test_count_is_repeatable() {
	let mut rng = StdRng::seed_from_u64(11);
	let stop_words = StopWords::english();
	for _ in 0..200 {
		let text = random_sentence(&mut rng);
		assert_eq!(count(&text, &stop_words), count(&text, &stop_words));
	}
}

#[test]
fn test_counts_add_up() {
	let mut rng = StdRng::seed_from_u64(13);
	let stop_words = StopWords::empty();
	for _ in 0..200 {
		let text = random_sentence(&mut rng);
		let table = count(&text, &stop_words);
		let tokens = text
			.split(|c: char| c.is_whitespace() || PUNCTUATION.contains(&c))
			.filter(|token| !token.is_empty())
			.count();
		assert_eq!(table.total(), tokens);
	}
}

#[test]
fn test_font_size_grows_with_count() {
	let mut rng = StdRng::seed_from_u64(17);
	let stop_words = StopWords::english();
	for _ in 0..300 {
		let text = random_sentence(&mut rng);
		let glyphs = layout(&count(&text, &stop_words), &Viewport::default(), &LayoutSettings::default());
		for a in &glyphs {
			for b in &glyphs {
				if a.count > b.count {
					assert!(a.font_size >= b.font_size, "{a:?} smaller than {b:?}");
				}
			}
			assert!((20.0..=72.0).contains(&a.font_size));
		}
	}
}

#[test]
fn test_top_k_is_the_highest_counts() {
	let mut rng = StdRng::seed_from_u64(19);
	for _ in 0..200 {
		let size = rng.random_range(6..30);
		let table: FrequencyTable = (0..size).map(|i| (format!("w{i}"), rng.random_range(1..6usize))).collect();

		let selected = select_top(&table, 5);
		assert_eq!(selected.len(), 5);

		// Expected: stable sort over encounter order.
		let mut expected: Vec<_> = table.iter().collect();
		expected.sort_by(|a, b| b.count.cmp(&a.count));
		for (rank, (got, want)) in selected.iter().zip(expected).enumerate() {
			assert_eq!(got.word, want.word);
			assert_eq!(got.count, want.count);
			assert_eq!(got.rank, rank);
		}
	}
}

#[test]
fn test_layout_is_deterministic() {
	let mut rng = StdRng::seed_from_u64(23);
	let stop_words = StopWords::english();
	for _ in 0..100 {
		let table = count(&random_sentence(&mut rng), &stop_words);
		let viewport = Viewport::new(rng.random_range(200.0..2000.0), rng.random_range(100.0..600.0));
		let settings = LayoutSettings::default();
		assert_eq!(layout(&table, &viewport, &settings), layout(&table, &viewport, &settings));
	}
}

#[test]
fn test_words_are_placed_left_to_right() {
	let table = count("alpha alpha alpha beta beta gamma delta delta delta delta", &StopWords::english());
	let glyphs = layout(&table, &Viewport::default(), &LayoutSettings::default());
	let words: Vec<&str> = glyphs.iter().map(|glyph| glyph.word.as_str()).collect();
	assert_eq!(words, vec!["delta", "alpha", "beta", "gamma"]);
	assert!(glyphs.windows(2).all(|pair| pair[0].x < pair[1].x));
	assert!(glyphs.iter().all(|glyph| glyph.x > 0.0 && glyph.x < 960.0));
}

#[test]
fn test_generate_cycle_through_stage() {
	let stop_words = StopWords::english();
	let viewport = Viewport::default();
	let settings = LayoutSettings::default();
	let mut stage = Stage::default();

	let first = layout(&count("cats chase mice, cats nap", &stop_words), &viewport, &settings);
	let reconciliation = stage.apply(&first, 0.0);
	assert_eq!(reconciliation.entered, vec!["cats", "chase", "mice", "nap"]);

	let second = layout(&count("dogs chase cats", &stop_words), &viewport, &settings);
	let reconciliation = stage.apply(&second, 1.0);
	assert_eq!(reconciliation.updated, vec!["cats", "chase"]);
	assert_eq!(reconciliation.exited, vec!["mice", "nap"]);
	assert_eq!(reconciliation.entered, vec!["dogs"]);

	stage.prune(2.0);
	let mut shown: Vec<String> = stage.sample(2.0).into_iter().map(|glyph| glyph.word).collect();
	shown.sort();
	assert_eq!(shown, vec!["cats", "chase", "dogs"]);

	let third = layout(&count("the of and", &stop_words), &viewport, &settings);
	assert!(third.is_empty());
	stage.apply(&third, 3.0);
	assert!(stage.is_empty());
}
