use std::collections::{HashMap, HashSet};
use std::time::Duration;

use log::debug;
use serde::{Deserialize, Serialize};

use super::layout::PositionedGlyph;

/// Animation lengths, in milliseconds.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct Durations {
	/// Growth of a new word from size 0.
	pub enter_ms: u64,
	/// Move and resize of a word that stays displayed.
	pub update_ms: u64,
	/// Shrink and fade of a word that is no longer displayed.
	pub exit_ms: u64,
}

impl Durations {
	pub fn enter(&self) -> Duration {
		Duration::from_millis(self.enter_ms)
	}

	pub fn update(&self) -> Duration {
		Duration::from_millis(self.update_ms)
	}

	pub fn exit(&self) -> Duration {
		Duration::from_millis(self.exit_ms)
	}
}

impl Default for Durations {
	fn default() -> Self {
		Self { enter_ms: 650, update_ms: 700, exit_ms: 400 }
	}
}

/// Displayed attributes of a glyph at one instant.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlyphState {
	pub x: f64,
	pub y: f64,
	pub font_size: f64,
	pub opacity: f64,
}

impl GlyphState {
	fn target(glyph: &PositionedGlyph) -> Self {
		Self { x: glyph.x, y: glyph.y, font_size: glyph.font_size, opacity: 1.0 }
	}

	fn lerp(&self, to: &Self, t: f64) -> Self {
		let mix = |a: f64, b: f64| a + (b - a) * t;
		Self {
			x: mix(self.x, to.x),
			y: mix(self.y, to.y),
			font_size: mix(self.font_size, to.font_size),
			opacity: mix(self.opacity, to.opacity),
		}
	}
}

/// Lifecycle phase of a displayed word.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
	Entering,
	Updating,
	Exiting,
}

/// What the host should draw for one word at one instant.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderedGlyph {
	pub word: String,
	pub phase: Phase,
	pub x: f64,
	pub y: f64,
	pub font_size: f64,
	pub opacity: f64,
}

/// Words sorted by how a layout changed the stage.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Reconciliation {
	pub entered: Vec<String>,
	pub updated: Vec<String>,
	pub exited: Vec<String>,
}

/// One animated word: where it comes from, where it goes, and when.
#[derive(Clone, Debug)]
struct Track {
	word: String,
	phase: Phase,
	from: GlyphState,
	to: GlyphState,
	/// Start time, in seconds on the host clock.
	start: f64,
	/// Length in seconds.
	duration: f64,
}

impl Track {
	fn progress(&self, now: f64) -> f64 {
		if self.duration <= 0.0 {
			return 1.0;
		}
		((now - self.start) / self.duration).clamp(0.0, 1.0)
	}

	fn state_at(&self, now: f64) -> GlyphState {
		self.from.lerp(&self.to, ease_cubic_in_out(self.progress(now)))
	}

	fn is_running(&self, now: f64) -> bool {
		now < self.start + self.duration
	}

	fn retarget(&mut self, phase: Phase, to: GlyphState, now: f64, duration: Duration) {
		self.from = self.state_at(now);
		self.to = to;
		self.phase = phase;
		self.start = now;
		self.duration = duration.as_secs_f64();
	}
}

/// Symmetric cubic easing: slow start, fast middle, slow end.
pub fn ease_cubic_in_out(t: f64) -> f64 {
	let t = t * 2.0;
	if t <= 1.0 {
		t * t * t / 2.0
	} else {
		let t = t - 2.0;
		(t * t * t + 2.0) / 2.0
	}
}

/// Keyed enter/update/exit reconciliation of successive layouts.
///
/// Glyphs are matched across calls to `apply` by their word. Each call
/// retargets every live word from wherever it is currently displayed, so
/// the latest layout always wins over animations still in flight.
///
/// The stage holds no clock: every method takes `now`, in seconds, from
/// the host's own time source.
///
/// # Invariants
/// - At most one track per word
/// - Tracks keep the order in which their word first appeared
#[derive(Clone, Debug, Default)]
pub struct Stage {
	tracks: Vec<Track>,
	durations: Durations,
}

impl Stage {
	pub fn new(durations: Durations) -> Self {
		Self { tracks: Vec::new(), durations }
	}

	pub fn durations(&self) -> Durations {
		self.durations
	}

	/// Number of words currently on stage, exiting ones included.
	pub fn len(&self) -> usize {
		self.tracks.len()
	}

	pub fn is_empty(&self) -> bool {
		self.tracks.is_empty()
	}

	/// Reconciles the stage with a new layout.
	///
	/// - New words enter at their position and grow from size 0.
	/// - Words present in both move and resize to their new values.
	/// - Missing words shrink and fade out, then wait for `prune`.
	///
	/// Words whose exit has finished are pruned first, so a word that
	/// comes back after fading out enters again.
	///
	/// An empty layout removes every word at once, without animation.
	pub fn apply(&mut self, glyphs: &[PositionedGlyph], now: f64) -> Reconciliation {
		let mut reconciliation = Reconciliation::default();

		if glyphs.is_empty() {
			reconciliation.exited = self.tracks.drain(..).map(|track| track.word).collect();
			debug!("Stage cleared, {} glyphs removed", reconciliation.exited.len());
			return reconciliation;
		}

		// A word whose exit is over is gone: if it comes back, it enters again.
		self.prune(now);

		let mut incoming: HashMap<&str, &PositionedGlyph> = HashMap::with_capacity(glyphs.len());
		for glyph in glyphs {
			incoming.entry(glyph.word.as_str()).or_insert(glyph);
		}

		let durations = self.durations;
		let mut seen: HashSet<String> = HashSet::with_capacity(self.tracks.len());
		for track in &mut self.tracks {
			seen.insert(track.word.clone());
			match incoming.get(track.word.as_str()) {
				Some(glyph) => {
					track.retarget(Phase::Updating, GlyphState::target(glyph), now, durations.update());
					reconciliation.updated.push(track.word.clone());
				}
				None if track.phase != Phase::Exiting => {
					let current = track.state_at(now);
					let gone = GlyphState { font_size: 0.0, opacity: 0.0, ..current };
					track.retarget(Phase::Exiting, gone, now, durations.exit());
					reconciliation.exited.push(track.word.clone());
				}
				None => {}
			}
		}

		for glyph in glyphs {
			if !seen.insert(glyph.word.clone()) {
				continue;
			}
			let to = GlyphState::target(glyph);
			self.tracks.push(Track {
				word: glyph.word.clone(),
				phase: Phase::Entering,
				from: GlyphState { font_size: 0.0, ..to },
				to,
				start: now,
				duration: durations.enter().as_secs_f64(),
			});
			reconciliation.entered.push(glyph.word.clone());
		}

		debug!(
			"Stage reconciled: {} entered, {} updated, {} exited",
			reconciliation.entered.len(),
			reconciliation.updated.len(),
			reconciliation.exited.len()
		);
		reconciliation
	}

	/// Drops words whose exit animation has finished.
	///
	/// Returns the removed words.
	pub fn prune(&mut self, now: f64) -> Vec<String> {
		let mut removed = Vec::new();
		self.tracks.retain(|track| {
			let done = track.phase == Phase::Exiting && !track.is_running(now);
			if done {
				removed.push(track.word.clone());
			}
			!done
		});
		removed
	}

	/// Interpolated attributes of every visible word at `now`.
	///
	/// Words whose exit has completed are skipped even before `prune`.
	pub fn sample(&self, now: f64) -> Vec<RenderedGlyph> {
		self.tracks
			.iter()
			.filter(|track| track.phase != Phase::Exiting || track.is_running(now))
			.map(|track| {
				let state = track.state_at(now);
				RenderedGlyph {
					word: track.word.clone(),
					phase: track.phase,
					x: state.x,
					y: state.y,
					font_size: state.font_size,
					opacity: state.opacity,
				}
			})
			.collect()
	}

	/// Returns `true` while any animation is still running.
	pub fn is_animating(&self, now: f64) -> bool {
		self.tracks.iter().any(|track| track.is_running(now))
	}

	/// Removes every word immediately.
	pub fn clear(&mut self) {
		self.tracks.clear();
	}
}
