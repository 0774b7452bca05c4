/// Default number of ticks used when rounding a domain with `nice`.
pub const NICE_TICKS: usize = 10;

/// Continuous linear mapping from a domain onto a range.
///
/// Values outside the domain are extrapolated, not clamped.
/// A degenerate domain (`start == end`) maps every input to the middle of
/// the range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearScale {
	domain: [f64; 2],
	range: [f64; 2],
}

impl LinearScale {
	pub fn new(domain: [f64; 2], range: [f64; 2]) -> Self {
		Self { domain, range }
	}

	pub fn domain(&self) -> [f64; 2] {
		self.domain
	}

	pub fn range(&self) -> [f64; 2] {
		self.range
	}

	/// Maps `value` from the domain onto the range.
	pub fn scale(&self, value: f64) -> f64 {
		let [d0, d1] = self.domain;
		let [r0, r1] = self.range;
		let span = d1 - d0;
		let t = if span != 0.0 && span.is_finite() { (value - d0) / span } else { 0.5 };
		r0 + t * (r1 - r0)
	}

	/// Extends the domain so that both ends fall on round tick values.
	///
	/// Uses `NICE_TICKS` ticks. See `nice_with`.
	pub fn nice(self) -> Self {
		self.nice_with(NICE_TICKS)
	}

	/// Extends the domain so that both ends are multiples of the tick step
	/// that splits it into roughly `ticks` intervals (1, 2 or 5 times a
	/// power of ten).
	///
	/// The step is recomputed on the widened domain until it stabilizes
	/// (at most 10 rounds). Degenerate or non-finite domains are left as is.
	pub fn nice_with(mut self, ticks: usize) -> Self {
		let [mut start, mut stop] = self.domain;
		let reversed = stop < start;
		if reversed {
			std::mem::swap(&mut start, &mut stop);
		}

		let mut previous_step: Option<f64> = None;
		for _ in 0..10 {
			let Some(step) = tick_increment(start, stop, ticks) else {
				return self;
			};
			if previous_step == Some(step) {
				self.domain = if reversed { [stop, start] } else { [start, stop] };
				return self;
			}
			if step > 0.0 {
				start = (start / step).floor() * step;
				stop = (stop / step).ceil() * step;
			} else {
				start = (start * step).ceil() / step;
				stop = (stop * step).floor() / step;
			}
			previous_step = Some(step);
		}
		self
	}
}

/// Tick step for `[start, stop]` split into about `count` intervals.
///
/// Positive values are the step itself. Negative values encode a fractional
/// step as `-1 / step` so integer arithmetic stays exact
/// (`-10.0` means a step of `0.1`).
///
/// Returns `None` when no finite non-zero step exists.
fn tick_increment(start: f64, stop: f64, count: usize) -> Option<f64> {
	let e10 = 50f64.sqrt();
	let e5 = 10f64.sqrt();
	let e2 = 2f64.sqrt();

	let step = (stop - start) / count.max(1) as f64;
	if !(step.is_finite() && step > 0.0) {
		return None;
	}
	let power = step.log10().floor();
	let error = step / 10f64.powf(power);
	let factor = if error >= e10 {
		10.0
	} else if error >= e5 {
		5.0
	} else if error >= e2 {
		2.0
	} else {
		1.0
	};

	let increment = if power >= 0.0 {
		factor * 10f64.powf(power)
	} else {
		-10f64.powf(-power) / factor
	};
	increment.is_finite().then_some(increment)
}
