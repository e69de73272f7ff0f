// Copyright 2025 the Figura Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tick sampling.
//!
//! A [`Sampler`] turns a numeric range into an ordered list of [`Sample`]s. In
//! [`SamplerMode::AutoDecimal`] it picks a human-friendly step from `{1, 2, 5} × 10^k`
//! so that neighbouring ticks sit at least a requested pixel pitch apart. Every other
//! mode replays a caller-supplied list unchanged.

use alloc::string::String;
use alloc::vec::Vec;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

use crate::format::format_tick;

/// Upper bound on the number of samples a single auto-decimal pass emits.
pub const MAX_SAMPLES: usize = 1000;

const STEP_MULTIPLIERS: [f64; 4] = [1.0, 2.0, 5.0, 10.0];
const STEP_TOLERANCE: f64 = 1e-9;

const PI_LABELS: [&str; 9] = ["0", "π/2", "π", "3π/2", "2π", "5π/2", "3π", "7π/2", "4π"];
const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// One tick: a coordinate and an optional label (`None` draws an unlabeled tick).
#[derive(Clone, Debug, PartialEq)]
pub struct Sample {
    /// Position along the axis, in data units.
    pub coord: f64,
    /// Text shown next to the tick.
    pub label: Option<String>,
}

impl Sample {
    /// An unlabeled tick.
    pub fn new(coord: f64) -> Self {
        Self { coord, label: None }
    }

    /// A labeled tick.
    pub fn labeled(coord: f64, label: impl Into<String>) -> Self {
        Self {
            coord,
            label: Some(label.into()),
        }
    }
}

/// How a [`Sampler`] produces its samples.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SamplerMode {
    /// Decimal steps chosen from the range and pixel span.
    #[default]
    AutoDecimal,
    /// A caller-supplied list.
    Manual,
    /// Multiples of π with fractional labels.
    Angular,
    /// Calendar month names.
    Month,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct AutoInputs {
    min: f64,
    max: f64,
    pixel_span: f64,
    pitch: f64,
}

/// Produces tick samples for an axis.
#[derive(Clone, Debug, Default)]
pub struct Sampler {
    mode: SamplerMode,
    samples: Vec<Sample>,
    last_auto: Option<AutoInputs>,
}

impl Sampler {
    /// An auto-decimal sampler with no samples yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// The current mode.
    pub fn mode(&self) -> SamplerMode {
        self.mode
    }

    /// Switches mode without touching the current samples.
    ///
    /// Switching back to [`SamplerMode::AutoDecimal`] forces the next
    /// [`Sampler::generate`] to recompute.
    pub fn set_mode(&mut self, mode: SamplerMode) {
        self.mode = mode;
        self.last_auto = None;
    }

    /// The current samples, in order.
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Replaces the samples and switches to [`SamplerMode::Manual`].
    ///
    /// An empty list is ignored.
    pub fn set_samples(&mut self, samples: Vec<Sample>) {
        self.replace(SamplerMode::Manual, samples);
    }

    /// Replaces the samples with multiples of π/2 from 0 to 4π.
    pub fn set_pi_samples(&mut self) {
        self.replace(SamplerMode::Angular, pi_samples());
    }

    /// Replaces the samples with the twelve month names at `0..12`.
    pub fn set_month_samples(&mut self) {
        self.replace(SamplerMode::Month, month_samples());
    }

    fn replace(&mut self, mode: SamplerMode, samples: Vec<Sample>) {
        if samples.is_empty() {
            return;
        }
        self.mode = mode;
        self.samples = samples;
        self.last_auto = None;
    }

    /// Returns the samples for `[min, max]` laid out over `pixel_span` pixels with
    /// ticks at least `pitch` pixels apart.
    ///
    /// Only [`SamplerMode::AutoDecimal`] looks at its arguments; the other modes
    /// return their stored list. Repeating the previous inputs reuses the previous
    /// result.
    pub fn generate(&mut self, min: f64, max: f64, pixel_span: f64, pitch: f64) -> &[Sample] {
        if self.mode == SamplerMode::AutoDecimal {
            let inputs = AutoInputs {
                min,
                max,
                pixel_span,
                pitch,
            };
            if self.last_auto != Some(inputs) {
                self.auto_sample_decimal(min, max, pixel_span, pitch);
            }
        }
        &self.samples
    }

    /// Recomputes decimal samples for `[min, max]` unconditionally.
    ///
    /// Non-finite ranges and non-positive spans or pitches leave the samples unchanged.
    pub fn auto_sample_decimal(&mut self, min: f64, max: f64, pixel_span: f64, pitch: f64) {
        if !min.is_finite() || !max.is_finite() || !is_positive(pixel_span) || !is_positive(pitch) {
            return;
        }
        self.last_auto = Some(AutoInputs {
            min,
            max,
            pixel_span,
            pitch,
        });
        self.samples.clear();
        if min == max {
            self.samples
                .push(Sample::labeled(min + 0.0, format_tick(min, 0.0)));
            return;
        }
        let (lo, hi) = if min < max { (min, max) } else { (max, min) };
        let Some(step) = decimal_step(hi - lo, pixel_span, pitch) else {
            return;
        };
        let first = (lo / step - STEP_TOLERANCE).ceil();
        for i in 0..MAX_SAMPLES {
            // Multiply instead of accumulating so long runs do not drift.
            let coord = (first + i as f64) * step + 0.0;
            if coord > hi + step * STEP_TOLERANCE {
                break;
            }
            self.samples
                .push(Sample::labeled(coord, format_tick(coord, step)));
        }
    }
}

/// Picks the smallest step in `{1, 2, 5} × 10^k` whose ticks land at least `pitch`
/// pixels apart when `range` data units span `pixel_span` pixels.
pub fn decimal_step(range: f64, pixel_span: f64, pitch: f64) -> Option<f64> {
    let range = range.abs();
    if !range.is_finite() || range == 0.0 || !is_positive(pixel_span) || !is_positive(pitch) {
        return None;
    }
    let raw = range * pitch / pixel_span;
    if !raw.is_finite() || raw <= 0.0 {
        return None;
    }
    #[allow(
        clippy::cast_possible_truncation,
        reason = "finite, positive f64 exponents fit comfortably in i32"
    )]
    let exponent = raw.log10().floor() as i32;
    let base = 10_f64.powi(exponent);
    STEP_MULTIPLIERS
        .iter()
        .map(|m| m * base)
        .find(|step| *step >= raw * (1.0 - STEP_TOLERANCE))
}

fn is_positive(v: f64) -> bool {
    v > 0.0
}

/// Multiples of π/2 from 0 to 4π, labeled with fractions of π.
pub fn pi_samples() -> Vec<Sample> {
    PI_LABELS
        .iter()
        .enumerate()
        .map(|(i, label)| Sample::labeled(i as f64 * core::f64::consts::FRAC_PI_2, *label))
        .collect()
}

/// The twelve month abbreviations at coordinates `0..12`.
pub fn month_samples() -> Vec<Sample> {
    MONTH_LABELS
        .iter()
        .enumerate()
        .map(|(i, label)| Sample::labeled(i as f64, *label))
        .collect()
}
