// Copyright 2025 the Figura Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tick label formatting.

use alloc::format;
use alloc::string::String;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

/// Magnitudes outside `[SCI_MIN, SCI_MAX)` are written in scientific notation.
const SCI_MIN: f64 = 1e-4;
const SCI_MAX: f64 = 1e6;
const MAX_DECIMALS: usize = 10;

/// Formats a tick value so that every label of a run with the given `step`
/// shows the same number of decimals and nothing more.
///
/// A non-positive `step` (e.g. a single tick) falls back to the shortest exact form.
pub fn format_tick(value: f64, step: f64) -> String {
    if !value.is_finite() {
        return format!("{value}");
    }
    let has_step = step.is_finite() && step > 0.0;
    let magnitude = value.abs();
    if magnitude != 0.0 && !(SCI_MIN..SCI_MAX).contains(&magnitude) {
        let exponent = magnitude.log10().floor();
        #[allow(
            clippy::cast_possible_truncation,
            reason = "finite f64 exponents fit comfortably in i32"
        )]
        let scale = 10_f64.powi(exponent as i32);
        let mantissa = value / scale;
        let decimals = if has_step {
            decimals_for_step(step / scale)
        } else {
            3
        };
        let mantissa = trim_zeros(format!("{mantissa:.decimals$}"));
        return format!("{mantissa}e{exponent}");
    }
    if !has_step {
        return strip_negative_zero(format!("{}", value + 0.0));
    }
    let decimals = decimals_for_step(step);
    strip_negative_zero(format!("{value:.decimals$}"))
}

/// Smallest number of decimals that represents `step` exactly.
fn decimals_for_step(step: f64) -> usize {
    let mut scaled = step;
    for decimals in 0..MAX_DECIMALS {
        if (scaled - scaled.round()).abs() <= 1e-9 * scaled.abs().max(1.0) {
            return decimals;
        }
        scaled *= 10.0;
    }
    MAX_DECIMALS
}

fn trim_zeros(s: String) -> String {
    if !s.contains('.') {
        return s;
    }
    let trimmed = s.trim_end_matches('0').trim_end_matches('.');
    String::from(trimmed)
}

fn strip_negative_zero(s: String) -> String {
    match s.strip_prefix('-') {
        Some(rest) if rest.chars().all(|c| c == '0' || c == '.') => String::from(rest),
        _ => s,
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn decimals_follow_the_step() {
        assert_eq!(format_tick(20.0, 20.0), "20");
        assert_eq!(format_tick(0.30000000000000004, 0.1), "0.3");
        assert_eq!(format_tick(1.0, 0.25), "1.00");
        assert_eq!(format_tick(0.0, 0.5), "0.0");
    }

    #[test]
    fn negative_zero_is_plain_zero() {
        assert_eq!(format_tick(-0.0, 1.0), "0");
        assert_eq!(format_tick(-0.0, 0.0), "0");
        assert_eq!(format_tick(-0.01, 0.5), "0.0");
    }

    #[test]
    fn single_values_use_the_shortest_form() {
        assert_eq!(format_tick(5.0, 0.0), "5");
        assert_eq!(format_tick(0.125, 0.0), "0.125");
    }

    #[test]
    fn extreme_magnitudes_use_scientific_notation() {
        assert_eq!(format_tick(2.5e6, 5e5), "2.5e6");
        assert_eq!(format_tick(1.5e-5, 5e-6), "1.5e-5");
        assert_eq!(format_tick(-3e7, 0.0), "-3e7");
    }
}
