use std::ops::Range;

use plotters::style::RGBColor;

use crate::format::round_half_up;

/// Bar colors, cycled by label index.
pub const PALETTE: [RGBColor; 10] = [
	RGBColor(0x4e, 0x79, 0xa7),
	RGBColor(0xf2, 0x8e, 0x2b),
	RGBColor(0xe1, 0x57, 0x59),
	RGBColor(0x76, 0xb7, 0xb2),
	RGBColor(0x59, 0xa1, 0x4f),
	RGBColor(0xed, 0xc9, 0x48),
	RGBColor(0xb0, 0x7a, 0xa1),
	RGBColor(0xff, 0x9d, 0xa7),
	RGBColor(0x9c, 0x75, 0x5f),
	RGBColor(0xba, 0xb0, 0xac),
];

pub fn palette_color(index: usize) -> RGBColor {
	PALETTE[index % PALETTE.len()]
}

/// Decimal places a bar chart's values are shown with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Precision {
	Places(u32),
	Integer,
}

impl Precision {
	pub fn apply(self, value: f64) -> f64 {
		match self {
			Precision::Places(places) => round_half_up(value, places),
			Precision::Integer => round_half_up(value, 0),
		}
	}
}

/// Axis extent for bar values: always includes zero, with headroom above.
pub fn value_range(values: &[f64]) -> Range<f64> {
	let max = values.iter().copied().fold(0.0_f64, f64::max);
	let min = values.iter().copied().fold(0.0_f64, f64::min);
	let top = if max > 0.0 { max * 1.1 } else { 1.0 };
	let bottom = if min < 0.0 { min * 1.1 } else { 0.0 };
	bottom..top
}

/// Axis extent for one scatter coordinate, padded on both sides.
pub fn padded_range(values: impl Iterator<Item = f64>) -> Range<f64> {
	let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
		(lo.min(v), hi.max(v))
	});
	if !min.is_finite() || !max.is_finite() {
		return 0.0..1.0;
	}
	let pad = if max > min { (max - min) * 0.05 } else { 1.0 };
	(min - pad)..(max + pad)
}

/// Category axis for `n` bars. Bar `i` fills the band `i..i + 1`, so the
/// bands tile the whole axis.
pub fn band_axis(n: usize) -> Range<f64> {
	0.0..n.max(1) as f64
}

pub fn band(i: usize) -> Range<f64> {
	i as f64..(i + 1) as f64
}

pub fn band_center(i: usize) -> f64 {
	i as f64 + 0.5
}

/// Label with its 1-based rank, for charts that only know order.
pub fn rank_label(rank: usize, label: &str) -> String {
	format!("#{} {}", rank, label)
}

#[cfg(test)]
mod tests {
	use super::*;
	use plotters::coord::types::RangedCoordf64;
	use plotters::prelude::Ranged;

	#[test]
	fn integer_precision_drops_fraction() {
		assert_eq!(Precision::Integer.apply(4.0), 4.0);
		assert_eq!(Precision::Integer.apply(3.6), 4.0);
		assert_eq!(Precision::Places(4).apply(0.00004), 0.0);
	}

	#[test]
	fn palette_cycles_every_ten() {
		assert_eq!(palette_color(0), palette_color(10));
		assert_ne!(palette_color(0), palette_color(1));
	}

	#[test]
	fn value_range_includes_zero() {
		let range = value_range(&[2.0, 5.0]);
		assert_eq!(range.start, 0.0);
		assert!(range.end > 5.0);
		assert_eq!(value_range(&[0.0, 0.0]), 0.0..1.0);
		let range = value_range(&[-1.0, 2.0]);
		assert!(range.start < -1.0 && range.end > 2.0);
	}

	#[test]
	fn padded_range_handles_single_value() {
		assert_eq!(padded_range([3.0].into_iter()), 2.0..4.0);
		assert_eq!(padded_range(std::iter::empty()), 0.0..1.0);
	}

	#[test]
	fn bands_fill_the_plot_width() {
		for n in 1..=7 {
			let axis: RangedCoordf64 = band_axis(n).into();
			let pixels = (50, 590);
			assert_eq!(axis.map(&band(0).start, pixels), 50);
			assert_eq!(axis.map(&band(n - 1).end, pixels), 590);
			for i in 1..n {
				assert_eq!(band(i - 1).end, band(i).start);
			}
		}
	}

	#[test]
	fn single_bar_is_centered() {
		let axis: RangedCoordf64 = band_axis(1).into();
		assert_eq!(axis.map(&band_center(0), (0, 600)), 300);
	}
}
