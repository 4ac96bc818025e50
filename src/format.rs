//! Number formatting shared by the charts and the detail modal.

/// Round to `places` decimals, ties away from zero.
///
/// Ties are decided on the shortest decimal form of the scaled value, so
/// `12.345` rounds to `12.35` even though its binary form sits just below.
pub fn round_half_up(value: f64, places: u32) -> f64 {
	if !value.is_finite() {
		return value;
	}
	let factor = 10f64.powi(places as i32);
	let scaled = value * factor;
	let settled: f64 = format!("{:.9}", scaled).parse().unwrap_or(scaled);
	settled.round() / factor
}

/// Integral values print without a fractional part, like the page does.
pub fn format_number(value: f64) -> String {
	if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
		format!("{}", value as i64)
	} else {
		format!("{}", value)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn rounds_half_up_at_stated_precision() {
		assert_eq!(round_half_up(0.123456, 4), 0.1235);
		assert_eq!(round_half_up(12.345, 2), 12.35);
		assert_eq!(round_half_up(0.285, 2), 0.29);
		assert_eq!(round_half_up(2.5, 0), 3.0);
		assert_eq!(round_half_up(-2.5, 0), -3.0);
	}

	#[test]
	fn non_finite_passes_through() {
		assert!(round_half_up(f64::NAN, 2).is_nan());
		assert_eq!(round_half_up(f64::INFINITY, 2), f64::INFINITY);
	}

	#[test]
	fn formats_integral_numbers_without_fraction() {
		assert_eq!(format_number(3.0), "3");
		assert_eq!(format_number(0.25), "0.25");
		assert_eq!(format_number(-2.0), "-2");
	}
}
