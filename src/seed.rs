//! Deterministic pseudo-random values derived from a string seed.
//!
//! A wallet address (or any other string) is folded into a 32-bit seed, and
//! every "random" value shown in the demo is a pure function of that seed and
//! a caller-chosen offset. Reloading the page with the same wallet shows the
//! same tokens, scores, and PnL.
//!
//! None of this is suitable for anything security related.

use crate::error::{Error, Result};

/// Folds `input` into a stable 32-bit seed.
///
/// Computes `h = h * 31 + unit` over the UTF-16 code units of `input`, written
/// as `(h << 5) - h + unit`, with two's-complement 32-bit signed wraparound at
/// every step. This matches the string hash browsers have been running for the
/// demo, so seeds agree bit for bit with the web build. The empty string maps
/// to `0`.
pub fn seed_from_string(input: &str) -> i32 {
	input.encode_utf16().fold(0i32, |hash, unit| {
		hash.wrapping_shl(5)
			.wrapping_sub(hash)
			.wrapping_add(i32::from(unit))
	})
}

/// Index into a collection of `len` items, `|seed + offset| % len`.
///
/// The sum is taken in 64 bits so negative seeds and large offsets never
/// produce a negative or overflowing index.
fn index_for(seed: i32, offset: i64, len: usize) -> usize {
	let magnitude = i64::from(seed).wrapping_add(offset).unsigned_abs();
	(magnitude % len as u64) as usize
}

/// Deterministically picks one of `options`.
pub fn pick<T>(seed: i32, offset: i64, options: &[T]) -> Result<&T> {
	if options.is_empty() {
		return Err(Error::EmptyOptions);
	}
	Ok(&options[index_for(seed, offset, options.len())])
}

/// Like [`pick`], but the index goes through [`unit`].
///
/// `pick` cycles with the offset, so offsets spaced by a multiple of
/// `options.len()` all land on the same item. Use this when a generator
/// reserves a fixed block of offsets per record.
pub fn choose<T>(seed: i32, offset: i64, options: &[T]) -> Result<&T> {
	if options.is_empty() {
		return Err(Error::EmptyOptions);
	}
	let idx = (unit(seed, offset) * options.len() as f64) as usize;
	Ok(&options[idx.min(options.len() - 1)])
}

/// Uniform fraction in `[0, 1)` for a `(seed, offset)` pair.
///
/// Uses a 64-bit avalanche mix so neighbouring offsets give unrelated values.
pub fn unit(seed: i32, offset: i64) -> f64 {
	const GOLDEN: u64 = 0x9E37_79B9_7F4A_7C15;

	let mut z = (i64::from(seed) as u64).rotate_left(32) ^ (offset as u64).wrapping_mul(GOLDEN);
	z = z.wrapping_add(GOLDEN);
	z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
	z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
	z ^= z >> 31;

	// Top 53 bits fill an f64 mantissa exactly.
	(z >> 11) as f64 / (1u64 << 53) as f64
}

/// Deterministic value in `[min, max)`. Returns `min` when the range is empty.
pub fn scaled_value(seed: i32, offset: i64, min: f64, max: f64) -> f64 {
	if max <= min {
		return min;
	}
	min + unit(seed, offset) * (max - min)
}

/// Deterministic biased coin: `true` with probability `p`.
pub fn chance(seed: i32, offset: i64, p: f64) -> bool {
	unit(seed, offset) < p
}

#[cfg(test)]
mod tests {
	use super::*;

	const TOKENS: [&str; 5] = ["SOL", "BTC", "ETH", "AVAX", "MATIC"];

	#[test]
	fn seed_matches_known_values() {
		assert_eq!(seed_from_string(""), 0);
		assert_eq!(seed_from_string("a"), 97);
		assert_eq!(seed_from_string("ab"), 97 * 31 + 98);
		assert_eq!(seed_from_string("hello"), 99_162_322);
	}

	#[test]
	fn seed_wraps_instead_of_overflowing() {
		let long = "0x".to_string() + &"f".repeat(64);
		// Would overflow without wraparound; must be stable across calls.
		assert_eq!(seed_from_string(&long), seed_from_string(&long));
		assert_ne!(seed_from_string(&long), 0);
	}

	#[test]
	fn seed_is_order_sensitive() {
		assert_ne!(seed_from_string("ab"), seed_from_string("ba"));
	}

	#[test]
	fn wallet_always_picks_the_same_token() {
		let h = seed_from_string("0xABC...123");
		let first = pick(h, 0, &TOKENS).unwrap();
		for _ in 0..10 {
			assert_eq!(pick(seed_from_string("0xABC...123"), 0, &TOKENS).unwrap(), first);
		}
	}

	#[test]
	fn pick_stays_in_bounds_for_extreme_inputs() {
		let seeds = [i32::MIN, -7, -1, 0, 1, 42, i32::MAX];
		let offsets = [i64::MIN, -100, 0, 3, i64::MAX];
		for &seed in &seeds {
			for &offset in &offsets {
				let token = pick(seed, offset, &TOKENS).unwrap();
				assert!(TOKENS.contains(token));
			}
		}
	}

	#[test]
	fn pick_uses_absolute_value_of_sum() {
		// |-7 + 0| % 5 == 2
		assert_eq!(*pick(-7, 0, &TOKENS).unwrap(), "ETH");
		// |3 + 4| % 5 == 2
		assert_eq!(*pick(3, 4, &TOKENS).unwrap(), "ETH");
	}

	#[test]
	fn pick_rejects_empty_options() {
		let empty: [u8; 0] = [];
		assert!(matches!(pick(1, 1, &empty), Err(Error::EmptyOptions)));
	}

	#[test]
	fn scaled_value_respects_range() {
		for offset in 0..500 {
			let v = scaled_value(-12345, offset, 0.6, 0.99);
			assert!((0.6..0.99).contains(&v), "{v} out of range");
		}
		assert_eq!(scaled_value(1, 1, 5.0, 5.0), 5.0);
	}

	#[test]
	fn unit_varies_with_offset() {
		let a = unit(99, 1);
		let b = unit(99, 2);
		assert_ne!(a, b);
		assert_eq!(a, unit(99, 1));
	}

	#[test]
	fn chance_extremes() {
		for offset in 0..50 {
			assert!(!chance(7, offset, 0.0));
			assert!(chance(7, offset, 1.0));
		}
	}

	#[test]
	fn choose_spreads_over_strided_offsets() {
		let seed = seed_from_string("0xABC...123");
		let picked: std::collections::HashSet<_> = (0..40)
			.map(|i| *pick(seed, i * 64 + 2, &TOKENS[..4]).unwrap())
			.collect();
		assert_eq!(picked.len(), 1);

		let chosen: std::collections::HashSet<_> = (0..40)
			.map(|i| *choose(seed, i * 64 + 2, &TOKENS[..4]).unwrap())
			.collect();
		assert!(chosen.len() > 1);

		let empty: [u8; 0] = [];
		assert!(matches!(choose(seed, 0, &empty), Err(Error::EmptyOptions)));
	}
}
