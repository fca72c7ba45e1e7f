//! Mock trading signals.

use log::debug;
use serde::{Deserialize, Serialize};

use super::risk::RiskProfile;
use crate::error::Result;
use crate::seed::{chance, choose, scaled_value};

/// Where a signal supposedly came from. Only affects the icon and node colour.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
	/// Posted on X/Twitter.
	Twitter,
	/// Posted in a Telegram channel.
	Telegram,
	/// Konnect network feed.
	Konnect,
}

/// Trade direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
	/// Expects the price to rise.
	Long,
	/// Expects the price to fall.
	Short,
}

impl Direction {
	/// `1.0` for long, `-1.0` for short.
	pub fn sign(self) -> f64 {
		match self {
			Direction::Long => 1.0,
			Direction::Short => -1.0,
		}
	}
}

/// A purported trading opportunity.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Signal {
	/// Unique per generated set, `sig-<seed>-<index>`.
	pub id: String,
	/// Display name of the handle or channel.
	pub source: String,
	/// Channel kind of `source`.
	pub source_type: SourceType,
	/// Token symbol, one of [`TOKENS`].
	pub token: String,
	/// In `[0, 1]`.
	pub confidence: f64,
	/// Suggested trade direction.
	pub direction: Direction,
	/// Creation time, epoch milliseconds.
	pub timestamp: i64,
	/// Sparkline samples, oldest first.
	pub pnl_history: Vec<f64>,
	/// In `[0, 100]`.
	pub social_engagement: f64,
	/// In `[0, 100]`.
	pub onchain_confirmation: f64,
	/// Ids of related signals; strengthens graph edges.
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub relations: Vec<String>,
}

/// Tokens the demo trades.
pub const TOKENS: [&str; 8] = ["SOL", "BTC", "ETH", "AVAX", "MATIC", "ARB", "OP", "LINK"];

/// Named sources and their channel type.
pub const SOURCES: [(&str, SourceType); 8] = [
	("@CryptoWhale", SourceType::Twitter),
	("@DeFiDegen", SourceType::Twitter),
	("@OnChainWizard", SourceType::Twitter),
	("AlphaCalls", SourceType::Telegram),
	("WhaleAlerts", SourceType::Telegram),
	("GemHunters", SourceType::Telegram),
	("Konnect Alpha", SourceType::Konnect),
	("Konnect Pro", SourceType::Konnect),
];

const PNL_SAMPLES: usize = 12;
const MAX_AGE_MS: f64 = 6.0 * 60.0 * 60.0 * 1000.0;

/// Offsets reserved per signal so fields never share a DPRG draw.
const STRIDE: i64 = 64;
const PNL_SLOT: i64 = 16;

/// Synthesizes `count` signals from `seed`.
///
/// Identical inputs give identical output. Timestamps fall within the six
/// hours before `now_ms`.
pub fn generate_signals(seed: i32, count: usize, now_ms: i64) -> Result<Vec<Signal>> {
	let mut signals: Vec<Signal> = Vec::with_capacity(count);

	for i in 0..count {
		let base = i as i64 * STRIDE;
		let &(source, source_type) = choose(seed, base + 1, &SOURCES)?;
		let token = *choose(seed, base + 2, &TOKENS)?;
		let direction = if chance(seed, base + 3, 0.65) {
			Direction::Long
		} else {
			Direction::Short
		};
		let age = scaled_value(seed, base + 4, 0.0, MAX_AGE_MS) as i64;

		let mut pnl = 0.0;
		let pnl_history = (0..PNL_SAMPLES as i64)
			.map(|k| {
				pnl += scaled_value(seed, base + PNL_SLOT + k, -1.5, 2.0);
				pnl
			})
			.collect();

		let mut relations = Vec::new();
		if !signals.is_empty() && chance(seed, base + 8, 0.3) {
			relations.push(choose(seed, base + 9, &signals)?.id.clone());
		}

		signals.push(Signal {
			id: format!("sig-{:08x}-{i}", seed as u32),
			source: source.to_string(),
			source_type,
			token: token.to_string(),
			confidence: scaled_value(seed, base + 5, 0.6, 0.99),
			direction,
			timestamp: now_ms - age,
			pnl_history,
			social_engagement: scaled_value(seed, base + 6, 0.0, 100.0),
			onchain_confirmation: scaled_value(seed, base + 7, 20.0, 100.0),
			relations,
		});
	}

	debug!("echo-signals: generated {} signals", signals.len());
	Ok(signals)
}

/// Generates `count` candidates and keeps those `profile` surfaces.
pub fn signals_for_profile(
	seed: i32,
	count: usize,
	now_ms: i64,
	profile: RiskProfile,
) -> Result<Vec<Signal>> {
	let mut signals = generate_signals(seed, count, now_ms)?;
	signals.retain(|s| profile.accepts(s.confidence));
	debug!(
		"echo-signals: {} of {count} signals pass the {profile} filter",
		signals.len()
	);
	Ok(signals)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::seed::seed_from_string;

	const NOW: i64 = 1_700_000_000_000;

	#[test]
	fn generation_is_repeatable() {
		let seed = seed_from_string("0xABC...123");
		let a = generate_signals(seed, 20, NOW).unwrap();
		let b = generate_signals(seed, 20, NOW).unwrap();
		assert_eq!(a, b);
	}

	#[test]
	fn different_wallets_differ() {
		let a = generate_signals(seed_from_string("0xAAA"), 10, NOW).unwrap();
		let b = generate_signals(seed_from_string("0xBBB"), 10, NOW).unwrap();
		assert_ne!(a, b);
	}

	#[test]
	fn fields_stay_in_their_ranges() {
		let signals = generate_signals(-424_242, 50, NOW).unwrap();
		assert_eq!(signals.len(), 50);
		for s in &signals {
			assert!((0.0..=1.0).contains(&s.confidence));
			assert!((0.0..=100.0).contains(&s.social_engagement));
			assert!((0.0..=100.0).contains(&s.onchain_confirmation));
			assert!(s.timestamp <= NOW && s.timestamp > NOW - MAX_AGE_MS as i64);
			assert_eq!(s.pnl_history.len(), PNL_SAMPLES);
			assert!(TOKENS.contains(&s.token.as_str()));
			assert!(SOURCES.iter().any(|(name, ty)| *name == s.source && *ty == s.source_type));
		}
	}

	#[test]
	fn ids_are_unique_and_relations_point_backwards() {
		let signals = generate_signals(77, 40, NOW).unwrap();
		let mut ids: Vec<_> = signals.iter().map(|s| s.id.as_str()).collect();
		ids.sort_unstable();
		ids.dedup();
		assert_eq!(ids.len(), signals.len());

		for (i, s) in signals.iter().enumerate() {
			for rel in &s.relations {
				let target = signals.iter().position(|o| &o.id == rel).unwrap();
				assert!(target < i);
			}
		}
	}

	#[test]
	fn profile_filters_apply() {
		let seed = seed_from_string("0xfeedbeef");
		for s in signals_for_profile(seed, 60, NOW, RiskProfile::Conservative).unwrap() {
			assert!(s.confidence > 0.85);
		}
		for s in signals_for_profile(seed, 60, NOW, RiskProfile::Balanced).unwrap() {
			assert!(s.confidence > 0.75);
		}
		let all = signals_for_profile(seed, 60, NOW, RiskProfile::Aggressive).unwrap();
		assert_eq!(all.len(), 60);
	}

	#[test]
	fn wallets_get_a_mix_of_tokens_and_sources() {
		use std::collections::HashSet;

		for wallet in ["0xABC...123", "0xfeedbeef", "0x1234", "hello"] {
			let signals = generate_signals(seed_from_string(wallet), 12, 0).unwrap();
			let tokens: HashSet<_> = signals.iter().map(|s| s.token.as_str()).collect();
			let sources: HashSet<_> = signals.iter().map(|s| s.source.as_str()).collect();
			assert!(tokens.len() > 1, "{wallet}: {tokens:?}");
			assert!(sources.len() > 1, "{wallet}: {sources:?}");

			let edges = crate::layout::build_edges(&signals);
			assert!(edges.len() < 12 * 11 / 2, "{wallet}: complete graph");
		}
	}

	#[test]
	fn zero_count_is_empty() {
		assert!(generate_signals(1, 0, NOW).unwrap().is_empty());
	}

	#[test]
	fn serializes_with_camel_case_keys() {
		let signal = &generate_signals(5, 1, NOW).unwrap()[0];
		let json = serde_json::to_value(signal).unwrap();
		assert!(json.get("sourceType").is_some());
		assert!(json.get("pnlHistory").is_some());
		assert!(json.get("socialEngagement").is_some());
	}
}
