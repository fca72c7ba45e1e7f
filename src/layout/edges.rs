//! Relationship edges between signals.

use serde::Serialize;

use crate::demo::Signal;

/// Weighted, undirected link between two signals.
///
/// Stored with `source < target` so each pair has exactly one spelling.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Edge {
	/// Lexicographically smaller signal id.
	pub source: String,
	/// Lexicographically larger signal id.
	pub target: String,
	/// Summed similarity weight; always above the threshold.
	pub strength: f64,
}

/// Contribution of each kind of similarity to edge strength.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EdgeWeights {
	/// Added when both signals name the same token.
	pub same_token: f64,
	/// Added when both signals come from the same source.
	pub same_source: f64,
	/// Added when both signals are above `high_confidence`.
	pub both_confident: f64,
	/// Confidence both signals must exceed for `both_confident`.
	pub high_confidence: f64,
	/// Maximum social-similarity bonus, scaled down by the engagement gap.
	pub social_similarity: f64,
	/// Engagement gaps at or above this earn no bonus.
	pub social_window: f64,
	/// Added when either signal lists the other in `relations`.
	pub explicit_relation: f64,
	/// Edges must be strictly stronger than this to be kept.
	pub threshold: f64,
}

impl Default for EdgeWeights {
	fn default() -> Self {
		Self {
			same_token: 0.5,
			same_source: 0.3,
			both_confident: 0.2,
			high_confidence: 0.8,
			social_similarity: 0.2,
			social_window: 20.0,
			explicit_relation: 0.5,
			threshold: 0.3,
		}
	}
}

impl EdgeWeights {
	/// Strength of the relationship between `a` and `b`, before thresholding.
	pub fn strength(&self, a: &Signal, b: &Signal) -> f64 {
		let mut strength = 0.0;

		if a.token == b.token {
			strength += self.same_token;
		}
		if a.source == b.source {
			strength += self.same_source;
		}
		if a.confidence > self.high_confidence && b.confidence > self.high_confidence {
			strength += self.both_confident;
		}

		let social_gap = (a.social_engagement - b.social_engagement).abs();
		if social_gap < self.social_window {
			strength += self.social_similarity * (1.0 - social_gap / 100.0);
		}

		if a.relations.contains(&b.id) || b.relations.contains(&a.id) {
			strength += self.explicit_relation;
		}

		strength
	}
}

/// [`build_edges_with`] using the default weights.
pub fn build_edges(signals: &[Signal]) -> Vec<Edge> {
	build_edges_with(signals, &EdgeWeights::default())
}

/// Scores every unordered pair of distinct signals and keeps the strong ones.
///
/// The result is sorted by `(source, target)`, so it does not depend on the
/// order of `signals`.
pub fn build_edges_with(signals: &[Signal], weights: &EdgeWeights) -> Vec<Edge> {
	let mut edges = Vec::new();

	for (i, a) in signals.iter().enumerate() {
		for b in &signals[i + 1..] {
			if a.id == b.id {
				continue;
			}
			let strength = weights.strength(a, b);
			if strength > weights.threshold {
				let (source, target) = if a.id < b.id { (a, b) } else { (b, a) };
				edges.push(Edge {
					source: source.id.clone(),
					target: target.id.clone(),
					strength,
				});
			}
		}
	}

	edges.sort_by(|x, y| (&x.source, &x.target).cmp(&(&y.source, &y.target)));
	edges.dedup_by(|x, y| x.source == y.source && x.target == y.target);
	edges
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::demo::{Direction, SourceType, generate_signals};
	use std::collections::HashSet;

	fn signal(id: &str, token: &str, source: &str, confidence: f64, social: f64) -> Signal {
		Signal {
			id: id.into(),
			source: source.into(),
			source_type: SourceType::Twitter,
			token: token.into(),
			confidence,
			direction: Direction::Long,
			timestamp: 0,
			pnl_history: Vec::new(),
			social_engagement: social,
			onchain_confirmation: 50.0,
			relations: Vec::new(),
		}
	}

	#[test]
	fn empty_input_has_no_edges() {
		assert!(build_edges(&[]).is_empty());
	}

	#[test]
	fn shared_token_alone_makes_one_half_strength_edge() {
		let signals = [
			signal("a", "ETH", "@one", 0.5, 0.0),
			signal("b", "ETH", "@two", 0.6, 90.0),
		];
		let edges = build_edges(&signals);
		assert_eq!(edges.len(), 1);
		assert_eq!(edges[0].source, "a");
		assert_eq!(edges[0].target, "b");
		assert!((edges[0].strength - 0.5).abs() < 1e-12);
	}

	#[test]
	fn weak_pairs_fall_below_threshold() {
		// Same source only: exactly 0.3, which is not strictly above the threshold.
		let signals = [
			signal("a", "ETH", "@one", 0.5, 0.0),
			signal("b", "SOL", "@one", 0.5, 90.0),
		];
		assert!(build_edges(&signals).is_empty());
	}

	#[test]
	fn social_similarity_scales_with_gap() {
		let a = signal("a", "ETH", "@one", 0.9, 50.0);
		let b = signal("b", "SOL", "@two", 0.9, 60.0);
		let w = EdgeWeights::default();
		// 0.2 for confidence, 0.2 * (1 - 10/100) for social.
		assert!((w.strength(&a, &b) - (0.2 + 0.18)).abs() < 1e-12);
	}

	#[test]
	fn relation_counts_in_either_direction() {
		let a = signal("a", "ETH", "@one", 0.5, 0.0);
		let mut b = signal("b", "SOL", "@two", 0.5, 90.0);
		b.relations.push("a".into());
		let w = EdgeWeights::default();
		assert!((w.strength(&a, &b) - 0.5).abs() < 1e-12);
		assert!((w.strength(&b, &a) - 0.5).abs() < 1e-12);
	}

	#[test]
	fn edges_are_canonical_and_above_threshold() {
		let signals = generate_signals(31337, 30, 0).unwrap();
		let edges = build_edges(&signals);
		let mut seen = HashSet::new();
		for e in &edges {
			assert!(e.strength > 0.3);
			assert!(e.source < e.target);
			assert!(seen.insert((e.source.clone(), e.target.clone())));
			assert!(!seen.contains(&(e.target.clone(), e.source.clone())));
		}
	}

	#[test]
	fn input_order_does_not_matter() {
		let signals = generate_signals(-99, 25, 0).unwrap();
		let mut reversed = signals.clone();
		reversed.reverse();
		assert_eq!(build_edges(&signals), build_edges(&reversed));
		assert_eq!(build_edges(&signals), build_edges(&signals));
	}

	#[test]
	fn mixed_set_keeps_exactly_the_strong_pairs() {
		let mut d = signal("d", "BTC", "@three", 0.5, 90.0);
		d.relations.push("c".into());
		let signals = vec![
			signal("a", "ETH", "@one", 0.5, 0.0),
			signal("b", "ETH", "@two", 0.5, 30.0),
			signal("c", "SOL", "@one", 0.5, 60.0),
			d,
			signal("e", "SOL", "@three", 0.5, 150.0),
		];
		// a-c and d-e share only a source (0.3) and are dropped.
		let expected = [("a", "b"), ("c", "d"), ("c", "e")];

		let mut orderings = vec![signals.clone()];
		for k in 1..signals.len() {
			let mut rotated = signals.clone();
			rotated.rotate_left(k);
			orderings.push(rotated);
		}
		let mut reversed = signals.clone();
		reversed.reverse();
		orderings.push(reversed);

		for ordering in &orderings {
			let edges = build_edges(ordering);
			let pairs: Vec<(&str, &str)> = edges
				.iter()
				.map(|e| (e.source.as_str(), e.target.as_str()))
				.collect();
			assert_eq!(pairs, expected);
			for e in &edges {
				assert!((e.strength - 0.5).abs() < 1e-12);
			}
		}
	}

	#[test]
	fn duplicate_ids_never_link_to_themselves() {
		let signals = [
			signal("a", "ETH", "@one", 0.9, 10.0),
			signal("a", "ETH", "@one", 0.9, 10.0),
		];
		assert!(build_edges(&signals).is_empty());
	}
}
