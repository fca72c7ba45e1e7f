//! 3D force-directed layout for the signal graph.
//!
//! [`build_edges`] turns a signal set into weighted relationship edges,
//! [`initialize`] scatters nodes over a spherical shell, and [`relax`] runs the
//! force simulation. [`layout_signals`] does all three.

mod edges;
mod physics;
mod vector;

pub use edges::{Edge, EdgeWeights, build_edges, build_edges_with};
pub use physics::{LayoutConfig, Positions, initialize, initialize_seeded, relax};
pub use vector::Vec3;

use crate::demo::Signal;

/// Edges and relaxed positions for one signal snapshot.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SignalLayout {
	/// Relationship edges, sorted by `(source, target)`.
	pub edges: Vec<Edge>,
	/// Relaxed position of every signal id.
	pub positions: Positions,
}

/// Builds edges, seeds positions from `seed`, and relaxes for `config.iterations`.
pub fn layout_signals(signals: &[Signal], config: &LayoutConfig, seed: u64) -> SignalLayout {
	let edges = build_edges(signals);
	let ids: Vec<String> = signals.iter().map(|s| s.id.clone()).collect();
	let start = initialize_seeded(&ids, config, seed);
	let positions = relax(start, &edges, config, config.iterations);
	SignalLayout { edges, positions }
}
