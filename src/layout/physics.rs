//! Force simulation that relaxes signal nodes into clusters.
//!
//! Three forces act on every node each iteration:
//! - pairwise repulsion, `repulsion / d²`, pushing nodes apart
//! - spring attraction along edges, `attraction * d * strength`
//! - centering, `centering * |p|`, pulling everything towards the origin
//!
//! Forces are summed for all nodes first and applied afterwards, so the
//! result does not depend on which node is visited first.

use std::collections::BTreeMap;
use std::f64::consts::TAU;

use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::edges::Edge;
use super::vector::Vec3;

/// Node positions keyed by signal id.
///
/// Ordered so that force accumulation always runs in the same sequence and
/// floating-point sums come out bit-identical.
pub type Positions = BTreeMap<String, Vec3>;

/// Tunables for initial placement and relaxation.
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutConfig {
	/// Inner radius of the shell nodes start on.
	pub inner_radius: f64,
	/// Outer radius of the starting shell (exclusive).
	pub outer_radius: f64,
	/// Repulsion constant; force between two nodes is `repulsion / d²`.
	pub repulsion: f64,
	/// Spring constant; pull along an edge is `attraction * d * strength`.
	pub attraction: f64,
	/// Pull towards the origin, proportional to distance from it.
	pub centering: f64,
	/// Pairs closer than this exert no repulsion on each other.
	pub min_distance: f64,
	/// Default number of relaxation steps for [`crate::layout::layout_signals`].
	pub iterations: usize,
}

impl Default for LayoutConfig {
	fn default() -> Self {
		Self {
			inner_radius: 5.0,
			outer_radius: 8.0,
			repulsion: 0.1,
			attraction: 0.01,
			centering: 0.01,
			min_distance: 0.01,
			iterations: 100,
		}
	}
}

/// Scatters `ids` over the spherical shell between the configured radii.
///
/// Directions are uniform over the sphere. With one node it sits at the
/// origin; duplicate ids keep their last placement.
pub fn initialize<R: Rng>(ids: &[String], config: &LayoutConfig, rng: &mut R) -> Positions {
	if let [only] = ids {
		return Positions::from([(only.clone(), Vec3::ZERO)]);
	}

	ids.iter()
		.map(|id| {
			let theta = rng.gen_range(0.0..TAU);
			let phi = (2.0 * rng.gen_range(0.0..1.0) - 1.0_f64).acos();
			let radius = if config.outer_radius > config.inner_radius {
				rng.gen_range(config.inner_radius..config.outer_radius)
			} else {
				config.inner_radius
			};
			(id.clone(), Vec3::from_spherical(radius, theta, phi))
		})
		.collect()
}

/// [`initialize`] with a fixed seed, for reproducible layouts.
pub fn initialize_seeded(ids: &[String], config: &LayoutConfig, seed: u64) -> Positions {
	initialize(ids, config, &mut StdRng::seed_from_u64(seed))
}

/// Runs `iterations` steps of the force simulation.
///
/// Edges that name unknown nodes are skipped. An empty layout stays empty and
/// a single node is pinned to the origin.
pub fn relax(
	mut positions: Positions,
	edges: &[Edge],
	config: &LayoutConfig,
	iterations: usize,
) -> Positions {
	match positions.len() {
		0 => return positions,
		1 => {
			positions.values_mut().for_each(|p| *p = Vec3::ZERO);
			return positions;
		}
		_ => {}
	}

	let ids: Vec<String> = positions.keys().cloned().collect();
	let index: BTreeMap<&str, usize> = ids.iter().enumerate().map(|(i, id)| (id.as_str(), i)).collect();
	let links: Vec<(usize, usize, f64)> = edges
		.iter()
		.filter_map(|e| {
			let s = *index.get(e.source.as_str())?;
			let t = *index.get(e.target.as_str())?;
			(s != t).then_some((s, t, e.strength))
		})
		.collect();

	let mut points: Vec<Vec3> = positions.values().copied().collect();
	for _ in 0..iterations {
		let forces = step_forces(&points, &links, config);
		for (p, f) in points.iter_mut().zip(forces) {
			*p += f;
		}
	}

	debug!(
		"echo-signals: relaxed {} nodes over {} edges for {iterations} iterations",
		points.len(),
		links.len()
	);

	ids.into_iter().zip(points).collect()
}

/// Net force on every point for one iteration.
fn step_forces(points: &[Vec3], links: &[(usize, usize, f64)], config: &LayoutConfig) -> Vec<Vec3> {
	let mut forces = vec![Vec3::ZERO; points.len()];

	for i in 0..points.len() {
		for j in i + 1..points.len() {
			let delta = points[i] - points[j];
			let dist = delta.length();
			if dist < config.min_distance {
				continue;
			}
			let push = delta * (config.repulsion / (dist * dist * dist));
			forces[i] += push;
			forces[j] += -push;
		}
	}

	for &(s, t, strength) in links {
		let delta = points[t] - points[s];
		// |delta| * k * d * strength along the unit direction
		let pull = delta * (config.attraction * strength);
		forces[s] += pull;
		forces[t] += -pull;
	}

	for (force, point) in forces.iter_mut().zip(points) {
		*force += -*point * config.centering;
	}

	forces
}
