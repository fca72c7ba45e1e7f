//! Graph state behind the canvas: laid-out nodes, camera, and hover highlight.
//!
//! Everything here is plain data so it can be exercised without a browser.
//! The component owns one [`SignalGraphState`] and mutates it every frame.

use std::collections::{HashMap, HashSet};

use super::theme::{Color, Theme};
use crate::demo::{Direction, Signal};
use crate::layout::{LayoutConfig, Vec3, layout_signals};

/// Per-node display data, in layout order.
#[derive(Clone, Debug)]
pub struct NodeInfo {
	/// Signal id.
	pub id: String,
	/// Token symbol shown next to the node.
	pub label: String,
	/// Fill colour, from the source palette.
	pub color: Color,
	/// Selects the ring colour.
	pub direction: Direction,
	/// Size multiplier; more confident signals are drawn larger.
	pub size: f64,
	/// Relaxed layout position.
	pub position: Vec3,
}

/// Orbit camera looking at the origin.
#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
	/// Rotation around the vertical axis, radians.
	pub yaw: f64,
	/// Tilt, radians, clamped to avoid flipping over the poles.
	pub pitch: f64,
	/// Distance from the camera to the origin in layout units.
	pub distance: f64,
	/// Zoom factor (1.0 = 100%, clamped to 0.3..4.0).
	pub k: f64,
}

impl Default for Camera {
	fn default() -> Self {
		Self {
			yaw: 0.0,
			pitch: 0.35,
			distance: 14.0,
			k: 1.0,
		}
	}
}

/// A layout point mapped onto the canvas.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projected {
	pub x: f64,
	pub y: f64,
	/// Distance from the camera along its view axis; larger is further away.
	pub depth: f64,
	/// Size multiplier from perspective; 1.0 at the origin's depth.
	pub perspective: f64,
}

/// Tracks an in-progress orbit drag.
#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub active: bool,
	pub last_x: f64,
	pub last_y: f64,
	/// Pointer travel since the press, to tell clicks from drags.
	pub travel: f64,
}

/// Minimum time (seconds) a highlight is held before it starts fading.
const MIN_HOLD_TIME: f64 = 0.12;
/// Intensities below this are dropped.
const VISIBLE: f64 = 0.005;

/// Smoothly animated hover highlight.
///
/// Each node's intensity eases towards 1.0 while it is the hovered node or one
/// of its neighbours, and decays back to zero afterwards.
#[derive(Clone, Debug, Default)]
pub struct HighlightState {
	pub hovered_node: Option<usize>,
	target_set: HashSet<usize>,
	node_intensity: HashMap<usize, f64>,
	hold_timer: HashMap<usize, f64>,
	cached_max: f64,
}

impl HighlightState {
	/// Update the hovered node and recompute the target highlight set.
	pub fn set_hover(&mut self, node: Option<usize>, edges: &[(usize, usize, f64)]) {
		if self.hovered_node == node {
			return;
		}

		self.hovered_node = node;
		self.target_set.clear();

		if let Some(idx) = node {
			self.target_set.insert(idx);
			for &(src, tgt, _) in edges {
				if src == idx {
					self.target_set.insert(tgt);
				} else if tgt == idx {
					self.target_set.insert(src);
				}
			}
			for &idx in &self.target_set {
				self.hold_timer.insert(idx, MIN_HOLD_TIME);
			}
		}
	}

	/// Ease intensities towards their targets over `dt` seconds.
	pub fn tick(&mut self, dt: f64) {
		const FADE_IN_SPEED: f64 = 6.0;
		const FADE_OUT_SPEED: f64 = 4.0;

		let fade_in = 1.0 - (-FADE_IN_SPEED * dt).exp();
		let fade_out = (-FADE_OUT_SPEED * dt).exp();

		for &idx in &self.target_set {
			let intensity = self.node_intensity.entry(idx).or_insert(0.0);
			*intensity += (1.0 - *intensity) * fade_in;
		}

		let targets = &self.target_set;
		self.hold_timer.retain(|idx, timer| {
			if targets.contains(idx) {
				return true;
			}
			*timer -= dt;
			*timer > 0.0
		});

		let holds = &self.hold_timer;
		let mut max: f64 = 0.0;
		self.node_intensity.retain(|idx, intensity| {
			if !targets.contains(idx) && !holds.contains_key(idx) {
				*intensity *= fade_out;
			}
			max = max.max(*intensity);
			*intensity > VISIBLE
		});
		self.cached_max = max;
	}

	/// Current intensity of `idx`, in `[0, 1]`.
	pub fn node_intensity(&self, idx: usize) -> f64 {
		self.node_intensity.get(&idx).copied().unwrap_or(0.0)
	}

	/// Edge intensity, the geometric mean of its endpoints.
	pub fn edge_intensity(&self, a: usize, b: usize) -> f64 {
		(self.node_intensity(a) * self.node_intensity(b)).sqrt()
	}

	/// Strongest node intensity, used to dim everything else.
	pub fn max_intensity(&self) -> f64 {
		self.cached_max
	}
}

/// Auto-rotation speed, radians per second.
const ROTATION_SPEED: f64 = 0.15;

/// Laid-out signal graph plus view and interaction state.
pub struct SignalGraphState {
	pub nodes: Vec<NodeInfo>,
	/// `(source, target, strength)` as node indices.
	pub edges: Vec<(usize, usize, f64)>,
	pub camera: Camera,
	pub drag: DragState,
	pub highlight: HighlightState,
	pub width: f64,
	pub height: f64,
	pub auto_rotate: bool,
	pub flow_time: f64,
}

impl SignalGraphState {
	/// Lays out `signals` and wraps them for display.
	pub fn new(
		signals: &[Signal],
		width: f64,
		height: f64,
		theme: &Theme,
		layout: &LayoutConfig,
		seed: u64,
	) -> Self {
		let mut state = Self {
			nodes: Vec::new(),
			edges: Vec::new(),
			camera: Camera::default(),
			drag: DragState::default(),
			highlight: HighlightState::default(),
			width,
			height,
			auto_rotate: true,
			flow_time: 0.0,
		};
		state.rebuild(signals, theme, layout, seed);
		state
	}

	/// Replaces the graph with a fresh layout of `signals`, keeping the camera.
	pub fn rebuild(&mut self, signals: &[Signal], theme: &Theme, layout: &LayoutConfig, seed: u64) {
		let computed = layout_signals(signals, layout, seed);

		self.nodes = signals
			.iter()
			.map(|s| NodeInfo {
				id: s.id.clone(),
				label: s.token.clone(),
				color: theme.palette.color_for(s.source_type),
				direction: s.direction,
				size: 0.7 + 0.8 * s.confidence.clamp(0.0, 1.0),
				position: computed.positions.get(&s.id).copied().unwrap_or_default(),
			})
			.collect();

		let index: HashMap<&str, usize> = self
			.nodes
			.iter()
			.enumerate()
			.map(|(i, n)| (n.id.as_str(), i))
			.collect();
		self.edges = computed
			.edges
			.iter()
			.filter_map(|e| Some((*index.get(e.source.as_str())?, *index.get(e.target.as_str())?, e.strength)))
			.collect();

		self.highlight = HighlightState::default();
	}

	/// Maps a layout point onto the canvas.
	pub fn project(&self, p: Vec3) -> Projected {
		let view = p.rotate_y(self.camera.yaw).rotate_x(self.camera.pitch);
		let depth = (self.camera.distance - view.z).max(0.1);
		let perspective = self.camera.distance / depth;
		let scale = self.width.min(self.height) * 0.09 * perspective * self.camera.k;
		Projected {
			x: self.width / 2.0 + view.x * scale,
			y: self.height / 2.0 - view.y * scale,
			depth,
			perspective,
		}
	}

	/// Node indices with their projections, far to near.
	pub fn projected_nodes(&self) -> Vec<(usize, Projected)> {
		let mut out: Vec<(usize, Projected)> = self
			.nodes
			.iter()
			.enumerate()
			.map(|(i, n)| (i, self.project(n.position)))
			.collect();
		out.sort_by(|a, b| b.1.depth.total_cmp(&a.1.depth));
		out
	}

	/// Screen radius of a node.
	pub fn node_radius(&self, node: &NodeInfo, projected: &Projected, base_radius: f64) -> f64 {
		base_radius * node.size * projected.perspective * self.camera.k
	}

	/// Front-most node under the canvas point `(sx, sy)`.
	pub fn node_at_position(&self, sx: f64, sy: f64, base_radius: f64) -> Option<usize> {
		self.projected_nodes()
			.into_iter()
			.rev()
			.find(|(i, p)| {
				let hit = self.node_radius(&self.nodes[*i], p, base_radius) + 3.0;
				let (dx, dy) = (p.x - sx, p.y - sy);
				(dx * dx + dy * dy).sqrt() < hit
			})
			.map(|(i, _)| i)
	}

	/// Points the highlight at `node`, or clears it with `None`.
	pub fn set_hover(&mut self, node: Option<usize>) {
		self.highlight.set_hover(node, &self.edges);
	}

	/// Orbit the camera by a pointer movement in pixels.
	pub fn orbit(&mut self, dx: f64, dy: f64) {
		self.camera.yaw += dx * 0.01;
		self.camera.pitch = (self.camera.pitch + dy * 0.01).clamp(-1.4, 1.4);
	}

	/// Multiply zoom by `factor`, within limits.
	pub fn zoom(&mut self, factor: f64) {
		self.camera.k = (self.camera.k * factor).clamp(0.3, 4.0);
	}

	/// Advances rotation, animation time and highlight by `dt` seconds.
	pub fn tick(&mut self, dt: f64) {
		if self.auto_rotate && !self.drag.active && self.highlight.hovered_node.is_none() {
			self.camera.yaw += ROTATION_SPEED * dt;
		}
		self.flow_time += dt;
		self.highlight.tick(dt);
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}
}
