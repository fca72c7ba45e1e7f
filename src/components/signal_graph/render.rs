//! Canvas rendering for the signal graph.
//!
//! Draws in passes so depth reads correctly:
//! 1. Background and particles (screen space)
//! 2. Edges, faded by depth
//! 3. Nodes from far to near, with direction rings and labels

use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::particles::ParticleSystem;
use super::state::{Projected, SignalGraphState};
use super::theme::{Color, Theme};

/// Ease-in-out curve for highlight transitions.
fn smooth_step(t: f64) -> f64 {
	t * t * (3.0 - 2.0 * t)
}

/// Renders the complete graph to the canvas.
pub fn render(
	state: &SignalGraphState,
	ctx: &CanvasRenderingContext2d,
	theme: &Theme,
	particles: Option<&ParticleSystem>,
) {
	draw_background(state, ctx, theme);

	if let Some(ps) = particles {
		draw_particles(state, ctx, theme, ps);
	}

	let projected = state.projected_nodes();
	let mut by_index = vec![None; state.nodes.len()];
	for &(i, p) in &projected {
		by_index[i] = Some(p);
	}

	draw_edges(state, ctx, theme, &by_index);
	draw_nodes(state, ctx, theme, &projected);

	if theme.background.vignette > 0.0 {
		draw_vignette(state, ctx, theme);
	}
}

fn draw_background(state: &SignalGraphState, ctx: &CanvasRenderingContext2d, theme: &Theme) {
	let (cx, cy) = (state.width / 2.0, state.height / 2.0);
	match ctx.create_radial_gradient(cx, cy, 0.0, cx, cy, state.width.max(state.height) * 0.8) {
		Ok(gradient) => {
			let _ = gradient.add_color_stop(0.0, &theme.background.color_secondary.to_css());
			let _ = gradient.add_color_stop(1.0, &theme.background.color.to_css());
			#[allow(deprecated)]
			ctx.set_fill_style(&gradient);
		}
		Err(_) => ctx.set_fill_style_str(&theme.background.color.to_css()),
	}
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
}

fn draw_vignette(state: &SignalGraphState, ctx: &CanvasRenderingContext2d, theme: &Theme) {
	let (cx, cy) = (state.width / 2.0, state.height / 2.0);
	let Ok(gradient) = ctx.create_radial_gradient(
		cx,
		cy,
		state.width.min(state.height) * 0.3,
		cx,
		cy,
		state.width.max(state.height) * 0.7,
	) else {
		return;
	};

	let _ = gradient.add_color_stop(0.0, "rgba(0, 0, 0, 0)");
	let _ = gradient.add_color_stop(1.0, &Color::rgba(0, 0, 0, theme.background.vignette).to_css());

	#[allow(deprecated)]
	ctx.set_fill_style(&gradient);
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
}

fn draw_particles(
	state: &SignalGraphState,
	ctx: &CanvasRenderingContext2d,
	theme: &Theme,
	particles: &ParticleSystem,
) {
	let color = theme.particles.color;

	for p in &particles.particles {
		let alpha = particles.twinkle_alpha(p, state.flow_time);
		ctx.set_fill_style_str(&color.with_alpha(alpha).to_css());
		ctx.begin_path();
		let _ = ctx.arc(p.x, p.y, p.size, 0.0, PI * 2.0);
		ctx.fill();
	}
}

/// Depth fade: nodes behind the origin plane are drawn fainter.
fn depth_alpha(p: &Projected) -> f64 {
	p.perspective.powf(1.5).clamp(0.35, 1.0)
}

fn draw_edges(
	state: &SignalGraphState,
	ctx: &CanvasRenderingContext2d,
	theme: &Theme,
	by_index: &[Option<Projected>],
) {
	let max_t = smooth_step(state.highlight.max_intensity());

	for &(a, b, strength) in &state.edges {
		let (Some(pa), Some(pb)) = (by_index[a], by_index[b]) else {
			continue;
		};

		let edge_t = smooth_step(state.highlight.edge_intensity(a, b));
		let emphasis = if edge_t > 0.01 {
			1.0 + edge_t
		} else {
			1.0 - 0.6 * max_t
		};
		let alpha = theme.edge.color.a * emphasis * (depth_alpha(&pa) + depth_alpha(&pb)) / 2.0;
		let width = theme.edge.max_width * strength.min(1.0) * state.camera.k * (1.0 + 0.5 * edge_t);

		ctx.set_stroke_style_str(&theme.edge.color.with_alpha(alpha.min(1.0)).to_css());
		ctx.set_line_width(width.max(0.5));
		ctx.begin_path();
		ctx.move_to(pa.x, pa.y);
		ctx.line_to(pb.x, pb.y);
		ctx.stroke();
	}
}

fn draw_nodes(
	state: &SignalGraphState,
	ctx: &CanvasRenderingContext2d,
	theme: &Theme,
	projected: &[(usize, Projected)],
) {
	let max_t = smooth_step(state.highlight.max_intensity());
	let pulse = (state.flow_time * theme.node.pulse_speed).sin() * theme.node.pulse_intensity;

	for &(idx, p) in projected {
		let node = &state.nodes[idx];
		let node_t = smooth_step(state.highlight.node_intensity(idx));
		let dim = 1.0 - 0.7 * max_t;
		let alpha = (dim + (1.0 - dim) * node_t) * depth_alpha(&p);
		let radius = state.node_radius(node, &p, theme.node.radius) * (1.0 + pulse) * (1.0 + 0.3 * node_t);

		ctx.set_global_alpha(alpha);

		match ctx.create_radial_gradient(p.x - radius * 0.3, p.y - radius * 0.3, 0.0, p.x, p.y, radius) {
			Ok(gradient) => {
				let _ = gradient.add_color_stop(0.0, &node.color.lighten(0.4).to_css());
				let _ = gradient.add_color_stop(0.7, &node.color.to_css());
				let _ = gradient.add_color_stop(1.0, &node.color.darken(0.2).to_css());
				#[allow(deprecated)]
				ctx.set_fill_style(&gradient);
			}
			Err(_) => ctx.set_fill_style_str(&node.color.to_css()),
		}
		ctx.begin_path();
		let _ = ctx.arc(p.x, p.y, radius, 0.0, 2.0 * PI);
		ctx.fill();

		ctx.begin_path();
		let _ = ctx.arc(p.x, p.y, radius + 2.5, 0.0, 2.0 * PI);
		ctx.set_stroke_style_str(&theme.node.ring_for(node.direction).to_css());
		ctx.set_line_width(1.5);
		ctx.stroke();

		if state.highlight.hovered_node == Some(idx) {
			ctx.begin_path();
			let _ = ctx.arc(p.x, p.y, radius + 7.0, 0.0, 2.0 * PI);
			ctx.set_stroke_style_str(&format!("rgba(255, 255, 255, {})", 0.8 * node_t));
			ctx.set_line_width(1.0);
			ctx.stroke();
		}

		if alpha > 0.5 || node_t > 0.01 {
			ctx.set_fill_style_str("rgba(255, 255, 255, 0.9)");
			ctx.set_font(&theme.node.label_font);
			let _ = ctx.fill_text(&node.label, p.x + radius + 5.0, p.y + 3.0);
		}

		ctx.set_global_alpha(1.0);
	}
}
