//! Leptos component wrapping the signal graph canvas.
//!
//! The component lays out the signals it is given, then runs a
//! `requestAnimationFrame` loop that advances the camera, highlight, and
//! particles and redraws. Dragging orbits the camera, the wheel zooms, and a
//! click without drag emits a particle burst.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::{debug, warn};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent, Window};

use super::particles::ParticleSystem;
use super::render;
use super::state::SignalGraphState;
use super::theme::Theme;
use crate::demo::Signal as TradeSignal;
use crate::layout::LayoutConfig;

/// Pointer travel, in pixels, below which a press counts as a click.
const CLICK_SLOP: f64 = 4.0;

/// Bundles graph state with its visual configuration.
struct GraphContext {
	state: SignalGraphState,
	theme: Theme,
	particles: ParticleSystem,
}

/// Fresh, non-reproducible seed for initial node placement.
fn layout_seed() -> u64 {
	js_sys::Date::now() as u64
}

fn window_size(window: &Window) -> (f64, f64) {
	(
		window
			.inner_width()
			.ok()
			.and_then(|v| v.as_f64())
			.unwrap_or(800.0),
		window
			.inner_height()
			.ok()
			.and_then(|v| v.as_f64())
			.unwrap_or(600.0),
	)
}

/// Pointer position relative to the canvas.
fn canvas_point(canvas_ref: NodeRef<leptos::html::Canvas>, ev: &MouseEvent) -> Option<(f64, f64)> {
	let canvas: HtmlCanvasElement = canvas_ref.get()?;
	let rect = canvas.get_bounding_client_rect();
	Some((
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	))
}

/// Renders the signal relationship graph on a canvas element.
///
/// The graph is re-laid out whenever `signals` changes; camera and particles
/// carry over. The component sizes itself to its parent by default, or to the
/// viewport with `fullscreen = true`.
#[component]
pub fn SignalGraphCanvas(
	#[prop(into)] signals: Signal<Vec<TradeSignal>>,
	#[prop(optional)] layout: Option<LayoutConfig>,
	#[prop(default = false)] fullscreen: bool,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
) -> impl IntoView {
	let layout = layout.unwrap_or_default();
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let context: Rc<RefCell<Option<GraphContext>>> = Rc::new(RefCell::new(None));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let (context_init, animate_init, resize_cb_init) =
		(context.clone(), animate.clone(), resize_cb.clone());

	Effect::new(move |_| {
		let current = signals.get();
		let Some(canvas) = canvas_ref.get() else {
			return;
		};

		if let Some(c) = context_init.borrow_mut().as_mut() {
			debug!("echo-signals: relaying out {} signals", current.len());
			c.state.rebuild(&current, &c.theme, &layout, layout_seed());
			return;
		}

		let Some(window) = web_sys::window() else {
			warn!("echo-signals: no window, graph disabled");
			return;
		};

		let (w, h) = if fullscreen {
			window_size(&window)
		} else {
			let parent = canvas.parent_element();
			(
				width.unwrap_or_else(|| parent.as_ref().map(|p| p.client_width() as f64).unwrap_or(800.0)),
				height.unwrap_or_else(|| parent.as_ref().map(|p| p.client_height() as f64).unwrap_or(600.0)),
			)
		};
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let Some(ctx) = canvas
			.get_context("2d")
			.ok()
			.flatten()
			.and_then(|obj| obj.dyn_into::<CanvasRenderingContext2d>().ok())
		else {
			warn!("echo-signals: canvas has no 2d context");
			return;
		};

		let theme = Theme::default();
		let seed = layout_seed();
		*context_init.borrow_mut() = Some(GraphContext {
			state: SignalGraphState::new(&current, w, h, &theme, &layout, seed),
			particles: ParticleSystem::new(&theme.particles, w, h, seed as i32),
			theme,
		});

		if fullscreen {
			let (context_resize, canvas_resize) = (context_init.clone(), canvas.clone());
			*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
				let Some(win) = web_sys::window() else {
					return;
				};
				let (nw, nh) = window_size(&win);
				canvas_resize.set_width(nw as u32);
				canvas_resize.set_height(nh as u32);
				if let Some(c) = context_resize.borrow_mut().as_mut() {
					c.state.resize(nw, nh);
					c.particles.resize(nw, nh);
				}
			}));
			if let Some(ref cb) = *resize_cb_init.borrow() {
				let _ = window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			}
		}

		let (context_anim, animate_inner) = (context_init.clone(), animate_init.clone());
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			if let Some(c) = context_anim.borrow_mut().as_mut() {
				let dt = 0.016;
				c.state.tick(dt);
				c.particles.update(dt);
				render::render(&c.state, &ctx, &c.theme, Some(&c.particles));
			}
			if let (Some(cb), Some(win)) = (animate_inner.borrow().as_ref(), web_sys::window()) {
				let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	let context_md = context.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some((x, y)) = canvas_point(canvas_ref, &ev) else {
			return;
		};
		if let Some(c) = context_md.borrow_mut().as_mut() {
			c.state.drag.active = true;
			c.state.drag.last_x = x;
			c.state.drag.last_y = y;
			c.state.drag.travel = 0.0;
		}
	};

	let context_mm = context.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some((x, y)) = canvas_point(canvas_ref, &ev) else {
			return;
		};
		if let Some(c) = context_mm.borrow_mut().as_mut() {
			if c.state.drag.active {
				let (dx, dy) = (x - c.state.drag.last_x, y - c.state.drag.last_y);
				c.state.orbit(dx, dy);
				c.state.drag.travel += dx.abs() + dy.abs();
				c.state.drag.last_x = x;
				c.state.drag.last_y = y;
			} else {
				let hovered = c.state.node_at_position(x, y, c.theme.node.radius);
				c.state.set_hover(hovered);
			}
		}
	};

	let context_mu = context.clone();
	let on_mouseup = move |ev: MouseEvent| {
		let point = canvas_point(canvas_ref, &ev);
		if let Some(c) = context_mu.borrow_mut().as_mut() {
			if let Some((x, y)) = point.filter(|_| c.state.drag.active && c.state.drag.travel < CLICK_SLOP) {
				c.particles.burst(&c.theme.particles, x, y);
			}
			c.state.drag.active = false;
		}
	};

	let context_ml = context.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(c) = context_ml.borrow_mut().as_mut() {
			c.state.drag.active = false;
			c.state.set_hover(None);
		}
	};

	let context_wh = context.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		if let Some(c) = context_wh.borrow_mut().as_mut() {
			c.state.zoom(if ev.delta_y() > 0.0 { 0.9 } else { 1.1 });
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="signal-graph-canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			on:wheel=on_wheel
			style="display: block; cursor: grab;"
		/>
	}
}
