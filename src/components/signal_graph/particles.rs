//! Ambient and burst particles.
//!
//! [`advance_particles`] is the whole simulation: a pure function from one
//! frame's particles to the next. [`ParticleSystem`] only owns the list and
//! the bounds so the render loop has something to hold on to.

use std::f64::consts::TAU;

use super::theme::ParticleStyle;
use crate::seed::unit;

/// A single particle.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
	pub x: f64,
	pub y: f64,
	pub vx: f64,
	pub vy: f64,
	pub size: f64,
	pub alpha: f64,
	pub phase: f64, // For twinkling
	/// Seconds left to live. `None` for ambient particles, which never expire.
	pub life: Option<f64>,
	pub max_life: f64,
}

/// Area ambient particles wrap around in.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
	pub width: f64,
	pub height: f64,
	/// Distance past an edge before a particle reappears on the other side.
	pub margin: f64,
}

/// Velocity retained per second by burst particles.
const BURST_DRAG: f64 = 0.15;

/// Advances every particle by `dt` seconds and drops the expired ones.
///
/// Ambient particles drift and wrap at the bounds. Burst particles slow down,
/// fade with their remaining life, and are removed once it reaches zero.
pub fn advance_particles(particles: Vec<Particle>, dt: f64, bounds: &Bounds) -> Vec<Particle> {
	let drag = BURST_DRAG.powf(dt);

	particles
		.into_iter()
		.filter_map(|mut p| {
			p.x += p.vx * dt * 60.0;
			p.y += p.vy * dt * 60.0;
			p.phase += dt * 2.0;

			match p.life {
				Some(life) => {
					let life = life - dt;
					if life <= 0.0 {
						return None;
					}
					p.vx *= drag;
					p.vy *= drag;
					p.alpha = (life / p.max_life).clamp(0.0, 1.0);
					p.life = Some(life);
				}
				None => wrap(&mut p, bounds),
			}
			Some(p)
		})
		.collect()
}

fn wrap(p: &mut Particle, bounds: &Bounds) {
	let m = bounds.margin;
	if p.x < -m {
		p.x = bounds.width + m;
	} else if p.x > bounds.width + m {
		p.x = -m;
	}
	if p.y < -m {
		p.y = bounds.height + m;
	} else if p.y > bounds.height + m {
		p.y = -m;
	}
}

/// Owns the live particles for a canvas.
pub struct ParticleSystem {
	pub particles: Vec<Particle>,
	bounds: Bounds,
	seed: i32,
	bursts: i64,
}

impl ParticleSystem {
	/// Scatters the ambient particles deterministically from `seed`.
	pub fn new(style: &ParticleStyle, width: f64, height: f64, seed: i32) -> Self {
		let particles = (0..style.count)
			.map(|i| {
				let base = i as i64 * 8;
				let angle = unit(seed, base + 2) * TAU;
				let speed = style.speed * (0.5 + unit(seed, base + 3) * 0.5);
				Particle {
					x: unit(seed, base) * width,
					y: unit(seed, base + 1) * height,
					vx: angle.cos() * speed,
					vy: angle.sin() * speed,
					size: style.size_min + unit(seed, base + 4) * (style.size_max - style.size_min),
					alpha: style.opacity * (0.3 + unit(seed, base + 5) * 0.7),
					phase: unit(seed, base + 6) * TAU,
					life: None,
					max_life: 0.0,
				}
			})
			.collect();

		Self {
			particles,
			bounds: Bounds {
				width,
				height,
				margin: 10.0,
			},
			seed,
			bursts: 0,
		}
	}

	/// Emits a ring of short-lived particles from `(x, y)`.
	pub fn burst(&mut self, style: &ParticleStyle, x: f64, y: f64) {
		let count = style.burst_count.max(1);
		let base = 1_000_000 + self.bursts * 4_096;
		self.bursts += 1;

		self.particles.extend((0..count).map(|i| {
			let jitter = unit(self.seed, base + i as i64);
			let angle = (i as f64 + jitter) / count as f64 * TAU;
			let speed = 1.5 + 2.5 * unit(self.seed, base + 2_048 + i as i64);
			Particle {
				x,
				y,
				vx: angle.cos() * speed,
				vy: angle.sin() * speed,
				size: style.size_max * 1.5,
				alpha: 1.0,
				phase: angle,
				life: Some(style.burst_life),
				max_life: style.burst_life,
			}
		}));
	}

	/// Update particle positions
	pub fn update(&mut self, dt: f64) {
		let particles = std::mem::take(&mut self.particles);
		self.particles = advance_particles(particles, dt, &self.bounds);
	}

	/// Resize the particle system bounds
	pub fn resize(&mut self, width: f64, height: f64) {
		let scale_x = width / self.bounds.width.max(1.0);
		let scale_y = height / self.bounds.height.max(1.0);

		for p in &mut self.particles {
			p.x *= scale_x;
			p.y *= scale_y;
		}

		self.bounds.width = width;
		self.bounds.height = height;
	}

	/// Alpha for a particle at animation time `time`. Ambient particles twinkle.
	pub fn twinkle_alpha(&self, particle: &Particle, time: f64) -> f64 {
		if particle.life.is_some() {
			return particle.alpha;
		}
		let twinkle = ((time * 1.5 + particle.phase).sin() * 0.5 + 0.5) * 0.4 + 0.6;
		particle.alpha * twinkle
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::signal_graph::theme::Theme;

	fn bounds() -> Bounds {
		Bounds {
			width: 100.0,
			height: 50.0,
			margin: 10.0,
		}
	}

	fn ambient(x: f64, y: f64, vx: f64, vy: f64) -> Particle {
		Particle {
			x,
			y,
			vx,
			vy,
			size: 1.0,
			alpha: 0.5,
			phase: 0.0,
			life: None,
			max_life: 0.0,
		}
	}

	#[test]
	fn ambient_particles_wrap() {
		let out = advance_particles(vec![ambient(109.5, 25.0, 1.0, 0.0)], 1.0 / 60.0, &bounds());
		assert_eq!(out.len(), 1);
		assert_eq!(out[0].x, -10.0);

		let out = advance_particles(vec![ambient(50.0, -9.5, 0.0, -1.0)], 1.0 / 60.0, &bounds());
		assert_eq!(out[0].y, 60.0);
	}

	#[test]
	fn burst_particles_fade_then_expire() {
		let p = Particle {
			life: Some(0.5),
			max_life: 1.0,
			alpha: 1.0,
			..ambient(10.0, 10.0, 2.0, 0.0)
		};
		let out = advance_particles(vec![p], 0.25, &bounds());
		assert_eq!(out.len(), 1);
		assert!((out[0].alpha - 0.25).abs() < 1e-12);
		assert!(out[0].vx < 2.0);

		assert!(advance_particles(out, 0.3, &bounds()).is_empty());
	}

	#[test]
	fn advance_does_not_depend_on_hidden_state() {
		let input = vec![ambient(1.0, 2.0, 0.3, 0.1), ambient(50.0, 20.0, -0.2, 0.4)];
		assert_eq!(
			advance_particles(input.clone(), 0.016, &bounds()),
			advance_particles(input, 0.016, &bounds())
		);
	}

	#[test]
	fn system_spawns_and_clears_bursts() {
		let style = Theme::default().particles;
		let mut system = ParticleSystem::new(&style, 800.0, 600.0, 42);
		assert_eq!(system.particles.len(), style.count);

		system.burst(&style, 100.0, 100.0);
		assert_eq!(system.particles.len(), style.count + style.burst_count);

		for _ in 0..120 {
			system.update(1.0 / 60.0);
		}
		assert_eq!(system.particles.len(), style.count);
	}

	#[test]
	fn ambient_layout_is_seeded() {
		let style = Theme::default().particles;
		let a = ParticleSystem::new(&style, 800.0, 600.0, 7);
		let b = ParticleSystem::new(&style, 800.0, 600.0, 7);
		assert_eq!(a.particles, b.particles);
		for p in &a.particles {
			assert!((0.0..800.0).contains(&p.x) && (0.0..600.0).contains(&p.y));
		}
	}
}
