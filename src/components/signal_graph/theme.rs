//! Visual theming for the signal graph.
//!
//! Node colour encodes the signal's source channel; the ring around a node
//! encodes its direction.

use crate::demo::{Direction, SourceType};

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	pub r: u8,
	pub g: u8,
	pub b: u8,
	pub a: f64,
}

impl Color {
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	/// Same colour with alpha replaced.
	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	/// Lighten the color by a factor (0.0 = unchanged, 1.0 = white)
	pub fn lighten(self, factor: f64) -> Self {
		let f = factor.clamp(0.0, 1.0);
		let up = |c: u8| (c as f64 + (255.0 - c as f64) * f) as u8;
		Self {
			r: up(self.r),
			g: up(self.g),
			b: up(self.b),
			a: self.a,
		}
	}

	/// Darken the color by a factor (0.0 = unchanged, 1.0 = black)
	pub fn darken(self, factor: f64) -> Self {
		let f = 1.0 - factor.clamp(0.0, 1.0);
		let down = |c: u8| (c as f64 * f) as u8;
		Self {
			r: down(self.r),
			g: down(self.g),
			b: down(self.b),
			a: self.a,
		}
	}

	/// CSS `rgba(...)` string.
	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}
}

/// Node colors per source channel.
#[derive(Clone, Debug)]
pub struct SourcePalette {
	pub twitter: Color,
	pub telegram: Color,
	pub konnect: Color,
}

impl SourcePalette {
	/// Node colour for a signal's source type.
	pub fn color_for(&self, source: SourceType) -> Color {
		match source {
			SourceType::Twitter => self.twitter,
			SourceType::Telegram => self.telegram,
			SourceType::Konnect => self.konnect,
		}
	}
}

/// Background style configuration.
#[derive(Clone, Debug)]
pub struct BackgroundStyle {
	/// Primary background color
	pub color: Color,
	/// Center color of the radial gradient
	pub color_secondary: Color,
	/// Vignette intensity (0.0 = none, 1.0 = strong)
	pub vignette: f64,
}

/// Edge visual style.
#[derive(Clone, Debug)]
pub struct EdgeStyle {
	pub color: Color,
	/// Line width for an edge of strength 1.0; weaker edges are thinner.
	pub max_width: f64,
}

/// Node visual style.
#[derive(Clone, Debug)]
pub struct NodeStyle {
	/// Radius in pixels at unit perspective scale.
	pub radius: f64,
	pub long_ring: Color,
	pub short_ring: Color,
	/// Pulsing animation intensity (0.0 = none)
	pub pulse_intensity: f64,
	pub pulse_speed: f64,
	pub label_font: String,
}

impl NodeStyle {
	/// Ring colour for a trade direction.
	pub fn ring_for(&self, direction: Direction) -> Color {
		match direction {
			Direction::Long => self.long_ring,
			Direction::Short => self.short_ring,
		}
	}
}

/// Particle effect configuration.
#[derive(Clone, Debug)]
pub struct ParticleStyle {
	/// Number of ambient particles
	pub count: usize,
	pub color: Color,
	pub size_min: f64,
	pub size_max: f64,
	/// Ambient drift speed, pixels per frame at 60fps
	pub speed: f64,
	pub opacity: f64,
	/// Particles emitted per click
	pub burst_count: usize,
	/// Seconds a burst particle lives
	pub burst_life: f64,
}

/// Complete visual theme.
#[derive(Clone, Debug)]
pub struct Theme {
	pub background: BackgroundStyle,
	pub edge: EdgeStyle,
	pub node: NodeStyle,
	pub particles: ParticleStyle,
	pub palette: SourcePalette,
}

impl Theme {
	/// Dark neon look used across the Echo screens.
	pub fn echo() -> Self {
		Self {
			background: BackgroundStyle {
				color: Color::rgb(8, 10, 20),
				color_secondary: Color::rgb(20, 24, 44),
				vignette: 0.25,
			},
			edge: EdgeStyle {
				color: Color::rgba(120, 180, 255, 0.35),
				max_width: 2.5,
			},
			node: NodeStyle {
				radius: 9.0,
				long_ring: Color::rgb(46, 204, 113),
				short_ring: Color::rgb(231, 76, 60),
				pulse_intensity: 0.06,
				pulse_speed: 2.0,
				label_font: "11px sans-serif".to_string(),
			},
			particles: ParticleStyle {
				count: 60,
				color: Color::rgb(150, 190, 255),
				size_min: 0.5,
				size_max: 1.8,
				speed: 0.15,
				opacity: 0.5,
				burst_count: 24,
				burst_life: 0.9,
			},
			palette: SourcePalette {
				twitter: Color::rgb(29, 161, 242),
				telegram: Color::rgb(0, 200, 200),
				konnect: Color::rgb(155, 89, 255),
			},
		}
	}
}

impl Default for Theme {
	fn default() -> Self {
		Self::echo()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn css_output() {
		assert_eq!(Color::rgb(255, 0, 16).to_css(), "#ff0010");
		assert_eq!(Color::rgba(1, 2, 3, 0.5).to_css(), "rgba(1, 2, 3, 0.5)");
	}

	#[test]
	fn lighten_and_darken_clamp() {
		let c = Color::rgb(100, 100, 100);
		assert_eq!(c.lighten(1.0), Color::rgb(255, 255, 255));
		assert_eq!(c.darken(5.0), Color::rgb(0, 0, 0));
		assert_eq!(c.lighten(0.0), c);
	}

	#[test]
	fn palette_distinguishes_sources() {
		let theme = Theme::default();
		let p = &theme.palette;
		assert_ne!(p.color_for(SourceType::Twitter), p.color_for(SourceType::Telegram));
		assert_ne!(p.color_for(SourceType::Telegram), p.color_for(SourceType::Konnect));
		assert_ne!(theme.node.ring_for(Direction::Long), theme.node.ring_for(Direction::Short));
	}
}
