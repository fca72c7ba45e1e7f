//! 3D signal relationship graph.
//!
//! Lays out signals with the force simulation in [`crate::layout`] and draws
//! them on an HTML canvas with:
//! - Perspective projection under a slowly orbiting camera
//! - Drag to orbit, wheel to zoom, click for a particle burst
//! - Smooth highlight of a hovered signal and its related signals
//! - Ambient twinkling particles
//!
//! # Example
//!
//! ```ignore
//! use echo_signals::components::signal_graph::SignalGraphCanvas;
//! use echo_signals::demo::generate_signals;
//!
//! let signals = generate_signals(seed, 12, now_ms)?;
//! view! { <SignalGraphCanvas signals=signals fullscreen=true /> }
//! ```

mod component;
pub mod particles;
mod render;
pub mod state;
pub mod theme;

pub use component::SignalGraphCanvas;
pub use particles::{Particle, ParticleSystem, advance_particles};
pub use state::SignalGraphState;
pub use theme::Theme;
