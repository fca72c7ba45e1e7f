//! Minimal 3D vector for the layout physics.

use std::ops::{Add, AddAssign, Mul, Neg, Sub};

use serde::Serialize;

/// Point or displacement in layout space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct Vec3 {
	pub x: f64,
	pub y: f64,
	pub z: f64,
}

impl Vec3 {
	/// The origin.
	pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

	/// Vector from its components.
	pub const fn new(x: f64, y: f64, z: f64) -> Self {
		Self { x, y, z }
	}

	/// Point at `radius` along spherical angles `theta` (azimuth) and `phi` (polar).
	pub fn from_spherical(radius: f64, theta: f64, phi: f64) -> Self {
		Self {
			x: radius * phi.sin() * theta.cos(),
			y: radius * phi.sin() * theta.sin(),
			z: radius * phi.cos(),
		}
	}

	/// Euclidean length.
	pub fn length(self) -> f64 {
		self.dot(self).sqrt()
	}

	/// Dot product.
	pub fn dot(self, other: Self) -> f64 {
		self.x * other.x + self.y * other.y + self.z * other.z
	}

	/// Rotates around the vertical (y) axis by `angle` radians.
	pub fn rotate_y(self, angle: f64) -> Self {
		let (sin, cos) = angle.sin_cos();
		Self {
			x: self.x * cos + self.z * sin,
			y: self.y,
			z: -self.x * sin + self.z * cos,
		}
	}

	/// Rotates around the horizontal (x) axis by `angle` radians.
	pub fn rotate_x(self, angle: f64) -> Self {
		let (sin, cos) = angle.sin_cos();
		Self {
			x: self.x,
			y: self.y * cos - self.z * sin,
			z: self.y * sin + self.z * cos,
		}
	}
}

impl Add for Vec3 {
	type Output = Self;

	fn add(self, rhs: Self) -> Self {
		Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
	}
}

impl AddAssign for Vec3 {
	fn add_assign(&mut self, rhs: Self) {
		*self = *self + rhs;
	}
}

impl Sub for Vec3 {
	type Output = Self;

	fn sub(self, rhs: Self) -> Self {
		Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
	}
}

impl Mul<f64> for Vec3 {
	type Output = Self;

	fn mul(self, rhs: f64) -> Self {
		Self::new(self.x * rhs, self.y * rhs, self.z * rhs)
	}
}

impl Neg for Vec3 {
	type Output = Self;

	fn neg(self) -> Self {
		Self::new(-self.x, -self.y, -self.z)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::f64::consts::FRAC_PI_2;

	fn close(a: Vec3, b: Vec3) -> bool {
		(a - b).length() < 1e-9
	}

	#[test]
	fn spherical_radius_is_preserved() {
		let p = Vec3::from_spherical(6.5, 1.2, 2.0);
		assert!((p.length() - 6.5).abs() < 1e-9);
	}

	#[test]
	fn rotations_keep_length() {
		let p = Vec3::new(1.0, 2.0, 3.0);
		assert!((p.rotate_y(0.7).rotate_x(-1.1).length() - p.length()).abs() < 1e-9);
		assert!(close(Vec3::new(1.0, 0.0, 0.0).rotate_y(FRAC_PI_2), Vec3::new(0.0, 0.0, -1.0)));
	}
}
