use crate::KernelError;
use bevy::prelude::*;

/// An oriented plane: an origin plus an orthonormal frame whose third axis is the normal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
	pub origin: Vec3,
	pub x_axis: Vec3,
	pub y_axis: Vec3,
	pub normal: Vec3,
}

impl Plane {
	/// Builds a plane through `origin` perpendicular to `normal`.
	///
	/// The in-plane axes are derived from the normal alone, so the same normal
	/// always yields the same frame.
	pub fn from_point_normal(origin: Vec3, normal: Vec3) -> Result<Self, KernelError> {
		let normal = normal.try_normalize().ok_or(KernelError::DegenerateVector)?;
		let [x_axis, y_axis] = Self::orthonormal_basis(normal);
		Ok(Self { origin, x_axis, y_axis, normal })
	}

	/// Builds two unit vectors perpendicular to `dir` and to each other.
	fn orthonormal_basis(dir: Vec3) -> [Vec3; 2] {
		let right = if dir.x.abs() > dir.z.abs() {
			Vec3::new(-dir.y, dir.x, 0.0).normalize()
		} else {
			Vec3::new(0.0, -dir.z, dir.y).normalize()
		};
		let up = dir.cross(right).normalize();
		[right, up]
	}

	/// Point at plane-local coordinates `(s, t)`.
	pub fn evaluate(&self, s: f32, t: f32) -> Vec3 {
		self.origin + self.x_axis * s + self.y_axis * t
	}
}
