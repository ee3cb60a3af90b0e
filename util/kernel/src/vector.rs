use crate::KernelError;
use bevy::prelude::*;

/// Vector pointing from `from` to `to`.
pub fn vector_between(from: Vec3, to: Vec3) -> Vec3 {
	to - from
}

pub fn scale_vector(vector: Vec3, scalar: f32) -> Vec3 {
	vector * scalar
}

pub fn add_point_vector(point: Vec3, vector: Vec3) -> Vec3 {
	point + vector
}

/// Rotates `vector` by `angle_degrees` about `axis` (right-hand rule).
pub fn rotate_vector(vector: Vec3, angle_degrees: f32, axis: Vec3) -> Result<Vec3, KernelError> {
	let axis = axis.try_normalize().ok_or(KernelError::DegenerateVector)?;
	Ok(Quat::from_axis_angle(axis, angle_degrees.to_radians()) * vector)
}
