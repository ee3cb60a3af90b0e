use bevy::prelude::*;
use kernel::{make_curve, Curve, KernelError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BranchKind {
	/// Straight segment from the ground point to the first fork.
	Trunk,
	/// Curved segment emitted by a growth step.
	Fork,
}

/// One segment of a support tree. Never mutated once emitted.
#[derive(Debug, Clone, PartialEq)]
pub struct Branch {
	pub kind: BranchKind,
	/// Start, two shaping points, end.
	pub control_points: [Vec3; 4],
	/// Generation of the growth step that emitted the branch; 0 for the trunk.
	pub generation: u32,
	/// Arena index of the branch this one grows from.
	pub parent: Option<usize>,
	/// Unit heading from start to end.
	pub direction: Vec3,
	pub length: f32,
}

impl Branch {
	/// A straight trunk; its control points are evenly spaced along the segment.
	pub fn trunk(start: Vec3, direction: Vec3, length: f32) -> Self {
		let end = start + direction * length;
		Self {
			kind: BranchKind::Trunk,
			control_points: [start, start.lerp(end, 1.0 / 3.0), start.lerp(end, 2.0 / 3.0), end],
			generation: 0,
			parent: None,
			direction,
			length,
		}
	}

	/// A fork from `start` along `direction`.
	///
	/// The shaping points sit at half height between the ends: one above the start,
	/// one above the end, so the curve leaves and arrives vertically.
	pub fn fork(start: Vec3, direction: Vec3, length: f32, generation: u32, parent: usize) -> Self {
		let end = start + direction * length;
		let mid_z = start.z + (end.z - start.z) * 0.5;
		Self {
			kind: BranchKind::Fork,
			control_points: [
				start,
				Vec3::new(start.x, start.y, mid_z),
				Vec3::new(end.x, end.y, mid_z),
				end,
			],
			generation,
			parent: Some(parent),
			direction,
			length,
		}
	}

	pub fn start(&self) -> Vec3 {
		self.control_points[0]
	}

	pub fn end(&self) -> Vec3 {
		self.control_points[3]
	}

	pub fn to_curve(&self) -> Result<Curve, KernelError> {
		make_curve(self.control_points.to_vec())
	}
}
