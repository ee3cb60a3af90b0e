use super::{branch::Branch, SupportTree};
use crate::{config::MAX_GENERATION, CanopyError, RunConfig};
use bevy::prelude::*;
use kernel::{rotate_vector, vector_between, Plane};
use rand::Rng;

/// Grows randomized binary support trees.
///
/// Every growth step forks twice: both children rotate the parent heading about the
/// same random axis perpendicular to it, one by a negative and one by a positive angle.
#[derive(Debug, Clone, PartialEq)]
pub struct FractalSupportBuilder {
	/// Growth stops once this many fork generations have been emitted.
	pub max_generation: u32,
	/// Maximum deviation of a child from its parent, in degrees.
	pub angle: f32,
	/// Smallest factor applied to the parent length for a child; must be positive.
	pub min_decay: f32,
	/// Largest factor applied to the parent length for a child; at most 1 so branches shrink.
	pub max_decay: f32,
}

impl FractalSupportBuilder {
	pub fn new(max_generation: u32, angle: f32) -> Self {
		Self { max_generation, angle, min_decay: 0.75, max_decay: 0.95 }
	}

	pub fn from_config(config: &RunConfig) -> Self {
		Self::new(config.max_generation, config.angle)
	}

	pub fn with_min_decay(mut self, min_decay: f32) -> Self {
		self.min_decay = min_decay;
		self
	}

	pub fn with_max_decay(mut self, max_decay: f32) -> Self {
		self.max_decay = max_decay;
		self
	}

	/// Grows one tree from a ground point.
	///
	/// A straight trunk of `length` runs from `start` along `direction`; growth begins
	/// at its end with generation 0. The tree holds exactly `2^(G+1) - 2` forks plus
	/// the trunk for `max_generation = G`.
	pub fn grow<R: Rng + ?Sized>(
		&self,
		rng: &mut R,
		start: Vec3,
		direction: Vec3,
		length: f32,
	) -> Result<SupportTree, CanopyError> {
		self.validate(length)?;
		let direction = direction.try_normalize().ok_or_else(|| {
			CanopyError::DegenerateGeometry("support direction has zero length".to_string())
		})?;

		let mut tree = SupportTree::default();
		let trunk = Branch::trunk(start, direction, length);
		let first_point = trunk.end();
		let trunk_index = tree.push(trunk);

		self.grow_from(rng, &mut tree, trunk_index, first_point, direction, length, 0)?;

		log::debug!("Grew support tree from {:?} with {} branches", start, tree.len());
		Ok(tree)
	}

	fn validate(&self, length: f32) -> Result<(), CanopyError> {
		if !(length.is_finite() && length > 0.0) {
			return Err(CanopyError::InvalidConfiguration(format!(
				"branch length must be positive, got {}",
				length
			)));
		}
		if !(self.angle.is_finite() && self.angle >= 0.0) {
			return Err(CanopyError::InvalidConfiguration(format!(
				"branch angle must be non-negative, got {}",
				self.angle
			)));
		}
		if self.max_generation > MAX_GENERATION {
			return Err(CanopyError::InvalidConfiguration(format!(
				"max generation {} exceeds the limit of {}",
				self.max_generation, MAX_GENERATION
			)));
		}
		let finite = self.min_decay.is_finite() && self.max_decay.is_finite();
		let ordered =
			0.0 < self.min_decay && self.min_decay <= self.max_decay && self.max_decay <= 1.0;
		if !(finite && ordered) {
			return Err(CanopyError::InvalidConfiguration(format!(
				"length decay range [{}, {}] must lie within (0, 1]",
				self.min_decay, self.max_decay
			)));
		}
		Ok(())
	}

	#[allow(clippy::too_many_arguments)]
	fn grow_from<R: Rng + ?Sized>(
		&self,
		rng: &mut R,
		tree: &mut SupportTree,
		parent: usize,
		point: Vec3,
		direction: Vec3,
		length: f32,
		generation: u32,
	) -> Result<(), CanopyError> {
		if generation >= self.max_generation {
			return Ok(());
		}

		// random axis in the plane perpendicular to the heading
		let plane = Plane::from_point_normal(point, direction)?;
		let s = rng.gen_range(-1.0..=1.0);
		let t = rng.gen_range(-1.0..=1.0);
		let axis = vector_between(point, plane.evaluate(s, t));
		let axis = if axis.length_squared() > f32::EPSILON { axis } else { plane.x_axis };

		let first_direction = rotate_vector(direction, rng.gen_range(-self.angle..=0.0), axis)?;
		let second_direction = rotate_vector(direction, rng.gen_range(0.0..=self.angle), axis)?;

		let first = Branch::fork(point, first_direction, length, generation, parent);
		let second = Branch::fork(point, second_direction, length, generation, parent);
		let (first_end, second_end) = (first.end(), second.end());
		let first_index = tree.push(first);
		let second_index = tree.push(second);

		// the second child's length is drawn only after the first subtree is complete
		let first_length = length * rng.gen_range(self.min_decay..=self.max_decay);
		self.grow_from(
			rng,
			tree,
			first_index,
			first_end,
			first_direction,
			first_length,
			generation + 1,
		)?;

		let second_length = length * rng.gen_range(self.min_decay..=self.max_decay);
		self.grow_from(
			rng,
			tree,
			second_index,
			second_end,
			second_direction,
			second_length,
			generation + 1,
		)
	}
}
