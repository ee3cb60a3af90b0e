use crate::KernelError;
use bevy::prelude::*;

/// Parameter axis of a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
	U,
	V,
}

/// A closed parameter interval `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Domain {
	pub min: f32,
	pub max: f32,
}

impl Domain {
	pub fn new(min: f32, max: f32) -> Self {
		Self { min, max }
	}

	pub fn unit() -> Self {
		Self { min: 0.0, max: 1.0 }
	}

	pub fn span(&self) -> f32 {
		self.max - self.min
	}

	/// Maps `t` in `[0, 1]` onto the interval.
	pub fn lerp(&self, t: f32) -> f32 {
		self.min + t * self.span()
	}
}

impl Default for Domain {
	fn default() -> Self {
		Self::unit()
	}
}

/// A continuous parametric surface.
///
/// Evaluation may fail where the surface is undefined (trimmed regions, poles, etc.);
/// callers decide whether a failed sample is fatal.
pub trait Surface: Send + Sync {
	fn domain(&self, axis: Axis) -> Domain;

	fn evaluate(&self, u: f32, v: f32) -> Result<Vec3, KernelError>;
}

/// A flat rectangle spanned by two edge vectors from an origin.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaneSurface {
	pub origin: Vec3,
	pub u_edge: Vec3,
	pub v_edge: Vec3,
	pub u_domain: Domain,
	pub v_domain: Domain,
}

impl PlaneSurface {
	pub fn new(origin: Vec3, u_edge: Vec3, v_edge: Vec3) -> Self {
		Self { origin, u_edge, v_edge, u_domain: Domain::unit(), v_domain: Domain::unit() }
	}

	/// A `width` by `depth` rectangle on the XY plane at height `z`.
	pub fn xy(width: f32, depth: f32, z: f32) -> Self {
		Self::new(Vec3::new(0.0, 0.0, z), Vec3::X * width, Vec3::Y * depth)
	}

	pub fn with_u_domain(mut self, domain: Domain) -> Self {
		self.u_domain = domain;
		self
	}

	pub fn with_v_domain(mut self, domain: Domain) -> Self {
		self.v_domain = domain;
		self
	}
}

impl Default for PlaneSurface {
	fn default() -> Self {
		Self::xy(1.0, 1.0, 0.0)
	}
}

impl Surface for PlaneSurface {
	fn domain(&self, axis: Axis) -> Domain {
		match axis {
			Axis::U => self.u_domain,
			Axis::V => self.v_domain,
		}
	}

	fn evaluate(&self, u: f32, v: f32) -> Result<Vec3, KernelError> {
		let s = (u - self.u_domain.min) / self.u_domain.span();
		let t = (v - self.v_domain.min) / self.v_domain.span();
		let point = self.origin + self.u_edge * s + self.v_edge * t;
		if point.is_finite() {
			Ok(point)
		} else {
			Err(KernelError::SurfaceEvaluation { u, v })
		}
	}
}

/// A surface defined by a closure; returning `None` marks the surface undefined at `(u, v)`.
pub struct ParametricSurface<F>
where
	F: Fn(f32, f32) -> Option<Vec3> + Send + Sync,
{
	function: F,
	u_domain: Domain,
	v_domain: Domain,
}

impl<F> ParametricSurface<F>
where
	F: Fn(f32, f32) -> Option<Vec3> + Send + Sync,
{
	pub fn new(function: F) -> Self {
		Self { function, u_domain: Domain::unit(), v_domain: Domain::unit() }
	}

	pub fn with_u_domain(mut self, domain: Domain) -> Self {
		self.u_domain = domain;
		self
	}

	pub fn with_v_domain(mut self, domain: Domain) -> Self {
		self.v_domain = domain;
		self
	}
}

impl<F> Surface for ParametricSurface<F>
where
	F: Fn(f32, f32) -> Option<Vec3> + Send + Sync,
{
	fn domain(&self, axis: Axis) -> Domain {
		match axis {
			Axis::U => self.u_domain,
			Axis::V => self.v_domain,
		}
	}

	fn evaluate(&self, u: f32, v: f32) -> Result<Vec3, KernelError> {
		(self.function)(u, v)
			.filter(|point| point.is_finite())
			.ok_or(KernelError::SurfaceEvaluation { u, v })
	}
}

/// Bilinear patchwork through a rectangular grid of points, over the unit square.
///
/// Row `i` sits at `u = i / (rows - 1)` and column `j` at `v = j / (columns - 1)`,
/// so the surface passes through every grid point.
#[derive(Debug, Clone, PartialEq)]
pub struct GridSurface {
	rows: usize,
	columns: usize,
	/// Row-major.
	points: Vec<Vec3>,
}

impl GridSurface {
	pub fn rows(&self) -> usize {
		self.rows
	}

	pub fn columns(&self) -> usize {
		self.columns
	}

	pub fn points(&self) -> &[Vec3] {
		&self.points
	}

	fn point(&self, row: usize, col: usize) -> Vec3 {
		self.points[row * self.columns + col]
	}

	/// Cell index and the fraction across it for a parameter in `[0, 1]`.
	fn locate(t: f32, count: usize) -> (usize, f32) {
		let scaled = t.clamp(0.0, 1.0) * (count - 1) as f32;
		let index = (scaled.floor() as usize).min(count - 2);
		(index, scaled - index as f32)
	}
}

/// Builds a surface through a `rows x columns` grid of row-major points.
pub fn make_grid_surface(
	rows: usize,
	columns: usize,
	points: Vec<Vec3>,
) -> Result<GridSurface, KernelError> {
	if rows < 2 || columns < 2 || rows.checked_mul(columns) != Some(points.len()) {
		return Err(KernelError::GridShape { rows, columns, found: points.len() });
	}
	Ok(GridSurface { rows, columns, points })
}

impl Surface for GridSurface {
	fn domain(&self, _axis: Axis) -> Domain {
		Domain::unit()
	}

	fn evaluate(&self, u: f32, v: f32) -> Result<Vec3, KernelError> {
		if !(u.is_finite() && v.is_finite()) {
			return Err(KernelError::SurfaceEvaluation { u, v });
		}

		let (row, s) = Self::locate(u, self.rows);
		let (col, t) = Self::locate(v, self.columns);
		let near = self.point(row, col).lerp(self.point(row, col + 1), t);
		let far = self.point(row + 1, col).lerp(self.point(row + 1, col + 1), t);
		Ok(near.lerp(far, s))
	}
}
