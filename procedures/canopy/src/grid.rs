use crate::{depth::DepthMap, CanopyError};
use bevy::prelude::*;
use kernel::{make_polyline, Axis, Polyline, Surface};
use rayon::prelude::*;

/// One sample of the grid: a displaced point, or nothing where the surface is undefined.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GridCell {
	Point(Vec3),
	Absent,
}

impl GridCell {
	pub fn point(&self) -> Option<Vec3> {
		match self {
			GridCell::Point(point) => Some(*point),
			GridCell::Absent => None,
		}
	}

	pub fn is_absent(&self) -> bool {
		matches!(self, GridCell::Absent)
	}

	/// Raises a present point by `delta_z`; absent cells stay absent.
	pub fn lifted(self, delta_z: f32) -> Self {
		match self {
			GridCell::Point(point) => GridCell::Point(point + Vec3::Z * delta_z),
			GridCell::Absent => GridCell::Absent,
		}
	}
}

/// Rectangular grid of samples; row `i` follows increasing u, column `j` increasing v.
#[derive(Debug, Clone, PartialEq)]
pub struct PointGrid {
	rows: usize,
	columns: usize,
	/// Row-major.
	cells: Vec<GridCell>,
}

impl PointGrid {
	pub fn rows(&self) -> usize {
		self.rows
	}

	pub fn columns(&self) -> usize {
		self.columns
	}

	pub fn len(&self) -> usize {
		self.cells.len()
	}

	pub fn is_empty(&self) -> bool {
		self.cells.is_empty()
	}

	pub fn get(&self, row: usize, col: usize) -> Option<GridCell> {
		if row < self.rows && col < self.columns {
			Some(self.cells[row * self.columns + col])
		} else {
			None
		}
	}

	pub fn row(&self, row: usize) -> &[GridCell] {
		&self.cells[row * self.columns..(row + 1) * self.columns]
	}

	pub fn column(&self, col: usize) -> impl Iterator<Item = GridCell> + '_ {
		self.cells.iter().skip(col).step_by(self.columns).copied()
	}

	pub fn absent_count(&self) -> usize {
		self.cells.iter().filter(|cell| cell.is_absent()).count()
	}

	/// Nested rows of optional points, for hosts that consume structured point data.
	pub fn to_nested(&self) -> Vec<Vec<Option<Vec3>>> {
		(0..self.rows)
			.map(|row| self.row(row).iter().map(GridCell::point).collect())
			.collect()
	}

	/// One polyline per row and one per column, in grid order.
	///
	/// A line that crosses an absent cell fails on its own; the others are unaffected.
	pub fn build_polylines(
		&self,
	) -> (Vec<Result<Polyline, CanopyError>>, Vec<Result<Polyline, CanopyError>>) {
		let rows = (0..self.rows)
			.map(|row| {
				Self::polyline_through(
					self.row(row).iter().copied().enumerate().map(|(col, cell)| (row, col, cell)),
				)
			})
			.collect();

		let columns = (0..self.columns)
			.map(|col| {
				Self::polyline_through(
					self.column(col).enumerate().map(|(row, cell)| (row, col, cell)),
				)
			})
			.collect();

		(rows, columns)
	}

	fn polyline_through(
		cells: impl Iterator<Item = (usize, usize, GridCell)>,
	) -> Result<Polyline, CanopyError> {
		let points = cells
			.map(|(row, col, cell)| cell.point().ok_or(CanopyError::AbsentPoint { row, col }))
			.collect::<Result<Vec<_>, _>>()
			.inspect_err(|err| log::warn!("Skipping grid polyline: {}", err))?;

		Ok(make_polyline(points)?)
	}

	/// Row-major copy of every cell with Z raised by `delta_z`.
	///
	/// Absent cells keep their slot so flat indices still match [`crate::tessellate`].
	pub fn flatten_and_offset(&self, delta_z: f32) -> Vec<GridCell> {
		self.cells.iter().map(|cell| cell.lifted(delta_z)).collect()
	}
}

/// Samples a surface on a regular parameter grid and displaces it by a depth map.
#[derive(Debug, Clone)]
pub struct SurfaceGridBuilder<D: DepthMap> {
	depth: D,
}

impl<D: DepthMap> SurfaceGridBuilder<D> {
	pub fn new(depth: D) -> Self {
		Self { depth }
	}

	pub fn depth(&self) -> &D {
		&self.depth
	}

	/// Builds a `(u_divisions + 1) x (v_divisions + 1)` grid.
	///
	/// Rows are sampled in parallel and collected in order, so the result does not
	/// depend on scheduling.
	pub fn build_grid<S: Surface + ?Sized>(
		&self,
		surface: &S,
		u_divisions: usize,
		v_divisions: usize,
	) -> Result<PointGrid, CanopyError> {
		if u_divisions == 0 || v_divisions == 0 {
			return Err(CanopyError::InvalidConfiguration(format!(
				"grid divisions must be at least 1, got {} x {}",
				u_divisions, v_divisions
			)));
		}

		let u_domain = surface.domain(Axis::U);
		let v_domain = surface.domain(Axis::V);

		let cells: Vec<GridCell> = (0..=u_divisions)
			.into_par_iter()
			.map(|i| {
				let u = u_domain.lerp(i as f32 / u_divisions as f32);
				(0..=v_divisions)
					.map(|j| {
						let v = v_domain.lerp(j as f32 / v_divisions as f32);
						match surface.evaluate(u, v) {
							Ok(point) => GridCell::Point(point + Vec3::Z * self.depth.depth(u, v)),
							Err(err) => {
								log::warn!("Grid cell ({}, {}) is absent: {}", i, j, err);
								GridCell::Absent
							}
						}
					})
					.collect::<Vec<_>>()
			})
			.collect::<Vec<_>>()
			.into_iter()
			.flatten()
			.collect();

		let grid = PointGrid { rows: u_divisions + 1, columns: v_divisions + 1, cells };
		log::info!(
			"Sampled {} x {} grid ({} absent)",
			grid.rows,
			grid.columns,
			grid.absent_count()
		);

		Ok(grid)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::depth::WaveDepth;
	use kernel::{ParametricSurface, PlaneSurface};

	fn flat_builder() -> SurfaceGridBuilder<WaveDepth> {
		SurfaceGridBuilder::new(WaveDepth::default())
	}

	#[test]
	fn test_grid_shape() {
		let builder = flat_builder();
		for (u_div, v_div) in [(1, 1), (4, 4), (3, 7), (10, 2)] {
			let grid = builder.build_grid(&PlaneSurface::default(), u_div, v_div).unwrap();
			assert_eq!(grid.rows(), u_div + 1);
			assert_eq!(grid.columns(), v_div + 1);
			assert_eq!(grid.len(), (u_div + 1) * (v_div + 1));
			assert_eq!(grid.absent_count(), 0);
		}
	}

	#[test]
	fn test_zero_divisions_rejected() {
		let builder = flat_builder();
		assert!(matches!(
			builder.build_grid(&PlaneSurface::default(), 0, 4),
			Err(CanopyError::InvalidConfiguration(_))
		));
		assert!(matches!(
			builder.build_grid(&PlaneSurface::default(), 4, 0),
			Err(CanopyError::InvalidConfiguration(_))
		));
	}

	#[test]
	fn test_flat_surface_depth_scenario() {
		let grid = flat_builder().build_grid(&PlaneSurface::default(), 4, 4).unwrap();

		// u = 0.25, v = 0.25: cos(π/2) = 0
		let point = grid.get(1, 1).and_then(|cell| cell.point()).unwrap();
		assert!(point.z.abs() < 1e-5);
		assert!(point.truncate().abs_diff_eq(Vec2::new(0.25, 0.25), 1e-6));

		// u = 0.25, v = 0: sin(π/2) · cos(0) = 1
		let point = grid.get(1, 0).and_then(|cell| cell.point()).unwrap();
		assert!((point.z - 2.0).abs() < 1e-5);

		// domain corners stay on the plane
		let point = grid.get(4, 4).and_then(|cell| cell.point()).unwrap();
		assert!(point.z.abs() < 1e-5);
	}

	#[test]
	fn test_rows_follow_u() {
		let surface = PlaneSurface::xy(8.0, 2.0, 0.0);
		let grid = SurfaceGridBuilder::new(|_: f32, _: f32| 0.0_f32).build_grid(&surface, 4, 2).unwrap();

		assert_eq!(grid.get(0, 0).unwrap(), GridCell::Point(Vec3::ZERO));
		assert_eq!(grid.get(1, 0).unwrap(), GridCell::Point(Vec3::new(2.0, 0.0, 0.0)));
		assert_eq!(grid.get(0, 1).unwrap(), GridCell::Point(Vec3::new(0.0, 1.0, 0.0)));
		assert!(grid.get(5, 0).is_none());
	}

	#[test]
	fn test_failed_evaluation_is_absent() {
		let surface = ParametricSurface::new(|u: f32, v: f32| {
			if u > 0.6 && v > 0.6 {
				None
			} else {
				Some(Vec3::new(u, v, 0.0))
			}
		});
		let grid = flat_builder().build_grid(&surface, 4, 4).unwrap();

		// u, v in {0.75, 1.0}
		assert_eq!(grid.absent_count(), 4);
		assert!(grid.get(3, 3).unwrap().is_absent());
		assert!(grid.get(4, 4).unwrap().is_absent());
		assert!(!grid.get(2, 4).unwrap().is_absent());

		let nested = grid.to_nested();
		assert_eq!(nested.len(), 5);
		assert!(nested[3][3].is_none());
		assert!(nested[0][0].is_some());
	}

	#[test]
	fn test_polylines_preserve_grid_order() {
		let grid = flat_builder().build_grid(&PlaneSurface::default(), 2, 3).unwrap();
		let (rows, columns) = grid.build_polylines();

		assert_eq!(rows.len(), 3);
		assert_eq!(columns.len(), 4);

		let row = rows[1].as_ref().unwrap();
		assert_eq!(row.points().len(), 4);
		assert_eq!(row.points()[2], grid.get(1, 2).unwrap().point().unwrap());

		let column = columns[3].as_ref().unwrap();
		assert_eq!(column.points().len(), 3);
		assert_eq!(column.points()[1], grid.get(1, 3).unwrap().point().unwrap());
	}

	#[test]
	fn test_polylines_fail_per_line() {
		let surface = ParametricSurface::new(|u: f32, v: f32| {
			if u == 0.5 && v == 0.5 {
				None
			} else {
				Some(Vec3::new(u, v, 0.0))
			}
		});
		let grid = flat_builder().build_grid(&surface, 2, 2).unwrap();
		let (rows, columns) = grid.build_polylines();

		assert!(rows[0].is_ok());
		assert!(matches!(rows[1], Err(CanopyError::AbsentPoint { row: 1, col: 1 })));
		assert!(rows[2].is_ok());
		assert!(columns[0].is_ok());
		assert!(matches!(columns[1], Err(CanopyError::AbsentPoint { row: 1, col: 1 })));
		assert!(columns[2].is_ok());
	}

	#[test]
	fn test_flatten_and_offset() {
		let surface = ParametricSurface::new(|u: f32, v: f32| {
			if u == 1.0 && v == 0.0 {
				None
			} else {
				Some(Vec3::new(u, v, 1.0))
			}
		});
		let grid = SurfaceGridBuilder::new(|_: f32, _: f32| 0.0_f32).build_grid(&surface, 1, 2).unwrap();
		let flat = grid.flatten_and_offset(10.0);

		assert_eq!(flat.len(), 6);
		assert_eq!(flat[0], GridCell::Point(Vec3::new(0.0, 0.0, 11.0)));
		assert_eq!(flat[2], GridCell::Point(Vec3::new(0.0, 1.0, 11.0)));
		// row 1, column 0 keeps its slot
		assert_eq!(flat[3], GridCell::Absent);
		assert_eq!(flat[5], GridCell::Point(Vec3::new(1.0, 1.0, 11.0)));

		// the grid itself is untouched
		assert_eq!(grid.get(0, 0).unwrap(), GridCell::Point(Vec3::new(0.0, 0.0, 1.0)));
	}
}
