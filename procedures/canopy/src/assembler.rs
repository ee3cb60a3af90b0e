use crate::{
	config::{ReseedPolicy, RunConfig},
	depth::{ConfiguredDepth, DepthMap},
	grid::{GridCell, PointGrid, SurfaceGridBuilder},
	supports::{builder::FractalSupportBuilder, SupportTree},
	tessellation::{reconstruct_surface, CanopyMesh},
	CanopyError,
};
use bevy::prelude::*;
use kernel::{Curve, GridSurface, Polyline, Surface};
use rand::{rngs::StdRng, seq::index, Rng, SeedableRng};

/// Everything one run produces.
///
/// Per-item failures stay in place as `Err` entries so the host can decide what to keep.
#[derive(Debug)]
pub struct CanopyOutput {
	pub row_polylines: Vec<Result<Polyline, CanopyError>>,
	pub column_polylines: Vec<Result<Polyline, CanopyError>>,
	/// Displaced samples before the vertical lift, in grid shape.
	pub grid: PointGrid,
	/// Shell mesh over the lifted samples.
	pub mesh: Result<CanopyMesh, CanopyError>,
	/// Interpolating surface through the lifted samples.
	pub surface: Result<GridSurface, CanopyError>,
	/// One entry per chosen start point, in sampling order.
	pub supports: Vec<Result<SupportTree, CanopyError>>,
}

impl CanopyOutput {
	/// Trunks plus forks across every grown tree.
	pub fn branch_count(&self) -> usize {
		self.supports.iter().flatten().map(SupportTree::len).sum()
	}

	/// Ground points the trees were grown from.
	pub fn start_points(&self) -> Vec<Vec3> {
		self.supports
			.iter()
			.flatten()
			.filter_map(|tree| tree.trunk().map(|trunk| trunk.start()))
			.collect()
	}

	/// Every support branch as a curve, trees in order, each tree trunk first.
	pub fn curves(&self) -> Vec<Result<Curve, CanopyError>> {
		self.supports
			.iter()
			.flatten()
			.flat_map(|tree| tree.branches())
			.map(|branch| branch.to_curve().map_err(CanopyError::from))
			.collect()
	}

	pub fn failed_polylines(&self) -> usize {
		self.row_polylines
			.iter()
			.chain(self.column_polylines.iter())
			.filter(|polyline| polyline.is_err())
			.count()
	}
}

/// Runs the whole pipeline: grid, polylines, lifted mesh and support trees.
#[derive(Debug, Clone)]
pub struct CanopyAssembler<D: DepthMap = ConfiguredDepth> {
	config: RunConfig,
	grid_builder: SurfaceGridBuilder<D>,
}

impl CanopyAssembler<ConfiguredDepth> {
	/// Uses the depth strategy named in the configuration.
	pub fn new(config: RunConfig) -> Self {
		let grid_builder = SurfaceGridBuilder::new(config.depth.build());
		Self { config, grid_builder }
	}
}

impl<D: DepthMap> CanopyAssembler<D> {
	/// Replaces the depth map, keeping the rest of the configuration.
	pub fn with_depth_map<E: DepthMap>(self, depth: E) -> CanopyAssembler<E> {
		CanopyAssembler { config: self.config, grid_builder: SurfaceGridBuilder::new(depth) }
	}

	pub fn config(&self) -> &RunConfig {
		&self.config
	}

	pub fn run<S: Surface + ?Sized>(&self, surface: &S) -> Result<CanopyOutput, CanopyError> {
		self.config.validate()?;
		let config = &self.config;
		log::info!("Assembling canopy with seed {}", config.seed);

		let grid = self.grid_builder.build_grid(surface, config.u_divisions, config.v_divisions)?;
		let (row_polylines, column_polylines) = grid.build_polylines();

		let lifted = grid.flatten_and_offset(config.delta_z);
		let ground = project_to_ground(&lifted);

		let mut rng = StdRng::seed_from_u64(config.seed);
		let start_points = sample_start_points(&mut rng, &ground, config.support_count);

		let builder = FractalSupportBuilder::from_config(config);
		let supports: Vec<_> = start_points
			.into_iter()
			.map(|start| {
				let tree = match config.reseed {
					ReseedPolicy::PerRun => builder.grow(&mut rng, start, Vec3::Z, config.length),
					ReseedPolicy::PerStartPoint => {
						let mut tree_rng = StdRng::seed_from_u64(config.seed);
						builder.grow(&mut tree_rng, start, Vec3::Z, config.length)
					}
				};
				tree.inspect_err(|err| log::warn!("Support tree at {:?} failed: {}", start, err))
			})
			.collect();

		let mesh = CanopyMesh::from_cells(&lifted, grid.rows(), grid.columns())
			.inspect_err(|err| log::warn!("Canopy mesh failed: {}", err));
		let surface = reconstruct_surface(&lifted, grid.rows(), grid.columns())
			.inspect_err(|err| log::warn!("Canopy surface failed: {}", err));

		let output =
			CanopyOutput { row_polylines, column_polylines, grid, mesh, surface, supports };
		log::info!(
			"Assembled canopy: {} supports, {} branches, {} failed polylines",
			output.supports.len(),
			output.branch_count(),
			output.failed_polylines()
		);

		Ok(output)
	}
}

/// Present points dropped to `z = 0`; absent cells are skipped.
pub fn project_to_ground(cells: &[GridCell]) -> Vec<Vec3> {
	cells.iter().filter_map(GridCell::point).map(|point| point.with_z(0.0)).collect()
}

/// Picks `min(count, points.len())` distinct points, in no particular order.
pub fn sample_start_points<R: Rng + ?Sized>(rng: &mut R, points: &[Vec3], count: usize) -> Vec<Vec3> {
	let amount = count.min(points.len());
	if amount < count {
		log::warn!("Requested {} supports but only {} points are available", count, amount);
	}
	index::sample(rng, points.len(), amount).into_iter().map(|i| points[i]).collect()
}
