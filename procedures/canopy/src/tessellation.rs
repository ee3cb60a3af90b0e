use crate::{grid::GridCell, CanopyError};
use bevy::prelude::*;
use kernel::{make_grid_surface, make_mesh, GridSurface, MeshBuilder, TriangleFace, TriangleMesh};

/// Splits every cell of a `rows x cols` grid into two triangles.
///
/// For the cell at `(i, j)` with corners `p1 = i·cols + j`, `p2 = p1 + 1`,
/// `p3 = p1 + cols`, `p4 = p3 + 1`, the faces are `(p1, p2, p3)` then `(p2, p3, p4)`.
/// Every cell uses the same `p2`-`p3` diagonal. Grids whose vertices cannot all be
/// addressed by a `u32` index are rejected.
pub fn tessellate(rows: usize, cols: usize) -> Result<Vec<TriangleFace>, CanopyError> {
	let out_of_range = || {
		CanopyError::DegenerateGeometry(format!(
			"a {} x {} grid has more vertices than a u32 index can address",
			rows, cols
		))
	};
	let vertex_count = rows
		.checked_mul(cols)
		.and_then(|count| u32::try_from(count).ok())
		.ok_or_else(out_of_range)?;
	if vertex_count == 0 {
		return Ok(Vec::new());
	}

	// both sides are at most the non-zero vertex count
	let rows = u32::try_from(rows).map_err(|_| out_of_range())?;
	let cols = u32::try_from(cols).map_err(|_| out_of_range())?;

	let cell_count = (rows - 1) as usize * (cols - 1) as usize;
	let mut faces = Vec::with_capacity(2 * cell_count);
	for i in 0..rows - 1 {
		for j in 0..cols - 1 {
			let p1 = i * cols + j;
			let p2 = p1 + 1;
			let p3 = p1 + cols;
			let p4 = p3 + 1;

			faces.push(TriangleFace::new(p1, p2, p3));
			faces.push(TriangleFace::new(p2, p3, p4));
		}
	}
	Ok(faces)
}

/// Every cell as a vertex; the first absent cell fails the whole list.
fn present_vertices(cells: &[GridCell]) -> Result<Vec<Vec3>, CanopyError> {
	cells
		.iter()
		.enumerate()
		.map(|(index, cell)| cell.point().ok_or(CanopyError::AbsentVertex { index }))
		.collect()
}

/// Interpolating surface through the lifted grid, alongside the mesh.
pub fn reconstruct_surface(
	cells: &[GridCell],
	rows: usize,
	columns: usize,
) -> Result<GridSurface, CanopyError> {
	let vertices = present_vertices(cells)?;
	Ok(make_grid_surface(rows, columns, vertices)?)
}

/// The tessellated shell: lifted grid points and their faces.
#[derive(Debug, Clone, PartialEq)]
pub struct CanopyMesh {
	rows: usize,
	columns: usize,
	mesh: TriangleMesh,
}

impl CanopyMesh {
	/// Builds the shell from row-major cells.
	///
	/// Every cell is a vertex of some face, so a single absent cell fails the whole mesh.
	pub fn from_cells(cells: &[GridCell], rows: usize, columns: usize) -> Result<Self, CanopyError> {
		if cells.len() != rows * columns {
			return Err(CanopyError::DegenerateGeometry(format!(
				"expected {} cells for a {} x {} grid, found {}",
				rows * columns,
				rows,
				columns,
				cells.len()
			)));
		}

		let vertices = present_vertices(cells)?;
		let mesh = make_mesh(vertices, tessellate(rows, columns)?)?;
		Ok(Self { rows, columns, mesh })
	}

	pub fn rows(&self) -> usize {
		self.rows
	}

	pub fn columns(&self) -> usize {
		self.columns
	}

	pub fn vertices(&self) -> &[Vec3] {
		self.mesh.vertices()
	}

	pub fn faces(&self) -> &[TriangleFace] {
		self.mesh.faces()
	}
}

impl MeshBuilder for CanopyMesh {
	fn build_mesh(&self) -> Option<Mesh> {
		self.mesh.build_mesh()
	}
}
