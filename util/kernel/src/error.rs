use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum KernelError {
	#[error("surface is undefined at (u = {u}, v = {v})")]
	SurfaceEvaluation { u: f32, v: f32 },

	#[error("vector has zero or non-finite length")]
	DegenerateVector,

	#[error("expected at least {required} points, found {found}")]
	TooFewPoints { required: usize, found: usize },

	#[error("all control points are coincident")]
	CoincidentPoints,

	#[error("expected a {rows} x {columns} grid of at least 2 x 2 points, found {found} points")]
	GridShape { rows: usize, columns: usize, found: usize },

	#[error("face {face} references vertex {index}, but only {vertex_count} vertices exist")]
	FaceIndexOutOfRange { face: usize, index: u32, vertex_count: usize },
}
