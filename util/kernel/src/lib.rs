pub mod curve;
pub mod error;
pub mod mesh;
pub mod plane;
pub mod surface;
pub mod vector;

pub use curve::{make_curve, make_polyline, Curve, Polyline};
pub use error::KernelError;
pub use mesh::{make_mesh, MeshBuilder, TriangleFace, TriangleMesh};
pub use plane::Plane;
pub use surface::{
	make_grid_surface, Axis, Domain, GridSurface, ParametricSurface, PlaneSurface, Surface,
};
pub use vector::{add_point_vector, rotate_vector, scale_vector, vector_between};

// The kernel is the narrow geometry boundary the canopy procedures consume:
// - surfaces expose a parameter domain and point evaluation
// - planes and vectors cover the arithmetic needed for branch growth
// - curves, polylines, grid surfaces and meshes are the handles handed back to the host
