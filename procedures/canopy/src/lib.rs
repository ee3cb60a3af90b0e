pub mod assembler;
pub mod config;
pub mod depth;
pub mod error;
pub mod grid;
pub mod supports;
pub mod tessellation;

pub use assembler::{CanopyAssembler, CanopyOutput};
pub use config::{ReseedPolicy, RunConfig, MAX_DIVISIONS, MAX_GENERATION};
pub use depth::{
	noise::{NoiseDepth, NoiseSettings},
	ConfiguredDepth, DepthMap, DepthSettings, WaveDepth,
};
pub use error::CanopyError;
pub use grid::{GridCell, PointGrid, SurfaceGridBuilder};
pub use supports::{
	branch::{Branch, BranchKind},
	builder::FractalSupportBuilder,
	SupportTree,
};
pub use tessellation::{reconstruct_surface, tessellate, CanopyMesh};

pub use kernel;
