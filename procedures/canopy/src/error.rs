use kernel::KernelError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CanopyError {
	/// Rejected before any geometry is produced.
	#[error("invalid configuration: {0}")]
	InvalidConfiguration(String),

	#[error("grid point at row {row}, column {col} is absent")]
	AbsentPoint { row: usize, col: usize },

	#[error("mesh vertex {index} is absent")]
	AbsentVertex { index: usize },

	#[error("degenerate geometry: {0}")]
	DegenerateGeometry(String),

	#[error(transparent)]
	Kernel(#[from] KernelError),

	#[error("failed to parse configuration: {0}")]
	ConfigParse(#[from] toml::de::Error),
}
