use crate::{depth::DepthSettings, CanopyError};
use serde::{Deserialize, Serialize};

/// Highest accepted `max_generation`; branch count doubles with every generation.
pub const MAX_GENERATION: u32 = 12;

/// Highest accepted division count per axis; keeps every mesh index within `u32`.
pub const MAX_DIVISIONS: usize = 4096;

/// How the support-growth generator is seeded across start points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReseedPolicy {
	/// Seed once per run; every tree draws fresh values.
	#[default]
	PerRun,
	/// Reseed before every start point, so every tree replays the same draws.
	PerStartPoint,
}

/// Configuration fixed before a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
	/// Grid divisions along u; the grid has `u_divisions + 1` rows.
	pub u_divisions: usize,
	/// Grid divisions along v; the grid has `v_divisions + 1` columns.
	pub v_divisions: usize,
	pub seed: u64,
	pub max_generation: u32,
	/// Maximum branch deviation per generation, in degrees.
	pub angle: f32,
	/// Trunk length and first fork length.
	pub length: f32,
	/// Vertical lift applied to the flattened grid before meshing.
	pub delta_z: f32,
	/// Requested number of support trees; clamped to the available points.
	pub support_count: usize,
	pub reseed: ReseedPolicy,
	pub depth: DepthSettings,
}

impl Default for RunConfig {
	fn default() -> Self {
		Self {
			u_divisions: 10,
			v_divisions: 10,
			seed: 0,
			max_generation: 4,
			angle: 30.0,
			length: 5.0,
			delta_z: 10.0,
			support_count: 4,
			reseed: ReseedPolicy::PerRun,
			depth: DepthSettings::default(),
		}
	}
}

impl RunConfig {
	pub fn from_toml_str(source: &str) -> Result<Self, CanopyError> {
		let config: Self = toml::from_str(source)?;
		config.validate()?;
		Ok(config)
	}

	pub fn with_divisions(mut self, u_divisions: usize, v_divisions: usize) -> Self {
		self.u_divisions = u_divisions;
		self.v_divisions = v_divisions;
		self
	}

	pub fn with_seed(mut self, seed: u64) -> Self {
		self.seed = seed;
		self
	}

	pub fn with_max_generation(mut self, max_generation: u32) -> Self {
		self.max_generation = max_generation;
		self
	}

	pub fn with_angle(mut self, angle: f32) -> Self {
		self.angle = angle;
		self
	}

	pub fn with_length(mut self, length: f32) -> Self {
		self.length = length;
		self
	}

	pub fn with_delta_z(mut self, delta_z: f32) -> Self {
		self.delta_z = delta_z;
		self
	}

	pub fn with_support_count(mut self, support_count: usize) -> Self {
		self.support_count = support_count;
		self
	}

	pub fn with_reseed(mut self, reseed: ReseedPolicy) -> Self {
		self.reseed = reseed;
		self
	}

	pub fn with_depth(mut self, depth: DepthSettings) -> Self {
		self.depth = depth;
		self
	}

	/// Checks every field; a failure here aborts the run before any sampling.
	pub fn validate(&self) -> Result<(), CanopyError> {
		if self.u_divisions == 0 || self.v_divisions == 0 {
			return Err(CanopyError::InvalidConfiguration(format!(
				"grid divisions must be at least 1, got {} x {}",
				self.u_divisions, self.v_divisions
			)));
		}

		if self.u_divisions > MAX_DIVISIONS || self.v_divisions > MAX_DIVISIONS {
			return Err(CanopyError::InvalidConfiguration(format!(
				"grid divisions {} x {} exceed the limit of {}",
				self.u_divisions, self.v_divisions, MAX_DIVISIONS
			)));
		}

		if !(self.length.is_finite() && self.length > 0.0) {
			return Err(CanopyError::InvalidConfiguration(format!(
				"branch length must be positive, got {}",
				self.length
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

		if !self.delta_z.is_finite() {
			return Err(CanopyError::InvalidConfiguration("delta z must be finite".to_string()));
		}

		if !self.depth.is_finite() {
			return Err(CanopyError::InvalidConfiguration(
				"depth amplitude and frequency must be finite".to_string(),
			));
		}

		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::depth::{noise::NoiseSettings, WaveDepth};

	#[test]
	fn test_default_is_valid() {
		assert!(RunConfig::default().validate().is_ok());
	}

	#[test]
	fn test_rejects_zero_divisions() {
		let config = RunConfig::default().with_divisions(0, 4);
		assert!(matches!(config.validate(), Err(CanopyError::InvalidConfiguration(_))));

		let config = RunConfig::default().with_divisions(4, 0);
		assert!(matches!(config.validate(), Err(CanopyError::InvalidConfiguration(_))));
	}

	#[test]
	fn test_caps_divisions() {
		let config = RunConfig::default().with_divisions(MAX_DIVISIONS, MAX_DIVISIONS);
		assert!(config.validate().is_ok());

		let config = RunConfig::default().with_divisions(MAX_DIVISIONS + 1, 4);
		assert!(matches!(config.validate(), Err(CanopyError::InvalidConfiguration(_))));

		let config = RunConfig::default().with_divisions(4, usize::MAX);
		assert!(matches!(config.validate(), Err(CanopyError::InvalidConfiguration(_))));
	}

	#[test]
	fn test_rejects_bad_branch_parameters() {
		for config in [
			RunConfig::default().with_length(0.0),
			RunConfig::default().with_length(-1.0),
			RunConfig::default().with_length(f32::NAN),
			RunConfig::default().with_angle(-5.0),
			RunConfig::default().with_max_generation(MAX_GENERATION + 1),
			RunConfig::default().with_delta_z(f32::INFINITY),
		] {
			assert!(
				matches!(config.validate(), Err(CanopyError::InvalidConfiguration(_))),
				"{:?} should be rejected",
				config
			);
		}
	}

	#[test]
	fn test_accepts_edge_values() {
		let config = RunConfig::default()
			.with_divisions(1, 1)
			.with_angle(0.0)
			.with_max_generation(MAX_GENERATION)
			.with_support_count(0);
		assert!(config.validate().is_ok());
	}

	#[test]
	fn test_from_toml_partial() {
		let config = RunConfig::from_toml_str(
			r#"
			u_divisions = 6
			seed = 99
			reseed = "per_start_point"

			[depth]
			kind = "wave"
			amplitude = 0.5
			"#,
		)
		.unwrap();

		assert_eq!(config.u_divisions, 6);
		assert_eq!(config.v_divisions, 10);
		assert_eq!(config.seed, 99);
		assert_eq!(config.reseed, ReseedPolicy::PerStartPoint);
		assert_eq!(config.depth, DepthSettings::Wave(WaveDepth { amplitude: 0.5, frequency: 1.0 }));
	}

	#[test]
	fn test_from_toml_noise_depth() {
		let config = RunConfig::from_toml_str(
			r#"
			[depth]
			kind = "noise"
			seed = 12
			octaves = 5
			"#,
		)
		.unwrap();

		assert_eq!(
			config.depth,
			DepthSettings::Noise(NoiseSettings { seed: 12, octaves: 5, ..Default::default() })
		);

		assert!(matches!(
			RunConfig::from_toml_str("[depth]\nkind = \"noise\"\namplitude = inf"),
			Err(CanopyError::InvalidConfiguration(_))
		));
	}

	#[test]
	fn test_from_toml_invalid() {
		assert!(matches!(
			RunConfig::from_toml_str("length = -2.0"),
			Err(CanopyError::InvalidConfiguration(_))
		));
		assert!(matches!(
			RunConfig::from_toml_str("max_generation = -1"),
			Err(CanopyError::ConfigParse(_))
		));
	}
}
