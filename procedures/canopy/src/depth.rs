pub mod noise;

use self::noise::{NoiseDepth, NoiseSettings};
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

/// A scalar displacement field over surface parameter space.
///
/// Depth is a function of `(u, v)` only, never of the evaluated 3D position.
pub trait DepthMap: Send + Sync {
	fn depth(&self, u: f32, v: f32) -> f32;
}

impl<F> DepthMap for F
where
	F: Fn(f32, f32) -> f32 + Send + Sync,
{
	fn depth(&self, u: f32, v: f32) -> f32 {
		self(u, v)
	}
}

/// Standing-wave displacement: `amplitude · sin(2π·f·u) · cos(2π·f·v)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaveDepth {
	pub amplitude: f32,
	/// Full periods per unit of parameter.
	pub frequency: f32,
}

impl Default for WaveDepth {
	fn default() -> Self {
		Self { amplitude: 2.0, frequency: 1.0 }
	}
}

impl WaveDepth {
	pub fn with_amplitude(mut self, amplitude: f32) -> Self {
		self.amplitude = amplitude;
		self
	}

	pub fn with_frequency(mut self, frequency: f32) -> Self {
		self.frequency = frequency;
		self
	}
}

impl DepthMap for WaveDepth {
	fn depth(&self, u: f32, v: f32) -> f32 {
		self.amplitude * (TAU * self.frequency * u).sin() * (TAU * self.frequency * v).cos()
	}
}

/// Depth strategy named in a run configuration.
///
/// In TOML the `kind` key selects the variant, e.g. `[depth]` with `kind = "noise"`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DepthSettings {
	Wave(WaveDepth),
	Noise(NoiseSettings),
}

impl Default for DepthSettings {
	fn default() -> Self {
		DepthSettings::Wave(WaveDepth::default())
	}
}

impl DepthSettings {
	pub fn is_finite(&self) -> bool {
		match self {
			DepthSettings::Wave(wave) => wave.amplitude.is_finite() && wave.frequency.is_finite(),
			DepthSettings::Noise(settings) => settings.is_finite(),
		}
	}

	pub fn build(&self) -> ConfiguredDepth {
		match *self {
			DepthSettings::Wave(wave) => ConfiguredDepth::Wave(wave),
			DepthSettings::Noise(settings) => ConfiguredDepth::Noise(NoiseDepth::perlin(settings)),
		}
	}
}

/// A depth map built from [`DepthSettings`].
#[derive(Debug, Clone)]
pub enum ConfiguredDepth {
	Wave(WaveDepth),
	Noise(NoiseDepth),
}

impl DepthMap for ConfiguredDepth {
	fn depth(&self, u: f32, v: f32) -> f32 {
		match self {
			ConfiguredDepth::Wave(wave) => wave.depth(u, v),
			ConfiguredDepth::Noise(noise) => noise.depth(u, v),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_wave_vanishes_on_integers() {
		let wave = WaveDepth::default();
		for (u, v) in [(0.0, 0.0), (1.0, 0.0), (0.0, 1.0), (2.0, 3.0)] {
			assert!(wave.depth(u, v).abs() < 1e-5, "depth({u}, {v}) = {}", wave.depth(u, v));
		}
	}

	#[test]
	fn test_wave_peaks() {
		let wave = WaveDepth::default();
		assert!((wave.depth(0.25, 0.0) - 2.0).abs() < 1e-5);
		assert!((wave.depth(0.75, 0.0) + 2.0).abs() < 1e-5);
		assert!(wave.depth(0.25, 0.25).abs() < 1e-5);
		assert!((wave.depth(0.25, 0.5) + 2.0).abs() < 1e-5);
	}

	#[test]
	fn test_wave_tunable() {
		let wave = WaveDepth::default().with_amplitude(0.5).with_frequency(2.0);
		assert!((wave.depth(0.125, 0.0) - 0.5).abs() < 1e-5);
		assert!(wave.depth(0.25, 0.0).abs() < 1e-5);
	}

	#[test]
	fn test_closure_depth_map() {
		let ramp = |u: f32, v: f32| u + 2.0 * v;
		assert_eq!(ramp.depth(1.0, 1.0), 3.0);
	}

	#[test]
	fn test_settings_build_matching_depth() {
		let wave = WaveDepth::default().with_amplitude(3.0);
		let built = DepthSettings::Wave(wave).build();
		assert_eq!(built.depth(0.25, 0.0), wave.depth(0.25, 0.0));

		let settings = NoiseSettings { seed: 5, ..Default::default() };
		let built = DepthSettings::Noise(settings).build();
		assert_eq!(built.depth(0.4, 0.6), NoiseDepth::perlin(settings).depth(0.4, 0.6));
	}

	#[test]
	fn test_settings_finite() {
		assert!(DepthSettings::default().is_finite());
		assert!(!DepthSettings::Wave(WaveDepth::default().with_frequency(f32::NAN)).is_finite());
		let settings = NoiseSettings { amplitude: f32::INFINITY, ..Default::default() };
		assert!(!DepthSettings::Noise(settings).is_finite());
	}
}
