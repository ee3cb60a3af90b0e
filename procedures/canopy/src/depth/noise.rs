use super::DepthMap;
use noise::{NoiseFn, Perlin};
use serde::{Deserialize, Serialize};

/// Tunables for fractal noise displacement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoiseSettings {
	pub seed: u32,
	/// Peak displacement of the first octave.
	pub amplitude: f32,
	/// Base frequency in cycles per unit of parameter.
	pub frequency: f32,
	/// Layers summed; each doubles the frequency and halves the amplitude.
	pub octaves: u32,
}

impl Default for NoiseSettings {
	fn default() -> Self {
		Self { seed: 0, amplitude: 2.0, frequency: 2.0, octaves: 3 }
	}
}

impl NoiseSettings {
	pub(crate) fn is_finite(&self) -> bool {
		self.amplitude.is_finite() && self.frequency.is_finite()
	}
}

/// Fractal gradient noise over `(u, v)`, bounded by twice the first-octave amplitude.
#[derive(Debug, Clone)]
pub struct NoiseDepth<N: NoiseFn<f64, 2> = Perlin> {
	noise: N,
	settings: NoiseSettings,
}

impl NoiseDepth<Perlin> {
	pub fn perlin(settings: NoiseSettings) -> Self {
		Self::new(Perlin::new(settings.seed), settings)
	}
}

impl<N: NoiseFn<f64, 2>> NoiseDepth<N> {
	/// Uses `noise` as the source; the seed in `settings` is not applied to it.
	pub fn new(noise: N, settings: NoiseSettings) -> Self {
		Self { noise, settings }
	}

	pub fn settings(&self) -> &NoiseSettings {
		&self.settings
	}

	fn fractal(&self, u: f32, v: f32) -> f64 {
		let (u, v) = (f64::from(u), f64::from(v));
		let mut frequency = f64::from(self.settings.frequency);
		let mut amplitude = f64::from(self.settings.amplitude);
		let mut total = 0.0;
		for _ in 0..self.settings.octaves.max(1) {
			total += self.noise.get([u * frequency, v * frequency]) * amplitude;
			frequency *= 2.0;
			amplitude *= 0.5;
		}
		total
	}
}

impl<N: NoiseFn<f64, 2> + Send + Sync> DepthMap for NoiseDepth<N> {
	fn depth(&self, u: f32, v: f32) -> f32 {
		self.fractal(u, v) as f32
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_noise_depth_is_deterministic() {
		let settings = NoiseSettings { seed: 7, frequency: 3.0, ..Default::default() };
		let first = NoiseDepth::perlin(settings);
		let second = NoiseDepth::perlin(settings);
		for (u, v) in [(0.1, 0.2), (0.33, 0.9), (0.7, 0.05)] {
			assert_eq!(first.depth(u, v), second.depth(u, v));
		}
	}

	#[test]
	fn test_noise_depth_seed_matters() {
		let first = NoiseDepth::perlin(NoiseSettings { seed: 1, ..Default::default() });
		let second = NoiseDepth::perlin(NoiseSettings { seed: 2, ..Default::default() });
		let differs = (0..20)
			.map(|i| (i as f32 * 0.13 + 0.05, i as f32 * 0.07 + 0.11))
			.any(|(u, v)| first.depth(u, v) != second.depth(u, v));
		assert!(differs);
	}

	#[test]
	fn test_noise_depth_bounded_by_amplitude() {
		// octave amplitudes sum to less than 2 · amplitude
		let settings = NoiseSettings { amplitude: 0.5, octaves: 4, ..Default::default() };
		let depth = NoiseDepth::perlin(settings);
		for i in 0..50 {
			let u = i as f32 * 0.037;
			let v = i as f32 * 0.051;
			assert!(depth.depth(u, v).abs() <= 1.0 + 1e-4);
		}
	}

	#[test]
	fn test_custom_noise_source() {
		let depth = NoiseDepth::new(noise::Constant::new(0.5), NoiseSettings {
			amplitude: 2.0,
			octaves: 2,
			..Default::default()
		});
		// 0.5 · 2 + 0.5 · 1
		assert!((depth.depth(0.3, 0.8) - 1.5).abs() < 1e-6);
	}
}
