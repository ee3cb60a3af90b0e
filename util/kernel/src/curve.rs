use crate::KernelError;
use bevy::prelude::*;

/// A smooth curve defined by its control polygon.
///
/// The curve is the Bézier curve of the control points, so it starts at the first
/// point, ends at the last, and is pulled toward the ones in between.
#[derive(Debug, Clone, PartialEq)]
pub struct Curve {
	control_points: Vec<Vec3>,
}

impl Curve {
	pub fn control_points(&self) -> &[Vec3] {
		&self.control_points
	}

	pub fn start(&self) -> Vec3 {
		self.control_points[0]
	}

	pub fn end(&self) -> Vec3 {
		self.control_points[self.control_points.len() - 1]
	}

	pub fn degree(&self) -> usize {
		self.control_points.len() - 1
	}

	/// Evaluates the curve at `t` in `[0, 1]` (de Casteljau).
	pub fn point_at(&self, t: f32) -> Vec3 {
		let t = t.clamp(0.0, 1.0);
		let mut points = self.control_points.clone();
		for level in (1..points.len()).rev() {
			for i in 0..level {
				points[i] = points[i].lerp(points[i + 1], t);
			}
		}
		points[0]
	}

	/// Samples `segments + 1` evenly spaced parameters, endpoints included.
	pub fn sample(&self, segments: usize) -> Vec<Vec3> {
		let segments = segments.max(1);
		(0..=segments).map(|i| self.point_at(i as f32 / segments as f32)).collect()
	}
}

/// An ordered sequence of points joined by straight segments.
#[derive(Debug, Clone, PartialEq)]
pub struct Polyline {
	points: Vec<Vec3>,
}

impl Polyline {
	pub fn points(&self) -> &[Vec3] {
		&self.points
	}

	pub fn length(&self) -> f32 {
		self.points.windows(2).map(|pair| pair[0].distance(pair[1])).sum()
	}
}

/// Builds a curve from an ordered control polygon.
pub fn make_curve(control_points: Vec<Vec3>) -> Result<Curve, KernelError> {
	if control_points.len() < 2 {
		return Err(KernelError::TooFewPoints { required: 2, found: control_points.len() });
	}

	let first = control_points[0];
	if control_points.iter().all(|point| point.abs_diff_eq(first, f32::EPSILON)) {
		return Err(KernelError::CoincidentPoints);
	}

	Ok(Curve { control_points })
}

pub fn make_polyline(points: Vec<Vec3>) -> Result<Polyline, KernelError> {
	if points.len() < 2 {
		return Err(KernelError::TooFewPoints { required: 2, found: points.len() });
	}

	Ok(Polyline { points })
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_curve_endpoints() {
		let curve = make_curve(vec![
			Vec3::ZERO,
			Vec3::new(0.0, 0.0, 1.0),
			Vec3::new(2.0, 0.0, 1.0),
			Vec3::new(2.0, 0.0, 2.0),
		])
		.unwrap();

		assert_eq!(curve.degree(), 3);
		assert_eq!(curve.point_at(0.0), curve.start());
		assert!(curve.point_at(1.0).abs_diff_eq(curve.end(), 1e-6));

		// symmetric control polygon puts the midpoint halfway
		assert!(curve.point_at(0.5).abs_diff_eq(Vec3::new(1.0, 0.0, 1.0), 1e-6));
	}

	#[test]
	fn test_curve_sample_count() {
		let curve = make_curve(vec![Vec3::ZERO, Vec3::X]).unwrap();
		let samples = curve.sample(8);
		assert_eq!(samples.len(), 9);
		assert!(samples[4].abs_diff_eq(Vec3::new(0.5, 0.0, 0.0), 1e-6));
	}

	#[test]
	fn test_curve_rejects_degenerate_input() {
		assert_eq!(
			make_curve(vec![Vec3::ONE]),
			Err(KernelError::TooFewPoints { required: 2, found: 1 })
		);
		assert_eq!(make_curve(vec![Vec3::ONE; 4]), Err(KernelError::CoincidentPoints));
	}

	#[test]
	fn test_polyline_length() {
		let polyline =
			make_polyline(vec![Vec3::ZERO, Vec3::new(3.0, 0.0, 0.0), Vec3::new(3.0, 4.0, 0.0)])
				.unwrap();
		assert_eq!(polyline.points().len(), 3);
		assert!((polyline.length() - 7.0).abs() < 1e-6);

		assert!(make_polyline(vec![]).is_err());
	}
}
