use crate::KernelError;
use bevy::asset::RenderAssetUsages;
use bevy::mesh::{Indices, PrimitiveTopology};
use bevy::prelude::*;

/// Three indices into a vertex list, wound counter-clockwise when seen from the front.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TriangleFace(pub [u32; 3]);

impl TriangleFace {
	pub fn new(a: u32, b: u32, c: u32) -> Self {
		Self([a, b, c])
	}

	pub fn indices(&self) -> [u32; 3] {
		self.0
	}
}

pub trait MeshBuilder {
	/// Builds a renderable mesh, or `None` when there is nothing to render.
	fn build_mesh(&self) -> Option<Mesh>;
}

/// Validated vertex and face lists.
#[derive(Debug, Clone, PartialEq)]
pub struct TriangleMesh {
	vertices: Vec<Vec3>,
	faces: Vec<TriangleFace>,
}

impl TriangleMesh {
	pub fn vertices(&self) -> &[Vec3] {
		&self.vertices
	}

	pub fn faces(&self) -> &[TriangleFace] {
		&self.faces
	}

	/// Area-weighted vertex normals.
	pub fn vertex_normals(&self) -> Vec<Vec3> {
		let mut normals = vec![Vec3::ZERO; self.vertices.len()];
		for face in &self.faces {
			let [a, b, c] = face.indices().map(|index| index as usize);
			let weighted = (self.vertices[b] - self.vertices[a])
				.cross(self.vertices[c] - self.vertices[a]);
			normals[a] += weighted;
			normals[b] += weighted;
			normals[c] += weighted;
		}

		normals.into_iter().map(|normal| normal.try_normalize().unwrap_or(Vec3::Z)).collect()
	}
}

/// Builds a triangle mesh, checking that every face index refers to a vertex.
pub fn make_mesh(vertices: Vec<Vec3>, faces: Vec<TriangleFace>) -> Result<TriangleMesh, KernelError> {
	for (face_index, face) in faces.iter().enumerate() {
		if let Some(&index) = face.0.iter().find(|&&index| index as usize >= vertices.len()) {
			return Err(KernelError::FaceIndexOutOfRange {
				face: face_index,
				index,
				vertex_count: vertices.len(),
			});
		}
	}

	Ok(TriangleMesh { vertices, faces })
}

impl MeshBuilder for TriangleMesh {
	fn build_mesh(&self) -> Option<Mesh> {
		if self.faces.is_empty() {
			return None;
		}

		let positions: Vec<[f32; 3]> = self.vertices.iter().map(|v| v.to_array()).collect();
		let normals: Vec<[f32; 3]> = self.vertex_normals().iter().map(|n| n.to_array()).collect();
		let indices: Vec<u32> = self.faces.iter().flat_map(|face| face.indices()).collect();

		let mut mesh = Mesh::new(PrimitiveTopology::TriangleList, RenderAssetUsages::default());
		mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, positions);
		mesh.insert_attribute(Mesh::ATTRIBUTE_NORMAL, normals);
		mesh.insert_indices(Indices::U32(indices));

		log::debug!("Built mesh with {} vertices and {} faces", self.vertices.len(), self.faces.len());
		Some(mesh)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn unit_square() -> Vec<Vec3> {
		vec![Vec3::ZERO, Vec3::X, Vec3::Y, Vec3::new(1.0, 1.0, 0.0)]
	}

	#[test]
	fn test_make_mesh_rejects_out_of_range() {
		let result = make_mesh(unit_square(), vec![TriangleFace::new(0, 1, 2), TriangleFace::new(1, 2, 4)]);
		assert_eq!(
			result,
			Err(KernelError::FaceIndexOutOfRange { face: 1, index: 4, vertex_count: 4 })
		);
	}

	#[test]
	fn test_vertex_normals_point_up() {
		let mesh = make_mesh(unit_square(), vec![TriangleFace::new(0, 1, 2)]).unwrap();
		let normals = mesh.vertex_normals();
		assert!(normals[0].abs_diff_eq(Vec3::Z, 1e-6));
		// unreferenced vertex falls back to +Z
		assert_eq!(normals[3], Vec3::Z);
	}

	#[test]
	fn test_build_mesh_attributes() {
		let mesh = make_mesh(unit_square(), vec![TriangleFace::new(0, 1, 2), TriangleFace::new(1, 3, 2)])
			.unwrap();
		let built = mesh.build_mesh().unwrap();

		assert_eq!(built.count_vertices(), 4);
		assert_eq!(built.indices().map(|indices| indices.len()), Some(6));
		assert!(built.attribute(Mesh::ATTRIBUTE_NORMAL).is_some());
	}

	#[test]
	fn test_build_empty_mesh() {
		let mesh = make_mesh(unit_square(), vec![]).unwrap();
		assert!(mesh.build_mesh().is_none());
	}
}
