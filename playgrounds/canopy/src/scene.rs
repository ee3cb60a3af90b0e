use bevy::prelude::*;
use canopy::{
	kernel::{MeshBuilder, ParametricSurface},
	CanopyAssembler, CanopyOutput, RunConfig,
};
use std::f32::consts::PI;

/// Samples per support curve when drawn.
const CURVE_SEGMENTS: usize = 12;

#[derive(Resource, Clone)]
pub struct CanopySettings(pub RunConfig);

/// What the last run produced, already in scene coordinates.
#[derive(Resource)]
pub struct CanopyScene {
	pub polylines: Vec<Vec<Vec3>>,
	pub supports: Vec<Vec<Vec3>>,
	pub show_polylines: bool,
	pub show_supports: bool,
}

/// Marks the spawned shell.
#[derive(Component)]
pub struct CanopyShell;

/// A barrel vault over a 40 x 30 footprint, rising 8 units at its crown.
pub fn vault_surface() -> ParametricSurface<impl Fn(f32, f32) -> Option<Vec3> + Send + Sync> {
	ParametricSurface::new(|u: f32, v: f32| {
		Some(Vec3::new(40.0 * u, 30.0 * v, 8.0 * (PI * u).sin() * (PI * v).sin()))
	})
}

/// Canopy geometry is Z-up; the scene is Y-up.
pub fn to_scene(point: Vec3) -> Vec3 {
	Vec3::new(point.x, point.z, -point.y)
}

fn scene_lines(output: &CanopyOutput) -> (Vec<Vec<Vec3>>, Vec<Vec<Vec3>>) {
	let polylines = output
		.row_polylines
		.iter()
		.chain(output.column_polylines.iter())
		.flatten()
		.map(|polyline| polyline.points().iter().copied().map(to_scene).collect())
		.collect();

	let supports = output
		.curves()
		.into_iter()
		.flatten()
		.map(|curve| curve.sample(CURVE_SEGMENTS).into_iter().map(to_scene).collect())
		.collect();

	(polylines, supports)
}

pub fn assemble_canopy(
	mut commands: Commands,
	mut meshes: ResMut<Assets<Mesh>>,
	mut materials: ResMut<Assets<StandardMaterial>>,
	settings: Res<CanopySettings>,
) {
	let output = match CanopyAssembler::new(settings.0.clone()).run(&vault_surface()) {
		Ok(output) => output,
		Err(err) => {
			log::error!("Canopy run failed: {}", err);
			return;
		}
	};

	match output.mesh.as_ref().ok().and_then(|shell| shell.build_mesh()) {
		Some(mesh) => {
			let material = materials.add(StandardMaterial {
				base_color: Color::srgb(0.89, 0.886, 0.604),
				double_sided: true,
				cull_mode: None,
				..default()
			});

			commands.spawn((
				Mesh3d(meshes.add(mesh)),
				MeshMaterial3d(material),
				Transform::from_rotation(Quat::from_rotation_x(-PI / 2.0)),
				CanopyShell,
			));
		}
		None => log::warn!("No canopy shell to display"),
	}

	let (polylines, supports) = scene_lines(&output);
	log::info!(
		"Canopy scene ready: {} polylines, {} support curves",
		polylines.len(),
		supports.len()
	);

	commands.insert_resource(CanopyScene {
		polylines,
		supports,
		show_polylines: true,
		show_supports: true,
	});
}

pub fn toggle_overlays(
	keyboard_input: Res<ButtonInput<KeyCode>>,
	scene: Option<ResMut<CanopyScene>>,
) {
	let Some(mut scene) = scene else {
		return;
	};

	if keyboard_input.just_pressed(KeyCode::KeyP) {
		scene.show_polylines = !scene.show_polylines;
	}
	if keyboard_input.just_pressed(KeyCode::KeyT) {
		scene.show_supports = !scene.show_supports;
	}
}

pub fn draw_overlays(mut gizmos: Gizmos, scene: Res<CanopyScene>) {
	if scene.show_polylines {
		for polyline in &scene.polylines {
			gizmos.linestrip(polyline.iter().copied(), Color::srgb(0.2, 0.3, 0.8));
		}
	}
	if scene.show_supports {
		for curve in &scene.supports {
			gizmos.linestrip(curve.iter().copied(), Color::srgb(0.45, 0.3, 0.15));
		}
	}
}
