use bevy::prelude::*;
use std::f32::consts::PI;

mod camera;
pub mod scene;

use canopy::RunConfig;

pub use camera::OrbitController;

pub use canopy;

pub struct CanopyPlugin {
	pub config: RunConfig,
}

impl Plugin for CanopyPlugin {
	fn build(&self, app: &mut App) {
		app.insert_resource(ClearColor(Color::hsla(201.0, 0.69, 0.62, 1.0)))
			.insert_resource(scene::CanopySettings(self.config.clone()))
			.add_systems(
				Startup,
				(camera::setup_camera, setup_lighting, scene::assemble_canopy),
			)
			.add_systems(
				Update,
				(
					camera::orbit_controller,
					scene::toggle_overlays,
					scene::draw_overlays.run_if(resource_exists::<scene::CanopyScene>),
				),
			);
	}
}

fn setup_lighting(mut commands: Commands) {
	// The shell is viewed from below as often as from above
	commands.insert_resource(AmbientLight {
		color: Color::WHITE,
		brightness: 2.0,
		affects_lightmapped_meshes: true,
	});

	commands.spawn((
		DirectionalLight { illuminance: 10000.0, shadows_enabled: true, ..default() },
		Transform::from_rotation(Quat::from_euler(EulerRot::XYZ, -PI / 4.0, PI / 4.0, 0.0)),
	));

	// fill from below
	commands.spawn((
		DirectionalLight { illuminance: 1500.0, shadows_enabled: false, ..default() },
		Transform::from_rotation(Quat::from_euler(EulerRot::XYZ, PI / 2.0, 0.0, 0.0)),
	));
}
