use bevy::prelude::*;
use std::f32::consts::PI;

/// Orbits the camera around a fixed focus point.
#[derive(Component)]
pub struct OrbitController {
	pub focus: Vec3,
	pub radius: f32,
	pub yaw: f32,
	pub pitch: f32,
	pub sensitivity: f32,
	/// Radius change per second while zooming.
	pub zoom_speed: f32,
}

impl OrbitController {
	fn transform(&self) -> Transform {
		let rotation = Quat::from_axis_angle(Vec3::Y, self.yaw) * Quat::from_axis_angle(Vec3::X, -self.pitch);
		let position = self.focus + rotation * Vec3::Z * self.radius;
		Transform::from_translation(position).looking_at(self.focus, Vec3::Y)
	}
}

pub fn setup_camera(mut commands: Commands) {
	// roughly the middle of the default vault, lifted to the shell
	let controller = OrbitController {
		focus: Vec3::new(20.0, 12.0, -15.0),
		radius: 80.0,
		yaw: PI / 6.0,
		pitch: PI / 8.0,
		sensitivity: 0.005,
		zoom_speed: 40.0,
	};
	let transform = controller.transform();

	log::info!("Setting up camera at {:?}, orbiting {:?}", transform.translation, controller.focus);

	commands.spawn((
		Camera3d::default(),
		transform,
		Projection::Perspective(PerspectiveProjection { near: 0.1, far: 2000.0, ..default() }),
		controller,
	));
}

pub fn orbit_controller(
	keyboard_input: Res<ButtonInput<KeyCode>>,
	mouse_buttons: Res<ButtonInput<MouseButton>>,
	mut mouse_motion: MessageReader<bevy::input::mouse::MouseMotion>,
	time: Res<Time>,
	mut query: Query<(&mut Transform, &mut OrbitController), With<Camera3d>>,
) {
	let Ok((mut transform, mut controller)) = query.single_mut() else {
		return;
	};

	let mut mouse_delta = Vec2::ZERO;
	for event in mouse_motion.read() {
		mouse_delta += event.delta;
	}

	// only drag with the left button held
	if mouse_buttons.pressed(MouseButton::Left) {
		controller.yaw -= mouse_delta.x * controller.sensitivity;
		controller.pitch += mouse_delta.y * controller.sensitivity;
		controller.pitch = controller.pitch.clamp(-PI / 2.0 + 0.1, PI / 2.0 - 0.1);
	}

	let mut zoom = 0.0;
	if keyboard_input.pressed(KeyCode::KeyW) {
		zoom -= 1.0;
	}
	if keyboard_input.pressed(KeyCode::KeyS) {
		zoom += 1.0;
	}
	controller.radius =
		(controller.radius + zoom * controller.zoom_speed * time.delta_secs()).max(1.0);

	*transform = controller.transform();
}
