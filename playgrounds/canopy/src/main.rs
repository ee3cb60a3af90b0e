use anyhow::Context;
use bevy::prelude::*;
use canopy::RunConfig;
use canopy_playground::CanopyPlugin;

fn main() -> anyhow::Result<()> {
	// Optional TOML run configuration as the first argument
	let config = match std::env::args().nth(1) {
		Some(path) => {
			let source = std::fs::read_to_string(&path)
				.with_context(|| format!("failed to read run configuration {}", path))?;
			RunConfig::from_toml_str(&source)
				.with_context(|| format!("invalid run configuration {}", path))?
		}
		None => RunConfig::default(),
	};

	println!("Starting canopy playground with seed: {}", config.seed);

	App::new()
		.add_plugins(DefaultPlugins.set(WindowPlugin {
			primary_window: Some(Window {
				title: "Canopy Playground".to_string(),
				resolution: (1280, 720).into(),
				..default()
			}),
			..default()
		}))
		.add_plugins(CanopyPlugin { config })
		.run();

	Ok(())
}
