use crate::scene::{OUT_OF_BOUNDS, PROJECTILES, VISIBLE};
use clap::Parser;
use elysion_ecs::{EcsConfig, EntityManager};
use elysion_utils::{ok, AnyResult, AnyhowResultExt};
use log::*;
use std::fs;

pub mod cli;
pub mod scene;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

fn main() -> AnyResult {
    let args = cli::Args::parse();

    pretty_env_logger::formatted_builder()
        .format_indent(None)
        .format_timestamp(None)
        .filter_level(match args.verbose {
            true => LevelFilter::Trace,
            false => LevelFilter::Info,
        })
        .init();

    info!("Welcome to Elysion {VERSION}");

    let config = match &args.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .otherwise(format!("couldn't read config file `{}`", path.display()))?;
            EcsConfig::from_toml_str(&text)
                .otherwise(format!("couldn't parse config file `{}`", path.display()))?
        }
        None => EcsConfig::default(),
    };

    let mut manager = EntityManager::with_config(config);
    let turret = scene::spawn_turret(&mut manager)?;

    let mut purged = 0;
    for frame in 0..args.frames {
        scene::fire(&mut manager, turret, args.spawn)?;

        manager.update(args.dt);
        manager.draw();
        purged += manager.refresh().purged;

        if frame % 30 == 0 {
            info!(
                "Frame {frame}: {} entities, {} visible, {} projectiles, {} out of bounds",
                manager.len(),
                manager.get_entities_by_group(scene::group(VISIBLE)).len(),
                manager.get_entities_by_group(scene::group(PROJECTILES)).len(),
                manager.get_entities_by_group(scene::group(OUT_OF_BOUNDS)).len(),
            );
        }
    }

    info!(
        "Simulated {} frames, {} entities remain, {purged} were purged",
        args.frames,
        manager.len()
    );

    ok()
}
