//! # Thornwall Demo Runner
//!
//! Headless fixed-step run of the full pipeline: a column of shooters
//! defends against waves of walkers while the scheduler ticks movement,
//! firing, collision, damage, and culling in order. Pass a TOML config
//! path as the first argument to override the defaults; set `RUST_LOG`
//! to control verbosity.

use std::process::ExitCode;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use thornwall_core::{CollisionPipeline, SystemScheduler, World};
use thornwall_sim::spawn::{spawn_plant, spawn_sun, spawn_zombie};
use thornwall_sim::{
    priority, subscribe_hits, CullSystem, DamageSystem, FiringSpec, FiringSystem, MovementSystem,
    SimConfig, SimResult,
};

/// Simulated seconds per run.
const RUN_SECONDS: usize = 30;
/// Lanes are this far apart vertically.
const LANE_SPACING: f32 = 100.0;
/// Lanes in the demo field.
const LANES: usize = 5;

fn load_config() -> SimResult<SimConfig> {
    match std::env::args().nth(1) {
        Some(path) => {
            let text = std::fs::read_to_string(&path).map_err(|error| {
                thornwall_sim::SimError::InvalidConfig(format!("cannot read {path}: {error}"))
            })?;
            SimConfig::from_toml(&text)
        }
        None => Ok(SimConfig::default()),
    }
}

fn build_field(world: &mut World, config: &SimConfig, shooter_kind: u32) -> SimResult<()> {
    for lane in 0..LANES {
        #[allow(clippy::cast_precision_loss)]
        let y = LANE_SPACING / 2.0 + lane as f32 * LANE_SPACING;
        spawn_plant(world, 80.0, y, shooter_kind, 300.0)?;
        spawn_zombie(world, config.field_width - 40.0, y, 25.0, 100.0, 20.0)?;
        if lane % 2 == 0 {
            spawn_zombie(world, config.field_width + 40.0, y, 20.0, 150.0, 25.0)?;
        }
    }
    spawn_sun(world, config.field_width / 2.0, config.field_height, 25, 12.0)?;
    Ok(())
}

fn run() -> SimResult<()> {
    let config = load_config()?;
    info!(?config, "starting demo run");

    let mut firing = FiringSystem::new(LANE_SPACING / 2.0);
    let shooter_kind = firing.register_spec(FiringSpec {
        cooldown: 1.5,
        projectile_speed: 300.0,
        damage: 20.0,
        range: config.field_width,
    });

    let mut pipeline = CollisionPipeline::new(config.cell_size);
    let hits = subscribe_hits(&mut pipeline);

    let mut scheduler = SystemScheduler::new();
    scheduler.add_system(Box::new(MovementSystem::new()), priority::MOVEMENT);
    scheduler.add_system(Box::new(firing), priority::FIRING);
    scheduler.add_system(Box::new(pipeline), priority::COLLISION);
    scheduler.add_system(Box::new(DamageSystem::new(hits)), priority::DAMAGE);
    scheduler.add_system(Box::new(CullSystem::new(&config)), priority::CULL);

    let mut world = World::with_capacity(config.entity_capacity);
    build_field(&mut world, &config, shooter_kind)?;

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let ticks_per_second = (1.0 / config.fixed_dt).round().max(1.0) as usize;
    for second in 0..RUN_SECONDS {
        for _ in 0..ticks_per_second {
            scheduler.tick(&mut world, config.fixed_dt);
        }
        info!(second, alive = world.alive_count(), "tick summary");
    }

    info!(alive = world.alive_count(), "demo run complete");
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            error!(%error, "demo run failed");
            ExitCode::FAILURE
        }
    }
}
