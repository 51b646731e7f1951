use clap::Parser;
use std::path::PathBuf;

use wildwood::config::GameConfig;
use wildwood::creature::Species;
use wildwood::input::InputState;
use wildwood::simulation::{GameEvent, Simulation};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to a RON config file (defaults are used when omitted)
    #[arg(long)]
    config: Option<PathBuf>,

    /// World generation seed (overrides the config file)
    #[arg(long)]
    seed: Option<u64>,

    /// Seconds of simulated time to run
    #[arg(long, default_value_t = 60.0)]
    duration: f64,

    /// Simulation ticks per second
    #[arg(long, default_value_t = 60u32)]
    tick_rate: u32,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.world.seed = seed;
    }

    log::info!("Starting Wildwood (seed {})", config.world.seed);
    run(&config, args.duration, args.tick_rate);
    Ok(())
}

/// Headless demo: sprint into the world firing ahead, and report what
/// the simulation does. Stands in for a windowed host.
fn run(config: &GameConfig, duration: f64, tick_rate: u32) {
    let mut simulation = Simulation::new(config);
    let dt = 1.0 / tick_rate as f32;
    let ticks = (duration * tick_rate as f64) as u64;
    let mut kills: Vec<(Species, u32)> = Vec::new();

    for tick in 0..ticks {
        let mut input = InputState {
            forward: true,
            sprint: tick % 1200 < 600,
            ..Default::default()
        };
        // Squeeze the trigger twice a second, reload on empty
        input.fire = tick % 30 == 0;
        input.reload = simulation.player.ammo.is_empty();

        simulation.tick(&input, dt);

        for event in simulation.events.drain() {
            match event {
                GameEvent::CreatureKilled {
                    species,
                    food,
                    gold,
                    ..
                } => {
                    log::info!("killed a {species} (+{food} food, +{gold} gold)");
                    match kills.iter_mut().find(|(s, _)| *s == species) {
                        Some((_, count)) => *count += 1,
                        None => kills.push((species, 1)),
                    }
                }
                GameEvent::PlayerDamaged { amount, source } => {
                    log::info!("took {amount} damage from {source:?}")
                }
                GameEvent::PlayerDied {
                    source,
                    survival_time,
                } => {
                    log::warn!("player died ({source:?}) after {survival_time:.1}s, respawning");
                }
                GameEvent::GoldMeterFilled { level } => {
                    log::info!("gold meter full at level {level}")
                }
                _ => log::debug!("{event:?}"),
            }
        }

        if simulation.player.is_dead() {
            simulation.respawn_player();
        }
    }

    let player = &simulation.player;
    log::info!(
        "Done after {:.1}s: health {:.0}/{:.0}, hunger {:.0}/{:.0}, gold {}/{}, level {}",
        simulation.time(),
        player.health.current(),
        player.health.max(),
        player.hunger.current(),
        player.hunger.max(),
        simulation.economy.gold(),
        simulation.economy.max_gold(),
        simulation.economy.level(),
    );
    for (species, count) in &kills {
        log::info!("  {species} kills: {count}");
    }
}
