//! Arcade Sim headless runner
//!
//! Drives a scripted session without any window: frames arrive at uneven
//! intervals, a simple autopilot steers toward the nearest stone and fires,
//! and a scene mirror is kept in sync the way a renderer would.
//!
//! Usage: `arcade-sim [tuning.json]`

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use arcade_sim::consts::TICKS_PER_SECOND;
use arcade_sim::scene::{SceneMirror, hearts};
use arcade_sim::sim::{GameState, SimEvent, Viewport};
use arcade_sim::{KeyCode, SimError, Tuning};

const SEED: u64 = 0x5eed_cafe;
const SIM_SECONDS: u64 = 60;
const VIEWPORT_WIDTH: f32 = 480.0;
const VIEWPORT_HEIGHT: f32 = 320.0;
/// Ticks between autopilot shots
const FIRE_INTERVAL: u64 = 20;

#[derive(Debug, Default)]
struct Tally {
    stones: u32,
    bombs: u32,
    hits: u32,
    losses: u32,
    resets: u32,
}

impl Tally {
    fn record(&mut self, event: &SimEvent) {
        match event {
            SimEvent::StoneSpawned { .. } => self.stones += 1,
            SimEvent::BombFired { .. } => self.bombs += 1,
            SimEvent::Collision { .. } => self.hits += 1,
            SimEvent::SessionLost { tick } => {
                self.losses += 1;
                log::info!("Lost at tick {}", tick);
            }
            SimEvent::SessionReset { .. } => self.resets += 1,
            _ => {}
        }
    }
}

/// Steer toward the closest stone that is still falling; stop when level
fn autopilot(state: &mut GameState, now: u64, last_shot: &mut u64) {
    let target = state
        .stones()
        .iter()
        .filter(|(_, stone)| !stone.hit)
        .min_by(|(_, a), (_, b)| {
            a.pos
                .x
                .partial_cmp(&b.pos.x)
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .map(|(_, stone)| stone.pos.y);

    let rocket_y = state.rocket().y;
    match target {
        Some(y) if (y - rocket_y).abs() > 4.0 => {
            let key = if y < rocket_y { KeyCode::Up } else { KeyCode::Down };
            state.handle_key(key, false);
            state.handle_key(key, true);
        }
        _ => state.handle_key(KeyCode::Up, false),
    }

    if target.is_some() && now.saturating_sub(*last_shot) >= FIRE_INTERVAL {
        state.handle_key(KeyCode::Space, true);
        *last_shot = now;
    }
}

fn run(tuning: Tuning) -> Result<(), SimError> {
    let viewport = Viewport::new(VIEWPORT_WIDTH, VIEWPORT_HEIGHT)?;
    let mut state = GameState::new(viewport, tuning, SEED)?;
    let mut scene = SceneMirror::new();
    let mut frames = Pcg32::seed_from_u64(SEED ^ 0xf00d);
    let mut tally = Tally::default();
    let mut last_shot = 0;

    let end = SIM_SECONDS * TICKS_PER_SECOND;
    let mut now = 0;
    while now < end {
        // Uneven frame pacing: 1 to 4 ticks per frame
        now = (now + frames.random_range(1..=4)).min(end);
        autopilot(&mut state, now, &mut last_shot);
        state.update(now)?;

        for event in state.drain_events() {
            tally.record(&event);
            scene.apply([event]);
        }
        scene.sync(&state);

        if !scene.matches(&state) {
            log::warn!("Scene out of sync at tick {}", now);
        }
    }

    let session = state.session();
    let heart_row: String = hearts(session.hit_points, state.tuning().max_hit_points)
        .iter()
        .map(|heart| if heart.full { '♥' } else { '·' })
        .collect();
    let (created, destroyed) = scene.churn();
    log::info!(
        "Simulated {} ticks: {} stones, {} bombs, {} hits, {} losses, {} resets",
        state.last_tick(),
        tally.stones,
        tally.bombs,
        tally.hits,
        tally.losses,
        tally.resets
    );
    log::info!(
        "Hearts {} | scene nodes {} (created {}, destroyed {})",
        heart_row,
        scene.len(),
        created,
        destroyed
    );

    println!("{}", serde_json::to_string_pretty(&state.snapshot())?);
    Ok(())
}

fn main() {
    env_logger::init();
    log::info!("Arcade Sim (headless) starting...");

    let tuning = match std::env::args().nth(1) {
        Some(path) => Tuning::load(&path),
        None => Ok(Tuning::default()),
    };

    if let Err(err) = tuning.and_then(run) {
        log::error!("{}", err);
        eprintln!("arcade-sim: {err}");
        std::process::exit(1);
    }
}
