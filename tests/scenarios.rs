use arcade_sim::consts::GAME_LAUNCH_TIME;
use arcade_sim::sim::{GameState, RemovalReason, SessionPhase, SimEvent, Viewport};
use arcade_sim::Tuning;
use glam::Vec2;

const WIDTH: f32 = 480.0;
const HEIGHT: f32 = 320.0;

fn new_state() -> GameState {
    let viewport = Viewport::new(WIDTH, HEIGHT).unwrap();
    GameState::new(viewport, Tuning::default(), 2024).unwrap()
}

#[test]
fn grace_period_then_forced_spawn() {
    let mut state = new_state();
    assert_eq!(state.session().hit_points, 5);

    state.update(GAME_LAUNCH_TIME - 1).unwrap();
    assert!(state.stones().is_empty(), "nothing spawns during the grace period");

    state.schedule_stone(GAME_LAUNCH_TIME);
    state.update(GAME_LAUNCH_TIME).unwrap();

    assert_eq!(state.stones().len(), 1);
    let (_, stone) = state.stones().iter().next().unwrap();
    assert_eq!(stone.pos.x, WIDTH);
    assert!(!stone.hit);
}

#[test]
fn bomb_meets_stone_and_leaves_one_crash() {
    let mut state = new_state();
    state.place_rocket(50.0);
    let bomb = state.fire_bomb().expect("bomb fires while playing");
    let stone = state.insert_stone(Vec2::new(80.0, 50.0));
    assert_eq!(state.bombs().get(bomb).unwrap().pos, Vec2::new(45.0, 50.0));

    // Gap closes by two per tick; contact on tick 8
    state.update(7).unwrap();
    assert!(!state.bombs().get(bomb).unwrap().hit);
    assert!(state.crashes().is_empty());

    state.update(8).unwrap();
    let hit_bomb = state.bombs().get(bomb).unwrap();
    assert!(hit_bomb.hit);
    assert_eq!(hit_bomb.pos, Vec2::new(53.0, 50.0));
    assert!(state.stones().get(stone).unwrap().hit);

    let crash = state.crashes().get(bomb).expect("crash keyed like its bomb");
    assert_eq!(crash.pos, Vec2::new(48.0, 68.0));
    assert_eq!(crash.created_at, 8);

    let events: Vec<_> = state.drain_events().collect();
    assert!(events.contains(&SimEvent::Collision { bomb, stone }));

    // The bomb is consumed next tick; the stone tumbles instead of drifting
    state.update(9).unwrap();
    assert!(state.bombs().get(bomb).is_none());
    assert_eq!(
        state.stones().get(stone).unwrap().pos,
        Vec2::new(72.5, 51.5)
    );
    assert!(state.drain_events().any(|e| e
        == SimEvent::BombRemoved {
            id: bomb,
            reason: RemovalReason::Detonated
        }));

    // Crash lives through tick 8 + 15 and is gone on the next one
    for now in 10..=23 {
        state.update(now).unwrap();
        assert_eq!(state.crashes().len(), 1, "crash missing at tick {now}");
    }
    state.update(24).unwrap();
    assert!(state.crashes().is_empty());

    let crashes_spawned = state
        .drain_events()
        .filter(|e| matches!(e, SimEvent::CrashSpawned { .. }))
        .count();
    assert_eq!(crashes_spawned, 0, "no second crash for the same hit");
}

#[test]
fn one_bomb_takes_out_two_stacked_stones() {
    let mut state = new_state();
    state.place_rocket(50.0);
    let bomb = state.fire_bomb().unwrap();
    let upper = state.insert_stone(Vec2::new(81.0, 50.0));
    let lower = state.insert_stone(Vec2::new(81.0, 52.0));

    state.update(8).unwrap();
    assert!(state.bombs().get(bomb).unwrap().hit);
    assert!(state.stones().get(upper).unwrap().hit);
    assert!(state.stones().get(lower).unwrap().hit);

    let events: Vec<_> = state.drain_events().collect();
    assert!(events.contains(&SimEvent::Collision { bomb, stone: upper }));
    assert!(events.contains(&SimEvent::Collision { bomb, stone: lower }));

    // Still a single crash for the single bomb
    let crashes = events
        .iter()
        .filter(|e| matches!(e, SimEvent::CrashSpawned { .. }))
        .count();
    assert_eq!(crashes, 1);
    assert_eq!(state.crashes().len(), 1);
}

#[test]
fn five_breakthroughs_lose_then_reset() {
    let mut state = new_state();
    for row in 0..5 {
        state.insert_stone(Vec2::new(40.0, 20.0 + row as f32 * 30.0));
    }

    state.update(1).unwrap();
    assert_eq!(state.session().hit_points, 0);
    assert_eq!(state.session().phase, SessionPhase::Lost { since: 1 });
    assert!(state.stones().is_empty());

    let losses = state
        .drain_events()
        .filter(|e| matches!(e, SimEvent::SessionLost { .. }))
        .count();
    assert_eq!(losses, 1);

    // No firing while lost
    assert!(state.fire_bomb().is_none());

    state.update(241).unwrap();
    assert!(state.session().is_lost(), "cooldown not over yet");

    state.update(242).unwrap();
    let session = state.session();
    assert!(!session.is_lost());
    assert_eq!(session.hit_points, 5);
    assert!(state.stones().is_empty());
    assert!(state.bombs().is_empty());
    assert!(state.crashes().is_empty());
    assert_eq!(state.rocket().y, HEIGHT / 2.0);
    assert_eq!(state.rocket().velocity, 0.0);
    assert_eq!(state.spawner().next_boundary(), 242 + GAME_LAUNCH_TIME);
    assert!(
        state
            .drain_events()
            .any(|e| e == SimEvent::SessionReset { tick: 242 })
    );
}

#[test]
fn reset_clears_live_entities() {
    let mut state = new_state();
    state.fire_bomb();
    state.insert_stone(Vec2::new(400.0, 200.0));
    for row in 0..5 {
        state.insert_stone(Vec2::new(40.0, 10.0 + row as f32 * 10.0));
    }
    state.update(1).unwrap();
    assert!(state.session().is_lost());
    assert!(!state.stones().is_empty());

    state.update(242).unwrap();
    assert!(state.stones().is_empty());
    assert!(state.bombs().is_empty());
    assert_eq!(state.session().hit_points, 5);

    // Reset emitted a removal for every live entity
    let reset_removals = state
        .drain_events()
        .filter(|e| {
            matches!(
                e,
                SimEvent::StoneRemoved {
                    reason: RemovalReason::Reset,
                    ..
                } | SimEvent::BombRemoved {
                    reason: RemovalReason::Reset,
                    ..
                }
            )
        })
        .count();
    assert!(reset_removals >= 1);
}
