use arcade_sim::sim::{GameState, SimEvent, Viewport};
use arcade_sim::{Direction, Tuning};
use proptest::prelude::*;

/// Busy tuning so short scripts exercise spawning, losing and resetting
fn busy_tuning() -> Tuning {
    Tuning {
        game_launch_time: 5,
        cycle_period: 40,
        stones_per_cycle: 8,
        max_hit_points: 3,
        lost_time_before_reset: 30,
        ..Default::default()
    }
}

fn new_state(seed: u64) -> GameState {
    let viewport = Viewport::new(160.0, 120.0).unwrap();
    GameState::new(viewport, busy_tuning(), seed).unwrap()
}

#[derive(Debug, Clone)]
enum Action {
    Idle,
    Fire,
    Steer(Direction),
    Release,
    ForceStone(u64),
}

fn action() -> impl Strategy<Value = Action> {
    prop_oneof![
        Just(Action::Idle),
        Just(Action::Fire),
        Just(Action::Steer(Direction::Up)),
        Just(Action::Steer(Direction::Down)),
        Just(Action::Release),
        (0u64..20).prop_map(Action::ForceStone),
    ]
}

fn apply(state: &mut GameState, action: &Action) {
    match action {
        Action::Idle => {}
        Action::Fire => state.press(true, Direction::Stay, false),
        Action::Steer(direction) => state.press(true, *direction, true),
        Action::Release => state.press(false, Direction::Stay, true),
        Action::ForceStone(offset) => {
            let tick = state.last_tick() + offset;
            state.schedule_stone(tick);
        }
    }
}

proptest! {
    #[test]
    fn catch_up_matches_tick_by_tick(
        seed in any::<u64>(),
        script in prop::collection::vec((action(), 1u64..40), 1..40),
    ) {
        let mut batched = new_state(seed);
        let mut stepped = new_state(seed);
        let mut now = 0;

        for (action, gap) in &script {
            apply(&mut batched, action);
            apply(&mut stepped, action);
            now += gap;

            prop_assert_eq!(batched.update(now).unwrap(), *gap);
            for t in stepped.last_tick() + 1..=now {
                stepped.update(t).unwrap();
            }
        }

        prop_assert_eq!(batched.snapshot(), stepped.snapshot());
        let batched_events: Vec<SimEvent> = batched.drain_events().collect();
        let stepped_events: Vec<SimEvent> = stepped.drain_events().collect();
        prop_assert_eq!(batched_events, stepped_events);
    }

    #[test]
    fn hit_points_only_recover_through_reset(
        seed in any::<u64>(),
        script in prop::collection::vec((action(), 1u64..25), 1..60),
    ) {
        let mut state = new_state(seed);
        let max = state.tuning().max_hit_points;
        let mut hit_points = state.session().hit_points;
        let mut losses_this_session = 0;
        let mut now = 0;

        for (action, gap) in &script {
            apply(&mut state, action);
            for _ in 0..*gap {
                now += 1;
                state.update(now).unwrap();

                let mut reset = false;
                for event in state.drain_events() {
                    match event {
                        SimEvent::SessionLost { .. } => losses_this_session += 1,
                        SimEvent::SessionReset { .. } => {
                            reset = true;
                            losses_this_session = 0;
                        }
                        _ => {}
                    }
                }
                prop_assert!(losses_this_session <= 1);

                let current = state.session().hit_points;
                if reset {
                    prop_assert_eq!(current, max);
                    prop_assert!(!state.session().is_lost());
                    prop_assert!(state.stones().is_empty());
                } else {
                    prop_assert!(current <= hit_points);
                }
                prop_assert_eq!(state.session().is_lost(), current == 0);
                hit_points = current;
            }
        }
    }

    #[test]
    fn every_bomb_hit_leaves_exactly_one_crash(
        seed in any::<u64>(),
        script in prop::collection::vec((action(), 1u64..30), 1..50),
    ) {
        let mut state = new_state(seed);
        let mut now = 0;
        let mut collisions = Vec::new();
        let mut crashes = Vec::new();

        for (action, gap) in &script {
            apply(&mut state, action);
            now += gap;
            state.update(now).unwrap();
            for event in state.drain_events() {
                match event {
                    SimEvent::Collision { bomb, .. } => collisions.push(bomb),
                    SimEvent::CrashSpawned { id, .. } => crashes.push(id),
                    _ => {}
                }
            }
        }

        // A bomb may hit several stones at once; its collisions are adjacent
        collisions.dedup();
        prop_assert_eq!(collisions, crashes);
    }
}
