use corners::consts::SIM_DT;
use corners::sim::{GameEvent, GamePhase, Layout, Session, TickInput, tick};
use corners::Settings;
use proptest::prelude::*;

fn quick(max_rounds: u32, humans: u8) -> Settings {
    Settings {
        human_players: humans,
        max_rounds,
        countdown_ticks: 2,
        countdown_interval: 0.05,
        spin_min: 0.1,
        spin_max: 0.4,
        flicker_min_interval: 0.01,
        flicker_max_interval: 0.05,
        resolve_delay: 0.02,
        settle_delay: 0.05,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_round_counter_bounded(seed in any::<u64>(), max_rounds in 1u32..6, humans in 1u8..=2) {
        let mut session = Session::with_seed(quick(max_rounds, humans), Layout::standard(), seed).unwrap();
        let go = TickInput { start: true, ..Default::default() };
        tick(&mut session, &go, SIM_DT);

        let mut last_round = session.state().round_number();
        let mut game_overs = 0;
        let mut ticks = 0;
        while session.phase() != GamePhase::GameOver && ticks < 200_000 {
            tick(&mut session, &TickInput::default(), SIM_DT);
            ticks += 1;

            let round = session.state().round_number();
            prop_assert!(round >= last_round);
            prop_assert!(round <= max_rounds);
            prop_assert!(round <= last_round + 1);
            last_round = round;

            for event in session.drain_events() {
                match event {
                    GameEvent::DieFinal { face } => prop_assert!((1..=6).contains(&face)),
                    GameEvent::GameOver { .. } => game_overs += 1,
                    _ => {}
                }
            }
            for actor in session.state().actors() {
                prop_assert!(!actor.is_held || actor.current_base.is_none());
            }
        }

        prop_assert_eq!(session.phase(), GamePhase::GameOver);
        prop_assert_eq!(game_overs, 1);
    }
}
