//! Property tests: invariants that hold for every reachable state.
//!
//! Random event sequences are generated with proptest and also replayed from
//! the seeded rally simulator.

use proptest::prelude::*;

use rally_engine::core::{CourtSlot, MatchConfig, MatchEvent, MatchState, ServerNumber, TeamId};
use rally_engine::rules::MatchEngine;
use rally_engine::sim::{RallySimulator, SimConfig};

fn team_strategy() -> impl Strategy<Value = TeamId> {
    prop_oneof![Just(TeamId::FIRST), Just(TeamId::SECOND)]
}

fn event_strategy() -> impl Strategy<Value = MatchEvent> {
    prop_oneof![
        6 => team_strategy().prop_map(MatchEvent::AwardPoint),
        3 => Just(MatchEvent::SideOut),
        1 => team_strategy().prop_map(MatchEvent::SwapPlayers),
        1 => team_strategy().prop_map(MatchEvent::SwapPlayersKeepServer),
        1 => Just(MatchEvent::SwapSides),
        2 => Just(MatchEvent::Undo),
    ]
}

fn setup_strategy() -> impl Strategy<Value = (TeamId, CourtSlot)> {
    (
        team_strategy(),
        prop_oneof![Just(CourtSlot::Right), Just(CourtSlot::Left)],
    )
}

fn assert_well_formed(state: &MatchState) -> Result<(), TestCaseError> {
    for team in TeamId::both() {
        prop_assert!(state.team_positions[team].is_permutation());
    }
    prop_assert!(state.serving_team.0 < 2);
    prop_assert!(matches!(state.server_number, ServerNumber::One | ServerNumber::Two));
    prop_assert!(state.server_player_idx.0 < 2);
    prop_assert!(state.receiver_player_idx.0 < 2);
    Ok(())
}

proptest! {
    /// Every reachable state keeps positions a permutation and serve fields in range.
    #[test]
    fn prop_reachable_states_well_formed(
        setup in setup_strategy(),
        events in prop::collection::vec(event_strategy(), 0..200)
    ) {
        let engine = MatchEngine::new(MatchConfig::default());
        let mut state = engine.select_initial_server(&engine.initialize(setup.0), setup.0, setup.1);

        for event in events {
            state = engine.apply(&state, event).state;
            assert_well_formed(&state)?;
        }
    }

    /// Points only ever add one to the serving team's score.
    #[test]
    fn prop_score_monotonicity(
        events in prop::collection::vec(event_strategy(), 0..200)
    ) {
        let engine = MatchEngine::new(MatchConfig::default());
        let mut state = engine.initialize(TeamId::FIRST);

        for event in events {
            let next = engine.apply(&state, event).state;

            if let MatchEvent::AwardPoint(team) = event {
                if state.is_game_over {
                    prop_assert_eq!(&next, &state);
                } else if team == state.serving_team {
                    prop_assert_eq!(next.scores[team], state.scores[team] + 1);
                    prop_assert_eq!(next.scores[team.opponent()], state.scores[team.opponent()]);
                } else {
                    prop_assert_eq!(&next.scores, &state.scores);
                }
            }
            if event == MatchEvent::SideOut {
                prop_assert_eq!(&next.scores, &state.scores);
            }

            state = next;
        }
    }

    /// Any event followed by undo restores the prior state.
    #[test]
    fn prop_undo_round_trip(
        prefix in prop::collection::vec(event_strategy(), 0..60),
        event in event_strategy()
    ) {
        prop_assume!(event != MatchEvent::Undo);

        let engine = MatchEngine::new(MatchConfig::default());
        let mut state = engine.initialize(TeamId::SECOND);
        for e in prefix {
            state = engine.apply(&state, e).state;
        }
        prop_assume!(!state.is_game_over);

        let after = engine.apply(&state, event).state;
        prop_assert_eq!(engine.undo(&after), state);
    }

    /// History grows by one per recorded event and shrinks by one per undo.
    #[test]
    fn prop_history_length(
        events in prop::collection::vec(event_strategy(), 0..150)
    ) {
        let engine = MatchEngine::new(MatchConfig::default());
        let mut state = engine.initialize(TeamId::FIRST);

        for event in events {
            let next = engine.apply(&state, event).state;
            let expected = match event {
                MatchEvent::Undo => state.history.len().saturating_sub(1),
                e if e.is_scoring() && state.is_game_over => state.history.len(),
                _ => state.history.len() + 1,
            };
            prop_assert_eq!(next.history.len(), expected);
            state = next;
        }
    }

    /// The auto swap never toggles the display more than once without an undo.
    #[test]
    fn prop_auto_swap_once_without_undo(
        events in prop::collection::vec(
            prop_oneof![
                3 => team_strategy().prop_map(MatchEvent::AwardPoint),
                1 => Just(MatchEvent::SideOut),
            ],
            0..120
        )
    ) {
        let engine = MatchEngine::new(MatchConfig::default());
        let mut state = engine.initialize(TeamId::FIRST);
        let mut toggles = 0;

        for event in events {
            let next = engine.apply(&state, event).state;
            if next.visual_side_swapped != state.visual_side_swapped {
                toggles += 1;
                prop_assert_eq!(next.scores[state.serving_team], 6);
            }
            state = next;
        }

        prop_assert!(toggles <= 1);
        prop_assert_eq!(state.auto_swapped, toggles == 1);
    }

    /// Encoded states decode to the same value.
    #[test]
    fn prop_save_round_trip(
        events in prop::collection::vec(event_strategy(), 0..80)
    ) {
        let engine = MatchEngine::new(MatchConfig::default());
        let mut state = engine.initialize(TeamId::FIRST);
        for e in events {
            state = engine.apply(&state, e).state;
        }

        let bytes = rally_engine::record::encode_state(&state).unwrap();
        prop_assert_eq!(rally_engine::record::decode_state(&bytes).unwrap(), state);
    }
}

#[test]
fn test_simulated_games_stay_well_formed() {
    let engine = MatchEngine::new(MatchConfig::default());
    let sim = RallySimulator::new(engine.clone(), SimConfig::default().with_correction_rate(0.15));

    for game in sim.play_games(0, 25) {
        let mut state = game.initial_state.clone();
        for &event in &game.events {
            state = engine.apply(&state, event).state;
            assert_well_formed(&state).unwrap();
        }
        assert_eq!(state, game.final_state);
    }
}

#[test]
fn test_simulated_games_end_in_valid_scores() {
    let config = MatchConfig::default();
    let sim = RallySimulator::new(MatchEngine::new(config.clone()), SimConfig::default());

    for game in sim.play_games(1000, 50) {
        let result = game.result.expect("uncorrected games finish");
        let winner = result.winner();
        let score = game.final_state.scores[winner];
        let other = game.final_state.scores[winner.opponent()];

        assert!(config.is_winning_score(score, other));
        assert!(score >= 11 && score >= other + 2);
    }
}
