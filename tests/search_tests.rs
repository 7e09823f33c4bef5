//! Endgame search integration tests on real Durak positions.

mod common;

use common::{card, PositionBuilder, P0, P1};
use durak_engine::ai::{EndgameAi, Strategy};
use durak_engine::core::{Action, GameConfig};
use durak_engine::rules::{GameState, Position};
use durak_engine::search::{EndgameSearch, Outcome, SearchConfig};

/// Play the solver's choice for both sides until the game ends.
fn play_out(mut state: GameState) -> GameState {
    let mut search = EndgameSearch::new();
    for _ in 0..200 {
        if state.is_over() {
            break;
        }
        let solution = search.solve(&state).unwrap().unwrap();
        state.apply(solution.action).unwrap();
    }
    state
}

// =============================================================================
// Forced wins
// =============================================================================

#[test]
fn test_two_card_forced_win() {
    let state = PositionBuilder::new()
        .hand(P0, &["6c", "Ah"])
        .hand(P1, &["7c"])
        .build();

    let mut search = EndgameSearch::new();
    let solution = search.solve(&state).unwrap().unwrap();

    assert_eq!(solution.action, Action::Play(card("Ah")));
    assert_eq!(solution.outcome, Outcome::Win(P0));

    // Ah cannot be beaten, so P1 picks up and the 6c goes out unanswered
    let mut next = state.clone();
    next.apply(solution.action).unwrap();
    next.apply(Action::PICKUP).unwrap();
    assert_eq!(next.winner(), None);
    next.apply(Action::Play(card("6c"))).unwrap();
    assert_eq!(next.winner(), Some(P0));

    assert_eq!(play_out(state).winner(), Some(P0));
}

#[test]
fn test_defender_finds_only_defence() {
    // P1 must beat the 9h with the trump; picking up loses
    let state = PositionBuilder::new()
        .hand(P0, &["7d"])
        .hand(P1, &["8s"])
        .field(P0, &["9h"])
        .build();
    assert_eq!(state.active_player(), P1);

    let solution = EndgameSearch::new().solve(&state).unwrap().unwrap();
    assert_eq!(solution.action, Action::Play(card("8s")));
    assert_eq!(solution.outcome, Outcome::Win(P1));
}

#[test]
fn test_lost_position_still_returns_legal_action() {
    // Every P1 card loses to the trump ace
    let state = PositionBuilder::new()
        .attacker(P1)
        .hand(P0, &["As"])
        .hand(P1, &["7c", "8d"])
        .build();

    let solution = EndgameSearch::new().solve(&state).unwrap().unwrap();
    assert!(state.is_legal(solution.action));
    assert_eq!(solution.outcome, Outcome::Win(P0));
}

#[test]
fn test_finished_game_has_no_solution() {
    let state = PositionBuilder::new().hand(P1, &["7c"]).build();
    assert!(state.is_over());
    assert_eq!(EndgameSearch::new().solve(&state).unwrap(), None);
}

// =============================================================================
// Consistency
// =============================================================================

#[test]
fn test_solver_value_is_realised_by_best_play() {
    for seed in 0..8 {
        let state = GameState::new(GameConfig::default().with_deck_size(8).with_seed(seed)).unwrap();
        let value = EndgameSearch::new().evaluate(&state).unwrap();

        let end = play_out(state);
        if let Outcome::Win(player) = value {
            assert_eq!(end.winner(), Some(player), "seed {seed}");
        }
    }
}

#[test]
fn test_search_does_not_touch_root() {
    let state = GameState::new(GameConfig::default().with_deck_size(8).with_seed(3)).unwrap();
    let key = state.key();

    EndgameSearch::new().solve(&state).unwrap();

    assert_eq!(state.key(), key);
    assert_eq!(state.action_count(), 0);
}

#[test]
fn test_stats_are_collected() {
    let state = GameState::new(GameConfig::default().with_deck_size(10).with_seed(6)).unwrap();
    let mut search = EndgameSearch::new();
    search.solve(&state).unwrap();

    let stats = search.stats();
    assert!(stats.nodes > 0);
    assert!(stats.max_depth > 0);
}

#[test]
fn test_position_moves_match_legal_actions() {
    let state = GameState::new(GameConfig::default().with_deck_size(10).with_seed(1)).unwrap();
    assert_eq!(state.legal_moves(), state.legal_actions());
    assert_eq!(Position::to_move(&state), state.active_player());
}

// =============================================================================
// Guarded strategy
// =============================================================================

#[test]
fn test_endgame_ai_searches_small_positions() {
    let state = PositionBuilder::new()
        .hand(P0, &["6c", "Ah"])
        .hand(P1, &["7c"])
        .build();
    let mut ai = EndgameAi::default();

    assert_eq!(ai.select_action(&state).unwrap(), Action::Play(card("Ah")));
    assert_eq!(ai.last_outcome(), Some(Outcome::Win(P0)));
}

#[test]
fn test_endgame_ai_waits_for_empty_deck() {
    let state = PositionBuilder::new()
        .deck(&["9d"])
        .hand(P0, &["6c", "Ah"])
        .hand(P1, &["7c"])
        .build();
    let mut ai = EndgameAi::new(SearchConfig::default());

    let action = ai.select_action(&state).unwrap();
    assert!(state.is_legal(action));
    assert_eq!(ai.last_outcome(), None);
}
