use damista::action::Action;
use damista::board::{Board, Color, Piece};
use damista::error::SearchError;
use damista::eval::Evaluator;
use damista::search::{Search, SearchParams, Turn};
use std::collections::BTreeSet;

/// Scores every undecided position alike, so all moves tie
struct Flat;

impl Evaluator for Flat {
    fn evaluate(&self, board: &Board) -> f64 {
        match board.win_status() {
            Some(Color::White) => f64::INFINITY,
            Some(Color::Black) => f64::NEG_INFINITY,
            None => 0.0,
        }
    }
}

/// Play a few seeded shallow turns from the opening to reach a middlegame.
fn middlegame(seed: u64, turns: usize) -> (Board, Color) {
    let mut board = Board::new();
    let mut search = Search::new(SearchParams::new().seed(seed));
    let mut player = Color::White;
    for _ in 0..turns {
        match search.play_turn(&mut board, player, 1) {
            Ok(Turn::Played { winner: None, .. }) => player = !player,
            _ => break,
        }
    }
    (board, player)
}

fn exact_utilities(board: &mut Board, player: Color, actions: &[Action], depth: u8) -> Vec<f64> {
    let mut full = Search::new(SearchParams::new().alpha_beta(false).seed(0));
    actions
        .iter()
        .map(|a| full.action_utility(board, player, a, depth))
        .collect()
}

fn optimum(player: Color, utilities: &[f64]) -> f64 {
    let it = utilities.iter().copied();
    match player {
        Color::White => it.fold(f64::NEG_INFINITY, f64::max),
        Color::Black => it.fold(f64::INFINITY, f64::min),
    }
}

#[test]
fn opening_depth_one_leaves_board_intact() {
    let mut board = Board::new();
    let actions = board.player_actions(Color::White);
    assert_eq!(actions.len(), 7);

    let mut search = Search::new(SearchParams::new().seed(3));
    let chosen = search
        .best_action(&mut board, Color::White, &actions, 1)
        .expect("opening is not decided")
        .expect("depth 1 returns an action")
        .clone();
    assert!(actions.contains(&chosen));
    assert_eq!(board, Board::new());

    board.apply(&chosen);
    board.unapply(&chosen);
    assert_eq!(board.count(Piece::WhiteMan), 12);
    assert_eq!(board.count(Piece::BlackMan), 12);
    assert_eq!(board, Board::new());
}

#[test]
fn decided_game_is_an_error() {
    let mut board = Board::from_layout("..../..../.w../..../..../..../..../....").unwrap();
    let actions = board.player_actions(Color::White);
    let mut search = Search::new(SearchParams::new().seed(1));
    let result = search.best_action(&mut board, Color::White, &actions, 3);
    assert!(matches!(result, Err(SearchError::GameOver { winner: Color::White })));

    let turn = search.play_turn(&mut board, Color::Black, 3);
    assert!(matches!(turn, Err(SearchError::GameOver { winner: Color::White })));
}

#[test]
fn zero_depth_and_empty_actions_give_none() {
    let mut board = Board::new();
    let actions = board.player_actions(Color::White);
    let mut search = Search::new(SearchParams::new().seed(1));
    assert_eq!(search.best_action(&mut board, Color::White, &actions, 0), Ok(None));
    assert_eq!(search.best_action(&mut board, Color::White, &[], 4), Ok(None));
}

#[test]
fn single_action_skips_the_search() {
    let mut board = Board::from_layout("..../..../.w../.b../..../..../..../...b").unwrap();
    let actions = board.player_actions(Color::White);
    assert_eq!(actions.len(), 1);
    let mut search = Search::new(SearchParams::new().seed(1));
    let chosen = search.best_action(&mut board, Color::White, &actions, 6).unwrap();
    assert_eq!(chosen, Some(&actions[0]));
    assert_eq!(search.stats().nodes, 0);
}

#[test]
fn pruning_never_changes_the_chosen_value() {
    for seed in 0..6u64 {
        let (mut board, player) = middlegame(seed, 6 + seed as usize);
        if board.win_status().is_some() {
            continue;
        }
        let actions = board.player_actions(player);
        if actions.len() < 2 {
            continue;
        }
        let before = board.clone();
        let depth = 4;

        let mut pruned = Search::new(SearchParams::new().seed(seed));
        let chosen = pruned
            .best_action(&mut board, player, &actions, depth)
            .unwrap()
            .expect("an action is chosen");
        assert_eq!(board, before);

        let utilities = exact_utilities(&mut board, player, &actions, depth);
        let index = actions.iter().position(|a| a == chosen).unwrap();
        assert_eq!(
            utilities[index],
            optimum(player, &utilities),
            "seed {}: chose {} with a sub-optimal value",
            seed,
            chosen
        );
        assert_eq!(board, before);
    }
}

#[test]
fn pruning_visits_fewer_nodes() {
    let mut board = Board::new();
    let actions = board.player_actions(Color::White);

    let mut pruned = Search::new(SearchParams::new().seed(5));
    pruned.best_action(&mut board, Color::White, &actions, 5).unwrap();
    let mut full = Search::new(SearchParams::new().alpha_beta(false).seed(5));
    full.best_action(&mut board, Color::White, &actions, 5).unwrap();

    assert!(pruned.stats().cutoffs > 0);
    assert_eq!(full.stats().cutoffs, 0);
    assert!(pruned.stats().nodes < full.stats().nodes);
}

#[test]
fn seeded_searches_are_reproducible() {
    let play = |seed: u64| {
        let mut board = Board::new();
        let mut search = Search::new(SearchParams::new().seed(seed));
        let mut player = Color::White;
        let mut layouts = Vec::new();
        for _ in 0..10 {
            match search.play_turn(&mut board, player, 3) {
                Ok(Turn::Played { winner: None, .. }) => player = !player,
                _ => break,
            }
            layouts.push(board.to_layout());
        }
        layouts
    };
    assert_eq!(play(11), play(11));
}

#[test]
fn parallel_agrees_with_sequential() {
    let (mut board, player) = middlegame(9, 8);
    if board.win_status().is_some() {
        return;
    }
    let actions = board.player_actions(player);
    if actions.len() < 2 {
        return;
    }
    let depth = 4;
    let utilities = exact_utilities(&mut board, player, &actions, depth);
    let best = optimum(player, &utilities);

    for threads in [1, 2, 4] {
        let mut search = Search::new(SearchParams::new().seed(2).threads(threads));
        let chosen = search
            .best_action(&mut board, player, &actions, depth)
            .unwrap()
            .expect("an action is chosen");
        let index = actions.iter().position(|a| a == chosen).unwrap();
        assert_eq!(utilities[index], best, "{} threads", threads);
    }
}

#[test]
fn play_turn_follows_the_chain() {
    let mut board = Board::from_layout("w.../..../.w../.b../..../..b./..../....").unwrap();
    let mut search = Search::new(SearchParams::new().seed(1));
    let turn = search.play_turn(&mut board, Color::White, 2).unwrap();
    match turn {
        Turn::Played { steps, winner } => {
            assert_eq!(steps.len(), 2);
            assert_eq!(steps[0].to_string(), "c3xe5");
            assert_eq!(steps[1].to_string(), "e5xg7");
            assert_eq!(winner, Some(Color::White));
        }
        Turn::Blocked => panic!("white can capture"),
    }
    assert_eq!(board.to_layout(), "w.../..../..../..../..../..../...w/....");
}

#[test]
fn play_turn_reports_blocked() {
    let mut board = Board::from_layout("w.../b.../.b../..../..../..../..../....").unwrap();
    let mut search = Search::new(SearchParams::new().seed(1));
    assert_eq!(search.play_turn(&mut board, Color::White, 3), Ok(Turn::Blocked));
}

#[test]
fn winning_line_has_infinite_utility() {
    let mut board = Board::from_layout("..../..../.w../.b../..../..../..../....").unwrap();
    let actions = board.player_actions(Color::White);
    let mut search = Search::new(SearchParams::new().seed(4));
    assert_eq!(search.utility(&mut board, Color::White, &actions, 2), f64::INFINITY);
    assert_eq!(search.action_utility(&mut board, Color::White, &actions[0], 1), f64::INFINITY);
    assert_eq!(board.to_layout(), "..../..../.w../.b../..../..../..../....");
}

/// Indices chosen by `best_action` over many seeds
fn chosen_indices<E: Evaluator>(
    make: impl Fn(u64) -> Search<E>,
    board: &mut Board,
    player: Color,
    actions: &[Action],
    depth: u8,
) -> BTreeSet<usize> {
    (0..200u64)
        .map(|seed| {
            let mut search = make(seed);
            let chosen = search
                .best_action(board, player, actions, depth)
                .unwrap()
                .expect("an action is chosen");
            actions.iter().position(|a| a == chosen).unwrap()
        })
        .collect()
}

#[test]
fn every_tied_action_can_be_chosen() {
    let mut board = Board::new();
    let actions = board.player_actions(Color::White);
    let all: BTreeSet<usize> = (0..actions.len()).collect();
    for threads in [1, 3] {
        let chosen = chosen_indices(
            |seed| Search::with_evaluator(Flat, SearchParams::new().seed(seed).threads(threads)),
            &mut board,
            Color::White,
            &actions,
            3,
        );
        assert_eq!(chosen, all, "{} threads", threads);
    }
    assert_eq!(board, Board::new());
}

#[test]
fn chosen_actions_are_exactly_the_optimal_ones() {
    for seed in [1u64, 4, 7] {
        let (mut board, player) = middlegame(seed, 5 + seed as usize);
        if board.win_status().is_some() {
            continue;
        }
        let actions = board.player_actions(player);
        if actions.len() < 2 {
            continue;
        }
        for depth in 1..=3u8 {
            let utilities = exact_utilities(&mut board, player, &actions, depth);
            let best = optimum(player, &utilities);
            let optimal: BTreeSet<usize> = (0..actions.len()).filter(|&i| utilities[i] == best).collect();
            for threads in [1, 3] {
                let chosen = chosen_indices(
                    |s| Search::new(SearchParams::new().seed(s).threads(threads)),
                    &mut board,
                    player,
                    &actions,
                    depth,
                );
                assert_eq!(chosen, optimal, "seed {}, depth {}, {} threads", seed, depth, threads);
            }
        }
    }
}
