use damista::board::{Board, Color};
use damista::movegen::perft;

#[test]
fn perft_regression_starting_pos() {
    let mut board = Board::new();
    let expected = [7u64, 49, 302, 1469];
    for (depth, &nodes) in (1..=4u8).zip(expected.iter()) {
        let got = perft(&mut board, Color::White, depth);
        assert_eq!(got, nodes, "perft mismatch at depth {}: got {} expected {}", depth, got, nodes);
    }
    assert_eq!(board, Board::new(), "perft must leave the board untouched");
}

#[test]
fn perft_depth_zero_is_one() {
    let mut board = Board::new();
    assert_eq!(perft(&mut board, Color::Black, 0), 1);
}

#[test]
fn perft_counts_a_chain_as_one_turn() {
    // c3xe5xg7 e' un solo turno; poi il nero non ha pezzi
    let mut board = Board::from_layout("w.../..../.w../.b../..../..b./..../....").unwrap();
    assert_eq!(perft(&mut board, Color::White, 1), 1);
    assert_eq!(perft(&mut board, Color::White, 2), 0);
}

#[test]
fn perft_is_symmetric_for_black() {
    let mut board = Board::new();
    for depth in 1..=3u8 {
        assert_eq!(perft(&mut board, Color::White, depth), perft(&mut board, Color::Black, depth));
    }
}
