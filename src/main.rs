//! Damista self-play: the engine plays both sides and prints every turn.

use clap::Parser;
use damista::board::{Board, Color, START_LAYOUT};
use damista::search::{Search, SearchParams, Turn};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Search depth for White (and Black, unless --black-depth is given)
    #[arg(short, long, default_value_t = 4)]
    depth: u8,

    #[arg(long)]
    black_depth: Option<u8>,

    /// Seed for tie-breaking, for reproducible games
    #[arg(short, long)]
    seed: Option<u64>,

    #[arg(short, long, default_value_t = 1)]
    threads: usize,

    /// Declare a draw after this many turns
    #[arg(long, default_value_t = 200)]
    max_turns: u32,

    #[arg(short, long, default_value_t = String::from(START_LAYOUT))]
    layout: String,

    /// Only print the result
    #[arg(short, long)]
    quiet: bool,
}

fn engine(depth: u8, seed: Option<u64>, threads: usize) -> Search {
    let mut params = SearchParams::new().max_depth(depth).threads(threads);
    if let Some(seed) = seed {
        params = params.seed(seed);
    }
    Search::new(params)
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let mut board = match Board::from_layout(&args.layout) {
        Ok(board) => board,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let black_depth = args.black_depth.unwrap_or(args.depth);
    let mut white = engine(args.depth, args.seed, args.threads);
    let mut black = engine(black_depth, args.seed.map(|s| s.wrapping_add(1)), args.threads);

    if !args.quiet {
        println!("{}", board);
    }

    let mut player = Color::White;
    for n in 1..=args.max_turns {
        let search = match player {
            Color::White => &mut white,
            Color::Black => &mut black,
        };
        let depth = search.params().max_depth;

        let turn = match search.play_turn(&mut board, player, depth) {
            Ok(turn) => turn,
            Err(e) => {
                eprintln!("Search failed: {}", e);
                return ExitCode::FAILURE;
            }
        };

        match turn {
            Turn::Blocked => {
                println!("{:?} cannot move: {:?} wins after {} turns", player, !player, n - 1);
                return ExitCode::SUCCESS;
            }
            Turn::Played { steps, winner } => {
                if !args.quiet {
                    let moves: Vec<String> = steps.iter().map(|a| a.to_string()).collect();
                    println!("{}. {:?}: {}", n, player, moves.join(" "));
                    println!("{}", board);
                }
                if let Some(winner) = winner {
                    println!("{:?} wins after {} turns", winner, n);
                    return ExitCode::SUCCESS;
                }
            }
        }

        player = !player;
    }

    println!("Draw after {} turns", args.max_turns);
    ExitCode::SUCCESS
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn args_are_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn turn_limit_flag() {
        let args = Args::try_parse_from(["damista", "--max-turns", "12"]).unwrap();
        assert_eq!(args.max_turns, 12);
        assert!(Args::try_parse_from(["damista", "--max-plies", "12"]).is_err());
    }
}
