use clap::{Parser, ValueEnum};
use damista::board::{Board, Color, START_LAYOUT};
use damista::movegen::perft;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Side {
    White,
    Black,
}

impl From<Side> for Color {
    fn from(side: Side) -> Color {
        match side {
            Side::White => Color::White,
            Side::Black => Color::Black,
        }
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = String::from(START_LAYOUT))]
    layout: String,

    #[arg(short, long, value_enum, default_value_t = Side::White)]
    side: Side,

    #[arg(short, long, default_value_t = 6)]
    depth: u8,
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

    println!("Running perft on layout '{}' ({:?} to move) at depth {}", board.to_layout(), args.side, args.depth);

    let start = std::time::Instant::now();
    let nodes = perft(&mut board, args.side.into(), args.depth);
    let duration = start.elapsed();

    println!(
        "perft({}) = {} nodes ({} ms, {:.2} Mnps)",
        args.depth,
        nodes,
        duration.as_millis(),
        nodes as f64 / (duration.as_micros().max(1) as f64)
    );
    ExitCode::SUCCESS
}
