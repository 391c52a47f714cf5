use clap::Parser;
use damista::board::{Board, Color};
use damista::search::{Search, SearchParams};
use std::time::Instant;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 8)]
    depth: u8,

    #[arg(short, long, default_value_t = 1)]
    seed: u64,

    #[arg(short, long, default_value_t = 1)]
    threads: usize,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let mut board = Board::new();
    let params = SearchParams::new()
        .max_depth(args.depth)
        .seed(args.seed)
        .threads(args.threads);
    let mut search = Search::new(params);

    println!("Benchmarking opening search at depth {} ({} threads)...", args.depth, args.threads);
    let actions = board.player_actions(Color::White);
    let start = Instant::now();
    let chosen = match search.best_action(&mut board, Color::White, &actions, args.depth) {
        Ok(chosen) => chosen.cloned(),
        Err(e) => {
            eprintln!("Search failed: {}", e);
            std::process::exit(1);
        }
    };
    let elapsed = start.elapsed();

    println!("Time: {:.2?}", elapsed);
    match chosen {
        Some(action) => println!("Best action: {}", action),
        None => println!("Best action: none"),
    }
    search.stats().print_summary();
}
