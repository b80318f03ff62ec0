use clap::Parser;
use e2048::engine::{apply, game_over, legal_directions, move_and_spawn, Board, Direction};
use e2048::error::{EngineError, Result};
use e2048::outcomes::{sorted_outcomes, successors};
use e2048::render::{render, RenderOptions};
use e2048::utils::{board_from_rows, parse_key};
use env_logger::Env;
use log::{error, info};
use rand::rngs::SmallRng;
use rand::SeedableRng;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Inspect a 2048 board: moves, legality and successor distributions", long_about = None)]
struct Args {
    /// Packed board key, decimal or 0x-prefixed hex
    #[clap(short, long, conflicts_with = "rows")]
    key: Option<String>,

    /// Board rows of displayed values, e.g. --rows "2 _ 4 _" "_ 8 _ _"
    #[clap(short, long, num_args = 1..=4)]
    rows: Vec<String>,

    /// Only inspect this direction (left, right, up, down)
    #[clap(short, long)]
    direction: Option<Direction>,

    /// Show exponents instead of tile values
    #[clap(long)]
    numeric: bool,

    /// Glyph for empty cells
    #[clap(long, default_value = "_")]
    blank: String,

    /// Text prepended to every rendered row
    #[clap(long, default_value = "")]
    prefix: String,

    /// Print at most this many successors per direction
    #[clap(long, default_value_t = 8)]
    top: usize,

    /// Also play one seeded move-and-spawn for each inspected direction
    #[clap(long)]
    spawn: Option<u64>,
}

fn load_board(args: &Args) -> Result<Board> {
    match &args.key {
        Some(key) => parse_key(key),
        None => {
            let rows: Vec<&str> = args.rows.iter().map(String::as_str).collect();
            board_from_rows(&rows)
        }
    }
}

fn run(args: &Args) -> Result<()> {
    let board = load_board(args)?;
    let options = RenderOptions::default()
        .numeric(args.numeric)
        .with_blank(args.blank.as_str())
        .with_prefix(args.prefix.as_str());
    info!("inspecting {:?}", board);

    println!("Board {:?}:\n{}", board, render(board, &options));

    let legal = legal_directions(board);
    let names: Vec<&str> = legal.iter().map(|d| d.name()).collect();
    println!("Legal directions: [{}]", names.join(", "));
    println!("Game over: {}\n", game_over(board));

    let directions: Vec<Direction> = match args.direction {
        Some(d) => vec![d],
        None => legal,
    };
    let mut rng = args.spawn.map(SmallRng::seed_from_u64);

    for direction in directions {
        let Some(outcomes) = successors(board, direction) else {
            println!("{}: illegal, the board does not change\n", direction);
            continue;
        };
        let moved = apply(board, direction);
        println!("{} -> {:?}:\n{}", direction, moved, render(moved, &options));

        let sorted = sorted_outcomes(&outcomes);
        println!("  {} successors (showing {}):", sorted.len(), sorted.len().min(args.top));
        for (next, p) in sorted.iter().take(args.top) {
            println!("  {:?}  p = {:.4}", next, p);
        }
        let total: f64 = outcomes.values().sum();
        println!("  total probability: {:.6}\n", total);

        if let Some(rng) = rng.as_mut() {
            let next = move_and_spawn(board, direction, rng)?;
            println!("Sampled {} + spawn:\n{}", direction, render(next, &options));
        }
    }
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    if let Err(e) = run(&args) {
        error!("{}", e);
        if let EngineError::Parse(_) | EngineError::UnknownDirection(_) = e {
            eprintln!("Use --key <KEY> or --rows <ROW>... to describe the board.");
        }
        std::process::exit(1);
    }
}
