use std::fmt::Display;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use duel_core::{Checkers, Outcome, Position, TicTacToe};
use duel_engine::{
    CubeEvaluator, Deadline, Evaluator, LineEvaluator, MaterialEvaluator, SearchConfig, Searcher,
};
use tracing::info;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Game {
    /// 3x3 tic-tac-toe
    Square3,
    /// 4x4 tic-tac-toe
    Square4,
    /// 4x4x4 tic-tac-toe
    Cube,
    /// English draughts
    Checkers,
}

/// Play one game between two copies of the engine.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Game to play
    #[arg(long, value_enum, default_value = "square3")]
    game: Game,

    /// Time per move in milliseconds
    #[arg(long, default_value_t = 1000)]
    move_ms: u64,

    /// Search depth (defaults to the game's preset)
    #[arg(long)]
    depth: Option<u8>,

    /// Fixed fingerprint seed
    #[arg(long)]
    seed: Option<u64>,

    /// Disable the transposition table
    #[arg(long)]
    no_tt: bool,

    /// Keep transposition entries between moves
    #[arg(long)]
    retain_tt: bool,

    /// Disable root move pre-sorting
    #[arg(long)]
    no_presort: bool,

    /// Stop the game after this many plies
    #[arg(long, default_value_t = 300)]
    max_plies: usize,
}

impl Args {
    fn config(&self, preset: SearchConfig) -> SearchConfig {
        SearchConfig {
            max_depth: self.depth.unwrap_or(preset.max_depth),
            use_tt: !self.no_tt,
            retain_tt: self.retain_tt,
            presort: !self.no_presort,
            seed: self.seed,
            ..preset
        }
    }
}

fn self_play<P, E>(start: P, evaluator: E, config: SearchConfig, args: &Args) -> Result<Outcome>
where
    P: Position + Display,
    E: Evaluator<P> + Clone,
{
    let cells = start.cell_count();
    let mut players = [
        Searcher::new(config.clone(), evaluator.clone(), cells).context("invalid search configuration")?,
        Searcher::new(config, evaluator, cells).context("invalid search configuration")?,
    ];
    let move_time = Duration::from_millis(args.move_ms);

    let mut position = start;
    println!("{position}");

    for ply in 1..=args.max_plies {
        if position.outcome().is_terminal() {
            break;
        }
        let mover = position.side_to_move();
        let player = &mut players[mover.index()];
        let depth = player.config().max_depth;
        position = player.play(&position, Deadline::after(move_time));
        info!(ply, %mover, depth, outcome = %position.outcome(), "move played");
        println!("{position}");
    }

    Ok(position.outcome())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();
    info!(game = ?args.game, move_ms = args.move_ms, "duel starting");

    let outcome = match args.game {
        Game::Square3 => self_play(TicTacToe::square(3), LineEvaluator, args.config(SearchConfig::square(3)), &args)?,
        Game::Square4 => self_play(TicTacToe::square(4), LineEvaluator, args.config(SearchConfig::square(4)), &args)?,
        Game::Cube => self_play(TicTacToe::cube(4), CubeEvaluator, args.config(SearchConfig::cube()), &args)?,
        Game::Checkers => self_play(Checkers::new(), MaterialEvaluator, args.config(SearchConfig::checkers()), &args)?,
    };

    match outcome {
        Outcome::Ongoing => println!("stopped after {} plies", args.max_plies),
        finished => println!("{finished}"),
    }
    Ok(())
}
