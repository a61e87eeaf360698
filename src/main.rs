//! Console Gomoku against the engine

use std::io::{self, BufRead, Write};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use log::debug;

use gomoku::{Game, SearchConfig, Stone};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Let the computer make the first move
    #[arg(long)]
    computer_first: bool,

    /// Time budget per computer move in milliseconds
    #[arg(long, default_value_t = 60_000)]
    max_time_ms: u64,

    /// Ply from which only forcing moves are searched
    #[arg(long, default_value_t = 5)]
    killer_depth: u8,

    /// Fixed search depth instead of the stone-count schedule
    #[arg(long, requires = "width")]
    depth: Option<u8>,

    /// Fixed branching width, used together with --depth
    #[arg(long, requires = "depth")]
    width: Option<usize>,

    /// Transposition table holds 2^N cells
    #[arg(long, default_value_t = 21, value_parser = clap::value_parser!(u32).range(4..=28))]
    tt_bits: u32,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

impl Args {
    fn search_config(&self) -> SearchConfig {
        let mut config = SearchConfig::default()
            .with_max_time(Duration::from_millis(self.max_time_ms))
            .with_killer_depth(self.killer_depth)
            .with_tt_bits(self.tt_bits);
        if let (Some(depth), Some(width)) = (self.depth, self.width) {
            config = config.with_limits(depth, width);
        }
        config
    }
}

/// What the player typed
enum Command {
    Move(i32, i32),
    Undo,
    Quit,
}

fn parse_command(line: &str) -> Option<Command> {
    let line = line.trim();
    match line {
        "q" | "quit" | "exit" => return Some(Command::Quit),
        "u" | "undo" => return Some(Command::Undo),
        _ => {}
    }
    let mut parts = line.split(|c: char| c.is_whitespace() || c == ',').filter(|s| !s.is_empty());
    let row = parts.next()?.parse().ok()?;
    let col = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some(Command::Move(row, col))
}

fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = if args.debug { "debug" } else { "info" };
    env_logger::Builder::from_env(
        env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, log_level),
    )
    .target(env_logger::Target::Stderr)
    .init();

    debug!("{:?}", args);
    run(&args)
}

fn run(args: &Args) -> Result<()> {
    let mut game = Game::new(args.search_config(), args.computer_first);
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut stdout = io::stdout();

    println!("You play O, the computer plays X. Enter moves as \"row col\" (0-14).");
    println!("Type \"undo\" to take back a move or \"quit\" to leave.\n");
    if !args.computer_first {
        println!("{}", game.board());
    }

    while !game.is_over() {
        if game.current_turn() == Stone::Computer {
            let (pos, _) = game.computer_move()?;
            println!("Computer plays ({}, {})", pos.row, pos.col);
            if let Some(result) = game.last_search() {
                debug!(
                    "value={} depth={} nodes={} table hits={} elapsed={:?}",
                    result.value,
                    result.limits.depth,
                    result.stats.nodes,
                    result.stats.table_hits(),
                    result.elapsed
                );
            }
            println!("{}", game.board());
            continue;
        }

        print!("Your move (row col): ");
        stdout.flush().context("failed to flush stdout")?;
        let mut line = String::new();
        let read = input
            .read_line(&mut line)
            .context("failed to read from stdin")?;
        if read == 0 {
            println!();
            return Ok(());
        }

        match parse_command(&line) {
            Some(Command::Quit) => return Ok(()),
            Some(Command::Undo) => {
                if game.undo() == 0 {
                    println!("Nothing to take back");
                }
                println!("{}", game.board());
            }
            Some(Command::Move(row, col)) => match game.human_move(row, col) {
                Ok(_) => {
                    println!("You play ({}, {})", row, col);
                    println!("{}", game.board());
                }
                Err(err) => println!("Illegal move: {err}"),
            },
            None => println!("Please enter two numbers, e.g. \"7 7\""),
        }
    }

    if let Some(outcome) = game.outcome() {
        println!("{outcome}");
    }
    Ok(())
}
