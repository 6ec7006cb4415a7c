use anyhow::Result;
use clap::{Parser, Subcommand};
use log::info;

use std::io::{stdin, stdout, BufRead, Write};

use connect_n::{
    protocol, session::SessionStore, survey::Survey, Config, GameState, MoveKind, Searcher,
    DEFAULT_DEPTH, DEFAULT_HEIGHT, DEFAULT_WIDTH, DEFAULT_WIN_LENGTH,
};

mod display;
use display::*;

/// Play, serve or analyse games of Connect N.
#[derive(Parser)]
#[command(name = "connect-n", about = "Play, serve or analyse games of Connect N")]
struct Cli {
    /// Board height in tiles
    #[arg(long, default_value_t = DEFAULT_HEIGHT)]
    height: usize,

    /// Board width in tiles
    #[arg(long, default_value_t = DEFAULT_WIDTH)]
    width: usize,

    /// Number of tokens in a row needed to win
    #[arg(long, default_value_t = DEFAULT_WIN_LENGTH)]
    win: usize,

    /// Search depth in plies
    #[arg(long, default_value_t = DEFAULT_DEPTH)]
    depth: usize,

    /// Cap on positions visited per search
    #[arg(long)]
    node_limit: Option<usize>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Play interactively in the terminal (the default)
    Play,
    /// Answer JSON requests read line by line from stdin
    Serve,
    /// Self-play every opening of a given length and tally the results
    Survey {
        /// Length of the surveyed openings
        #[arg(long, default_value_t = 2)]
        plies: usize,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let config = Config {
        height: cli.height,
        width: cli.width,
        win_length: cli.win,
        depth: cli.depth,
        node_limit: cli.node_limit,
    };

    match cli.command.unwrap_or(Command::Play) {
        Command::Play => {
            config.validate()?;
            play(config)
        }
        Command::Serve => serve(config.searcher()),
        Command::Survey { plies } => {
            config.validate()?;
            let summary = Survey::new(config, plies).with_progress(true).run()?;
            println!(
                "{} openings: player A won {}, player B won {}, {} drawn",
                summary.openings, summary.a_wins, summary.b_wins, summary.draws
            );
            Ok(())
        }
    }
}

fn serve(searcher: Searcher) -> Result<()> {
    let mut store = SessionStore::new(searcher);
    let stdin = stdin();
    let mut stdout = stdout();
    info!("serving JSON requests on stdin");

    for line in stdin.lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        writeln!(stdout, "{}", protocol::handle_line(&mut store, &line))?;
        stdout.flush()?;
    }
    Ok(())
}

fn play(config: Config) -> Result<()> {
    println!("Welcome to Connect {}", config.win_length);
    let searcher = config.searcher();

    loop {
        let mut game = config.new_game()?;
        if !play_game(&mut game, &searcher)? {
            break;
        }
        if !ask_yes_no("\nWould you like to play again? y/n: ")? {
            break;
        }
    }
    println!("Thanks for playing!");
    Ok(())
}

/// Runs one game. Returns false if the player quit before the end.
fn play_game(game: &mut GameState, searcher: &Searcher) -> Result<bool> {
    loop {
        display(game)?;

        if game.is_terminal() {
            announce(game.last_result());
            return Ok(true);
        }

        println!("Options:");
        println!("  <column>  drop a token in a column");
        println!("  c         let the computer move");
        println!("  u         undo the last move");
        println!("  r         restart the game");
        println!("  q         quit");
        let input = match prompt("Your choice > ")? {
            Some(input) => input,
            None => return Ok(false),
        };

        match input.as_str() {
            "q" => return Ok(false),
            "r" => {
                game.reset();
                println!("Game restarted!");
            }
            "u" => {
                if game.undo_move() {
                    println!("Move undone!");
                } else {
                    println!("No moves to undo!");
                }
            }
            "c" => {
                println!("Computer is thinking...");
                stdout().flush()?;
                let report = searcher.analyse(game)?;
                match report.kind {
                    MoveKind::ForcedWin => println!("Winning move found"),
                    MoveKind::ForcedBlock => println!("Blocking the opponent's win"),
                    MoveKind::Minimax => info!(
                        "score {:?} after {} positions",
                        report.score, report.nodes
                    ),
                    MoveKind::Fallback => {}
                }
                game.apply_move(report.column)?;
                println!("Computer played column {}", report.column);
            }
            _ => match input.parse::<usize>() {
                Err(_) => println!("Invalid input: {}", input),
                Ok(column) => {
                    if let Err(err) = game.apply_move(column) {
                        println!("{}", err);
                    }
                }
            },
        }
    }
}

/// Reads a trimmed, lowercased line. `None` at the end of input.
fn prompt(message: &str) -> Result<Option<String>> {
    print!("{}", message);
    stdout().flush()?;

    let mut buffer = String::new();
    if stdin().read_line(&mut buffer)? == 0 {
        return Ok(None);
    }
    Ok(Some(buffer.trim().to_lowercase()))
}

fn ask_yes_no(message: &str) -> Result<bool> {
    loop {
        match prompt(message)? {
            None => return Ok(false),
            Some(answer) => match answer.chars().next() {
                Some('y') => return Ok(true),
                Some('n') => return Ok(false),
                _ => println!("Unknown answer given"),
            },
        }
    }
}

