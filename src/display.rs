use anyhow::Result;
use crossterm::{
    style::{style, Attribute, Color, PrintStyledContent},
    QueueableCommand,
};

use std::io::{stdout, Write};

use connect_n::{Cell, GameResult, GameState, Player};

/// Draws the board with column numbers on top, player A in red and B in
/// yellow
pub fn display(state: &GameState) -> Result<()> {
    let grid = state.grid();
    let mut stdout = stdout();

    let cols: String = (0..grid.width()).map(|x| format!("{} ", x % 10)).collect();
    stdout.queue(PrintStyledContent(style(format!("\n{}\n", cols))))?;

    for row in 0..grid.height() {
        for column in 0..grid.width() {
            stdout
                .queue(PrintStyledContent(
                    style("O")
                        .attribute(Attribute::Bold)
                        .on(Color::DarkBlue)
                        .with(match grid.get(row, column) {
                            Cell::TokenA => Color::Red,
                            Cell::TokenB => Color::Yellow,
                            Cell::Empty => Color::DarkBlue,
                        }),
                ))?
                .queue(PrintStyledContent(style(" ").on(Color::DarkBlue)))?;
        }
        stdout.queue(PrintStyledContent(style("\n")))?;
    }
    stdout.flush()?;

    println!("Current player: {}", player_name(state.current_player()));
    Ok(())
}

pub fn player_name(player: Player) -> &'static str {
    match player {
        Player::A => "A (red)",
        Player::B => "B (yellow)",
    }
}

/// Prints the outcome of a finished game
pub fn announce(result: GameResult) {
    match result {
        GameResult::Ongoing => {}
        GameResult::Win(player) => println!("Player {} wins!", player_name(player)),
        GameResult::Draw => println!("It's a tie!"),
    }
}
