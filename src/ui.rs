//! Terminal front end.
//!
//! Reads one command per line and prints the board after every change.
//! Moves are entered as coordinate text ("e2e4").

use std::io::{self, BufRead, Write};

use crate::Game;

const HELP: &str = "Commands: e2e4 to move, 'undo', 'moves', 'display', 'new', 'quit'";

pub struct ChessUI {
    game: Game,
}

impl ChessUI {
    pub fn new(game: Game) -> Self {
        ChessUI { game }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Runs the command loop until `quit` or end of input.
    ///
    /// # Arguments
    ///
    /// * `input` - Command source, one command per line
    /// * `output` - Where the board and messages are written
    pub fn play_game<R: BufRead, W: Write>(&mut self, input: R, output: &mut W) -> io::Result<()> {
        writeln!(output, "Welcome to chess_tracker!")?;
        writeln!(output, "{}\n", HELP)?;
        self.display(output)?;

        for line in input.lines() {
            let line = line?;
            let command = line.trim().to_lowercase();
            if command.is_empty() {
                continue;
            }
            if !self.handle_command(&command, output)? {
                break;
            }
        }
        Ok(())
    }

    /// Executes one command. Returns `false` when the loop should stop.
    fn handle_command<W: Write>(&mut self, command: &str, output: &mut W) -> io::Result<bool> {
        match command {
            "quit" | "exit" => return Ok(false),
            "display" => self.display(output)?,
            "help" => writeln!(output, "{}", HELP)?,
            "moves" => {
                let moves: Vec<String> =
                    self.game.legal_moves().iter().map(|mv| mv.notation()).collect();
                writeln!(output, "{} legal moves: {}", moves.len(), moves.join(" "))?;
            }
            "undo" => match self.game.undo() {
                Some(mv) => {
                    writeln!(output, "Took back {}", mv)?;
                    self.display(output)?;
                }
                None => writeln!(output, "Nothing to undo")?,
            },
            "new" => {
                self.game = Game::new();
                self.display(output)?;
            }
            text => {
                if self.game.is_over() {
                    writeln!(output, "The game is over; 'undo' or 'new' to continue")?;
                    return Ok(true);
                }
                match self.game.try_move_notation(text) {
                    Ok(_) => self.display(output)?,
                    Err(e) => writeln!(output, "Invalid move: {}", e)?,
                }
            }
        }
        Ok(true)
    }

    /// Prints the board followed by the state of the game.
    fn display<W: Write>(&self, output: &mut W) -> io::Result<()> {
        writeln!(output, "{}", self.game.position())?;

        let side = self.game.side_to_move();
        if self.game.is_checkmate() {
            writeln!(output, "Checkmate! {} wins.", side.opposite())
        } else if self.game.is_stalemate() {
            writeln!(output, "Stalemate! The game is drawn.")
        } else if self.game.in_check(side) {
            writeln!(output, "{} is in check. {} to move.", side, side)
        } else {
            writeln!(output, "{} to move.", side)
        }
    }
}

impl Default for ChessUI {
    fn default() -> Self {
        ChessUI::new(Game::new())
    }
}

/// Runs the terminal front end on stdin/stdout.
pub fn run_terminal(game: Game) -> io::Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut ui = ChessUI::new(game);
    ui.play_game(stdin.lock(), &mut stdout)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn run_script(script: &str) -> (ChessUI, String) {
        let mut ui = ChessUI::default();
        let mut output = Vec::new();
        ui.play_game(Cursor::new(script.to_string()), &mut output).unwrap();
        (ui, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_moves_and_undo() {
        let (ui, output) = run_script("e2e4\ne7e5\nundo\n");
        assert_eq!(ui.game().history().len(), 1);
        assert!(output.contains("Took back e7e5"));
        assert!(output.contains("Black to move."));
    }

    #[test]
    fn test_invalid_input_is_reported() {
        let (ui, output) = run_script("e2e5\nhello\n");
        assert!(ui.game().history().is_empty());
        assert!(output.contains("Invalid move: illegal move: e2e5"));
        assert!(output.contains("Invalid move: invalid notation"));
    }

    #[test]
    fn test_undo_on_empty_history() {
        let (_, output) = run_script("undo\nundo\n");
        assert_eq!(output.matches("Nothing to undo").count(), 2);
    }

    #[test]
    fn test_quit_stops_reading() {
        let (ui, _) = run_script("e2e4\nquit\ne7e5\n");
        assert_eq!(ui.game().history().len(), 1);
    }

    #[test]
    fn test_moves_command_lists_all() {
        let (_, output) = run_script("moves\n");
        assert!(output.contains("20 legal moves: a2a3 a2a4"));
    }

    #[test]
    fn test_checkmate_is_announced() {
        let (ui, output) = run_script("f2f3\ne7e5\ng2g4\nd8h4\ne2e4\n");
        assert!(ui.game().is_checkmate());
        assert!(output.contains("Checkmate! Black wins."));
        assert!(output.contains("The game is over"));
        assert_eq!(ui.game().history().len(), 4);
    }

    #[test]
    fn test_new_resets() {
        let (ui, _) = run_script("e2e4\nnew\n");
        assert!(ui.game().history().is_empty());
    }
}
