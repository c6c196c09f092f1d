//! Text based two player tic tac toe.

use std::io::{self, BufRead, Write};

const DIM: usize = 3;

const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

#[derive(Debug, PartialEq)]
enum Move {
    Invalid,
    Taken,
    Placed,
}

#[derive(Debug, PartialEq)]
enum Outcome {
    Ongoing,
    Won(char),
    Stalemate,
}

struct Game {
    board: [char; DIM * DIM],
    turn: usize,
}

impl Game {
    fn new() -> Self {
        Self {
            board: [' '; DIM * DIM],
            turn: 0,
        }
    }

    fn player(&self) -> char {
        if self.turn % 2 == 0 { 'X' } else { 'O' }
    }

    /// Places the current player's mark at `position` (1-based).
    fn play(&mut self, position: usize) -> Move {
        if !(1..=DIM * DIM).contains(&position) {
            return Move::Invalid;
        }
        let player = self.player();
        let cell = &mut self.board[position - 1];
        if *cell != ' ' {
            return Move::Taken;
        }
        *cell = player;
        Move::Placed
    }

    /// Checks the board after the current player's move.
    fn outcome(&self) -> Outcome {
        let player = self.player();
        if LINES
            .iter()
            .any(|line| line.iter().all(|&i| self.board[i] == player))
        {
            Outcome::Won(player)
        } else if self.board.iter().all(|&c| c != ' ') {
            Outcome::Stalemate
        } else {
            Outcome::Ongoing
        }
    }

    fn next_turn(&mut self) {
        self.turn += 1;
    }

    fn render<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let b = &self.board;
        writeln!(out, "***********")?;
        writeln!(out, " {} | {} | {} ", b[0], b[1], b[2])?;
        writeln!(out, "-----------")?;
        writeln!(out, " {} | {} | {} ", b[3], b[4], b[5])?;
        writeln!(out, "-----------")?;
        writeln!(out, " {} | {} | {} ", b[6], b[7], b[8])?;
        writeln!(out, "***********")
    }
}

/// Prompts for a position. `None` on end of input.
fn read_position<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> io::Result<Option<usize>> {
    write!(out, "Enter position [1-9]: ")?;
    out.flush()?;

    let mut buf = String::new();
    if input.read_line(&mut buf)? == 0 {
        return Ok(None);
    }
    Ok(Some(buf.trim().parse().unwrap_or(0)))
}

fn play<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> io::Result<()> {
    let mut game = Game::new();
    writeln!(out, "*** To quit type ctrl-c or ctrl-d ***\n")?;

    loop {
        writeln!(out, "Current Player: {}", game.player())?;
        game.render(out)?;

        loop {
            let Some(position) = read_position(input, out)? else {
                return Ok(());
            };
            match game.play(position) {
                Move::Placed => break,
                Move::Invalid => writeln!(out, "Invalid position. Try again.")?,
                Move::Taken => writeln!(out, "Position taken. Try again.")?,
            }
        }

        match game.outcome() {
            Outcome::Ongoing => game.next_turn(),
            outcome => {
                match outcome {
                    Outcome::Won(player) => writeln!(out, "\nPlayer {} won!", player)?,
                    _ => writeln!(out, "Stalemate. Game Over!")?,
                }
                game.render(out)?;
                writeln!(out, "Good bye!")?;
                return Ok(());
            }
        }
    }
}

fn main() -> io::Result<()> {
    let stdin = io::stdin();
    play(&mut stdin.lock(), &mut io::stdout())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn moves(game: &mut Game, positions: &[usize]) -> Outcome {
        let mut outcome = Outcome::Ongoing;
        for &p in positions {
            assert_eq!(game.play(p), Move::Placed);
            outcome = game.outcome();
            if outcome != Outcome::Ongoing {
                break;
            }
            game.next_turn();
        }
        outcome
    }

    #[test]
    fn rejects_out_of_range_and_taken() {
        let mut game = Game::new();
        assert_eq!(game.play(0), Move::Invalid);
        assert_eq!(game.play(10), Move::Invalid);
        assert_eq!(game.play(5), Move::Placed);
        game.next_turn();
        assert_eq!(game.play(5), Move::Taken);
    }

    #[test]
    fn detects_row_column_and_diagonal_wins() {
        assert_eq!(moves(&mut Game::new(), &[1, 4, 2, 5, 3]), Outcome::Won('X'));
        assert_eq!(moves(&mut Game::new(), &[1, 2, 4, 5, 9, 8]), Outcome::Won('O'));
        assert_eq!(moves(&mut Game::new(), &[3, 1, 5, 2, 7]), Outcome::Won('X'));
    }

    #[test]
    fn full_board_is_a_stalemate() {
        // X O X / X O O / O X X
        let outcome = moves(&mut Game::new(), &[1, 2, 3, 5, 4, 6, 8, 7, 9]);
        assert_eq!(outcome, Outcome::Stalemate);
    }

    #[test]
    fn game_over_stdin() {
        let mut input = Cursor::new("1\n4\nx\n4\n2\n5\n3\n");
        let mut out = Vec::new();
        play(&mut input, &mut out).unwrap();

        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("Invalid position. Try again."));
        assert!(out.contains("Position taken. Try again."));
        assert!(out.contains("Player X won!"));
        assert!(out.ends_with("Good bye!\n"));
    }

    #[test]
    fn stops_on_end_of_input() {
        let mut input = Cursor::new("5\n");
        let mut out = Vec::new();
        play(&mut input, &mut out).unwrap();
        assert!(!String::from_utf8(out).unwrap().contains("Good bye!"));
    }
}
