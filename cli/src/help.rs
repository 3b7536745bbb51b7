use std::io::{self, Write};

const RULES: &str = "\
Rules:
1. The board is square. You choose its size and the number of mines.
2. Goal: open every cell that has no mine.
3. Moves:
   o row col  - open the cell at row, col
   f row col  - put or remove a flag on the cell
   h          - show this help
   q          - leave the game without saving it
4. Opening a mine ends the game with a loss.
5. Opening every safe cell wins the game.
6. A number tells how many of the eight surrounding cells hold mines.
   Opening a cell with no neighbouring mines opens its neighbours too.

Modes:
1. New game     - start a new game
2. Saved games  - list every finished game
3. Replay       - watch a saved game move by move

Examples:
   o 1 2    # open the cell in row 1, column 2
   f 0 0    # flag or unflag the cell at 0,0

Finished games are saved automatically.
";

pub fn show(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "Welcome to mineclear!")?;
    writeln!(out)?;
    write!(out, "{RULES}")?;
    writeln!(out, "Good luck!")
}
