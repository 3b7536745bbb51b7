use std::io::{self, Write};

use crossterm::style::{Color, ContentStyle, Stylize};
use mineclear_core::*;

fn digits(value: usize) -> usize {
    value.to_string().len()
}

fn style_of(cell: VisibleCell) -> ContentStyle {
    let style = ContentStyle::new();
    match cell {
        VisibleCell::Closed => style,
        VisibleCell::Flag => style.yellow().bold(),
        VisibleCell::Mine => style.white().on_red().bold(),
        VisibleCell::Exploded => style.black().on_yellow().bold(),
        VisibleCell::Open(count) => style.with(match count {
            1 => Color::Green,
            2 => Color::Blue,
            3 => Color::Red,
            4 => Color::Magenta,
            _ => Color::Cyan,
        }),
    }
}

fn symbol_of(cell: VisibleCell) -> String {
    match cell {
        VisibleCell::Closed => "#".to_string(),
        VisibleCell::Open(0) => " ".to_string(),
        VisibleCell::Open(count) => count.to_string(),
        VisibleCell::Flag => "F".to_string(),
        VisibleCell::Mine | VisibleCell::Exploded => "*".to_string(),
    }
}

/// Draws the grid with row and column numbers, followed by the mine counter.
pub fn render(out: &mut impl Write, snapshot: &Snapshot, color: bool) -> io::Result<()> {
    let (rows, cols) = snapshot.size;
    let label_width = digits(usize::from(rows.saturating_sub(1)));
    let cell_width = digits(usize::from(cols.saturating_sub(1))) + 1;

    write!(out, "{:label_width$} ", "")?;
    for col in 0..cols {
        write!(out, " {:<width$}", col, width = cell_width - 1)?;
    }
    writeln!(out)?;
    writeln!(out, "{:label_width$} ┌{}┐", "", "─".repeat(usize::from(cols) * cell_width))?;

    for row in 0..rows {
        write!(out, "{row:>label_width$} │")?;
        for col in 0..cols {
            let cell = snapshot.visible_at((row, col)).unwrap_or(VisibleCell::Closed);
            let symbol = symbol_of(cell);
            if color && cell != VisibleCell::Closed {
                write!(out, " {}", style_of(cell).apply(&symbol))?;
            } else {
                write!(out, " {symbol}")?;
            }
            write!(out, "{:pad$}", "", pad = cell_width - 1 - symbol.len())?;
        }
        writeln!(out, "│")?;
    }

    writeln!(out, "{:label_width$} └{}┘", "", "─".repeat(usize::from(cols) * cell_width))?;
    writeln!(out, "Mines left: {}", snapshot.mines_left())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draw(snapshot: &Snapshot) -> String {
        let mut out = Vec::new();
        render(&mut out, snapshot, false).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn draws_closed_open_and_flagged_cells() {
        let mut board = Board::new(&MineLayout::from_mine_coords((2, 3), &[(1, 2)]).unwrap());
        board.open((0, 0));
        board.toggle_flag((1, 2));

        let text = draw(&board.snapshot());

        assert_eq!(
            text,
            "   0 1 2\n  ┌──────┐\n0 │   1 #│\n1 │   1 F│\n  └──────┘\nMines left: 0\n"
        );
    }

    #[test]
    fn shows_mines_and_explosion_after_loss() {
        let mut board = Board::new(&MineLayout::from_mine_coords((2, 2), &[(0, 0), (1, 1)]).unwrap());
        board.open((1, 1));

        let text = draw(&board.snapshot().with_reveal_all(true).with_exploded(Some((1, 1))));

        assert!(text.contains("0 │ * #│"), "{text}");
        assert!(text.contains("1 │ # *│"), "{text}");
    }

    #[test]
    fn wide_boards_keep_columns_aligned() {
        let board = Board::new(&MineLayout::from_mine_coords((11, 12), &[(0, 0)]).unwrap());

        let text = draw(&board.snapshot());
        let lines: Vec<&str> = text.lines().collect();

        assert!(lines[0].ends_with(" 10 11"), "{:?}", lines[0]);
        assert_eq!(lines[2].chars().count(), lines[12].chars().count());
        assert!(lines[12].starts_with("10 │"));
    }

    #[test]
    fn colour_output_wraps_symbols_in_escape_codes() {
        let mut board = Board::new(&MineLayout::from_mine_coords((2, 2), &[(1, 1)]).unwrap());
        board.toggle_flag((1, 1));

        let mut out = Vec::new();
        render(&mut out, &board.snapshot(), true).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains('\u{1b}'));
        assert!(text.contains('F'));
    }
}
