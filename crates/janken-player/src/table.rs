//! Help table: every opponent move against every human move.

use janken_core::{MoveSet, OutcomeTable};

const CORNER: &str = "v Moves v";

/// Render the outcome table with a rule between every row.
///
/// Rows are the computer's move, columns are the player's move, and each
/// cell is the player's outcome.
pub fn render(moves: &MoveSet) -> String {
    let outcomes = OutcomeTable::new(moves);

    let header: Vec<&str> = std::iter::once(CORNER).chain(moves.iter()).collect();
    let rows: Vec<Vec<&str>> = moves
        .iter()
        .zip(outcomes.rows())
        .map(|(name, cells)| {
            std::iter::once(name)
                .chain(cells.iter().map(|outcome| outcome.as_str()))
                .collect()
        })
        .collect();

    let widths: Vec<usize> = (0..header.len())
        .map(|col| {
            std::iter::once(&header)
                .chain(rows.iter())
                .map(|row| row[col].chars().count())
                .max()
                .unwrap_or(0)
        })
        .collect();

    let rule = rule_line(&widths);
    let mut out = String::new();
    out.push_str(&rule);
    out.push_str(&row_line(&header, &widths));
    for row in &rows {
        out.push_str(&rule);
        out.push_str(&row_line(row, &widths));
    }
    out.push_str(&rule);
    out
}

fn rule_line(widths: &[usize]) -> String {
    let mut line = String::from("+");
    for width in widths {
        line.push_str(&"-".repeat(width + 2));
        line.push('+');
    }
    line.push('\n');
    line
}

fn row_line(cells: &[&str], widths: &[usize]) -> String {
    let mut line = String::from("|");
    for (cell, width) in cells.iter().zip(widths) {
        let pad = width - cell.chars().count();
        line.push(' ');
        line.push_str(cell);
        line.push_str(&" ".repeat(pad + 1));
        line.push('|');
    }
    line.push('\n');
    line
}
