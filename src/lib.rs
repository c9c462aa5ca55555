pub mod board;
pub mod config;
pub mod game;
pub mod input;
pub mod sensor;
pub mod spawn;
pub mod tui;

/// Side length of the square board.
pub const BOARD_SIZE: usize = 4;

/// Collapse a line of raw tile values toward index 0, returning the score
/// gained from merges. Empty cells are `0`.
///
/// This works on plain values and carries no tile identity. It serves as the
/// reference the tile-based swipe is checked against.
pub fn swipe_left_values(cells: &mut [u32]) -> u32 {
    // Find first non empty cell
    let Some(current) = cells
        .iter()
        .enumerate()
        .find_map(|(i, &c)| (c != 0).then_some(i))
    else {
        return 0;
    };

    let mut score = 0;
    let mut last = 0; // Write ptr
    cells.swap(last, current);

    for current in current + 1..cells.len() {
        if cells[current] == 0 {
            continue;
        } else if cells[current] == cells[last] {
            cells[last] *= 2;
            score += cells[last];
            cells[current] = 0;
            last += 1;
        } else {
            (cells[last] != 0).then(|| last += 1);
            cells.swap(last, current);
        }
    }

    score
}

pub fn swipe_right_values(cells: &mut [u32]) -> u32 {
    cells.reverse();
    let score = swipe_left_values(cells);
    cells.reverse();
    score
}
