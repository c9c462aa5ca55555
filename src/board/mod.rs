use std::fmt::{self, Write};

use itertools::Itertools as _;
use thiserror::Error;

use crate::BOARD_SIZE;

pub mod ids;
pub mod line;

pub use ids::{IdAllocator, TileId};
use line::{Axis, Heading};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    pub fn axis(self) -> Axis {
        match self {
            Direction::Left | Direction::Right => Axis::Row,
            Direction::Up | Direction::Down => Axis::Column,
        }
    }

    pub fn heading(self) -> Heading {
        match self {
            Direction::Left | Direction::Up => Heading::Low,
            Direction::Right | Direction::Down => Heading::High,
        }
    }
}

/// A value placed on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tile {
    pub id: TileId,
    pub value: u32,
    pub row: usize,
    pub col: usize,
    /// Set on the render pass right after the tile spawned.
    pub is_new: bool,
    /// Set on the render pass right after the merge that produced the tile.
    pub just_merged: bool,
}

impl Tile {
    pub fn new(id: TileId, value: u32, row: usize, col: usize) -> Self {
        Self {
            id,
            value,
            row,
            col,
            is_new: false,
            just_merged: false,
        }
    }

    pub fn spawned(id: TileId, value: u32, row: usize, col: usize) -> Self {
        Self {
            is_new: true,
            ..Self::new(id, value, row, col)
        }
    }

    pub fn position(&self) -> (usize, usize) {
        (self.row, self.col)
    }

    /// Copy of the tile with both annotations cleared.
    pub fn settled(self) -> Self {
        Self {
            is_new: false,
            just_merged: false,
            ..self
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BoardError {
    #[error("tile value {0} is not a power of two of at least 2")]
    InvalidValue(u32),
    #[error("position ({row}, {col}) is off the board")]
    OutOfBounds { row: usize, col: usize },
    #[error("position ({row}, {col}) holds more than one tile")]
    Occupied { row: usize, col: usize },
}

/// Outcome of swiping a board in one direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveOutcome {
    pub board: Board,
    pub moved: bool,
    /// Sum of the values produced by merges.
    pub score: u32,
}

/// An immutable set of tiles, at most one per cell.
///
/// Operations never modify a board in place, they return a new one.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Board {
    tiles: Vec<Tile>,
}

impl Board {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a board from externally supplied tiles.
    ///
    /// # Errors
    /// Returns a [`BoardError`] if a value is not a power of two of at least 2,
    /// a tile is off the board, or two tiles share a cell.
    pub fn from_tiles(tiles: Vec<Tile>) -> Result<Self, BoardError> {
        let mut occupied = [[false; BOARD_SIZE]; BOARD_SIZE];

        for tile in &tiles {
            if tile.value < 2 || !tile.value.is_power_of_two() {
                return Err(BoardError::InvalidValue(tile.value));
            }

            let (row, col) = tile.position();
            if row >= BOARD_SIZE || col >= BOARD_SIZE {
                return Err(BoardError::OutOfBounds { row, col });
            }

            if std::mem::replace(&mut occupied[row][col], true) {
                return Err(BoardError::Occupied { row, col });
            }
        }

        Ok(Self { tiles })
    }

    /// Build a board from a grid of values, `0` meaning empty. Ids are
    /// allocated in row-major order.
    ///
    /// # Errors
    /// Returns [`BoardError::InvalidValue`] for a non-zero value that is not a
    /// power of two of at least 2.
    pub fn from_values(
        values: [[u32; BOARD_SIZE]; BOARD_SIZE],
        ids: &mut IdAllocator,
    ) -> Result<Self, BoardError> {
        let tiles = (0..BOARD_SIZE)
            .cartesian_product(0..BOARD_SIZE)
            .filter(|&(row, col)| values[row][col] != 0)
            .map(|(row, col)| Tile::new(ids.allocate(), values[row][col], row, col))
            .collect();

        Self::from_tiles(tiles)
    }

    fn from_tiles_unchecked(tiles: Vec<Tile>) -> Self {
        debug_assert!(
            Self::from_tiles(tiles.clone()).is_ok(),
            "malformed board: {tiles:?}"
        );

        Self { tiles }
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.tiles.len() >= BOARD_SIZE * BOARD_SIZE
    }

    pub fn tile_at(&self, row: usize, col: usize) -> Option<&Tile> {
        self.tiles.iter().find(|tile| tile.position() == (row, col))
    }

    pub fn grid(&self) -> [[Option<Tile>; BOARD_SIZE]; BOARD_SIZE] {
        let mut grid = [[None; BOARD_SIZE]; BOARD_SIZE];
        for tile in &self.tiles {
            grid[tile.row][tile.col] = Some(*tile);
        }

        grid
    }

    /// Grid of values with `0` for empty cells.
    pub fn values(&self) -> [[u32; BOARD_SIZE]; BOARD_SIZE] {
        self.grid()
            .map(|row| row.map(|cell| cell.map_or(0, |tile| tile.value)))
    }

    /// Unoccupied cells in row-major order.
    pub fn empty_positions(&self) -> Vec<(usize, usize)> {
        let grid = self.grid();

        (0..BOARD_SIZE)
            .cartesian_product(0..BOARD_SIZE)
            .filter(|&(row, col)| grid[row][col].is_none())
            .collect()
    }

    /// Whether any swipe can still change the board.
    ///
    /// A board with an empty cell always counts as playable. On a full board
    /// only the right and down neighbours of each cell are compared; every
    /// orthogonal pair is reached from its upper or left member.
    pub fn has_available_moves(&self) -> bool {
        if !self.is_full() {
            return true;
        }

        let values = self.values();
        (0..BOARD_SIZE)
            .cartesian_product(0..BOARD_SIZE)
            .any(|(row, col)| {
                let value = values[row][col];
                (col + 1 < BOARD_SIZE && values[row][col + 1] == value)
                    || (row + 1 < BOARD_SIZE && values[row + 1][col] == value)
            })
    }

    /// Whether some tile has reached `target`. Larger values count too.
    pub fn contains_target_tile(&self, target: u32) -> bool {
        self.tiles.iter().any(|tile| tile.value >= target)
    }

    pub fn max_value(&self) -> u32 {
        self.tiles.iter().map(|tile| tile.value).max().unwrap_or(0)
    }

    pub fn total_value(&self) -> u64 {
        self.tiles.iter().map(|tile| tile.value as u64).sum()
    }

    /// Same tiles with every annotation cleared.
    pub fn settled(&self) -> Self {
        Self {
            tiles: self.tiles.iter().map(|tile| tile.settled()).collect(),
        }
    }

    /// Board with `tile` added, in canonical order.
    pub fn with_tile(&self, tile: Tile) -> Self {
        let mut tiles = self.tiles.clone();
        tiles.push(tile);
        tiles.sort_by_key(canonical_order);

        Self::from_tiles_unchecked(tiles)
    }

    /// Slide and merge every line toward `direction`.
    ///
    /// When nothing moves the original tiles come back in their original
    /// order, annotations cleared, with `moved == false` and no score.
    /// Otherwise the tiles are sorted by row, column, then id.
    pub fn swipe(&self, direction: Direction) -> MoveOutcome {
        let axis = direction.axis();
        let heading = direction.heading();

        let mut lines: [Vec<Tile>; BOARD_SIZE] = std::array::from_fn(|_| Vec::new());
        for tile in &self.tiles {
            lines[axis.line_of(tile)].push(*tile);
        }

        let mut moved = false;
        let mut score = 0;
        let mut tiles = Vec::with_capacity(self.tiles.len());

        for (index, line) in lines.iter().enumerate() {
            if line.is_empty() {
                continue;
            }

            let collapse = line::collapse(line, index, axis, heading);
            log::trace!(
                "{direction:?} line {index}: moved={}, score={}",
                collapse.moved,
                collapse.score
            );

            moved |= collapse.moved;
            score += collapse.score;
            tiles.extend(collapse.tiles);
        }

        if !moved {
            return MoveOutcome {
                board: self.settled(),
                moved: false,
                score: 0,
            };
        }

        tiles.sort_by_key(canonical_order);

        MoveOutcome {
            board: Self::from_tiles_unchecked(tiles),
            moved,
            score,
        }
    }
}

fn canonical_order(tile: &Tile) -> (usize, usize, TileId) {
    (tile.row, tile.col, tile.id)
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn write_row(f: &mut fmt::Formatter<'_>, row: [u32; BOARD_SIZE]) -> fmt::Result {
            row.iter().try_for_each(|&c| match c {
                0 => write!(f, "{:>6}", "."),
                _ => write!(f, "{c:>6}"),
            })
        }

        let mut rows = self.values().into_iter();

        if let Some(row) = rows.next() {
            write_row(f, row)?
        }

        for row in rows {
            f.write_char('\n')?;
            write_row(f, row)?
        }

        Ok(())
    }
}

pub mod test_utils {
    use rand::seq::{IndexedRandom as _, SliceRandom};

    use super::Direction;
    use crate::BOARD_SIZE;

    type Values = [[u32; BOARD_SIZE]; BOARD_SIZE];

    /// Random value grid with `filled` distinct powers of two plus
    /// `duplicates` extra copies drawn from them.
    pub fn generate_random_board(filled: u32, duplicates: u32) -> Values {
        let mut nums: Vec<u32> = Vec::with_capacity(BOARD_SIZE * BOARD_SIZE);
        nums.extend((1..filled + 1).map(|exp| 1 << exp));

        // Add duplicates
        if !nums.is_empty() {
            let duplicates: Vec<u32> = (0..duplicates)
                .filter_map(|_| nums.choose(&mut rand::rng()).copied())
                .collect();

            nums.extend(duplicates);
        }

        nums.resize(BOARD_SIZE * BOARD_SIZE, 0);

        // Shuffle the values randomly
        nums.shuffle(&mut rand::rng());
        let mut nums = nums.into_iter();

        use std::array as arr;
        arr::from_fn(|_| arr::from_fn(|_| nums.next().unwrap_or(0)))
    }

    /// Full grid whose values are drawn from the first `kinds` powers of two.
    pub fn generate_full_board(kinds: u32) -> Values {
        let pool: Vec<u32> = (1..kinds + 1).map(|exp| 1 << exp).collect();

        use std::array as arr;
        arr::from_fn(|_| arr::from_fn(|_| pool.choose(&mut rand::rng()).copied().unwrap_or(2)))
    }

    /// Swipe a plain value grid, returning the new grid and the score.
    pub fn baseline_swipe(mut board: Values, direction: Direction) -> (Values, u32) {
        let mut score = 0;

        for i in 0..BOARD_SIZE {
            let mut line: [u32; BOARD_SIZE] = match direction {
                Direction::Left | Direction::Right => board[i],
                Direction::Up | Direction::Down => std::array::from_fn(|j| board[j][i]),
            };

            score += match direction {
                Direction::Left | Direction::Up => crate::swipe_left_values(&mut line),
                Direction::Right | Direction::Down => crate::swipe_right_values(&mut line),
            };

            match direction {
                Direction::Left | Direction::Right => board[i] = line,
                Direction::Up | Direction::Down => {
                    (0..BOARD_SIZE).for_each(|j| board[j][i] = line[j]);
                }
            }
        }

        (board, score)
    }
}
