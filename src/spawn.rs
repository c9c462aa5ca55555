//! Placement of new tiles.

use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::board::{Board, IdAllocator, Tile};

/// Source of the two random draws a spawn needs.
pub trait RandomSource {
    /// Uniform index in `0..len`. `len` is never zero.
    fn pick(&mut self, len: usize) -> usize;

    /// `true` with probability `p`.
    fn chance(&mut self, p: f64) -> bool;
}

/// [`RandomSource`] backed by a `rand` generator.
#[derive(Debug, Clone)]
pub struct RngSource<R>(pub R);

impl RngSource<StdRng> {
    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self(StdRng::from_os_rng())
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn pick(&mut self, len: usize) -> usize {
        self.0.random_range(0..len)
    }

    fn chance(&mut self, p: f64) -> bool {
        self.0.random_bool(p)
    }
}

/// Add one tile to a random empty cell: a 4 with probability
/// `four_probability`, otherwise a 2.
///
/// A full board comes back unchanged. Existing tiles keep their annotations.
pub fn spawn_tile(
    board: &Board,
    ids: &mut IdAllocator,
    rng: &mut impl RandomSource,
    four_probability: f64,
) -> Board {
    let empty = board.empty_positions();
    if empty.is_empty() {
        log::trace!("No empty cell to spawn into");
        return board.clone();
    }

    let (row, col) = empty[rng.pick(empty.len())];
    let value = if rng.chance(four_probability) { 4 } else { 2 };
    let tile = Tile::spawned(ids.allocate(), value, row, col);
    log::trace!("Spawned {} ({value}) at ({row}, {col})", tile.id);

    board.with_tile(tile)
}

/// Starting board of a round: two spawned tiles.
pub fn fresh_board(
    ids: &mut IdAllocator,
    rng: &mut impl RandomSource,
    four_probability: f64,
) -> Board {
    let board = spawn_tile(&Board::empty(), ids, rng, four_probability);
    spawn_tile(&board, ids, rng, four_probability)
}


#[cfg(test)]
mod test {
    use super::scripted::Scripted;
    use super::*;
    use crate::board::TileId;

    #[test]
    fn test_spawn_into_chosen_cell() {
        let mut ids = IdAllocator::after(TileId(1));
        let board = Board::from_tiles(vec![Tile::new(TileId(1), 2, 0, 0)]).unwrap();

        // Empty cells in row-major order start at (0, 1); index 4 is (1, 1).
        let mut rng = Scripted::new(&[4], &[true]);
        let spawned = spawn_tile(&board, &mut ids, &mut rng, 0.1);

        assert_eq!(spawned.len(), 2);
        assert_eq!(spawned.tile_at(1, 1), Some(&Tile::spawned(TileId(2), 4, 1, 1)));
        assert_eq!(spawned.tile_at(0, 0), Some(&Tile::new(TileId(1), 2, 0, 0)));
    }

    #[test]
    fn test_spawn_keeps_annotations() {
        let mut merged = Tile::new(TileId(1), 8, 2, 2);
        merged.just_merged = true;
        let board = Board::from_tiles(vec![merged]).unwrap();

        let mut ids = IdAllocator::after(TileId(1));
        let spawned = spawn_tile(&board, &mut ids, &mut Scripted::new(&[0], &[false]), 0.1);

        assert_eq!(spawned.tile_at(2, 2), Some(&merged));
        assert_eq!(spawned.tile_at(0, 0).map(|tile| tile.value), Some(2));
    }

    #[test]
    fn test_spawn_on_full_board() {
        let values = [[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [4, 2, 4, 2]];
        let mut ids = IdAllocator::new();
        let board = Board::from_values(values, &mut ids).unwrap();

        let spawned = spawn_tile(&board, &mut ids, &mut Scripted::default(), 0.1);
        assert_eq!(spawned, board);
        assert_eq!(ids.issued(), 16);
    }

    #[test]
    fn test_fresh_board() {
        let mut ids = IdAllocator::new();
        let board = fresh_board(&mut ids, &mut RngSource::seeded(3), 0.1);

        assert_eq!(board.len(), 2);
        assert!(board.tiles().iter().all(|tile| tile.is_new));
        assert!(board.tiles().iter().all(|tile| tile.value == 2 || tile.value == 4));
        assert_ne!(board.tiles()[0].position(), board.tiles()[1].position());
        assert_eq!(ids.issued(), 2);
    }

    #[test]
    fn test_four_frequency() {
        let mut ids = IdAllocator::new();
        let mut rng = RngSource::seeded(11);

        let fours = (0..10_000)
            .filter(|_| {
                spawn_tile(&Board::empty(), &mut ids, &mut rng, 0.1).tiles()[0].value == 4
            })
            .count();

        assert!((700..1300).contains(&fours), "{fours} fours");
    }
}
