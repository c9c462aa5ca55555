//! Slide and merge of a single row or column.
//!
//! Every swipe direction reduces to one [`Axis`] (which lines are collapsed)
//! and one [`Heading`] (which edge the tiles travel toward).

use itertools::Itertools as _;

use super::Tile;
use crate::BOARD_SIZE;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Lines are rows, tiles travel along columns.
    Row,
    /// Lines are columns, tiles travel along rows.
    Column,
}

impl Axis {
    /// Index of the line the tile sits on.
    pub fn line_of(self, tile: &Tile) -> usize {
        match self {
            Axis::Row => tile.row,
            Axis::Column => tile.col,
        }
    }

    /// Position of the tile along its line.
    pub fn offset_of(self, tile: &Tile) -> usize {
        match self {
            Axis::Row => tile.col,
            Axis::Column => tile.row,
        }
    }

    /// Board coordinates of `offset` on line `line`, as `(row, col)`.
    pub fn place(self, line: usize, offset: usize) -> (usize, usize) {
        match self {
            Axis::Row => (line, offset),
            Axis::Column => (offset, line),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Heading {
    /// Toward index 0 (left or up).
    Low,
    /// Toward index `BOARD_SIZE - 1` (right or down).
    High,
}

impl Heading {
    /// Offset of the `n`th slot counted from the heading's edge.
    pub fn slot(self, n: usize) -> usize {
        match self {
            Heading::Low => n,
            Heading::High => BOARD_SIZE - 1 - n,
        }
    }
}

/// Result of collapsing one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collapse {
    pub tiles: Vec<Tile>,
    pub moved: bool,
    pub score: u32,
}

/// Collapse the tiles of line `index` toward `heading`.
///
/// All of `line` must sit on line `index` of `axis`, at distinct offsets.
/// The input is left untouched; every output tile is a fresh record with its
/// annotations cleared, except `just_merged` on tiles produced by a merge.
/// A merged tile keeps the id of the tile nearer the edge, the partner is
/// dropped.
pub fn collapse(line: &[Tile], index: usize, axis: Axis, heading: Heading) -> Collapse {
    debug_assert!(line.iter().all(|tile| axis.line_of(tile) == index));
    debug_assert!(line.iter().map(|tile| axis.offset_of(tile)).all_unique());

    let sorted = line.iter().sorted_by_key(|tile| axis.offset_of(tile));
    let ordered = match heading {
        Heading::Low => sorted.collect_vec(),
        Heading::High => sorted.rev().collect_vec(),
    };

    let mut tiles = Vec::with_capacity(ordered.len());
    let mut moved = false;
    let mut score = 0;

    let mut scan = ordered.into_iter().peekable();
    while let Some(tile) = scan.next() {
        let mut out = tile.settled();

        // The partner is consumed, so the merged tile never meets another one.
        if let Some(partner) = scan.next_if(|next| next.value == tile.value) {
            out.value *= 2;
            out.just_merged = true;
            score += out.value;
            moved = true;
            log::trace!("Merged {} into {} ({})", partner.id, tile.id, out.value);
        }

        (out.row, out.col) = axis.place(index, heading.slot(tiles.len()));
        moved |= out.position() != tile.position();
        tiles.push(out);
    }

    Collapse {
        tiles,
        moved,
        score,
    }
}
