use std::fmt;

/// Identity of a tile within one game session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TileId(pub u64);

impl fmt::Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Hands out increasing tile ids. Owned by the session and reset with it.
#[derive(Debug, Clone, Default)]
pub struct IdAllocator {
    last: u64,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocator whose next id is greater than `id`.
    pub fn after(id: TileId) -> Self {
        Self { last: id.0 }
    }

    pub fn allocate(&mut self) -> TileId {
        self.last += 1;
        TileId(self.last)
    }

    pub fn reset(&mut self) {
        self.last = 0;
    }

    /// Highest id handed out so far, `0` if none.
    pub fn issued(&self) -> u64 {
        self.last
    }
}
