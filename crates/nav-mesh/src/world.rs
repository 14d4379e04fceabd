use crate::chunk::NavChunk;

/// Occupancy capability contract supplied by the terrain generator.
///
/// The mesh builder only ever samples a square region of
/// `chunk_size() x chunk_size()` cells in chunk-local coordinates.
pub trait Occupancy {
    fn chunk_size(&self) -> i32;

    /// `true` means the cell cannot be traversed.
    fn is_blocked(&self, x: i32, y: i32) -> bool;
}

/// Dense boolean occupancy grid, useful for tests, tools, and hosts that
/// sample their terrain up front.
#[derive(Debug, Clone)]
pub struct GridOccupancy {
    size: i32,
    blocked: Vec<bool>,
}

impl GridOccupancy {
    pub fn new(size: i32) -> Self {
        assert!(size > 0, "chunk size must be > 0");
        Self {
            size,
            blocked: vec![false; (size * size) as usize],
        }
    }

    pub fn set_blocked(&mut self, x: i32, y: i32, blocked: bool) {
        if let Some(idx) = self.idx(x, y) {
            self.blocked[idx] = blocked;
        }
    }

    fn idx(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.size || y >= self.size {
            return None;
        }
        Some((y * self.size + x) as usize)
    }
}

impl Occupancy for GridOccupancy {
    fn chunk_size(&self) -> i32 {
        self.size
    }

    fn is_blocked(&self, x: i32, y: i32) -> bool {
        self.idx(x, y).map(|idx| self.blocked[idx]).unwrap_or(true)
    }
}

/// Abstract chunk persistence. The backing store (disk, network, bake cache)
/// is supplied by the host; the graph only pulls chunks on demand and pushes
/// them back out on eviction.
pub trait ChunkProvider {
    fn load(&mut self, x: i32, y: i32) -> Option<NavChunk>;
    fn save(&mut self, x: i32, y: i32, chunk: &NavChunk);
}
