use crate::edge::build_edges;
#[cfg(feature = "serde")]
use crate::edge::EdgeTarget;
use crate::error::GeometryError;
use crate::rect::{decompose, NavRect, RectId};
use crate::world::Occupancy;

#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Packed chunk coordinate: `(y + 1)` in bits [32, 64), `(x + 1)` in bits
/// [0, 32). The +1 bias keeps coordinate 0 distinct from the invalid
/// sentinel; negative coordinates map to [`ChunkKey::INVALID`], which never
/// matches a loaded chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ChunkKey(u64);

impl ChunkKey {
    pub const INVALID: Self = Self(u64::MAX);

    pub fn from_coords(x: i32, y: i32) -> Self {
        if x < 0 || y < 0 {
            return Self::INVALID;
        }
        Self(((y as u64 + 1) << 32) | (x as u64 + 1))
    }

    /// Exact inverse of [`ChunkKey::from_coords`] for valid keys.
    pub fn explode(self) -> Option<(i32, i32)> {
        if self == Self::INVALID {
            return None;
        }
        let x = (self.0 & 0xffff_ffff) as i64 - 1;
        let y = (self.0 >> 32) as i64 - 1;
        Some((x as i32, y as i32))
    }

    pub fn is_valid(self) -> bool {
        self != Self::INVALID
    }
}

/// One baked chunk: a grid cell at integer coordinates exclusively owning
/// its rectangles. Rectangles never outlive their chunk's unload.
#[derive(Debug, Clone, PartialEq)]
pub struct NavChunk {
    x: i32,
    y: i32,
    pub rects: Vec<NavRect>,
}

impl NavChunk {
    /// Bake a chunk on layer 0 from an occupancy source.
    pub fn build(x: i32, y: i32, source: &dyn Occupancy) -> Result<Self, GeometryError> {
        Self::build_layered(x, y, &[(0, source)])
    }

    /// Bake a chunk with one occupancy source per traversable plane. All
    /// sources must report the same chunk size. Rect ids keep counting
    /// across layers so they stay unique within the chunk.
    pub fn build_layered(
        x: i32,
        y: i32,
        layers: &[(i32, &dyn Occupancy)],
    ) -> Result<Self, GeometryError> {
        let mut rects: Vec<NavRect> = Vec::new();
        for &(layer, source) in layers {
            let size = source.chunk_size();
            let offset = rects.len() as RectId;
            for mut rect in decompose(source, layer) {
                rect.id += offset;
                rect.sx += x * size;
                rect.sy += y * size;
                rects.push(rect);
            }
        }
        build_edges(&mut rects)?;
        Ok(Self { x, y, rects })
    }

    pub fn coords(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    pub fn key(&self) -> ChunkKey {
        ChunkKey::from_coords(self.x, self.y)
    }

    /// Rect ids are emission order, so lookup is an index.
    pub fn rect(&self, id: RectId) -> Option<&NavRect> {
        self.rects.get(id as usize)
    }

    /// First rectangle on `layer` containing the point, in emission order.
    pub fn rect_at(&self, x: f32, y: f32, layer: i32) -> Option<&NavRect> {
        self.rects
            .iter()
            .find(|r| r.layer == layer && r.contains(x, y))
    }
}

#[cfg(feature = "serde")]
#[derive(Serialize, Deserialize)]
struct NavChunkSerde {
    x: i32,
    y: i32,
    rects: Vec<NavRect>,
}

#[cfg(feature = "serde")]
impl Serialize for NavChunk {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        NavChunkSerde {
            x: self.x,
            y: self.y,
            rects: self.rects.clone(),
        }
        .serialize(serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for NavChunk {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let mut data = NavChunkSerde::deserialize(deserializer)?;
        // Remote links are only meaningful while both chunks are loaded;
        // stitching re-resolves them after the chunk enters a graph.
        for rect in &mut data.rects {
            for edge in &mut rect.edges {
                if let EdgeTarget::Remote { linked, .. } = &mut edge.target {
                    *linked = false;
                }
            }
        }
        Ok(Self {
            x: data.x,
            y: data.y,
            rects: data.rects,
        })
    }
}
