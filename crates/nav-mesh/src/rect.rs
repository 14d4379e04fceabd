use crate::edge::NavEdge;
use crate::error::RectBounds;
use crate::math::Vec2;
use crate::world::Occupancy;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Rectangle identifier, unique within its owning chunk (emission order of
/// the decomposer). Used for serialized cross-chunk linkage.
pub type RectId = u32;

/// Axis-aligned free-space rectangle in world tile coordinates.
///
/// Shape is immutable once created; only the edge list changes, when chunks
/// stitch or unstitch across borders.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NavRect {
    pub sx: i32,
    pub sy: i32,
    pub width: i32,
    pub height: i32,
    /// Traversable plane index; stacked planes (bridges) share coordinates
    /// but never share edges.
    pub layer: i32,
    pub id: RectId,
    pub edges: Vec<NavEdge>,
}

impl NavRect {
    pub fn new(sx: i32, sy: i32, width: i32, height: i32, layer: i32, id: RectId) -> Self {
        Self {
            sx,
            sy,
            width,
            height,
            layer,
            id,
            edges: Vec::new(),
        }
    }

    /// Half-open containment: `[sx, sx + width) x [sy, sy + height)`.
    pub fn contains(&self, x: f32, y: f32) -> bool {
        self.sx as f32 <= x
            && x < (self.sx + self.width) as f32
            && self.sy as f32 <= y
            && y < (self.sy + self.height) as f32
    }

    /// Integer midpoint, truncating like the cost model expects.
    pub fn center(&self) -> (i32, i32) {
        (self.sx + self.width / 2, self.sy + self.height / 2)
    }

    pub fn center_point(&self) -> Vec2 {
        let (cx, cy) = self.center();
        Vec2::new(cx as f32, cy as f32)
    }

    /// Manhattan distance between integer midpoints; the graph's cost and
    /// heuristic are both built on this, which keeps the estimate consistent.
    pub fn manhattan(&self, other: &NavRect) -> u32 {
        let (ax, ay) = self.center();
        let (bx, by) = other.center();
        ((ax - bx).abs() + (ay - by).abs()) as u32
    }

    pub fn manhattan_to_point(&self, p: Vec2) -> u32 {
        self.center_point().manhattan(p) as u32
    }

    pub(crate) fn bounds(&self) -> RectBounds {
        RectBounds {
            sx: self.sx,
            sy: self.sy,
            width: self.width,
            height: self.height,
        }
    }
}

/// Decompose a chunk's occupancy into disjoint maximal rectangles.
///
/// Greedy sweep in row-major order (y outer, x inner): seed at the first
/// unclaimed free cell, extend rightward as far as free cells allow (this
/// locks the width), then extend downward one full-width row at a time.
/// Cells are claimed as they are covered. Deterministic but seed-order
/// dependent; not guaranteed minimal-count.
///
/// An all-blocked chunk yields no rectangles; an all-free chunk yields a
/// single rectangle covering the whole chunk.
pub fn decompose(source: &dyn Occupancy, layer: i32) -> Vec<NavRect> {
    let size = source.chunk_size();
    debug_assert!(size > 0);
    let stride = size as usize;

    let mut used = vec![false; stride * stride];
    for y in 0..size {
        for x in 0..size {
            used[(y as usize) * stride + x as usize] = source.is_blocked(x, y);
        }
    }

    let mut rects = Vec::new();
    for y in 0..size {
        for x in 0..size {
            if used[(y as usize) * stride + x as usize] {
                continue;
            }
            let rect = expand(&mut used, x, y, size, layer, rects.len() as RectId);
            rects.push(rect);
        }
    }
    rects
}

fn expand(used: &mut [bool], sx: i32, sy: i32, size: i32, layer: i32, id: RectId) -> NavRect {
    let stride = size as usize;
    let cell = |x: i32, y: i32| (y as usize) * stride + x as usize;

    used[cell(sx, sy)] = true;

    // Width first: extend along the seed row while the next cell is free.
    let mut ex = sx;
    while ex + 1 < size && !used[cell(ex + 1, sy)] {
        ex += 1;
        used[cell(ex, sy)] = true;
    }

    // Then height: a row is only taken when the entire width-slice is free.
    let mut ey = sy;
    while ey + 1 < size {
        if (sx..=ex).any(|x| used[cell(x, ey + 1)]) {
            break;
        }
        ey += 1;
        for x in sx..=ex {
            used[cell(x, ey)] = true;
        }
    }

    NavRect::new(sx, sy, ex - sx + 1, ey - sy + 1, layer, id)
}
