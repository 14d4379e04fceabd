use crate::chunk::ChunkKey;
use crate::error::GeometryError;
use crate::math::Vec2;
use crate::rect::{NavRect, RectId};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Where an edge leads.
///
/// Cross-chunk targets are weak references: a `(chunk, id)` pair that only
/// becomes traversable (`linked`) while the target chunk is loaded. Nothing
/// ever owns a rectangle across a chunk boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum EdgeTarget {
    /// Rectangle in the same chunk.
    Local(RectId),
    /// Rectangle slot in a neighboring chunk, resolved only while that chunk
    /// is loaded. `linked == false` means traversal must skip this edge.
    Remote {
        chunk: ChunkKey,
        id: RectId,
        linked: bool,
    },
}

impl EdgeTarget {
    /// Node this edge currently leads to, or `None` for an unlinked remote.
    pub fn resolve(&self, own_chunk: ChunkKey) -> Option<(ChunkKey, RectId)> {
        match *self {
            EdgeTarget::Local(id) => Some((own_chunk, id)),
            EdgeTarget::Remote {
                chunk,
                id,
                linked: true,
            } => Some((chunk, id)),
            EdgeTarget::Remote { linked: false, .. } => None,
        }
    }

    pub fn references(&self, chunk: ChunkKey) -> bool {
        matches!(*self, EdgeTarget::Remote { chunk: c, .. } if c == chunk)
    }
}

/// Directed adjacency between two rectangles.
///
/// `left`/`right` span the shared boundary segment; their final orientation
/// relative to travel direction is settled by the funnel pass.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NavEdge {
    pub target: EdgeTarget,
    pub left: Vec2,
    pub right: Vec2,
    pub cost: u32,
}

/// Shared flush segment between two rectangles, plus traversal cost.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SharedBoundary {
    pub left: Vec2,
    pub right: Vec2,
    pub cost: u32,
}

/// Compute the shared boundary between two rectangles, if any.
///
/// Two rectangles connect iff their boxes touch in projection on both axes
/// and exactly one side is flush; the segment is the perpendicular overlap
/// clipped to the flush line. Corner-only contact is rejected (a zero-length
/// segment would let paths cut diagonally through blocked corners). Boxes
/// that overlap in area with no flush side are a decomposition bug and fail
/// loudly.
pub fn shared_boundary(a: &NavRect, b: &NavRect) -> Result<Option<SharedBoundary>, GeometryError> {
    if a.layer != b.layer {
        return Ok(None);
    }
    if a.sx > b.sx + b.width || b.sx > a.sx + a.width {
        return Ok(None);
    }
    if a.sy > b.sy + b.height || b.sy > a.sy + a.height {
        return Ok(None);
    }

    let (left, right) = if a.sx == b.sx + b.width {
        let x = a.sx;
        let sy = a.sy.max(b.sy);
        let ey = (a.sy + a.height).min(b.sy + b.height);
        if sy == ey {
            return Ok(None);
        }
        (Vec2::new(x as f32, sy as f32), Vec2::new(x as f32, ey as f32))
    } else if a.sx + a.width == b.sx {
        let x = b.sx;
        let sy = a.sy.max(b.sy);
        let ey = (a.sy + a.height).min(b.sy + b.height);
        if sy == ey {
            return Ok(None);
        }
        (Vec2::new(x as f32, sy as f32), Vec2::new(x as f32, ey as f32))
    } else if a.sy == b.sy + b.height {
        let y = a.sy;
        let sx = a.sx.max(b.sx);
        let ex = (a.sx + a.width).min(b.sx + b.width);
        if sx == ex {
            return Ok(None);
        }
        (Vec2::new(sx as f32, y as f32), Vec2::new(ex as f32, y as f32))
    } else if a.sy + a.height == b.sy {
        let y = b.sy;
        let sx = a.sx.max(b.sx);
        let ex = (a.sx + a.width).min(b.sx + b.width);
        if sx == ex {
            return Ok(None);
        }
        (Vec2::new(sx as f32, y as f32), Vec2::new(ex as f32, y as f32))
    } else {
        return Err(GeometryError::RealOverlap(a.bounds(), b.bounds()));
    };

    Ok(Some(SharedBoundary {
        left,
        right,
        cost: a.manhattan(b),
    }))
}

/// Intra-chunk edge pass: pairwise over all unordered pairs, emitting both
/// directions so edge symmetry holds by construction.
pub fn build_edges(rects: &mut [NavRect]) -> Result<(), GeometryError> {
    let mut found: Vec<(usize, usize, SharedBoundary)> = Vec::new();
    for i in 0..rects.len() {
        for j in (i + 1)..rects.len() {
            if let Some(boundary) = shared_boundary(&rects[i], &rects[j])? {
                found.push((i, j, boundary));
            }
        }
    }

    for (i, j, boundary) in found {
        let to_j = NavEdge {
            target: EdgeTarget::Local(rects[j].id),
            left: boundary.left,
            right: boundary.right,
            cost: boundary.cost,
        };
        let to_i = NavEdge {
            target: EdgeTarget::Local(rects[i].id),
            left: boundary.left,
            right: boundary.right,
            cost: boundary.cost,
        };
        rects[i].edges.push(to_j);
        rects[j].edges.push(to_i);
    }
    Ok(())
}
