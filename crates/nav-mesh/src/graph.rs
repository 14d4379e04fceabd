use std::collections::HashMap;

use nav_search::AStar;
use tracing::{debug, trace, warn};

use crate::chunk::{ChunkKey, NavChunk};
use crate::edge::{shared_boundary, EdgeTarget, NavEdge};
use crate::error::GeometryError;
use crate::funnel::{funnel, Portal};
use crate::math::Vec2;
use crate::query::{PathQuery, QueryNode};
use crate::rect::{NavRect, RectId};
use crate::world::ChunkProvider;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Query-facing coordinate: a world position on a traversable plane.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NavPoint {
    pub x: f32,
    pub y: f32,
    pub layer: i32,
}

impl NavPoint {
    pub const fn new(x: f32, y: f32, layer: i32) -> Self {
        Self { x, y, layer }
    }
}

/// Ordered waypoint polyline from a path query, start and end included.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NavPath {
    pub points: Vec<Vec2>,
}

impl NavPath {
    pub fn new(points: Vec<Vec2>) -> Self {
        Self { points }
    }
}

const NEIGHBOR_OFFSETS: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// What `stitch` decided for one direction of a chunk pair.
enum SidePlan {
    /// The chunk already carries edge stubs for the neighbor; re-link them.
    Relink,
    /// No stubs yet; insert freshly computed boundary edges, already linked.
    Create(Vec<(usize, NavEdge)>),
}

enum QueryOutcome {
    SameRect,
    Corridor(Vec<Portal>),
}

/// Process-wide store of loaded chunks plus the path query front-end.
///
/// Cross-chunk connectivity is lazy, idempotent, and symmetric: the order in
/// which chunks load never changes the final edge state once all of them are
/// in. All operations are synchronous and the store is not internally
/// synchronized; callers needing shared access wrap it in their own lock.
#[derive(Debug)]
pub struct NavGraph {
    chunk_size: i32,
    chunks: HashMap<ChunkKey, NavChunk>,
}

impl NavGraph {
    pub fn new(chunk_size: i32) -> Self {
        assert!(chunk_size > 0, "chunk size must be > 0");
        Self {
            chunk_size,
            chunks: HashMap::new(),
        }
    }

    pub fn chunk_size(&self) -> i32 {
        self.chunk_size
    }

    pub fn chunk(&self, x: i32, y: i32) -> Option<&NavChunk> {
        self.chunks.get(&ChunkKey::from_coords(x, y))
    }

    pub fn chunks(&self) -> impl Iterator<Item = &NavChunk> {
        self.chunks.values()
    }

    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// Insert a chunk and stitch it against every loaded neighbor.
    ///
    /// Chunks at negative coordinates have no valid key and are refused.
    pub fn load_chunk(&mut self, chunk: NavChunk) -> Result<(), GeometryError> {
        let key = chunk.key();
        let (x, y) = chunk.coords();
        if !key.is_valid() {
            warn!(x, y, "refusing chunk with out-of-range coordinates");
            return Ok(());
        }

        debug!(x, y, rects = chunk.rects.len(), "load chunk");
        self.chunks.insert(key, chunk);

        for (dx, dy) in NEIGHBOR_OFFSETS {
            let neighbor = ChunkKey::from_coords(x + dx, y + dy);
            if neighbor.is_valid() && self.chunks.contains_key(&neighbor) {
                self.stitch(key, neighbor)?;
            }
        }
        Ok(())
    }

    /// Remove a chunk; every loaded neighbor's edges into it go unlinked so
    /// traversal skips them until the chunk returns.
    pub fn unload_chunk(&mut self, x: i32, y: i32) -> Option<NavChunk> {
        let key = ChunkKey::from_coords(x, y);
        let mut chunk = self.chunks.remove(&key)?;

        // The departing chunk's own links are dangling the moment it leaves
        // the store; clear them so an unloaded chunk never claims resolution.
        for rect in &mut chunk.rects {
            for edge in &mut rect.edges {
                if let EdgeTarget::Remote { linked, .. } = &mut edge.target {
                    *linked = false;
                }
            }
        }

        for (dx, dy) in NEIGHBOR_OFFSETS {
            let neighbor_key = ChunkKey::from_coords(x + dx, y + dy);
            let Some(neighbor) = self.chunks.get_mut(&neighbor_key) else {
                continue;
            };
            for rect in &mut neighbor.rects {
                for edge in &mut rect.edges {
                    if let EdgeTarget::Remote { chunk: c, linked, .. } = &mut edge.target {
                        if *c == key {
                            *linked = false;
                        }
                    }
                }
            }
        }

        debug!(x, y, "unload chunk");
        Some(chunk)
    }

    /// Pull a chunk from the provider if it is not already loaded. Returns
    /// whether the chunk ended up loaded.
    pub fn ensure_chunk(
        &mut self,
        x: i32,
        y: i32,
        provider: &mut dyn ChunkProvider,
    ) -> Result<bool, GeometryError> {
        let key = ChunkKey::from_coords(x, y);
        if self.chunks.contains_key(&key) {
            return Ok(true);
        }
        match provider.load(x, y) {
            Some(chunk) => {
                self.load_chunk(chunk)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Save a chunk back to the provider and unload it.
    pub fn evict_chunk(&mut self, x: i32, y: i32, provider: &mut dyn ChunkProvider) -> bool {
        match self.unload_chunk(x, y) {
            Some(chunk) => {
                provider.save(x, y, &chunk);
                true
            }
            None => false,
        }
    }

    fn stitch(&mut self, a: ChunkKey, b: ChunkKey) -> Result<(), GeometryError> {
        let plan_ab = self.plan_side(a, b)?;
        let plan_ba = self.plan_side(b, a)?;
        self.apply_side(a, b, plan_ab);
        self.apply_side(b, a, plan_ba);
        Ok(())
    }

    fn plan_side(&self, from: ChunkKey, to: ChunkKey) -> Result<SidePlan, GeometryError> {
        let (Some(from_chunk), Some(to_chunk)) = (self.chunks.get(&from), self.chunks.get(&to))
        else {
            return Ok(SidePlan::Relink);
        };

        let has_stubs = from_chunk
            .rects
            .iter()
            .any(|r| r.edges.iter().any(|e| e.target.references(to)));
        if has_stubs {
            return Ok(SidePlan::Relink);
        }

        let mut created = Vec::new();
        for (i, ra) in from_chunk.rects.iter().enumerate() {
            for rb in &to_chunk.rects {
                if let Some(boundary) = shared_boundary(ra, rb)? {
                    created.push((
                        i,
                        NavEdge {
                            target: EdgeTarget::Remote {
                                chunk: to,
                                id: rb.id,
                                linked: true,
                            },
                            left: boundary.left,
                            right: boundary.right,
                            cost: boundary.cost,
                        },
                    ));
                }
            }
        }
        Ok(SidePlan::Create(created))
    }

    fn apply_side(&mut self, from: ChunkKey, to: ChunkKey, plan: SidePlan) {
        match plan {
            SidePlan::Relink => {
                let target_len = self
                    .chunks
                    .get(&to)
                    .map(|c| c.rects.len() as RectId)
                    .unwrap_or(0);
                let Some(chunk) = self.chunks.get_mut(&from) else {
                    return;
                };
                let mut relinked = 0usize;
                for rect in &mut chunk.rects {
                    for edge in &mut rect.edges {
                        let EdgeTarget::Remote { chunk: c, id, linked } = &mut edge.target else {
                            continue;
                        };
                        if *c != to {
                            continue;
                        }
                        if *id < target_len {
                            *linked = true;
                            relinked += 1;
                        } else {
                            // Stale stub from a differently-baked neighbor.
                            warn!(?from, ?to, id = *id, "cross-chunk stub points past neighbor rect list");
                            *linked = false;
                        }
                    }
                }
                trace!(?from, ?to, relinked, "relinked cross-chunk edges");
            }
            SidePlan::Create(created) => {
                let count = created.len();
                let Some(chunk) = self.chunks.get_mut(&from) else {
                    return;
                };
                for (rect_index, edge) in created {
                    chunk.rects[rect_index].edges.push(edge);
                }
                trace!(?from, ?to, count, "created cross-chunk edges");
            }
        }
    }

    /// Containing rectangle for a query point, if its chunk is loaded and a
    /// rectangle on the matching layer covers it.
    fn locate(&self, p: NavPoint) -> Option<(ChunkKey, RectId)> {
        let cx = (p.x / self.chunk_size as f32).floor() as i32;
        let cy = (p.y / self.chunk_size as f32).floor() as i32;
        let key = ChunkKey::from_coords(cx, cy);
        let chunk = self.chunks.get(&key)?;
        let rect = chunk.rect_at(p.x, p.y, p.layer)?;
        Some((key, rect.id))
    }

    pub(crate) fn rect_ref(&self, node: (ChunkKey, RectId)) -> Option<&NavRect> {
        self.chunks.get(&node.0)?.rect(node.1)
    }

    /// Shortest smoothed path between two points, or `None` when either
    /// point lies outside the loaded mesh or no corridor connects them.
    pub fn find_path(&self, start: NavPoint, end: NavPoint) -> Option<NavPath> {
        let start_v = Vec2::new(start.x, start.y);
        let end_v = Vec2::new(end.x, end.y);

        match self.run_query(start, end)? {
            QueryOutcome::SameRect => Some(NavPath::new(vec![start_v, end_v])),
            QueryOutcome::Corridor(portals) => {
                let corners = funnel(start_v, end_v, &portals);
                let mut points = Vec::with_capacity(corners.len() + 2);
                points.push(start_v);
                points.extend(corners);
                points.push(end_v);
                Some(NavPath::new(points))
            }
        }
    }

    /// Raw rectangle corridor for a query, as ordered portals. Empty when
    /// both points share a rectangle. Mostly useful for debug drawing.
    pub fn corridor(&self, start: NavPoint, end: NavPoint) -> Option<Vec<Portal>> {
        match self.run_query(start, end)? {
            QueryOutcome::SameRect => Some(Vec::new()),
            QueryOutcome::Corridor(portals) => Some(portals),
        }
    }

    fn run_query(&self, start: NavPoint, end: NavPoint) -> Option<QueryOutcome> {
        let s = self.locate(start)?;
        let e = self.locate(end)?;
        trace!(?start, ?end, "path query");

        if s == e {
            return Some(QueryOutcome::SameRect);
        }

        let query = PathQuery::new(
            self,
            s,
            e,
            Vec2::new(start.x, start.y),
            Vec2::new(end.x, end.y),
        );
        let mut astar = AStar::new();
        let edges = astar.find_path(&query, QueryNode::Start, QueryNode::End)?;
        Some(QueryOutcome::Corridor(
            edges.into_iter().map(|e| e.portal).collect(),
        ))
    }
}
