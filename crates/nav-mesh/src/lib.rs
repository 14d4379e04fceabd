//! Chunked rectangle navmesh for 2D tile grids.
//!
//! Free space is decomposed into axis-aligned rectangles per chunk, flush
//! rectangle boundaries become weighted graph edges (stitched lazily across
//! chunk borders as chunks load and unload), A* finds a rectangle corridor,
//! and a funnel pass pulls the corridor into a taut waypoint polyline.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod chunk;
pub mod edge;
pub mod error;
pub mod funnel;
pub mod graph;
pub mod math;
mod query;
pub mod rect;
pub mod world;

pub use chunk::{ChunkKey, NavChunk};
pub use edge::{build_edges, shared_boundary, EdgeTarget, NavEdge, SharedBoundary};
pub use error::{GeometryError, RectBounds};
pub use funnel::{funnel, funnel_traced, FunnelStep, FunnelTrace, Portal};
pub use graph::{NavGraph, NavPath, NavPoint};
pub use math::Vec2;
pub use rect::{decompose, NavRect, RectId};
pub use world::{ChunkProvider, GridOccupancy, Occupancy};
