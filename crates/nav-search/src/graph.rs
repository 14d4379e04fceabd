use core::hash::Hash;

/// Capability contract a graph exposes to the search routine.
///
/// The same search runs over any node/edge pair that satisfies this trait,
/// from coarse region graphs down to per-cell grids.
pub trait SearchGraph {
    /// Node handle. `Ord` participates in heap tie-breaking, so the order
    /// should be stable across runs for deterministic search.
    type Node: Copy + Eq + Hash + Ord;
    /// Payload attached to a traversed edge, returned in path order.
    type Edge: Clone;

    /// Non-negative cost of following `edge` from `from` to `to`.
    fn cost(&self, from: Self::Node, to: Self::Node, edge: &Self::Edge) -> u32;

    /// Estimate of the remaining cost from `from` to `goal`.
    ///
    /// Must never overestimate the true cost, or the search loses optimality.
    fn estimate(&self, from: Self::Node, goal: Self::Node) -> u32;

    /// Push every outgoing `(neighbor, edge)` of `node` into `out`.
    ///
    /// The order must be deterministic for a given graph state.
    fn neighbors(&self, node: Self::Node, out: &mut Vec<(Self::Node, Self::Edge)>);
}
