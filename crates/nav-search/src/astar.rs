use core::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

use crate::SearchGraph;

struct OpenNode<N> {
    f: u32,
    g: u32,
    node: N,
    tie: u64,
}

impl<N: Copy + Eq + Ord> OpenNode<N> {
    fn key(&self) -> (u32, u32, N, u64) {
        (self.f, self.g, self.node, self.tie)
    }
}

impl<N: Copy + Eq + Ord> PartialEq for OpenNode<N> {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl<N: Copy + Eq + Ord> Eq for OpenNode<N> {}

impl<N: Copy + Eq + Ord> PartialOrd for OpenNode<N> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<N: Copy + Eq + Ord> Ord for OpenNode<N> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering to make BinaryHeap behave like a min-heap.
        other.key().cmp(&self.key())
    }
}

/// A* search with reusable scratch buffers.
///
/// Keeping one instance alive across queries avoids per-query allocations in
/// hot paths.
pub struct AStar<G: SearchGraph> {
    open: BinaryHeap<OpenNode<G::Node>>,
    g_score: HashMap<G::Node, u32>,
    came_from: HashMap<G::Node, (G::Node, G::Edge)>,
    scratch: Vec<(G::Node, G::Edge)>,
}

impl<G: SearchGraph> Default for AStar<G> {
    fn default() -> Self {
        Self {
            open: BinaryHeap::new(),
            g_score: HashMap::new(),
            came_from: HashMap::new(),
            scratch: Vec::new(),
        }
    }
}

impl<G: SearchGraph> AStar<G> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn find_path(&mut self, graph: &G, start: G::Node, goal: G::Node) -> Option<Vec<G::Edge>> {
        let mut out = Vec::new();
        self.find_path_into(graph, start, goal, &mut out)?;
        Some(out)
    }

    /// Search from `start` to `goal`, writing the traversed edges into `out`.
    ///
    /// Returns `None` when the goal is unreachable; `out` holds an empty path
    /// when `start == goal`.
    pub fn find_path_into(
        &mut self,
        graph: &G,
        start: G::Node,
        goal: G::Node,
        out: &mut Vec<G::Edge>,
    ) -> Option<()> {
        out.clear();
        self.open.clear();
        self.g_score.clear();
        self.came_from.clear();

        self.g_score.insert(start, 0);
        self.open.push(OpenNode {
            f: graph.estimate(start, goal),
            g: 0,
            node: start,
            tie: 0,
        });
        let mut tie: u64 = 1;

        while let Some(node) = self.open.pop() {
            if node.node == goal {
                let mut current = goal;
                while let Some((prev, edge)) = self.came_from.get(&current) {
                    out.push(edge.clone());
                    current = *prev;
                }
                out.reverse();
                return Some(());
            }

            if self.g_score.get(&node.node) != Some(&node.g) {
                // Stale heap entry.
                continue;
            }

            self.scratch.clear();
            graph.neighbors(node.node, &mut self.scratch);
            for (next, edge) in self.scratch.drain(..) {
                let tentative = node.g.saturating_add(graph.cost(node.node, next, &edge));
                if tentative >= self.g_score.get(&next).copied().unwrap_or(u32::MAX) {
                    continue;
                }

                self.came_from.insert(next, (node.node, edge));
                self.g_score.insert(next, tentative);
                self.open.push(OpenNode {
                    f: tentative.saturating_add(graph.estimate(next, goal)),
                    g: tentative,
                    node: next,
                    tie,
                });
                tie += 1;
            }
        }

        None
    }
}
