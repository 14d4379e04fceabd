use std::collections::HashMap;

use nav_search::SearchGraph;

use crate::chunk::ChunkKey;
use crate::funnel::Portal;
use crate::graph::NavGraph;
use crate::math::Vec2;
use crate::rect::RectId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) enum QueryNode {
    Start,
    Rect(ChunkKey, RectId),
    End,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct QueryEdge {
    pub portal: Portal,
    pub cost: u32,
}

/// Query-local view of the graph with synthetic start/end attachments.
///
/// The start node borrows the start rectangle's outgoing edges so the search
/// can leave it; a side table maps every rectangle adjacent to the end
/// rectangle onto a synthetic edge into the end node. All of it lives and
/// dies with one query; the permanent rectangle edge lists are never
/// touched.
pub(crate) struct PathQuery<'a> {
    graph: &'a NavGraph,
    start_rect: (ChunkKey, RectId),
    start_point: Vec2,
    end_point: Vec2,
    end_edges: HashMap<(ChunkKey, RectId), QueryEdge>,
}

impl<'a> PathQuery<'a> {
    pub(crate) fn new(
        graph: &'a NavGraph,
        start_rect: (ChunkKey, RectId),
        end_rect: (ChunkKey, RectId),
        start_point: Vec2,
        end_point: Vec2,
    ) -> Self {
        // Edges are built pairwise in both directions, so the end rect's
        // outgoing edges enumerate exactly the rects that can enter it.
        let mut end_edges = HashMap::new();
        if let Some(end) = graph.rect_ref(end_rect) {
            for edge in &end.edges {
                let Some(node) = edge.target.resolve(end_rect.0) else {
                    continue;
                };
                let Some(neighbor) = graph.rect_ref(node) else {
                    continue;
                };
                end_edges.insert(
                    node,
                    QueryEdge {
                        portal: Portal {
                            left: edge.left,
                            right: edge.right,
                        },
                        cost: neighbor.manhattan_to_point(end_point),
                    },
                );
            }
        }

        Self {
            graph,
            start_rect,
            start_point,
            end_point,
            end_edges,
        }
    }
}

impl SearchGraph for PathQuery<'_> {
    type Node = QueryNode;
    type Edge = QueryEdge;

    fn cost(&self, _from: QueryNode, _to: QueryNode, edge: &QueryEdge) -> u32 {
        edge.cost
    }

    fn estimate(&self, from: QueryNode, _goal: QueryNode) -> u32 {
        match from {
            QueryNode::Start => self.start_point.manhattan(self.end_point) as u32,
            QueryNode::Rect(chunk, id) => self
                .graph
                .rect_ref((chunk, id))
                .map(|r| r.manhattan_to_point(self.end_point))
                .unwrap_or(0),
            QueryNode::End => 0,
        }
    }

    fn neighbors(&self, node: QueryNode, out: &mut Vec<(QueryNode, QueryEdge)>) {
        match node {
            QueryNode::Start => {
                let Some(rect) = self.graph.rect_ref(self.start_rect) else {
                    return;
                };
                for edge in &rect.edges {
                    let Some(target) = edge.target.resolve(self.start_rect.0) else {
                        continue;
                    };
                    out.push((
                        QueryNode::Rect(target.0, target.1),
                        QueryEdge {
                            portal: Portal {
                                left: edge.left,
                                right: edge.right,
                            },
                            cost: edge.cost,
                        },
                    ));
                }
                // Start and end rects are direct neighbors: a single
                // synthetic edge covers the whole route.
                if let Some(direct) = self.end_edges.get(&self.start_rect) {
                    out.push((
                        QueryNode::End,
                        QueryEdge {
                            portal: direct.portal,
                            cost: self.start_point.manhattan(self.end_point) as u32,
                        },
                    ));
                }
            }
            QueryNode::Rect(chunk, id) => {
                let Some(rect) = self.graph.rect_ref((chunk, id)) else {
                    return;
                };
                for edge in &rect.edges {
                    let Some(target) = edge.target.resolve(chunk) else {
                        continue;
                    };
                    out.push((
                        QueryNode::Rect(target.0, target.1),
                        QueryEdge {
                            portal: Portal {
                                left: edge.left,
                                right: edge.right,
                            },
                            cost: edge.cost,
                        },
                    ));
                }
                if let Some(synthetic) = self.end_edges.get(&(chunk, id)) {
                    out.push((QueryNode::End, synthetic.clone()));
                }
            }
            QueryNode::End => {}
        }
    }
}
