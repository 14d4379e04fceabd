use crate::math::Vec2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One corridor gate: the shared boundary segment between two consecutive
/// rectangles on a path, before orientation relative to travel direction.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Portal {
    pub left: Vec2,
    pub right: Vec2,
}

/// Snapshot of one funnel iteration, for stepping and visualization.
#[derive(Debug, Clone, PartialEq)]
pub struct FunnelStep {
    pub apex: Vec2,
    pub left: Vec2,
    pub right: Vec2,
    pub left_index: usize,
    pub right_index: usize,
    pub corners: Vec<Vec2>,
}

/// Recorded funnel run; purely instrumentation, never consulted by the scan.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FunnelTrace {
    pub steps: Vec<FunnelStep>,
}

/// Pull a rectangle corridor taut into its interior corner points.
///
/// The corridor's portals are split into a left and a right chain relative
/// to the direction of travel, then the classic funnel scan narrows between
/// the chains, emitting a corner each time the funnel would invert. The
/// returned points are interior corners only; callers wrap them with the
/// actual start and end positions.
pub fn funnel(start: Vec2, end: Vec2, corridor: &[Portal]) -> Vec<Vec2> {
    run(start, end, corridor, None)
}

/// Same scan as [`funnel`], recording every step into `trace`.
pub fn funnel_traced(start: Vec2, end: Vec2, corridor: &[Portal], trace: &mut FunnelTrace) -> Vec<Vec2> {
    trace.steps.clear();
    run(start, end, corridor, Some(trace))
}

/// Split the corridor into left/right point chains.
///
/// Which portal endpoint is "left" is decided by the cross product sign
/// against a running reference point: the start at first, then the last
/// chosen left point. Only the left side updates the reference; the
/// one-sided rule is a deliberate simplification, not a bug. `end` caps
/// both chains.
fn corridor_chains(start: Vec2, end: Vec2, corridor: &[Portal]) -> (Vec<Vec2>, Vec<Vec2>) {
    let mut left_points = Vec::with_capacity(corridor.len() + 1);
    let mut right_points = Vec::with_capacity(corridor.len() + 1);

    let mut reference = start;
    for portal in corridor {
        let to_left = portal.left - reference;
        let to_right = portal.right - reference;
        let (left, right) = if to_left.cross(to_right) < 0.0 {
            (portal.right, portal.left)
        } else {
            (portal.left, portal.right)
        };
        left_points.push(left);
        right_points.push(right);
        reference = left;
    }

    left_points.push(end);
    right_points.push(end);
    (left_points, right_points)
}

fn run(start: Vec2, end: Vec2, corridor: &[Portal], mut trace: Option<&mut FunnelTrace>) -> Vec<Vec2> {
    let (left_points, right_points) = corridor_chains(start, end, corridor);

    let mut corners = Vec::new();
    let mut apex = start;
    let mut left = left_points[0] - apex;
    let mut right = right_points[0] - apex;
    let mut left_index = 0usize;
    let mut right_index = 0usize;

    loop {
        // Advance whichever chain is behind; ties advance the left chain.
        if right_index < left_index {
            if right_index + 1 >= right_points.len() {
                return corners;
            }
            step(
                &mut apex,
                &mut right,
                &mut left,
                &mut right_index,
                left_index,
                &right_points,
                &left_points,
                1.0,
                &mut corners,
            );
        } else {
            if left_index + 1 >= left_points.len() {
                return corners;
            }
            step(
                &mut apex,
                &mut left,
                &mut right,
                &mut left_index,
                right_index,
                &left_points,
                &right_points,
                -1.0,
                &mut corners,
            );
        }

        if let Some(trace) = trace.as_deref_mut() {
            trace.steps.push(FunnelStep {
                apex,
                left,
                right,
                left_index,
                right_index,
                corners: corners.clone(),
            });
        }
    }
}

/// Advance one chain by a single step, or snap the apex forward.
///
/// `winding` flips the cross product sign test between the two sides. A
/// negative value means the candidate direction crosses the funnel past its
/// own side: the apex snaps to the chain's current point (emitted as a
/// corner) and both direction vectors restart from there without advancing
/// the index.
#[allow(clippy::too_many_arguments)]
fn step(
    apex: &mut Vec2,
    side: &mut Vec2,
    other_side: &mut Vec2,
    index: &mut usize,
    other_index: usize,
    chain: &[Vec2],
    other: &[Vec2],
    winding: f32,
    corners: &mut Vec<Vec2>,
) {
    let candidate = chain[*index + 1] - *apex;

    if candidate.cross(*side) * winding < 0.0 {
        *apex = chain[*index];
        corners.push(*apex);
        *side = chain[*index + 1] - *apex;
        *other_side = other[other_index] - *apex;
    } else {
        *side = candidate;
        *index += 1;
    }
}
