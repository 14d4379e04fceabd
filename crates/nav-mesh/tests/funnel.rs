use nav_mesh::{funnel, funnel_traced, FunnelTrace, Portal, Vec2};

fn portal(lx: f32, ly: f32, rx: f32, ry: f32) -> Portal {
    Portal {
        left: Vec2::new(lx, ly),
        right: Vec2::new(rx, ry),
    }
}

fn polyline_length(points: &[Vec2]) -> f32 {
    points.windows(2).map(|w| w[0].distance(w[1])).sum()
}

#[test]
fn empty_corridor_has_no_interior_corners() {
    let corners = funnel(Vec2::new(0.0, 0.0), Vec2::new(1.0, 1.0), &[]);
    assert!(corners.is_empty());
}

#[test]
fn straight_corridor_pulls_to_a_line() {
    let start = Vec2::new(2.0, 2.0);
    let end = Vec2::new(14.0, 2.0);
    let corridor = [portal(8.0, 0.0, 8.0, 8.0)];

    let corners = funnel(start, end, &corridor);
    assert!(corners.is_empty(), "unexpected corners: {corners:?}");
}

#[test]
fn l_corridor_emits_the_wall_corner() {
    // Start low in a tall column, end in a side room whose doorway is the
    // segment x = 2, y in [4, 6]. The straight line misses the doorway, so
    // the path must bend at its lower corner.
    let start = Vec2::new(1.0, 1.0);
    let end = Vec2::new(5.0, 5.0);
    let corridor = [portal(2.0, 4.0, 2.0, 6.0)];

    let corners = funnel(start, end, &corridor);
    assert_eq!(corners, vec![Vec2::new(2.0, 4.0)]);
}

#[test]
fn corners_lie_on_portal_endpoints() {
    let start = Vec2::new(0.5, 0.5);
    let end = Vec2::new(6.5, 6.5);
    let corridor = [
        portal(2.0, 0.0, 2.0, 2.0),
        portal(4.0, 2.0, 4.0, 4.0),
        portal(6.0, 4.0, 6.0, 6.0),
    ];

    let corners = funnel(start, end, &corridor);
    for corner in &corners {
        let on_portal = corridor
            .iter()
            .any(|p| *corner == p.left || *corner == p.right);
        assert!(on_portal, "corner {corner:?} is not a portal endpoint");
    }
}

#[test]
fn taut_path_is_no_longer_than_midpoint_polyline() {
    let start = Vec2::new(1.0, 1.0);
    let end = Vec2::new(5.0, 5.0);
    let corridor = [portal(2.0, 4.0, 2.0, 6.0)];

    let corners = funnel(start, end, &corridor);
    let mut taut = vec![start];
    taut.extend(corners);
    taut.push(end);

    let mut midpoints = vec![start];
    midpoints.extend(
        corridor
            .iter()
            .map(|p| (p.left + p.right) * 0.5),
    );
    midpoints.push(end);

    assert!(polyline_length(&taut) <= polyline_length(&midpoints) + 1e-6);
}

#[test]
fn trace_records_steps_and_matches_untraced_run() {
    let start = Vec2::new(1.0, 1.0);
    let end = Vec2::new(5.0, 5.0);
    let corridor = [portal(2.0, 4.0, 2.0, 6.0)];

    let mut trace = FunnelTrace::default();
    let traced = funnel_traced(start, end, &corridor, &mut trace);

    assert_eq!(traced, funnel(start, end, &corridor));
    assert!(!trace.steps.is_empty());

    let last = trace.steps.last().expect("at least one step");
    assert_eq!(last.corners, traced);
}
