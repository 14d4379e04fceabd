use nav_mesh::{
    decompose, shared_boundary, EdgeTarget, GeometryError, GridOccupancy, NavRect, Vec2,
};

fn rect(sx: i32, sy: i32, width: i32, height: i32) -> NavRect {
    NavRect::new(sx, sy, width, height, 0, 0)
}

#[test]
fn flush_vertical_boundary_produces_clipped_segment() {
    let a = rect(0, 0, 2, 4);
    let b = rect(2, 1, 3, 2);

    let boundary = shared_boundary(&a, &b)
        .expect("valid pair")
        .expect("flush pair");

    // Overlap of the y projections, clipped to the flush line x = 2.
    assert_eq!(boundary.left, Vec2::new(2.0, 1.0));
    assert_eq!(boundary.right, Vec2::new(2.0, 3.0));
    // Centers: (1, 2) and (3, 2).
    assert_eq!(boundary.cost, 2);
}

#[test]
fn boundary_is_symmetric() {
    let a = rect(0, 0, 2, 2);
    let b = rect(2, 0, 2, 2);

    let ab = shared_boundary(&a, &b).expect("valid").expect("flush");
    let ba = shared_boundary(&b, &a).expect("valid").expect("flush");

    assert_eq!(ab.left, ba.left);
    assert_eq!(ab.right, ba.right);
    assert_eq!(ab.cost, ba.cost);
}

#[test]
fn corner_contact_yields_no_edge() {
    let a = rect(0, 0, 2, 2);
    let b = rect(2, 2, 2, 2);
    assert_eq!(shared_boundary(&a, &b).expect("valid"), None);
}

#[test]
fn separated_rects_yield_no_edge() {
    let a = rect(0, 0, 2, 2);
    let b = rect(5, 0, 2, 2);
    assert_eq!(shared_boundary(&a, &b).expect("valid"), None);
}

#[test]
fn different_layers_never_connect() {
    let a = rect(0, 0, 2, 2);
    let mut b = rect(2, 0, 2, 2);
    b.layer = 1;
    assert_eq!(shared_boundary(&a, &b).expect("valid"), None);
}

#[test]
fn real_overlap_is_a_fatal_geometry_error() {
    let a = rect(0, 0, 4, 4);
    let b = rect(1, 1, 2, 2);
    assert!(matches!(
        shared_boundary(&a, &b),
        Err(GeometryError::RealOverlap(_, _))
    ));
}

#[test]
fn intra_chunk_edges_are_mutual() {
    let mut grid = GridOccupancy::new(3);
    grid.set_blocked(1, 1, true);

    let mut rects = decompose(&grid, 0);
    nav_mesh::edge::build_edges(&mut rects).expect("consistent decomposition");

    // Expected adjacency for the four rects around the obstacle:
    // top strip <-> both columns, both columns <-> bottom cell.
    let degree: Vec<usize> = rects.iter().map(|r| r.edges.len()).collect();
    assert_eq!(degree, vec![2, 2, 2, 2]);

    for r in &rects {
        for edge in &r.edges {
            let EdgeTarget::Local(to) = edge.target else {
                panic!("intra-chunk pass produced a remote edge");
            };
            let back = &rects[to as usize];
            assert!(
                back.edges
                    .iter()
                    .any(|e| e.target == EdgeTarget::Local(r.id)
                        && e.cost == edge.cost
                        && e.left == edge.left
                        && e.right == edge.right),
                "missing mirrored edge {to} -> {}",
                r.id
            );
        }
    }
}

#[test]
fn heuristic_never_exceeds_edge_costs() {
    let mut grid = GridOccupancy::new(3);
    grid.set_blocked(1, 1, true);

    let mut rects = decompose(&grid, 0);
    nav_mesh::edge::build_edges(&mut rects).expect("consistent decomposition");

    // Direct edges: the estimate equals the cost by construction.
    for r in &rects {
        for edge in &r.edges {
            let EdgeTarget::Local(to) = edge.target else {
                continue;
            };
            assert!(r.manhattan(&rects[to as usize]) <= edge.cost);
        }
    }

    // Two hops: triangle inequality keeps the estimate under the path cost.
    // Rect 0 (top strip) reaches rect 3 (bottom cell) via either column.
    let via_left = rects[0].edges[0].cost + rects[1].edges[1].cost;
    assert!(rects[0].manhattan(&rects[3]) <= via_left);
}
