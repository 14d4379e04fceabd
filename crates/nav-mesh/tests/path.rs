use nav_mesh::{GridOccupancy, NavChunk, NavGraph, NavPoint, Vec2};

/// 8x8 chunk with a wall on column 4, single gap at the bottom row.
fn walled_chunk() -> NavChunk {
    let mut grid = GridOccupancy::new(8);
    for y in 0..7 {
        grid.set_blocked(4, y, true);
    }
    NavChunk::build(0, 0, &grid).expect("chunk bakes")
}

#[test]
fn path_routes_through_the_gap() {
    let mut graph = NavGraph::new(8);
    graph.load_chunk(walled_chunk()).expect("load");

    let start = NavPoint::new(1.0, 1.0, 0);
    let end = NavPoint::new(7.0, 1.0, 0);
    let path = graph.find_path(start, end).expect("path exists");

    assert_eq!(path.points.first().copied(), Some(Vec2::new(1.0, 1.0)));
    assert_eq!(path.points.last().copied(), Some(Vec2::new(7.0, 1.0)));
    // The taut path hugs the gap's two doorway corners.
    assert_eq!(
        path.points,
        vec![
            Vec2::new(1.0, 1.0),
            Vec2::new(4.0, 7.0),
            Vec2::new(5.0, 7.0),
            Vec2::new(7.0, 1.0),
        ]
    );
}

#[test]
fn full_wall_means_no_path() {
    let mut grid = GridOccupancy::new(8);
    for y in 0..8 {
        grid.set_blocked(4, y, true);
    }
    let mut graph = NavGraph::new(8);
    graph
        .load_chunk(NavChunk::build(0, 0, &grid).expect("chunk bakes"))
        .expect("load");

    let start = NavPoint::new(1.0, 1.0, 0);
    let end = NavPoint::new(7.0, 1.0, 0);
    assert!(graph.find_path(start, end).is_none());
}

#[test]
fn points_outside_the_mesh_resolve_to_no_path() {
    let mut graph = NavGraph::new(8);
    graph.load_chunk(walled_chunk()).expect("load");

    // Inside a blocked cell.
    let blocked = NavPoint::new(4.5, 3.5, 0);
    let open = NavPoint::new(1.0, 1.0, 0);
    assert!(graph.find_path(blocked, open).is_none());
    assert!(graph.find_path(open, blocked).is_none());

    // In an unloaded chunk.
    let far = NavPoint::new(100.0, 100.0, 0);
    assert!(graph.find_path(open, far).is_none());

    // Wrong layer.
    let wrong_layer = NavPoint::new(7.0, 1.0, 1);
    assert!(graph.find_path(open, wrong_layer).is_none());
}

#[test]
fn same_rectangle_query_is_a_direct_path() {
    let mut graph = NavGraph::new(8);
    graph.load_chunk(walled_chunk()).expect("load");

    let start = NavPoint::new(1.0, 1.0, 0);
    let end = NavPoint::new(2.5, 6.5, 0);
    let path = graph.find_path(start, end).expect("trivial path");
    assert_eq!(
        path.points,
        vec![Vec2::new(1.0, 1.0), Vec2::new(2.5, 6.5)]
    );
}

#[test]
fn queries_leave_the_graph_untouched() {
    let mut graph = NavGraph::new(8);
    graph.load_chunk(walled_chunk()).expect("load");

    let degrees = |graph: &NavGraph| -> Vec<usize> {
        graph
            .chunk(0, 0)
            .expect("loaded")
            .rects
            .iter()
            .map(|r| r.edges.len())
            .collect()
    };

    let before = degrees(&graph);
    let start = NavPoint::new(1.0, 1.0, 0);
    let end = NavPoint::new(7.0, 1.0, 0);

    let a = graph.find_path(start, end).expect("path");
    let b = graph.find_path(start, end).expect("path");

    // Synthetic start/end edges are query-local: identical results, no
    // growth in any rectangle's permanent edge list.
    assert_eq!(a, b);
    assert_eq!(degrees(&graph), before);
}

#[test]
fn path_crosses_chunk_boundaries() {
    let mut graph = NavGraph::new(8);
    let free = GridOccupancy::new(8);
    graph
        .load_chunk(NavChunk::build(0, 0, &free).expect("bake"))
        .expect("load");
    graph
        .load_chunk(NavChunk::build(1, 0, &free).expect("bake"))
        .expect("load");

    let start = NavPoint::new(2.0, 2.0, 0);
    let end = NavPoint::new(14.0, 2.0, 0);
    let path = graph.find_path(start, end).expect("path exists");

    // Straight shot through the shared boundary, no interior corners.
    assert_eq!(
        path.points,
        vec![Vec2::new(2.0, 2.0), Vec2::new(14.0, 2.0)]
    );

    // Neighboring start/end rects collapse to one direct synthetic edge.
    let corridor = graph.corridor(start, end).expect("corridor");
    assert_eq!(corridor.len(), 1);

    // Unloading the destination chunk cuts the route.
    graph.unload_chunk(1, 0);
    assert!(graph.find_path(start, end).is_none());
}
