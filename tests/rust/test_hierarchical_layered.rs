use super::*;
use crate::geometry::{Rect, Size};
use crate::layout::hierarchical::directed::VertexKind;
use crate::scene::MemoryScene;
use petgraph::graph::{DiGraph, EdgeIndex, NodeIndex};

type Fixture = (DiGraph<&'static str, ()>, DirectedGraph<NodeIndex, EdgeIndex>);

fn directed(nodes: &[&'static str], edges: &[(&str, &str)]) -> Fixture {
    let mut g = DiGraph::new();
    let mut scene = MemoryScene::new();
    for name in nodes {
        let idx = g.add_node(*name);
        scene.insert(idx, Rect::sized(10, 10));
    }
    for (a, b) in edges {
        let ia = g.node_indices().find(|i| g[*i] == *a).unwrap();
        let ib = g.node_indices().find(|i| g[*i] == *b).unwrap();
        g.add_edge(ia, ib, ());
    }
    let dg = DirectedGraph::build(&g, &scene);
    (g, dg)
}

fn layer_of<E: Clone + std::fmt::Debug>(
    g: &DiGraph<&'static str, ()>,
    lg: &LayeredGraph<NodeIndex, E>,
    name: &str,
) -> i32 {
    let idx = g.node_indices().find(|i| g[*i] == name).unwrap();
    let v = lg.graph().vertex_of(&idx).unwrap();
    lg.vertex(v).layer
}

fn assert_ranks_consistent<E: Clone + std::fmt::Debug>(lg: &LayeredGraph<NodeIndex, E>) {
    for (l, layer) in lg.layers().iter().enumerate() {
        for (i, &v) in layer.iter().enumerate() {
            assert_eq!(lg.vertex(v).x, i as i32 + 1);
            assert_eq!(lg.vertex(v).layer, l as i32);
        }
    }
}

// ── Layering ─────────────────────────────────────────────────────────────

#[test]
fn test_longest_path_layers() {
    let (g, dg) = directed(&["A", "B", "C"], &[("A", "B"), ("B", "C"), ("A", "C")]);
    let lg = LayeredGraph::layer(dg).unwrap();
    assert_eq!(layer_of(&g, &lg, "A"), 0);
    assert_eq!(layer_of(&g, &lg, "B"), 1);
    assert_eq!(layer_of(&g, &lg, "C"), 2);
    assert_eq!(lg.layer_count(), 3);
}

#[test]
fn test_every_edge_points_down() {
    let (_, dg) = directed(
        &["A", "B", "C", "D", "E"],
        &[("A", "B"), ("B", "C"), ("A", "D"), ("D", "C"), ("E", "C"), ("C", "A")],
    );
    let lg = LayeredGraph::layer(dg).unwrap();
    let graph = lg.graph();
    for e in graph.edges() {
        let (s, t) = graph.endpoints(e).unwrap();
        assert!(graph.vertex(t).layer > graph.vertex(s).layer);
    }
}

#[test]
fn test_disconnected_roots_share_layer_zero() {
    let (g, dg) = directed(&["A", "B", "C"], &[("B", "C")]);
    let lg = LayeredGraph::layer(dg).unwrap();
    assert_eq!(layer_of(&g, &lg, "A"), 0);
    assert_eq!(layer_of(&g, &lg, "B"), 0);
    assert_eq!(lg.layer_vertices(0).len(), 2);
    assert_ranks_consistent(&lg);
}

#[test]
fn test_cyclic_model_is_rejected() {
    let mut dg: DirectedGraph<&str, ()> = DirectedGraph::new();
    let a = dg.add_vertex(Vertex::real("A", Size::ZERO));
    let b = dg.add_vertex(Vertex::real("B", Size::ZERO));
    dg.add_edge(a, b, LayoutEdge::new(()));
    dg.add_edge(b, a, LayoutEdge::new(()));
    assert!(matches!(
        LayeredGraph::layer(dg),
        Err(LayoutError::Internal(_))
    ));
}

#[test]
fn test_empty_graph_has_no_layers() {
    let (_, dg) = directed(&[], &[]);
    let lg = LayeredGraph::create(dg).unwrap();
    assert_eq!(lg.layer_count(), 0);
}

// ── Layer bookkeeping ────────────────────────────────────────────────────

#[test]
fn test_assign_layer_moves_and_renumbers() {
    let (g, dg) = directed(&["A", "B", "C"], &[]);
    let mut lg = LayeredGraph::layer(dg).unwrap();
    let a = lg.graph().vertex_of(&g.node_indices().next().unwrap()).unwrap();
    lg.assign_layer(a, 2);
    assert_eq!(lg.layer_count(), 3);
    assert_eq!(lg.layer_vertices(0).len(), 2);
    assert!(lg.layer_vertices(1).is_empty());
    assert_eq!(lg.layer_vertices(2), &[a]);
    assert_ranks_consistent(&lg);
}

#[test]
fn test_set_layer_order_renumbers() {
    let (_, dg) = directed(&["A", "B", "C"], &[]);
    let mut lg = LayeredGraph::layer(dg).unwrap();
    let mut order = lg.layer_vertices(0).to_vec();
    order.reverse();
    lg.set_layer_order(0, order.clone());
    assert_eq!(lg.layer_vertices(0), order.as_slice());
    assert_ranks_consistent(&lg);
}

// ── Dummy vertices ───────────────────────────────────────────────────────

#[test]
fn test_long_edge_split_into_single_layer_segments() {
    let (_, dg) = directed(
        &["A", "B", "C", "D"],
        &[("A", "B"), ("B", "C"), ("C", "D"), ("A", "D")],
    );
    let lg = LayeredGraph::create(dg).unwrap();
    let graph = lg.graph();
    // A -> D spans three layers: two bends
    assert_eq!(graph.vertex_count(), 6);
    assert_eq!(graph.edge_count(), 3 + 3);
    for e in graph.edges() {
        let (s, t) = graph.endpoints(e).unwrap();
        assert_eq!(graph.vertex(t).layer - graph.vertex(s).layer, 1);
    }
    assert_ranks_consistent(&lg);
}

#[test]
fn test_dummy_count_and_kind() {
    let (_, dg) = directed(&["A", "B", "C"], &[("A", "B"), ("B", "C"), ("A", "C")]);
    let mut lg = LayeredGraph::layer(dg).unwrap();
    assert_eq!(lg.insert_dummy_vertices(), 1);
    let dummy = lg.layer_vertices(1)[1];
    assert_eq!(lg.vertex(dummy).kind, VertexKind::Dummy(DummyKind::Bend));
    assert_eq!(lg.vertex(dummy).size, Size::ZERO);
    // a second pass finds nothing left to split
    assert_eq!(lg.insert_dummy_vertices(), 0);
}

#[test]
fn test_segments_point_back_to_split_edge() {
    let (g, dg) = directed(&["A", "B", "C"], &[("A", "B"), ("B", "C"), ("A", "C")]);
    let lg = LayeredGraph::create(dg).unwrap();
    let graph = lg.graph();
    let a = graph.vertex_of(&g.node_indices().next().unwrap()).unwrap();
    let c = graph.vertex_of(&g.node_indices().nth(2).unwrap()).unwrap();
    let view_edge = g
        .find_edge(g.node_indices().next().unwrap(), g.node_indices().nth(2).unwrap())
        .unwrap();

    let segments: Vec<_> = graph
        .edges()
        .into_iter()
        .filter_map(|e| match &graph.edge(e).origin {
            EdgeOrigin::Split(split) => Some(split.clone()),
            EdgeOrigin::View(_) => None,
        })
        .collect();
    assert_eq!(segments.len(), 2);
    for split in segments {
        assert_eq!(split.source, a);
        assert_eq!(split.target, c);
        assert_eq!(split.edge, view_edge);
    }
}

#[test]
fn test_segments_keep_reversed_flag() {
    // C -> A closes the cycle and is reversed into A -> C, which spans two layers
    let (_, dg) = directed(&["A", "B", "C"], &[("A", "B"), ("B", "C"), ("C", "A")]);
    let lg = LayeredGraph::create(dg).unwrap();
    let graph = lg.graph();
    let split: Vec<bool> = graph
        .edges()
        .into_iter()
        .filter(|&e| matches!(graph.edge(e).origin, EdgeOrigin::Split(_)))
        .map(|e| graph.edge(e).reversed)
        .collect();
    assert_eq!(split, vec![true, true]);
}
