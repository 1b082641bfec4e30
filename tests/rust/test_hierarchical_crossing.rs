use super::*;
use crate::geometry::Rect;
use crate::layout::hierarchical::directed::DirectedGraph;
use crate::scene::MemoryScene;
use petgraph::graph::{DiGraph, EdgeIndex, NodeIndex};

struct Fixture {
    g: DiGraph<&'static str, ()>,
    lg: LayeredGraph<NodeIndex, EdgeIndex>,
}

impl Fixture {
    fn new(nodes: &[&'static str], edges: &[(&str, &str)]) -> Self {
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
        let lg = LayeredGraph::create(DirectedGraph::build(&g, &scene)).unwrap();
        Fixture { g, lg }
    }

    fn v(&self, name: &str) -> VertexId {
        let idx = self.g.node_indices().find(|i| self.g[*i] == name).unwrap();
        self.lg.graph().vertex_of(&idx).unwrap()
    }

    fn names(&self, layer: usize) -> Vec<&'static str> {
        self.lg
            .layer_vertices(layer)
            .iter()
            .map(|&v| self.g[*self.lg.vertex(v).node().unwrap()])
            .collect()
    }

    fn assert_ranks_consistent(&self) {
        for layer in self.lg.layers() {
            let xs: Vec<i32> = layer.iter().map(|&v| self.lg.vertex(v).x).collect();
            let expected: Vec<i32> = (1..=layer.len() as i32).collect();
            assert_eq!(xs, expected);
        }
    }
}

// ── Counting ─────────────────────────────────────────────────────────────

#[test]
fn test_count_single_crossing() {
    let f = Fixture::new(&["A", "B", "C", "D"], &[("A", "D"), ("B", "C")]);
    assert_eq!(f.names(1), vec!["C", "D"]);
    assert_eq!(count_crossings(&f.lg), 1);
}

#[test]
fn test_shared_endpoints_do_not_cross() {
    let f = Fixture::new(&["A", "B", "C"], &[("A", "C"), ("B", "C")]);
    assert_eq!(count_crossings(&f.lg), 0);
}

// ── Barycenters ──────────────────────────────────────────────────────────

#[test]
fn test_barycenter_is_mean_rank() {
    let f = Fixture::new(&["A", "B", "C"], &[("A", "C"), ("B", "C")]);
    assert_eq!(barycenter(&f.lg, f.v("C"), Side::Upper), Some(1.5));
    assert_eq!(barycenter(&f.lg, f.v("A"), Side::Lower), Some(1.0));
}

#[test]
fn test_barycenter_without_neighbors_is_none() {
    let f = Fixture::new(&["A", "B"], &[]);
    assert_eq!(barycenter(&f.lg, f.v("A"), Side::Upper), None);
    assert_eq!(barycenter(&f.lg, f.v("A"), Side::Lower), None);
}

#[test]
fn test_neighborless_vertex_keeps_its_rank() {
    // Z has no lower neighbor; its key is its own rank, 3
    let mut f = Fixture::new(
        &["A", "B", "Z", "C", "D"],
        &[("A", "D"), ("B", "C")],
    );
    assert_eq!(f.names(0), vec!["A", "B", "Z"]);
    reorder(&mut f.lg, 0, Side::Lower, Ties::Keep);
    assert_eq!(f.names(0), vec!["B", "A", "Z"]);
    f.assert_ranks_consistent();
}

// ── Sorting ──────────────────────────────────────────────────────────────

#[test]
fn test_bubble_sort_is_stable() {
    let ids: Vec<VertexId> = (0..4).map(VertexId::new).collect();
    let keyed = vec![(ids[0], 2.0), (ids[1], 1.0), (ids[2], 2.0), (ids[3], 1.0)];
    assert_eq!(
        bubble_sort(keyed, Ties::Keep),
        vec![ids[1], ids[3], ids[0], ids[2]]
    );
}

#[test]
fn test_bubble_sort_reverses_ties() {
    let ids: Vec<VertexId> = (0..4).map(VertexId::new).collect();
    let keyed = vec![(ids[0], 2.0), (ids[1], 1.0), (ids[2], 2.0), (ids[3], 1.0)];
    assert_eq!(
        bubble_sort(keyed, Ties::Reverse),
        vec![ids[3], ids[1], ids[2], ids[0]]
    );
}

#[test]
fn test_bubble_sort_empty() {
    assert!(bubble_sort(Vec::new(), Ties::Keep).is_empty());
}

// ── Minimization ─────────────────────────────────────────────────────────

#[test]
fn test_crossing_removed() {
    let mut f = Fixture::new(&["A", "B", "C", "D"], &[("A", "D"), ("B", "C")]);
    BarycenterCrossingMinimizer.minimize_crossings(&mut f.lg);
    assert_eq!(count_crossings(&f.lg), 0);
    f.assert_ranks_consistent();
}

#[test]
fn test_diamond_has_no_crossings() {
    let mut f = Fixture::new(
        &["A", "B", "C", "D"],
        &[("A", "B"), ("A", "C"), ("B", "D"), ("C", "D")],
    );
    BarycenterCrossingMinimizer.minimize_crossings(&mut f.lg);
    assert_eq!(count_crossings(&f.lg), 0);
    assert_eq!(f.names(0), vec!["A"]);
    assert_eq!(f.names(2), vec!["D"]);
    f.assert_ranks_consistent();
}

#[test]
fn test_chain_is_stable() {
    let mut f = Fixture::new(&["A", "B", "C"], &[("A", "B"), ("B", "C")]);
    BarycenterCrossingMinimizer.minimize_crossings(&mut f.lg);
    let first: Vec<_> = (0..3).map(|l| f.names(l)).collect();
    BarycenterCrossingMinimizer.minimize_crossings(&mut f.lg);
    let second: Vec<_> = (0..3).map(|l| f.names(l)).collect();
    assert_eq!(first, second);
    assert_eq!(count_crossings(&f.lg), 0);
}

#[test]
fn test_two_chains_untangled() {
    // A-B-C and D-E-F, wired so the middle layer starts crossed
    let mut f = Fixture::new(
        &["A", "D", "E", "B", "C", "F"],
        &[("A", "B"), ("B", "C"), ("D", "E"), ("E", "F")],
    );
    assert!(count_crossings(&f.lg) > 0);
    BarycenterCrossingMinimizer.minimize_crossings(&mut f.lg);
    assert_eq!(count_crossings(&f.lg), 0);
    f.assert_ranks_consistent();
}
