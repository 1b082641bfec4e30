use super::*;
use crate::scene::Scene;

fn ok(src: &str) -> ParsedGraph {
    parse(src, &LayoutConfig::new()).unwrap()
}

fn err(src: &str) -> ParseError {
    parse(src, &LayoutConfig::new()).unwrap_err()
}

fn size(p: &ParsedGraph, name: &str) -> (i64, i64) {
    let b = p.scene.bounds(&p.node(name).unwrap()).unwrap();
    (b.width, b.height)
}

// ── Declarations ─────────────────────────────────────────────────────────

#[test]
fn test_declared_sizes() {
    let p = ok("A [120x40]\nB [ 60 x 20 ]\n");
    assert_eq!(size(&p, "A"), (120, 40));
    assert_eq!(size(&p, "B"), (60, 20));
    assert_eq!(p.graph.edge_count(), 0);
}

#[test]
fn test_bare_declaration_gets_default_size() {
    let config = LayoutConfig {
        default_node_width: 11,
        default_node_height: 7,
        ..LayoutConfig::new()
    };
    let p = parse("lonely", &config).unwrap();
    assert_eq!(size(&p, "lonely"), (11, 7));
}

#[test]
fn test_later_declaration_resizes() {
    let p = ok("A -> B\nB [5x6]\n");
    assert_eq!(size(&p, "A"), (80, 30));
    assert_eq!(size(&p, "B"), (5, 6));
    assert_eq!(p.graph.node_count(), 2);
}

// ── Edges ────────────────────────────────────────────────────────────────

#[test]
fn test_both_arrow_styles() {
    let p = ok("A -> B\nB-->C\n");
    assert_eq!(p.graph.edge_count(), 2);
    let (a, b) = (p.node("A").unwrap(), p.node("B").unwrap());
    assert!(p.graph.find_edge(a, b).is_some());
}

#[test]
fn test_edge_chain() {
    let p = ok("A -> B -> C");
    assert_eq!(p.graph.edge_count(), 2);
    let names: Vec<&str> = p.names().collect();
    assert_eq!(names, vec!["A", "B", "C"]);
}

#[test]
fn test_comments_and_blank_lines() {
    let p = ok("# header\n\n  A [1x2]  # trailing\n   \nA -> B # edge\n");
    assert_eq!(p.graph.node_count(), 2);
    assert_eq!(p.graph.edge_count(), 1);
    assert_eq!(size(&p, "A"), (1, 2));
}

#[test]
fn test_node_names_roundtrip() {
    let p = ok("left.top -> right_2");
    let idx = p.node("right_2").unwrap();
    assert_eq!(p.name(idx), "right_2");
    assert!(p.node("missing").is_none());
}

// ── Errors ───────────────────────────────────────────────────────────────

#[test]
fn test_size_on_edge_rejected_with_line() {
    match err("A [1x1]\nB -> C [60x20]\n") {
        ParseError::Syntax { line, message } => {
            assert_eq!(line, 2);
            assert!(message.contains("declarations"));
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn test_missing_endpoint() {
    assert!(matches!(err("A ->"), ParseError::Syntax { line: 1, .. }));
}

#[test]
fn test_garbage_line() {
    let e = err("A\nB\nwhat is this?\n");
    assert!(matches!(e, ParseError::Syntax { line: 3, .. }));
    assert!(e.to_string().starts_with("line 3:"));
}

#[test]
fn test_oversized_dimension() {
    let e = err("A [99999999999999999999x1]");
    assert!(e.to_string().contains("out of range"));
}
