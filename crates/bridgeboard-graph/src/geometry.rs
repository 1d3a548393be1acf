//! Point/segment distance math and the hit-testing predicates used for
//! selection and drag initiation.

use crate::Vec2;
use crate::store::{Edge, GraphStore, Node};

/// Visual radius of a node disc, which doubles as its hit radius.
pub const NODE_RADIUS: f32 = 20.0;

/// Maximum distance (in pixels) from an edge segment that still counts
/// as a hit when selecting edges.
pub const EDGE_HIT_TOLERANCE: f32 = 6.0;

/// Euclidean distance between two points.
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    (a.x - b.x).hypot(a.y - b.y)
}

/// Minimum distance from `p` to the closed segment `[a, b]`.
///
/// Computed via the projection parameter clamped to `[0, 1]`. A degenerate
/// segment (`a == b`) is treated as a point, so there is no division by zero.
pub fn point_to_segment_distance(p: Vec2, a: Vec2, b: Vec2) -> f32 {
    let ap = p - a;
    let ab = b - a;

    let len_sq = ab.x * ab.x + ab.y * ab.y;
    let t = if len_sq == 0.0 {
        0.0
    } else {
        ((ap.x * ab.x + ap.y * ab.y) / len_sq).clamp(0.0, 1.0)
    };

    let closest = Vec2::new(a.x + t * ab.x, a.y + t * ab.y);
    distance(p, closest)
}

/// First node in store order whose center lies within `radius` of `p`.
/// Absence is a normal, expected result.
pub fn find_node_at(nodes: &[Node], p: Vec2, radius: f32) -> Option<&Node> {
    nodes.iter().find(|n| distance(n.pos, p) < radius)
}

/// First edge in store order whose segment lies within `tolerance` of `p`.
///
/// Edges with a missing endpoint are skipped rather than failing; the store
/// invariants make that unreachable, but hit testing must never crash on it.
pub fn find_edge_near<'a>(store: &'a GraphStore, p: Vec2, tolerance: f32) -> Option<&'a Edge> {
    store.edges().iter().find(|e| {
        match (store.node(e.u), store.node(e.v)) {
            (Some(u), Some(v)) => point_to_segment_distance(p, u.pos, v.pos) <= tolerance,
            _ => false,
        }
    })
}
