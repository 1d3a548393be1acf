use crate::Vec2;
use bridgeboard_core::{EdgeId, EdgeRejected, NodeId};
use serde::{Deserialize, Serialize};

/// A graph node: a draggable labeled disc on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    pub pos: Vec2,
}

/// An undirected edge between two nodes. The `u`/`v` order carries no meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub id: EdgeId,
    pub u: NodeId,
    pub v: NodeId,
}

/// Mutable collections of nodes and edges with stable, monotonically
/// assigned identifiers.
///
/// Invariants upheld by every operation:
/// - no self-loops, no parallel edges (rejected at creation);
/// - no dangling endpoints (node removal cascades to incident edges);
/// - id counters only increase, resetting solely on [`GraphStore::clear`].
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct GraphStore {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    next_node_id: u64,
    next_edge_id: u64,
}

impl GraphStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a node at `pos`, assigning the next node id. Always succeeds.
    pub fn add_node(&mut self, pos: Vec2) -> NodeId {
        let id = NodeId(self.next_node_id);
        self.next_node_id += 1;
        self.nodes.push(Node { id, pos });
        id
    }

    /// Create an edge between `u` and `v`.
    ///
    /// Rejected as a no-op when `u == v` or when an edge already joins the
    /// pair in either orientation.
    pub fn add_edge(&mut self, u: NodeId, v: NodeId) -> Result<EdgeId, EdgeRejected> {
        if u == v {
            return Err(EdgeRejected::SelfLoop(u));
        }
        if self.edge_exists(u, v) {
            return Err(EdgeRejected::Duplicate(u, v));
        }
        let id = EdgeId(self.next_edge_id);
        self.next_edge_id += 1;
        self.edges.push(Edge { id, u, v });
        Ok(id)
    }

    /// Remove a node and every edge incident to it.
    pub fn remove_node(&mut self, id: NodeId) {
        self.nodes.retain(|n| n.id != id);
        self.edges.retain(|e| e.u != id && e.v != id);
    }

    /// Remove a single edge.
    pub fn remove_edge(&mut self, id: EdgeId) {
        self.edges.retain(|e| e.id != id);
    }

    /// Empty both collections and reset both id counters to zero.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.edges.clear();
        self.next_node_id = 0;
        self.next_edge_id = 0;
    }

    /// Order-independent check for an edge joining `a` and `b`.
    pub fn edge_exists(&self, a: NodeId, b: NodeId) -> bool {
        self.edges
            .iter()
            .any(|e| (e.u == a && e.v == b) || (e.u == b && e.v == a))
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.iter_mut().find(|n| n.id == id)
    }

    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.iter().find(|e| e.id == id)
    }

    /// Nodes in insertion order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Edges in insertion order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    /// A random script of store operations.
    #[derive(Debug, Clone)]
    enum Op {
        AddNode(f32, f32),
        AddEdge(usize, usize),
        RemoveNode(usize),
        RemoveEdge(usize),
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            (0.0f32..800.0, 0.0f32..600.0).prop_map(|(x, y)| Op::AddNode(x, y)),
            (0usize..16, 0usize..16).prop_map(|(a, b)| Op::AddEdge(a, b)),
            (0usize..16).prop_map(Op::RemoveNode),
            (0usize..16).prop_map(Op::RemoveEdge),
        ]
    }

    fn run_script(ops: &[Op]) -> GraphStore {
        let mut store = GraphStore::new();
        for op in ops {
            match *op {
                Op::AddNode(x, y) => {
                    store.add_node(Vec2::new(x, y));
                }
                Op::AddEdge(a, b) => {
                    let nodes = store.nodes();
                    if !nodes.is_empty() {
                        let u = nodes[a % nodes.len()].id;
                        let v = nodes[b % nodes.len()].id;
                        let _ = store.add_edge(u, v);
                    }
                }
                Op::RemoveNode(i) => {
                    if let Some(n) = store.nodes().get(i % store.node_count().max(1)) {
                        let id = n.id;
                        store.remove_node(id);
                    }
                }
                Op::RemoveEdge(i) => {
                    if let Some(e) = store.edges().get(i % store.edge_count().max(1)) {
                        let id = e.id;
                        store.remove_edge(id);
                    }
                }
            }
        }
        store
    }

    proptest! {
        /// No reachable store state contains a self-loop, a parallel edge,
        /// or a dangling endpoint.
        #[test]
        fn prop_store_invariants_hold(ops in proptest::collection::vec(op_strategy(), 0..64)) {
            let store = run_script(&ops);

            for (i, e) in store.edges().iter().enumerate() {
                prop_assert_ne!(e.u, e.v, "self-loop at edge {}", i);
                prop_assert!(store.node(e.u).is_some(), "dangling u on edge {}", i);
                prop_assert!(store.node(e.v).is_some(), "dangling v on edge {}", i);
                for other in &store.edges()[i + 1..] {
                    prop_assert!(
                        !((other.u == e.u && other.v == e.v) || (other.u == e.v && other.v == e.u)),
                        "parallel edge between {} and {}",
                        e.u,
                        e.v
                    );
                }
            }
        }

        /// Assigned ids strictly increase in creation order.
        #[test]
        fn prop_ids_strictly_increase(ops in proptest::collection::vec(op_strategy(), 0..64)) {
            let store = run_script(&ops);

            for pair in store.nodes().windows(2) {
                prop_assert!(pair[0].id < pair[1].id);
            }
            for pair in store.edges().windows(2) {
                prop_assert!(pair[0].id < pair[1].id);
            }
        }
    }
}
