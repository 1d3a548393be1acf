//! The interactive editing state machine.
//!
//! [`EditorSession`] is the single context object holding the graph store,
//! tool state, selection, gesture tracking, and the bridge highlight set.
//! All transitions run to completion per event; the only asynchrony in the
//! system is the bridge query, which re-enters through
//! [`EditorSession::apply_bridge_result`] with a generation check.

use bridgeboard_core::protocol::BridgeRequest;
use bridgeboard_core::{EdgeId, EdgeRejected, NodeId, NodePair, Selection, ToolMode};
use bridgeboard_graph::scene::{self, Scene, SceneInput};
use bridgeboard_graph::{EDGE_HIT_TOLERANCE, GraphStore, NODE_RADIUS, Vec2, geometry};
use tracing::{debug, info, warn};

/// Outcome banner for the most recent bridge classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BridgeStatus {
    /// Nothing to report: initial state, explicit clear, or invalidation
    /// by a graph mutation.
    #[default]
    Cleared,
    /// A classification is on its way; shown right after random generation.
    Checking,
    HasBridges,
    NoBridges,
}

/// One interaction event. Transitions are enumerable: every way the editor
/// state can change outside of a bridge response goes through
/// [`EditorSession::handle`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EditorEvent {
    PointerDown(Vec2),
    PointerMoved(Vec2),
    PointerUp(Vec2),
    PointerLeft,
    KeyEscape,
    KeyDelete,
    SelectTool(ToolMode),
    Clear,
}

/// A bridge query handed to the adapter, pinned to the graph generation it
/// was issued against. Responses for older generations are discarded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingQuery {
    pub generation: u64,
    pub request: BridgeRequest,
}

#[derive(Debug, Clone, Copy)]
struct DragState {
    node: NodeId,
    /// Offset between the pointer and the node center at pointer-down.
    offset: Vec2,
    /// Whether any movement happened; suppresses the click on pointer-up.
    moved: bool,
}

#[derive(Debug, Default)]
pub struct EditorSession {
    store: GraphStore,
    tool: ToolMode,
    selection: Option<Selection>,
    connector_start: Option<NodeId>,
    drag: Option<DragState>,
    pointer: Option<Vec2>,
    bridges: Vec<NodePair>,
    status: BridgeStatus,
    /// Bumped on every graph mutation; bridge results carry the generation
    /// they were computed against and are dropped on mismatch.
    generation: u64,
}

impl EditorSession {
    pub fn new() -> Self {
        Self::default()
    }

    // -- Read access --

    pub fn store(&self) -> &GraphStore {
        &self.store
    }

    pub fn tool(&self) -> ToolMode {
        self.tool
    }

    pub fn selection(&self) -> Option<Selection> {
        self.selection
    }

    pub fn connector_start(&self) -> Option<NodeId> {
        self.connector_start
    }

    pub fn bridges(&self) -> &[NodePair] {
        &self.bridges
    }

    pub fn status(&self) -> BridgeStatus {
        self.status
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Drawable scene for the current state. Pure; call freely.
    pub fn scene(&self) -> Scene {
        scene::describe(&SceneInput {
            store: &self.store,
            selection: self.selection,
            tool: self.tool,
            connector_start: self.connector_start,
            bridges: &self.bridges,
            pointer: self.pointer,
            dragging: self.drag.is_some(),
        })
    }

    // -- Event dispatch --

    /// Run one event to completion. Returns true when a repaint is wanted.
    pub fn handle(&mut self, event: EditorEvent) -> bool {
        match event {
            EditorEvent::PointerDown(pos) => {
                self.pointer_down(pos);
                true
            }
            EditorEvent::PointerMoved(pos) => self.pointer_moved(pos),
            EditorEvent::PointerUp(pos) => {
                self.pointer_up(pos);
                true
            }
            EditorEvent::PointerLeft => {
                self.pointer_left();
                true
            }
            EditorEvent::KeyEscape => {
                self.escape();
                true
            }
            EditorEvent::KeyDelete => {
                self.delete_selected();
                true
            }
            EditorEvent::SelectTool(tool) => {
                self.set_tool(tool);
                true
            }
            EditorEvent::Clear => {
                self.clear();
                true
            }
        }
    }

    // -- Tool switching --

    /// Switch the active tool. Clears selection and any pending connector
    /// start; never mutates the graph.
    pub fn set_tool(&mut self, tool: ToolMode) {
        self.tool = tool;
        self.selection = None;
        self.connector_start = None;
    }

    /// Escape: drop back to the select-only tool and cancel everything
    /// in progress.
    pub fn escape(&mut self) {
        self.set_tool(ToolMode::Select);
    }

    // -- Pointer gestures --

    /// Begin an exclusive drag gesture if a node sits under the pointer.
    pub fn pointer_down(&mut self, pos: Vec2) {
        self.pointer = Some(pos);
        if let Some(node) = geometry::find_node_at(self.store.nodes(), pos, NODE_RADIUS) {
            self.drag = Some(DragState {
                node: node.id,
                offset: pos - node.pos,
                moved: false,
            });
        }
    }

    /// Track the pointer; while a drag is active, move the dragged node to
    /// `pos - offset` (no bounds clamping). Returns true when the move
    /// warrants a repaint.
    pub fn pointer_moved(&mut self, pos: Vec2) -> bool {
        self.pointer = Some(pos);
        if let Some(drag) = &mut self.drag {
            let target = pos - drag.offset;
            drag.moved = true;
            let node = drag.node;
            if let Some(node) = self.store.node_mut(node) {
                node.pos = target;
            }
            true
        } else {
            // Repaint for the pointer preview symbol.
            matches!(self.tool, ToolMode::Node | ToolMode::Connector)
        }
    }

    /// The pointer left the canvas; the preview symbol disappears. An active
    /// drag survives until pointer-up.
    pub fn pointer_left(&mut self) {
        self.pointer = None;
    }

    /// End any active drag. A pointer-up not consumed by a real drag is
    /// interpreted as a click.
    pub fn pointer_up(&mut self, pos: Vec2) {
        self.pointer = Some(pos);
        match self.drag.take() {
            Some(drag) if drag.moved => {}
            _ => self.click(pos),
        }
    }

    /// Apply a click at `pos` according to the active tool.
    pub fn click(&mut self, pos: Vec2) {
        let hit = geometry::find_node_at(self.store.nodes(), pos, NODE_RADIUS).map(|n| n.id);

        match self.tool {
            ToolMode::Node => match hit {
                None => {
                    self.add_node_at(pos);
                }
                Some(id) => {
                    self.selection = Some(Selection::Node(id));
                    self.connector_start = None;
                }
            },
            ToolMode::Connector => {
                let Some(id) = hit else {
                    return;
                };
                match self.connector_start {
                    None => {
                        self.connector_start = Some(id);
                        self.selection = Some(Selection::Node(id));
                    }
                    Some(start) => {
                        // Self-loops and duplicates abort silently; that is
                        // the documented policy, not an error.
                        if let Err(rejected) = self.connect(start, id) {
                            debug!(%rejected, "connector completion aborted");
                        }
                        self.connector_start = None;
                        self.selection = None;
                    }
                }
            }
            ToolMode::Select => {
                if let Some(id) = hit {
                    self.selection = Some(Selection::Node(id));
                } else if let Some(edge) =
                    geometry::find_edge_near(&self.store, pos, EDGE_HIT_TOLERANCE)
                {
                    self.selection = Some(Selection::Edge(edge.id));
                } else {
                    self.selection = None;
                }
                self.connector_start = None;
            }
        }
    }

    // -- Graph mutation --

    /// Create a node at `pos`. Selection is left untouched.
    pub fn add_node_at(&mut self, pos: Vec2) -> NodeId {
        let id = self.store.add_node(pos);
        self.touch_graph();
        id
    }

    /// Create an edge between `u` and `v`, subject to the store's
    /// self-loop/duplicate rejection.
    pub fn connect(&mut self, u: NodeId, v: NodeId) -> Result<EdgeId, EdgeRejected> {
        let id = self.store.add_edge(u, v)?;
        self.touch_graph();
        Ok(id)
    }

    /// Delete the selected element, cascading node deletion to incident
    /// edges. No-op without a selection; the selection never outlives its
    /// referent.
    pub fn delete_selected(&mut self) {
        let Some(selection) = self.selection.take() else {
            return;
        };
        match selection {
            Selection::Node(id) => {
                self.store.remove_node(id);
                if self.drag.is_some_and(|d| d.node == id) {
                    self.drag = None;
                }
                if self.connector_start == Some(id) {
                    self.connector_start = None;
                }
            }
            Selection::Edge(id) => self.store.remove_edge(id),
        }
        self.touch_graph();
    }

    /// Full reset: empty store, id counters back to zero, no selection,
    /// no highlights, blank status.
    pub fn clear(&mut self) {
        self.store.clear();
        self.selection = None;
        self.connector_start = None;
        self.drag = None;
        self.touch_graph();
    }

    /// Any graph mutation invalidates the bridge highlight set; it reflects
    /// a snapshot that no longer exists.
    fn touch_graph(&mut self) {
        self.generation += 1;
        self.bridges.clear();
        self.status = BridgeStatus::Cleared;
    }

    // -- Bridge highlight lifecycle --

    /// Snapshot the graph for a bridge query, pinned to the current
    /// generation. Returns `None` for an empty graph: the query must not be
    /// issued (caller precondition of the detection service).
    pub fn begin_bridge_query(&self) -> Option<PendingQuery> {
        if self.store.is_empty() {
            return None;
        }
        Some(PendingQuery {
            generation: self.generation,
            request: BridgeRequest {
                nodes: self.store.node_count() as u64,
                edges: self.store.edges().iter().map(|e| [e.u, e.v]).collect(),
            },
        })
    }

    /// Mark that a classification is underway (shown after generation).
    pub fn mark_checking(&mut self) {
        self.status = BridgeStatus::Checking;
    }

    /// Feed a bridge classification back in. Applied only when `generation`
    /// matches the current graph generation; a stale result is discarded and
    /// `false` is returned.
    pub fn apply_bridge_result(&mut self, generation: u64, pairs: Vec<NodePair>) -> bool {
        if generation != self.generation {
            warn!(
                stale = generation,
                current = self.generation,
                "discarding bridge result for an outdated graph"
            );
            return false;
        }
        self.status = if pairs.is_empty() {
            BridgeStatus::NoBridges
        } else {
            BridgeStatus::HasBridges
        };
        info!(bridges = pairs.len(), "bridge classification applied");
        self.bridges = pairs;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spaced_pair(session: &mut EditorSession) -> (NodeId, NodeId) {
        let a = session.add_node_at(Vec2::new(100.0, 100.0));
        let b = session.add_node_at(Vec2::new(300.0, 100.0));
        (a, b)
    }

    #[test]
    fn drag_moves_node_and_suppresses_click() {
        let mut session = EditorSession::new();
        session.set_tool(ToolMode::Node);
        let (a, _) = spaced_pair(&mut session);

        session.pointer_down(Vec2::new(105.0, 100.0));
        assert!(session.is_dragging());
        session.pointer_moved(Vec2::new(205.0, 150.0));
        session.pointer_up(Vec2::new(205.0, 150.0));

        // Offset is preserved: the node center trails the pointer.
        let node = session.store().node(a).unwrap();
        assert_eq!(node.pos, Vec2::new(200.0, 150.0));
        // No node was created by the release, and nothing got selected.
        assert_eq!(session.store().node_count(), 2);
        assert_eq!(session.selection(), None);
        assert!(!session.is_dragging());
    }

    #[test]
    fn stationary_press_on_empty_space_creates_a_node() {
        let mut session = EditorSession::new();
        assert_eq!(session.tool(), ToolMode::Node);

        session.pointer_down(Vec2::new(50.0, 60.0));
        session.pointer_up(Vec2::new(50.0, 60.0));

        assert_eq!(session.store().node_count(), 1);
        assert_eq!(session.store().nodes()[0].pos, Vec2::new(50.0, 60.0));
        assert_eq!(session.selection(), None);
    }

    #[test]
    fn node_tool_click_on_existing_node_selects_it() {
        let mut session = EditorSession::new();
        let (a, _) = spaced_pair(&mut session);

        session.click(Vec2::new(103.0, 98.0));
        assert_eq!(session.selection(), Some(Selection::Node(a)));
        assert_eq!(session.store().node_count(), 2);
    }

    #[test]
    fn connector_builds_edge_across_two_clicks() {
        let mut session = EditorSession::new();
        let (a, b) = spaced_pair(&mut session);
        session.set_tool(ToolMode::Connector);

        session.click(Vec2::new(100.0, 100.0));
        assert_eq!(session.connector_start(), Some(a));
        assert_eq!(session.selection(), Some(Selection::Node(a)));

        session.click(Vec2::new(300.0, 100.0));
        assert!(session.store().edge_exists(a, b));
        assert_eq!(session.connector_start(), None);
        assert_eq!(session.selection(), None);
    }

    #[test]
    fn connector_click_on_empty_space_is_ignored() {
        let mut session = EditorSession::new();
        let (a, _) = spaced_pair(&mut session);
        session.set_tool(ToolMode::Connector);

        session.click(Vec2::new(100.0, 100.0));
        session.click(Vec2::new(200.0, 300.0));

        // Pending start survives; nothing was created.
        assert_eq!(session.connector_start(), Some(a));
        assert_eq!(session.store().edge_count(), 0);
    }

    #[test]
    fn select_tool_picks_nodes_then_edges_then_clears() {
        let mut session = EditorSession::new();
        let (a, b) = spaced_pair(&mut session);
        let edge = session.connect(a, b).unwrap();
        session.set_tool(ToolMode::Select);

        session.click(Vec2::new(100.0, 100.0));
        assert_eq!(session.selection(), Some(Selection::Node(a)));

        // Between the nodes, on the segment.
        session.click(Vec2::new(200.0, 103.0));
        assert_eq!(session.selection(), Some(Selection::Edge(edge)));

        session.click(Vec2::new(200.0, 300.0));
        assert_eq!(session.selection(), None);
    }

    #[test]
    fn escape_cancels_tool_pending_start_and_selection() {
        let mut session = EditorSession::new();
        let (a, _) = spaced_pair(&mut session);
        session.set_tool(ToolMode::Connector);
        session.click(Vec2::new(100.0, 100.0));
        assert_eq!(session.connector_start(), Some(a));

        session.escape();
        assert_eq!(session.tool(), ToolMode::Select);
        assert_eq!(session.connector_start(), None);
        assert_eq!(session.selection(), None);
    }

    #[test]
    fn tool_switch_clears_selection_without_touching_the_graph() {
        let mut session = EditorSession::new();
        let (a, b) = spaced_pair(&mut session);
        session.connect(a, b).unwrap();
        session.set_tool(ToolMode::Select);
        session.click(Vec2::new(100.0, 100.0));
        let generation = session.generation();

        session.set_tool(ToolMode::Connector);
        assert_eq!(session.selection(), None);
        assert_eq!(session.store().node_count(), 2);
        assert_eq!(session.store().edge_count(), 1);
        assert_eq!(session.generation(), generation);
    }

    #[test]
    fn mutations_invalidate_bridge_highlights() {
        let mut session = EditorSession::new();
        let (a, b) = spaced_pair(&mut session);
        session.connect(a, b).unwrap();

        let query = session.begin_bridge_query().unwrap();
        assert!(session.apply_bridge_result(query.generation, vec![NodePair(a, b)]));
        assert_eq!(session.status(), BridgeStatus::HasBridges);

        session.add_node_at(Vec2::new(500.0, 500.0));
        assert!(session.bridges().is_empty());
        assert_eq!(session.status(), BridgeStatus::Cleared);
    }

    #[test]
    fn stale_bridge_result_is_discarded() {
        let mut session = EditorSession::new();
        let (a, b) = spaced_pair(&mut session);
        session.connect(a, b).unwrap();

        let query = session.begin_bridge_query().unwrap();
        // The graph changes while the query is in flight.
        session.add_node_at(Vec2::new(500.0, 500.0));

        assert!(!session.apply_bridge_result(query.generation, vec![NodePair(a, b)]));
        assert!(session.bridges().is_empty());
        assert_eq!(session.status(), BridgeStatus::Cleared);
    }

    #[test]
    fn bridge_query_requires_a_nonempty_graph() {
        let session = EditorSession::new();
        assert!(session.begin_bridge_query().is_none());
    }

    #[test]
    fn bridge_query_snapshots_count_and_edges() {
        let mut session = EditorSession::new();
        let (a, b) = spaced_pair(&mut session);
        session.connect(a, b).unwrap();

        let query = session.begin_bridge_query().unwrap();
        assert_eq!(query.request.nodes, 2);
        assert_eq!(query.request.edges, vec![[a, b]]);
    }

    #[test]
    fn deleting_the_connector_start_clears_it() {
        let mut session = EditorSession::new();
        let (a, _) = spaced_pair(&mut session);
        session.set_tool(ToolMode::Connector);
        session.click(Vec2::new(100.0, 100.0));
        assert_eq!(session.connector_start(), Some(a));

        // Selection currently points at the pending start node.
        session.delete_selected();
        assert_eq!(session.connector_start(), None);
        assert!(session.store().node(a).is_none());
    }
}
