//! Pure render/describe layer.
//!
//! [`describe`] turns the current editor snapshot into an ordered scene
//! description; the renderer that consumes it only maps tags to strokes and
//! never reaches back into the store. The function mutates nothing and may
//! be re-invoked at any time.

use crate::Vec2;
use crate::geometry::NODE_RADIUS;
use crate::store::GraphStore;
use bridgeboard_core::{EdgeId, NodeId, NodePair, Selection, ToolMode};

/// Visual weight of an edge. `Bridge` wins over `Selected` when both apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeEmphasis {
    Normal,
    Selected,
    Bridge,
}

/// One edge to draw, endpoints already resolved to positions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeSprite {
    pub id: EdgeId,
    pub from: Vec2,
    pub to: Vec2,
    pub emphasis: EdgeEmphasis,
}

/// One node disc to draw, labeled with its id.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeSprite {
    pub id: NodeId,
    pub pos: Vec2,
    pub label: String,
    pub radius: f32,
    pub selected: bool,
}

/// Pointer-following preview symbol, shown only while the pointer is inside
/// the canvas and no drag is active.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerPreview {
    /// Translucent node disc under the pointer (node tool).
    PlacingNode(Vec2),
    /// Dashed line from the pending connector start to the pointer.
    RubberBand { from: Vec2, to: Vec2 },
}

/// Everything a dumb renderer needs for one frame, in draw order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Scene {
    pub edges: Vec<EdgeSprite>,
    pub nodes: Vec<NodeSprite>,
    pub preview: Option<PointerPreview>,
}

/// Snapshot of the editor state the scene is derived from.
#[derive(Debug, Clone, Copy)]
pub struct SceneInput<'a> {
    pub store: &'a GraphStore,
    pub selection: Option<Selection>,
    pub tool: ToolMode,
    pub connector_start: Option<NodeId>,
    pub bridges: &'a [NodePair],
    /// Pointer position, `None` while outside the canvas.
    pub pointer: Option<Vec2>,
    pub dragging: bool,
}

/// Derive the drawable scene from an editor snapshot.
pub fn describe(input: &SceneInput<'_>) -> Scene {
    let mut scene = Scene::default();

    for edge in input.store.edges() {
        let (Some(u), Some(v)) = (input.store.node(edge.u), input.store.node(edge.v)) else {
            // Stale reference; skip rather than fail.
            continue;
        };

        let is_bridge = input.bridges.iter().any(|b| b.joins(edge.u, edge.v));
        let is_selected = input.selection == Some(Selection::Edge(edge.id));
        let emphasis = if is_bridge {
            EdgeEmphasis::Bridge
        } else if is_selected {
            EdgeEmphasis::Selected
        } else {
            EdgeEmphasis::Normal
        };

        scene.edges.push(EdgeSprite {
            id: edge.id,
            from: u.pos,
            to: v.pos,
            emphasis,
        });
    }

    for node in input.store.nodes() {
        scene.nodes.push(NodeSprite {
            id: node.id,
            pos: node.pos,
            label: node.id.to_string(),
            radius: NODE_RADIUS,
            selected: input.selection == Some(Selection::Node(node.id)),
        });
    }

    scene.preview = pointer_preview(input);
    scene
}

fn pointer_preview(input: &SceneInput<'_>) -> Option<PointerPreview> {
    let pointer = input.pointer?;
    if input.dragging {
        return None;
    }

    match input.tool {
        ToolMode::Node => Some(PointerPreview::PlacingNode(pointer)),
        ToolMode::Connector => {
            let start = input.connector_start?;
            let node = input.store.node(start)?;
            Some(PointerPreview::RubberBand {
                from: node.pos,
                to: pointer,
            })
        }
        ToolMode::Select => None,
    }
}

/// Textual edge list in store order, one `"u — v"` line per edge.
pub fn edge_lines(store: &GraphStore) -> Vec<String> {
    store
        .edges()
        .iter()
        .map(|e| NodePair(e.u, e.v).to_string())
        .collect()
}

/// Textual list of the highlighted bridge pairs, in response order.
pub fn bridge_lines(bridges: &[NodePair]) -> Vec<String> {
    bridges.iter().map(|p| p.to_string()).collect()
}
