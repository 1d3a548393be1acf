//! Dumb canvas renderer.
//!
//! Translates egui pointer gestures into session events, then paints the
//! session's scene description. All editing decisions stay in the session;
//! this module only maps emphasis tags to strokes.

use bridgeboard_editor::{EditorEvent, EditorSession};
use bridgeboard_graph::Vec2;
use bridgeboard_graph::scene::{EdgeEmphasis, PointerPreview, Scene};
use eframe::egui;

const CANVAS_FILL: egui::Color32 = egui::Color32::from_gray(250);
const NODE_FILL: egui::Color32 = egui::Color32::from_rgb(0x00, 0x77, 0xff);
const NODE_PREVIEW_FILL: egui::Color32 = egui::Color32::from_rgba_premultiplied(0x00, 0x30, 0x66, 0x66);
const EDGE_NORMAL: egui::Color32 = egui::Color32::from_rgb(0x55, 0x55, 0x55);
const SELECTED: egui::Color32 = egui::Color32::from_rgb(0xff, 0x98, 0x00);
const BRIDGE: egui::Color32 = egui::Color32::RED;

const SELECTION_RING_OFFSET: f32 = 4.0;
const PREVIEW_RADIUS: f32 = 18.0;
const DASH_LENGTH: f32 = 5.0;

/// Drive the session from pointer input and paint its scene. Returns the
/// canvas extent so the random generator can place nodes inside it.
pub fn show(ui: &mut egui::Ui, session: &mut EditorSession) -> Vec2 {
    let (response, painter) =
        ui.allocate_painter(ui.available_size(), egui::Sense::click_and_drag());
    let rect = response.rect;
    let origin = rect.min;
    let to_local = |p: egui::Pos2| Vec2::new(p.x - origin.x, p.y - origin.y);
    let to_screen = |p: Vec2| egui::pos2(p.x + origin.x, p.y + origin.y);

    // egui disambiguates click vs drag with its own movement threshold, so
    // drag_started/clicked never fire for the same gesture.
    if response.drag_started()
        && let Some(p) = response.interact_pointer_pos()
    {
        session.handle(EditorEvent::PointerDown(to_local(p)));
    }
    if response.dragged() {
        if let Some(p) = response.interact_pointer_pos() {
            session.handle(EditorEvent::PointerMoved(to_local(p)));
        }
    } else if let Some(p) = response.hover_pos() {
        session.handle(EditorEvent::PointerMoved(to_local(p)));
    } else {
        session.handle(EditorEvent::PointerLeft);
    }
    if response.drag_stopped()
        && let Some(p) = response.interact_pointer_pos().or_else(|| response.hover_pos())
    {
        session.handle(EditorEvent::PointerUp(to_local(p)));
    }
    if response.clicked()
        && let Some(p) = response.interact_pointer_pos()
    {
        session.click(to_local(p));
    }

    painter.rect_filled(rect, 0.0, CANVAS_FILL);
    paint_scene(&painter, &session.scene(), to_screen);

    Vec2::new(rect.width(), rect.height())
}

fn paint_scene(painter: &egui::Painter, scene: &Scene, to_screen: impl Fn(Vec2) -> egui::Pos2) {
    for edge in &scene.edges {
        let (color, width) = match edge.emphasis {
            EdgeEmphasis::Normal => (EDGE_NORMAL, 2.0),
            EdgeEmphasis::Selected => (SELECTED, 4.0),
            EdgeEmphasis::Bridge => (BRIDGE, 4.0),
        };
        painter.line_segment(
            [to_screen(edge.from), to_screen(edge.to)],
            egui::Stroke::new(width, color),
        );
    }

    for node in &scene.nodes {
        let center = to_screen(node.pos);
        painter.circle_filled(center, node.radius, NODE_FILL);
        if node.selected {
            painter.circle_stroke(
                center,
                node.radius + SELECTION_RING_OFFSET,
                egui::Stroke::new(3.0, SELECTED),
            );
        }
        painter.text(
            center,
            egui::Align2::CENTER_CENTER,
            &node.label,
            egui::FontId::proportional(15.0),
            egui::Color32::WHITE,
        );
    }

    match scene.preview {
        Some(PointerPreview::PlacingNode(pos)) => {
            painter.circle_filled(to_screen(pos), PREVIEW_RADIUS, NODE_PREVIEW_FILL);
        }
        Some(PointerPreview::RubberBand { from, to }) => {
            painter.extend(egui::Shape::dashed_line(
                &[to_screen(from), to_screen(to)],
                egui::Stroke::new(2.0, NODE_FILL),
                DASH_LENGTH,
                DASH_LENGTH,
            ));
        }
        None => {}
    }
}
