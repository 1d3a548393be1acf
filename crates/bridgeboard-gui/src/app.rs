use bridgeboard_bridges::{BridgeClient, BridgeOutcome, spawn_detect};
use bridgeboard_core::ToolMode;
use bridgeboard_editor::{BridgeStatus, EditorEvent, EditorSession, generate_random};
use bridgeboard_graph::{Vec2, scene};
use crossbeam_channel::{Receiver, Sender, unbounded};
use eframe::egui;
use egui_notify::Toasts;

use crate::canvas;

/// Bridge-detection service endpoint. Point this at a local instance
/// (`http://localhost:8000`) for development.
const SERVICE_URL: &str = "https://grafos-fastapi.onrender.com";

pub struct BridgeBoardApp {
    session: EditorSession,
    client: Option<BridgeClient>,

    // Worker -> UI delivery of detection outcomes.
    outcome_tx: Sender<BridgeOutcome>,
    outcome_rx: Receiver<BridgeOutcome>,

    toasts: Toasts,
    /// Last known canvas extent, used to place generated nodes.
    canvas_extent: Vec2,
}

impl BridgeBoardApp {
    pub fn new() -> Self {
        let (outcome_tx, outcome_rx) = unbounded();
        let client = match BridgeClient::new(SERVICE_URL) {
            Ok(client) => Some(client),
            Err(err) => {
                tracing::error!(%err, "failed to build the bridge service client");
                None
            }
        };

        Self {
            session: EditorSession::new(),
            client,
            outcome_tx,
            outcome_rx,
            toasts: Toasts::new(),
            canvas_extent: Vec2::new(800.0, 600.0),
        }
    }

    fn drain_outcomes(&mut self) {
        while let Ok(outcome) = self.outcome_rx.try_recv() {
            match outcome.result {
                Ok(pairs) => {
                    // Stale results (the graph changed while the query was
                    // in flight) are dropped by the session.
                    self.session.apply_bridge_result(outcome.generation, pairs);
                }
                Err(err) => {
                    self.toasts.error(err.to_string());
                }
            }
        }
    }

    fn request_detection(&mut self) {
        let Some(query) = self.session.begin_bridge_query() else {
            self.toasts.warning("Create or generate a graph first.");
            return;
        };
        let Some(client) = self.client.clone() else {
            self.toasts.error("Bridge service client is unavailable.");
            return;
        };
        spawn_detect(client, query.generation, query.request, self.outcome_tx.clone());
    }

    fn handle_keys(&mut self, ctx: &egui::Context) {
        let (escape, delete) = ctx.input(|i| {
            (
                i.key_pressed(egui::Key::Escape),
                i.key_pressed(egui::Key::Delete) || i.key_pressed(egui::Key::Backspace),
            )
        });
        if escape {
            self.session.handle(EditorEvent::KeyEscape);
        }
        if delete {
            self.session.handle(EditorEvent::KeyDelete);
        }
    }

    fn toolbar(&mut self, ui: &mut egui::Ui) {
        ui.heading("Tools");
        ui.add_space(4.0);

        let node_active = self.session.tool() == ToolMode::Node;
        if ui.selectable_label(node_active, "● Node").clicked() {
            self.session.handle(EditorEvent::SelectTool(ToolMode::Node));
        }
        let connector_active = self.session.tool() == ToolMode::Connector;
        if ui.selectable_label(connector_active, "─ Connector").clicked() {
            self.session
                .handle(EditorEvent::SelectTool(ToolMode::Connector));
        }

        ui.separator();

        if ui.button("Clear").clicked() {
            self.session.handle(EditorEvent::Clear);
        }
        if ui.button("Generate graph").clicked() {
            generate_random(&mut self.session, self.canvas_extent, &mut rand::thread_rng());
            self.request_detection();
        }
        if ui.button("Detect bridges").clicked() {
            self.request_detection();
        }

        ui.separator();
        ui.small("Esc: select tool · Del: remove selection");
    }

    fn side_lists(&mut self, ui: &mut egui::Ui) {
        ui.heading("Edges");
        let edge_lines = scene::edge_lines(self.session.store());
        if edge_lines.is_empty() {
            ui.weak("none");
        }
        for line in edge_lines {
            ui.label(line);
        }

        ui.separator();

        ui.heading("Bridges");
        for line in scene::bridge_lines(self.session.bridges()) {
            ui.colored_label(egui::Color32::RED, line);
        }

        ui.separator();
        self.status_banner(ui);
    }

    fn status_banner(&self, ui: &mut egui::Ui) {
        let (text, fg, bg) = match self.session.status() {
            BridgeStatus::Cleared => return,
            BridgeStatus::Checking => (
                "Checking the generated graph for bridges…",
                egui::Color32::from_rgb(0x33, 0x33, 0x33),
                egui::Color32::from_rgb(0xee, 0xee, 0xee),
            ),
            BridgeStatus::HasBridges => (
                "This graph HAS bridges",
                egui::Color32::from_rgb(0xb5, 0x00, 0x00),
                egui::Color32::from_rgb(0xff, 0xdd, 0xdd),
            ),
            BridgeStatus::NoBridges => (
                "This graph has NO bridges",
                egui::Color32::from_rgb(0x00, 0x66, 0x00),
                egui::Color32::from_rgb(0xdd, 0xff, 0xdd),
            ),
        };

        egui::Frame::NONE
            .fill(bg)
            .stroke(egui::Stroke::new(2.0, fg))
            .inner_margin(6.0)
            .show(ui, |ui| {
                ui.colored_label(fg, text);
            });
    }
}

impl eframe::App for BridgeBoardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drain_outcomes();
        self.handle_keys(ctx);

        egui::SidePanel::left("tools")
            .resizable(false)
            .default_width(160.0)
            .show(ctx, |ui| self.toolbar(ui));

        egui::SidePanel::right("lists")
            .default_width(220.0)
            .show(ctx, |ui| self.side_lists(ui));

        egui::CentralPanel::default().show(ctx, |ui| {
            self.canvas_extent = canvas::show(ui, &mut self.session);
        });

        self.toasts.show(ctx);
    }
}
