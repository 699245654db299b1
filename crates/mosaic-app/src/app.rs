//! The composition root: owns the store, drives background persistence I/O,
//! and registers global keyboard shortcuts.

use std::sync::mpsc::{channel, Receiver, Sender};
use std::time::{Duration, Instant};

use egui::{Align2, Color32, Key, Modifiers, RichText};
use mosaic_core::storage::StoreResult;
use mosaic_core::{BuilderStore, Layout, Notice, NoticeKind};
use mosaic_widgets::{panel_frame, theme};

use crate::{canvas, panels};

/// Host-supplied content shown when no custom layout exists and the editor is
/// not active.
pub type FallbackContent = Box<dyn Fn(&mut egui::Ui)>;

/// How long a transient notice stays on screen.
const NOTICE_TTL: Duration = Duration::from_secs(4);

/// Outcome of a background persistence request.
enum IoEvent {
    Loaded(StoreResult<Option<Layout>>),
    Saved(StoreResult<()>),
}

pub struct BuilderApp {
    store: BuilderStore,
    io_tx: Sender<IoEvent>,
    io_rx: Receiver<IoEvent>,
    fallback: Option<FallbackContent>,
    show_global_styles: bool,
    notices: Vec<(Notice, Instant)>,
}

impl BuilderApp {
    pub fn new(cc: &eframe::CreationContext<'_>, store: BuilderStore) -> Self {
        let (io_tx, io_rx) = channel();
        let mut app = Self {
            store,
            io_tx,
            io_rx,
            fallback: None,
            show_global_styles: false,
            notices: Vec::new(),
        };
        app.request_load(&cc.egui_ctx);
        app
    }

    /// Install host-supplied fallback content.
    pub fn with_fallback(mut self, fallback: FallbackContent) -> Self {
        self.fallback = Some(fallback);
        self
    }

    /// Fetch the persisted layout on a worker thread; the outcome is applied
    /// on a later frame. Rendering is never blocked.
    fn request_load(&mut self, ctx: &egui::Context) {
        if !self.store.begin_load() {
            return;
        }
        let persistence = self.store.persistence();
        let name = self.store.document_name().to_string();
        let tx = self.io_tx.clone();
        let ctx = ctx.clone();
        std::thread::spawn(move || {
            let result = pollster::block_on(persistence.load_active(&name));
            let _ = tx.send(IoEvent::Loaded(result));
            ctx.request_repaint();
        });
    }

    /// Persist a snapshot on a worker thread. `begin_save` gates on the admin
    /// predicate and refuses while a save is already in flight.
    fn request_save(&mut self, ctx: &egui::Context) {
        let Some(snapshot) = self.store.begin_save() else {
            return;
        };
        let persistence = self.store.persistence();
        let name = self.store.document_name().to_string();
        let tx = self.io_tx.clone();
        let ctx = ctx.clone();
        std::thread::spawn(move || {
            let result = pollster::block_on(persistence.upsert(&name, &snapshot));
            let _ = tx.send(IoEvent::Saved(result));
            ctx.request_repaint();
        });
    }

    fn apply_io(&mut self) {
        while let Ok(event) = self.io_rx.try_recv() {
            match event {
                IoEvent::Loaded(result) => self.store.install_loaded(result),
                IoEvent::Saved(result) => self.store.finish_save(result),
            }
        }
    }

    /// Global shortcuts, active only in edit mode. Consuming the key presses
    /// suppresses any native handling (e.g. the browser save dialog).
    fn handle_shortcuts(&mut self, ctx: &egui::Context) {
        if !self.store.editor().edit_mode {
            return;
        }
        let typing = ctx.memory(|m| m.focused().is_some());
        let mut undo = false;
        let mut redo = false;
        let mut save = false;
        let mut delete = false;
        let mut escape = false;
        ctx.input_mut(|i| {
            redo = i.consume_key(Modifiers::COMMAND | Modifiers::SHIFT, Key::Z)
                || i.consume_key(Modifiers::COMMAND, Key::Y);
            undo = i.consume_key(Modifiers::COMMAND, Key::Z);
            save = i.consume_key(Modifiers::COMMAND, Key::S);
            if !typing {
                delete = i.consume_key(Modifiers::NONE, Key::Delete);
                escape = i.consume_key(Modifiers::NONE, Key::Escape);
            }
        });

        if undo {
            self.store.undo();
        }
        if redo {
            self.store.redo();
        }
        if save {
            self.request_save(ctx);
        }
        if delete {
            if let Some(id) = self.store.editor().selected {
                self.store.delete_element(id);
            }
        }
        if escape {
            self.store.cancel_gesture();
            self.store.select_element(None);
            self.show_global_styles = false;
        }
    }

    fn collect_notices(&mut self) {
        let now = Instant::now();
        for notice in self.store.take_notices() {
            self.notices.push((notice, now));
        }
        self.notices
            .retain(|(_, shown_at)| now.duration_since(*shown_at) < NOTICE_TTL);
    }

    fn show_notices(&self, ctx: &egui::Context) {
        if self.notices.is_empty() {
            return;
        }
        egui::Area::new(egui::Id::new("notices"))
            .anchor(Align2::RIGHT_BOTTOM, egui::vec2(-16.0, -16.0))
            .show(ctx, |ui| {
                for (notice, _) in &self.notices {
                    panel_frame().show(ui, |ui| {
                        let color = match notice.kind {
                            NoticeKind::Info => theme::TEXT,
                            NoticeKind::Warning => Color32::from_rgb(250, 204, 21),
                            NoticeKind::Error => theme::DANGER,
                        };
                        ui.label(RichText::new(&notice.message).color(color));
                    });
                }
            });
        // Keep repainting while notices age out.
        ctx.request_repaint_after(Duration::from_millis(250));
    }
}

impl eframe::App for BuilderApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.apply_io();
        self.collect_notices();
        self.handle_shortcuts(ctx);

        if panels::toolbar(ctx, &mut self.store, &mut self.show_global_styles) {
            self.request_save(ctx);
        }
        panels::element_settings(ctx, &mut self.store);
        if self.show_global_styles && self.store.editor().edit_mode {
            panels::global_styles_window(ctx, &mut self.store, &mut self.show_global_styles);
        }
        canvas::show(ctx, &mut self.store, self.fallback.as_ref());
        self.show_notices(ctx);
    }
}
