//! Main application entry point (native).

use std::sync::Arc;

use mosaic_app::BuilderApp;
use mosaic_core::storage::LayoutStore;
use mosaic_core::{BuilderStore, DesignatedAdmin, EnvIdentity, FileStore, MemoryStore};

/// Admin address used when the host does not inject one via `MOSAIC_ADMIN`.
const DEFAULT_ADMIN: &str = "admin@genesis-ia.app";

fn main() -> eframe::Result {
    env_logger::init();
    log::info!("Starting Mosaic");

    let persistence: Arc<dyn LayoutStore> = match FileStore::default_location() {
        Ok(store) => Arc::new(store),
        Err(e) => {
            log::warn!("Falling back to in-memory storage: {}", e);
            Arc::new(MemoryStore::new())
        }
    };

    let admin = std::env::var("MOSAIC_ADMIN").unwrap_or_else(|_| DEFAULT_ADMIN.to_string());
    let store = BuilderStore::new(
        persistence,
        Arc::new(EnvIdentity::new("MOSAIC_USER")),
        Arc::new(DesignatedAdmin::new(admin)),
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_title("Mosaic"),
        ..Default::default()
    };
    eframe::run_native(
        "mosaic",
        options,
        Box::new(|cc| Ok(Box::new(BuilderApp::new(cc, store)))),
    )
}
