//! Mosaic application shell (native).
//!
//! Wires the builder store, gesture engine, renderer and panels into an
//! eframe application with global keyboard shortcuts and background
//! persistence I/O.

pub mod app;
pub mod canvas;
pub mod paint;
pub mod panels;
pub mod shortcuts;

pub use app::{BuilderApp, FallbackContent};
