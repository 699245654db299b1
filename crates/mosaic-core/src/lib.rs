//! Mosaic Core Library
//!
//! Platform-agnostic document model and editor state machine for the Mosaic
//! dashboard builder: typed canvas elements, the persisted layout document,
//! the undo/redo history, gesture geometry, and the persistence seam.

pub mod auth;
pub mod editor;
pub mod element;
pub mod gesture;
pub mod layout;
pub mod patch;
pub mod storage;
pub mod store;

pub use auth::{Authorizer, DesignatedAdmin, EnvIdentity, FixedIdentity, IdentityProvider};
pub use editor::{EditorState, InteractionState};
pub use element::{
    Element, ElementContent, ElementId, ElementKind, ElementStyle, EntryAnimation, FillStyle,
    FontWeight, GradientDirection, Rgba, ShadowLevel,
};
pub use gesture::{ActiveGesture, GestureKind, MIN_ELEMENT_HEIGHT, MIN_ELEMENT_WIDTH, RESIZE_GRIP};
pub use layout::{GlobalStyle, Layout};
pub use patch::{ElementPatch, GlobalStylePatch, StylePatch};
pub use storage::{FileStore, LayoutStore, MemoryStore, StoreError, StoreResult};
pub use store::{BuilderStore, Notice, NoticeKind, DOCUMENT_NAME};
