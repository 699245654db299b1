//! The builder store: canonical document, linear undo/redo history, transient
//! editor state and the load/save lifecycle.
//!
//! Every mutation is copy-on-write: the next layout is built from a clone and
//! committed as an immutable history snapshot, which is what keeps undo/redo
//! correctness tractable. All operations run synchronously inside the caller's
//! event handler; only load and save touch the persistence collaborator.

use crate::auth::{Authorizer, IdentityProvider};
use crate::editor::EditorState;
use crate::element::{Element, ElementId, ElementKind};
use crate::gesture::{self, ActiveGesture, GestureKind};
use crate::layout::{now_ms, Layout};
use crate::patch::{ElementPatch, GlobalStylePatch};
use crate::storage::{LayoutStore, StoreResult};
use kurbo::{Point, Size};
use std::sync::Arc;

/// Fixed document name the layout is persisted under.
pub const DOCUMENT_NAME: &str = "genesis-ia-dashboard";

/// Maximum number of history snapshots to keep.
const MAX_HISTORY: usize = 50;

/// Offset applied to duplicated and pasted elements.
const PASTE_OFFSET: f64 = 20.0;

/// Severity of a transient notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Warning,
    Error,
}

/// A transient, user-visible notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

/// The dashboard builder state machine.
pub struct BuilderStore {
    /// The live document.
    layout: Layout,
    /// Linear history of committed snapshots. `history[history_index]` equals
    /// the live layout immediately after any commit.
    history: Vec<Layout>,
    history_index: usize,
    editor: EditorState,
    /// Gesture in progress, if any. Transient geometry is applied eagerly but
    /// committed as a single history entry on gesture end.
    gesture: Option<ActiveGesture>,
    notices: Vec<Notice>,
    is_saving: bool,
    is_loading: bool,
    document_name: String,
    persistence: Arc<dyn LayoutStore>,
    identity: Arc<dyn IdentityProvider>,
    authorizer: Arc<dyn Authorizer>,
}

impl BuilderStore {
    pub fn new(
        persistence: Arc<dyn LayoutStore>,
        identity: Arc<dyn IdentityProvider>,
        authorizer: Arc<dyn Authorizer>,
    ) -> Self {
        let layout = Layout::empty();
        Self {
            history: vec![layout.clone()],
            history_index: 0,
            layout,
            editor: EditorState::default(),
            gesture: None,
            notices: Vec::new(),
            is_saving: false,
            is_loading: false,
            document_name: DOCUMENT_NAME.to_string(),
            persistence,
            identity,
            authorizer,
        }
    }

    /// Persist under a different document name (tests, multi-tenant hosts).
    pub fn with_document_name(mut self, name: impl Into<String>) -> Self {
        self.document_name = name.into();
        self
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn editor(&self) -> &EditorState {
        &self.editor
    }

    pub fn selected_element(&self) -> Option<&Element> {
        self.editor.selected.and_then(|id| self.layout.element(id))
    }

    pub fn gesture(&self) -> Option<&ActiveGesture> {
        self.gesture.as_ref()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn history_index(&self) -> usize {
        self.history_index
    }

    pub fn can_undo(&self) -> bool {
        self.history_index > 0
    }

    pub fn can_redo(&self) -> bool {
        self.history_index + 1 < self.history.len()
    }

    pub fn is_saving(&self) -> bool {
        self.is_saving
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn document_name(&self) -> &str {
        &self.document_name
    }

    pub fn persistence(&self) -> Arc<dyn LayoutStore> {
        Arc::clone(&self.persistence)
    }

    /// Whether the current identity passes the injected admin predicate.
    pub fn is_admin(&self) -> bool {
        self.authorizer
            .is_authorized(self.identity.current_user().as_deref())
    }

    /// Drain pending notifications for display.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    fn push_notice(&mut self, kind: NoticeKind, message: impl Into<String>) {
        self.notices.push(Notice {
            kind,
            message: message.into(),
        });
    }

    /// Admin check shared by every mutating operation: refused silently, with
    /// a transient notification, never an error.
    fn require_admin(&mut self) -> bool {
        if self.is_admin() {
            true
        } else {
            self.push_notice(
                NoticeKind::Warning,
                "Only the dashboard admin can change the layout",
            );
            false
        }
    }

    /// Record the live layout as a new history snapshot, discarding any
    /// entries beyond the current cursor.
    fn commit(&mut self) {
        self.history.truncate(self.history_index + 1);
        self.history.push(self.layout.clone());
        if self.history.len() > MAX_HISTORY {
            self.history.remove(0);
        }
        self.history_index = self.history.len() - 1;
    }

    /// Copy-on-write mutation: commits only when the layout actually changed.
    /// Returns whether a commit was recorded.
    fn mutate(&mut self, f: impl FnOnce(&mut Layout)) -> bool {
        let mut next = self.layout.clone();
        f(&mut next);
        if next == self.layout {
            return false;
        }
        self.layout = next;
        self.commit();
        true
    }

    /// Apply a change to the live layout without committing (gesture feedback).
    fn apply_transient(&mut self, f: impl FnOnce(&mut Layout)) {
        let mut next = self.layout.clone();
        f(&mut next);
        self.layout = next;
    }

    /// Drop the selection when the selected element no longer exists.
    fn prune_selection(&mut self) {
        if let Some(id) = self.editor.selected {
            if !self.layout.contains(id) {
                self.editor.clear_selection();
            }
        }
    }

    // ----- document lifecycle ------------------------------------------------

    /// Fetch the persisted layout; on absence or failure install the empty
    /// default. Never fails to the caller.
    pub async fn load(&mut self) {
        if !self.begin_load() {
            return;
        }
        let persistence = Arc::clone(&self.persistence);
        let name = self.document_name.clone();
        let result = persistence.load_active(&name).await;
        self.install_loaded(result);
    }

    /// Mark a load as in flight. Returns false if one already is.
    pub fn begin_load(&mut self) -> bool {
        if self.is_loading {
            return false;
        }
        self.is_loading = true;
        true
    }

    /// Install the outcome of a load started with [`begin_load`].
    ///
    /// [`begin_load`]: BuilderStore::begin_load
    pub fn install_loaded(&mut self, result: StoreResult<Option<Layout>>) {
        self.is_loading = false;
        let layout = match result {
            Ok(Some(layout)) => {
                log::info!(
                    "Loaded layout '{}' with {} elements",
                    layout.name,
                    layout.len()
                );
                layout
            }
            Ok(None) => {
                log::info!(
                    "No persisted layout for '{}'; starting empty",
                    self.document_name
                );
                Layout::empty()
            }
            Err(e) => {
                log::warn!(
                    "Failed to load layout '{}': {}; starting empty",
                    self.document_name,
                    e
                );
                Layout::empty()
            }
        };
        self.layout = layout;
        self.history = vec![self.layout.clone()];
        self.history_index = 0;
        self.gesture = None;
        self.editor.clear_selection();
    }

    /// Serialize the live layout and upsert it under the fixed document name.
    /// On failure the in-memory layout is unchanged and a retry is allowed.
    pub async fn save_layout(&mut self) {
        let Some(snapshot) = self.begin_save() else {
            return;
        };
        let persistence = Arc::clone(&self.persistence);
        let name = self.document_name.clone();
        let result = persistence.upsert(&name, &snapshot).await;
        self.finish_save(result);
    }

    /// Begin a save: admin-gated, refuses while one is in flight. Returns the
    /// snapshot to hand to the persistence collaborator.
    pub fn begin_save(&mut self) -> Option<Layout> {
        if !self.require_admin() {
            return None;
        }
        if self.is_saving {
            return None;
        }
        self.is_saving = true;
        let mut snapshot = self.layout.clone();
        snapshot.updated_at = now_ms();
        Some(snapshot)
    }

    /// Apply the outcome of a save started with [`begin_save`].
    ///
    /// [`begin_save`]: BuilderStore::begin_save
    pub fn finish_save(&mut self, result: StoreResult<()>) {
        self.is_saving = false;
        match result {
            Ok(()) => self.push_notice(NoticeKind::Info, "Layout saved"),
            Err(e) => {
                log::warn!("Failed to save layout '{}': {}", self.document_name, e);
                self.push_notice(NoticeKind::Error, format!("Save failed: {}", e));
            }
        }
    }

    // ----- edit mode and selection -------------------------------------------

    pub fn toggle_edit_mode(&mut self) {
        if !self.require_admin() {
            return;
        }
        self.cancel_gesture();
        self.editor.edit_mode = !self.editor.edit_mode;
        self.editor.clear_selection();
    }

    /// Change the selection. Editor-state only; never touches history.
    pub fn select_element(&mut self, id: Option<ElementId>) {
        match id {
            Some(id) if self.layout.contains(id) => self.editor.selected = Some(id),
            // Stale id from an outdated closure: keep the current selection.
            Some(_) => {}
            None => self.editor.clear_selection(),
        }
    }

    // ----- structural mutations ----------------------------------------------

    pub fn add_element(&mut self, kind: ElementKind) -> Option<ElementId> {
        if !self.require_admin() {
            return None;
        }
        let element = Element::new(kind);
        let id = element.id;
        self.mutate(|layout| layout.elements.push(element));
        self.editor.selected = Some(id);
        Some(id)
    }

    /// Merge a patch into the matching element. Absent ids are a no-op, not an
    /// error, so stale closures cannot corrupt the history.
    pub fn update_element(&mut self, id: ElementId, patch: ElementPatch) {
        if !self.require_admin() {
            return;
        }
        if !self.layout.contains(id) {
            return;
        }
        self.mutate(|layout| {
            if let Some(element) = layout.element_mut(id) {
                patch.apply(element);
            }
        });
    }

    pub fn delete_element(&mut self, id: ElementId) {
        if !self.require_admin() {
            return;
        }
        if !self.layout.contains(id) {
            return;
        }
        self.mutate(|layout| layout.elements.retain(|e| e.id != id));
        if self.editor.selected == Some(id) {
            self.editor.clear_selection();
        }
    }

    pub fn duplicate_element(&mut self, id: ElementId) -> Option<ElementId> {
        if !self.require_admin() {
            return None;
        }
        let clone = self
            .layout
            .element(id)?
            .cloned_offset(PASTE_OFFSET, PASTE_OFFSET);
        let clone_id = clone.id;
        self.mutate(|layout| layout.elements.push(clone));
        self.editor.selected = Some(clone_id);
        Some(clone_id)
    }

    /// Store a detached snapshot of the element. Not undoable.
    pub fn copy_element(&mut self, id: ElementId) {
        self.editor.copied = self.layout.element(id).cloned();
    }

    /// Insert a fresh-id, offset clone of the copied snapshot. No-op with
    /// nothing copied.
    pub fn paste_element(&mut self) -> Option<ElementId> {
        if !self.require_admin() {
            return None;
        }
        let copied = self.editor.copied.clone()?;
        let clone = copied.cloned_offset(PASTE_OFFSET, PASTE_OFFSET);
        let clone_id = clone.id;
        self.mutate(|layout| layout.elements.push(clone));
        self.editor.selected = Some(clone_id);
        Some(clone_id)
    }

    pub fn update_global_styles(&mut self, patch: GlobalStylePatch) {
        if !self.require_admin() {
            return;
        }
        self.mutate(|layout| patch.apply(&mut layout.global_style));
    }

    // ----- geometry ----------------------------------------------------------

    /// Move an element, clamped to the canvas. Inside an active gesture the
    /// change is applied eagerly and committed once on gesture end; outside
    /// one it commits immediately.
    pub fn move_element(&mut self, id: ElementId, x: f64, y: f64) {
        if !self.require_admin() {
            return;
        }
        if !self.layout.contains(id) {
            return;
        }
        let position = gesture::clamp_position(Point::new(x, y));
        if self.in_gesture_for(id) {
            self.apply_transient(|layout| {
                if let Some(element) = layout.element_mut(id) {
                    element.position = position;
                }
            });
        } else {
            self.update_element(id, ElementPatch::position(position));
        }
    }

    /// Resize an element, clamped to the minimum dimensions. Same commit
    /// behavior as [`move_element`].
    ///
    /// [`move_element`]: BuilderStore::move_element
    pub fn resize_element(&mut self, id: ElementId, width: f64, height: f64) {
        if !self.require_admin() {
            return;
        }
        if !self.layout.contains(id) {
            return;
        }
        let size = gesture::clamp_size(Size::new(width, height));
        if self.in_gesture_for(id) {
            self.apply_transient(|layout| {
                if let Some(element) = layout.element_mut(id) {
                    element.size = size;
                }
            });
        } else {
            self.update_element(id, ElementPatch::size(size));
        }
    }

    fn in_gesture_for(&self, id: ElementId) -> bool {
        self.gesture.as_ref().is_some_and(|g| g.element_id == id)
    }

    /// Pointer-down on an element in edit mode: classify the gesture by target
    /// region and select the element regardless of gesture kind.
    pub fn gesture_start(&mut self, id: ElementId, pointer: Point) -> bool {
        if !self.editor.edit_mode || !self.is_admin() {
            return false;
        }
        let Some(element) = self.layout.element(id) else {
            return false;
        };
        let Some(kind) = gesture::classify(element, pointer) else {
            return false;
        };
        self.gesture = Some(ActiveGesture::begin(element, kind, pointer));
        self.editor.selected = Some(id);
        self.editor.is_dragging = kind == GestureKind::Move;
        self.editor.is_resizing = kind == GestureKind::Resize;
        true
    }

    /// Pointer-move while a gesture is active.
    pub fn gesture_move(&mut self, pointer: Point) {
        let Some(gesture) = self.gesture.clone() else {
            return;
        };
        match gesture.kind {
            GestureKind::Move => {
                let position = gesture.moved_position(pointer);
                self.move_element(gesture.element_id, position.x, position.y);
            }
            GestureKind::Resize => {
                let size = gesture.resized_size(pointer);
                self.resize_element(gesture.element_id, size.width, size.height);
            }
        }
    }

    /// Pointer-up: coalesce the whole gesture into a single history commit and
    /// return the element to its selected state.
    pub fn gesture_end(&mut self) {
        if self.gesture.take().is_none() {
            return;
        }
        self.editor.is_dragging = false;
        self.editor.is_resizing = false;
        let unchanged = self
            .history
            .get(self.history_index)
            .is_some_and(|snapshot| *snapshot == self.layout);
        if !unchanged {
            self.commit();
        }
    }

    /// Abort an active gesture, restoring the pre-gesture geometry.
    pub fn cancel_gesture(&mut self) {
        let Some(gesture) = self.gesture.take() else {
            return;
        };
        self.editor.is_dragging = false;
        self.editor.is_resizing = false;
        self.apply_transient(|layout| {
            if let Some(element) = layout.element_mut(gesture.element_id) {
                *element = gesture.original.clone();
            }
        });
    }

    // ----- history -----------------------------------------------------------

    pub fn undo(&mut self) {
        if !self.require_admin() {
            return;
        }
        if self.gesture.is_some() || self.history_index == 0 {
            return;
        }
        self.history_index -= 1;
        self.layout = self.history[self.history_index].clone();
        self.prune_selection();
    }

    pub fn redo(&mut self) {
        if !self.require_admin() {
            return;
        }
        if self.gesture.is_some() || self.history_index + 1 >= self.history.len() {
            return;
        }
        self.history_index += 1;
        self.layout = self.history[self.history_index].clone();
        self.prune_selection();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{DesignatedAdmin, FixedIdentity};
    use crate::element::ElementContent;
    use crate::gesture::{MIN_ELEMENT_HEIGHT, MIN_ELEMENT_WIDTH};
    use crate::patch::StylePatch;
    use crate::storage::{BoxFuture, MemoryStore, StoreError};

    const ADMIN: &str = "admin@example.com";

    fn block_on<F: std::future::Future>(f: F) -> F::Output {
        use std::task::{Context, Poll, RawWaker, RawWakerVTable, Waker};

        fn dummy_raw_waker() -> RawWaker {
            fn no_op(_: *const ()) {}
            fn clone(_: *const ()) -> RawWaker {
                dummy_raw_waker()
            }
            static VTABLE: RawWakerVTable = RawWakerVTable::new(clone, no_op, no_op, no_op);
            RawWaker::new(std::ptr::null(), &VTABLE)
        }

        let waker = unsafe { Waker::from_raw(dummy_raw_waker()) };
        let mut cx = Context::from_waker(&waker);
        let mut f = std::pin::pin!(f);

        loop {
            match f.as_mut().poll(&mut cx) {
                Poll::Ready(result) => return result,
                Poll::Pending => {}
            }
        }
    }

    fn store_with(persistence: Arc<MemoryStore>, user: &str) -> BuilderStore {
        BuilderStore::new(
            persistence,
            Arc::new(FixedIdentity::new(user)),
            Arc::new(DesignatedAdmin::new(ADMIN)),
        )
    }

    fn admin_store() -> BuilderStore {
        store_with(Arc::new(MemoryStore::new()), ADMIN)
    }

    fn viewer_store() -> BuilderStore {
        store_with(Arc::new(MemoryStore::new()), "viewer@example.com")
    }

    /// A persistence collaborator whose writes always fail.
    struct FailingStore;

    impl LayoutStore for FailingStore {
        fn load_active(&self, _name: &str) -> BoxFuture<'_, StoreResult<Option<Layout>>> {
            Box::pin(async { Err(StoreError::Backend("connection refused".to_string())) })
        }

        fn upsert(&self, _name: &str, _layout: &Layout) -> BoxFuture<'_, StoreResult<()>> {
            Box::pin(async { Err(StoreError::Backend("connection refused".to_string())) })
        }
    }

    #[test]
    fn test_empty_patch_is_idempotent() {
        let mut store = admin_store();
        let id = store.add_element(ElementKind::Card).unwrap();
        let before = store.layout().clone();
        let history_before = store.history_len();

        store.update_element(id, ElementPatch::default());

        assert_eq!(*store.layout(), before);
        assert_eq!(store.history_len(), history_before);
    }

    #[test]
    fn test_history_invariant_after_commits() {
        let mut store = admin_store();
        assert_eq!(store.history_index(), 0);
        assert_eq!(store.history[0], *store.layout());

        let id = store.add_element(ElementKind::Card).unwrap();
        store.update_element(
            id,
            ElementPatch::style(StylePatch {
                opacity: Some(0.8),
                ..Default::default()
            }),
        );
        store.move_element(id, 200.0, 100.0);

        assert_eq!(store.history_index(), 3);
        assert_eq!(store.history[store.history_index()], *store.layout());
    }

    #[test]
    fn test_undo_redo_inverse() {
        let mut store = admin_store();
        let id = store.add_element(ElementKind::Text).unwrap();
        let before = store.layout().clone();

        store.move_element(id, 300.0, 200.0);
        let after = store.layout().clone();

        store.undo();
        assert_eq!(*store.layout(), before);

        store.redo();
        assert_eq!(*store.layout(), after);
    }

    #[test]
    fn test_undo_redo_at_boundaries_are_no_ops() {
        let mut store = admin_store();
        store.undo();
        assert_eq!(store.history_index(), 0);

        store.redo();
        assert_eq!(store.history_index(), 0);
        assert!(!store.can_undo());
        assert!(!store.can_redo());
    }

    #[test]
    fn test_branch_discard_after_undo() {
        // Scenario B: text x2, undo once, add image.
        let mut store = admin_store();
        let first = store.add_element(ElementKind::Text).unwrap();
        store.add_element(ElementKind::Text).unwrap();

        store.undo();
        let image = store.add_element(ElementKind::Image).unwrap();

        assert_eq!(store.layout().len(), 2);
        assert_eq!(store.layout().elements[0].id, first);
        assert_eq!(store.layout().elements[1].id, image);
        assert!(!store.can_redo());
    }

    #[test]
    fn test_move_never_escapes_canvas() {
        let mut store = admin_store();
        let id = store.add_element(ElementKind::Card).unwrap();

        store.move_element(id, -500.0, -1.0);

        let element = store.layout().element(id).unwrap();
        assert_eq!(element.position, Point::new(0.0, 0.0));
    }

    #[test]
    fn test_resize_never_goes_below_minimum() {
        let mut store = admin_store();
        let id = store.add_element(ElementKind::Card).unwrap();

        store.resize_element(id, 1.0, -40.0);

        let element = store.layout().element(id).unwrap();
        assert_eq!(element.size.width, MIN_ELEMENT_WIDTH);
        assert_eq!(element.size.height, MIN_ELEMENT_HEIGHT);
    }

    #[test]
    fn test_non_admin_operations_change_nothing() {
        let mut store = viewer_store();

        assert_eq!(store.add_element(ElementKind::Card), None);
        store.toggle_edit_mode();
        store.update_global_styles(GlobalStylePatch {
            grid_columns: Some(4),
            ..Default::default()
        });
        store.undo();
        block_on(store.save_layout());

        assert!(store.layout().is_empty());
        assert_eq!(store.history_len(), 1);
        assert!(!store.editor().edit_mode);
        assert_eq!(store.editor().selected, None);
        assert!(!store.is_saving());
        assert_eq!(store.layout().global_style.grid_columns, 12);

        let notices = store.take_notices();
        assert!(!notices.is_empty());
        assert!(notices.iter().all(|n| n.kind == NoticeKind::Warning));
    }

    #[test]
    fn test_non_admin_update_and_delete_are_refused() {
        // Build a layout as admin, then retry the mutations as a viewer
        // against the same persisted state.
        let persistence = Arc::new(MemoryStore::new());
        let mut admin = store_with(Arc::clone(&persistence), ADMIN);
        let id = admin.add_element(ElementKind::Stat).unwrap();
        block_on(admin.save_layout());

        let mut viewer = store_with(persistence, "viewer@example.com");
        block_on(viewer.load());
        let before = viewer.layout().clone();

        viewer.update_element(id, ElementPatch::position(Point::new(9.0, 9.0)));
        viewer.delete_element(id);

        assert_eq!(*viewer.layout(), before);
        assert_eq!(viewer.history_len(), 1);
    }

    #[test]
    fn test_duplicate_offsets_and_preserves() {
        let mut store = admin_store();
        let id = store.add_element(ElementKind::Stat).unwrap();
        let original = store.layout().element(id).unwrap().clone();

        let clone_id = store.duplicate_element(id).unwrap();
        let clone = store.layout().element(clone_id).unwrap();

        assert_ne!(clone.id, original.id);
        assert_eq!(clone.position.x, original.position.x + 20.0);
        assert_eq!(clone.position.y, original.position.y + 20.0);
        assert_eq!(clone.content, original.content);
        assert_eq!(clone.style, original.style);
        assert_eq!(store.editor().selected, Some(clone_id));
    }

    #[test]
    fn test_copy_paste() {
        let mut store = admin_store();
        let id = store.add_element(ElementKind::Button).unwrap();
        let history_before = store.history_len();

        store.copy_element(id);
        // Copying is not undoable.
        assert_eq!(store.history_len(), history_before);

        let pasted = store.paste_element().unwrap();
        let original = store.layout().element(id).unwrap();
        let clone = store.layout().element(pasted).unwrap();
        assert_ne!(clone.id, original.id);
        assert_eq!(clone.position.x, original.position.x + 20.0);
        assert_eq!(store.editor().selected, Some(pasted));
        assert_eq!(store.history_len(), history_before + 1);
    }

    #[test]
    fn test_paste_with_nothing_copied_is_a_no_op() {
        let mut store = admin_store();
        store.add_element(ElementKind::Card);
        let before = store.layout().clone();
        let history_before = store.history_len();

        assert_eq!(store.paste_element(), None);
        assert_eq!(*store.layout(), before);
        assert_eq!(store.history_len(), history_before);
    }

    #[test]
    fn test_paste_survives_deleting_the_original() {
        let mut store = admin_store();
        let id = store.add_element(ElementKind::Card).unwrap();
        store.copy_element(id);
        store.delete_element(id);

        let pasted = store.paste_element().unwrap();
        assert_eq!(store.layout().len(), 1);
        assert!(store.layout().contains(pasted));
    }

    #[test]
    fn test_delete_clears_selection_and_stale_delete_is_no_op() {
        // Scenario C.
        let mut store = admin_store();
        let id = store.add_element(ElementKind::Card).unwrap();
        store.select_element(Some(id));

        store.delete_element(id);
        assert!(store.layout().is_empty());
        assert_eq!(store.editor().selected, None);

        let history_before = store.history_len();
        store.delete_element(id);
        assert_eq!(store.history_len(), history_before);
    }

    #[test]
    fn test_update_with_absent_id_is_a_no_op() {
        let mut store = admin_store();
        store.add_element(ElementKind::Card);
        let before = store.layout().clone();
        let history_before = store.history_len();

        store.update_element(uuid::Uuid::new_v4(), ElementPatch::position(Point::new(1.0, 1.0)));

        assert_eq!(*store.layout(), before);
        assert_eq!(store.history_len(), history_before);
    }

    #[test]
    fn test_select_stale_id_keeps_selection() {
        let mut store = admin_store();
        let id = store.add_element(ElementKind::Card).unwrap();
        store.select_element(Some(id));

        store.select_element(Some(uuid::Uuid::new_v4()));
        assert_eq!(store.editor().selected, Some(id));

        store.select_element(None);
        assert_eq!(store.editor().selected, None);
    }

    #[test]
    fn test_toggle_edit_mode_clears_selection() {
        let mut store = admin_store();
        let id = store.add_element(ElementKind::Card).unwrap();
        store.toggle_edit_mode();
        store.select_element(Some(id));
        assert_eq!(store.editor().selected, Some(id));

        store.toggle_edit_mode();
        assert!(!store.editor().edit_mode);
        assert_eq!(store.editor().selected, None);
    }

    #[test]
    fn test_gesture_coalesces_into_one_commit() {
        let mut store = admin_store();
        store.toggle_edit_mode();
        let id = store.add_element(ElementKind::Card).unwrap();
        let history_before = store.history_len();
        let before = store.layout().clone();

        let origin = store.layout().element(id).unwrap().position;
        assert!(store.gesture_start(id, Point::new(origin.x + 10.0, origin.y + 10.0)));
        assert!(store.editor().is_dragging);

        // Many pointer-move ticks, one history entry.
        for step in 1..=10 {
            let offset = f64::from(step) * 15.0;
            store.gesture_move(Point::new(origin.x + 10.0 + offset, origin.y + 10.0 + offset));
            assert_eq!(store.history_len(), history_before);
        }
        store.gesture_end();

        assert!(!store.editor().is_dragging);
        assert_eq!(store.editor().selected, Some(id));
        assert_eq!(store.history_len(), history_before + 1);
        assert_eq!(store.history[store.history_index()], *store.layout());

        store.undo();
        assert_eq!(*store.layout(), before);
    }

    #[test]
    fn test_resize_gesture_from_grip() {
        let mut store = admin_store();
        store.toggle_edit_mode();
        let id = store.add_element(ElementKind::Card).unwrap();
        let bounds = store.layout().element(id).unwrap().bounds();

        let grip = Point::new(bounds.x1 - 4.0, bounds.y1 - 4.0);
        assert!(store.gesture_start(id, grip));
        assert!(store.editor().is_resizing);
        assert!(!store.editor().is_dragging);

        store.gesture_move(Point::new(grip.x + 80.0, grip.y + 40.0));
        store.gesture_end();

        let element = store.layout().element(id).unwrap();
        assert_eq!(element.size.width, bounds.width() + 80.0);
        assert_eq!(element.size.height, bounds.height() + 40.0);
    }

    #[test]
    fn test_gesture_cancel_restores_geometry() {
        let mut store = admin_store();
        store.toggle_edit_mode();
        let id = store.add_element(ElementKind::Card).unwrap();
        let before = store.layout().clone();
        let history_before = store.history_len();
        let origin = store.layout().element(id).unwrap().position;

        store.gesture_start(id, Point::new(origin.x + 5.0, origin.y + 5.0));
        store.gesture_move(Point::new(origin.x + 400.0, origin.y + 300.0));
        store.cancel_gesture();

        assert_eq!(*store.layout(), before);
        assert_eq!(store.history_len(), history_before);
        assert!(!store.editor().is_dragging);
    }

    #[test]
    fn test_gesture_requires_edit_mode() {
        let mut store = admin_store();
        let id = store.add_element(ElementKind::Card).unwrap();
        let origin = store.layout().element(id).unwrap().position;

        assert!(!store.gesture_start(id, Point::new(origin.x + 5.0, origin.y + 5.0)));
    }

    #[test]
    fn test_undo_prunes_dangling_selection() {
        let mut store = admin_store();
        store.add_element(ElementKind::Card);
        let id = store.add_element(ElementKind::Text).unwrap();
        store.select_element(Some(id));

        store.undo();
        assert!(!store.layout().contains(id));
        assert_eq!(store.editor().selected, None);
    }

    #[test]
    fn test_history_is_bounded() {
        let mut store = admin_store();
        let id = store.add_element(ElementKind::Card).unwrap();

        for step in 0..80 {
            store.move_element(id, f64::from(step) * 2.0, 0.0);
        }

        assert_eq!(store.history_len(), 50);
        assert_eq!(store.history_index(), 49);
        assert_eq!(store.history[store.history_index()], *store.layout());
        store.undo();
        assert_eq!(store.history_index(), 48);
    }

    #[test]
    fn test_save_then_load_round_trip() {
        // Scenario A.
        let persistence = Arc::new(MemoryStore::new());
        let mut store = store_with(Arc::clone(&persistence), ADMIN);

        let id = store.add_element(ElementKind::Card).unwrap();
        let content = match store.layout().element(id).unwrap().content.clone() {
            ElementContent::Card {
                description,
                icon,
                badge,
                ..
            } => ElementContent::Card {
                title: "Hello".to_string(),
                description,
                icon,
                badge,
            },
            other => other,
        };
        store.update_element(id, ElementPatch::content(content));
        block_on(store.save_layout());

        let mut reloaded = store_with(persistence, ADMIN);
        block_on(reloaded.load());

        assert_eq!(reloaded.layout().len(), 1);
        let element = &reloaded.layout().elements[0];
        assert_eq!(element.kind, ElementKind::Card);
        assert!(
            matches!(&element.content, ElementContent::Card { title, .. } if title == "Hello")
        );
    }

    #[test]
    fn test_load_failure_falls_back_to_empty_default() {
        let persistence = Arc::new(MemoryStore::new());
        persistence.insert_raw(DOCUMENT_NAME, "{ definitely not a layout }");
        let mut store = store_with(persistence, ADMIN);

        block_on(store.load());

        assert!(store.layout().is_empty());
        assert!(!store.is_loading());
        assert_eq!(store.history_len(), 1);
    }

    #[test]
    fn test_load_resets_history() {
        let persistence = Arc::new(MemoryStore::new());
        let mut store = store_with(Arc::clone(&persistence), ADMIN);
        store.add_element(ElementKind::Card);
        block_on(store.save_layout());

        store.add_element(ElementKind::Text);
        block_on(store.load());

        assert_eq!(store.layout().len(), 1);
        assert_eq!(store.history_len(), 1);
        assert!(!store.can_undo());
    }

    #[test]
    fn test_save_failure_keeps_layout_and_allows_retry() {
        let mut store = BuilderStore::new(
            Arc::new(FailingStore),
            Arc::new(FixedIdentity::new(ADMIN)),
            Arc::new(DesignatedAdmin::new(ADMIN)),
        );
        store.add_element(ElementKind::Card);
        let before = store.layout().clone();

        block_on(store.save_layout());

        assert_eq!(*store.layout(), before);
        assert!(!store.is_saving());
        let notices = store.take_notices();
        assert!(notices.iter().any(|n| n.kind == NoticeKind::Error));

        // Retry is allowed: a new save can begin.
        assert!(store.begin_save().is_some());
    }

    #[test]
    fn test_begin_save_refuses_while_in_flight() {
        let mut store = admin_store();
        store.add_element(ElementKind::Card);

        let first = store.begin_save();
        assert!(first.is_some());
        assert!(store.is_saving());
        assert!(store.begin_save().is_none());

        store.finish_save(Ok(()));
        assert!(!store.is_saving());
    }

    #[test]
    fn test_saved_snapshot_carries_fresh_timestamp() {
        let mut store = admin_store();
        store.add_element(ElementKind::Card);
        let in_memory = store.layout().updated_at;

        let snapshot = store.begin_save().unwrap();
        assert!(snapshot.updated_at >= in_memory);
        // The in-memory layout is untouched by saving.
        assert_eq!(store.layout().updated_at, in_memory);
    }
}
