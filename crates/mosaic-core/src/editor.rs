//! Transient editor state (never persisted).

use crate::element::{Element, ElementId};

/// Interaction sub-state of one element while in edit mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InteractionState {
    #[default]
    Idle,
    Selected,
    Dragging,
    Resizing,
}

impl InteractionState {
    /// Selected covers the active-gesture states as well.
    pub fn is_selected(self) -> bool {
        !matches!(self, InteractionState::Idle)
    }

    pub fn in_gesture(self) -> bool {
        matches!(self, InteractionState::Dragging | InteractionState::Resizing)
    }
}

/// Per-session editor state. Created on mount, discarded on unmount; only the
/// layout document survives a reload.
#[derive(Debug, Clone, Default)]
pub struct EditorState {
    pub edit_mode: bool,
    pub selected: Option<ElementId>,
    /// Detached snapshot stored by copy; consumed (non-destructively) by paste.
    pub copied: Option<Element>,
    pub is_dragging: bool,
    pub is_resizing: bool,
}

impl EditorState {
    pub fn interaction(&self, id: ElementId) -> InteractionState {
        if self.selected != Some(id) {
            return InteractionState::Idle;
        }
        if self.is_dragging {
            InteractionState::Dragging
        } else if self.is_resizing {
            InteractionState::Resizing
        } else {
            InteractionState::Selected
        }
    }

    pub fn is_selected(&self, id: ElementId) -> bool {
        self.selected == Some(id)
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
        self.is_dragging = false;
        self.is_resizing = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::ElementKind;

    #[test]
    fn test_interaction_states() {
        let element = Element::new(ElementKind::Card);
        let mut editor = EditorState::default();

        assert_eq!(editor.interaction(element.id), InteractionState::Idle);

        editor.selected = Some(element.id);
        assert_eq!(editor.interaction(element.id), InteractionState::Selected);

        editor.is_dragging = true;
        assert_eq!(editor.interaction(element.id), InteractionState::Dragging);
        assert!(editor.interaction(element.id).is_selected());

        editor.is_dragging = false;
        editor.is_resizing = true;
        assert_eq!(editor.interaction(element.id), InteractionState::Resizing);
    }

    #[test]
    fn test_clear_selection_resets_gesture_flags() {
        let mut editor = EditorState {
            selected: Some(uuid::Uuid::new_v4()),
            is_dragging: true,
            ..Default::default()
        };
        editor.clear_selection();
        assert_eq!(editor.selected, None);
        assert!(!editor.is_dragging);
        assert!(!editor.is_resizing);
    }
}
