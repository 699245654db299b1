//! Keyboard shortcut registry and documentation.

/// A keyboard shortcut definition.
#[derive(Debug, Clone, Copy)]
pub struct Shortcut {
    pub keys: &'static str,
    pub description: &'static str,
}

/// All shortcuts active while the editor is mounted and in edit mode.
pub const ALL: &[Shortcut] = &[
    Shortcut {
        keys: "Ctrl+Z",
        description: "Undo",
    },
    Shortcut {
        keys: "Ctrl+Shift+Z / Ctrl+Y",
        description: "Redo",
    },
    Shortcut {
        keys: "Ctrl+S",
        description: "Save layout",
    },
    Shortcut {
        keys: "Delete",
        description: "Delete selected element",
    },
    Shortcut {
        keys: "Escape",
        description: "Clear selection, close panels",
    },
    Shortcut {
        keys: "Drag",
        description: "Move element",
    },
    Shortcut {
        keys: "Drag corner grip",
        description: "Resize element",
    },
];
