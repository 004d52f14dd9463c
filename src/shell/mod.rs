//! UI shell: toolbar visibility, export menu and dialog text

mod toolbar;

pub use toolbar::{export_menu, header_actions, toolbar_groups, ToolbarAction, ToolbarButton};

/// Alert shown after a successful save
pub const SAVED_NOTICE: &str = "Document saved locally";

/// Chrome state around the editable region
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShellState {
    pub toolbar_visible: bool,
    pub export_menu_open: bool,
}

impl Default for ShellState {
    fn default() -> Self {
        Self {
            toolbar_visible: true,
            export_menu_open: false,
        }
    }
}

impl ShellState {
    pub fn toggle_toolbar(&mut self) -> bool {
        self.toolbar_visible = !self.toolbar_visible;
        self.toolbar_visible
    }

    pub fn toggle_export_menu(&mut self) -> bool {
        self.export_menu_open = !self.export_menu_open;
        self.export_menu_open
    }

    pub fn close_export_menu(&mut self) {
        self.export_menu_open = false;
    }
}

/// Confirmation asked before deleting a saved document
pub fn delete_prompt(title: &str) -> String {
    format!("Delete \"{}\"? This cannot be undone.", title)
}
