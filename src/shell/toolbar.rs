//! Toolbar and header layout

use serde::Serialize;

use crate::export::ExportFormat;
use crate::formatting::{Alignment, BlockFormat, FormatCommand, ListStyle};
use crate::import::{DOCUMENT_ACCEPT, IMAGE_ACCEPT};

/// Something a toolbar or header button does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolbarAction {
    UploadDocument,
    UploadImage,
    Format(FormatCommand),
    Save,
    NewDocument,
    ToggleExportMenu,
    Export(ExportFormat),
    ToggleToolbar,
}

impl ToolbarAction {
    /// Stable id the page uses to route clicks
    pub fn id(&self) -> String {
        match self {
            ToolbarAction::UploadDocument => "upload-document".to_string(),
            ToolbarAction::UploadImage => "upload-image".to_string(),
            ToolbarAction::Format(command) => match command.value() {
                Some(value) => format!("{}:{}", command.name(), value),
                None => command.name().to_string(),
            },
            ToolbarAction::Save => "save".to_string(),
            ToolbarAction::NewDocument => "new".to_string(),
            ToolbarAction::ToggleExportMenu => "export-menu".to_string(),
            ToolbarAction::Export(ExportFormat::Text) => "export:txt".to_string(),
            ToolbarAction::Export(ExportFormat::Html) => "export:html".to_string(),
            ToolbarAction::Export(ExportFormat::Pdf) => "export:pdf".to_string(),
            ToolbarAction::ToggleToolbar => "toggle-toolbar".to_string(),
        }
    }

    /// Inverse of [`id`](Self::id)
    pub fn from_id(id: &str) -> Option<Self> {
        let action = match id {
            "upload-document" => ToolbarAction::UploadDocument,
            "upload-image" => ToolbarAction::UploadImage,
            "save" => ToolbarAction::Save,
            "new" => ToolbarAction::NewDocument,
            "export-menu" => ToolbarAction::ToggleExportMenu,
            "toggle-toolbar" => ToolbarAction::ToggleToolbar,
            _ => {
                if let Some(format) = id.strip_prefix("export:") {
                    return ExportFormat::parse(format).map(ToolbarAction::Export);
                }
                let (name, value) = match id.split_once(':') {
                    Some((name, value)) => (name, Some(value)),
                    None => (id, None),
                };
                return FormatCommand::parse(name, value).map(ToolbarAction::Format);
            }
        };
        Some(action)
    }

    /// File types for upload buttons, as a picker `accept` value
    pub fn accept(&self) -> Option<&'static str> {
        match self {
            ToolbarAction::UploadDocument => Some(DOCUMENT_ACCEPT),
            ToolbarAction::UploadImage => Some(IMAGE_ACCEPT),
            _ => None,
        }
    }

    pub fn tooltip(&self) -> &'static str {
        match self {
            ToolbarAction::UploadDocument => "Upload Document",
            ToolbarAction::UploadImage => "Upload Image/Logo",
            ToolbarAction::Format(FormatCommand::Bold) => "Bold",
            ToolbarAction::Format(FormatCommand::Italic) => "Italic",
            ToolbarAction::Format(FormatCommand::Underline) => "Underline",
            ToolbarAction::Format(FormatCommand::Block(BlockFormat::Heading(1))) => "Heading 1",
            ToolbarAction::Format(FormatCommand::Block(BlockFormat::Heading(2))) => "Heading 2",
            ToolbarAction::Format(FormatCommand::Block(_)) => "Block format",
            ToolbarAction::Format(FormatCommand::List(ListStyle::Bullet)) => "Bulleted list",
            ToolbarAction::Format(FormatCommand::List(ListStyle::Numbered)) => "Numbered list",
            ToolbarAction::Format(FormatCommand::Align(Alignment::Left)) => "Align left",
            ToolbarAction::Format(FormatCommand::Align(Alignment::Center)) => "Center",
            ToolbarAction::Format(FormatCommand::Align(Alignment::Right)) => "Align right",
            ToolbarAction::Save => "Save",
            ToolbarAction::NewDocument => "New document",
            ToolbarAction::ToggleExportMenu => "Export",
            ToolbarAction::Export(ExportFormat::Text) => "Export TXT",
            ToolbarAction::Export(ExportFormat::Html) => "Export HTML",
            ToolbarAction::Export(ExportFormat::Pdf) => "Export PDF",
            ToolbarAction::ToggleToolbar => "Toggle toolbar",
        }
    }
}

/// Serializable button description for the page
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolbarButton {
    pub id: String,
    pub tooltip: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accept: Option<&'static str>,
}

impl From<ToolbarAction> for ToolbarButton {
    fn from(action: ToolbarAction) -> Self {
        Self {
            id: action.id(),
            tooltip: action.tooltip(),
            accept: action.accept(),
        }
    }
}

/// Groups are rendered with a separator between them
pub fn toolbar_groups() -> Vec<Vec<ToolbarAction>> {
    use FormatCommand::*;
    vec![
        vec![ToolbarAction::UploadDocument, ToolbarAction::UploadImage],
        vec![
            ToolbarAction::Format(Bold),
            ToolbarAction::Format(Italic),
            ToolbarAction::Format(Underline),
        ],
        vec![
            ToolbarAction::Format(Block(BlockFormat::Heading(1))),
            ToolbarAction::Format(Block(BlockFormat::Heading(2))),
        ],
        vec![
            ToolbarAction::Format(List(ListStyle::Bullet)),
            ToolbarAction::Format(List(ListStyle::Numbered)),
        ],
        vec![
            ToolbarAction::Format(Align(Alignment::Left)),
            ToolbarAction::Format(Align(Alignment::Center)),
            ToolbarAction::Format(Align(Alignment::Right)),
        ],
    ]
}

pub fn header_actions() -> Vec<ToolbarAction> {
    vec![
        ToolbarAction::NewDocument,
        ToolbarAction::Save,
        ToolbarAction::ToggleExportMenu,
    ]
}

pub fn export_menu() -> Vec<ToolbarAction> {
    vec![
        ToolbarAction::Export(ExportFormat::Text),
        ToolbarAction::Export(ExportFormat::Html),
        ToolbarAction::Export(ExportFormat::Pdf),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_button_routes_back() {
        let all = toolbar_groups()
            .into_iter()
            .flatten()
            .chain(header_actions())
            .chain(export_menu());
        for action in all {
            assert_eq!(ToolbarAction::from_id(&action.id()), Some(action), "{}", action.id());
        }
    }

    #[test]
    fn test_heading_ids() {
        assert_eq!(
            ToolbarAction::Format(FormatCommand::Block(BlockFormat::Heading(2))).id(),
            "formatBlock:h2"
        );
        assert_eq!(ToolbarAction::from_id("export:docx"), None);
        assert_eq!(ToolbarAction::from_id("explode"), None);
    }

    #[test]
    fn test_upload_buttons_carry_accept() {
        let json = serde_json::to_value(ToolbarButton::from(ToolbarAction::UploadDocument)).unwrap();
        assert_eq!(json["accept"], ".txt,.md,.docx,.pdf");
        let json = serde_json::to_value(ToolbarButton::from(ToolbarAction::UploadImage)).unwrap();
        assert_eq!(json["accept"], "image/*");
        let json = serde_json::to_value(ToolbarButton::from(ToolbarAction::Save)).unwrap();
        assert!(json.get("accept").is_none());
    }

    #[test]
    fn test_toolbar_covers_format_commands() {
        let count = toolbar_groups()
            .iter()
            .flatten()
            .filter(|a| matches!(a, ToolbarAction::Format(_)))
            .count();
        assert_eq!(count, 10);
    }
}
