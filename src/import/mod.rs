//! Importing local files into the current document

use crate::document::data_uri;

/// Document file types the import picker offers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Text,
    Markdown,
    Docx,
    Pdf,
    Other,
}

impl DocumentKind {
    pub fn from_file_name(file_name: &str) -> Self {
        match extension(file_name).map(str::to_ascii_lowercase).as_deref() {
            Some("txt") => DocumentKind::Text,
            Some("md") => DocumentKind::Markdown,
            Some("docx") => DocumentKind::Docx,
            Some("pdf") => DocumentKind::Pdf,
            _ => DocumentKind::Other,
        }
    }

    /// Binary formats read as text produce unusable markup
    pub fn is_binary(&self) -> bool {
        matches!(self, DocumentKind::Docx | DocumentKind::Pdf)
    }
}

/// Value for the file picker's `accept` attribute
pub const DOCUMENT_ACCEPT: &str = ".txt,.md,.docx,.pdf";
pub const IMAGE_ACCEPT: &str = "image/*";

#[derive(Debug, Clone, PartialEq)]
pub struct ImportedDocument {
    pub title: String,
    /// File contents, used as body markup verbatim
    pub markup: String,
    pub kind: DocumentKind,
}

/// Turn a picked file into a title and body.
///
/// Returns `None` when no file was picked (empty name).
pub fn import_document(file_name: &str, contents: String) -> Option<ImportedDocument> {
    if file_name.is_empty() {
        return None;
    }
    let kind = DocumentKind::from_file_name(file_name);
    if kind.is_binary() {
        tracing::warn!(file_name, ?kind, "binary document imported as text; content will not be readable");
    }
    Some(ImportedDocument {
        title: strip_extension(file_name).to_string(),
        markup: contents,
        kind,
    })
}

/// Embed a picked image file as a data URI
pub fn import_image(mime: &str, bytes: &[u8]) -> String {
    if !mime.starts_with("image/") {
        tracing::warn!(mime, "embedding non-image file as overlay");
    }
    data_uri(mime, bytes)
}

fn extension(file_name: &str) -> Option<&str> {
    let dot = file_name.rfind('.')?;
    let ext = &file_name[dot + 1..];
    if ext.is_empty() || ext.contains('/') {
        None
    } else {
        Some(ext)
    }
}

/// Drop the last extension: `report.final.md` becomes `report.final`
pub fn strip_extension(file_name: &str) -> &str {
    match extension(file_name) {
        Some(ext) => &file_name[..file_name.len() - ext.len() - 1],
        None => file_name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_extension() {
        assert_eq!(strip_extension("notes.txt"), "notes");
        assert_eq!(strip_extension("report.final.md"), "report.final");
        assert_eq!(strip_extension("README"), "README");
        assert_eq!(strip_extension("trailing."), "trailing.");
    }

    #[test]
    fn test_import_document() {
        let imported = import_document("Plan.MD", "# Plan\nstep one".to_string()).unwrap();
        assert_eq!(imported.title, "Plan");
        assert_eq!(imported.markup, "# Plan\nstep one");
        assert_eq!(imported.kind, DocumentKind::Markdown);
    }

    #[test]
    fn test_binary_kinds_still_import() {
        let imported = import_document("contract.docx", "PK\u{3}\u{4}".to_string()).unwrap();
        assert!(imported.kind.is_binary());
        assert_eq!(imported.title, "contract");
    }

    #[test]
    fn test_no_file_selected() {
        assert!(import_document("", String::new()).is_none());
    }

    #[test]
    fn test_import_image() {
        assert_eq!(import_image("image/gif", &[0xff]), "data:image/gif;base64,/w==");
    }
}
