//! Export: plain text, standalone HTML, or the host's print dialog

mod html;
mod text;

pub use html::{image_tag, render_html};
pub use text::markup_to_text;

use crate::document::Document;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Text,
    Html,
    /// Handled by the host's print dialog
    Pdf,
}

impl ExportFormat {
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "txt" | "text" => Some(ExportFormat::Text),
            "html" | "htm" => Some(ExportFormat::Html),
            "pdf" => Some(ExportFormat::Pdf),
            _ => None,
        }
    }
}

/// A file ready for download
#[derive(Debug, Clone, PartialEq)]
pub struct ExportArtifact {
    pub file_name: String,
    pub mime: &'static str,
    pub contents: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExportOutcome {
    Download(ExportArtifact),
    /// Open the native print dialog after showing the given hint
    Print { hint: &'static str },
}

/// Hint shown before handing PDF export to the print dialog
pub const PDF_HINT: &str =
    "PDF export: for best results, use \"Print > Save as PDF\" in your browser.";

/// Serialize a document.
///
/// `rendered_text` is the editable region's visible text, used for plain
/// text export so the output matches what the user sees.
pub fn export(doc: &Document, format: ExportFormat, rendered_text: &str) -> ExportOutcome {
    let stem = file_stem(&doc.title);
    match format {
        ExportFormat::Text => ExportOutcome::Download(ExportArtifact {
            file_name: format!("{}.txt", stem),
            mime: "text/plain",
            contents: rendered_text.to_string(),
        }),
        ExportFormat::Html => ExportOutcome::Download(ExportArtifact {
            file_name: format!("{}.html", stem),
            mime: "text/html",
            contents: render_html(doc),
        }),
        ExportFormat::Pdf => ExportOutcome::Print { hint: PDF_HINT },
    }
}

/// Download name for a title, never empty
fn file_stem(title: &str) -> &str {
    let title = title.trim();
    if title.is_empty() {
        "document"
    } else {
        title
    }
}
