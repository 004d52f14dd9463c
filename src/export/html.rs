//! Standalone HTML document export

use std::fmt::Write;

use pulldown_cmark_escape::{escape_href, escape_html};

use crate::document::{Document, OverlayImage};

const STYLESHEET: &str = "\
    body { font-family: Arial, sans-serif; max-width: 800px; margin: 40px auto; padding: 20px; line-height: 1.6; }
    .document { position: relative; }
    .document img.overlay { position: absolute; object-fit: cover; }";

/// Render the document as a self-contained HTML page.
///
/// The body markup is embedded verbatim; each image becomes one absolutely
/// positioned `<img>` carrying its recorded geometry.
pub fn render_html(doc: &Document) -> String {
    let mut html = String::with_capacity(doc.body.len() + 512 + image_bytes(&doc.images));
    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n  <meta charset=\"UTF-8\">\n");
    html.push_str("  <title>");
    let _ = escape_html(&mut html, &doc.title);
    html.push_str("</title>\n");
    let _ = writeln!(html, "  <style>\n{}\n  </style>", STYLESHEET);
    html.push_str("</head>\n<body>\n<div class=\"document\">\n");
    html.push_str(&doc.body);
    html.push('\n');
    for image in &doc.images {
        html.push_str(&image_tag(image));
        html.push('\n');
    }
    html.push_str("</div>\n</body>\n</html>\n");
    html
}

fn image_bytes(images: &[OverlayImage]) -> usize {
    images.iter().map(|img| img.src.len() + 128).sum()
}

/// One positioned image tag
pub fn image_tag(image: &OverlayImage) -> String {
    let mut tag = String::with_capacity(image.src.len() + 128);
    tag.push_str("<img class=\"overlay\" src=\"");
    let _ = escape_href(&mut tag, &image.src);
    let _ = write!(
        tag,
        "\" alt=\"\" style=\"left: {}px; top: {}px; width: {}px; height: {}px;\" />",
        image.x, image.y, image.width, image.height,
    );
    tag
}
