//! Browser implementations of the host capabilities
//!
//! These assume a `wasm32-unknown-unknown` target with a DOM.

use js_sys::Array;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, HtmlDocument, HtmlElement, Storage, Url};

use crate::export::ExportArtifact;
use crate::formatting::{HostError, RichTextHost};
use crate::library::KeyValueStore;
use crate::{OfficeError, Result};

fn window() -> std::result::Result<web_sys::Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("no window"))
}

fn html_document() -> std::result::Result<HtmlDocument, JsValue> {
    window()?
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?
        .dyn_into::<HtmlDocument>()
        .map_err(|_| JsValue::from_str("document is not an HTML document"))
}

fn js_error(value: JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}

/// A `contenteditable` element driven through `document.execCommand`
pub struct BrowserEditor {
    element: HtmlElement,
    document: HtmlDocument,
}

impl BrowserEditor {
    /// Bind to the element with the given id
    pub fn from_element_id(id: &str) -> std::result::Result<Self, JsValue> {
        let document = html_document()?;
        let element = document
            .get_element_by_id(id)
            .ok_or_else(|| JsValue::from_str(&format!("no element #{}", id)))?
            .dyn_into::<HtmlElement>()
            .map_err(|_| JsValue::from_str("editor element is not an HTMLElement"))?;
        element.set_content_editable("true");
        Ok(Self { element, document })
    }
}

impl RichTextHost for BrowserEditor {
    fn exec_command(&mut self, command: &str, value: Option<&str>) -> std::result::Result<bool, HostError> {
        self.document
            .exec_command_with_show_ui_and_value(command, false, value.unwrap_or(""))
            .map_err(|e| HostError(js_error(e)))
    }

    fn focus(&mut self) {
        if let Err(e) = self.element.focus() {
            tracing::debug!("editor focus failed: {}", js_error(e));
        }
    }

    fn markup(&self) -> String {
        self.element.inner_html()
    }

    fn set_markup(&mut self, markup: &str) {
        self.element.set_inner_html(markup);
    }

    fn rendered_text(&self) -> String {
        self.element.inner_text()
    }
}

/// `window.localStorage`
pub struct LocalStore {
    storage: Storage,
}

impl LocalStore {
    pub fn open() -> Result<Self> {
        let storage = window()
            .and_then(|w| w.local_storage())
            .map_err(|e| OfficeError::Storage(js_error(e)))?
            .ok_or_else(|| OfficeError::Storage("localStorage is disabled".to_string()))?;
        Ok(Self { storage })
    }
}

impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.storage
            .get_item(key)
            .map_err(|e| OfficeError::Storage(js_error(e)))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.storage
            .set_item(key, value)
            .map_err(|e| OfficeError::Storage(js_error(e)))
    }
}

/// Offer an export as a file download
pub fn download(artifact: &ExportArtifact) -> std::result::Result<(), JsValue> {
    let parts = Array::new();
    parts.push(&JsValue::from_str(&artifact.contents));
    let options = BlobPropertyBag::new();
    options.set_type(artifact.mime);
    let blob = Blob::new_with_str_sequence_and_options(&parts, &options)?;

    let url = Url::create_object_url_with_blob(&blob)?;
    let anchor = html_document()?
        .create_element("a")?
        .dyn_into::<HtmlAnchorElement>()
        .map_err(|_| JsValue::from_str("could not create anchor"))?;
    anchor.set_href(&url);
    anchor.set_download(&artifact.file_name);
    anchor.click();
    Url::revoke_object_url(&url)?;

    tracing::info!(file_name = %artifact.file_name, bytes = artifact.contents.len(), "export downloaded");
    Ok(())
}

/// Open the native print dialog
pub fn print() -> std::result::Result<(), JsValue> {
    window()?.print()
}

pub fn alert(message: &str) {
    if let Ok(window) = window() {
        let _ = window.alert_with_message(message);
    }
}

/// Blocking yes/no dialog; a dialog that cannot be shown counts as "no"
pub fn confirm(message: &str) -> bool {
    window()
        .and_then(|w| w.confirm_with_message(message))
        .unwrap_or(false)
}
