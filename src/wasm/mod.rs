//! WASM bindings for the editor

mod browser;
pub mod flat_buffer;

pub use browser::{alert, confirm, download, print, BrowserEditor, LocalStore};

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use crate::document::{DocumentId, ImageId};
use crate::export::{ExportFormat, ExportOutcome};
use crate::overlay::{LongPressTimer, Release};
use crate::shell::{self, ToolbarAction, ToolbarButton};
use crate::{Office, OfficeConfig, OfficeError, Point, RichTextHost};
use flat_buffer::OverlayBuffer;

/// Initialize panic hook and console logging
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    #[cfg(all(target_family = "wasm", target_os = "unknown"))]
    {
        let level = if cfg!(debug_assertions) {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        };
        tracing_wasm::set_as_global_default_with_config(
            tracing_wasm::WASMLayerConfigBuilder::new()
                .set_max_level(level)
                .build(),
        );
    }
}

impl From<OfficeError> for JsValue {
    fn from(e: OfficeError) -> Self {
        JsValue::from_str(&e.to_string())
    }
}

/// Serialize a payload into a plain JS object
fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    let json = serde_json::to_string(value).map_err(|e| JsValue::from_str(&e.to_string()))?;
    js_sys::JSON::parse(&json)
}

type SharedOffice = Rc<RefCell<Office<LocalStore>>>;
type ChangeCallback = Rc<RefCell<Option<js_sys::Function>>>;
type SharedOverlay = Rc<RefCell<OverlayBuffer>>;

fn rebuild_overlay(office: &SharedOffice, overlay: &SharedOverlay) {
    let office = office.borrow();
    overlay
        .borrow_mut()
        .write(&office.current().images, office.gesture());
}

fn notify(callback: &ChangeCallback) {
    if let Some(f) = callback.borrow().as_ref() {
        if let Err(e) = f.call0(&JsValue::NULL) {
            tracing::warn!("change callback threw: {:?}", e);
        }
    }
}

/// WASM-exposed editor wrapper
#[wasm_bindgen]
pub struct WasmOffice {
    office: SharedOffice,
    editor: BrowserEditor,
    /// Browser handle of the scheduled long-press callback
    pending_timer: Rc<Cell<Option<i32>>>,
    on_change: ChangeCallback,
    /// Shared with the long-press callback, which rebuilds it when a drag starts
    overlay: SharedOverlay,
}

#[wasm_bindgen]
impl WasmOffice {
    /// Bind to the editable element with the given id, using default settings
    #[wasm_bindgen(constructor)]
    pub fn new(editor_id: &str) -> Result<WasmOffice, JsValue> {
        Self::with_config(editor_id, "{}")
    }

    /// Bind with a JSON configuration; missing fields take defaults
    #[wasm_bindgen(js_name = withConfig)]
    pub fn with_config(editor_id: &str, config_json: &str) -> Result<WasmOffice, JsValue> {
        let config = OfficeConfig::from_json(config_json)?;
        let store = LocalStore::open()?;
        let office = Office::open(config, store);
        let mut editor = BrowserEditor::from_element_id(editor_id)?;
        editor.set_markup(&office.current().body);

        let mut this = Self {
            office: Rc::new(RefCell::new(office)),
            editor,
            pending_timer: Rc::new(Cell::new(None)),
            on_change: Rc::new(RefCell::new(None)),
            overlay: Rc::new(RefCell::new(OverlayBuffer::new())),
        };
        this.refresh_overlay();
        Ok(this)
    }

    /// Called after state changes the page did not initiate (a drag starting).
    ///
    /// The overlay buffers are already rebuilt when the callback runs.
    #[wasm_bindgen(js_name = setOnChange)]
    pub fn set_on_change(&mut self, callback: Option<js_sys::Function>) {
        *self.on_change.borrow_mut() = callback;
    }

    // --- document state ---

    #[wasm_bindgen(js_name = getTitle)]
    pub fn get_title(&self) -> String {
        self.office.borrow().current().title.clone()
    }

    #[wasm_bindgen(js_name = setTitle)]
    pub fn set_title(&mut self, title: &str) {
        self.office.borrow_mut().set_title(title);
    }

    /// Pick up the editable region's markup (call from `input` events)
    #[wasm_bindgen(js_name = syncBody)]
    pub fn sync_body(&mut self) {
        let markup = self.editor.markup();
        self.office.borrow_mut().sync_body(markup);
    }

    /// Id of the current document, if it has been saved
    #[wasm_bindgen(js_name = currentId)]
    pub fn current_id(&self) -> Option<f64> {
        self.office.borrow().current().id.map(|id| id.0 as f64)
    }

    /// Current images as `{id, src, width, height, x, y}` objects
    #[wasm_bindgen(js_name = getImages)]
    pub fn get_images(&self) -> Result<JsValue, JsValue> {
        to_js(&self.office.borrow().current().images)
    }

    // --- formatting ---

    /// Apply a toolbar formatting command; unknown commands are ignored
    pub fn format(&mut self, command: &str, value: Option<String>) -> bool {
        self.office
            .borrow_mut()
            .format(&mut self.editor, command, value.as_deref())
            .is_some()
    }

    // --- library ---

    #[wasm_bindgen(js_name = newDocument)]
    pub fn new_document(&mut self) {
        let release = self.office.borrow_mut().new_document();
        self.finish_release(release);
        self.show_current();
    }

    /// Save the current document and confirm with an alert
    pub fn save(&mut self) -> Result<f64, JsValue> {
        self.sync_body();
        let id = self.office.borrow_mut().save()?;
        alert(shell::SAVED_NOTICE);
        Ok(id.0 as f64)
    }

    pub fn load(&mut self, id: f64) -> Result<(), JsValue> {
        let release = self.office.borrow_mut().load(DocumentId(id as u64))?;
        self.finish_release(release);
        self.show_current();
        Ok(())
    }

    /// Delete after confirmation; returns whether the document was deleted
    #[wasm_bindgen(js_name = deleteDocument)]
    pub fn delete_document(&mut self, id: f64) -> Result<bool, JsValue> {
        let id = DocumentId(id as u64);
        let prompt = {
            let office = self.office.borrow();
            let doc = office
                .library()
                .get(id)
                .ok_or(OfficeError::UnknownDocument(id))?;
            shell::delete_prompt(&doc.title)
        };
        if !confirm(&prompt) {
            return Ok(false);
        }
        let was_current = self.office.borrow_mut().delete(id)?;
        if was_current {
            self.clear_pending_timer();
            self.show_current();
        }
        Ok(true)
    }

    /// Saved documents as `{id, title, imageCount, timestamp}` objects
    pub fn documents(&self) -> Result<JsValue, JsValue> {
        to_js(&self.office.borrow().documents())
    }

    // --- import ---

    /// Replace the body with a picked file's text; empty name is a no-op
    #[wasm_bindgen(js_name = importDocument)]
    pub fn import_document(&mut self, file_name: &str, contents: String) -> bool {
        let imported = self.office.borrow_mut().import_document(file_name, contents);
        if imported {
            self.show_current();
        }
        imported
    }

    /// Embed a picked image; returns its id
    #[wasm_bindgen(js_name = addImage)]
    pub fn add_image(&mut self, mime: &str, bytes: &[u8]) -> Result<f64, JsValue> {
        let id = self.office.borrow_mut().add_image(mime, bytes)?;
        self.refresh_overlay();
        Ok(id.0 as f64)
    }

    #[wasm_bindgen(js_name = removeImage)]
    pub fn remove_image(&mut self, id: f64) -> Result<(), JsValue> {
        let release = self.office.borrow_mut().remove_image(ImageId(id as u64))?;
        self.finish_release(release);
        Ok(())
    }

    // --- image gestures ---

    /// Topmost image under a point, in editor coordinates
    #[wasm_bindgen(js_name = imageAt)]
    pub fn image_at(&self, x: f32, y: f32) -> Option<f64> {
        self.office
            .borrow()
            .image_at(Point { x, y })
            .map(|id| id.0 as f64)
    }

    /// Pointer down on an image body; a drag starts after the long press
    #[wasm_bindgen(js_name = pressImage)]
    pub fn press_image(&mut self, id: f64, x: f32, y: f32) -> Result<(), JsValue> {
        let timer = self
            .office
            .borrow_mut()
            .press_image(ImageId(id as u64), Point { x, y })?;
        self.schedule_long_press(timer)?;
        self.refresh_overlay();
        Ok(())
    }

    /// Pointer down on an image's resize handle
    #[wasm_bindgen(js_name = beginResize)]
    pub fn begin_resize(&mut self, id: f64, x: f32, y: f32) -> Result<(), JsValue> {
        self.office
            .borrow_mut()
            .begin_resize(ImageId(id as u64), Point { x, y })?;
        self.refresh_overlay();
        Ok(())
    }

    /// Whether a long press has turned into a drag (for the grab cursor)
    #[wasm_bindgen(js_name = isDragging)]
    pub fn is_dragging(&self) -> bool {
        self.office.borrow().gesture().is_dragging()
    }

    /// Returns true when an image moved or resized
    #[wasm_bindgen(js_name = pointerMove)]
    pub fn pointer_move(&mut self, x: f32, y: f32) -> bool {
        let changed = self.office.borrow_mut().pointer_move(Point { x, y });
        if changed.is_some() {
            self.refresh_overlay();
        }
        changed.is_some()
    }

    /// Returns true when a drag or resize finished
    #[wasm_bindgen(js_name = pointerUp)]
    pub fn pointer_up(&mut self) -> bool {
        let release = self.office.borrow_mut().pointer_up();
        let finished = release.finished.is_some();
        self.finish_release(release);
        finished
    }

    // --- export ---

    /// Export as "txt", "html" or "pdf"
    pub fn export(&mut self, format: &str) -> Result<(), JsValue> {
        let format = ExportFormat::parse(format)
            .ok_or_else(|| JsValue::from_str(&format!("unknown export format: {}", format)))?;
        self.sync_body();
        let outcome = self.office.borrow_mut().export(format, &self.editor);
        match outcome {
            ExportOutcome::Download(artifact) => download(&artifact),
            ExportOutcome::Print { hint } => {
                alert(hint);
                print()
            }
        }
    }

    // --- shell ---

    /// Toolbar groups as arrays of `{id, tooltip}` objects
    pub fn toolbar(&self) -> Result<JsValue, JsValue> {
        let groups: Vec<Vec<ToolbarButton>> = shell::toolbar_groups()
            .into_iter()
            .map(|group| group.into_iter().map(ToolbarButton::from).collect())
            .collect();
        to_js(&groups)
    }

    #[wasm_bindgen(js_name = headerActions)]
    pub fn header_actions(&self) -> Result<JsValue, JsValue> {
        let buttons: Vec<ToolbarButton> = shell::header_actions()
            .into_iter()
            .map(ToolbarButton::from)
            .collect();
        to_js(&buttons)
    }

    #[wasm_bindgen(js_name = exportMenu)]
    pub fn export_menu(&self) -> Result<JsValue, JsValue> {
        let buttons: Vec<ToolbarButton> = shell::export_menu()
            .into_iter()
            .map(ToolbarButton::from)
            .collect();
        to_js(&buttons)
    }

    /// Route a button click by id.
    ///
    /// Returns false for uploads (the page opens its file picker) and for
    /// unknown ids.
    #[wasm_bindgen(js_name = handleAction)]
    pub fn handle_action(&mut self, id: &str) -> Result<bool, JsValue> {
        let Some(action) = ToolbarAction::from_id(id) else {
            tracing::debug!(id, "unknown toolbar action");
            return Ok(false);
        };
        match action {
            ToolbarAction::UploadDocument | ToolbarAction::UploadImage => return Ok(false),
            ToolbarAction::Format(command) => {
                self.format(command.name(), command.value().map(str::to_string));
            }
            ToolbarAction::Save => {
                self.save()?;
            }
            ToolbarAction::NewDocument => self.new_document(),
            ToolbarAction::ToggleExportMenu => {
                self.office.borrow_mut().shell_mut().toggle_export_menu();
            }
            ToolbarAction::Export(format) => {
                let name = match format {
                    ExportFormat::Text => "txt",
                    ExportFormat::Html => "html",
                    ExportFormat::Pdf => "pdf",
                };
                self.export(name)?;
            }
            ToolbarAction::ToggleToolbar => {
                self.office.borrow_mut().shell_mut().toggle_toolbar();
            }
        }
        Ok(true)
    }

    #[wasm_bindgen(js_name = isToolbarVisible)]
    pub fn is_toolbar_visible(&self) -> bool {
        self.office.borrow().shell().toolbar_visible
    }

    #[wasm_bindgen(js_name = isExportMenuOpen)]
    pub fn is_export_menu_open(&self) -> bool {
        self.office.borrow().shell().export_menu_open
    }

    // --- overlay buffers ---

    /// Rebuild the overlay buffers from current state
    #[wasm_bindgen(js_name = refreshOverlay)]
    pub fn refresh_overlay(&mut self) {
        rebuild_overlay(&self.office, &self.overlay);
    }

    #[wasm_bindgen(js_name = overlayU32Ptr)]
    pub fn overlay_u32_ptr(&self) -> u32 {
        self.overlay.borrow().u32_ptr()
    }

    #[wasm_bindgen(js_name = overlayU32Len)]
    pub fn overlay_u32_len(&self) -> u32 {
        self.overlay.borrow().u32_len()
    }

    #[wasm_bindgen(js_name = overlayF32Ptr)]
    pub fn overlay_f32_ptr(&self) -> u32 {
        self.overlay.borrow().f32_ptr()
    }

    #[wasm_bindgen(js_name = overlayF32Len)]
    pub fn overlay_f32_len(&self) -> u32 {
        self.overlay.borrow().f32_len()
    }
}

impl WasmOffice {
    /// Push the current document's body into the editable region
    fn show_current(&mut self) {
        let body = self.office.borrow().current().body.clone();
        self.editor.set_markup(&body);
        self.refresh_overlay();
    }

    fn finish_release(&mut self, release: Release) {
        if release.cancel_timer.is_some() {
            self.clear_pending_timer();
        }
        self.refresh_overlay();
    }

    fn clear_pending_timer(&self) {
        if let Some(handle) = self.pending_timer.take() {
            if let Some(window) = web_sys::window() {
                window.clear_timeout_with_handle(handle);
            }
        }
    }

    /// Schedule the deferred long-press callback.
    ///
    /// The callback only promotes the press if its token is still live, so
    /// a timer that escapes clearing is harmless.
    fn schedule_long_press(&self, timer: LongPressTimer) -> Result<(), JsValue> {
        self.clear_pending_timer();
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;

        let office = Rc::clone(&self.office);
        let overlay = Rc::clone(&self.overlay);
        let pending = Rc::clone(&self.pending_timer);
        let on_change = Rc::clone(&self.on_change);
        let callback = Closure::once_into_js(move || {
            pending.set(None);
            let started = office.borrow_mut().long_press_elapsed(timer.token);
            if started.is_some() {
                rebuild_overlay(&office, &overlay);
                notify(&on_change);
            }
        });

        let handle = window.set_timeout_with_callback_and_timeout_and_arguments_0(
            callback.unchecked_ref(),
            timer.delay_ms as i32,
        )?;
        self.pending_timer.set(Some(handle));
        Ok(())
    }
}
