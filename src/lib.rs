//! Nexus Office: a browser rich-text document editor core
//!
//! This crate provides the editor state behind a single page:
//! - Current document with rich-text body and positioned image overlays
//! - A library of saved documents persisted to a key-value store
//! - Formatting commands forwarded to the host's editable region
//! - Long-press drag and handle resize for images
//! - Plain text and standalone HTML export

pub mod config;
pub mod document;
pub mod error;
pub mod export;
pub mod formatting;
pub mod import;
pub mod library;
pub mod overlay;
pub mod shell;
pub mod wasm;

// Re-export WASM types for direct use
pub use wasm::WasmOffice;

// Re-export primary types
pub use config::OfficeConfig;
pub use document::{Document, DocumentId, ImageId, OverlayImage, Size};
pub use error::{OfficeError, Result};
pub use export::{ExportArtifact, ExportFormat, ExportOutcome};
pub use formatting::{FormatCommand, FormattingDispatcher, HostError, RichTextHost};
pub use library::{DocumentSummary, KeyValueStore, Library, MemoryStore};
pub use overlay::{Gesture, LongPressTimer, OverlayManager, Release, TimerToken};
pub use shell::{ShellState, ToolbarAction};

use serde::{Deserialize, Serialize};

use document::IdGenerator;

/// Editor coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

/// Editor rectangle
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    pub fn contains_point(&self, point: Point) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.width
            && point.y >= self.y
            && point.y <= self.y + self.height
    }
}

/// The main editor state combining all components
pub struct Office<S: KeyValueStore> {
    config: OfficeConfig,
    current: Document,
    library: Library,
    store: S,
    overlay: OverlayManager,
    shell: ShellState,
    ids: IdGenerator,
    dispatcher: FormattingDispatcher,
}

impl<S: KeyValueStore> Office<S> {
    /// Open the editor over a store, reading any saved library.
    ///
    /// A missing or unreadable library starts empty; the stored payload is
    /// left alone until the next save.
    pub fn open(config: OfficeConfig, store: S) -> Self {
        let library = match Library::load(&store, &config.storage_key) {
            Ok(library) => library,
            Err(e) => {
                tracing::warn!(key = %config.storage_key, "starting with an empty library: {}", e);
                Library::new()
            }
        };

        let mut ids = IdGenerator::new();
        for doc in library.iter() {
            if let Some(id) = doc.id {
                ids.observe(id.0);
            }
            for image in &doc.images {
                ids.observe(image.id.0);
            }
        }
        tracing::info!(documents = library.len(), "library opened");

        Self {
            current: Document::new(config.default_title.clone()),
            overlay: OverlayManager::from_config(&config),
            config,
            library,
            store,
            shell: ShellState::default(),
            ids,
            dispatcher: FormattingDispatcher,
        }
    }

    pub fn config(&self) -> &OfficeConfig {
        &self.config
    }

    /// The document bound to the editable region
    pub fn current(&self) -> &Document {
        &self.current
    }

    pub fn library(&self) -> &Library {
        &self.library
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn shell(&self) -> &ShellState {
        &self.shell
    }

    pub fn shell_mut(&mut self) -> &mut ShellState {
        &mut self.shell
    }

    pub fn gesture(&self) -> &Gesture {
        self.overlay.gesture()
    }

    /// Saved documents in library order
    pub fn documents(&self) -> Vec<DocumentSummary> {
        self.library.summaries()
    }

    /// Replace the current document with a fresh, unsaved one
    pub fn new_document(&mut self) -> Release {
        let release = self.overlay.release();
        self.current = Document::new(self.config.default_title.clone());
        tracing::debug!("new document");
        release
    }

    pub fn set_title(&mut self, title: &str) {
        self.current.title = title.to_string();
    }

    /// Record the editable region's markup after user input
    pub fn sync_body(&mut self, markup: impl Into<String>) {
        self.current.body = markup.into();
    }

    /// Commit the current document into the library and persist it.
    ///
    /// The library is only updated once the store accepted the write.
    pub fn save(&mut self) -> Result<DocumentId> {
        let id = match self.current.id {
            Some(id) => id,
            None => DocumentId(self.ids.next()?),
        };

        let mut snapshot = self.current.clone();
        snapshot.id = Some(id);
        snapshot.touch();

        let mut library = self.library.clone();
        let appended = library.upsert(snapshot.clone())?;
        library.persist(&mut self.store, &self.config.storage_key)?;

        self.library = library;
        self.current = snapshot;
        tracing::info!(%id, appended, title = %self.current.title, "document saved");
        Ok(id)
    }

    /// Make a saved document current
    pub fn load(&mut self, id: DocumentId) -> Result<Release> {
        let doc = self
            .library
            .get(id)
            .cloned()
            .ok_or(OfficeError::UnknownDocument(id))?;
        let release = self.overlay.release();
        self.current = doc;
        tracing::info!(%id, "document loaded");
        Ok(release)
    }

    /// Remove a saved document and persist the library.
    ///
    /// Deleting the current document resets the editor to a new one; the
    /// returned flag reports whether that happened.
    pub fn delete(&mut self, id: DocumentId) -> Result<bool> {
        if !self.library.contains(id) {
            return Err(OfficeError::UnknownDocument(id));
        }
        let mut library = self.library.clone();
        library.remove(id);
        library.persist(&mut self.store, &self.config.storage_key)?;
        self.library = library;

        let was_current = self.current.id == Some(id);
        if was_current {
            self.new_document();
        }
        tracing::info!(%id, was_current, "document deleted");
        Ok(was_current)
    }

    /// Apply a toolbar formatting command and pick up the resulting markup.
    ///
    /// Unsupported commands leave the document untouched.
    pub fn format(
        &mut self,
        host: &mut dyn RichTextHost,
        name: &str,
        value: Option<&str>,
    ) -> Option<FormatCommand> {
        let applied = self.dispatcher.dispatch(host, name, value)?;
        self.current.body = host.markup();
        Some(applied)
    }

    /// Load a picked file into the current document.
    ///
    /// Returns `false` when no file was picked.
    pub fn import_document(&mut self, file_name: &str, contents: String) -> bool {
        match import::import_document(file_name, contents) {
            Some(imported) => {
                self.current.title = imported.title;
                self.current.body = imported.markup;
                tracing::info!(file_name, kind = ?imported.kind, "document imported");
                true
            }
            None => false,
        }
    }

    /// Embed a picked image at the default size and offset
    pub fn add_image(&mut self, mime: &str, bytes: &[u8]) -> Result<ImageId> {
        let id = ImageId(self.ids.next()?);
        let image = OverlayImage::new(
            id,
            import::import_image(mime, bytes),
            Size::new(self.config.default_image_width, self.config.default_image_height),
            self.config.initial_image_offset,
        );
        self.current.images.push(image);
        tracing::debug!(%id, bytes = bytes.len(), "image added");
        Ok(id)
    }

    pub fn remove_image(&mut self, id: ImageId) -> Result<Release> {
        let release = self.overlay.cancel_for(id);
        self.current
            .remove_image(id)
            .ok_or(OfficeError::UnknownImage(id))?;
        Ok(release)
    }

    /// Topmost image under a point
    pub fn image_at(&self, point: Point) -> Option<ImageId> {
        self.current
            .images
            .iter()
            .rev()
            .find(|img| img.bounds().contains_point(point))
            .map(|img| img.id)
    }

    /// Pointer down on an image body; schedule the returned timer
    pub fn press_image(&mut self, id: ImageId, pointer: Point) -> Result<LongPressTimer> {
        let image = self.current.image(id).ok_or(OfficeError::UnknownImage(id))?;
        self.overlay.press(image, pointer)
    }

    /// Long-press timer fired
    pub fn long_press_elapsed(&mut self, token: TimerToken) -> Option<ImageId> {
        self.overlay.long_press_elapsed(token)
    }

    /// Pointer down on an image's resize handle
    pub fn begin_resize(&mut self, id: ImageId, pointer: Point) -> Result<()> {
        let image = self.current.image(id).ok_or(OfficeError::UnknownImage(id))?;
        self.overlay.begin_resize(image, pointer)
    }

    pub fn pointer_move(&mut self, pointer: Point) -> Option<ImageId> {
        self.overlay.pointer_move(&mut self.current.images, pointer)
    }

    pub fn pointer_up(&mut self) -> Release {
        self.overlay.release()
    }

    /// Export the current document and close the export menu
    pub fn export(&mut self, format: ExportFormat, host: &dyn RichTextHost) -> ExportOutcome {
        self.shell.close_export_menu();
        let rendered = match format {
            ExportFormat::Text => host.rendered_text(),
            ExportFormat::Html | ExportFormat::Pdf => String::new(),
        };
        export::export(&self.current, format, &rendered)
    }
}
