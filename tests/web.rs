//! WASM browser tests for nexus-office.
//!
//! Run with: `wasm-pack test --headless --firefox` or `--chrome`

#![cfg(target_arch = "wasm32")]

use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

use nexus_office::wasm::flat_buffer::{GESTURE_DRAGGING, GESTURE_PENDING};
use nexus_office::wasm::{BrowserEditor, LocalStore};
use nexus_office::{KeyValueStore, Office, OfficeConfig, RichTextHost, WasmOffice};
use wasm_bindgen_futures::JsFuture;

fn mount_editor(id: &str, markup: &str) -> BrowserEditor {
    let document = web_sys::window().unwrap().document().unwrap();
    let element = document.create_element("div").unwrap();
    element.set_id(id);
    element.set_inner_html(markup);
    document.body().unwrap().append_child(&element).unwrap();
    BrowserEditor::from_element_id(id).unwrap()
}

async fn sleep(ms: i32) {
    let promise = js_sys::Promise::new(&mut |resolve, _reject| {
        web_sys::window()
            .unwrap()
            .set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, ms)
            .unwrap();
    });
    JsFuture::from(promise).await.unwrap();
}

/// Gesture opcode from the overlay header, read the way the page does
fn overlay_gesture(office: &WasmOffice) -> u32 {
    let header = unsafe {
        std::slice::from_raw_parts(
            office.overlay_u32_ptr() as usize as *const u32,
            office.overlay_u32_len() as usize,
        )
    };
    header[3]
}

fn test_config(key: &str) -> OfficeConfig {
    OfficeConfig {
        storage_key: key.to_string(),
        ..OfficeConfig::default()
    }
}

// === Editable region ===

#[wasm_bindgen_test]
fn test_editor_markup_round_trip() {
    let mut editor = mount_editor("editor-markup", "");
    editor.set_markup("<p>Hello</p>");
    assert_eq!(editor.markup(), "<p>Hello</p>");
}

#[wasm_bindgen_test]
fn test_missing_editor_element() {
    assert!(BrowserEditor::from_element_id("no-such-editor").is_err());
}

#[wasm_bindgen_test]
fn test_unknown_format_is_not_sent() {
    let mut editor = mount_editor("editor-format", "<p>same</p>");
    let mut office = Office::open(test_config("nexus-test-format"), LocalStore::open().unwrap());
    assert!(office.format(&mut editor, "fontName", Some("serif")).is_none());
    assert_eq!(editor.markup(), "<p>same</p>");
}

// === localStorage ===

#[wasm_bindgen_test]
fn test_local_store_round_trip() {
    let mut store = LocalStore::open().unwrap();
    store.set("nexus-test-raw", "[1,2]").unwrap();
    assert_eq!(store.get("nexus-test-raw").unwrap().as_deref(), Some("[1,2]"));
}

#[wasm_bindgen_test]
fn test_save_survives_reopen() {
    let key = "nexus-test-library";
    let mut store = LocalStore::open().unwrap();
    store.set(key, "[]").unwrap();

    let mut office = Office::open(test_config(key), store);
    office.set_title("Persisted");
    office.sync_body("<p>kept</p>");
    office.add_image("image/png", b"\x89PNG").unwrap();
    let id = office.save().unwrap();

    let mut reopened = Office::open(test_config(key), LocalStore::open().unwrap());
    reopened.load(id).unwrap();
    assert_eq!(reopened.current().title, "Persisted");
    assert_eq!(reopened.current().body, "<p>kept</p>");
    assert_eq!(reopened.current().images.len(), 1);
}

#[wasm_bindgen_test]
fn test_malformed_payload_starts_empty() {
    let key = "nexus-test-malformed";
    let mut store = LocalStore::open().unwrap();
    store.set(key, "{not json").unwrap();

    let office = Office::open(test_config(key), LocalStore::open().unwrap());
    assert!(office.library().is_empty());
    assert_eq!(
        LocalStore::open().unwrap().get(key).unwrap().as_deref(),
        Some("{not json")
    );
}

// === Long press ===

#[wasm_bindgen_test]
async fn test_long_press_rebuilds_overlay() {
    mount_editor("editor-long-press", "");
    let mut office = WasmOffice::with_config(
        "editor-long-press",
        r#"{"storageKey": "nexus-test-long-press", "longPressMs": 10}"#,
    )
    .unwrap();
    let id = office.add_image("image/png", b"x").unwrap();

    office.press_image(id, 30.0, 30.0).unwrap();
    assert_eq!(overlay_gesture(&office), GESTURE_PENDING);

    sleep(50).await;
    assert_eq!(overlay_gesture(&office), GESTURE_DRAGGING);
    assert!(office.is_dragging());
    assert!(office.pointer_up());
}
