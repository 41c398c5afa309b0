#![forbid(unsafe_code)]

use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, HtmlElement, Storage};

use emojikit::{
    KeyValueStore, KitConfig, ProbeError, ProbeResult, RenderingProbe, StorageError, StorageKeys,
};

use crate::bridge::{Bridge, BridgeError};
use crate::DEFAULT_MEASURE_CLASS;

fn js_error(message: &str) -> JsValue {
    JsValue::from_str(message)
}

fn bridge_error(err: BridgeError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn probe_error(err: JsValue) -> ProbeError {
    ProbeError::Surface(format!("{err:?}"))
}

fn storage_error(err: JsValue) -> StorageError {
    StorageError::Unavailable(format!("{err:?}"))
}

fn document() -> Result<Document, JsValue> {
    web_sys::window()
        .ok_or_else(|| js_error("no global window"))?
        .document()
        .ok_or_else(|| js_error("window has no document"))
}

/// Probe backed by a 1×1 canvas (paint test) and a detached `<span>`
/// (width test).
pub struct CanvasProbe {
    document: Document,
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    class_name: String,
}

impl CanvasProbe {
    /// `class_name` styles the measuring span like the picker's emoji.
    pub fn new(class_name: &str) -> Result<Self, JsValue> {
        let document = document()?;
        let canvas: HtmlCanvasElement = document
            .create_element("canvas")?
            .dyn_into()
            .map_err(JsValue::from)?;

        let options = js_sys::Object::new();
        js_sys::Reflect::set(&options, &JsValue::from_str("willReadFrequently"), &JsValue::TRUE)?;
        let ctx: CanvasRenderingContext2d = canvas
            .get_context_with_context_options("2d", &options)?
            .ok_or_else(|| js_error("2d context unavailable"))?
            .dyn_into()
            .map_err(JsValue::from)?;

        Ok(Self {
            document,
            canvas,
            ctx,
            class_name: class_name.to_string(),
        })
    }

    fn paint_alpha(&self, sequence: &str) -> Result<u8, JsValue> {
        // Resizing also clears the canvas.
        self.canvas.set_width(1);
        self.canvas.set_height(1);
        self.ctx.fill_text(sequence, -4.0, 4.0)?;
        let pixel = self.ctx.get_image_data(0.0, 0.0, 1.0, 1.0)?;
        Ok(pixel.data().0.get(3).copied().unwrap_or(0))
    }

    fn offset_width(&self, sequence: &str) -> Result<f64, JsValue> {
        let body = self
            .document
            .body()
            .ok_or_else(|| js_error("document has no body"))?;
        let span: HtmlElement = self
            .document
            .create_element("span")?
            .dyn_into()
            .map_err(JsValue::from)?;
        span.class_list().add_1(&self.class_name)?;
        span.append_child(&self.document.create_text_node(sequence))?;

        body.append_child(&span)?;
        let width = f64::from(span.offset_width());
        body.remove_child(&span)?;
        Ok(width)
    }
}

impl RenderingProbe for CanvasProbe {
    fn can_render(&mut self, sequence: &str) -> ProbeResult<bool> {
        self.paint_alpha(sequence)
            .map(|alpha| alpha > 0)
            .map_err(probe_error)
    }

    fn measured_width(&mut self, sequence: &str) -> ProbeResult<f64> {
        self.offset_width(sequence).map_err(probe_error)
    }
}

/// [`KeyValueStore`] over `window.localStorage`.
pub struct LocalStorageStore {
    storage: Storage,
}

impl LocalStorageStore {
    pub fn new() -> Result<Self, JsValue> {
        let storage = web_sys::window()
            .ok_or_else(|| js_error("no global window"))?
            .local_storage()?
            .ok_or_else(|| js_error("localStorage unavailable"))?;
        Ok(Self { storage })
    }
}

impl KeyValueStore for LocalStorageStore {
    fn name(&self) -> &str {
        "LocalStorageStore"
    }

    fn get(&self, key: &str) -> emojikit::StorageResult<Option<String>> {
        self.storage.get_item(key).map_err(storage_error)
    }

    fn set(&self, key: &str, value: &str) -> emojikit::StorageResult<()> {
        self.storage.set_item(key, value).map_err(storage_error)
    }

    fn remove(&self, key: &str) -> emojikit::StorageResult<()> {
        self.storage.remove_item(key).map_err(storage_error)
    }

    fn keys(&self) -> emojikit::StorageResult<Vec<String>> {
        let len = self.storage.length().map_err(storage_error)?;
        let mut keys = Vec::with_capacity(len as usize);
        for index in 0..len {
            if let Some(key) = self.storage.key(index).map_err(storage_error)? {
                keys.push(key);
            }
        }
        Ok(keys)
    }
}

/// Emoji catalogue for a browser page.
///
/// Results are JSON strings; failures throw with a message.
#[wasm_bindgen]
pub struct EmojiKitWeb {
    bridge: Bridge<CanvasProbe>,
}

#[wasm_bindgen]
impl EmojiKitWeb {
    /// Load `catalogue` (JSON) and persisted state under `prefix`
    /// (default `emojikit`).
    #[wasm_bindgen(constructor)]
    pub fn new(catalogue: &str, prefix: Option<String>) -> Result<EmojiKitWeb, JsValue> {
        let probe = CanvasProbe::new(DEFAULT_MEASURE_CLASS)?;
        let store = Rc::new(LocalStorageStore::new()?);
        let keys = prefix.map_or_else(StorageKeys::default, StorageKeys::new);
        let config = KitConfig {
            keys,
            ..KitConfig::default()
        };
        let bridge = Bridge::open(catalogue, probe, store, config).map_err(bridge_error)?;
        Ok(Self { bridge })
    }

    /// `0` not supported, `1` supported, `2` fallback.
    pub fn classify(&mut self, sequence: &str) -> u8 {
        self.bridge.classify(sequence)
    }

    #[wasm_bindgen(js_name = applyTone)]
    pub fn apply_tone(&self, sequence: &str, tone: &str) -> Result<String, JsValue> {
        self.bridge.apply_tone(sequence, tone).map_err(bridge_error)
    }

    #[wasm_bindgen(js_name = listTones)]
    pub fn list_tones(&self) -> Result<String, JsValue> {
        self.bridge.list_tones().map_err(bridge_error)
    }

    #[wasm_bindgen(js_name = addFavorite)]
    pub fn add_favorite(&mut self, emoji: &str) -> bool {
        self.bridge.add_favorite(emoji)
    }

    #[wasm_bindgen(js_name = listFavorites)]
    pub fn list_favorites(&self) -> Result<String, JsValue> {
        self.bridge.list_favorites().map_err(bridge_error)
    }

    #[wasm_bindgen(js_name = clearFavorites)]
    pub fn clear_favorites(&mut self) {
        self.bridge.clear_favorites();
    }

    pub fn search(&self, term: &str) -> Result<String, JsValue> {
        self.bridge.search(term).map_err(bridge_error)
    }

    pub fn lookup(&self, emoji: &str) -> Result<Option<String>, JsValue> {
        self.bridge.lookup(emoji).map_err(bridge_error)
    }

    /// Palette plan for picker `options` (camelCase JSON, may be empty).
    pub fn palette(&mut self, options: &str) -> Result<String, JsValue> {
        self.bridge.palette(options).map_err(bridge_error)
    }

    #[wasm_bindgen(js_name = resetStoredData)]
    pub fn reset_stored_data(&mut self) -> Result<usize, JsValue> {
        self.bridge.reset_stored_data().map_err(bridge_error)
    }
}
