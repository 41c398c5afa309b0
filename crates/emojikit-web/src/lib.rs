#![forbid(unsafe_code)]

//! Browser backend for emojikit.
//!
//! On `wasm32` this crate exports `EmojiKitWeb` through `wasm-bindgen`,
//! backed by:
//! - `CanvasProbe`: paint test on a 1×1 canvas, width test on a `<span>`,
//! - `LocalStorageStore`: `window.localStorage` as a key-value store.
//!
//! The JSON adapter in [`bridge`] is target-independent.

pub mod bridge;

#[cfg(target_arch = "wasm32")]
mod wasm;

pub use bridge::{Bridge, BridgeError, BridgeResult};

#[cfg(target_arch = "wasm32")]
pub use wasm::{CanvasProbe, EmojiKitWeb, LocalStorageStore};

/// CSS class given to the width-measuring span.
pub const DEFAULT_MEASURE_CLASS: &str = "emojikit-emoji";

/// Native builds compile this crate as a stub so `cargo check --workspace` stays
/// green on non-wasm targets.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Default)]
pub struct EmojiKitWeb;

#[cfg(not(target_arch = "wasm32"))]
impl EmojiKitWeb {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self
    }
}
