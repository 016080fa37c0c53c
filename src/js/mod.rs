//! Embedded JavaScript Module
//!
//! A Boa engine wrapper with a worker thread, plus the extension that
//! exposes the `uicontrols` API to scripts.

mod client;
mod engine;
mod extension;
mod shim;

pub use client::JsEngineClient;
pub use engine::{JsCommand, JsEngine, JsEngineBuilder, JsEngineExtension};
pub use extension::{SelectionNotifier, UiControlsExtension};
