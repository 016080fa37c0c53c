//! UI Controls Extension
//!
//! Registers the `__ui_*` native functions backing the `uicontrols` script
//! API. The natives drive the same tab/tool-bar proxies a Rust embedder
//! would, with script functions (`JsObject` handles) as the callback type.
//!
//! Options objects cross the boundary as JSON strings, already stripped of
//! their `onSelect` entry by the shim; the callback itself arrives as a
//! separate argument and goes straight into the registry, so it is never part
//! of a forwarded command.

use std::cell::RefCell;

use boa_engine::{Context, JsError, JsObject, JsResult, JsString, JsValue, NativeFunction};
use serde::de::DeserializeOwned;

use crate::controls::{BarOptions, ItemOptions, Tag, TabBar, ToolBar};
use crate::host::HostClient;
use crate::js::shim::register_uicontrols_shim;
use crate::js::{JsEngineClient, JsEngineExtension};

/// Engine extension exposing native tab and tool bars to scripts.
pub struct UiControlsExtension {
    host: HostClient,
}

impl UiControlsExtension {
    pub fn new(host: HostClient) -> Self {
        Self { host }
    }
}

impl JsEngineExtension for UiControlsExtension {
    fn register(&self, context: &mut Context, _client: JsEngineClient) -> Result<(), JsError> {
        log::info!("Registering UI controls native functions");
        // Leak the bridge to get a 'static reference for Boa closures.
        // TODO: revisit if engines ever become restartable within a process
        let bridge: &'static ScriptBridge = Box::leak(Box::new(ScriptBridge::new(self.host.clone())));
        register_ui_functions(context, bridge)?;
        register_uicontrols_shim(context);
        Ok(())
    }
}

/// Host-side handle for delivering selection notifications into the engine.
///
/// The host calls this at arbitrary times after item creation; any tag value
/// is safe, including ones that were never issued.
#[derive(Clone)]
pub struct SelectionNotifier {
    client: JsEngineClient,
}

impl SelectionNotifier {
    pub fn new(client: JsEngineClient) -> Self {
        Self { client }
    }

    /// Report that the tab button created under `tag` was selected.
    pub fn tab_bar_item_selected(&self, tag: Tag) {
        self.client
            .execute(format!("uicontrols.tabBarItemSelected({tag});"));
    }

    /// Report that the tool-bar button created under `tag` was selected.
    pub fn tool_bar_item_selected(&self, tag: Tag) {
        self.client
            .execute(format!("uicontrols.toolBarItemSelected({tag});"));
    }
}

/// Shared state behind the native functions: one proxy per control-bar type,
/// with script function handles as callbacks.
struct ScriptBridge {
    tab_bar: RefCell<TabBar<JsObject, HostClient>>,
    tool_bar: RefCell<ToolBar<JsObject, HostClient>>,
}

impl ScriptBridge {
    fn new(host: HostClient) -> Self {
        Self {
            tab_bar: RefCell::new(TabBar::new(host.clone())),
            tool_bar: RefCell::new(ToolBar::new(host)),
        }
    }
}

fn register_callable(
    context: &mut Context,
    name: &str,
    length: usize,
    function: NativeFunction,
) -> JsResult<()> {
    context.register_global_callable(JsString::from(name), length, function)
}

/// Register all UI-control native functions in the JS global scope.
fn register_ui_functions(context: &mut Context, bridge: &'static ScriptBridge) -> JsResult<()> {
    // __ui_create_tab_bar() -> void
    register_callable(
        context,
        "__ui_create_tab_bar",
        0,
        NativeFunction::from_copy_closure(
            move |_this: &JsValue, _args: &[JsValue], _ctx: &mut Context| {
                bridge.tab_bar.borrow_mut().create();
                Ok(JsValue::undefined())
            },
        ),
    )?;

    // __ui_show_tab_bar(options_json: string) -> void
    register_callable(
        context,
        "__ui_show_tab_bar",
        1,
        NativeFunction::from_copy_closure(
            move |_this: &JsValue, args: &[JsValue], _ctx: &mut Context| {
                let options: BarOptions = options_arg(args, 0);
                bridge.tab_bar.borrow_mut().show(&options);
                Ok(JsValue::undefined())
            },
        ),
    )?;

    // __ui_hide_tab_bar(animate: bool) -> void
    register_callable(
        context,
        "__ui_hide_tab_bar",
        1,
        NativeFunction::from_copy_closure(
            move |_this: &JsValue, args: &[JsValue], _ctx: &mut Context| {
                bridge.tab_bar.borrow_mut().hide(bool_arg(args, 0, true));
                Ok(JsValue::undefined())
            },
        ),
    )?;

    // __ui_create_tab_bar_item(name, label, image, options_json, on_select) -> tag
    register_callable(
        context,
        "__ui_create_tab_bar_item",
        5,
        NativeFunction::from_copy_closure(
            move |_this: &JsValue, args: &[JsValue], _ctx: &mut Context| {
                let name = string_arg(args, 0).unwrap_or_default();
                let label = string_arg(args, 1);
                let image = string_arg(args, 2);
                let options: ItemOptions = options_arg(args, 3);
                let on_select = callback_arg(args, 4);

                let tag = bridge.tab_bar.borrow_mut().create_item(
                    &name,
                    label.as_deref(),
                    image.as_deref(),
                    &options,
                    on_select,
                );
                Ok(JsValue::from(tag))
            },
        ),
    )?;

    // __ui_update_tab_bar_item(name, options_json) -> void
    register_callable(
        context,
        "__ui_update_tab_bar_item",
        2,
        NativeFunction::from_copy_closure(
            move |_this: &JsValue, args: &[JsValue], _ctx: &mut Context| {
                let name = string_arg(args, 0).unwrap_or_default();
                let options: ItemOptions = options_arg(args, 1);
                bridge.tab_bar.borrow_mut().update_item(&name, &options);
                Ok(JsValue::undefined())
            },
        ),
    )?;

    // __ui_show_tab_bar_items(names_json, options_json) -> void
    register_callable(
        context,
        "__ui_show_tab_bar_items",
        2,
        NativeFunction::from_copy_closure(
            move |_this: &JsValue, args: &[JsValue], _ctx: &mut Context| {
                let names: Vec<String> = options_arg(args, 0);
                let names: Vec<&str> = names.iter().map(String::as_str).collect();
                let options = bar_options_opt(args, 1);
                bridge
                    .tab_bar
                    .borrow_mut()
                    .show_items(&names, options.as_ref());
                Ok(JsValue::undefined())
            },
        ),
    )?;

    // __ui_select_tab_bar_item(name | null) -> void
    register_callable(
        context,
        "__ui_select_tab_bar_item",
        1,
        NativeFunction::from_copy_closure(
            move |_this: &JsValue, args: &[JsValue], _ctx: &mut Context| {
                let name = string_arg(args, 0);
                bridge.tab_bar.borrow_mut().select_item(name.as_deref());
                Ok(JsValue::undefined())
            },
        ),
    )?;

    // __ui_tab_bar_item_selected(tag) -> void
    register_callable(
        context,
        "__ui_tab_bar_item_selected",
        1,
        NativeFunction::from_copy_closure(
            move |_this: &JsValue, args: &[JsValue], ctx: &mut Context| {
                let Some(tag) = tag_arg(args, 0) else {
                    return Ok(JsValue::undefined());
                };
                // Clone the handle out so the callback can re-enter the bridge.
                let callback = bridge.tab_bar.borrow_mut().dispatch_with(tag, |f| f.clone());
                if let Some(callback) = callback {
                    log::debug!("Dispatching tab bar selection, tag={}", tag);
                    callback.call(&JsValue::undefined(), &[], ctx)?;
                }
                Ok(JsValue::undefined())
            },
        ),
    )?;

    // __ui_create_tool_bar() -> void
    register_callable(
        context,
        "__ui_create_tool_bar",
        0,
        NativeFunction::from_copy_closure(
            move |_this: &JsValue, _args: &[JsValue], _ctx: &mut Context| {
                bridge.tool_bar.borrow_mut().create();
                Ok(JsValue::undefined())
            },
        ),
    )?;

    // __ui_show_tool_bar(options_json: string) -> void
    register_callable(
        context,
        "__ui_show_tool_bar",
        1,
        NativeFunction::from_copy_closure(
            move |_this: &JsValue, args: &[JsValue], _ctx: &mut Context| {
                let options: BarOptions = options_arg(args, 0);
                bridge.tool_bar.borrow_mut().show(&options);
                Ok(JsValue::undefined())
            },
        ),
    )?;

    // __ui_hide_tool_bar(animate: bool) -> void
    register_callable(
        context,
        "__ui_hide_tool_bar",
        1,
        NativeFunction::from_copy_closure(
            move |_this: &JsValue, args: &[JsValue], _ctx: &mut Context| {
                bridge.tool_bar.borrow_mut().hide(bool_arg(args, 0, true));
                Ok(JsValue::undefined())
            },
        ),
    )?;

    // __ui_create_tool_bar_item(name, label, image, options_json, on_select) -> tag
    register_callable(
        context,
        "__ui_create_tool_bar_item",
        5,
        NativeFunction::from_copy_closure(
            move |_this: &JsValue, args: &[JsValue], _ctx: &mut Context| {
                let name = string_arg(args, 0).unwrap_or_default();
                let label = string_arg(args, 1);
                let image = string_arg(args, 2);
                let options: ItemOptions = options_arg(args, 3);
                let on_select = callback_arg(args, 4);

                let tag = bridge.tool_bar.borrow_mut().create_item(
                    &name,
                    label.as_deref(),
                    image.as_deref(),
                    &options,
                    on_select,
                );
                Ok(JsValue::from(tag))
            },
        ),
    )?;

    // __ui_update_tool_bar_item(name, label, options_json, on_select) -> void
    register_callable(
        context,
        "__ui_update_tool_bar_item",
        4,
        NativeFunction::from_copy_closure(
            move |_this: &JsValue, args: &[JsValue], _ctx: &mut Context| {
                let name = string_arg(args, 0).unwrap_or_default();
                let label = string_arg(args, 1);
                let options: ItemOptions = options_arg(args, 2);
                let on_select = callback_arg(args, 3);
                bridge.tool_bar.borrow_mut().update_item(
                    &name,
                    label.as_deref(),
                    &options,
                    on_select,
                );
                Ok(JsValue::undefined())
            },
        ),
    )?;

    // __ui_show_tool_bar_items(names_json, options_json) -> void
    register_callable(
        context,
        "__ui_show_tool_bar_items",
        2,
        NativeFunction::from_copy_closure(
            move |_this: &JsValue, args: &[JsValue], _ctx: &mut Context| {
                let names: Vec<String> = options_arg(args, 0);
                let names: Vec<&str> = names.iter().map(String::as_str).collect();
                let options = bar_options_opt(args, 1);
                bridge
                    .tool_bar
                    .borrow_mut()
                    .show_items(&names, options.as_ref());
                Ok(JsValue::undefined())
            },
        ),
    )?;

    // __ui_tool_bar_item_selected(tag) -> void
    register_callable(
        context,
        "__ui_tool_bar_item_selected",
        1,
        NativeFunction::from_copy_closure(
            move |_this: &JsValue, args: &[JsValue], ctx: &mut Context| {
                let Some(tag) = tag_arg(args, 0) else {
                    return Ok(JsValue::undefined());
                };
                let callback = bridge
                    .tool_bar
                    .borrow_mut()
                    .dispatch_with(tag, |f| f.clone());
                if let Some(callback) = callback {
                    log::debug!("Dispatching tool bar selection, tag={}", tag);
                    callback.call(&JsValue::undefined(), &[], ctx)?;
                }
                Ok(JsValue::undefined())
            },
        ),
    )?;

    log::debug!("Registered UI controls native functions");
    Ok(())
}

fn string_arg(args: &[JsValue], index: usize) -> Option<String> {
    args.get(index)
        .and_then(|v| v.as_string())
        .map(|s| s.to_std_string_escaped())
}

fn bool_arg(args: &[JsValue], index: usize, default: bool) -> bool {
    args.get(index).map(|v| v.to_boolean()).unwrap_or(default)
}

/// A tag argument. Anything that is not a representable tag (negative,
/// fractional, non-numeric) yields `None` and the notification is dropped.
fn tag_arg(args: &[JsValue], index: usize) -> Option<Tag> {
    args.get(index)
        .and_then(|v| v.as_number())
        .filter(|n| *n >= 0.0 && *n <= f64::from(Tag::MAX) && n.fract() == 0.0)
        .map(|n| n as Tag)
}

fn callback_arg(args: &[JsValue], index: usize) -> Option<JsObject> {
    args.get(index).and_then(|v| v.as_callable())
}

/// Parse a JSON-string argument into an options value. A missing or
/// malformed argument degrades to the default rather than raising.
fn options_arg<T>(args: &[JsValue], index: usize) -> T
where
    T: Default + DeserializeOwned,
{
    let Some(json) = string_arg(args, index) else {
        return T::default();
    };
    match serde_json::from_str(&json) {
        Ok(value) => value,
        Err(e) => {
            log::warn!("Malformed options object, ignoring: {}", e);
            T::default()
        }
    }
}

fn bar_options_opt(args: &[JsValue], index: usize) -> Option<BarOptions> {
    string_arg(args, index).and_then(|json| serde_json::from_str(&json).ok())
}
