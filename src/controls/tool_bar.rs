//! Tool Bar Proxy
//!
//! Script-side stand-in for a native tool bar. Unlike the tab bar, items are
//! kept as named records so a later update can re-bind the selection callback
//! by item name.

use serde_json::Value;

use crate::controls::options::{BarOptions, ItemOptions};
use crate::controls::registry::{ItemRecord, ItemRegistry, Tag};
use crate::controls::{null_or_str, to_wire};
use crate::host::Invoker;

/// Native tool bar proxy. See [`TabBar`](crate::controls::TabBar) for the
/// meaning of the type parameters.
pub struct ToolBar<C, I: Invoker> {
    registry: ItemRegistry<C>,
    invoker: I,
}

impl<C, I: Invoker> ToolBar<C, I> {
    pub fn new(invoker: I) -> Self {
        ToolBar {
            registry: ItemRegistry::new(),
            invoker,
        }
    }

    /// Request creation of the native tool bar. Items are added separately.
    pub fn create(&mut self) {
        self.invoker.invoke("UIControls.createToolBar", vec![]);
    }

    /// Show the tool bar. Recognized options: `height` and `position`.
    pub fn show(&mut self, options: &BarOptions) {
        self.invoker
            .invoke("UIControls.showToolBar", vec![to_wire(options)]);
    }

    /// Hide the tool bar, optionally animating it off screen.
    pub fn hide(&mut self, animate: bool) {
        self.invoker.invoke(
            "UIControls.hideToolBar",
            vec![serde_json::json!({ "animate": animate })],
        );
    }

    /// Create a tool-bar button and return its tag.
    ///
    /// `image` may name an image file or one of the native `toolButton:*`
    /// system identifiers (`toolButton:Done`, `toolButton:Cancel`,
    /// `toolButton:Edit`, `toolButton:Save`, `toolButton:Add`,
    /// `toolButton:FlexibleSpace`, `toolButton:FixedSpace`,
    /// `toolButton:Compose`, `toolButton:Reply`, `toolButton:Action`,
    /// `toolButton:Organize`, `toolButton:Bookmarks`, `toolButton:Search`,
    /// `toolButton:Refresh`, `toolButton:Stop`, `toolButton:Camera`,
    /// `toolButton:Trash`, `toolButton:Play`, `toolButton:Pause`,
    /// `toolButton:Rewind`, `toolButton:FastForward`, `toolButton:Undo`,
    /// `toolButton:Redo`); for system items the host ignores `label`.
    pub fn create_item(
        &mut self,
        name: &str,
        label: Option<&str>,
        image: Option<&str>,
        options: &ItemOptions,
        on_select: Option<C>,
    ) -> Tag {
        let tag = self.registry.create(name, on_select);

        log::debug!("ToolBar::create_item name={} tag={}", name, tag);
        self.invoker.invoke(
            "UIControls.createToolBarItem",
            vec![
                Value::from(name),
                null_or_str(label),
                null_or_str(image),
                Value::from(tag),
                to_wire(options),
            ],
        );
        tag
    }

    /// Update an existing tool-bar button's label or options. A supplied
    /// callback replaces the one stored on the earliest record whose name
    /// matches; the forward to the host happens whether or not one matched.
    pub fn update_item(
        &mut self,
        name: &str,
        label: Option<&str>,
        options: &ItemOptions,
        on_select: Option<C>,
    ) {
        if let Some(callback) = on_select {
            if !self.registry.update(name, callback) {
                log::debug!("ToolBar::update_item no record named {}", name);
            }
        }
        self.invoker.invoke(
            "UIControls.updateToolBarItem",
            vec![Value::from(name), null_or_str(label), to_wire(options)],
        );
    }

    /// Show previously created tool-bar buttons, in the given order. A
    /// trailing options object (notably `animate`) may accompany the names.
    pub fn show_items(&mut self, names: &[&str], options: Option<&BarOptions>) {
        let mut args: Vec<Value> = names.iter().copied().map(Value::from).collect();
        if let Some(options) = options {
            args.push(to_wire(options));
        }
        self.invoker.invoke("UIControls.showToolBarItems", args);
    }

    /// Look up the record created under `tag`.
    pub fn item(&self, tag: Tag) -> Option<&ItemRecord<C>> {
        self.registry.record(tag)
    }

    /// Notification entry point: run `invoke` on the callback of the record
    /// at `tag`. Safe to call with any tag, including out-of-range ones.
    pub fn dispatch_with<R>(&mut self, tag: Tag, invoke: impl FnOnce(&mut C) -> R) -> Option<R> {
        self.registry.dispatch_with(tag, invoke)
    }
}

impl<C: FnMut(), I: Invoker> ToolBar<C, I> {
    /// Notification entry point for closure-backed callbacks.
    pub fn item_selected(&mut self, tag: Tag) {
        self.dispatch_with(tag, |callback| callback());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controls::test_util::RecordingInvoker;
    use serde_json::json;
    use std::cell::Cell;
    use std::rc::Rc;

    type TestBar = ToolBar<Box<dyn FnMut()>, RecordingInvoker>;

    fn counter() -> (Rc<Cell<u32>>, Box<dyn FnMut()>) {
        let hits = Rc::new(Cell::new(0));
        let inner = hits.clone();
        (hits, Box::new(move || inner.set(inner.get() + 1)))
    }

    #[test]
    fn tags_follow_creation_order() {
        let invoker = RecordingInvoker::new();
        let mut bar: TestBar = ToolBar::new(invoker.clone());

        assert_eq!(
            bar.create_item("search", Some("Search"), Some("icon.png"), &ItemOptions::default(), None),
            0
        );
        let (hits, cb) = counter();
        assert_eq!(
            bar.create_item("add", Some("Add"), Some("icon2.png"), &ItemOptions::default(), Some(cb)),
            1
        );

        bar.item_selected(1);
        assert_eq!(hits.get(), 1);
        bar.item_selected(0);
        assert_eq!(hits.get(), 1);

        let sent = invoker.take();
        assert_eq!(sent[0].args[3], json!(0));
        assert_eq!(sent[1].args[3], json!(1));
    }

    #[test]
    fn update_rebinds_callback_by_name() {
        let invoker = RecordingInvoker::new();
        let mut bar: TestBar = ToolBar::new(invoker.clone());

        let (old_hits, old_cb) = counter();
        bar.create_item("refresh", None, Some("toolButton:Refresh"), &ItemOptions::default(), Some(old_cb));

        let (new_hits, new_cb) = counter();
        bar.update_item("refresh", None, &ItemOptions::default(), Some(new_cb));

        bar.item_selected(0);
        assert_eq!(old_hits.get(), 0);
        assert_eq!(new_hits.get(), 1);

        let update = invoker.take().pop().unwrap();
        assert_eq!(update.command, "UIControls.updateToolBarItem");
        assert_eq!(update.args, vec![json!("refresh"), Value::Null, json!({})]);
    }

    #[test]
    fn update_with_unknown_name_still_forwards() {
        let invoker = RecordingInvoker::new();
        let mut bar: TestBar = ToolBar::new(invoker.clone());

        let (hits, cb) = counter();
        bar.create_item("present", None, None, &ItemOptions::default(), Some(cb));

        let (_, stray) = counter();
        bar.update_item("missing", Some("Missing"), &ItemOptions::default(), Some(stray));

        // Existing binding is untouched and the update was forwarded anyway.
        bar.item_selected(0);
        assert_eq!(hits.get(), 1);

        let sent = invoker.take();
        assert_eq!(sent.last().unwrap().command, "UIControls.updateToolBarItem");
    }

    #[test]
    fn out_of_range_selection_is_tolerated() {
        let invoker = RecordingInvoker::new();
        let mut bar: TestBar = ToolBar::new(invoker);

        bar.create_item("only", None, None, &ItemOptions::default(), None);
        bar.item_selected(0);
        bar.item_selected(5);
    }

    #[test]
    fn show_items_forwards_names_in_order() {
        let invoker = RecordingInvoker::new();
        let mut bar: TestBar = ToolBar::new(invoker.clone());

        bar.show_items(&["back", "forward", "refresh"], None);

        let sent = invoker.take();
        assert_eq!(sent[0].command, "UIControls.showToolBarItems");
        assert_eq!(
            sent[0].args,
            vec![json!("back"), json!("forward"), json!("refresh")]
        );
    }
}
