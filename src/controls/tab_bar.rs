//! Tab Bar Proxy
//!
//! Script-side stand-in for a native tab bar. Creation and display requests
//! are marshaled to the host invoker; selection callbacks stay behind in the
//! tag registry and are dispatched when the host reports a selection.

use serde_json::Value;

use crate::controls::options::{BarOptions, ItemOptions};
use crate::controls::registry::{Tag, TagRegistry};
use crate::controls::{null_or_str, to_wire};
use crate::host::Invoker;

/// Native tab bar proxy. `C` is the callback representation (a Rust closure,
/// or a script function handle in the JS glue); `I` forwards commands to the
/// native host.
pub struct TabBar<C, I: Invoker> {
    registry: TagRegistry<C>,
    invoker: I,
}

impl<C, I: Invoker> TabBar<C, I> {
    pub fn new(invoker: I) -> Self {
        TabBar {
            registry: TagRegistry::new(),
            invoker,
        }
    }

    /// Request creation of the native tab bar. Items are added separately.
    pub fn create(&mut self) {
        self.invoker.invoke("UIControls.createTabBar", vec![]);
    }

    /// Show the tab bar. Recognized options: `height` (default 49) and
    /// `position` (`top` or `bottom`, default `bottom`).
    pub fn show(&mut self, options: &BarOptions) {
        self.invoker
            .invoke("UIControls.showTabBar", vec![to_wire(options)]);
    }

    /// Hide the tab bar, optionally animating it off screen.
    pub fn hide(&mut self, animate: bool) {
        self.invoker.invoke(
            "UIControls.hideTabBar",
            vec![serde_json::json!({ "animate": animate })],
        );
    }

    /// Create a tab button and return its tag.
    ///
    /// `image` may name an image file or one of the native `tabButton:*`
    /// system identifiers (`tabButton:More`, `tabButton:Favorites`,
    /// `tabButton:Featured`, `tabButton:TopRated`, `tabButton:Recents`,
    /// `tabButton:Contacts`, `tabButton:History`, `tabButton:Bookmarks`,
    /// `tabButton:Search`, `tabButton:Downloads`, `tabButton:MostRecent`,
    /// `tabButton:MostViewed`); for system items the host ignores `label`.
    ///
    /// `on_select`, when supplied, is registered under the returned tag and
    /// is never part of the forwarded arguments.
    pub fn create_item(
        &mut self,
        name: &str,
        label: Option<&str>,
        image: Option<&str>,
        options: &ItemOptions,
        on_select: Option<C>,
    ) -> Tag {
        let tag = self.registry.allocate_tag();
        if let Some(callback) = on_select {
            self.registry.register(tag, callback);
        }

        log::debug!("TabBar::create_item name={} tag={}", name, tag);
        self.invoker.invoke(
            "UIControls.createTabBarItem",
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

    /// Update an existing tab button, e.g. to change its badge value.
    /// Purely a forward; the registry is not consulted.
    pub fn update_item(&mut self, name: &str, options: &ItemOptions) {
        self.invoker.invoke(
            "UIControls.updateTabBarItem",
            vec![Value::from(name), to_wire(options)],
        );
    }

    /// Show previously created tab buttons, in the given order. A trailing
    /// options object (notably `animate`) may accompany the names.
    pub fn show_items(&mut self, names: &[&str], options: Option<&BarOptions>) {
        let mut args: Vec<Value> = names.iter().copied().map(Value::from).collect();
        if let Some(options) = options {
            args.push(to_wire(options));
        }
        self.invoker.invoke("UIControls.showTabBarItems", args);
    }

    /// Select the named tab, or pass `None` to deselect all tabs.
    pub fn select_item(&mut self, name: Option<&str>) {
        self.invoker
            .invoke("UIControls.selectTabBarItem", vec![null_or_str(name)]);
    }

    /// Notification entry point: run `invoke` on the callback registered for
    /// `tag`. Safe to call with any tag; unknown tags are silent no-ops.
    pub fn dispatch_with<R>(&mut self, tag: Tag, invoke: impl FnOnce(&mut C) -> R) -> Option<R> {
        self.registry.dispatch_with(tag, invoke)
    }
}

impl<C: FnMut(), I: Invoker> TabBar<C, I> {
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

    type TestBar = TabBar<Box<dyn FnMut()>, RecordingInvoker>;

    #[test]
    fn create_item_forwards_positional_args_with_tag() {
        let invoker = RecordingInvoker::new();
        let mut bar: TestBar = TabBar::new(invoker.clone());

        let tag = bar.create_item(
            "search",
            Some("Search"),
            Some("icon.png"),
            &ItemOptions::default(),
            None,
        );
        assert_eq!(tag, 0);

        let sent = invoker.take();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].command, "UIControls.createTabBarItem");
        assert_eq!(
            sent[0].args,
            vec![
                json!("search"),
                json!("Search"),
                json!("icon.png"),
                json!(0),
                json!({}),
            ]
        );
    }

    #[test]
    fn forwarded_options_never_carry_a_callback() {
        let invoker = RecordingInvoker::new();
        let mut bar: TestBar = TabBar::new(invoker.clone());

        bar.create_item(
            "add",
            Some("Add"),
            None,
            &ItemOptions {
                badge: Some(json!(2)),
                ..ItemOptions::default()
            },
            Some(Box::new(|| {})),
        );

        let sent = invoker.take();
        let options = sent[0].args.last().unwrap();
        assert_eq!(options, &json!({ "badge": 2 }));
        assert!(options.get("onSelect").is_none());
    }

    #[test]
    fn selection_invokes_registered_callback_exactly_once() {
        let invoker = RecordingInvoker::new();
        let mut bar: TestBar = TabBar::new(invoker);

        let hits = Rc::new(Cell::new(0));
        let counter = hits.clone();
        let tag = bar.create_item(
            "home",
            None,
            None,
            &ItemOptions::default(),
            Some(Box::new(move || counter.set(counter.get() + 1))),
        );

        bar.item_selected(tag);
        assert_eq!(hits.get(), 1);

        // A tag with no handler, and a tag never issued.
        let silent = bar.create_item("about", None, None, &ItemOptions::default(), None);
        bar.item_selected(silent);
        bar.item_selected(1000);
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn bar_operations_forward_expected_commands() {
        let invoker = RecordingInvoker::new();
        let mut bar: TestBar = TabBar::new(invoker.clone());

        bar.create();
        bar.show(&BarOptions {
            position: Some(crate::controls::options::BarPosition::Bottom),
            height: Some(49),
            ..BarOptions::default()
        });
        bar.hide(false);
        bar.show_items(&["search", "add"], Some(&BarOptions::animate(true)));
        bar.select_item(Some("search"));
        bar.select_item(None);

        let sent = invoker.take();
        let commands: Vec<&str> = sent.iter().map(|c| c.command.as_str()).collect();
        assert_eq!(
            commands,
            vec![
                "UIControls.createTabBar",
                "UIControls.showTabBar",
                "UIControls.hideTabBar",
                "UIControls.showTabBarItems",
                "UIControls.selectTabBarItem",
                "UIControls.selectTabBarItem",
            ]
        );
        assert_eq!(sent[1].args, vec![json!({ "position": "bottom", "height": 49 })]);
        assert_eq!(sent[2].args, vec![json!({ "animate": false })]);
        assert_eq!(
            sent[3].args,
            vec![json!("search"), json!("add"), json!({ "animate": true })]
        );
        assert_eq!(sent[4].args, vec![json!("search")]);
        assert_eq!(sent[5].args, vec![Value::Null]);
    }
}
