use boa_engine::{Context, Source};

/// Register the `uicontrols` JavaScript shim.
///
/// The shim presents the classic object API on `globalThis.uicontrols` and
/// lowers every call onto the `__ui_*` native functions. Selection handlers
/// are split off the options object here so the JSON sent across the boundary
/// never contains a function value.
pub(crate) fn register_uicontrols_shim(context: &mut Context) {
    let shim = r#"
(function() {
    // Pull an onSelect handler out of an options object. The key is removed
    // whether or not its value is callable; the native side must never
    // receive a callback value.
    function stripOnSelect(options) {
        options = options || {};
        var onSelect = null;
        if (typeof options.onSelect === 'function') {
            onSelect = options.onSelect;
        }
        delete options.onSelect;
        return { options: options, onSelect: onSelect };
    }

    // The show*Items calls take item names followed by an optional
    // trailing options object.
    function splitShowArgs(args) {
        var names = [];
        var options = null;
        for (var i = 0; i < args.length; i++) {
            var arg = args[i];
            if (typeof arg === 'string') {
                names.push(arg);
            } else if (arg && typeof arg === 'object') {
                options = arg;
            }
        }
        return {
            names: JSON.stringify(names),
            options: options === null ? null : JSON.stringify(options)
        };
    }

    var uicontrols = {
        createTabBar: function() {
            __ui_create_tab_bar();
        },

        showTabBar: function(options) {
            __ui_show_tab_bar(JSON.stringify(options || {}));
        },

        hideTabBar: function(animate) {
            if (animate === undefined || animate === null) animate = true;
            __ui_hide_tab_bar(!!animate);
        },

        createTabBarItem: function(name, label, image, options) {
            var split = stripOnSelect(options);
            return __ui_create_tab_bar_item(
                name, label, image, JSON.stringify(split.options), split.onSelect);
        },

        updateTabBarItem: function(name, options) {
            var split = stripOnSelect(options);
            __ui_update_tab_bar_item(name, JSON.stringify(split.options));
        },

        showTabBarItems: function() {
            var split = splitShowArgs(arguments);
            __ui_show_tab_bar_items(split.names, split.options);
        },

        selectTabBarItem: function(name) {
            __ui_select_tab_bar_item(name === undefined ? null : name);
        },

        tabBarItemSelected: function(tag) {
            __ui_tab_bar_item_selected(tag);
        },

        createToolBar: function() {
            __ui_create_tool_bar();
        },

        showToolBar: function(options) {
            __ui_show_tool_bar(JSON.stringify(options || {}));
        },

        hideToolBar: function(animate) {
            if (animate === undefined || animate === null) animate = true;
            __ui_hide_tool_bar(!!animate);
        },

        createToolBarItem: function(name, label, image, options) {
            var split = stripOnSelect(options);
            return __ui_create_tool_bar_item(
                name, label, image, JSON.stringify(split.options), split.onSelect);
        },

        updateToolBarItem: function(name, label, options) {
            var split = stripOnSelect(options);
            __ui_update_tool_bar_item(
                name, label, JSON.stringify(split.options), split.onSelect);
        },

        showToolBarItems: function() {
            var split = splitShowArgs(arguments);
            __ui_show_tool_bar_items(split.names, split.options);
        },

        toolBarItemSelected: function(tag) {
            __ui_tool_bar_item_selected(tag);
        }
    };

    globalThis.uicontrols = uicontrols;

    console.log('[Shims] uicontrols initialized (tab bar, tool bar)');
})();
    "#;

    if let Err(e) = context.eval(Source::from_bytes(shim.as_bytes())) {
        log::error!("Failed to register uicontrols shim: {:?}", e);
    }
}
