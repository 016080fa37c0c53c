//! # Native UI Controls Bridge
//!
//! This crate lets a host application expose native tab bars and tool bars to
//! an embedded JavaScript context, with bidirectional interoperability: script
//! calls are marshaled into host commands, and native selection events are
//! routed back to the callback registered when the item was created.
//!
//! The core is a pair of tag-keyed callback registries behind the
//! [`controls::TabBar`] and [`controls::ToolBar`] proxies; the [`js`] module
//! exposes the same surface to Boa scripts as `globalThis.uicontrols`.
//!
//! ## Example
//!
//! ```rust,no_run
//! use boa_uicontrols::host::HostClient;
//! use boa_uicontrols::js::{JsEngineBuilder, SelectionNotifier, UiControlsExtension};
//!
//! let (host, commands) = HostClient::channel();
//! let engine = JsEngineBuilder::new()
//!     .with_extension(UiControlsExtension::new(host))
//!     .start();
//!
//! let client = engine.client();
//! client.execute(
//!     r#"
//!     uicontrols.createTabBar();
//!     uicontrols.createTabBarItem('home', 'Home', 'home.png', {
//!         onSelect: function() { console.log('home selected'); }
//!     });
//!     uicontrols.showTabBar({ position: 'bottom', height: 49 });
//!     "#,
//! );
//!
//! // The native side drains commands...
//! while let Some(command) = commands.try_recv() {
//!     println!("{} {:?}", command.command, command.args);
//! }
//!
//! // ...and reports selections back by tag.
//! let notifier = SelectionNotifier::new(client);
//! notifier.tab_bar_item_selected(0);
//! ```

pub mod controls;
pub mod host;
pub mod js;

pub use controls::{BarOptions, BarPosition, ButtonStyle, ItemOptions, Tag, TabBar, ToolBar};
pub use host::{HostClient, HostCommand, HostCommandReceiver, Invoker};
