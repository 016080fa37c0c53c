//! Native UI Controls
//!
//! Script-side proxies for native tab bars and tool bars. Each proxy assigns
//! small integer tags to created items, forwards every operation to the host
//! invocation primitive, and routes native "item selected" notifications back
//! to the callback registered for the tag.

pub mod options;
pub mod registry;
pub mod tab_bar;
pub mod tool_bar;

pub use options::{BarOptions, BarPosition, ButtonStyle, ItemOptions};
pub use registry::{ItemRecord, ItemRegistry, Tag, TagRegistry};
pub use tab_bar::TabBar;
pub use tool_bar::ToolBar;

use serde::Serialize;
use serde_json::Value;

/// Serialize a pass-through options value for the wire.
pub(crate) fn to_wire<T: Serialize>(value: &T) -> Value {
    serde_json::to_value(value).unwrap_or_else(|e| {
        log::error!("Failed to serialize options: {}", e);
        Value::Null
    })
}

/// An optional string argument, forwarded as null when absent.
pub(crate) fn null_or_str(value: Option<&str>) -> Value {
    value.map(Value::from).unwrap_or(Value::Null)
}
