//! Pass-Through Configuration
//!
//! Typed models of the option objects accepted by the bar operations. These
//! are opaque pass-through data as far as the registries are concerned: every
//! recognized field (and any unknown key, kept in `extra`) is forwarded
//! verbatim to the host. Callbacks are deliberately not representable here —
//! they travel separately into the registries, so a forwarded options object
//! can never carry one.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Screen edge a bar is attached to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BarPosition {
    Top,
    Bottom,
}

/// Native rendering style for a tool-bar button.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonStyle {
    Plain,
    Done,
    Border,
}

/// Options for showing or hiding a whole bar.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BarOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<BarPosition>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub animate: Option<bool>,
    /// Unrecognized keys, forwarded untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Options for creating or updating an individual bar item.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemOptions {
    /// Value shown in the circular badge on the item; hidden when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub badge: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<ButtonStyle>,
    /// Unrecognized keys, forwarded untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl BarOptions {
    pub fn animate(value: bool) -> Self {
        BarOptions {
            animate: Some(value),
            ..BarOptions::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn absent_fields_are_omitted() {
        let options = BarOptions::default();
        assert_eq!(serde_json::to_value(&options).unwrap(), json!({}));

        let options = BarOptions {
            position: Some(BarPosition::Top),
            height: Some(49),
            ..BarOptions::default()
        };
        assert_eq!(
            serde_json::to_value(&options).unwrap(),
            json!({ "position": "top", "height": 49 })
        );
    }

    #[test]
    fn unknown_keys_pass_through() {
        let parsed: ItemOptions =
            serde_json::from_str(r##"{ "badge": 3, "tint": "#ff0000" }"##).unwrap();
        assert_eq!(parsed.badge, Some(json!(3)));
        assert_eq!(parsed.extra.get("tint"), Some(&json!("#ff0000")));

        let forwarded = serde_json::to_value(&parsed).unwrap();
        assert_eq!(forwarded, json!({ "badge": 3, "tint": "#ff0000" }));
    }

    #[test]
    fn style_names_match_the_native_contract() {
        let parsed: ItemOptions =
            serde_json::from_str(r#"{ "style": "done", "enabled": false }"#).unwrap();
        assert_eq!(parsed.style, Some(ButtonStyle::Done));
        assert_eq!(parsed.enabled, Some(false));
    }
}
