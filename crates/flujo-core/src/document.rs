//! The output document model.
//!
//! These types represent the fully synthesized flow document after
//! compilation. The serialized field names are a bit-exact contract with the
//! downstream messaging platform and its mockup renderer, which pattern-match
//! on `"SingleColumnLayout"`, `"data-source"`, `"on-click-action"` and
//! `"__example__"` — treat every rename attribute here as load-bearing.

use indexmap::IndexMap;
use serde::Serialize;

/// Document format version emitted when no version is configured explicitly.
pub const DEFAULT_VERSION: &str = "3.1";

/// A complete compiled flow: an ordered list of screens.
///
/// Invariants (enforced by the compiler, not by construction):
/// - at least one screen
/// - screen ids unique within the document
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    pub version: String,
    pub screens: Vec<Screen>,
}

impl Document {
    /// An empty document with the given format version.
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            screens: Vec::new(),
        }
    }

    /// Look up a screen by its id.
    pub fn screen(&self, id: &str) -> Option<&Screen> {
        self.screens.iter().find(|s| s.id == id)
    }

    /// Serialize the document to a compact JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serialize the document to a pretty-printed JSON string.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// One navigable unit of the flow.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Screen {
    pub id: String,
    pub title: String,
    pub layout: Layout,
    /// Option sets referenced by dropdowns on this screen, keyed by catalog key.
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub data: IndexMap<String, DataSource>,
}

/// The visual layout of a screen: a single column of children.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    #[serde(rename = "type")]
    pub kind: String,
    pub children: Vec<Child>,
}

impl Layout {
    /// The only layout kind the downstream platform renders.
    pub fn single_column(children: Vec<Child>) -> Self {
        Self {
            kind: "SingleColumnLayout".to_string(),
            children,
        }
    }
}

/// A content node within a screen layout.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum Child {
    /// A heading line.
    TextSubheading { text: String },
    /// A body text line.
    TextBody { text: String },
    /// An embedded image. `src` is an opaque reference (URL or encoded
    /// payload) carried through untouched; resolution happens downstream.
    Image {
        src: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        width: Option<u32>,
        #[serde(skip_serializing_if = "Option::is_none")]
        height: Option<u32>,
    },
    /// An interactive form grouping dropdowns and the continue action.
    Form { name: String, children: Vec<FormChild> },
}

/// A field within a form.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum FormChild {
    Dropdown {
        label: String,
        name: String,
        required: bool,
        #[serde(rename = "data-source")]
        data_source: String,
    },
    Footer {
        label: String,
        #[serde(rename = "on-click-action")]
        on_click_action: ClickAction,
    },
}

/// The action attached to a form footer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClickAction {
    /// `"navigate"` or `"complete"`.
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<NextScreen>,
}

impl ClickAction {
    /// A navigation action targeting the screen with the given id.
    pub fn navigate(screen_id: impl Into<String>) -> Self {
        Self {
            name: "navigate".to_string(),
            next: Some(NextScreen {
                kind: "screen".to_string(),
                name: screen_id.into(),
            }),
        }
    }

    /// A terminal action that completes the flow.
    pub fn complete() -> Self {
        Self {
            name: "complete".to_string(),
            next: None,
        }
    }
}

/// The navigation target of a [`ClickAction::navigate`] action.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NextScreen {
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
}

/// One option set in a screen's data section.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataSource {
    #[serde(rename = "__example__")]
    pub example: Vec<OptionItem>,
}

/// One entry of an option set.
///
/// `enabled` is serialized only when `false`: the platform treats a missing
/// flag as selectable, and the authoring tool only ever marks options as
/// unavailable, never explicitly available.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptionItem {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "is_enabled")]
    pub enabled: bool,
}

fn is_enabled(enabled: &bool) -> bool {
    *enabled
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enabled_serialized_only_when_false() {
        let selectable = OptionItem {
            id: "general".to_string(),
            title: "Consulta General".to_string(),
            enabled: true,
        };
        let json = serde_json::to_value(&selectable).unwrap();
        assert!(json.get("enabled").is_none());

        let disabled = OptionItem {
            id: "general".to_string(),
            title: "Consulta General".to_string(),
            enabled: false,
        };
        let json = serde_json::to_value(&disabled).unwrap();
        assert_eq!(json["enabled"], serde_json::Value::Bool(false));
    }

    #[test]
    fn test_child_tagged_by_type() {
        let child = Child::TextSubheading {
            text: "Bienvenida".to_string(),
        };
        let json = serde_json::to_value(&child).unwrap();
        assert_eq!(json["type"], "TextSubheading");
        assert_eq!(json["text"], "Bienvenida");
    }

    #[test]
    fn test_image_optional_dimensions_omitted() {
        let child = Child::Image {
            src: "https://example.com/a.png".to_string(),
            width: None,
            height: Some(150),
        };
        let json = serde_json::to_value(&child).unwrap();
        assert!(json.get("width").is_none());
        assert_eq!(json["height"], 150);
    }

    #[test]
    fn test_dropdown_field_names() {
        let field = FormChild::Dropdown {
            label: "Seleccione fecha".to_string(),
            name: "fecha".to_string(),
            required: true,
            data_source: "${data.fecha}".to_string(),
        };
        let json = serde_json::to_value(&field).unwrap();
        assert_eq!(json["type"], "Dropdown");
        assert_eq!(json["data-source"], "${data.fecha}");
    }

    #[test]
    fn test_footer_navigate_action() {
        let field = FormChild::Footer {
            label: "Continuar".to_string(),
            on_click_action: ClickAction::navigate("confirmacion"),
        };
        let json = serde_json::to_value(&field).unwrap();
        assert_eq!(json["on-click-action"]["name"], "navigate");
        assert_eq!(json["on-click-action"]["next"]["type"], "screen");
        assert_eq!(json["on-click-action"]["next"]["name"], "confirmacion");
    }

    #[test]
    fn test_footer_complete_action_has_no_next() {
        let json = serde_json::to_value(ClickAction::complete()).unwrap();
        assert_eq!(json["name"], "complete");
        assert!(json.get("next").is_none());
    }

    #[test]
    fn test_empty_data_section_omitted() {
        let screen = Screen {
            id: "fin".to_string(),
            title: "Fin".to_string(),
            layout: Layout::single_column(vec![]),
            data: IndexMap::new(),
        };
        let json = serde_json::to_value(&screen).unwrap();
        assert!(json.get("data").is_none());
        assert_eq!(json["layout"]["type"], "SingleColumnLayout");
    }
}
