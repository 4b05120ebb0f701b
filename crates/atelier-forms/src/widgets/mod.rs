//! HTML widgets.
//!
//! A widget only knows how to draw one input for a name and a value. State,
//! labels and error styling belong to the field binding.

mod floating;

pub use floating::{InputType, Select, TextInput, Textarea};

use std::collections::BTreeMap;

/// Extra HTML attributes for a widget, rendered in key order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WidgetAttrs {
    /// Attribute values by name.
    pub attrs: BTreeMap<String, String>,
}

impl WidgetAttrs {
    /// No attributes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces an attribute.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.attrs.insert(key.into(), value.into());
    }

    /// Looks up an attribute.
    pub fn get(&self, key: &str) -> Option<&String> {
        self.attrs.get(key)
    }

    /// Renders every attribute except those in `skip`, each as
    /// ` key="value"`.
    pub fn to_html_except(&self, skip: &[&str]) -> String {
        let mut html = String::new();
        for (key, value) in &self.attrs {
            if skip.contains(&key.as_str()) {
                continue;
            }
            html.push_str(&format!(r#" {key}="{}""#, html_escape(value)));
        }
        html
    }

    /// Chained form of [`WidgetAttrs::set`].
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }
}

/// Something that draws a form control.
pub trait Widget: Send + Sync {
    /// Draws the control named `name` holding `value`, merging in `attrs`.
    fn render(&self, name: &str, value: Option<&str>, attrs: &WidgetAttrs) -> String;

    /// The `type` of the control, or its tag for non-input controls.
    fn input_type(&self) -> &str {
        "text"
    }

    /// Whether the control can hold `value`. Free-text controls hold
    /// anything; choice controls only their options.
    fn accepts(&self, _value: &str) -> bool {
        true
    }
}

/// `<input type="hidden">`.
#[derive(Debug, Clone, Copy, Default)]
pub struct HiddenInput;

impl Widget for HiddenInput {
    fn render(&self, name: &str, value: Option<&str>, attrs: &WidgetAttrs) -> String {
        format!(
            r#"<input type="hidden" name="{}" value="{}"{}>"#,
            html_escape(name),
            html_escape(value.unwrap_or_default()),
            attrs.to_html_except(&["type", "name", "value"]),
        )
    }

    fn input_type(&self) -> &str {
        "hidden"
    }
}

/// Escapes text for use in HTML content and quoted attribute values.
pub fn html_escape(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
