//! Hidden static fields.

use crate::widgets::{HiddenInput, Widget, WidgetAttrs};

/// A static value carried in the form markup.
///
/// Hidden fields are not part of the form state. Only the relay strategy
/// sends them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HiddenField {
    /// Field name.
    pub name: String,
    /// Static value.
    pub value: String,
}

impl HiddenField {
    /// Creates a hidden field.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Renders the hidden input.
    pub fn render(&self) -> String {
        HiddenInput.render(&self.name, Some(&self.value), &WidgetAttrs::new())
    }
}
