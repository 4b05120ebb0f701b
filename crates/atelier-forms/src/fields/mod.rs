//! Field bindings.
//!
//! A [`FieldBinding`] ties one named slot of a [`FormStore`] to a widget.
//! It never keeps a reference to the store: every event borrows the store
//! for its duration.

mod hidden;
mod select;
mod text;

pub use hidden::HiddenField;
pub use select::choice_field;
pub use text::{char_field, email_field, password_field, phone_field, text_field, url_field};

use ironhtml::typed::Element;
use ironhtml_elements::{Div, Label};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::store::FormStore;
use crate::validation::{is_blank, RequiredValidator, Validator, ValidatorChain};
use crate::widgets::{Widget, WidgetAttrs};

const VALID_CLASS: &str = "border-gray-300 text-gray-700 focus:border-primary";
const INVALID_CLASS: &str = "border-red-500 text-red-500 focus:border-red-500";
const LABEL_CLASS: &str = "absolute left-2 -top-2 z-[1] cursor-text px-2 text-xs transition-all \
peer-placeholder-shown:top-3 peer-placeholder-shown:text-sm peer-focus:-top-2 peer-focus:text-xs";

/// Layout width of a field inside its form row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FieldWidth {
    /// Whole row.
    #[default]
    Full,
    /// Half a row on medium screens and up.
    Half,
    /// A third of a row on medium screens and up.
    Third,
    /// Two thirds of a row on medium screens and up.
    TwoThirds,
}

impl FieldWidth {
    /// Returns the layout class for this width.
    pub fn class(self) -> &'static str {
        match self {
            Self::Full => "w-full",
            Self::Half => "md:w-1/2",
            Self::Third => "md:w-1/3",
            Self::TwoThirds => "md:w-2/3",
        }
    }
}

/// A form field bound to one named slot of form state.
pub struct FieldBinding {
    /// Field name.
    pub name: String,
    /// Field label.
    pub label: String,
    /// Whether the field is required.
    pub required: bool,
    /// The widget to render.
    pub widget: Box<dyn Widget>,
    /// Help text.
    pub help_text: Option<String>,
    /// Validators, in evaluation order.
    pub validators: ValidatorChain,
    /// Widget attributes.
    pub attrs: WidgetAttrs,
    /// Whether the field is disabled.
    pub disabled: bool,
    /// Layout width.
    pub width: FieldWidth,
}

impl std::fmt::Debug for FieldBinding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldBinding")
            .field("name", &self.name)
            .field("label", &self.label)
            .field("required", &self.required)
            .field("input_type", &self.widget.input_type())
            .field("validators", &self.validators)
            .field("disabled", &self.disabled)
            .field("width", &self.width)
            .finish_non_exhaustive()
    }
}

impl FieldBinding {
    /// Creates a new field binding.
    pub fn new(
        name: impl Into<String>,
        label: impl Into<String>,
        widget: impl Widget + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            required: false,
            widget: Box::new(widget),
            help_text: None,
            validators: ValidatorChain::new(),
            attrs: WidgetAttrs::new(),
            disabled: false,
            width: FieldWidth::Full,
        }
    }

    /// Makes the field required, with the default message.
    #[must_use]
    pub fn required(self) -> Self {
        self.required_with(RequiredValidator::new())
    }

    /// Makes the field required, using the given presence check.
    #[must_use]
    pub fn required_with(mut self, validator: RequiredValidator) -> Self {
        self.required = true;
        self.validators.push(validator);
        self
    }

    /// Sets help text.
    #[must_use]
    pub fn help_text(mut self, text: impl Into<String>) -> Self {
        self.help_text = Some(text.into());
        self
    }

    /// Sets the placeholder attribute.
    #[must_use]
    pub fn placeholder(self, text: impl Into<String>) -> Self {
        self.attr("placeholder", text)
    }

    /// Adds a validator.
    #[must_use]
    pub fn validator(mut self, validator: impl Validator + 'static) -> Self {
        self.validators.push(validator);
        self
    }

    /// Sets a widget attribute.
    #[must_use]
    pub fn attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.set(key, value);
        self
    }

    /// Disables the field.
    #[must_use]
    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }

    /// Sets the layout width.
    #[must_use]
    pub fn width(mut self, width: FieldWidth) -> Self {
        self.width = width;
        self
    }

    /// Registers the field with the store.
    ///
    /// Safe to call on every render: only the first call for a name has an
    /// effect.
    pub fn mount(&self, store: &mut FormStore) -> bool {
        let chain = (!self.validators.is_empty()).then(|| self.validators.clone());
        store.register_field(&self.name, self.required, chain)
    }

    /// Returns the field's current value.
    pub fn value<'s>(&self, store: &'s FormStore) -> &'s str {
        store.value(&self.name)
    }

    /// Returns the field's current error, shown or not.
    pub fn error<'s>(&self, store: &'s FormStore) -> Option<&'s str> {
        store.error(&self.name)
    }

    /// Returns whether an error should be shown: one is set and the field
    /// has been touched.
    pub fn has_error(&self, store: &FormStore) -> bool {
        store.error(&self.name).is_some() && store.is_touched(&self.name)
    }

    /// Handles a new value typed or picked by the user.
    pub fn on_change(&self, store: &mut FormStore, value: impl Into<String>) {
        let value = value.into();
        if !self.widget.accepts(&value) {
            warn!(field = %self.name, value = %value, "ignoring value the widget cannot hold");
            return;
        }

        store.set_value(&self.name, value);
        if store.is_touched(&self.name) {
            self.revalidate(store);
        }
    }

    /// Handles the field losing focus.
    ///
    /// A blank value is not validated here, so leaving an empty required
    /// field does not show an error.
    pub fn on_blur(&self, store: &mut FormStore) {
        store.set_touched(&self.name);
        if !is_blank(store.value(&self.name)) {
            self.revalidate(store);
        }
    }

    fn revalidate(&self, store: &mut FormStore) {
        match store.check_field(&self.name) {
            Ok(()) => store.clear_error(&self.name),
            Err(message) => {
                debug!(field = %self.name, error = %message, "field failed validation");
                store.set_error(&self.name, message);
            }
        }
    }

    /// Renders the field with its current state.
    pub fn render(&self, store: &FormStore) -> String {
        let id = self.name.clone();
        let has_error = self.has_error(store);

        let mut attrs = self.attrs.clone();
        attrs.set("id", &id);
        let state_class = if has_error { INVALID_CLASS } else { VALID_CLASS };
        let class = match attrs.get("class") {
            Some(extra) => format!("{state_class} {extra}"),
            None => state_class.to_string(),
        };
        attrs.set("class", class);
        if !attrs.attrs.contains_key("placeholder") {
            attrs.set("placeholder", self.label.to_lowercase());
        }
        if self.disabled {
            attrs.set("disabled", "disabled");
        }
        if self.required {
            attrs.set("required", "required");
        }

        let value = self.value(store);
        let widget_html = self
            .widget
            .render(&self.name, (!value.is_empty()).then_some(value), &attrs);

        let label_text = if self.required {
            format!("{} *", self.label)
        } else {
            self.label.clone()
        };
        let label_class = if has_error {
            format!("{LABEL_CLASS} text-red-500")
        } else {
            format!("{LABEL_CLASS} text-gray-500 peer-focus:text-primary")
        };
        let error = if has_error {
            self.error(store).unwrap_or_default()
        } else {
            ""
        };
        let help_text = self.help_text.as_deref().unwrap_or_default();
        let wrapper_class = format!("relative my-6 px-3 {}", self.width.class());

        Element::<Div>::new()
            .class(&wrapper_class)
            .raw(&widget_html)
            .child::<Label, _>(|l| l.attr("for", &id).class(&label_class).text(&label_text))
            .when(has_error, |d| {
                d.child::<Div, _>(|e| e.class("mt-1 text-xs text-red-500").text(error))
            })
            .when(!help_text.is_empty(), |d| {
                d.child::<Div, _>(|h| h.class("mt-1 text-xs text-gray-500").text(help_text))
            })
            .render()
    }
}
