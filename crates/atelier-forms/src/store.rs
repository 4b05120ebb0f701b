//! Form state store.
//!
//! [`FormStore`] is the single source of truth for one form instance. Field
//! bindings borrow it mutably for each event; nothing else holds on to it.
//! State is only ever kept for names that were registered first.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use tracing::debug;

use crate::error::ValidationErrors;
use crate::validation::{is_blank, RequiredValidator, Validator, ValidatorChain};

/// Current field values keyed by field name.
pub type FieldValues = BTreeMap<String, String>;

/// Values, errors, touched flags and registrations for one form.
#[derive(Debug, Default)]
pub struct FormStore {
    values: FieldValues,
    errors: BTreeMap<String, String>,
    touched: BTreeSet<String>,
    registered: Vec<String>,
    required: BTreeSet<String>,
    validators: HashMap<String, ValidatorChain>,
    initial: FieldValues,
}

impl FormStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store whose fields start from the given values.
    ///
    /// A value is copied in when the field with that name registers.
    pub fn with_initial<I, K, V>(initial: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            initial: initial
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            ..Self::default()
        }
    }

    /// Registers a field once.
    ///
    /// Returns `false` without changing anything when the name is already
    /// registered.
    pub fn register_field(
        &mut self,
        name: &str,
        required: bool,
        validator: Option<ValidatorChain>,
    ) -> bool {
        if self.is_registered(name) {
            return false;
        }

        self.registered.push(name.to_string());
        if required {
            self.required.insert(name.to_string());
        }
        if let Some(chain) = validator {
            self.validators.insert(name.to_string(), chain);
        }
        if let Some(value) = self.initial.get(name) {
            self.values.insert(name.to_string(), value.clone());
        }

        debug!(field = name, required, "registered field");
        true
    }

    /// Returns whether a field with this name was registered.
    pub fn is_registered(&self, name: &str) -> bool {
        self.registered.iter().any(|n| n == name)
    }

    /// Returns the registered field names in registration order.
    pub fn registered_fields(&self) -> &[String] {
        &self.registered
    }

    /// Returns whether the field is required.
    pub fn is_required(&self, name: &str) -> bool {
        self.required.contains(name)
    }

    /// Stores a new value and drops any stale error for the field.
    pub fn set_value(&mut self, name: &str, value: impl Into<String>) {
        if !self.is_registered(name) {
            debug!(field = name, "ignoring value for unregistered field");
            return;
        }
        self.values.insert(name.to_string(), value.into());
        self.errors.remove(name);
    }

    /// Returns the current value, or an empty string.
    pub fn value(&self, name: &str) -> &str {
        self.values.get(name).map_or("", String::as_str)
    }

    /// Returns all current values.
    pub fn values(&self) -> &FieldValues {
        &self.values
    }

    /// Marks the field as touched.
    pub fn set_touched(&mut self, name: &str) {
        if !self.is_registered(name) {
            debug!(field = name, "ignoring touch for unregistered field");
            return;
        }
        self.touched.insert(name.to_string());
    }

    /// Returns whether the field lost focus at least once.
    pub fn is_touched(&self, name: &str) -> bool {
        self.touched.contains(name)
    }

    /// Records an error for the field.
    pub fn set_error(&mut self, name: &str, message: impl Into<String>) {
        if !self.is_registered(name) {
            debug!(field = name, "ignoring error for unregistered field");
            return;
        }
        let message = message.into();
        if message.is_empty() {
            self.errors.remove(name);
        } else {
            self.errors.insert(name.to_string(), message);
        }
    }

    /// Removes any error for the field.
    pub fn clear_error(&mut self, name: &str) {
        self.errors.remove(name);
    }

    /// Returns the current error for the field.
    pub fn error(&self, name: &str) -> Option<&str> {
        self.errors.get(name).map(String::as_str)
    }

    /// Returns all current errors.
    pub fn errors(&self) -> &BTreeMap<String, String> {
        &self.errors
    }

    /// Returns the registered validator chain for the field.
    pub fn validator(&self, name: &str) -> Option<&ValidatorChain> {
        self.validators.get(name)
    }

    /// Runs the field's checks against its current value.
    ///
    /// Required fields must be non-blank. The validator chain only runs on
    /// non-blank values.
    pub fn check_field(&self, name: &str) -> Result<(), String> {
        let value = self.value(name);
        let chain = self.validators.get(name);
        if !is_blank(value) {
            return chain.map_or(Ok(()), |chain| chain.validate(value));
        }
        if !self.required.contains(name) {
            return Ok(());
        }
        // Prefer the chain's own required message when it carries one.
        chain
            .map_or(Ok(()), |chain| chain.validate(value))
            .and_then(|()| RequiredValidator::new().validate(value))
    }

    /// Returns whether every registered field currently passes its checks.
    pub fn is_form_valid(&self) -> bool {
        self.registered.iter().all(|name| self.check_field(name).is_ok())
    }

    /// Validates every field, recording and revealing each failure.
    pub fn validate_all(&mut self) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        for name in &self.registered {
            if let Err(message) = self.check_field(name) {
                errors.add(name, message);
            }
        }
        for (name, messages) in &errors.errors {
            if let Some(message) = messages.first() {
                self.errors.insert(name.clone(), message.clone());
                self.touched.insert(name.clone());
            }
        }
        errors
    }

    /// Clears values, errors and touched flags. Registrations are kept.
    pub fn reset(&mut self) {
        self.values.clear();
        self.errors.clear();
        self.touched.clear();
        debug!("form state reset");
    }
}
