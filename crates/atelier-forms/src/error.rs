//! Error types for forms.

use std::collections::BTreeMap;
use thiserror::Error;

/// Message shown when a submission fails without a usable reason.
pub const DEFAULT_SUBMIT_ERROR: &str = "Erro ao enviar formulário. Tente novamente.";

/// Form-specific errors.
#[derive(Debug, Error)]
pub enum FormError {
    /// The form configuration document could not be parsed.
    #[error("failed to parse form configuration: {0}")]
    Config(#[from] serde_json::Error),

    /// A configuration value is missing from the environment.
    #[error("missing configuration: {0}")]
    MissingConfig(&'static str),

    /// A configuration value is present but unusable.
    #[error("invalid configuration for {key}: {message}")]
    InvalidConfig { key: &'static str, message: String },

    /// The relay HTTP client could not be built.
    #[error("failed to build relay client: {0}")]
    Client(#[source] reqwest::Error),
}

/// Errors raised while submitting a form.
#[derive(Debug, Error)]
pub enum SubmitError {
    /// Validation failed at the point of submission.
    #[error("form has invalid fields")]
    Invalid(ValidationErrors),

    /// Another submission is still in flight.
    #[error("a submission is already in flight")]
    InFlight,

    /// The form was already submitted successfully and must be reset first.
    #[error("form was already submitted")]
    AlreadySucceeded,

    /// The caller disabled submission.
    #[error("submission is disabled")]
    Disabled,

    /// The caller-supplied handler failed.
    #[error("{0}")]
    Handler(String),

    /// The relay endpoint rejected the submission or could not be reached.
    #[error("{message}")]
    Relay {
        /// HTTP status, when a response was received.
        status: Option<u16>,
        /// Message reported by the relay, or the generic default.
        message: String,
    },
}

impl SubmitError {
    /// Returns the message to show the user for this failure.
    pub fn user_message(&self) -> String {
        let message = self.to_string();
        if message.trim().is_empty() {
            DEFAULT_SUBMIT_ERROR.to_string()
        } else {
            message
        }
    }
}

/// Collection of validation errors by field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    /// Errors keyed by field name.
    pub errors: BTreeMap<String, Vec<String>>,
}

impl ValidationErrors {
    /// Creates a new empty ValidationErrors.
    pub fn new() -> Self {
        Self {
            errors: BTreeMap::new(),
        }
    }

    /// Adds an error for a field.
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.errors
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    /// Returns whether there are any errors.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns the number of fields with errors.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Returns errors for a specific field.
    pub fn get(&self, field: &str) -> Option<&Vec<String>> {
        self.errors.get(field)
    }

    /// Returns all errors as a flat list, ordered by field name.
    pub fn all_errors(&self) -> Vec<(&str, &str)> {
        self.errors
            .iter()
            .flat_map(|(field, messages)| {
                messages
                    .iter()
                    .map(move |msg| (field.as_str(), msg.as_str()))
            })
            .collect()
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (field, messages) in &self.errors {
            for message in messages {
                writeln!(f, "{field}: {message}")?;
            }
        }
        Ok(())
    }
}

/// Result type alias for form operations.
pub type Result<T> = std::result::Result<T, FormError>;
