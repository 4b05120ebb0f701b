//! Form configuration documents from the content backend.
//!
//! The content query hands over an already fetched document; this module
//! only models and interprets it.

use serde::{Deserialize, Serialize};

use crate::error::{FormError, Result};
use crate::fields::{FieldBinding, FieldWidth, HiddenField};
use crate::relay::{RelayConfig, ENDPOINT_ENV};
use crate::validation::{
    EmailValidator, MaxLengthValidator, MinLengthValidator, PhoneValidator,
};
use crate::widgets::{Select, TextInput, Textarea};

/// Base URL of the hosted relay; the recipient address is appended.
pub const DEFAULT_RELAY_BASE: &str = "https://formsubmit.co/ajax";

/// Subject prefix used when the document sets none.
const SUBJECT_PREFIX: &str = "Nova prospecção - Adriana Oliveira Fotografia";

/// Kind of input a field descriptor asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// Single-line text.
    #[default]
    Text,
    /// Email address.
    Email,
    /// Telephone number.
    Phone,
    /// Number, entered as text.
    Number,
    /// Date, entered as text.
    Date,
    /// Multi-line text.
    Textarea,
    /// Single choice among options.
    Select,
}

/// Length bounds for a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldValidation {
    /// Minimum length in characters.
    #[serde(default)]
    pub min_length: Option<usize>,
    /// Maximum length in characters.
    #[serde(default)]
    pub max_length: Option<usize>,
}

/// One choice of a select field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldOption {
    /// Submitted value.
    pub value: String,
    /// Displayed label.
    pub label: String,
}

/// One field descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldConfig {
    /// Field name, unique within the form.
    #[serde(rename = "fieldName", alias = "name")]
    pub name: String,
    /// Label shown next to the input.
    pub label: String,
    /// Input kind.
    #[serde(default)]
    pub field_type: FieldType,
    /// Placeholder text.
    #[serde(default)]
    pub placeholder: Option<String>,
    /// Whether a value is mandatory.
    #[serde(default)]
    pub is_required: bool,
    /// Length bounds.
    #[serde(default)]
    pub validation: Option<FieldValidation>,
    /// Layout width.
    #[serde(default)]
    pub width: FieldWidth,
    /// Choices for select fields.
    #[serde(default)]
    pub options: Vec<FieldOption>,
    /// Position in the form; lower comes first.
    #[serde(default)]
    pub display_order: Option<i32>,
}

impl FieldConfig {
    /// Builds the field binding this descriptor describes.
    ///
    /// Validators are added by kind, then by length bounds; the chain keeps
    /// the required check first either way.
    pub fn binding(&self) -> FieldBinding {
        let mut field = match self.field_type {
            FieldType::Email => FieldBinding::new(&self.name, &self.label, TextInput::email())
                .validator(EmailValidator::new()),
            FieldType::Phone => FieldBinding::new(&self.name, &self.label, TextInput::tel())
                .validator(PhoneValidator::new()),
            FieldType::Text | FieldType::Number | FieldType::Date => {
                FieldBinding::new(&self.name, &self.label, TextInput::new())
            }
            FieldType::Textarea => FieldBinding::new(&self.name, &self.label, Textarea::new(4)),
            FieldType::Select => {
                let options = self
                    .options
                    .iter()
                    .map(|o| (o.value.clone(), o.label.clone()))
                    .collect::<Vec<_>>();
                let mut select = Select::new(options);
                if let Some(placeholder) = &self.placeholder {
                    select = select.placeholder(placeholder);
                }
                FieldBinding::new(&self.name, &self.label, select)
            }
        };

        if self.is_required {
            field = field.required();
        }
        if let Some(bounds) = self.validation {
            if let Some(min) = bounds.min_length {
                field = field.validator(MinLengthValidator::new(min));
            }
            if let Some(max) = bounds.max_length {
                field = field.validator(MaxLengthValidator::new(max));
            }
        }
        if let (Some(placeholder), false) = (&self.placeholder, self.field_type == FieldType::Select) {
            field = field.placeholder(placeholder);
        }
        field.width(self.width)
    }
}

fn default_button_text() -> String {
    "Enviar".to_string()
}

fn default_success_message() -> String {
    "Obrigado! Entraremos em contato em breve.".to_string()
}

/// How the form is submitted and acknowledged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitSettings {
    /// Label of the submit button.
    #[serde(default = "default_button_text")]
    pub button_text: String,
    /// Message shown after a successful submission.
    #[serde(default = "default_success_message")]
    pub success_message: String,
    /// Recipient address for relay submissions.
    #[serde(default)]
    pub email_to: Option<String>,
    /// Subject line for relay submissions.
    #[serde(default)]
    pub subject: Option<String>,
}

impl Default for SubmitSettings {
    fn default() -> Self {
        Self {
            button_text: default_button_text(),
            success_message: default_success_message(),
            email_to: None,
            subject: None,
        }
    }
}

impl SubmitSettings {
    /// Returns the relay endpoint for the configured recipient.
    pub fn relay_endpoint(&self, base: &str) -> Option<String> {
        self.email_to
            .as_deref()
            .map(str::trim)
            .filter(|email| !email.is_empty())
            .map(|email| format!("{}/{email}", base.trim_end_matches('/')))
    }

    /// Returns the static fields the relay expects with every submission.
    pub fn hidden_fields(&self, form_title: &str) -> Vec<HiddenField> {
        let subject = self
            .subject
            .clone()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| {
                let title = if form_title.trim().is_empty() {
                    "Geral"
                } else {
                    form_title
                };
                format!("{SUBJECT_PREFIX} ({title})")
            });
        vec![
            HiddenField::new("_subject", subject),
            HiddenField::new("_captcha", "false"),
        ]
    }
}

/// A form document: title, description, fields and submit settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormConfig {
    /// Form title.
    pub title: String,
    /// Optional description under the title.
    #[serde(default)]
    pub description: Option<String>,
    /// Identifier used by the content query.
    #[serde(default)]
    pub slug: Option<String>,
    /// Field descriptors.
    #[serde(default)]
    pub fields: Vec<FieldConfig>,
    /// Submission settings.
    #[serde(default)]
    pub submit_settings: SubmitSettings,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Document {
    Wrapped {
        #[serde(rename = "formConfig")]
        form_config: FormConfig,
    },
    Bare(FormConfig),
}

impl FormConfig {
    /// Parses a form document, bare or wrapped in a `formConfig` key.
    pub fn from_json(json: &str) -> Result<Self> {
        let config = match serde_json::from_str::<Document>(json)? {
            Document::Wrapped { form_config } => form_config,
            Document::Bare(config) => config,
        };
        Ok(config)
    }

    /// Returns the field descriptors in display order.
    ///
    /// Fields without an order count as zero; ties keep document order.
    pub fn sorted_fields(&self) -> Vec<&FieldConfig> {
        let mut fields: Vec<&FieldConfig> = self.fields.iter().collect();
        fields.sort_by_key(|f| f.display_order.unwrap_or(0));
        fields
    }

    /// Builds the bindings for every field, in display order.
    pub fn bindings(&self) -> Vec<FieldBinding> {
        self.sorted_fields()
            .into_iter()
            .map(FieldConfig::binding)
            .collect()
    }

    /// Builds the relay configuration for this form.
    ///
    /// An explicit endpoint wins; otherwise the hosted relay is addressed to
    /// the document's recipient. The `_subject` and `_captcha` fields travel
    /// with the form built by [`crate::Form::from_config`], not here.
    pub fn relay_config(&self, endpoint: Option<&str>) -> Result<RelayConfig> {
        let endpoint = match endpoint.map(str::trim).filter(|e| !e.is_empty()) {
            Some(endpoint) => endpoint.to_string(),
            None => self
                .submit_settings
                .relay_endpoint(DEFAULT_RELAY_BASE)
                .ok_or(FormError::MissingConfig(ENDPOINT_ENV))?,
        };
        Ok(RelayConfig::new(endpoint))
    }
}
