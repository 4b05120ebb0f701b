//! # atelier-forms
//!
//! Declarative contact forms with live validation, double-submit
//! protection and hosted-relay submission.
//!
//! This crate provides:
//! - A per-form state store with one-time field registration
//! - Field bindings that validate on change and blur
//! - A submission controller that refuses overlapping submissions
//! - A client for `multipart/form-data` form relays
//! - Form configuration documents as served by the content backend
//! - HTML rendering with floating-label widgets
//!
//! ## Quick Start
//!
//! ```rust
//! use atelier_forms::fields::{char_field, email_field};
//! use atelier_forms::{BoxError, Form, SubmitStrategy};
//!
//! let strategy = SubmitStrategy::callback(|values| async move {
//!     println!("received {} values", values.len());
//!     Ok::<(), BoxError>(())
//! });
//!
//! let mut form = Form::builder("Contato")
//!     .field(char_field("nome", "Nome", 80, true))
//!     .field(email_field("email", "E-mail", true))
//!     .build(strategy);
//!
//! form.change("nome", "Pedro");
//! form.change("email", "pedro@");
//! form.blur("email");
//! assert!(!form.can_submit());
//!
//! form.change("email", "pedro@gmail.com");
//! assert!(form.can_submit());
//! ```
//!
//! ## Forms From Configuration
//!
//! ```rust
//! use atelier_forms::{FormConfig, Form, RelayClient};
//! use atelier_forms::SubmitStrategy;
//!
//! let config = FormConfig::from_json(r#"{
//!     "title": "Orçamento",
//!     "fields": [
//!         {"fieldName": "email", "label": "E-mail", "fieldType": "email", "isRequired": true}
//!     ],
//!     "submitSettings": {"emailTo": "contato@aofotografia.com"}
//! }"#)?;
//!
//! let relay = RelayClient::new(config.relay_config(None)?)?;
//! let form = Form::from_config(&config, SubmitStrategy::Relay(relay));
//! assert!(form.render().contains("Orçamento"));
//! # Ok::<(), atelier_forms::FormError>(())
//! ```
//!
//! ## Validation
//!
//! ```rust
//! use atelier_forms::validation::{EmailValidator, RequiredValidator, ValidatorChain};
//!
//! // The presence check always runs first, whatever the push order.
//! let chain = ValidatorChain::new()
//!     .with(EmailValidator::new())
//!     .with(RequiredValidator::new());
//!
//! assert_eq!(chain.validate(""), Err("Este campo é obrigatório".to_string()));
//! assert_eq!(chain.validate("pedro"), Err("Email inválido".to_string()));
//! assert!(chain.validate("pedro@gmail.com").is_ok());
//! ```

mod config;
mod error;
mod feedback;
pub mod fields;
mod form;
pub mod relay;
mod store;
mod submit;
pub mod validation;
pub mod widgets;

pub use config::{
    FieldConfig, FieldOption, FieldType, FieldValidation, FormConfig, SubmitSettings,
    DEFAULT_RELAY_BASE,
};
pub use error::{FormError, Result, SubmitError, ValidationErrors, DEFAULT_SUBMIT_ERROR};
pub use feedback::{render_status, render_submit_button};
pub use fields::{FieldBinding, FieldWidth, HiddenField};
pub use form::{Form, FormBuilder};
pub use relay::{RelayClient, RelayConfig};
pub use store::{FieldValues, FormStore};
pub use submit::{
    BoxError, PendingSubmission, SubmissionController, SubmissionStatus, SubmitCallback,
    SubmitStrategy,
};
