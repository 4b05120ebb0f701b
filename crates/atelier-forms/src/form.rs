//! A complete form: state, fields, submission and rendering in one place.

use ironhtml::typed::{Element, TypedNode};
use ironhtml_elements::{Div, Form as FormElement, H2, P};
use tracing::{debug, warn};

use crate::config::{FormConfig, SubmitSettings};
use crate::error::SubmitError;
use crate::feedback::{render_status, render_submit_button};
use crate::fields::{FieldBinding, HiddenField};
use crate::store::{FieldValues, FormStore};
use crate::submit::{PendingSubmission, SubmissionController, SubmissionStatus, SubmitStrategy};

/// Builder for [`Form`].
#[derive(Debug, Default)]
pub struct FormBuilder {
    title: String,
    description: Option<String>,
    fields: Vec<FieldBinding>,
    hidden: Vec<HiddenField>,
    initial: FieldValues,
    settings: SubmitSettings,
}

impl FormBuilder {
    /// Starts a form with the given title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Sets the description shown under the title.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Adds a field.
    #[must_use]
    pub fn field(mut self, field: FieldBinding) -> Self {
        self.fields.push(field);
        self
    }

    /// Adds several fields.
    #[must_use]
    pub fn fields(mut self, fields: impl IntoIterator<Item = FieldBinding>) -> Self {
        self.fields.extend(fields);
        self
    }

    /// Adds a hidden static field.
    #[must_use]
    pub fn hidden(mut self, field: HiddenField) -> Self {
        self.hidden.push(field);
        self
    }

    /// Sets a field's starting value.
    #[must_use]
    pub fn initial(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.initial.insert(name.into(), value.into());
        self
    }

    /// Sets the submit settings.
    #[must_use]
    pub fn settings(mut self, settings: SubmitSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Mounts every field and returns the form.
    ///
    /// A field whose name is already taken is dropped.
    pub fn build(self, strategy: SubmitStrategy) -> Form {
        let mut store = FormStore::with_initial(self.initial);
        let mut fields = Vec::with_capacity(self.fields.len());
        for field in self.fields {
            if field.mount(&mut store) {
                fields.push(field);
            } else {
                warn!(field = %field.name, "duplicate field name, keeping the first");
            }
        }
        debug!(title = %self.title, fields = fields.len(), "form built");

        Form {
            title: self.title,
            description: self.description,
            store,
            fields,
            controller: SubmissionController::new(strategy).with_hidden(self.hidden.clone()),
            hidden: self.hidden,
            settings: self.settings,
        }
    }
}

/// One live form instance.
#[derive(Debug)]
pub struct Form {
    title: String,
    description: Option<String>,
    store: FormStore,
    fields: Vec<FieldBinding>,
    hidden: Vec<HiddenField>,
    controller: SubmissionController,
    settings: SubmitSettings,
}

impl Form {
    /// Starts building a form.
    pub fn builder(title: impl Into<String>) -> FormBuilder {
        FormBuilder::new(title)
    }

    /// Builds a form from a configuration document.
    pub fn from_config(config: &FormConfig, strategy: SubmitStrategy) -> Self {
        let mut builder = FormBuilder::new(&config.title)
            .fields(config.bindings())
            .settings(config.submit_settings.clone());
        if let Some(description) = &config.description {
            builder = builder.description(description);
        }
        for hidden in config.submit_settings.hidden_fields(&config.title) {
            builder = builder.hidden(hidden);
        }
        builder.build(strategy)
    }

    /// Returns the title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the fields in display order.
    pub fn fields(&self) -> &[FieldBinding] {
        &self.fields
    }

    /// Returns the field with this name.
    pub fn field(&self, name: &str) -> Option<&FieldBinding> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Returns the form state.
    pub fn store(&self) -> &FormStore {
        &self.store
    }

    /// Returns the submit settings.
    pub fn settings(&self) -> &SubmitSettings {
        &self.settings
    }

    /// Returns a field's current value.
    pub fn value(&self, name: &str) -> &str {
        self.store.value(name)
    }

    /// Feeds a change event to the named field.
    ///
    /// Returns `false` when no such field exists.
    pub fn change(&mut self, name: &str, value: impl Into<String>) -> bool {
        let Some(field) = self.fields.iter().find(|f| f.name == name) else {
            debug!(field = name, "change for unknown field");
            return false;
        };
        field.on_change(&mut self.store, value);
        true
    }

    /// Feeds a blur event to the named field.
    ///
    /// Returns `false` when no such field exists.
    pub fn blur(&mut self, name: &str) -> bool {
        let Some(field) = self.fields.iter().find(|f| f.name == name) else {
            debug!(field = name, "blur for unknown field");
            return false;
        };
        field.on_blur(&mut self.store);
        true
    }

    /// Returns whether every field currently passes validation.
    pub fn is_valid(&self) -> bool {
        self.store.is_form_valid()
    }

    /// Returns whether the submit control should be enabled.
    pub fn can_submit(&self) -> bool {
        self.controller.can_submit(&self.store)
    }

    /// Enables or disables submission.
    pub fn set_disabled(&mut self, disabled: bool) {
        self.controller.set_disabled(disabled);
    }

    /// Returns the submission status.
    pub fn status(&self) -> &SubmissionStatus {
        self.controller.status()
    }

    /// Starts a submission without running it.
    ///
    /// The caller runs the returned submission and hands its outcome to
    /// [`Form::finish_submit`]; the form stays usable meanwhile.
    pub fn begin_submit(&mut self) -> Result<PendingSubmission, SubmitError> {
        self.controller.begin(&mut self.store)
    }

    /// Records the outcome of a submission started with
    /// [`Form::begin_submit`].
    pub fn finish_submit(&mut self, outcome: Result<(), SubmitError>) -> &SubmissionStatus {
        self.controller.finish(outcome)
    }

    /// Validates and submits the form.
    pub async fn submit(&mut self) -> Result<SubmissionStatus, SubmitError> {
        self.controller.submit(&mut self.store).await
    }

    /// Clears the form and returns it to `Idle`.
    pub fn reset(&mut self) -> Result<(), SubmitError> {
        self.controller.reset(&mut self.store)
    }

    /// Renders the whole form.
    ///
    /// After a successful submission only the success panel is shown.
    pub fn render(&self) -> String {
        let status_html = render_status(self.status(), &self.settings);
        let header = Element::<Div>::new()
            .class("mb-6 text-center")
            .child::<H2, _>(|h| h.class("text-2xl font-semibold text-gray-800").text(&self.title))
            .when(self.description.is_some(), |d| {
                d.child::<P, _>(|p| {
                    p.class("mt-2 text-gray-600")
                        .text(self.description.as_deref().unwrap_or_default())
                })
            })
            .render();

        if matches!(self.status(), SubmissionStatus::Succeeded) {
            return Element::<Div>::new()
                .class("mx-auto max-w-2xl")
                .raw(&header)
                .raw(status_html.unwrap_or_default())
                .render();
        }

        let fields_html: String = self.fields.iter().map(|f| f.render(&self.store)).collect();
        let hidden_html: String = self.hidden.iter().map(HiddenField::render).collect();
        let button = render_submit_button(&self.controller, &self.store, &self.settings);

        let mut form_node = Element::<FormElement>::new()
            .attr("method", "post")
            .attr("novalidate", "novalidate")
            .class("flex flex-wrap -mx-3")
            .child::<Div, _>(|d| d.class("w-full px-3").raw(&button))
            .into_node();
        if let TypedNode::Element { children, .. } = &mut form_node {
            children.splice(0..0, [TypedNode::Raw(hidden_html), TypedNode::Raw(fields_html)]);
        }
        let form = form_node.render();

        Element::<Div>::new()
            .class("mx-auto max-w-2xl")
            .raw(&header)
            .raw(status_html.unwrap_or_default())
            .raw(&form)
            .render()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use crate::fields::{char_field, email_field, phone_field};
    use crate::submit::BoxError;

    fn contact_form(strategy: SubmitStrategy) -> Form {
        Form::builder("Contato")
            .description("Fale com a gente")
            .field(char_field("nome", "Nome", 80, true))
            .field(email_field("email", "E-mail", true))
            .field(phone_field("celular", "Celular", false))
            .hidden(HiddenField::new("_subject", "Contato pelo site"))
            .build(strategy)
    }

    fn ok_strategy(calls: Arc<AtomicUsize>) -> SubmitStrategy {
        SubmitStrategy::callback(move |_| {
            let calls = calls.clone();
            async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok::<(), BoxError>(())
            }
        })
    }

    #[test]
    fn test_builder_mounts_fields() {
        let form = contact_form(ok_strategy(Arc::default()));
        assert_eq!(form.fields().len(), 3);
        assert_eq!(form.store().registered_fields(), ["nome", "email", "celular"]);
        assert!(form.store().is_required("email"));
        assert!(!form.store().is_required("celular"));
    }

    #[test]
    fn test_duplicate_field_dropped() {
        let form = Form::builder("Contato")
            .field(email_field("email", "E-mail", true))
            .field(email_field("email", "Outro e-mail", false))
            .build(ok_strategy(Arc::default()));
        assert_eq!(form.fields().len(), 1);
        assert_eq!(form.field("email").unwrap().label, "E-mail");
    }

    #[test]
    fn test_initial_values() {
        let form = Form::builder("Contato")
            .field(char_field("nome", "Nome", 80, true))
            .initial("nome", "Pedro")
            .initial("desconhecido", "x")
            .build(ok_strategy(Arc::default()));
        assert_eq!(form.value("nome"), "Pedro");
        assert_eq!(form.value("desconhecido"), "");
        assert!(form.is_valid());
    }

    #[test]
    fn test_unknown_field_events() {
        let mut form = contact_form(ok_strategy(Arc::default()));
        assert!(!form.change("idade", "30"));
        assert!(!form.blur("idade"));
        assert!(form.change("nome", "Pedro"));
    }

    #[test]
    fn test_can_submit_follows_validity() {
        let mut form = contact_form(ok_strategy(Arc::default()));
        assert!(!form.can_submit());

        form.change("nome", "Pedro");
        form.change("email", "pedro@gmail.com");
        assert!(form.can_submit());

        form.change("celular", "abc");
        assert!(!form.is_valid());
        assert!(!form.can_submit());

        form.set_disabled(true);
        form.change("celular", "");
        assert!(!form.can_submit());
    }

    #[tokio::test]
    async fn test_submit_and_reset() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut form = contact_form(ok_strategy(calls.clone()));
        form.change("nome", "Pedro");
        form.change("email", "pedro@gmail.com");

        let status = form.submit().await.unwrap();
        assert_eq!(status, SubmissionStatus::Succeeded);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(!form.can_submit());
        assert!(matches!(form.submit().await, Err(SubmitError::AlreadySucceeded)));

        form.reset().unwrap();
        assert_eq!(form.status(), &SubmissionStatus::Idle);
        assert_eq!(form.value("nome"), "");
        assert!(!form.store().is_touched("nome"));
    }

    #[tokio::test]
    async fn test_invalid_submit_reveals_errors() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut form = contact_form(ok_strategy(calls.clone()));
        form.change("email", "pedro");

        let err = form.submit().await.unwrap_err();
        let SubmitError::Invalid(errors) = err else {
            panic!("expected validation errors");
        };
        assert_eq!(errors.len(), 2);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert!(form.field("email").unwrap().has_error(form.store()));
        assert_eq!(form.status(), &SubmissionStatus::Idle);
    }

    #[tokio::test]
    async fn test_begin_blocks_second_submission() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut form = contact_form(ok_strategy(calls.clone()));
        form.change("nome", "Pedro");
        form.change("email", "pedro@gmail.com");

        let pending = form.begin_submit().unwrap();
        assert!(matches!(form.begin_submit(), Err(SubmitError::InFlight)));
        assert!(matches!(form.reset(), Err(SubmitError::InFlight)));
        assert!(form.render().contains("Enviando..."));

        let outcome = pending.run().await;
        assert_eq!(form.finish_submit(outcome), &SubmissionStatus::Succeeded);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_render_idle_form() {
        let mut form = contact_form(ok_strategy(Arc::default()));
        form.change("nome", "Pedro");
        let html = form.render();

        assert!(html.contains("Contato"));
        assert!(html.contains("Fale com a gente"));
        assert!(html.contains(r#"name="_subject""#));
        assert!(html.contains(r#"value="Pedro""#));
        assert!(html.contains(r#"type="submit""#));
        assert!(html.contains("bg-gray-300"));
        assert!(!form.can_submit());
    }

    #[tokio::test]
    async fn test_render_after_success_shows_panel_only() {
        let mut form = contact_form(ok_strategy(Arc::default()));
        form.change("nome", "Pedro");
        form.change("email", "pedro@gmail.com");
        form.submit().await.unwrap();

        let html = form.render();
        assert!(html.contains("Formulário enviado com sucesso!"));
        assert!(html.contains("Obrigado! Entraremos em contato em breve."));
        assert!(!html.contains(r#"name="email""#));
    }

    #[test]
    fn test_from_config() {
        let config = FormConfig::from_json(
            r#"{"title": "Orçamento", "fields": [
                {"fieldName": "email", "label": "E-mail", "fieldType": "email", "isRequired": true}
            ], "submitSettings": {"buttonText": "Pedir orçamento"}}"#,
        )
        .unwrap();
        let form = Form::from_config(&config, ok_strategy(Arc::default()));

        assert_eq!(form.title(), "Orçamento");
        assert!(form.field("email").is_some());
        let html = form.render();
        assert!(html.contains("Pedir orçamento"));
        assert!(html.contains(r#"name="_captcha""#));
    }
}
