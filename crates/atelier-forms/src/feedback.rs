//! Submission feedback: the status panel and the submit button.

use ironhtml::typed::Element;
use ironhtml_elements::{Button, Div, H3, P};

use crate::config::SubmitSettings;
use crate::store::FormStore;
use crate::submit::{SubmissionController, SubmissionStatus};

/// Label shown while a submission is in flight.
pub const SUBMITTING_LABEL: &str = "Enviando...";

/// Heading of the success panel.
pub const SUCCESS_HEADING: &str = "Formulário enviado com sucesso!";

/// Label of the control that starts a new submission after a success.
pub const SEND_ANOTHER_LABEL: &str = "Enviar outro formulário";

const RETRY_HINT: &str = "Corrija o problema e tente novamente.";

const BUTTON_CLASS: &str = "w-full rounded-lg bg-primary px-6 py-3 font-medium text-white \
transition-colors duration-200 hover:bg-primary-dark";
const BUTTON_DISABLED_CLASS: &str = "w-full rounded-lg bg-gray-300 px-6 py-3 font-medium \
text-gray-500 cursor-not-allowed";

/// Renders the panel for the current status.
///
/// `Idle` has nothing to show.
pub fn render_status(status: &SubmissionStatus, settings: &SubmitSettings) -> Option<String> {
    let html = match status {
        SubmissionStatus::Idle => return None,
        SubmissionStatus::Submitting => Element::<Div>::new()
            .class("my-4 rounded-lg bg-gray-50 p-4 text-center text-gray-600")
            .attr("role", "status")
            .attr("aria-live", "polite")
            .text(SUBMITTING_LABEL)
            .render(),
        SubmissionStatus::Succeeded => Element::<Div>::new()
            .class("my-4 rounded-lg border border-green-200 bg-green-50 p-6 text-center")
            .attr("role", "status")
            .child::<H3, _>(|h| {
                h.class("mb-2 text-lg font-semibold text-green-700")
                    .text(SUCCESS_HEADING)
            })
            .child::<P, _>(|p| p.class("mb-4 text-green-700").text(&settings.success_message))
            .child::<Button, _>(|b| {
                b.attr("type", "reset")
                    .attr("name", "_action")
                    .attr("value", "reset")
                    .class("text-sm font-medium text-green-700 underline")
                    .text(SEND_ANOTHER_LABEL)
            })
            .render(),
        SubmissionStatus::Failed(message) => Element::<Div>::new()
            .class("my-4 rounded-lg border border-red-200 bg-red-50 p-4 text-red-700")
            .attr("role", "alert")
            .child::<P, _>(|p| p.class("font-medium").text(message))
            .child::<P, _>(|p| p.class("mt-1 text-sm").text(RETRY_HINT))
            .render(),
    };
    Some(html)
}

/// Renders the submit button.
///
/// Disabled whenever the controller would refuse to submit; labelled
/// [`SUBMITTING_LABEL`] while a submission is in flight.
pub fn render_submit_button(
    controller: &SubmissionController,
    store: &FormStore,
    settings: &SubmitSettings,
) -> String {
    let enabled = controller.can_submit(store);
    let label = if controller.status().is_submitting() {
        SUBMITTING_LABEL
    } else {
        settings.button_text.as_str()
    };

    Element::<Button>::new()
        .attr("type", "submit")
        .class(if enabled { BUTTON_CLASS } else { BUTTON_DISABLED_CLASS })
        .when(!enabled, |b| b.attr("disabled", "disabled"))
        .text(label)
        .render()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::email_field;
    use crate::submit::SubmitStrategy;

    fn controller() -> SubmissionController {
        SubmissionController::new(SubmitStrategy::callback(|_| async {
            Ok::<(), crate::submit::BoxError>(())
        }))
    }

    #[test]
    fn test_idle_renders_nothing() {
        assert!(render_status(&SubmissionStatus::Idle, &SubmitSettings::default()).is_none());
    }

    #[test]
    fn test_submitting_panel() {
        let html = render_status(&SubmissionStatus::Submitting, &SubmitSettings::default()).unwrap();
        assert!(html.contains(SUBMITTING_LABEL));
    }

    #[test]
    fn test_success_panel_uses_configured_message() {
        let settings = SubmitSettings {
            success_message: "Recebemos sua mensagem.".to_string(),
            ..SubmitSettings::default()
        };
        let html = render_status(&SubmissionStatus::Succeeded, &settings).unwrap();
        assert!(html.contains(SUCCESS_HEADING));
        assert!(html.contains("Recebemos sua mensagem."));
        assert!(html.contains(SEND_ANOTHER_LABEL));
    }

    #[test]
    fn test_failure_panel_shows_message() {
        let status = SubmissionStatus::Failed("Limite de envios atingido".to_string());
        let html = render_status(&status, &SubmitSettings::default()).unwrap();
        assert!(html.contains("Limite de envios atingido"));
        assert!(html.contains(r#"role="alert""#));
    }

    #[test]
    fn test_button_follows_form_validity() {
        let mut store = FormStore::new();
        let field = email_field("email", "E-mail", true);
        field.mount(&mut store);
        let controller = controller();
        let settings = SubmitSettings::default();

        let html = render_submit_button(&controller, &store, &settings);
        assert!(html.contains("disabled"));
        assert!(html.contains("Enviar"));

        field.on_change(&mut store, "pedro@gmail.com");
        let html = render_submit_button(&controller, &store, &settings);
        assert!(!html.contains("disabled"));
    }

    #[test]
    fn test_button_while_submitting() {
        let mut store = FormStore::new();
        let mut controller = controller();
        let _pending = controller.begin(&mut store).unwrap();

        let html = render_submit_button(&controller, &store, &SubmitSettings::default());
        assert!(html.contains(SUBMITTING_LABEL));
        assert!(html.contains("disabled"));
    }
}
