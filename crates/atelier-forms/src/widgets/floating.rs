//! Floating-label widgets in the site's utility-class style.

use super::{html_escape, Widget, WidgetAttrs};

const INPUT_CLASS: &str = "peer relative h-12 w-full rounded border px-4 text-sm \
transition-all outline-none placeholder-transparent focus-visible:outline-none \
disabled:cursor-not-allowed disabled:bg-gray-50 disabled:text-gray-400";

const TEXTAREA_CLASS: &str = "peer relative w-full rounded border px-4 py-3 text-sm \
transition-all outline-none resize-none placeholder-transparent focus-visible:outline-none \
disabled:cursor-not-allowed disabled:bg-gray-50 disabled:text-gray-400";

const SELECT_CLASS: &str = "peer relative h-12 w-full rounded border bg-white px-4 text-sm \
transition-all outline-none focus-visible:outline-none \
disabled:cursor-not-allowed disabled:bg-gray-50 disabled:text-gray-400";

/// Attributes the widgets render themselves.
const OWN_ATTRS: &[&str] = &["class", "id", "placeholder"];

/// HTML input types supported by [`TextInput`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputType {
    /// Plain text.
    #[default]
    Text,
    /// Email address.
    Email,
    /// Telephone number.
    Tel,
    /// Password.
    Password,
    /// URL.
    Url,
}

impl InputType {
    /// Returns the value of the `type` attribute.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Email => "email",
            Self::Tel => "tel",
            Self::Password => "password",
            Self::Url => "url",
        }
    }
}

fn class_with(base: &str, attrs: &WidgetAttrs) -> String {
    match attrs.get("class") {
        Some(extra) if !extra.is_empty() => format!("{base} {extra}"),
        _ => base.to_string(),
    }
}

fn id_for(name: &str, attrs: &WidgetAttrs) -> String {
    attrs.get("id").cloned().unwrap_or_else(|| name.to_string())
}

fn placeholder_attr(own: Option<&String>, attrs: &WidgetAttrs) -> String {
    own.or_else(|| attrs.get("placeholder"))
        .map(|p| format!(r#" placeholder="{}""#, html_escape(p)))
        .unwrap_or_default()
}

/// Single-line text input.
#[derive(Debug, Clone, Default)]
pub struct TextInput {
    /// The HTML input type.
    pub input_type: InputType,
    /// Placeholder text.
    pub placeholder: Option<String>,
}

impl TextInput {
    /// Creates a new text input.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an input of the given type.
    pub fn of_type(input_type: InputType) -> Self {
        Self {
            input_type,
            placeholder: None,
        }
    }

    /// Creates an email input.
    pub fn email() -> Self {
        Self::of_type(InputType::Email)
    }

    /// Creates a telephone input.
    pub fn tel() -> Self {
        Self::of_type(InputType::Tel)
    }

    /// Creates a password input.
    pub fn password() -> Self {
        Self::of_type(InputType::Password)
    }

    /// Creates a URL input.
    pub fn url() -> Self {
        Self::of_type(InputType::Url)
    }

    /// Sets the placeholder text.
    #[must_use]
    pub fn placeholder(mut self, text: impl Into<String>) -> Self {
        self.placeholder = Some(text.into());
        self
    }
}

impl Widget for TextInput {
    fn render(&self, name: &str, value: Option<&str>, attrs: &WidgetAttrs) -> String {
        let value_attr = value
            .map(|v| format!(r#" value="{}""#, html_escape(v)))
            .unwrap_or_default();
        let placeholder = placeholder_attr(self.placeholder.as_ref(), attrs);
        let extra_attrs = attrs.to_html_except(OWN_ATTRS);

        format!(
            r#"<input id="{}" type="{}" name="{}" class="{}"{value_attr}{placeholder}{extra_attrs}>"#,
            html_escape(&id_for(name, attrs)),
            self.input_type.as_str(),
            html_escape(name),
            class_with(INPUT_CLASS, attrs),
        )
    }

    fn input_type(&self) -> &str {
        self.input_type.as_str()
    }
}

/// Multi-line text input.
#[derive(Debug, Clone)]
pub struct Textarea {
    /// Number of rows.
    pub rows: usize,
    /// Placeholder text.
    pub placeholder: Option<String>,
}

impl Default for Textarea {
    fn default() -> Self {
        Self {
            rows: 4,
            placeholder: None,
        }
    }
}

impl Textarea {
    /// Creates a new textarea with the specified rows.
    pub fn new(rows: usize) -> Self {
        Self {
            rows,
            placeholder: None,
        }
    }

    /// Sets the placeholder text.
    #[must_use]
    pub fn placeholder(mut self, text: impl Into<String>) -> Self {
        self.placeholder = Some(text.into());
        self
    }
}

impl Widget for Textarea {
    fn render(&self, name: &str, value: Option<&str>, attrs: &WidgetAttrs) -> String {
        let content = value.map(html_escape).unwrap_or_default();
        let placeholder = placeholder_attr(self.placeholder.as_ref(), attrs);
        let extra_attrs = attrs.to_html_except(OWN_ATTRS);

        format!(
            r#"<textarea id="{}" name="{}" rows="{}" class="{}"{placeholder}{extra_attrs}>{content}</textarea>"#,
            html_escape(&id_for(name, attrs)),
            html_escape(name),
            self.rows,
            class_with(TEXTAREA_CLASS, attrs),
        )
    }

    fn input_type(&self) -> &str {
        "textarea"
    }
}

/// Single-choice select with a disabled, empty-valued placeholder option.
#[derive(Debug, Clone)]
pub struct Select {
    /// Available options (value, label).
    pub options: Vec<(String, String)>,
    /// Label of the placeholder option.
    pub placeholder: String,
}

impl Default for Select {
    fn default() -> Self {
        Self {
            options: Vec::new(),
            placeholder: "Selecione uma opção".to_string(),
        }
    }
}

impl Select {
    /// Creates a new select with the given options.
    pub fn new(options: Vec<(impl Into<String>, impl Into<String>)>) -> Self {
        Self {
            options: options
                .into_iter()
                .map(|(v, l)| (v.into(), l.into()))
                .collect(),
            ..Default::default()
        }
    }

    /// Sets the placeholder label.
    #[must_use]
    pub fn placeholder(mut self, label: impl Into<String>) -> Self {
        self.placeholder = label.into();
        self
    }
}

impl Widget for Select {
    fn render(&self, name: &str, value: Option<&str>, attrs: &WidgetAttrs) -> String {
        let current = value.unwrap_or("");
        let blank_selected = if current.is_empty() { " selected" } else { "" };

        let mut options = format!(
            r#"<option value="" disabled{blank_selected}>{}</option>"#,
            html_escape(&self.placeholder)
        );
        for (opt_value, label) in &self.options {
            let selected = if opt_value == current { " selected" } else { "" };
            options.push_str(&format!(
                r#"<option value="{}"{selected}>{}</option>"#,
                html_escape(opt_value),
                html_escape(label)
            ));
        }

        let extra_attrs = attrs.to_html_except(OWN_ATTRS);
        format!(
            r#"<select id="{}" name="{}" class="{}"{extra_attrs}>{options}</select>"#,
            html_escape(&id_for(name, attrs)),
            html_escape(name),
            class_with(SELECT_CLASS, attrs),
        )
    }

    fn input_type(&self) -> &str {
        "select"
    }

    fn accepts(&self, value: &str) -> bool {
        value.is_empty() || self.options.iter().any(|(v, _)| v == value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_input() {
        let widget = TextInput::new().placeholder("Pedro");
        let html = widget.render("nome", None, &WidgetAttrs::new());
        assert!(html.contains(r#"type="text""#));
        assert!(html.contains(r#"name="nome""#));
        assert!(html.contains(r#"id="nome""#));
        assert!(html.contains(r#"placeholder="Pedro""#));
    }

    #[test]
    fn test_tel_input_keeps_value_and_extra_class() {
        let attrs = WidgetAttrs::new()
            .with("class", "border-red-500")
            .with("required", "required");
        let html = TextInput::tel().render("celular", Some("(11) 99999-9999"), &attrs);
        assert!(html.contains(r#"type="tel""#));
        assert!(html.contains(r#"value="(11) 99999-9999""#));
        assert!(html.contains("disabled:text-gray-400 border-red-500"));
        assert!(html.contains(r#" required="required""#));
    }

    #[test]
    fn test_textarea() {
        let html = Textarea::new(6).render("mensagem", Some("<oi>"), &WidgetAttrs::new());
        assert!(html.contains(r#"rows="6""#));
        assert!(html.contains("&lt;oi&gt;</textarea>"));
    }

    #[test]
    fn test_select_placeholder_and_selection() {
        let widget = Select::new(vec![("wedding", "Casamento"), ("family", "Família")]);
        let html = widget.render("servico", None, &WidgetAttrs::new());
        assert!(html.contains(r#"<option value="" disabled selected>Selecione uma opção</option>"#));

        let html = widget.render("servico", Some("family"), &WidgetAttrs::new());
        assert!(html.contains(r#"<option value="" disabled>"#));
        assert!(html.contains(r#"value="family" selected"#));
    }

    #[test]
    fn test_select_accepts_known_options() {
        let widget = Select::new(vec![("wedding", "Casamento")]);
        assert!(widget.accepts("wedding"));
        assert!(widget.accepts(""));
        assert!(!widget.accepts("birthday"));
    }
}
