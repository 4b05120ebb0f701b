//! Select field types.

use super::FieldBinding;
use crate::widgets::Select;

/// Creates a choice field (single select with a placeholder option).
///
/// Being required means the placeholder may not stay selected.
pub fn choice_field(
    name: &str,
    label: &str,
    choices: Vec<(&str, &str)>,
    required: bool,
) -> FieldBinding {
    let field = FieldBinding::new(name, label, Select::new(choices));
    if required {
        field.required()
    } else {
        field
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::FormStore;

    #[test]
    fn test_choice_field() {
        let choices = vec![("wedding", "Casamento"), ("family", "Família")];
        let field = choice_field("servico", "Serviço", choices, true);
        assert_eq!(field.name, "servico");
        assert!(field.required);
        assert_eq!(field.widget.input_type(), "select");
    }

    #[test]
    fn test_required_choice_is_placeholder_check() {
        let mut store = FormStore::new();
        let field = choice_field("servico", "Serviço", vec![("family", "Família")], true);
        field.mount(&mut store);
        assert!(!store.is_form_valid());

        field.on_change(&mut store, "family");
        assert!(store.is_form_valid());
    }
}
