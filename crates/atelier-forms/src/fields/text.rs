//! Text field types.

use super::FieldBinding;
use crate::validation::{
    EmailValidator, MaxLengthValidator, MinLengthValidator, PhoneValidator, UrlValidator,
};
use crate::widgets::{TextInput, Textarea};

/// Creates a character field (text input with max length).
pub fn char_field(name: &str, label: &str, max_length: usize, required: bool) -> FieldBinding {
    let field = FieldBinding::new(name, label, TextInput::new())
        .validator(MaxLengthValidator::new(max_length));
    if required {
        field.required()
    } else {
        field
    }
}

/// Creates a multi-line text field.
pub fn text_field(name: &str, label: &str, rows: usize, required: bool) -> FieldBinding {
    let field = FieldBinding::new(name, label, Textarea::new(rows));
    if required {
        field.required()
    } else {
        field
    }
}

/// Creates an email field.
pub fn email_field(name: &str, label: &str, required: bool) -> FieldBinding {
    let field = FieldBinding::new(name, label, TextInput::email()).validator(EmailValidator::new());
    if required {
        field.required()
    } else {
        field
    }
}

/// Creates a telephone field.
pub fn phone_field(name: &str, label: &str, required: bool) -> FieldBinding {
    let field = FieldBinding::new(name, label, TextInput::tel())
        .validator(PhoneValidator::new())
        .placeholder("(11) 99999-9999");
    if required {
        field.required()
    } else {
        field
    }
}

/// Creates a password field. Passwords are always required.
pub fn password_field(name: &str, label: &str, min_length: Option<usize>) -> FieldBinding {
    let field = FieldBinding::new(name, label, TextInput::password()).required();
    match min_length {
        Some(min) => field.validator(MinLengthValidator::new(min)),
        None => field,
    }
}

/// Creates a URL field.
pub fn url_field(name: &str, label: &str, required: bool) -> FieldBinding {
    let field = FieldBinding::new(name, label, TextInput::url())
        .validator(UrlValidator::new())
        .placeholder("https://");
    if required {
        field.required()
    } else {
        field
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ValidatorStage;

    #[test]
    fn test_char_field() {
        let field = char_field("nome", "Nome", 80, true);
        assert_eq!(field.name, "nome");
        assert!(field.required);
        // Required runs before the length bound regardless of insertion order.
        assert_eq!(
            field.validators.stages(),
            vec![ValidatorStage::Presence, ValidatorStage::Length]
        );
    }

    #[test]
    fn test_email_field() {
        let field = email_field("email", "E-mail", false);
        assert!(!field.required);
        assert_eq!(field.widget.input_type(), "email");
        assert!(field.validators.validate("").is_ok());
    }

    #[test]
    fn test_phone_field() {
        let field = phone_field("celular", "Telefone Celular", true);
        assert_eq!(field.widget.input_type(), "tel");
        assert!(field.validators.validate("(11) 99999-9999").is_ok());
        assert_eq!(
            field.validators.validate("0"),
            Err("Número de telefone inválido".to_string())
        );
    }

    #[test]
    fn test_password_field() {
        let field = password_field("senha", "Senha", Some(8));
        assert!(field.required);
        assert_eq!(field.validators.len(), 2);
    }

    #[test]
    fn test_text_field() {
        let field = text_field("mensagem", "Mensagem (opcional)", 8, false);
        assert_eq!(field.widget.input_type(), "textarea");
        assert!(field.validators.is_empty());
    }
}
