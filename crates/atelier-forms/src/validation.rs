//! Form field validators.
//!
//! Validators are pure checks over a single string value. A field combines
//! them in a [`ValidatorChain`], which always runs them presence first, then
//! format, then length, and stops at the first failure.

use std::sync::{Arc, LazyLock};

use regex::Regex;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid regex")
});

static PHONE_DIGITS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[1-9]\d{0,15}$").expect("phone pattern is a valid regex"));

/// Where a validator sits in a chain.
///
/// Only [`ValidatorStage::Presence`] validators ever see blank values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ValidatorStage {
    /// Checks whether a value was given at all.
    Presence,
    /// Checks the shape of the value (email, phone, URL).
    Format,
    /// Checks length bounds.
    Length,
}

/// A single check over a field value.
pub trait Validator: Send + Sync {
    /// Returns the failure message when `value` does not pass.
    fn validate(&self, value: &str) -> Result<(), String>;

    /// The message reported on failure.
    fn message(&self) -> &str;

    /// Returns the chain stage this validator runs in.
    fn stage(&self) -> ValidatorStage {
        ValidatorStage::Format
    }
}

/// Returns true when the value is empty or whitespace only.
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn verdict(passes: bool, message: &str) -> Result<(), String> {
    if passes {
        Ok(())
    } else {
        Err(message.to_owned())
    }
}

/// Validator that requires a non-blank value.
#[derive(Debug, Clone)]
pub struct RequiredValidator {
    message: String,
}

impl RequiredValidator {
    /// Uses the default Portuguese message.
    pub fn new() -> Self {
        Self::with_message("Este campo é obrigatório")
    }

    /// Uses `message` instead of the default.
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Default for RequiredValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator for RequiredValidator {
    fn validate(&self, value: &str) -> Result<(), String> {
        verdict(!is_blank(value), &self.message)
    }

    fn message(&self) -> &str {
        &self.message
    }

    fn stage(&self) -> ValidatorStage {
        ValidatorStage::Presence
    }
}

/// Validator that enforces a maximum length in characters.
#[derive(Debug, Clone)]
pub struct MaxLengthValidator {
    max_length: usize,
    message: String,
}

impl MaxLengthValidator {
    /// Accepts at most `max_length` characters.
    pub fn new(max_length: usize) -> Self {
        Self::with_message(max_length, format!("Máximo {max_length} caracteres"))
    }

    /// Same bound, custom message.
    pub fn with_message(max_length: usize, message: impl Into<String>) -> Self {
        Self {
            max_length,
            message: message.into(),
        }
    }
}

impl Validator for MaxLengthValidator {
    fn validate(&self, value: &str) -> Result<(), String> {
        verdict(value.chars().count() <= self.max_length, &self.message)
    }

    fn message(&self) -> &str {
        &self.message
    }

    fn stage(&self) -> ValidatorStage {
        ValidatorStage::Length
    }
}

/// Validator that enforces a minimum length in characters.
#[derive(Debug, Clone)]
pub struct MinLengthValidator {
    min_length: usize,
    message: String,
}

impl MinLengthValidator {
    /// Accepts at least `min_length` characters.
    pub fn new(min_length: usize) -> Self {
        Self::with_message(min_length, format!("Mínimo {min_length} caracteres"))
    }

    /// Same bound, custom message.
    pub fn with_message(min_length: usize, message: impl Into<String>) -> Self {
        Self {
            min_length,
            message: message.into(),
        }
    }
}

impl Validator for MinLengthValidator {
    fn validate(&self, value: &str) -> Result<(), String> {
        verdict(value.chars().count() >= self.min_length, &self.message)
    }

    fn message(&self) -> &str {
        &self.message
    }

    fn stage(&self) -> ValidatorStage {
        ValidatorStage::Length
    }
}

/// Validator for email addresses of the `local@domain.tld` shape.
#[derive(Debug, Clone)]
pub struct EmailValidator {
    message: String,
}

impl EmailValidator {
    /// Uses the default Portuguese message.
    pub fn new() -> Self {
        Self::with_message("Email inválido")
    }

    /// Uses `message` instead of the default.
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Default for EmailValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator for EmailValidator {
    fn validate(&self, value: &str) -> Result<(), String> {
        verdict(EMAIL_RE.is_match(value), &self.message)
    }

    fn message(&self) -> &str {
        &self.message
    }
}

/// Validator for phone numbers.
///
/// Every non-digit character is stripped first, so punctuation and a
/// leading `+` are accepted. What remains must be 1 to 16 digits and must
/// not start with zero.
#[derive(Debug, Clone)]
pub struct PhoneValidator {
    message: String,
}

impl PhoneValidator {
    /// Uses the default Portuguese message.
    pub fn new() -> Self {
        Self::with_message("Número de telefone inválido")
    }

    /// Uses `message` instead of the default.
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Strips every non-digit character from a phone number.
    pub fn digits(value: &str) -> String {
        value.chars().filter(char::is_ascii_digit).collect()
    }
}

impl Default for PhoneValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator for PhoneValidator {
    fn validate(&self, value: &str) -> Result<(), String> {
        verdict(PHONE_DIGITS_RE.is_match(&Self::digits(value)), &self.message)
    }

    fn message(&self) -> &str {
        &self.message
    }
}

/// Validator for URL values.
#[derive(Debug, Clone)]
pub struct UrlValidator {
    message: String,
}

impl UrlValidator {
    /// Uses the default Portuguese message.
    pub fn new() -> Self {
        Self::with_message("URL inválida")
    }

    /// Uses `message` instead of the default.
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Default for UrlValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator for UrlValidator {
    fn validate(&self, value: &str) -> Result<(), String> {
        let value = value.trim();
        verdict(
            value.starts_with("http://") || value.starts_with("https://"),
            &self.message,
        )
    }

    fn message(&self) -> &str {
        &self.message
    }
}

/// An ordered set of validators for one field.
///
/// Validators are kept sorted by [`ValidatorStage`], stable within a stage.
/// Blank values only reach presence validators.
#[derive(Clone, Default)]
pub struct ValidatorChain {
    validators: Vec<Arc<dyn Validator>>,
}

impl std::fmt::Debug for ValidatorChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.validators.iter().map(|v| (v.stage(), v.message())))
            .finish()
    }
}

impl ValidatorChain {
    /// Creates an empty chain.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a validator at the end of its stage.
    pub fn push(&mut self, validator: impl Validator + 'static) {
        self.push_shared(Arc::new(validator));
    }

    /// Adds a shared validator at the end of its stage.
    pub fn push_shared(&mut self, validator: Arc<dyn Validator>) {
        let stage = validator.stage();
        let at = self
            .validators
            .iter()
            .position(|v| v.stage() > stage)
            .unwrap_or(self.validators.len());
        self.validators.insert(at, validator);
    }

    /// Builder form of [`ValidatorChain::push`].
    #[must_use]
    pub fn with(mut self, validator: impl Validator + 'static) -> Self {
        self.push(validator);
        self
    }

    /// Returns whether the chain holds no validators.
    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }

    /// Returns the number of validators in the chain.
    pub fn len(&self) -> usize {
        self.validators.len()
    }

    /// Returns the stages of the chain in evaluation order.
    pub fn stages(&self) -> Vec<ValidatorStage> {
        self.validators.iter().map(|v| v.stage()).collect()
    }

    /// Returns the default messages of the chain in evaluation order.
    pub fn messages(&self) -> Vec<&str> {
        self.validators.iter().map(|v| v.message()).collect()
    }

    /// Runs the chain and returns the first failure.
    pub fn validate(&self, value: &str) -> Result<(), String> {
        let blank = is_blank(value);
        self.validators
            .iter()
            .filter(|v| !blank || v.stage() == ValidatorStage::Presence)
            .try_for_each(|v| v.validate(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_validator() {
        let v = RequiredValidator::new();
        assert!(v.validate("hello").is_ok());
        assert!(v.validate("").is_err());
        assert!(v.validate("   ").is_err());
        assert_eq!(
            RequiredValidator::with_message("fill me").validate(""),
            Err("fill me".to_string())
        );
    }

    #[test]
    fn test_max_length_validator() {
        let v = MaxLengthValidator::new(5);
        assert!(v.validate("hello").is_ok());
        assert!(v.validate("olá!!").is_ok());
        assert_eq!(v.validate("hello world"), Err("Máximo 5 caracteres".to_string()));
    }

    #[test]
    fn test_min_length_validator_counts_raw_value() {
        let v = MinLengthValidator::new(5);
        assert!(v.validate("hello").is_ok());
        assert!(v.validate("  hi ").is_ok());
        assert_eq!(v.validate("hi"), Err("Mínimo 5 caracteres".to_string()));
    }

    #[test]
    fn test_email_validator() {
        let v = EmailValidator::new();
        assert!(v.validate("a@b.co").is_ok());
        assert!(v.validate("user.name@domain.co.uk").is_ok());
        assert_eq!(v.validate("not-an-email"), Err("Email inválido".to_string()));
        assert!(v.validate("@example.com").is_err());
        assert!(v.validate("user@example").is_err());
        assert!(v.validate("us er@example.com").is_err());
        assert!(v.validate("a@b@c.com").is_err());
    }

    #[test]
    fn test_email_validator_rejects_surrounding_spaces() {
        let v = EmailValidator::new();
        assert!(v.validate(" a@b.co").is_err());
        assert!(v.validate("a@b.co ").is_err());
        assert!(v.validate("a@b.co").is_ok());
    }

    #[test]
    fn test_phone_validator() {
        let v = PhoneValidator::new();
        assert_eq!(PhoneValidator::digits("(11) 99999-9999"), "11999999999");
        assert!(v.validate("(11) 99999-9999").is_ok());
        assert!(v.validate("+55 11 99999-9999").is_ok());
        assert!(v.validate("1234567890123456").is_ok());
        assert!(v.validate("12345678901234567").is_err());
        assert!(v.validate("(01) 2345-6789").is_err());
        assert!(v.validate("abc").is_err());
    }

    #[test]
    fn test_url_validator() {
        let v = UrlValidator::new();
        assert!(v.validate("https://example.com").is_ok());
        assert!(v.validate("http://example.com/path").is_ok());
        assert!(v.validate("example.com").is_err());
    }

    #[test]
    fn test_chain_orders_by_stage() {
        let chain = ValidatorChain::new()
            .with(MaxLengthValidator::new(3))
            .with(EmailValidator::new())
            .with(RequiredValidator::new());

        assert_eq!(
            chain.stages(),
            vec![
                ValidatorStage::Presence,
                ValidatorStage::Format,
                ValidatorStage::Length
            ]
        );
        // Format fails before length is considered.
        assert_eq!(chain.validate("toolong"), Err("Email inválido".to_string()));
        assert_eq!(chain.validate("a@b.co"), Err("Máximo 3 caracteres".to_string()));
    }

    #[test]
    fn test_chain_skips_blank_for_non_presence() {
        let optional = ValidatorChain::new()
            .with(EmailValidator::new())
            .with(MinLengthValidator::new(3));
        assert!(optional.validate("").is_ok());
        assert!(optional.validate("   ").is_ok());

        let required = ValidatorChain::new()
            .with(EmailValidator::new())
            .with(RequiredValidator::new());
        assert_eq!(
            required.validate(" "),
            Err("Este campo é obrigatório".to_string())
        );
    }

    #[test]
    fn test_chain_stable_within_stage() {
        let chain = ValidatorChain::new()
            .with(MinLengthValidator::with_message(2, "first"))
            .with(MaxLengthValidator::with_message(0, "second"));
        assert_eq!(chain.messages(), vec!["first", "second"]);
        assert_eq!(chain.validate("a"), Err("first".to_string()));
    }
}
