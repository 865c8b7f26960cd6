//! Field rules for registration input.
//!
//! Every rule runs and each failure appends its message, so the caller sees
//! all problems at once. The only guarded rule is the password length check,
//! which is skipped for an empty password.

use validator::ValidateEmail;

use super::domain::RegistrationRequest;

pub const NAME_REQUIRED: &str = "O nome é obrigatório.";
pub const NAME_TOO_SHORT: &str = "O nome deve conter no mínimo 3 caracteres.";
pub const NAME_TOO_LONG: &str = "O nome deve conter no máximo 100 caracteres.";
pub const EMAIL_REQUIRED: &str = "O e-mail é obrigatório.";
pub const EMAIL_INVALID: &str = "O e-mail informado é inválido.";
pub const PASSWORD_REQUIRED: &str = "A senha é obrigatória.";
pub const PASSWORD_TOO_SHORT: &str = "A senha deve conter no mínimo 6 caracteres.";

pub const NAME_MIN_CHARS: usize = 3;
pub const NAME_MAX_CHARS: usize = 100;
pub const PASSWORD_MIN_CHARS: usize = 6;

/// Ordered list of failed rules.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
    errors: Vec<String>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn push(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }

    pub fn into_errors(self) -> Vec<String> {
        self.errors
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RegistrationValidator;

impl RegistrationValidator {
    pub fn validate(&self, input: &RegistrationRequest) -> ValidationResult {
        let mut result = ValidationResult::default();

        let name_len = input.name.chars().count();
        if input.name.trim().is_empty() {
            result.push(NAME_REQUIRED);
        }
        if name_len < NAME_MIN_CHARS {
            result.push(NAME_TOO_SHORT);
        }
        if name_len > NAME_MAX_CHARS {
            result.push(NAME_TOO_LONG);
        }

        if input.email.trim().is_empty() {
            result.push(EMAIL_REQUIRED);
        }
        if !input.email.validate_email() {
            result.push(EMAIL_INVALID);
        }

        if input.password.trim().is_empty() {
            result.push(PASSWORD_REQUIRED);
        }
        if !input.password.is_empty() && input.password.chars().count() < PASSWORD_MIN_CHARS {
            result.push(PASSWORD_TOO_SHORT);
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(name: &str, email: &str, password: &str) -> RegistrationRequest {
        RegistrationRequest { name: name.into(), email: email.into(), password: password.into() }
    }

    fn errors_for(name: &str, email: &str, password: &str) -> Vec<String> {
        RegistrationValidator.validate(&request(name, email, password)).into_errors()
    }

    #[test]
    fn valid_input_passes() {
        let result = RegistrationValidator.validate(&request("Ana Silva", "ana@x.com", "secret1"));
        assert!(result.is_valid());
        assert!(result.errors().is_empty());
    }

    #[test]
    fn short_name_is_rejected() {
        assert_eq!(errors_for("Al", "al@x.com", "secret1"), vec![NAME_TOO_SHORT]);
    }

    #[test]
    fn name_length_counts_characters_not_bytes() {
        // three characters, six bytes
        assert!(errors_for("Çãé", "c@x.com", "secret1").is_empty());
        let long = "a".repeat(NAME_MAX_CHARS + 1);
        assert_eq!(errors_for(&long, "c@x.com", "secret1"), vec![NAME_TOO_LONG]);
        assert!(errors_for(&"a".repeat(NAME_MAX_CHARS), "c@x.com", "secret1").is_empty());
    }

    #[test]
    fn blank_name_reports_required_and_length() {
        assert_eq!(errors_for("", "ana@x.com", "secret1"), vec![NAME_REQUIRED, NAME_TOO_SHORT]);
    }

    #[test]
    fn invalid_email_is_rejected() {
        assert_eq!(errors_for("Ana Silva", "not-an-email", "secret1"), vec![EMAIL_INVALID]);
    }

    #[test]
    fn blank_email_reports_required_and_syntax() {
        assert_eq!(errors_for("Ana Silva", "", "secret1"), vec![EMAIL_REQUIRED, EMAIL_INVALID]);
    }

    #[test]
    fn empty_password_does_not_cascade_into_length() {
        assert_eq!(errors_for("Ana Silva", "ana@x.com", ""), vec![PASSWORD_REQUIRED]);
    }

    #[test]
    fn short_password_is_rejected() {
        assert_eq!(errors_for("Ana Silva", "ana@x.com", "abc"), vec![PASSWORD_TOO_SHORT]);
        assert!(errors_for("Ana Silva", "ana@x.com", "abcdef").is_empty());
    }

    #[test]
    fn all_rules_accumulate_in_order() {
        assert_eq!(
            errors_for("", "", ""),
            vec![NAME_REQUIRED, NAME_TOO_SHORT, EMAIL_REQUIRED, EMAIL_INVALID, PASSWORD_REQUIRED]
        );
    }
}
