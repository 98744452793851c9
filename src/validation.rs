//! Form validation for the login and signup inputs.
//!
//! Field keys match the wire names of the campaign API so the messages can be
//! shown next to server-side `errors` of the same shape.

use crate::constants::{MIN_NAME_LENGTH, MIN_PASSWORD_LENGTH, messages};
use crate::models::{Credentials, SignupFields};
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::OnceLock;

/// Field name to message
pub type FieldErrors = BTreeMap<String, String>;

fn email_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"))
}

pub fn is_valid_email(value: &str) -> bool {
    email_re().is_match(value.trim())
}

fn require(errors: &mut FieldErrors, field: &str, value: &str) -> bool {
    if value.trim().is_empty() {
        errors.insert(field.to_string(), messages::FIELD_REQUIRED.to_string());
        false
    } else {
        true
    }
}

fn min_length(errors: &mut FieldErrors, field: &str, value: &str, min: usize) {
    if value.trim().chars().count() < min {
        errors.insert(
            field.to_string(),
            format!("Debe tener al menos {} caracteres", min),
        );
    }
}

pub fn validate_login(credentials: &Credentials) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();
    require(&mut errors, "codigo-de-cliente", &credentials.codigo_cliente);
    require(&mut errors, "password", &credentials.password);

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

pub fn validate_signup(fields: &SignupFields) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();

    if require(&mut errors, "email", &fields.email) && !is_valid_email(&fields.email) {
        errors.insert(
            "email".to_string(),
            messages::FIELD_INVALID_EMAIL.to_string(),
        );
    }

    if require(&mut errors, "nombre-completo", &fields.nombre_completo) {
        min_length(
            &mut errors,
            "nombre-completo",
            &fields.nombre_completo,
            MIN_NAME_LENGTH,
        );
    }

    require(&mut errors, "codigo-de-cliente", &fields.codigo_cliente);

    if require(&mut errors, "password", &fields.password) {
        min_length(&mut errors, "password", &fields.password, MIN_PASSWORD_LENGTH);
    }

    if let Some(confirm) = &fields.confirm_password {
        if confirm != &fields.password {
            errors.insert(
                "confirm-password".to_string(),
                messages::FIELD_PASSWORD_MISMATCH.to_string(),
            );
        }
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_signup() -> SignupFields {
        SignupFields {
            email: "ana@example.com".to_string(),
            nombre_completo: "Ana Pérez".to_string(),
            codigo_cliente: "C-002".to_string(),
            password: "secret1".to_string(),
            confirm_password: Some("secret1".to_string()),
        }
    }

    #[test]
    fn test_login_requires_both_fields() {
        let errors = validate_login(&Credentials::default()).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors["codigo-de-cliente"], "Campo requerido");
        assert_eq!(errors["password"], "Campo requerido");

        let credentials = Credentials {
            codigo_cliente: "C-1".to_string(),
            password: "x".to_string(),
        };
        assert!(validate_login(&credentials).is_ok());
    }

    #[test]
    fn test_signup_accepts_valid_fields() {
        assert!(validate_signup(&valid_signup()).is_ok());

        let mut fields = valid_signup();
        fields.confirm_password = None;
        assert!(validate_signup(&fields).is_ok());
    }

    #[test]
    fn test_signup_field_rules() {
        let mut fields = valid_signup();
        fields.email = "not-an-email".to_string();
        fields.nombre_completo = "A".to_string();
        fields.password = "12345".to_string();
        fields.confirm_password = Some("123456".to_string());

        let errors = validate_signup(&fields).unwrap_err();
        assert_eq!(errors["email"], "Email inválido");
        assert_eq!(errors["nombre-completo"], "Debe tener al menos 2 caracteres");
        assert_eq!(errors["password"], "Debe tener al menos 6 caracteres");
        assert_eq!(errors["confirm-password"], "Las contraseñas no coinciden");
        assert!(!errors.contains_key("codigo-de-cliente"));
    }

    #[test]
    fn test_email_format() {
        assert!(is_valid_email("a@b.co"));
        assert!(is_valid_email("  a.b@c.example.org "));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a b@c.com"));
    }
}
