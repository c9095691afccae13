//! Pure field validation for the auth and profile forms.
//!
//! Mirrors the backend's acceptance rules so bad input never reaches the
//! network. Stateless; every function returns the full list of field errors
//! rather than stopping at the first.

use chrono::{NaiveDate, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::model::{Credentials, ProfileUpdate, Registration};

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid"));

const PASSWORD_SPECIALS: &str = "!@#$%^&*";
const ADULT_AGE_YEARS: u32 = 18;

/// A single rejected form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// `Ok(())` or every field error found.
pub type ValidationResult = Result<(), Vec<FieldError>>;

/// Validate a login form: email format plus the password policy.
pub fn validate_credentials(credentials: &Credentials) -> ValidationResult {
    let mut errors = Vec::new();
    check_email(&credentials.email, &mut errors);
    check_password(&credentials.password, &mut errors);
    finish(errors)
}

/// Validate a signup form: names, email, password policy, adult date of
/// birth, and at least one usable skill tag.
pub fn validate_registration(registration: &Registration) -> ValidationResult {
    let mut errors = Vec::new();
    check_name("firstName", &registration.first_name, 3, &mut errors);
    check_name("lastName", &registration.last_name, 3, &mut errors);
    check_email(&registration.email, &mut errors);
    check_password(&registration.password, &mut errors);
    check_adult_dob(registration.dob, &mut errors);
    check_skills(&registration.skill, &mut errors);
    finish(errors)
}

/// Validate a profile update: shorter name minimum, dob must not lie in the
/// future, at least one skill.
pub fn validate_profile_update(update: &ProfileUpdate) -> ValidationResult {
    let mut errors = Vec::new();
    check_name("firstName", &update.first_name, 2, &mut errors);
    check_name("lastName", &update.last_name, 2, &mut errors);
    if update.dob > Utc::now().date_naive() {
        errors.push(FieldError::new("dob", "Date of Birth cannot be in the future"));
    }
    check_skills(&update.skill, &mut errors);
    finish(errors)
}

fn finish(errors: Vec<FieldError>) -> ValidationResult {
    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

fn check_name(field: &'static str, value: &str, min_len: usize, errors: &mut Vec<FieldError>) {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        errors.push(FieldError::new(field, format!("{field} is required")));
    } else if trimmed.chars().count() < min_len {
        errors.push(FieldError::new(
            field,
            format!("{field} must be at least {min_len} characters"),
        ));
    }
}

fn check_email(value: &str, errors: &mut Vec<FieldError>) {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        errors.push(FieldError::new("email", "Email is required"));
    } else if !EMAIL_RE.is_match(trimmed) {
        errors.push(FieldError::new("email", "Invalid email format"));
    }
}

fn check_password(value: &str, errors: &mut Vec<FieldError>) {
    let message = if value.is_empty() {
        Some("Password is required")
    } else if value.chars().count() < 8 {
        Some("Password must be at least 8 characters")
    } else if !value.chars().any(|ch| ch.is_ascii_lowercase()) {
        Some("Password must include a lowercase letter")
    } else if !value.chars().any(|ch| ch.is_ascii_uppercase()) {
        Some("Password must include an uppercase letter")
    } else if !value.chars().any(|ch| ch.is_ascii_digit()) {
        Some("Password must include a number")
    } else if !value.chars().any(|ch| PASSWORD_SPECIALS.contains(ch)) {
        Some("Password must include a special character")
    } else {
        None
    };

    if let Some(message) = message {
        errors.push(FieldError::new("password", message));
    }
}

fn check_adult_dob(dob: NaiveDate, errors: &mut Vec<FieldError>) {
    let today = Utc::now().date_naive();
    match today.years_since(dob) {
        Some(age) if age >= ADULT_AGE_YEARS => {}
        Some(_) => errors.push(FieldError::new(
            "dob",
            format!("You must be at least {ADULT_AGE_YEARS} years old"),
        )),
        // years_since is None when dob is in the future.
        None => errors.push(FieldError::new("dob", "Invalid date of birth")),
    }
}

fn check_skills(skills: &[String], errors: &mut Vec<FieldError>) {
    if skills.is_empty() {
        errors.push(FieldError::new("skills", "At least one skill is required"));
        return;
    }
    if skills.iter().any(|skill| skill.trim().chars().count() < 2) {
        errors.push(FieldError::new(
            "skills",
            "Skill must be at least 2 characters",
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Gender;
    use chrono::Datelike;

    fn adult_dob() -> NaiveDate {
        let today = Utc::now().date_naive();
        today.with_year(today.year() - 30).expect("valid year")
    }

    fn registration() -> Registration {
        Registration {
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            email: "ada@example.com".into(),
            gender: Gender::Female,
            dob: adult_dob(),
            password: "Sup3rSecret!".into(),
            skill: vec!["rust".into()],
        }
    }

    fn fields(result: ValidationResult) -> Vec<&'static str> {
        result
            .expect_err("expected validation errors")
            .into_iter()
            .map(|error| error.field)
            .collect()
    }

    #[test]
    fn valid_registration_passes() {
        assert!(validate_registration(&registration()).is_ok());
    }

    #[test]
    fn short_names_and_bad_email_are_reported_together() {
        let mut registration = registration();
        registration.first_name = "Al".into();
        registration.email = "not-an-email".into();
        assert_eq!(
            fields(validate_registration(&registration)),
            vec!["firstName", "email"]
        );
    }

    #[test]
    fn weak_passwords_are_rejected() {
        for password in ["", "short1!", "alllower1!", "ALLUPPER1!", "NoDigits!!", "NoSpecial11"] {
            let credentials = Credentials {
                email: "ada@example.com".into(),
                password: password.into(),
            };
            assert_eq!(fields(validate_credentials(&credentials)), vec!["password"]);
        }
    }

    #[test]
    fn minors_cannot_register() {
        let mut registration = registration();
        let today = Utc::now().date_naive();
        registration.dob = today.with_year(today.year() - 17).expect("valid year");
        assert_eq!(fields(validate_registration(&registration)), vec!["dob"]);
    }

    #[test]
    fn skills_must_be_present_and_substantial() {
        let mut registration = registration();
        registration.skill = Vec::new();
        assert_eq!(fields(validate_registration(&registration)), vec!["skills"]);

        registration.skill = vec!["c".into()];
        assert_eq!(fields(validate_registration(&registration)), vec!["skills"]);
    }

    #[test]
    fn profile_update_allows_two_character_names() {
        let update = ProfileUpdate {
            first_name: "Al".into(),
            last_name: "Po".into(),
            gender: Gender::Other,
            dob: adult_dob(),
            skill: vec!["go".into()],
            photo: None,
        };
        assert!(validate_profile_update(&update).is_ok());
    }

    #[test]
    fn profile_update_rejects_future_dob() {
        let today = Utc::now().date_naive();
        let update = ProfileUpdate {
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            gender: Gender::Female,
            dob: today.with_year(today.year() + 1).expect("valid year"),
            skill: vec!["rust".into()],
            photo: None,
        };
        assert_eq!(fields(validate_profile_update(&update)), vec!["dob"]);
    }
}
