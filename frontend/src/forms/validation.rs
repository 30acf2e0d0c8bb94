use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

pub const NAME_ERROR: &str = "Please enter a valid name";
pub const EMAIL_ERROR: &str = "Please enter a valid email address";
pub const ROLE_ERROR: &str = "Please select your role in football";

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

/// Options offered by the role select. The empty value is the placeholder.
pub const ROLE_OPTIONS: &[(&str, &str)] = &[
    ("", "Select your role"),
    ("player", "Player"),
    ("coach", "Coach"),
    ("scout", "Scout"),
    ("analyst", "Analyst"),
    ("club", "Club / Academy"),
    ("investor", "Investor"),
    ("other", "Other"),
];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadSubmission {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub role: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<String>,
}

impl ValidationResult {
    /// Errors joined the way they are shown to the user.
    pub fn message(&self) -> String {
        self.errors.join(". ")
    }
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Checks every rule and collects all failures, in name, email, role order.
pub fn validate(lead: &LeadSubmission) -> ValidationResult {
    let mut errors = Vec::new();

    if lead.name.trim().chars().count() < 2 {
        errors.push(NAME_ERROR.to_string());
    }
    if !is_valid_email(&lead.email) {
        errors.push(EMAIL_ERROR.to_string());
    }
    if lead.role.is_empty() {
        errors.push(ROLE_ERROR.to_string());
    }

    ValidationResult {
        valid: errors.is_empty(),
        errors,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lead(name: &str, email: &str, role: &str) -> LeadSubmission {
        LeadSubmission {
            name: name.into(),
            email: email.into(),
            role: role.into(),
        }
    }

    #[test]
    fn accepts_complete_lead() {
        let result = validate(&lead("Jo", "jo@x.com", "coach"));
        assert!(result.valid);
        assert!(result.errors.is_empty());
    }

    #[test]
    fn reports_every_failure_in_fixed_order() {
        let result = validate(&lead("J", "bad", ""));
        assert!(!result.valid);
        assert_eq!(result.errors, vec![NAME_ERROR, EMAIL_ERROR, ROLE_ERROR]);
        assert_eq!(
            result.message(),
            "Please enter a valid name. Please enter a valid email address. Please select your role in football"
        );
    }

    #[test]
    fn name_is_trimmed_before_length_check() {
        assert_eq!(validate(&lead("  A  ", "a@b.co", "player")).errors, vec![NAME_ERROR]);
        assert_eq!(validate(&lead("", "a@b.co", "player")).errors, vec![NAME_ERROR]);
        assert!(validate(&lead(" Al ", "a@b.co", "player")).valid);
    }

    #[test]
    fn name_length_counts_characters() {
        assert!(validate(&lead("Ølé", "a@b.co", "scout")).valid);
    }

    #[test]
    fn email_shape() {
        assert!(is_valid_email("jo@x.com"));
        assert!(is_valid_email("first.last@sub.domain.org"));
        assert!(!is_valid_email("jo@xcom"));
        assert!(!is_valid_email("jox.com"));
        assert!(!is_valid_email("jo @x.com"));
        assert!(!is_valid_email("jo@x.com "));
        assert!(!is_valid_email("@x.com"));
        assert!(!is_valid_email("jo@.com"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn single_email_failure_reported_alone() {
        let result = validate(&lead("Jordan", "jordan@", "analyst"));
        assert_eq!(result.errors, vec![EMAIL_ERROR]);
    }

    #[test]
    fn missing_role_reported_alone() {
        let result = validate(&lead("Jordan", "jordan@club.com", ""));
        assert_eq!(result.errors, vec![ROLE_ERROR]);
    }
}
