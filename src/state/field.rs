//! Text entry fields and validation for the personal info step

use regex::Regex;
use std::sync::LazyLock;

/// Same pattern the submission endpoint enforces: one `@`, a dot in the
/// domain part, no whitespace.
static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
});

/// Check a value against the email pattern
pub fn is_valid_email(value: &str) -> bool {
    EMAIL_RE.is_match(value)
}

/// Identity fields collected on the personal info step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentityField {
    FirstName,
    LastName,
    Email,
}

impl IdentityField {
    pub fn label(&self) -> &'static str {
        match self {
            Self::FirstName => "First Name",
            Self::LastName => "Last Name",
            Self::Email => "Email",
        }
    }
}

/// A per-field validation error, shown next to the offending field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: IdentityField,
    pub message: &'static str,
}

/// A single-line text input field
#[derive(Debug, Clone, Default)]
pub struct TextField {
    pub label: &'static str,
    value: String,
}

impl TextField {
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            value: String::new(),
        }
    }

    pub fn as_text(&self) -> &str {
        &self.value
    }

    pub fn push_char(&mut self, c: char) {
        self.value.push(c);
    }

    pub fn pop_char(&mut self) {
        self.value.pop();
    }
}

/// Input state for the personal info step: three text fields plus the
/// validation errors from the last blocked advance.
#[derive(Debug, Clone)]
pub struct IdentityForm {
    pub first_name: TextField,
    pub last_name: TextField,
    pub email: TextField,
    pub active_field_index: usize,
    pub errors: Vec<FieldError>,
}

impl IdentityForm {
    pub fn new() -> Self {
        Self {
            first_name: TextField::new(IdentityField::FirstName.label()),
            last_name: TextField::new(IdentityField::LastName.label()),
            email: TextField::new(IdentityField::Email.label()),
            active_field_index: 0,
            errors: Vec::new(),
        }
    }

    pub fn field_count(&self) -> usize {
        3
    }

    /// Move to the next field (wraps around)
    pub fn next_field(&mut self) {
        self.active_field_index = (self.active_field_index + 1) % self.field_count();
    }

    /// Move to the previous field (wraps around)
    pub fn prev_field(&mut self) {
        if self.active_field_index == 0 {
            self.active_field_index = self.field_count() - 1;
        } else {
            self.active_field_index -= 1;
        }
    }

    pub fn active_field_mut(&mut self) -> &mut TextField {
        match self.active_field_index {
            0 => &mut self.first_name,
            1 => &mut self.last_name,
            _ => &mut self.email,
        }
    }

    /// Error message for a given field, if the last advance was blocked on it
    pub fn error_for(&self, field: IdentityField) -> Option<&'static str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message)
    }

    /// Copy trimmed field values into the form record
    pub fn apply_to(&self, record: &mut crate::state::FormRecord) {
        record.first_name = self.first_name.as_text().trim().to_string();
        record.last_name = self.last_name.as_text().trim().to_string();
        record.email = self.email.as_text().trim().to_string();
    }
}

impl Default for IdentityForm {
    fn default() -> Self {
        Self::new()
    }
}
