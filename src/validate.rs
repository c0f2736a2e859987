//! Per-field validators and keystroke sanitizers.
//!
//! Validators return an empty string for a valid value and a human-readable
//! message otherwise. They are pure: no shared state, no side effects.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::{student::StudentFields, types::Field};

/// Message shown on the sid field when another record already uses it.
pub const DUPLICATE_SID: &str = "This Student ID already exists";

static EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphabetic() || c.is_whitespace()
}

/// Validates the name field.
pub fn validate_name(raw: &str) -> String {
    if raw.trim().is_empty() {
        return "Name is required".to_string();
    }
    if !raw.chars().all(is_name_char) {
        return "Name must have letters and spaces only".to_string();
    }
    String::new()
}

/// Validates the student ID field.
pub fn validate_sid(raw: &str) -> String {
    if raw.is_empty() {
        return "Student ID is required".to_string();
    }
    if !raw.chars().all(|c| c.is_ascii_digit()) {
        return "Student ID must be numeric".to_string();
    }
    String::new()
}

/// Validates the email field.
pub fn validate_email(raw: &str) -> String {
    if raw.is_empty() {
        return "Email is required".to_string();
    }
    if !EMAIL_REGEX.is_match(raw) {
        return "Enter a valid email".to_string();
    }
    String::new()
}

/// Validates the contact field.
///
/// Digits are enforced here as well as by [`sanitize`], so pasted or
/// programmatic input that skipped sanitization is still rejected.
pub fn validate_contact(raw: &str) -> String {
    let value = raw.trim();
    if value.is_empty() {
        return "Contact number is required".to_string();
    }
    if value.chars().count() != 10 || !value.chars().all(|c| c.is_ascii_digit()) {
        return "Contact number must be exactly 10 digits".to_string();
    }
    String::new()
}

/// Runs the validator for `field`.
pub fn validate_field(field: Field, raw: &str) -> String {
    match field {
        Field::Name => validate_name(raw),
        Field::Sid => validate_sid(raw),
        Field::Email => validate_email(raw),
        Field::Contact => validate_contact(raw),
    }
}

/// Strips characters a field never accepts, as applied on every keystroke.
pub fn sanitize(field: Field, raw: &str) -> String {
    match field {
        Field::Name => raw.chars().filter(|c| is_name_char(*c)).collect(),
        Field::Sid | Field::Contact => raw.chars().filter(char::is_ascii_digit).collect(),
        Field::Email => raw.to_string(),
    }
}

/// Error messages keyed by field; empty when the form is valid.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FieldErrors {
    messages: BTreeMap<Field, String>,
}

impl FieldErrors {
    /// True when no field has an error.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Number of fields in error.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Message for `field`, if any.
    pub fn get(&self, field: Field) -> Option<&str> {
        self.messages.get(&field).map(String::as_str)
    }

    /// Records `message` for `field`; empty messages are ignored.
    pub fn set(&mut self, field: Field, message: impl Into<String>) {
        let message = message.into();
        if !message.is_empty() {
            self.messages.insert(field, message);
        }
    }

    /// Iterates errors in form order.
    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.messages.iter().map(|(f, m)| (*f, m.as_str()))
    }

    /// Removes every message.
    pub fn clear(&mut self) {
        self.messages.clear();
    }
}

/// Runs all four validators without short-circuiting.
pub fn validate_fields(fields: &StudentFields) -> FieldErrors {
    let mut errors = FieldErrors::default();
    for field in Field::ALL {
        errors.set(field, validate_field(field, fields.get(field)));
    }
    errors
}
