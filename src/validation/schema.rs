// ABOUTME: Registration schema: length, email and terms rules for each wizard step

use lazy_static::lazy_static;
use regex::Regex;

use super::{FieldIssue, ValidationIssues, Validator};
use crate::models::{CompleteFormData, FormData, FormField, FormStep};

lazy_static! {
    static ref EMAIL_REGEX: Regex =
        Regex::new(r"^[A-Za-z0-9._%+\-]+@[A-Za-z0-9\-]+(\.[A-Za-z0-9\-]+)*\.[A-Za-z]{2,}$").unwrap();
}

/// Minimum lengths and messages for the text fields
const TEXT_RULES: &[(FormField, usize, &str)] = &[
    (FormField::FirstName, 2, "First name must be at least 2 characters"),
    (FormField::LastName, 2, "Last name must be at least 2 characters"),
    (FormField::Phone, 10, "Phone number must be at least 10 digits"),
    (FormField::Street, 5, "Street address must be at least 5 characters"),
    (FormField::City, 2, "City must be at least 2 characters"),
    (FormField::State, 2, "State must be at least 2 characters"),
    (FormField::ZipCode, 5, "ZIP code must be at least 5 characters"),
    (FormField::Country, 2, "Country must be at least 2 characters"),
];

const EMAIL_MESSAGE: &str = "Please enter a valid email address";
const TERMS_MESSAGE: &str = "You must accept the terms and conditions";

/// Hand-written schema for the three registration steps
///
/// Missing text fields are checked as empty strings and missing toggles take
/// their defaults, so an untouched step reports every required field.
#[derive(Debug, Clone, Copy, Default)]
pub struct RegistrationSchema;

impl RegistrationSchema {
    pub fn new() -> Self {
        Self
    }

    fn check_field(field: FormField, data: &FormData, issues: &mut Vec<FieldIssue>) {
        if field == FormField::Email {
            if !is_valid_email(&data.text(field)) {
                issues.push(FieldIssue::new(field.key(), EMAIL_MESSAGE));
            }
            return;
        }

        if field == FormField::Terms {
            if !data.flag(field) {
                issues.push(FieldIssue::new(field.key(), TERMS_MESSAGE));
            }
            return;
        }

        if let Some((_, min, message)) = TEXT_RULES.iter().find(|(f, _, _)| *f == field) {
            if data.text(field).chars().count() < *min {
                issues.push(FieldIssue::new(field.key(), *message));
            }
        }
    }

    fn check_fields(fields: &[FormField], data: &FormData) -> Result<(), ValidationIssues> {
        let mut issues = Vec::new();
        for field in fields {
            Self::check_field(*field, data, &mut issues);
        }

        if issues.is_empty() {
            Ok(())
        } else {
            Err(ValidationIssues::new(issues))
        }
    }
}

impl Validator for RegistrationSchema {
    fn validate_step(&self, step: FormStep, data: &FormData) -> Result<(), ValidationIssues> {
        Self::check_fields(FormField::for_step(step), data)
    }

    fn validate_complete(&self, data: &FormData) -> Result<CompleteFormData, ValidationIssues> {
        Self::check_fields(FormField::all(), data)?;

        Ok(CompleteFormData {
            first_name: data.text(FormField::FirstName),
            last_name: data.text(FormField::LastName),
            email: data.text(FormField::Email),
            phone: data.text(FormField::Phone),
            street: data.text(FormField::Street),
            city: data.text(FormField::City),
            state: data.text(FormField::State),
            zip_code: data.text(FormField::ZipCode),
            country: data.text(FormField::Country),
            newsletter: data.flag(FormField::Newsletter),
            notifications: data.flag(FormField::Notifications),
            marketing_emails: data.flag(FormField::MarketingEmails),
            terms: data.flag(FormField::Terms),
        })
    }
}

fn is_valid_email(value: &str) -> bool {
    EMAIL_REGEX.is_match(value)
}
