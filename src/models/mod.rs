// ABOUTME: Core data models for the registration wizard: steps, fields and records

pub mod form_data;
pub mod step;

pub use form_data::{
    CompleteFormData, FieldErrors, FieldKind, FieldValue, FormData, FormField, GENERAL_ERROR_KEY,
};
pub use step::{FormStep, SUCCESS_PATH};
