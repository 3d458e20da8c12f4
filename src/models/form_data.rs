// ABOUTME: Registration record types: the partial record collected by the wizard
// and the fully validated record handed to the submitter

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::step::FormStep;

/// Field errors keyed by field name (or "general")
pub type FieldErrors = BTreeMap<String, String>;

/// Key used for errors that are not tied to a single field
pub const GENERAL_ERROR_KEY: &str = "general";

/// Union of every field value collected so far
///
/// Every field is optional; `merge` only ever overwrites the keys present in
/// the patch, so values accumulate across steps until the wizard is reset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zip_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub newsletter: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notifications: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marketing_emails: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub terms: Option<bool>,
}

macro_rules! merge_fields {
    ($target:expr, $patch:expr, $($field:ident),+ $(,)?) => {
        $(
            if let Some(value) = $patch.$field {
                $target.$field = Some(value);
            }
        )+
    };
}

impl FormData {
    /// Merge the fields present in `patch` into this record
    pub fn merge(&mut self, patch: Self) {
        merge_fields!(
            self,
            patch,
            first_name,
            last_name,
            email,
            phone,
            street,
            city,
            state,
            zip_code,
            country,
            newsletter,
            notifications,
            marketing_emails,
            terms,
        );
    }

    /// Whether no field has been provided yet
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Patch containing a single field value
    pub fn single(field: FormField, value: FieldValue) -> Self {
        let mut patch = Self::default();
        patch.set(field, value);
        patch
    }

    /// Current value of a field, if provided
    pub fn get(&self, field: FormField) -> Option<FieldValue> {
        match field {
            FormField::FirstName => self.first_name.clone().map(FieldValue::Text),
            FormField::LastName => self.last_name.clone().map(FieldValue::Text),
            FormField::Email => self.email.clone().map(FieldValue::Text),
            FormField::Phone => self.phone.clone().map(FieldValue::Text),
            FormField::Street => self.street.clone().map(FieldValue::Text),
            FormField::City => self.city.clone().map(FieldValue::Text),
            FormField::State => self.state.clone().map(FieldValue::Text),
            FormField::ZipCode => self.zip_code.clone().map(FieldValue::Text),
            FormField::Country => self.country.clone().map(FieldValue::Text),
            FormField::Newsletter => self.newsletter.map(FieldValue::Flag),
            FormField::Notifications => self.notifications.map(FieldValue::Flag),
            FormField::MarketingEmails => self.marketing_emails.map(FieldValue::Flag),
            FormField::Terms => self.terms.map(FieldValue::Flag),
        }
    }

    /// Text value of a field, empty when absent or not a text field
    pub fn text(&self, field: FormField) -> String {
        match self.get(field) {
            Some(FieldValue::Text(text)) => text,
            _ => String::new(),
        }
    }

    /// Boolean value of a field, falling back to the field's default
    pub fn flag(&self, field: FormField) -> bool {
        match self.get(field) {
            Some(FieldValue::Flag(flag)) => flag,
            _ => field.default_flag(),
        }
    }

    /// Set a field value; mismatched value kinds are ignored
    pub fn set(&mut self, field: FormField, value: FieldValue) {
        match (field, value) {
            (FormField::FirstName, FieldValue::Text(v)) => self.first_name = Some(v),
            (FormField::LastName, FieldValue::Text(v)) => self.last_name = Some(v),
            (FormField::Email, FieldValue::Text(v)) => self.email = Some(v),
            (FormField::Phone, FieldValue::Text(v)) => self.phone = Some(v),
            (FormField::Street, FieldValue::Text(v)) => self.street = Some(v),
            (FormField::City, FieldValue::Text(v)) => self.city = Some(v),
            (FormField::State, FieldValue::Text(v)) => self.state = Some(v),
            (FormField::ZipCode, FieldValue::Text(v)) => self.zip_code = Some(v),
            (FormField::Country, FieldValue::Text(v)) => self.country = Some(v),
            (FormField::Newsletter, FieldValue::Flag(v)) => self.newsletter = Some(v),
            (FormField::Notifications, FieldValue::Flag(v)) => self.notifications = Some(v),
            (FormField::MarketingEmails, FieldValue::Flag(v)) => self.marketing_emails = Some(v),
            (FormField::Terms, FieldValue::Flag(v)) => self.terms = Some(v),
            (field, value) => {
                tracing::debug!(field = field.key(), ?value, "Ignoring value of the wrong kind");
            }
        }
    }

    /// Number of fields that have been provided
    pub fn filled_count(&self) -> usize {
        FormField::all().iter().filter(|f| self.get(**f).is_some()).count()
    }
}

/// Fully validated registration record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompleteFormData {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
    pub newsletter: bool,
    pub notifications: bool,
    pub marketing_emails: bool,
    pub terms: bool,
}

impl From<CompleteFormData> for FormData {
    fn from(data: CompleteFormData) -> Self {
        Self {
            first_name: Some(data.first_name),
            last_name: Some(data.last_name),
            email: Some(data.email),
            phone: Some(data.phone),
            street: Some(data.street),
            city: Some(data.city),
            state: Some(data.state),
            zip_code: Some(data.zip_code),
            country: Some(data.country),
            newsletter: Some(data.newsletter),
            notifications: Some(data.notifications),
            marketing_emails: Some(data.marketing_emails),
            terms: Some(data.terms),
        }
    }
}

/// A value held by a single form field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Flag(bool),
}

/// How a field is edited
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Toggle,
}

/// Every field of the registration record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    FirstName,
    LastName,
    Email,
    Phone,
    Street,
    City,
    State,
    ZipCode,
    Country,
    Newsletter,
    Notifications,
    MarketingEmails,
    Terms,
}

impl FormField {
    pub fn all() -> &'static [FormField] {
        &[
            Self::FirstName,
            Self::LastName,
            Self::Email,
            Self::Phone,
            Self::Street,
            Self::City,
            Self::State,
            Self::ZipCode,
            Self::Country,
            Self::Newsletter,
            Self::Notifications,
            Self::MarketingEmails,
            Self::Terms,
        ]
    }

    /// Fields collected on the given step, in display order
    pub fn for_step(step: FormStep) -> &'static [FormField] {
        match step {
            FormStep::Personal => &[Self::FirstName, Self::LastName, Self::Email, Self::Phone],
            FormStep::Address => {
                &[Self::Street, Self::City, Self::State, Self::ZipCode, Self::Country]
            }
            FormStep::Preferences => {
                &[Self::Newsletter, Self::Notifications, Self::MarketingEmails, Self::Terms]
            }
        }
    }

    /// Step that collects this field
    pub const fn step(self) -> FormStep {
        match self {
            Self::FirstName | Self::LastName | Self::Email | Self::Phone => FormStep::Personal,
            Self::Street | Self::City | Self::State | Self::ZipCode | Self::Country => {
                FormStep::Address
            }
            Self::Newsletter | Self::Notifications | Self::MarketingEmails | Self::Terms => {
                FormStep::Preferences
            }
        }
    }

    /// Record key, also used to key field errors
    pub const fn key(self) -> &'static str {
        match self {
            Self::FirstName => "firstName",
            Self::LastName => "lastName",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Street => "street",
            Self::City => "city",
            Self::State => "state",
            Self::ZipCode => "zipCode",
            Self::Country => "country",
            Self::Newsletter => "newsletter",
            Self::Notifications => "notifications",
            Self::MarketingEmails => "marketingEmails",
            Self::Terms => "terms",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::FirstName => "First name",
            Self::LastName => "Last name",
            Self::Email => "Email",
            Self::Phone => "Phone",
            Self::Street => "Street address",
            Self::City => "City",
            Self::State => "State",
            Self::ZipCode => "ZIP code",
            Self::Country => "Country",
            Self::Newsletter => "Subscribe to newsletter",
            Self::Notifications => "Enable notifications",
            Self::MarketingEmails => "Receive marketing emails",
            Self::Terms => "I accept the terms and conditions",
        }
    }

    pub const fn kind(self) -> FieldKind {
        match self {
            Self::Newsletter | Self::Notifications | Self::MarketingEmails | Self::Terms => {
                FieldKind::Toggle
            }
            _ => FieldKind::Text,
        }
    }

    /// Value a toggle takes before the user touches it
    pub const fn default_flag(self) -> bool {
        matches!(self, Self::Notifications)
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::all().iter().copied().find(|f| f.key() == key)
    }
}
