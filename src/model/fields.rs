// File: ./src/model/fields.rs
use crate::model::mode::DEFAULT_COUNTRY_CODE;
use std::collections::HashMap;
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

/// A named text input on the social screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, IntoStaticStr)]
#[strum(serialize_all = "camelCase")]
pub enum Field {
    CountryCode,
    PhoneNumber,
    EmailAddress,
    EmailSubject,
    EmailBody,
    InstagramUsername,
    TwitterHandle,
    LinkedinProfile,
    GithubUsername,
    FacebookProfile,
    CustomMessage,
}

impl Field {
    /// Upper-case caption shown above the input.
    pub fn caption(self) -> &'static str {
        match self {
            Field::CountryCode => "COUNTRY CODE",
            Field::PhoneNumber => "PHONE NUMBER",
            Field::EmailAddress => "EMAIL ADDRESS",
            Field::EmailSubject => "SUBJECT (OPTIONAL)",
            Field::EmailBody => "MESSAGE BODY (OPTIONAL)",
            Field::InstagramUsername => "INSTAGRAM USERNAME",
            Field::TwitterHandle => "TWITTER/X HANDLE",
            Field::LinkedinProfile => "LINKEDIN PROFILE ID",
            Field::GithubUsername => "GITHUB USERNAME",
            Field::FacebookProfile => "FACEBOOK PROFILE",
            Field::CustomMessage => "CUSTOM MESSAGE (OPTIONAL)",
        }
    }
}

/// Free-text values for every social field.
///
/// Fields are stored for all modes at once so switching modes back and forth
/// keeps earlier entries. Unset fields read as the empty string, except
/// `countryCode` which defaults to [`DEFAULT_COUNTRY_CODE`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSet {
    values: HashMap<Field, String>,
}

impl Default for FieldSet {
    fn default() -> Self {
        Self::with_country_code(DEFAULT_COUNTRY_CODE)
    }
}

impl FieldSet {
    pub fn with_country_code(code: &str) -> Self {
        let mut values = HashMap::new();
        values.insert(Field::CountryCode, code.to_string());
        Self { values }
    }

    pub fn get(&self, field: Field) -> &str {
        self.values.get(&field).map(String::as_str).unwrap_or("")
    }

    /// Trimmed view of a field, as used by link construction.
    pub fn trimmed(&self, field: Field) -> &str {
        self.get(field).trim()
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        self.values.insert(field, value.into());
    }

    pub fn clear(&mut self, field: Field) {
        self.values.insert(field, String::new());
    }

    pub fn is_blank(&self, field: Field) -> bool {
        self.trimmed(field).is_empty()
    }
}
