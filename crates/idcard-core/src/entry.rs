//! # Submission Records
//!
//! An [`Entry`] is the only persisted entity. It is assembled from a
//! validated [`SubmissionFields`] and the URL returned by the image host, and
//! is never modified after it is written.
//!
//! Reading is lenient so that hand-edited or older store files still list:
//! a missing key reads as blank, and a non-string scalar reads as its JSON
//! text (`7` becomes `"7"`).

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::ValidationError;

/// Names of the required text fields, in form and on-disk order.
pub const REQUIRED_FIELDS: [&str; 6] = [
    "full_name",
    "registration_number",
    "roll_number",
    "session",
    "mobile_number",
    "blood_group",
];

/// One persisted ID-card request.
///
/// Field order matches the on-disk key order. Duplicate submissions are
/// stored as separate entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Entry {
    /// Applicant's full name.
    #[serde(deserialize_with = "lenient_text")]
    pub full_name: String,
    /// University registration number.
    #[serde(deserialize_with = "lenient_text")]
    pub registration_number: String,
    /// Class roll number.
    #[serde(deserialize_with = "lenient_text")]
    pub roll_number: String,
    /// Academic session, e.g. `2024`.
    #[serde(deserialize_with = "lenient_text")]
    pub session: String,
    /// Contact mobile number.
    #[serde(deserialize_with = "lenient_text")]
    pub mobile_number: String,
    /// Blood group, e.g. `O+`.
    #[serde(deserialize_with = "lenient_text")]
    pub blood_group: String,
    /// Hosted photo URL returned by the image host.
    #[serde(deserialize_with = "lenient_text")]
    pub photo_url: String,
}

fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => String::new(),
        Value::String(s) => s,
        other => other.to_string(),
    })
}

/// The six required text fields of a submission, already trimmed.
///
/// Only obtainable through [`SubmissionFields::from_form`], so every value is
/// guaranteed non-blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionFields {
    full_name: String,
    registration_number: String,
    roll_number: String,
    session: String,
    mobile_number: String,
    blood_group: String,
}

impl SubmissionFields {
    /// Validate the required fields using `lookup` to read raw form values.
    ///
    /// Absent fields count as blank. Every value is trimmed; if any trimmed
    /// value is empty the error lists all offending field names.
    pub fn from_form<'a, F>(lookup: F) -> Result<Self, ValidationError>
    where
        F: Fn(&str) -> Option<&'a str>,
    {
        let values: Vec<String> = REQUIRED_FIELDS
            .iter()
            .map(|name| lookup(name).unwrap_or_default().trim().to_string())
            .collect();

        let missing: Vec<&'static str> = REQUIRED_FIELDS
            .iter()
            .zip(&values)
            .filter(|(_, value)| value.is_empty())
            .map(|(name, _)| *name)
            .collect();
        if !missing.is_empty() {
            return Err(ValidationError::MissingFields(missing));
        }

        let mut values = values.into_iter();
        let mut next = || values.next().unwrap_or_default();
        Ok(Self {
            full_name: next(),
            registration_number: next(),
            roll_number: next(),
            session: next(),
            mobile_number: next(),
            blood_group: next(),
        })
    }

    /// Applicant's full name.
    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    /// Merge the validated fields with the hosted photo URL.
    pub fn into_entry(self, photo_url: String) -> Entry {
        Entry {
            full_name: self.full_name,
            registration_number: self.registration_number,
            roll_number: self.roll_number,
            session: self.session,
            mobile_number: self.mobile_number,
            blood_group: self.blood_group,
            photo_url,
        }
    }
}
