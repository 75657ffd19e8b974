use crate::domain::model::{TaxPayerId, TaxPayerRecord};
use crate::utils::error::{DeskError, Result};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FormField {
    Tid,
    FirstName,
    LastName,
    Address,
}

impl FormField {
    pub const ALL: [FormField; 4] = [
        FormField::Tid,
        FormField::FirstName,
        FormField::LastName,
        FormField::Address,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FormField::Tid => "TID",
            FormField::FirstName => "First Name",
            FormField::LastName => "Last Name",
            FormField::Address => "Address",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for FormField {
    type Err = DeskError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "tid" | "id" => Ok(FormField::Tid),
            "first" | "first_name" | "firstname" => Ok(FormField::FirstName),
            "last" | "last_name" | "lastname" => Ok(FormField::LastName),
            "address" | "addr" => Ok(FormField::Address),
            _ => Err(DeskError::InvalidConfigValueError {
                field: "form field".to_string(),
                value: s.to_string(),
                reason: "expected one of tid, first, last, address".to_string(),
            }),
        }
    }
}

/// Creation form: four required text inputs plus their field-level messages.
#[derive(Debug, Clone, Default)]
pub struct TaxPayerForm {
    values: BTreeMap<FormField, String>,
    errors: BTreeMap<FormField, String>,
}

impl TaxPayerForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self, field: FormField) -> &str {
        self.values.get(&field).map(String::as_str).unwrap_or("")
    }

    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        self.values.insert(field, value.into());
        self.errors.remove(&field);
    }

    pub fn field_error(&self, field: FormField) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    pub fn errors(&self) -> impl Iterator<Item = (FormField, &str)> + '_ {
        self.errors.iter().map(|(field, msg)| (*field, msg.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.values.values().all(|v| v.is_empty())
    }

    pub fn reset(&mut self) {
        self.values.clear();
        self.errors.clear();
    }

    /// Check every field and build the candidate record.
    ///
    /// Field messages are recorded on the form so a front end can show them
    /// next to the inputs; the returned error only lists the failing labels.
    pub fn validate(&mut self) -> Result<TaxPayerRecord> {
        self.errors.clear();

        for field in FormField::ALL {
            if self.value(field).trim().is_empty() {
                self.errors
                    .insert(field, format!("{} is required", field.label()));
            }
        }

        let tid = match self.value(FormField::Tid).parse::<TaxPayerId>() {
            Ok(tid) => Some(tid),
            Err(_) => {
                self.errors.entry(FormField::Tid).or_insert_with(|| {
                    "TID must be a non-negative whole number".to_string()
                });
                None
            }
        };

        match tid {
            Some(tid) if self.errors.is_empty() => Ok(TaxPayerRecord::new(
                tid,
                self.value(FormField::FirstName).trim(),
                self.value(FormField::LastName).trim(),
                self.value(FormField::Address).trim(),
            )),
            _ => Err(DeskError::FormValidation {
                fields: self.errors.keys().map(|f| f.label().to_string()).collect(),
            }),
        }
    }
}
