use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequiredField {
    StudentCode,
    FullName,
}

impl RequiredField {
    pub fn wire_name(self) -> &'static str {
        match self {
            Self::StudentCode => "student_code",
            Self::FullName => "full_name",
        }
    }
}

impl fmt::Display for RequiredField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

/// Rejection of a payload before it is sent to the record store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{}", missing_message(.0))]
    MissingRequired(Vec<RequiredField>),
}

fn missing_message(fields: &[RequiredField]) -> String {
    let names = fields
        .iter()
        .map(|field| field.wire_name())
        .collect::<Vec<_>>()
        .join(" and ");
    let verb = if fields.len() == 1 { "is" } else { "are" };
    format!("{names} {verb} required")
}
