use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use crate::protocol::truncate_to_day;

/// Server-assigned record identity.
///
/// The record store is free to hand out numeric or textual ids, so both JSON
/// shapes are accepted and kept in their textual form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RawStudentId", into = "String")]
pub struct StudentId(String);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawStudentId {
    Number(i64),
    Text(String),
}

impl From<RawStudentId> for StudentId {
    fn from(value: RawStudentId) -> Self {
        match value {
            RawStudentId::Number(n) => Self(n.to_string()),
            RawStudentId::Text(s) => Self(s),
        }
    }
}

impl From<StudentId> for String {
    fn from(value: StudentId) -> Self {
        value.0
    }
}

impl StudentId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<i64> for StudentId {
    fn from(value: i64) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One persisted student as returned by the record store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub id: StudentId,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub student_code: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub full_name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub dob: Option<String>,
    #[serde(default)]
    pub class_name: Option<String>,
}

impl Student {
    /// Date of birth at day precision, if the record carries one.
    pub fn dob_day(&self) -> Option<&str> {
        self.dob
            .as_deref()
            .map(truncate_to_day)
            .filter(|day| !day.is_empty())
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_numeric_and_textual_ids() {
        let numeric: Student =
            serde_json::from_str(r#"{"id":12,"student_code":"SV12","full_name":"Tran B"}"#)
                .expect("numeric id");
        assert_eq!(numeric.id, StudentId::from(12));
        assert_eq!(numeric.email, None);

        let textual: Student = serde_json::from_str(
            r#"{"id":"6650c1","student_code":"SV13","full_name":"Le C","email":null}"#,
        )
        .expect("text id");
        assert_eq!(textual.id.as_str(), "6650c1");
    }

    #[test]
    fn null_required_strings_decode_as_empty() {
        let student: Student =
            serde_json::from_str(r#"{"id":1,"student_code":null,"full_name":null}"#)
                .expect("decode");
        assert_eq!(student.student_code, "");
        assert_eq!(student.full_name, "");
    }

    #[test]
    fn ignores_unknown_server_fields() {
        let student: Student = serde_json::from_str(
            r#"{"id":3,"student_code":"SV03","full_name":"Pham D","created_at":"2024-02-01T10:00:00Z"}"#,
        )
        .expect("decode");
        assert_eq!(student.full_name, "Pham D");
    }

    #[test]
    fn dob_day_truncates_datetimes() {
        let student: Student = serde_json::from_str(
            r#"{"id":4,"student_code":"SV04","full_name":"Vo E","dob":"2003-09-14T00:00:00.000Z"}"#,
        )
        .expect("decode");
        assert_eq!(student.dob_day(), Some("2003-09-14"));

        let blank = Student {
            dob: Some(String::new()),
            ..student
        };
        assert_eq!(blank.dob_day(), None);
    }
}
