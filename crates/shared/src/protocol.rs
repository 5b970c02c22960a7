use serde::{Deserialize, Serialize};

use crate::error::{RequiredField, ValidationError};

pub const STUDENTS_PATH: &str = "/api/students";
pub const SEARCH_QUERY_PARAM: &str = "q";

const DAY_PRECISION_LEN: usize = 10;

/// Cuts an ISO-8601 date or datetime down to its `YYYY-MM-DD` prefix.
pub fn truncate_to_day(raw: &str) -> &str {
    match raw.char_indices().nth(DAY_PRECISION_LEN) {
        Some((end, _)) => &raw[..end],
        None => raw,
    }
}

/// Body of `POST /api/students` and `PUT /api/students/<id>`.
///
/// Optional fields serialize as JSON `null` when absent, never as `""`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentPayload {
    pub student_code: String,
    pub full_name: String,
    pub email: Option<String>,
    pub dob: Option<String>,
    pub class_name: Option<String>,
}

impl StudentPayload {
    /// Builds a payload from raw form text.
    ///
    /// Values are trimmed, blank optionals become `None`, and every missing
    /// required field is reported at once. Optional text is passed through
    /// unchecked; the record store owns its formats.
    pub fn from_form_fields(
        student_code: &str,
        full_name: &str,
        email: &str,
        dob: &str,
        class_name: &str,
    ) -> Result<Self, ValidationError> {
        let student_code = student_code.trim();
        let full_name = full_name.trim();

        let mut missing = Vec::new();
        if student_code.is_empty() {
            missing.push(RequiredField::StudentCode);
        }
        if full_name.is_empty() {
            missing.push(RequiredField::FullName);
        }
        if !missing.is_empty() {
            return Err(ValidationError::MissingRequired(missing));
        }

        Ok(Self {
            student_code: student_code.to_string(),
            full_name: full_name.to_string(),
            email: non_blank(email),
            dob: non_blank(dob),
            class_name: non_blank(class_name),
        })
    }
}

fn non_blank(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn blank_optionals_serialize_as_null() {
        let payload = StudentPayload::from_form_fields("SV01", "Nguyen A", "", "  ", "")
            .expect("valid payload");
        assert_eq!(
            serde_json::to_value(&payload).expect("json"),
            json!({
                "student_code": "SV01",
                "full_name": "Nguyen A",
                "email": null,
                "dob": null,
                "class_name": null,
            })
        );
    }

    #[test]
    fn reports_all_missing_required_fields() {
        let err = StudentPayload::from_form_fields(" ", "", "a@b.c", "", "")
            .expect_err("must reject");
        assert_eq!(
            err,
            ValidationError::MissingRequired(vec![
                RequiredField::StudentCode,
                RequiredField::FullName
            ])
        );
        assert_eq!(err.to_string(), "student_code and full_name are required");

        let err = StudentPayload::from_form_fields("SV01", "", "", "", "")
            .expect_err("must reject");
        assert_eq!(err.to_string(), "full_name is required");
    }

    #[test]
    fn passes_non_iso_dob_through_unchanged() {
        let payload =
            StudentPayload::from_form_fields("SV01", "Nguyen A", "", " 14/09/2003 ", "K65")
                .expect("only required fields are checked");
        assert_eq!(payload.dob.as_deref(), Some("14/09/2003"));
        assert_eq!(payload.class_name.as_deref(), Some("K65"));

        let payload = StudentPayload::from_form_fields("SV01", "Nguyen A", "", "2003-09-14", "")
            .expect("valid");
        assert_eq!(payload.dob.as_deref(), Some("2003-09-14"));
    }

    #[test]
    fn truncates_datetimes_to_day() {
        assert_eq!(truncate_to_day("2003-09-14T00:00:00.000Z"), "2003-09-14");
        assert_eq!(truncate_to_day("2003-09-14"), "2003-09-14");
        assert_eq!(truncate_to_day("2003"), "2003");
    }
}
