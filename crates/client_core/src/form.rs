//! Create/edit draft for a single student.

use std::{fmt, str::FromStr};

use shared::{
    domain::{Student, StudentId},
    error::ValidationError,
    protocol::{truncate_to_day, StudentPayload},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit,
}

impl fmt::Display for FormMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Create => f.write_str("create"),
            Self::Edit => f.write_str("edit"),
        }
    }
}

/// User-editable fields; the identity is never among them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    StudentCode,
    FullName,
    Email,
    Dob,
    ClassName,
}

impl FormField {
    pub const ALL: [FormField; 5] = [
        Self::StudentCode,
        Self::FullName,
        Self::Email,
        Self::Dob,
        Self::ClassName,
    ];

    pub fn wire_name(self) -> &'static str {
        match self {
            Self::StudentCode => "student_code",
            Self::FullName => "full_name",
            Self::Email => "email",
            Self::Dob => "dob",
            Self::ClassName => "class_name",
        }
    }
}

impl FromStr for FormField {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.wire_name() == raw)
            .ok_or_else(|| format!("unknown field '{raw}'"))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentDraft {
    id: Option<StudentId>,
    pub student_code: String,
    pub full_name: String,
    pub email: String,
    pub dob: String,
    pub class_name: String,
}

impl StudentDraft {
    pub fn id(&self) -> Option<&StudentId> {
        self.id.as_ref()
    }

    pub fn mode(&self) -> FormMode {
        if self.id.is_some() {
            FormMode::Edit
        } else {
            FormMode::Create
        }
    }

    pub fn field(&self, field: FormField) -> &str {
        match field {
            FormField::StudentCode => &self.student_code,
            FormField::FullName => &self.full_name,
            FormField::Email => &self.email,
            FormField::Dob => &self.dob,
            FormField::ClassName => &self.class_name,
        }
    }

    fn field_mut(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::StudentCode => &mut self.student_code,
            FormField::FullName => &mut self.full_name,
            FormField::Email => &mut self.email,
            FormField::Dob => &mut self.dob,
            FormField::ClassName => &mut self.class_name,
        }
    }
}

impl From<&Student> for StudentDraft {
    fn from(student: &Student) -> Self {
        Self {
            id: Some(student.id.clone()),
            student_code: student.student_code.clone(),
            full_name: student.full_name.clone(),
            email: student.email.clone().unwrap_or_default(),
            dob: student
                .dob
                .as_deref()
                .map(|dob| truncate_to_day(dob).to_string())
                .unwrap_or_default(),
            class_name: student.class_name.clone().unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitTarget {
    Create,
    Update(StudentId),
}

/// A draft that passed validation, ready for the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSubmission {
    pub target: SubmitTarget,
    pub payload: StudentPayload,
}

#[derive(Debug, Clone, Default)]
pub struct FormSession {
    draft: StudentDraft,
}

impl FormSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draft(&self) -> &StudentDraft {
        &self.draft
    }

    pub fn mode(&self) -> FormMode {
        self.draft.mode()
    }

    pub fn load_from_record(&mut self, student: &Student) {
        self.draft = StudentDraft::from(student);
    }

    pub fn reset(&mut self) {
        self.draft = StudentDraft::default();
    }

    pub fn update(&mut self, field: FormField, value: impl Into<String>) {
        *self.draft.field_mut(field) = value.into();
    }

    pub fn validate(&self) -> Result<FormSubmission, ValidationError> {
        let draft = &self.draft;
        let payload = StudentPayload::from_form_fields(
            &draft.student_code,
            &draft.full_name,
            &draft.email,
            &draft.dob,
            &draft.class_name,
        )?;
        let target = match &draft.id {
            Some(id) => SubmitTarget::Update(id.clone()),
            None => SubmitTarget::Create,
        };
        Ok(FormSubmission { target, payload })
    }
}

#[cfg(test)]
#[path = "tests/form_tests.rs"]
mod tests;
