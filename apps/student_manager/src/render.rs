use client_core::{FormField, FormMode, SessionView};
use shared::domain::Student;

const HEADERS: [&str; 6] = ["ID", "Code", "Full name", "Class", "Email", "Date of birth"];
const EMPTY_CELL: &str = "-";

fn row(student: &Student) -> [String; 6] {
    [
        student.id.to_string(),
        student.student_code.clone(),
        student.full_name.clone(),
        optional_cell(student.class_name.as_deref()),
        optional_cell(student.email.as_deref()),
        student.dob_day().unwrap_or(EMPTY_CELL).to_string(),
    ]
}

fn optional_cell(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => EMPTY_CELL.to_string(),
    }
}

pub fn render_table(students: &[Student]) -> String {
    if students.is_empty() {
        return "(no students)".to_string();
    }

    let rows: Vec<[String; 6]> = students.iter().map(row).collect();
    let mut widths = HEADERS.map(|header| header.chars().count());
    for cells in &rows {
        for (width, cell) in widths.iter_mut().zip(cells) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(format_line(HEADERS.map(str::to_string).iter(), &widths));
    lines.push(
        widths
            .iter()
            .map(|width| "-".repeat(*width))
            .collect::<Vec<_>>()
            .join("  "),
    );
    for cells in &rows {
        lines.push(format_line(cells.iter(), &widths));
    }
    lines.join("\n")
}

fn format_line<'a>(cells: impl Iterator<Item = &'a String>, widths: &[usize; 6]) -> String {
    cells
        .zip(widths.iter().copied())
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}

pub fn render_list(view: &SessionView) -> String {
    let mut out = String::new();
    match view.realized_query.as_deref() {
        Some("") | None => out.push_str("All students\n"),
        Some(query) => out.push_str(&format!("Students matching '{query}'\n")),
    }
    if view.loading {
        out.push_str("loading...\n");
    }
    if let Some(error) = &view.error {
        out.push_str(&format!("error: {error}\n"));
    }
    out.push_str(&render_table(&view.records));
    out
}

pub fn render_form(view: &SessionView) -> String {
    let title = match (view.mode, view.draft.id()) {
        (FormMode::Edit, Some(id)) => format!("Editing student {id}"),
        _ => "New student".to_string(),
    };
    let mut lines = vec![title];
    for field in FormField::ALL {
        lines.push(format!("  {:<12} {}", field.wire_name(), view.draft.field(field)));
    }
    lines.push(match view.mode {
        FormMode::Edit => "  (submit saves changes, reset starts a new student)".to_string(),
        FormMode::Create => "  (submit creates the student)".to_string(),
    });
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use client_core::StudentDraft;
    use shared::domain::StudentId;

    use super::*;

    fn student(id: i64) -> Student {
        Student {
            id: StudentId::from(id),
            student_code: format!("SV{id:02}"),
            full_name: "Nguyen Van A".to_string(),
            email: None,
            dob: Some("2003-09-14T00:00:00.000Z".to_string()),
            class_name: Some(String::new()),
        }
    }

    fn view(records: Vec<Student>) -> SessionView {
        SessionView {
            query: String::new(),
            mode: FormMode::Create,
            draft: StudentDraft::default(),
            records,
            realized_query: Some(String::new()),
            loading: false,
            error: None,
        }
    }

    #[test]
    fn empty_list_renders_placeholder() {
        assert_eq!(render_table(&[]), "(no students)");
    }

    #[test]
    fn table_uses_dashes_for_missing_optionals_and_day_precision_dates() {
        let table = render_table(&[student(7)]);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("ID  Code"));
        assert_eq!(
            lines[2],
            "7   SV07  Nguyen Van A  -      -      2003-09-14"
        );
    }

    #[test]
    fn list_header_names_realized_query_and_error() {
        let mut current = view(vec![student(1)]);
        current.realized_query = Some("nguyen".to_string());
        current.error = Some("database unavailable".to_string());

        let rendered = render_list(&current);
        assert!(rendered.starts_with("Students matching 'nguyen'\nerror: database unavailable\n"));
    }

    #[test]
    fn form_shows_create_mode_for_empty_draft() {
        let rendered = render_form(&view(Vec::new()));
        assert!(rendered.starts_with("New student\n"));
        assert!(rendered.contains("  student_code "));
    }
}
