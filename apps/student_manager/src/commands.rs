//! Line commands typed at the prompt.

use chrono::NaiveDate;
use client_core::FormField;
use shared::domain::StudentId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Search(String),
    ClearSearch,
    List,
    Refresh,
    Edit(StudentId),
    Set { field: FormField, value: String },
    Show,
    Reset,
    Submit,
    Delete(StudentId),
    Help,
    Quit,
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Search(_) => "search",
            Self::ClearSearch => "clear",
            Self::List => "list",
            Self::Refresh => "refresh",
            Self::Edit(_) => "edit",
            Self::Set { .. } => "set",
            Self::Show => "show",
            Self::Reset => "reset",
            Self::Submit => "submit",
            Self::Delete(_) => "delete",
            Self::Help => "help",
            Self::Quit => "quit",
        }
    }
}

pub const HELP: &str = "\
commands:
  search <text>          filter by full name (applied once typing settles)
  clear                  drop the filter
  list                   show the current list
  refresh                reload the list now
  edit <id>              load a listed student into the form
  set <field> <value>    student_code | full_name | email | dob | class_name
  show                   show the form
  new | reset            empty the form (back to create mode)
  submit                 create or save the form
  delete <id>            delete a student (asks first)
  help                   this text
  quit";

/// Parses one input line. Blank lines yield `Ok(None)`.
pub fn parse_command(line: &str) -> Result<Option<Command>, String> {
    let line = line.trim_start();
    if line.trim().is_empty() {
        return Ok(None);
    }

    let (keyword, rest) = match line.split_once(char::is_whitespace) {
        Some((keyword, rest)) => (keyword, rest),
        None => (line, ""),
    };

    let command = match keyword.to_ascii_lowercase().as_str() {
        "search" | "/" => Command::Search(rest.trim_end_matches(['\r', '\n']).to_string()),
        "clear" => Command::ClearSearch,
        "list" | "ls" => Command::List,
        "refresh" => Command::Refresh,
        "edit" => Command::Edit(required_id(rest, "edit")?),
        "set" => {
            let rest = rest.trim_start();
            let (field, value) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
            if field.is_empty() {
                return Err("usage: set <field> <value>".to_string());
            }
            Command::Set {
                field: field.parse()?,
                value: value.trim().to_string(),
            }
        }
        "show" => Command::Show,
        "new" | "reset" => Command::Reset,
        "submit" | "save" => Command::Submit,
        "delete" | "rm" => Command::Delete(required_id(rest, "delete")?),
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(format!("unknown command '{other}' (try 'help')")),
    };
    Ok(Some(command))
}

/// Advisory note for a `set dob` value that is not a `YYYY-MM-DD` date.
/// The value is still stored and submitted as typed.
pub fn dob_hint(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() || NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok() {
        return None;
    }
    Some(format!("note: '{value}' is not a YYYY-MM-DD date; it will be sent as typed"))
}

fn required_id(rest: &str, command: &str) -> Result<StudentId, String> {
    let id = rest.trim();
    if id.is_empty() {
        return Err(format!("usage: {command} <id>"));
    }
    Ok(StudentId::new(id))
}
