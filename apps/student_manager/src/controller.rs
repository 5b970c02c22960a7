//! Routes parsed commands to the session and renders background events.

use std::sync::Arc;

use client_core::{DeleteOutcome, FormField, FormMode, SessionEvent, StudentSession};
use tokio::{sync::broadcast::error::RecvError, task::JoinHandle};
use tracing::debug;

use crate::{
    commands::{dob_hint, Command, HELP},
    render::{render_form, render_list},
};

pub enum Flow {
    Continue,
    Quit,
}

/// Errors from session actions are printed by the event renderer, so they
/// are only logged here.
pub async fn execute(session: &Arc<StudentSession>, command: Command) -> Flow {
    debug!(command = command.name(), "executing command");

    match command {
        Command::Search(query) => session.set_query(query).await,
        Command::ClearSearch => session.clear_query().await,
        Command::List => println!("{}", render_list(&session.view().await)),
        Command::Refresh => {
            session.refresh().await;
        }
        Command::Edit(id) => {
            if session.select_for_edit_by_id(&id).await.is_ok() {
                println!("{}", render_form(&session.view().await));
            }
        }
        Command::Set { field, value } => {
            if field == FormField::Dob {
                if let Some(note) = dob_hint(&value) {
                    println!("{note}");
                }
            }
            session.update_field(field, value).await;
        }
        Command::Show => println!("{}", render_form(&session.view().await)),
        Command::Reset => {
            session.reset_form().await;
            println!("{}", render_form(&session.view().await));
        }
        Command::Submit => {
            if let Err(err) = session.submit().await {
                debug!("submit failed: {err}");
            }
        }
        Command::Delete(id) => match session.delete_record(&id).await {
            Ok(DeleteOutcome::Declined) => println!("delete cancelled"),
            Ok(DeleteOutcome::Deleted { .. }) => {}
            Err(err) => debug!("delete failed: {err}"),
        },
        Command::Help => println!("{HELP}"),
        Command::Quit => return Flow::Quit,
    }
    Flow::Continue
}

pub fn spawn_event_renderer(session: Arc<StudentSession>) -> JoinHandle<()> {
    let mut events = session.subscribe_events();
    tokio::spawn(async move {
        loop {
            let event = match events.recv().await {
                Ok(event) => event,
                Err(RecvError::Lagged(skipped)) => {
                    debug!(skipped, "event renderer fell behind");
                    continue;
                }
                Err(RecvError::Closed) => break,
            };

            match event {
                SessionEvent::ListRefreshed { .. } => {
                    println!("{}", render_list(&session.view().await));
                }
                SessionEvent::ListRefreshFailed { message, .. } | SessionEvent::Error(message) => {
                    println!("error: {message}");
                }
                SessionEvent::Submitted { mode, student } => {
                    let verb = match mode {
                        FormMode::Create => "created",
                        FormMode::Edit => "updated",
                    };
                    println!(
                        "{verb} student {} ({} {})",
                        student.id, student.student_code, student.full_name
                    );
                }
                SessionEvent::Deleted { id, draft_reset } => {
                    if draft_reset {
                        println!("deleted student {id}; form cleared");
                    } else {
                        println!("deleted student {id}");
                    }
                }
                SessionEvent::RefreshDiscarded { .. } => {}
            }
        }
    })
}
