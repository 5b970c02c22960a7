//! Top-level student session: ties user actions to the transport, the list
//! snapshot and the form draft.

use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use shared::domain::{Student, StudentId};
use tokio::sync::{broadcast, Mutex};
use tracing::{debug, info, warn};

use crate::{
    debounce::Debouncer,
    error::ClientError,
    form::{FormField, FormMode, FormSession, StudentDraft, SubmitTarget},
    list_store::{ListStore, RefreshOutcome},
    transport::StudentTransport,
};

/// Gate in front of every delete. A `false` answer makes the delete a no-op.
#[async_trait]
pub trait ConfirmDelete: Send + Sync {
    async fn confirm_delete(&self, id: &StudentId) -> bool;
}

/// Approves every delete without asking.
pub struct AutoConfirm;

#[async_trait]
impl ConfirmDelete for AutoConfirm {
    async fn confirm_delete(&self, _id: &StudentId) -> bool {
        true
    }
}

#[derive(Debug, Clone)]
pub enum SessionEvent {
    ListRefreshed { query: String, count: usize },
    ListRefreshFailed { query: String, message: String },
    RefreshDiscarded { seq: u64 },
    Submitted { mode: FormMode, student: Student },
    Deleted { id: StudentId, draft_reset: bool },
    Error(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Created(Student),
    Updated(Student),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted { draft_reset: bool },
    Declined,
}

/// Read-only copy of the session for rendering.
#[derive(Debug, Clone)]
pub struct SessionView {
    pub query: String,
    pub mode: FormMode,
    pub draft: StudentDraft,
    pub records: Vec<Student>,
    pub realized_query: Option<String>,
    pub loading: bool,
    pub error: Option<String>,
}

struct SessionState {
    query: String,
    form: FormSession,
    list: ListStore,
    error: Option<String>,
}

pub struct StudentSession {
    transport: Arc<dyn StudentTransport>,
    confirm: Arc<dyn ConfirmDelete>,
    state: Mutex<SessionState>,
    debouncer: Mutex<Debouncer>,
    events: broadcast::Sender<SessionEvent>,
}

impl StudentSession {
    pub fn new(
        transport: Arc<dyn StudentTransport>,
        confirm: Arc<dyn ConfirmDelete>,
    ) -> Arc<Self> {
        Self::new_with_quiet_period(transport, confirm, Debouncer::DEFAULT_QUIET_PERIOD)
    }

    pub fn new_with_quiet_period(
        transport: Arc<dyn StudentTransport>,
        confirm: Arc<dyn ConfirmDelete>,
        quiet_period: Duration,
    ) -> Arc<Self> {
        let (events, _) = broadcast::channel(256);
        Arc::new(Self {
            transport,
            confirm,
            state: Mutex::new(SessionState {
                query: String::new(),
                form: FormSession::new(),
                list: ListStore::new(),
                error: None,
            }),
            debouncer: Mutex::new(Debouncer::new(quiet_period)),
            events,
        })
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    pub async fn view(&self) -> SessionView {
        let state = self.state.lock().await;
        SessionView {
            query: state.query.clone(),
            mode: state.form.mode(),
            draft: state.form.draft().clone(),
            records: state.list.records().to_vec(),
            realized_query: state.list.realized_query().map(str::to_string),
            loading: state.list.is_loading(),
            error: state.error.clone(),
        }
    }

    /// Schedules the initial load for the current query.
    pub async fn start(self: &Arc<Self>) {
        let mut debouncer = self.debouncer.lock().await;
        let query = self.state.lock().await.query.clone();
        self.schedule_refresh(&mut debouncer, query);
    }

    /// Stores the query right away; the list follows once typing settles.
    ///
    /// The debouncer lock is held across both steps so the pending trigger
    /// always carries the query that was stored last.
    pub async fn set_query(self: &Arc<Self>, query: impl Into<String>) {
        let query = query.into();
        let mut debouncer = self.debouncer.lock().await;
        self.state.lock().await.query = query.clone();
        self.schedule_refresh(&mut debouncer, query);
    }

    pub async fn clear_query(self: &Arc<Self>) {
        self.set_query(String::new()).await;
    }

    /// Cancels a pending debounced refresh. Requests already in flight still
    /// complete and go through the usual ordering check.
    pub async fn shutdown(&self) {
        if self.debouncer.lock().await.cancel() {
            debug!("cancelled pending search refresh");
        }
    }

    fn schedule_refresh(self: &Arc<Self>, debouncer: &mut Debouncer, query: String) {
        let session = Arc::downgrade(self);
        debouncer.schedule(async move {
            if let Some(session) = session.upgrade() {
                session.refresh_query(query).await;
            }
        });
    }

    /// Refreshes the list immediately with the current query.
    pub async fn refresh(&self) -> RefreshOutcome {
        let query = self.state.lock().await.query.clone();
        self.refresh_query(query).await
    }

    async fn refresh_query(&self, query: String) -> RefreshOutcome {
        let ticket = {
            let mut state = self.state.lock().await;
            state.error = None;
            state.list.begin_refresh(&query)
        };
        let seq = ticket.seq();
        debug!(seq, query = %query, "refreshing student list");

        let result = self.transport.fetch_list(&query).await;

        let outcome = {
            let mut state = self.state.lock().await;
            let outcome = state.list.complete_refresh(ticket, result);
            if let RefreshOutcome::Failed { message } = &outcome {
                state.error = Some(message.clone());
            }
            outcome
        };

        match &outcome {
            RefreshOutcome::Applied { count } => {
                info!(seq, query = %query, count, "student list refreshed");
                let _ = self.events.send(SessionEvent::ListRefreshed {
                    query,
                    count: *count,
                });
            }
            RefreshOutcome::Failed { message } => {
                warn!(seq, query = %query, "student list refresh failed: {message}");
                let _ = self.events.send(SessionEvent::ListRefreshFailed {
                    query,
                    message: message.clone(),
                });
            }
            RefreshOutcome::Discarded => {
                debug!(seq, query = %query, "discarded stale student list response");
                let _ = self.events.send(SessionEvent::RefreshDiscarded { seq });
            }
        }
        outcome
    }

    pub async fn select_for_edit(&self, student: &Student) {
        let mut state = self.state.lock().await;
        state.error = None;
        state.form.load_from_record(student);
        debug!(id = %student.id, "editing student");
    }

    /// Selects a student from the current list snapshot.
    pub async fn select_for_edit_by_id(&self, id: &StudentId) -> Result<(), ClientError> {
        let student = self.state.lock().await.list.find(id).cloned();
        match student {
            Some(student) => {
                self.select_for_edit(&student).await;
                Ok(())
            }
            None => Err(self.surface(ClientError::NotInSnapshot(id.clone())).await),
        }
    }

    pub async fn update_field(&self, field: FormField, value: impl Into<String>) {
        self.state.lock().await.form.update(field, value);
    }

    pub async fn reset_form(&self) {
        self.state.lock().await.form.reset();
    }

    /// Creates or updates depending on whether the draft carries an id.
    ///
    /// Validation failures never reach the transport. On success the draft
    /// is reset and the list reloaded with whatever query is current by then;
    /// on failure draft and list stay as they were.
    pub async fn submit(&self) -> Result<SubmitOutcome, ClientError> {
        let submission = {
            let mut state = self.state.lock().await;
            state.error = None;
            state.form.validate()
        };
        let submission = match submission {
            Ok(submission) => submission,
            Err(err) => return Err(self.surface(err.into()).await),
        };

        let result = match &submission.target {
            SubmitTarget::Create => self
                .transport
                .create(&submission.payload)
                .await
                .map(SubmitOutcome::Created),
            SubmitTarget::Update(id) => self
                .transport
                .update(id, &submission.payload)
                .await
                .map(SubmitOutcome::Updated),
        };
        let outcome = match result {
            Ok(outcome) => outcome,
            Err(err) => return Err(self.surface(err).await),
        };

        self.state.lock().await.form.reset();
        let (mode, student) = match &outcome {
            SubmitOutcome::Created(student) => (FormMode::Create, student.clone()),
            SubmitOutcome::Updated(student) => (FormMode::Edit, student.clone()),
        };
        info!(id = %student.id, %mode, "student saved");
        let _ = self.events.send(SessionEvent::Submitted { mode, student });

        self.refresh().await;
        Ok(outcome)
    }

    /// Deletes after confirmation. Deleting the student loaded in the form
    /// also resets the form.
    pub async fn delete_record(&self, id: &StudentId) -> Result<DeleteOutcome, ClientError> {
        if !self.confirm.confirm_delete(id).await {
            debug!(id = %id, "delete declined");
            return Ok(DeleteOutcome::Declined);
        }

        self.state.lock().await.error = None;
        if let Err(err) = self.transport.delete(id).await {
            return Err(self.surface(err).await);
        }

        let draft_reset = {
            let mut state = self.state.lock().await;
            let editing_deleted = state.form.draft().id() == Some(id);
            if editing_deleted {
                state.form.reset();
            }
            editing_deleted
        };
        info!(id = %id, draft_reset, "student deleted");
        let _ = self.events.send(SessionEvent::Deleted {
            id: id.clone(),
            draft_reset,
        });

        self.refresh().await;
        Ok(DeleteOutcome::Deleted { draft_reset })
    }

    async fn surface(&self, err: ClientError) -> ClientError {
        let message = err.to_string();
        self.state.lock().await.error = Some(message.clone());
        warn!("{message}");
        let _ = self.events.send(SessionEvent::Error(message));
        err
    }
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
