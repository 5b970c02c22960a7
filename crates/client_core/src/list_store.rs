//! The fetched student list and the ordering rule for overlapping refreshes.

use shared::domain::{Student, StudentId};

use crate::error::ClientError;

/// Issued when a refresh starts; presented again when its response lands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshTicket {
    seq: u64,
    query: String,
}

impl RefreshTicket {
    pub fn seq(&self) -> u64 {
        self.seq
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshOutcome {
    Applied { count: usize },
    Failed { message: String },
    /// A newer refresh was started before this one completed.
    Discarded,
}

#[derive(Debug, Clone, Default)]
pub struct ListStore {
    records: Vec<Student>,
    realized_query: Option<String>,
    loading: bool,
    latest_seq: u64,
}

impl ListStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin_refresh(&mut self, query: &str) -> RefreshTicket {
        self.latest_seq += 1;
        self.loading = true;
        RefreshTicket {
            seq: self.latest_seq,
            query: query.to_string(),
        }
    }

    /// Applies a response only when it belongs to the most recently started
    /// refresh. A failed refresh keeps the previous records visible; its
    /// message is handed back for the caller to surface.
    pub fn complete_refresh(
        &mut self,
        ticket: RefreshTicket,
        result: Result<Vec<Student>, ClientError>,
    ) -> RefreshOutcome {
        if ticket.seq != self.latest_seq {
            return RefreshOutcome::Discarded;
        }

        self.loading = false;
        match result {
            Ok(records) => {
                let count = records.len();
                self.records = records;
                self.realized_query = Some(ticket.query);
                RefreshOutcome::Applied { count }
            }
            Err(err) => RefreshOutcome::Failed {
                message: err.to_string(),
            },
        }
    }

    pub fn records(&self) -> &[Student] {
        &self.records
    }

    pub fn find(&self, id: &StudentId) -> Option<&Student> {
        self.records.iter().find(|student| &student.id == id)
    }

    /// Query that produced the current records, once any refresh has landed.
    pub fn realized_query(&self) -> Option<&str> {
        self.realized_query.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }
}

#[cfg(test)]
#[path = "tests/list_store_tests.rs"]
mod tests;
