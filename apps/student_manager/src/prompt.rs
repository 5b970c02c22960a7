//! Stdin access shared between the command loop and delete confirmation.

use std::{io::Write, sync::Arc};

use anyhow::Context;
use async_trait::async_trait;
use client_core::ConfirmDelete;
use shared::domain::StudentId;
use tokio::{
    io::{stdin, AsyncBufReadExt, BufReader, Lines, Stdin},
    sync::Mutex,
};
use tracing::warn;

#[derive(Clone)]
pub struct InputLines {
    lines: Arc<Mutex<Lines<BufReader<Stdin>>>>,
}

impl InputLines {
    pub fn stdin() -> Self {
        Self {
            lines: Arc::new(Mutex::new(BufReader::new(stdin()).lines())),
        }
    }

    /// `Ok(None)` once stdin is closed.
    pub async fn next_line(&self) -> anyhow::Result<Option<String>> {
        self.lines
            .lock()
            .await
            .next_line()
            .await
            .context("failed to read from stdin")
    }
}

pub fn show_prompt(prompt: &str) {
    print!("{prompt}");
    let _ = std::io::stdout().flush();
}

/// Asks `[y/N]` on the terminal before a delete goes out.
pub struct StdinConfirm {
    input: InputLines,
}

impl StdinConfirm {
    pub fn new(input: InputLines) -> Self {
        Self { input }
    }
}

#[async_trait]
impl ConfirmDelete for StdinConfirm {
    async fn confirm_delete(&self, id: &StudentId) -> bool {
        show_prompt(&format!("Delete student {id}? [y/N] "));
        match self.input.next_line().await {
            Ok(Some(answer)) => is_yes(&answer),
            Ok(None) => false,
            Err(err) => {
                warn!("treating unreadable confirmation as no: {err:#}");
                false
            }
        }
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

#[cfg(test)]
mod tests {
    use super::is_yes;

    #[test]
    fn only_explicit_yes_confirms() {
        assert!(is_yes("y"));
        assert!(is_yes(" YES \n"));
        assert!(!is_yes(""));
        assert!(!is_yes("n"));
        assert!(!is_yes("yep"));
    }
}
