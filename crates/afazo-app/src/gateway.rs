// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::Result;
use tracing::{debug, warn};

use crate::ids::TaskId;
use crate::model::Task;

pub trait TaskStore {
    fn list(&self) -> Result<Vec<Task>>;
    fn create(&self, text: &str) -> Result<()>;
    // The store decides the new completion value.
    fn toggle(&self, id: TaskId) -> Result<()>;
    fn delete(&self, id: TaskId) -> Result<()>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    Create(String),
    Toggle(TaskId),
    Delete(TaskId),
    Refresh,
}

impl Mutation {
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Create(_) => "create",
            Self::Toggle(_) => "toggle",
            Self::Delete(_) => "delete",
            Self::Refresh => "refresh",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncStage {
    Write,
    Refetch,
}

impl SyncStage {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Write => "write",
            Self::Refetch => "refetch",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    Skipped,
    Synced {
        mutation: Mutation,
        tasks: Vec<Task>,
    },
    Failed {
        mutation: Mutation,
        stage: SyncStage,
        message: String,
    },
}

/// Write-then-refetch wrapper around a [`TaskStore`]. The refetch for a call
/// is only issued after that call's write returned; separate calls are not
/// ordered against each other.
#[derive(Debug, Clone)]
pub struct MutationGateway<S> {
    store: S,
}

impl<S: TaskStore> MutationGateway<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn execute(&self, mutation: Mutation) -> SyncOutcome {
        self.execute_with(mutation, |_| {})
    }

    /// `on_written` runs once the write has succeeded and before the refetch
    /// is sent. It is not called for refreshes or failed writes.
    #[tracing::instrument(skip_all, fields(op = mutation.label()))]
    pub fn execute_with<F>(&self, mutation: Mutation, on_written: F) -> SyncOutcome
    where
        F: FnOnce(&Mutation),
    {
        let write = match &mutation {
            Mutation::Create(text) => {
                if text.trim().is_empty() {
                    debug!("blank task text, nothing sent");
                    return SyncOutcome::Skipped;
                }
                self.store.create(text)
            }
            Mutation::Toggle(id) => self.store.toggle(*id),
            Mutation::Delete(id) => self.store.delete(*id),
            Mutation::Refresh => Ok(()),
        };

        if let Err(error) = write {
            warn!(error = %format!("{error:#}"), "task write failed");
            return SyncOutcome::Failed {
                mutation,
                stage: SyncStage::Write,
                message: format!("{error:#}"),
            };
        }
        if mutation != Mutation::Refresh {
            on_written(&mutation);
        }

        match self.store.list() {
            Ok(tasks) => {
                debug!(count = tasks.len(), "task list refetched");
                SyncOutcome::Synced { mutation, tasks }
            }
            Err(error) => {
                warn!(error = %format!("{error:#}"), "task refetch failed");
                SyncOutcome::Failed {
                    mutation,
                    stage: SyncStage::Refetch,
                    message: format!("{error:#}"),
                }
            }
        }
    }

    pub fn create(&self, text: &str) -> SyncOutcome {
        self.execute(Mutation::Create(text.to_owned()))
    }

    pub fn toggle(&self, id: TaskId) -> SyncOutcome {
        self.execute(Mutation::Toggle(id))
    }

    pub fn delete(&self, id: TaskId) -> SyncOutcome {
        self.execute(Mutation::Delete(id))
    }

    pub fn refresh(&self) -> SyncOutcome {
        self.execute(Mutation::Refresh)
    }
}
