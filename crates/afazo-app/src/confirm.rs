// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::gateway::Mutation;
use crate::model::Task;

/// Two-phase guard in front of delete. Only `confirm` can produce a delete
/// request, so there is no other path from a delete intent to the store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfirmationGate {
    staged: Option<Task>,
}

impl ConfirmationGate {
    pub fn staged(&self) -> Option<&Task> {
        self.staged.as_ref()
    }

    pub fn is_staged(&self) -> bool {
        self.staged.is_some()
    }

    pub fn stage(&mut self, task: Task) -> Option<Task> {
        self.staged.replace(task)
    }

    pub fn confirm(&mut self) -> Option<Mutation> {
        self.staged.take().map(|task| Mutation::Delete(task.id))
    }

    pub fn cancel(&mut self) -> Option<Task> {
        self.staged.take()
    }
}
