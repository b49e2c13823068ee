// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use tracing::trace;

use crate::ids::TaskId;
use crate::query::TaskView;
use crate::state::{AppCommand, AppEvent, AppState};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObservationId(u64);

impl ObservationId {
    pub const fn get(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibilitySignal {
    pub observation: ObservationId,
    pub visible: bool,
}

pub trait VisibilitySource {
    fn subscribe(&mut self, observation: ObservationId);
    fn unsubscribe(&mut self, observation: ObservationId);
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct ObservationKey {
    filtered: Vec<TaskId>,
    has_more: bool,
    sentinel: usize,
}

impl ObservationKey {
    fn from_view(view: &TaskView<'_>) -> Self {
        Self {
            filtered: view.filtered_ids(),
            has_more: view.has_more(),
            sentinel: view.visible().len(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScrollCoordinator {
    issued: u64,
    active: Option<ObservationId>,
    // Set once the active observation has advanced the page.
    spent: bool,
    key: Option<ObservationKey>,
}

impl ScrollCoordinator {
    pub fn active(&self) -> Option<ObservationId> {
        self.active
    }

    /// Call after every recomputation of the view. When the derived values
    /// moved, the old observation is released before a new one is attached;
    /// nothing is observed while there is nothing more to load.
    pub fn sync<V: VisibilitySource + ?Sized>(&mut self, view: &TaskView<'_>, source: &mut V) {
        let key = ObservationKey::from_view(view);
        if self.key.as_ref() == Some(&key) {
            return;
        }

        self.release(source);
        if key.has_more {
            self.issued += 1;
            let observation = ObservationId(self.issued);
            source.subscribe(observation);
            self.active = Some(observation);
            self.spent = false;
            trace!(observation = observation.get(), sentinel = key.sentinel, "sentinel observed");
        }
        self.key = Some(key);
    }

    pub fn handle_signal(&mut self, signal: VisibilitySignal, state: &mut AppState) -> Vec<AppEvent> {
        if self.active != Some(signal.observation) || self.spent || !signal.visible {
            return Vec::new();
        }
        if !state.view().has_more() {
            return Vec::new();
        }
        let events = state.dispatch(AppCommand::NextPage);
        self.spent = !events.is_empty();
        events
    }

    pub fn unmount<V: VisibilitySource + ?Sized>(&mut self, source: &mut V) {
        self.release(source);
        self.key = None;
    }

    fn release<V: VisibilitySource + ?Sized>(&mut self, source: &mut V) {
        if let Some(observation) = self.active.take() {
            source.unsubscribe(observation);
            trace!(observation = observation.get(), "sentinel released");
        }
    }
}
