// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use afazo_app::{
    ObservationId, PreferenceStore, StyleSink, SystemPreference, Task, TaskId, TaskStore, Theme,
    VisibilitySource,
};
use anyhow::{Result, bail};
use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, Mutex, MutexGuard};

const DEMO_TASKS: [(&str, bool); 14] = [
    ("Buy Milk", false),
    ("Renew passport", false),
    ("Call the plumber about the kitchen sink", true),
    ("Water the plants", false),
    ("Book dentist appointment", true),
    ("Finish quarterly report", false),
    ("Pay electricity bill", true),
    ("Pick up dry cleaning", false),
    ("Back up laptop", false),
    ("Return library books", true),
    ("Plan weekend hike", false),
    ("Clean out the garage", false),
    ("Reply to Sam's email", true),
    ("Order printer ink", false),
];

pub fn demo_tasks() -> Vec<Task> {
    DEMO_TASKS
        .iter()
        .enumerate()
        .map(|(index, (text, completed))| Task {
            id: TaskId::new(index as i64 + 1),
            text: (*text).to_owned(),
            completed: *completed,
        })
        .collect()
}

pub fn numbered_tasks(count: usize) -> Vec<Task> {
    (1..=count)
        .map(|id| Task {
            id: TaskId::new(id as i64),
            text: format!("Task {id}"),
            completed: id % 3 == 0,
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreRequest {
    List,
    Create(String),
    Toggle(TaskId),
    Delete(TaskId),
}

#[derive(Debug, Default)]
struct FakeStoreInner {
    tasks: Vec<Task>,
    next_id: i64,
    requests: Vec<StoreRequest>,
    fail_writes: bool,
    fail_lists: bool,
}

#[derive(Debug, Clone, Default)]
pub struct FakeTaskStore {
    inner: Arc<Mutex<FakeStoreInner>>,
}

impl FakeTaskStore {
    pub fn with_tasks(tasks: Vec<Task>) -> Self {
        let next_id = tasks.iter().map(|task| task.id.get()).max().unwrap_or(0) + 1;
        Self {
            inner: Arc::new(Mutex::new(FakeStoreInner {
                tasks,
                next_id,
                ..FakeStoreInner::default()
            })),
        }
    }

    pub fn demo() -> Self {
        Self::with_tasks(demo_tasks())
    }

    pub fn tasks(&self) -> Vec<Task> {
        self.lock().tasks.clone()
    }

    pub fn requests(&self) -> Vec<StoreRequest> {
        self.lock().requests.clone()
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.lock().fail_writes = fail;
    }

    pub fn set_fail_lists(&self, fail: bool) {
        self.lock().fail_lists = fail;
    }

    fn lock(&self) -> MutexGuard<'_, FakeStoreInner> {
        match self.inner.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl TaskStore for FakeTaskStore {
    fn list(&self) -> Result<Vec<Task>> {
        let mut inner = self.lock();
        inner.requests.push(StoreRequest::List);
        if inner.fail_lists {
            bail!("fake store: list unavailable");
        }
        Ok(inner.tasks.clone())
    }

    fn create(&self, text: &str) -> Result<()> {
        let mut inner = self.lock();
        inner.requests.push(StoreRequest::Create(text.to_owned()));
        if inner.fail_writes {
            bail!("fake store: create rejected");
        }
        let id = inner.next_id.max(1);
        inner.next_id = id + 1;
        inner.tasks.push(Task {
            id: TaskId::new(id),
            text: text.to_owned(),
            completed: false,
        });
        Ok(())
    }

    fn toggle(&self, id: TaskId) -> Result<()> {
        let mut inner = self.lock();
        inner.requests.push(StoreRequest::Toggle(id));
        if inner.fail_writes {
            bail!("fake store: toggle rejected");
        }
        match inner.tasks.iter_mut().find(|task| task.id == id) {
            Some(task) => {
                task.completed = !task.completed;
                Ok(())
            }
            None => bail!("fake store: task {id} not found"),
        }
    }

    fn delete(&self, id: TaskId) -> Result<()> {
        let mut inner = self.lock();
        inner.requests.push(StoreRequest::Delete(id));
        if inner.fail_writes {
            bail!("fake store: delete rejected");
        }
        inner.tasks.retain(|task| task.id != id);
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryPreferences {
    values: HashMap<String, String>,
    writes: Vec<(String, String)>,
}

impl MemoryPreferences {
    pub fn with_value(key: &str, value: &str) -> Self {
        let mut prefs = Self::default();
        prefs.values.insert(key.to_owned(), value.to_owned());
        prefs
    }

    pub fn writes(&self) -> &[(String, String)] {
        &self.writes
    }

    pub fn value(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }
}

impl PreferenceStore for MemoryPreferences {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.writes.push((key.to_owned(), value.to_owned()));
        self.values.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FixedSystemPreference {
    pub dark: bool,
}

impl SystemPreference for FixedSystemPreference {
    fn prefers_dark(&self) -> bool {
        self.dark
    }
}

#[derive(Debug, Clone, Default)]
pub struct RecordingStyle {
    pub applied: Vec<Theme>,
}

impl StyleSink for RecordingStyle {
    fn apply_theme(&mut self, theme: Theme) {
        self.applied.push(theme);
    }
}

// Visibility source that tracks live observations and panics if a second
// one is attached before the first is released.
#[derive(Debug, Clone, Default)]
pub struct RecordingVisibility {
    live: BTreeSet<ObservationId>,
    pub subscribed: Vec<ObservationId>,
    pub unsubscribed: Vec<ObservationId>,
}

impl RecordingVisibility {
    pub fn live(&self) -> Option<ObservationId> {
        self.live.iter().next().copied()
    }
}

impl VisibilitySource for RecordingVisibility {
    fn subscribe(&mut self, observation: ObservationId) {
        assert!(
            self.live.is_empty(),
            "observation {observation:?} attached while {:?} is live",
            self.live
        );
        self.live.insert(observation);
        self.subscribed.push(observation);
    }

    fn unsubscribe(&mut self, observation: ObservationId) {
        self.live.remove(&observation);
        self.unsubscribed.push(observation);
    }
}
