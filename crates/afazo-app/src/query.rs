// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::ids::TaskId;
use crate::model::{Filter, Task};

pub const PAGE_SIZE: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Page(u32);

impl Page {
    pub const FIRST: Self = Self(1);

    pub const fn new(value: u32) -> Option<Self> {
        if value == 0 { None } else { Some(Self(value)) }
    }

    pub const fn get(self) -> u32 {
        self.0
    }

    pub const fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }

    pub const fn prev(self) -> Self {
        if self.0 <= 1 { Self::FIRST } else { Self(self.0 - 1) }
    }

    pub fn limit(self) -> usize {
        (self.0 as usize).saturating_mul(PAGE_SIZE)
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::FIRST
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskQuery<'q> {
    pub search: &'q str,
    pub filter: Filter,
    pub page: Page,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskView<'a> {
    filtered: Vec<&'a Task>,
    visible_len: usize,
}

impl<'a> TaskView<'a> {
    pub fn filtered(&self) -> &[&'a Task] {
        &self.filtered
    }

    pub fn visible(&self) -> &[&'a Task] {
        &self.filtered[..self.visible_len]
    }

    pub fn has_more(&self) -> bool {
        self.visible_len < self.filtered.len()
    }

    pub fn show_pager(&self) -> bool {
        self.filtered.len() > PAGE_SIZE
    }

    pub fn filtered_ids(&self) -> Vec<TaskId> {
        self.filtered.iter().map(|task| task.id).collect()
    }
}

pub fn matches_search(task: &Task, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    task.text.to_lowercase().contains(&needle.to_lowercase())
}

pub fn matches_filter(task: &Task, filter: Filter) -> bool {
    match filter {
        Filter::All => true,
        Filter::Pending => !task.completed,
        Filter::Done => task.completed,
    }
}

pub fn run_query<'a>(tasks: &'a [Task], query: &TaskQuery<'_>) -> TaskView<'a> {
    let filtered: Vec<&Task> = tasks
        .iter()
        .filter(|task| matches_search(task, query.search) && matches_filter(task, query.filter))
        .collect();
    let visible_len = filtered.len().min(query.page.limit());
    TaskView {
        filtered,
        visible_len,
    }
}
