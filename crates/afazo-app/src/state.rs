// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::confirm::ConfirmationGate;
use crate::gateway::{Mutation, SyncOutcome, SyncStage};
use crate::ids::TaskId;
use crate::model::{AppMode, Filter, Task};
use crate::query::{Page, TaskQuery, TaskView, run_query};
use crate::theme::ThemeResolver;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    pub mode: AppMode,
    pub tasks: Vec<Task>,
    pub draft: String,
    pub search: String,
    pub filter: Filter,
    pub page: Page,
    pub confirm: ConfirmationGate,
    pub theme: ThemeResolver,
    pub status_line: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            mode: AppMode::Nav,
            tasks: Vec::new(),
            draft: String::new(),
            search: String::new(),
            filter: Filter::All,
            page: Page::FIRST,
            confirm: ConfirmationGate::default(),
            theme: ThemeResolver::default(),
            status_line: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppCommand {
    EnterDraft,
    EnterSearch,
    ExitToNav,
    SetDraft(String),
    SetSearch(String),
    SetFilter(Filter),
    CycleFilter,
    NextPage,
    PrevPage,
    SubmitDraft,
    RequestToggle(TaskId),
    RequestRefresh,
    StageDelete(TaskId),
    ConfirmDelete,
    CancelDelete,
    WriteCompleted(Mutation),
    ApplySync(SyncOutcome),
    SetStatus(String),
    ClearStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    ModeChanged(AppMode),
    DraftChanged,
    SearchChanged(String),
    FilterChanged(Filter),
    PageChanged(Page),
    MutationRequested(Mutation),
    DeletionStaged(TaskId),
    DeletionCleared,
    TasksReplaced { count: usize },
    SyncFailed { stage: SyncStage, message: String },
    StatusUpdated(String),
    StatusCleared,
}

impl AppState {
    pub fn view(&self) -> TaskView<'_> {
        run_query(
            &self.tasks,
            &TaskQuery {
                search: &self.search,
                filter: self.filter,
                page: self.page,
            },
        )
    }

    pub fn dispatch(&mut self, command: AppCommand) -> Vec<AppEvent> {
        match command {
            AppCommand::EnterDraft => self.set_mode(AppMode::Draft),
            AppCommand::EnterSearch => self.set_mode(AppMode::Search),
            AppCommand::ExitToNav => self.set_mode(AppMode::Nav),
            AppCommand::SetDraft(text) => {
                self.draft = text;
                vec![AppEvent::DraftChanged]
            }
            AppCommand::SetSearch(text) => {
                self.search = text;
                vec![AppEvent::SearchChanged(self.search.clone())]
            }
            AppCommand::SetFilter(filter) => {
                self.filter = filter;
                vec![AppEvent::FilterChanged(filter)]
            }
            AppCommand::CycleFilter => {
                self.filter = self.filter.next();
                vec![AppEvent::FilterChanged(self.filter)]
            }
            AppCommand::NextPage => {
                if !self.view().has_more() {
                    return Vec::new();
                }
                self.page = self.page.next();
                vec![AppEvent::PageChanged(self.page)]
            }
            AppCommand::PrevPage => {
                let prev = self.page.prev();
                if prev == self.page {
                    return Vec::new();
                }
                self.page = prev;
                vec![AppEvent::PageChanged(self.page)]
            }
            AppCommand::SubmitDraft => {
                if self.draft.trim().is_empty() {
                    return Vec::new();
                }
                vec![AppEvent::MutationRequested(Mutation::Create(
                    self.draft.clone(),
                ))]
            }
            AppCommand::RequestToggle(id) => {
                vec![AppEvent::MutationRequested(Mutation::Toggle(id))]
            }
            AppCommand::RequestRefresh => vec![AppEvent::MutationRequested(Mutation::Refresh)],
            AppCommand::StageDelete(id) => {
                let Some(task) = self.tasks.iter().find(|task| task.id == id).cloned() else {
                    return Vec::new();
                };
                self.confirm.stage(task);
                let mut events = vec![AppEvent::DeletionStaged(id)];
                events.extend(self.set_mode(AppMode::Confirm));
                events
            }
            AppCommand::ConfirmDelete => {
                let Some(mutation) = self.confirm.confirm() else {
                    return Vec::new();
                };
                let mut events = vec![
                    AppEvent::MutationRequested(mutation),
                    AppEvent::DeletionCleared,
                ];
                events.extend(self.set_mode(AppMode::Nav));
                events
            }
            AppCommand::CancelDelete => {
                if self.confirm.cancel().is_none() {
                    return Vec::new();
                }
                let mut events = vec![AppEvent::DeletionCleared];
                events.extend(self.set_mode(AppMode::Nav));
                events
            }
            AppCommand::WriteCompleted(mutation) => {
                // Text typed after submitting is not the task that was written.
                match mutation {
                    Mutation::Create(text) if self.draft == text => {
                        self.draft.clear();
                        vec![AppEvent::DraftChanged]
                    }
                    _ => Vec::new(),
                }
            }
            AppCommand::ApplySync(outcome) => self.apply_sync(outcome),
            AppCommand::SetStatus(message) => vec![self.set_status(&message)],
            AppCommand::ClearStatus => {
                self.status_line = None;
                vec![AppEvent::StatusCleared]
            }
        }
    }

    fn apply_sync(&mut self, outcome: SyncOutcome) -> Vec<AppEvent> {
        let mut events = Vec::new();
        match outcome {
            SyncOutcome::Skipped => {}
            SyncOutcome::Synced { tasks, .. } => {
                self.tasks = tasks;
                events.push(AppEvent::TasksReplaced {
                    count: self.tasks.len(),
                });
            }
            SyncOutcome::Failed {
                mutation,
                stage,
                message,
            } => {
                events.push(self.set_status(&format!(
                    "{} failed during {}: {message}",
                    mutation.label(),
                    stage.as_str()
                )));
                events.push(AppEvent::SyncFailed { stage, message });
            }
        }
        events
    }

    fn set_mode(&mut self, mode: AppMode) -> Vec<AppEvent> {
        if self.mode == mode {
            return Vec::new();
        }
        self.mode = mode;
        vec![AppEvent::ModeChanged(mode)]
    }

    fn set_status(&mut self, message: &str) -> AppEvent {
        self.status_line = Some(message.to_owned());
        AppEvent::StatusUpdated(message.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::{AppCommand, AppEvent, AppState};
    use crate::{AppMode, Filter, Mutation, Page, SyncOutcome, SyncStage, Task, TaskId};

    fn task(id: i64, text: &str, completed: bool) -> Task {
        Task {
            id: TaskId::new(id),
            text: text.to_owned(),
            completed,
        }
    }

    fn state_with(count: i64) -> AppState {
        AppState {
            tasks: (1..=count)
                .map(|id| task(id, &format!("task {id}"), id == 4 || id == 9))
                .collect(),
            ..AppState::default()
        }
    }

    #[test]
    fn next_page_only_advances_while_more_remain() {
        let mut state = state_with(12);
        assert_eq!(
            state.dispatch(AppCommand::NextPage),
            vec![AppEvent::PageChanged(Page::FIRST.next())]
        );
        state.dispatch(AppCommand::NextPage);
        assert_eq!(state.page.get(), 3);
        assert!(!state.view().has_more());

        assert!(state.dispatch(AppCommand::NextPage).is_empty());
        assert_eq!(state.page.get(), 3);
    }

    #[test]
    fn prev_page_floors_at_one() {
        let mut state = state_with(12);
        assert!(state.dispatch(AppCommand::PrevPage).is_empty());
        state.dispatch(AppCommand::NextPage);
        state.dispatch(AppCommand::PrevPage);
        assert_eq!(state.page, Page::FIRST);
    }

    #[test]
    fn page_survives_filter_and_search_changes() {
        let mut state = state_with(12);
        state.dispatch(AppCommand::NextPage);
        state.dispatch(AppCommand::NextPage);
        assert_eq!(state.view().visible().len(), 12);

        state.dispatch(AppCommand::SetFilter(Filter::Done));
        assert_eq!(state.page.get(), 3);
        let view = state.view();
        assert_eq!(view.visible().len(), 2);
        assert!(!view.has_more());

        state.dispatch(AppCommand::SetSearch("TASK 1".to_owned()));
        assert_eq!(state.page.get(), 3);
    }

    #[test]
    fn blank_draft_submits_nothing() {
        let mut state = state_with(2);
        state.dispatch(AppCommand::SetDraft("   ".to_owned()));
        assert!(state.dispatch(AppCommand::SubmitDraft).is_empty());
        assert_eq!(state.tasks.len(), 2);
        assert_eq!(state.draft, "   ");
    }

    #[test]
    fn draft_clears_when_create_write_completes() {
        let mut state = AppState::default();
        state.dispatch(AppCommand::SetDraft("call mom".to_owned()));
        let events = state.dispatch(AppCommand::SubmitDraft);
        assert_eq!(
            events,
            vec![AppEvent::MutationRequested(Mutation::Create(
                "call mom".to_owned()
            ))]
        );
        assert_eq!(state.draft, "call mom");

        let events = state.dispatch(AppCommand::WriteCompleted(Mutation::Create(
            "call mom".to_owned(),
        )));
        assert_eq!(events, vec![AppEvent::DraftChanged]);
        assert!(state.draft.is_empty());
        assert!(state.dispatch(AppCommand::SubmitDraft).is_empty());
    }

    #[test]
    fn sync_outcomes_never_touch_the_draft() {
        let mut state = AppState::default();
        state.dispatch(AppCommand::SetDraft("call mom".to_owned()));
        state.dispatch(AppCommand::ApplySync(SyncOutcome::Failed {
            mutation: Mutation::Create("call mom".to_owned()),
            stage: SyncStage::Write,
            message: "offline".to_owned(),
        }));
        assert_eq!(state.draft, "call mom");

        state.dispatch(AppCommand::SetDraft("next one".to_owned()));
        state.dispatch(AppCommand::ApplySync(SyncOutcome::Synced {
            mutation: Mutation::Create("call mom".to_owned()),
            tasks: vec![task(1, "call mom", false)],
        }));
        assert_eq!(state.draft, "next one");
    }

    #[test]
    fn edited_draft_survives_earlier_write() {
        let mut state = AppState::default();
        state.dispatch(AppCommand::SetDraft("call mom".to_owned()));
        state.dispatch(AppCommand::SubmitDraft);
        state.dispatch(AppCommand::SetDraft("call mom back".to_owned()));

        let events = state.dispatch(AppCommand::WriteCompleted(Mutation::Create(
            "call mom".to_owned(),
        )));
        assert!(events.is_empty());
        assert_eq!(state.draft, "call mom back");
        assert!(
            state
                .dispatch(AppCommand::WriteCompleted(Mutation::Toggle(TaskId::new(1))))
                .is_empty()
        );
    }

    #[test]
    fn staging_does_not_touch_tasks() {
        let mut state = state_with(3);
        let before = state.tasks.clone();
        let events = state.dispatch(AppCommand::StageDelete(TaskId::new(2)));
        assert_eq!(
            events,
            vec![
                AppEvent::DeletionStaged(TaskId::new(2)),
                AppEvent::ModeChanged(AppMode::Confirm),
            ]
        );
        assert_eq!(state.tasks, before);
        assert_eq!(state.confirm.staged().map(|task| task.id), Some(TaskId::new(2)));
    }

    #[test]
    fn confirm_requests_delete_and_clears_stage_immediately() {
        let mut state = state_with(3);
        state.dispatch(AppCommand::StageDelete(TaskId::new(2)));
        let events = state.dispatch(AppCommand::ConfirmDelete);
        assert_eq!(
            events,
            vec![
                AppEvent::MutationRequested(Mutation::Delete(TaskId::new(2))),
                AppEvent::DeletionCleared,
                AppEvent::ModeChanged(AppMode::Nav),
            ]
        );
        assert!(!state.confirm.is_staged());
        assert_eq!(state.tasks.len(), 3);
    }

    #[test]
    fn cancel_leaves_collection_and_clears_stage() {
        let mut state = state_with(3);
        let before = state.tasks.clone();
        state.dispatch(AppCommand::StageDelete(TaskId::new(1)));
        let events = state.dispatch(AppCommand::CancelDelete);
        assert!(!events.iter().any(|event| matches!(event, AppEvent::MutationRequested(_))));
        assert_eq!(state.tasks, before);
        assert!(!state.confirm.is_staged());
        assert_eq!(state.mode, AppMode::Nav);
    }

    #[test]
    fn staging_unknown_task_is_ignored() {
        let mut state = state_with(1);
        assert!(state.dispatch(AppCommand::StageDelete(TaskId::new(42))).is_empty());
        assert_eq!(state.mode, AppMode::Nav);
    }

    #[test]
    fn toggle_stays_available_while_delete_is_staged() {
        let mut state = state_with(2);
        state.dispatch(AppCommand::StageDelete(TaskId::new(1)));
        let events = state.dispatch(AppCommand::RequestToggle(TaskId::new(1)));
        assert_eq!(
            events,
            vec![AppEvent::MutationRequested(Mutation::Toggle(TaskId::new(1)))]
        );
        assert!(state.confirm.is_staged());
    }

    #[test]
    fn failed_refetch_keeps_last_known_list() {
        let mut state = state_with(4);
        let before = state.tasks.clone();
        let events = state.dispatch(AppCommand::ApplySync(SyncOutcome::Failed {
            mutation: Mutation::Toggle(TaskId::new(1)),
            stage: SyncStage::Refetch,
            message: "connection reset".to_owned(),
        }));
        assert_eq!(state.tasks, before);
        assert!(events.contains(&AppEvent::SyncFailed {
            stage: SyncStage::Refetch,
            message: "connection reset".to_owned(),
        }));
        assert_eq!(
            state.status_line.as_deref(),
            Some("toggle failed during refetch: connection reset")
        );
    }

    #[test]
    fn last_applied_refetch_wins() {
        let mut state = AppState::default();
        let newer = vec![task(1, "a", true), task(2, "b", false)];
        let older = vec![task(1, "a", false)];

        state.dispatch(AppCommand::ApplySync(SyncOutcome::Synced {
            mutation: Mutation::Toggle(TaskId::new(1)),
            tasks: newer,
        }));
        state.dispatch(AppCommand::ApplySync(SyncOutcome::Synced {
            mutation: Mutation::Create("b".to_owned()),
            tasks: older.clone(),
        }));
        assert_eq!(state.tasks, older);
    }

    #[test]
    fn cycle_filter_and_status_round_trip() {
        let mut state = AppState::default();
        assert_eq!(
            state.dispatch(AppCommand::CycleFilter),
            vec![AppEvent::FilterChanged(Filter::Pending)]
        );
        state.dispatch(AppCommand::SetStatus("saved".to_owned()));
        assert_eq!(state.status_line.as_deref(), Some("saved"));
        assert_eq!(
            state.dispatch(AppCommand::ClearStatus),
            vec![AppEvent::StatusCleared]
        );
        assert_eq!(state.status_line, None);
    }
}
