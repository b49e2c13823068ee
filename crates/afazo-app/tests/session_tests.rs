// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use afazo_app::{
    AppCommand, AppEvent, AppState, Filter, Mutation, MutationGateway, ScrollCoordinator,
    SyncStage, THEME_KEY, Theme, ThemeResolver, VisibilitySignal,
};
use afazo_testkit::{
    FakeTaskStore, FixedSystemPreference, MemoryPreferences, RecordingStyle, RecordingVisibility,
    StoreRequest, demo_tasks, numbered_tasks,
};
use anyhow::Result;

fn apply(state: &mut AppState, gateway: &MutationGateway<FakeTaskStore>, events: Vec<AppEvent>) {
    for event in events {
        if let AppEvent::MutationRequested(mutation) = event {
            let mut written = None;
            let outcome = gateway.execute_with(mutation, |mutation| written = Some(mutation.clone()));
            if let Some(mutation) = written {
                state.dispatch(AppCommand::WriteCompleted(mutation));
            }
            state.dispatch(AppCommand::ApplySync(outcome));
        }
    }
}

#[test]
fn stored_preference_beats_system_default_and_is_not_rewritten() {
    let store = MemoryPreferences::with_value(THEME_KEY, "light");
    let mut style = RecordingStyle::default();
    let mut resolver = ThemeResolver::default();

    let theme = resolver.resolve_initial(&store, &FixedSystemPreference { dark: true }, &mut style);

    assert_eq!(theme, Theme::Light);
    assert_eq!(style.applied, vec![Theme::Light]);
    assert!(store.writes().is_empty());
}

#[test]
fn explicit_choice_persists_and_mirrors_every_time() -> Result<()> {
    let mut store = MemoryPreferences::default();
    let mut style = RecordingStyle::default();
    let mut resolver = ThemeResolver::default();
    resolver.resolve_initial(&store, &FixedSystemPreference { dark: true }, &mut style);

    resolver.set_dark(true, &mut store, &mut style)?;
    resolver.set_dark(true, &mut store, &mut style)?;

    assert_eq!(store.writes().len(), 2);
    assert_eq!(store.value(THEME_KEY), Some("dark"));
    assert_eq!(style.applied, vec![Theme::Dark; 3]);
    Ok(())
}

#[test]
fn scrolling_the_demo_list_observes_one_sentinel_at_a_time() {
    let mut state = AppState {
        tasks: demo_tasks(),
        ..AppState::default()
    };
    let mut scroll = ScrollCoordinator::default();
    let mut source = RecordingVisibility::default();

    scroll.sync(&state.view(), &mut source);
    while let Some(observation) = source.live() {
        let events = scroll.handle_signal(
            VisibilitySignal {
                observation,
                visible: true,
            },
            &mut state,
        );
        assert_eq!(events.len(), 1);
        scroll.sync(&state.view(), &mut source);
    }

    assert_eq!(state.view().visible().len(), demo_tasks().len());
    assert!(!state.view().has_more());
    assert_eq!(source.subscribed.len(), source.unsubscribed.len());
}

#[test]
fn rejected_write_keeps_list_and_skips_refetch() {
    let store = FakeTaskStore::with_tasks(numbered_tasks(3));
    let gateway = MutationGateway::new(store.clone());
    let mut state = AppState {
        tasks: store.tasks(),
        ..AppState::default()
    };
    store.set_fail_writes(true);

    state.dispatch(AppCommand::StageDelete(state.tasks[1].id));
    let events = state.dispatch(AppCommand::ConfirmDelete);
    apply(&mut state, &gateway, events);

    assert_eq!(state.tasks.len(), 3);
    assert_eq!(store.requests(), vec![StoreRequest::Delete(state.tasks[1].id)]);
    let status = state.status_line.clone().unwrap_or_default();
    assert!(
        status.contains(&format!("failed during {}", SyncStage::Write.as_str())),
        "got {status}"
    );
}

#[test]
fn create_then_filter_shows_new_pending_task() {
    let store = FakeTaskStore::with_tasks(numbered_tasks(3));
    let gateway = MutationGateway::new(store.clone());
    let mut state = AppState::default();
    apply(
        &mut state,
        &gateway,
        vec![AppEvent::MutationRequested(Mutation::Refresh)],
    );

    state.dispatch(AppCommand::SetDraft("Buy Milk".to_owned()));
    let events = state.dispatch(AppCommand::SubmitDraft);
    apply(&mut state, &gateway, events);
    state.dispatch(AppCommand::SetFilter(Filter::Pending));
    state.dispatch(AppCommand::SetSearch("milk".to_owned()));

    assert!(state.draft.is_empty());
    let view = state.view();
    assert_eq!(view.visible().len(), 1);
    assert_eq!(view.visible()[0].text, "Buy Milk");
}
