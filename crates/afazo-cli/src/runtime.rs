// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use afazo_app::{
    Mutation, MutationGateway, PreferenceStore, SyncOutcome, SystemPreference, TaskStore,
};
use afazo_db::Store;
use afazo_tui::{AppRuntime, InternalEvent, TerminalColorScheme};
use anyhow::{Context, Result};
use std::sync::mpsc::Sender;
use std::thread;
use tracing::{debug, warn};

pub struct TaskRuntime<S> {
    gateway: MutationGateway<S>,
    preferences: Store,
    system: TerminalColorScheme,
}

impl<S> TaskRuntime<S>
where
    S: TaskStore + Clone + Send + 'static,
{
    pub fn new(store: S, preferences: Store, system: TerminalColorScheme) -> Self {
        Self {
            gateway: MutationGateway::new(store),
            preferences,
            system,
        }
    }
}

impl<S> AppRuntime for TaskRuntime<S>
where
    S: TaskStore + Clone + Send + 'static,
{
    fn run_mutation(
        &mut self,
        mutation: Mutation,
        on_written: &mut dyn FnMut(&Mutation),
    ) -> SyncOutcome {
        self.gateway.execute_with(mutation, |written| on_written(written))
    }

    fn theme_capabilities(&mut self) -> (&mut dyn PreferenceStore, &dyn SystemPreference) {
        (&mut self.preferences, &self.system)
    }

    fn spawn_mutation(&mut self, mutation: Mutation, tx: Sender<InternalEvent>) -> Result<()> {
        let gateway = self.gateway.clone();
        debug!(mutation = mutation.label(), "dispatching mutation");
        thread::Builder::new()
            .name("afazo-sync".to_owned())
            .spawn(move || {
                let outcome = gateway.execute_with(mutation, |written| {
                    let _ = tx.send(InternalEvent::Written(written.clone()));
                });
                if tx.send(InternalEvent::Synced(outcome)).is_err() {
                    warn!("ui closed before sync result arrived");
                }
            })
            .context("spawn sync worker")?;
        Ok(())
    }
}
