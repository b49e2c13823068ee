// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Result, bail};
use tracing::{debug, info, warn};

use crate::model::Theme;

pub const THEME_KEY: &str = "theme";

pub trait PreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

pub trait SystemPreference {
    fn prefers_dark(&self) -> bool;
}

pub trait StyleSink {
    fn apply_theme(&mut self, theme: Theme);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemePreference {
    #[default]
    Unresolved,
    Resolved(Theme),
}

impl ThemePreference {
    pub const fn theme(self) -> Option<Theme> {
        match self {
            Self::Unresolved => None,
            Self::Resolved(theme) => Some(theme),
        }
    }

    pub const fn is_resolved(self) -> bool {
        matches!(self, Self::Resolved(_))
    }
}

// Reads a persisted value. Empty means nothing was stored; any other value
// is dark only when it is exactly `"dark"`.
pub fn interpret_stored_theme(raw: &str) -> Option<Theme> {
    if raw.is_empty() {
        return None;
    }
    Some(Theme::from_dark(raw == Theme::Dark.as_str()))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ThemeResolver {
    preference: ThemePreference,
}

impl ThemeResolver {
    pub const fn preference(&self) -> ThemePreference {
        self.preference
    }

    pub const fn theme(&self) -> Option<Theme> {
        self.preference.theme()
    }

    pub fn resolve_initial<P, S, Y>(&mut self, store: &P, system: &S, style: &mut Y) -> Theme
    where
        P: PreferenceStore + ?Sized,
        S: SystemPreference + ?Sized,
        Y: StyleSink + ?Sized,
    {
        if let ThemePreference::Resolved(theme) = self.preference {
            return theme;
        }

        let stored = match store.get(THEME_KEY) {
            Ok(raw) => raw.as_deref().and_then(interpret_stored_theme),
            Err(error) => {
                warn!(error = %format!("{error:#}"), "reading theme preference failed");
                None
            }
        };

        let theme = match stored {
            Some(theme) => {
                debug!(theme = theme.as_str(), "theme from stored preference");
                theme
            }
            None => {
                let theme = Theme::from_dark(system.prefers_dark());
                debug!(theme = theme.as_str(), "theme from system default");
                theme
            }
        };

        self.adopt(theme, style);
        theme
    }

    /// Adopts an explicit choice and persists it, even when it matches the
    /// current theme.
    pub fn set_dark<P, Y>(&mut self, dark: bool, store: &mut P, style: &mut Y) -> Result<Theme>
    where
        P: PreferenceStore + ?Sized,
        Y: StyleSink + ?Sized,
    {
        if !self.preference.is_resolved() {
            bail!("theme is still loading; wait for startup to finish before toggling");
        }
        let theme = Theme::from_dark(dark);
        self.adopt(theme, style);
        info!(theme = theme.as_str(), "theme chosen");
        store.set(THEME_KEY, theme.as_str())?;
        Ok(theme)
    }

    pub fn toggle<P, Y>(&mut self, store: &mut P, style: &mut Y) -> Result<Theme>
    where
        P: PreferenceStore + ?Sized,
        Y: StyleSink + ?Sized,
    {
        let dark = self.theme().is_some_and(Theme::is_dark);
        self.set_dark(!dark, store, style)
    }

    fn adopt<Y: StyleSink + ?Sized>(&mut self, theme: Theme, style: &mut Y) {
        self.preference = ThemePreference::Resolved(theme);
        style.apply_theme(theme);
    }
}
