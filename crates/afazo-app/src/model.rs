// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};

use crate::ids::TaskId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub text: String,
    pub completed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Filter {
    #[default]
    All,
    Pending,
    Done,
}

impl Filter {
    pub const ALL: [Self; 3] = [Self::All, Self::Pending, Self::Done];

    pub const fn label(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Pending => "Pending",
            Self::Done => "Done",
        }
    }

    pub fn next(self) -> Self {
        let index = Self::ALL
            .iter()
            .position(|filter| *filter == self)
            .unwrap_or(0);
        Self::ALL[(index + 1) % Self::ALL.len()]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub const fn from_dark(dark: bool) -> Self {
        if dark { Self::Dark } else { Self::Light }
    }

    pub const fn is_dark(self) -> bool {
        matches!(self, Self::Dark)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    Nav,
    Draft,
    Search,
    Confirm,
}

#[cfg(test)]
mod tests {
    use super::{Filter, Task, Theme};
    use crate::TaskId;
    use anyhow::Result;

    #[test]
    fn task_decodes_store_payload_and_ignores_extra_fields() -> Result<()> {
        let task: Task = serde_json::from_str(
            r#"{"id":7,"text":"Buy Milk","completed":true,"createdAt":"2026-01-01"}"#,
        )?;
        assert_eq!(
            task,
            Task {
                id: TaskId::new(7),
                text: "Buy Milk".to_owned(),
                completed: true,
            }
        );
        Ok(())
    }

    #[test]
    fn filter_cycles_through_all_variants() {
        assert_eq!(Filter::All.next(), Filter::Pending);
        assert_eq!(Filter::Pending.next(), Filter::Done);
        assert_eq!(Filter::Done.next(), Filter::All);
    }

    #[test]
    fn theme_literals_match_persisted_values() {
        assert_eq!(Theme::Dark.as_str(), "dark");
        assert_eq!(Theme::Light.as_str(), "light");
        assert!(Theme::from_dark(true).is_dark());
        assert_eq!(Theme::from_dark(false), Theme::Light);
    }
}
