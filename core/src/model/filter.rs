use std::fmt;
use std::str::FromStr;

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

use crate::model::task::TaskRecord;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    All,
    Active,
    Completed,
}

impl StatusFilter {
    pub const ALL: [StatusFilter; 3] = [StatusFilter::All, StatusFilter::Active, StatusFilter::Completed];

    pub fn accepts(self, task: &TaskRecord) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Active => !task.completed,
            StatusFilter::Completed => task.completed,
        }
    }

    /// All -> Active -> Completed -> All
    pub fn next(self) -> Self {
        match self {
            StatusFilter::All => StatusFilter::Active,
            StatusFilter::Active => StatusFilter::Completed,
            StatusFilter::Completed => StatusFilter::All,
        }
    }
}

impl FromStr for StatusFilter {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(StatusFilter::All),
            "active" => Ok(StatusFilter::Active),
            "completed" => Ok(StatusFilter::Completed),
            other => Err(anyhow!("Unknown filter: '{}' (expected all, active or completed)", other)),
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            StatusFilter::All => "All",
            StatusFilter::Active => "Active",
            StatusFilter::Completed => "Completed",
        };
        f.write_str(label)
    }
}

/// Transient view state: which records the presentation layer wants to see.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub status: StatusFilter,
    pub search: String,
}

impl FilterCriteria {
    pub fn new(status: StatusFilter, search: impl Into<String>) -> Self {
        Self {
            status,
            search: search.into(),
        }
    }

    pub fn has_search(&self) -> bool {
        !self.search.trim().is_empty()
    }

    /// Status and search must both pass. Search is a case-insensitive
    /// substring test of the query as typed, spaces included; a query of
    /// only whitespace matches everything.
    pub fn matches(&self, task: &TaskRecord) -> bool {
        self.status.accepts(task) && self.matches_search(task)
    }

    fn matches_search(&self, task: &TaskRecord) -> bool {
        if !self.has_search() {
            return true;
        }
        task.text.to_lowercase().contains(&self.search.to_lowercase())
    }

    pub fn empty_message(&self) -> &'static str {
        if self.has_search() {
            return "No todos found";
        }
        match self.status {
            StatusFilter::Completed => "No completed todos",
            StatusFilter::Active => "No active todos",
            StatusFilter::All => "No todos yet",
        }
    }

    pub fn empty_hint(&self) -> &'static str {
        if self.has_search() {
            "Try a different search term"
        } else {
            "Create your first todo to get started"
        }
    }
}
