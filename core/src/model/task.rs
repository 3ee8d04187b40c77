use serde::{Deserialize, Serialize};
use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TaskRecord {
    pub id: Uuid,
    pub text: String,

    // Both optional fields are only set through the add command's metadata
    // (desc:..., due:...). The list itself never reads them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,

    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

impl TaskRecord {
    /// Builds a fresh, not yet completed record. The caller is responsible for
    /// rejecting blank text; the text is stored trimmed.
    pub fn new(text: &str) -> Self {
        Self::with_id(Uuid::new_v4(), text)
    }

    pub fn with_id(id: Uuid, text: &str) -> Self {
        Self {
            id,
            text: text.trim().to_string(),
            description: None,
            due_date: None,
            completed: false,
            created_at: Utc::now(),
        }
    }

    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = description.filter(|d| !d.trim().is_empty());
        self
    }

    pub fn with_due_date(mut self, due_date: Option<NaiveDate>) -> Self {
        self.due_date = due_date;
        self
    }

    pub fn toggle(&mut self) {
        self.completed = !self.completed;
    }

    pub fn short_id(&self) -> String {
        self.id.to_string()[..8].to_string()
    }
}
