//! Staff onboarding checklists.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One checklist item. `id` is unique only within its staff record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub completed: bool,
}

impl Task {
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            completed: false,
        }
    }

    /// Builder: mark the task as already completed.
    pub fn done(mut self) -> Self {
        self.completed = true;
        self
    }

    /// Flip the completed flag, returning the new value.
    pub fn toggle(&mut self) -> bool {
        self.completed = !self.completed;
        self.completed
    }
}

/// A new hire and their ordered onboarding tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffRecord {
    pub id: String,
    pub name: String,
    pub position: String,
    pub start_date: NaiveDate,
    #[serde(default)]
    pub tasks: Vec<Task>,
}

impl StaffRecord {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        position: impl Into<String>,
        start_date: NaiveDate,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            position: position.into(),
            start_date,
            tasks: Vec::new(),
        }
    }

    /// Builder: append a task.
    pub fn with_task(mut self, task: Task) -> Self {
        self.tasks.push(task);
        self
    }

    pub fn task(&self, task_id: u32) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == task_id)
    }

    pub fn task_mut(&mut self, task_id: u32) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| t.id == task_id)
    }
}
