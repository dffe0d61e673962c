use crate::Assignment;
use serde::{Deserialize, Serialize};
use serde_json::Number;
use std::fmt;

const CHECKLIST: [&str; 3] = ["Start assignment", "Complete assignment", "Submit assignment"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Bucket {
    Urgent,
    Important,
    Regular,
}

impl Bucket {
    /// Template category order.
    pub const ALL: [Bucket; 3] = [Bucket::Urgent, Bucket::Important, Bucket::Regular];

    pub fn as_str(&self) -> &'static str {
        match self {
            Bucket::Urgent => "urgent",
            Bucket::Important => "important",
            Bucket::Regular => "regular",
        }
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChecklistItem {
    pub item: String,
    pub completed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TodoTask {
    pub task_id: String,
    pub title: String,
    pub description: String,
    pub due_date: String,
    pub priority: String,
    pub estimated_time: String,
    pub tags: Vec<String>,
    pub url: String,
    pub checklist: Vec<ChecklistItem>,
}

impl From<&Assignment> for TodoTask {
    fn from(assignment: &Assignment) -> Self {
        let hours = assignment
            .estimated_hours
            .clone()
            .unwrap_or_else(|| Number::from(0));
        Self {
            task_id: format!("task_{}", assignment.id),
            title: format!("{}: {}", assignment.class_code(), assignment.title()),
            description: assignment.description().to_string(),
            due_date: assignment.due_date().to_string(),
            priority: assignment
                .priority
                .clone()
                .unwrap_or_else(|| "medium".to_string()),
            estimated_time: format!("{hours} hours"),
            tags: vec![
                assignment.kind().to_string(),
                assignment.class_code().to_string(),
            ],
            url: assignment.url().to_string(),
            checklist: CHECKLIST
                .iter()
                .map(|item| ChecklistItem {
                    item: (*item).to_string(),
                    completed: false,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TodoExport {
    pub urgent: Vec<TodoTask>,
    pub important: Vec<TodoTask>,
    pub regular: Vec<TodoTask>,
}

impl TodoExport {
    pub fn bucket(&self, bucket: Bucket) -> &[TodoTask] {
        match bucket {
            Bucket::Urgent => &self.urgent,
            Bucket::Important => &self.important,
            Bucket::Regular => &self.regular,
        }
    }

    pub(crate) fn push(&mut self, bucket: Bucket, task: TodoTask) {
        match bucket {
            Bucket::Urgent => self.urgent.push(task),
            Bucket::Important => self.important.push(task),
            Bucket::Regular => self.regular.push(task),
        }
    }

    pub fn len(&self) -> usize {
        self.urgent.len() + self.important.len() + self.regular.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
