use crate::Assignment;
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

pub const SHEET_COLUMNS: [&str; 13] = [
    "id",
    "class_code",
    "class_name",
    "title",
    "type",
    "status",
    "assigned_date",
    "due_date",
    "days_until_due",
    "priority",
    "points_possible",
    "estimated_hours",
    "url",
];

pub type SheetRow = [Value; SHEET_COLUMNS.len()];

/// One fixed-width row per assignment, in input order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SheetsExport {
    pub rows: Vec<SheetRow>,
}

impl SheetsExport {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Missing text and numbers render as `""`; an unknown days-until-due is `null`.
pub(crate) fn sheet_row(assignment: &Assignment, days_until_due: Option<i64>) -> SheetRow {
    [
        Value::from(assignment.id.as_str()),
        Value::from(assignment.class_code()),
        Value::from(assignment.class_name()),
        Value::from(assignment.title()),
        Value::from(assignment.kind()),
        Value::from(assignment.status()),
        Value::from(assignment.assigned_date()),
        Value::from(assignment.due_date()),
        days_until_due.map_or(Value::Null, Value::from),
        Value::from(assignment.priority()),
        number_or_blank(&assignment.points_possible),
        number_or_blank(&assignment.estimated_hours),
        Value::from(assignment.url()),
    ]
}

/// Renders a cell as plain text, the way a spreadsheet shows it.
pub fn cell_text(cell: &Value) -> String {
    match cell {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn blank() -> Value {
    Value::String(String::new())
}

fn number_or_blank(value: &Option<Number>) -> Value {
    value.clone().map_or_else(blank, Value::Number)
}
