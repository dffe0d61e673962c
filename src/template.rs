use crate::persistence::{ExportError, ExportResult};
use crate::transform::{Bucket, NotionExport, SHEET_COLUMNS, SheetsExport, TodoExport};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateKind {
    Sheets,
    Notion,
    Todo,
}

impl TemplateKind {
    pub const ALL: [TemplateKind; 3] = [TemplateKind::Sheets, TemplateKind::Notion, TemplateKind::Todo];

    pub fn as_str(&self) -> &'static str {
        match self {
            TemplateKind::Sheets => "sheets",
            TemplateKind::Notion => "notion",
            TemplateKind::Todo => "todo",
        }
    }

    /// File name used by `init-templates` and the default config.
    pub fn file_name(&self) -> &'static str {
        match self {
            TemplateKind::Sheets => "output_google_sheets.json",
            TemplateKind::Notion => "output_notion.json",
            TemplateKind::Todo => "output_todo_list.json",
        }
    }

    /// Built-in skeleton with an empty slot.
    pub fn default_skeleton(&self) -> Value {
        match self {
            TemplateKind::Sheets => json!({
                "spreadsheet_name": "Assignment Tracker",
                "sheet_tabs": [
                    {
                        "tab_name": "Assignments",
                        "headers": SHEET_COLUMNS,
                        "rows": []
                    }
                ]
            }),
            TemplateKind::Notion => json!({
                "database_name": "Assignments",
                "database_properties": {
                    "Assignment ID": "title",
                    "Title": "rich_text",
                    "Class": "select",
                    "Type": "select",
                    "Status": "status",
                    "Priority": "select",
                    "Assigned Date": "date",
                    "Due Date": "date",
                    "Points": "number",
                    "Estimated Hours": "number",
                    "URL": "url",
                    "Tags": "multi_select"
                },
                "pages": []
            }),
            TemplateKind::Todo => json!({
                "list_name": "Assignments",
                "categories": [
                    { "name": "Urgent", "description": "Due within 3 days", "tasks": [] },
                    { "name": "Important", "description": "Critical or high priority", "tasks": [] },
                    { "name": "Regular", "description": "Everything else", "tasks": [] }
                ]
            }),
        }
    }
}

impl fmt::Display for TemplateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Writes the rows into `sheet_tabs[0].rows`, leaving the rest untouched.
pub fn fill_sheets(mut template: Value, export: &SheetsExport) -> ExportResult<Value> {
    let rows = serde_json::to_value(export)?;
    let tab = template
        .get_mut("sheet_tabs")
        .and_then(Value::as_array_mut)
        .and_then(|tabs| tabs.first_mut())
        .and_then(Value::as_object_mut)
        .ok_or_else(|| {
            ExportError::template_shape(TemplateKind::Sheets, "expected an object at `sheet_tabs[0]`")
        })?;
    tab.insert("rows".to_string(), rows);
    Ok(template)
}

pub fn fill_notion(mut template: Value, export: &NotionExport) -> ExportResult<Value> {
    let pages = serde_json::to_value(export)?;
    root_object(&mut template, TemplateKind::Notion)?.insert("pages".to_string(), pages);
    Ok(template)
}

/// Categories are filled by position: urgent, important, regular.
pub fn fill_todo(mut template: Value, export: &TodoExport) -> ExportResult<Value> {
    let categories = root_object(&mut template, TemplateKind::Todo)?
        .get_mut("categories")
        .and_then(Value::as_array_mut)
        .ok_or_else(|| {
            ExportError::template_shape(TemplateKind::Todo, "expected a `categories` array")
        })?;
    if categories.len() < Bucket::ALL.len() {
        return Err(ExportError::template_shape(
            TemplateKind::Todo,
            format!(
                "expected {} categories, found {}",
                Bucket::ALL.len(),
                categories.len()
            ),
        ));
    }

    for (index, bucket) in Bucket::ALL.into_iter().enumerate() {
        let tasks = serde_json::to_value(export.bucket(bucket))?;
        let category = categories[index].as_object_mut().ok_or_else(|| {
            ExportError::template_shape(
                TemplateKind::Todo,
                format!("expected an object at `categories[{index}]`"),
            )
        })?;
        category.insert("tasks".to_string(), tasks);
    }
    Ok(template)
}

fn root_object(template: &mut Value, kind: TemplateKind) -> ExportResult<&mut Map<String, Value>> {
    template
        .as_object_mut()
        .ok_or_else(|| ExportError::template_shape(kind, "expected a top-level object"))
}
