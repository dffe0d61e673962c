use crate::Assignment;
use serde::{Deserialize, Serialize};
use serde_json::Number;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotionProperties {
    #[serde(rename = "Assignment ID")]
    pub assignment_id: String,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Class")]
    pub class: String,
    #[serde(rename = "Type")]
    pub kind: String,
    #[serde(rename = "Status")]
    pub status: String,
    #[serde(rename = "Priority")]
    pub priority: String,
    #[serde(rename = "Assigned Date")]
    pub assigned_date: String,
    #[serde(rename = "Due Date")]
    pub due_date: String,
    #[serde(rename = "Points")]
    pub points: Number,
    #[serde(rename = "Estimated Hours")]
    pub estimated_hours: Number,
    #[serde(rename = "URL")]
    pub url: String,
    #[serde(rename = "Tags")]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    #[serde(rename = "heading_2")]
    Heading2 { text: String },
    Paragraph { text: String },
    ToDo { text: String, checked: bool },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotionPage {
    pub page_id: String,
    pub properties: NotionProperties,
    pub content: Vec<ContentBlock>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NotionExport {
    pub pages: Vec<NotionPage>,
}

impl NotionExport {
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

impl From<&Assignment> for NotionPage {
    fn from(assignment: &Assignment) -> Self {
        let properties = NotionProperties {
            assignment_id: assignment.id.clone(),
            title: assignment.title().to_string(),
            class: assignment.class_code().to_string(),
            kind: assignment.kind().to_string(),
            status: assignment.status().to_string(),
            priority: assignment.priority().to_string(),
            assigned_date: assignment.assigned_date().to_string(),
            due_date: assignment.due_date().to_string(),
            points: number_or_zero(&assignment.points_possible),
            estimated_hours: number_or_zero(&assignment.estimated_hours),
            url: assignment.url().to_string(),
            tags: Vec::new(),
        };

        Self {
            page_id: format!("page_{}", assignment.id),
            properties,
            content: vec![
                ContentBlock::Heading2 {
                    text: "Description".into(),
                },
                ContentBlock::Paragraph {
                    text: assignment.description().to_string(),
                },
                ContentBlock::Heading2 {
                    text: "Checklist".into(),
                },
                ContentBlock::ToDo {
                    text: "Complete assignment".into(),
                    checked: false,
                },
            ],
        }
    }
}

fn number_or_zero(value: &Option<Number>) -> Number {
    value.clone().unwrap_or_else(|| Number::from(0))
}
