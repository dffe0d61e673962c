use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Number, Value};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Priority {
    Critical,
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Critical => "critical",
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }

    /// Critical and high priorities are promoted to the "important" bucket.
    pub fn is_important(self) -> bool {
        matches!(self, Priority::Critical | Priority::High)
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "critical" => Ok(Priority::Critical),
            "high" => Ok(Priority::High),
            "medium" => Ok(Priority::Medium),
            "low" => Ok(Priority::Low),
            other => Err(format!("unknown priority '{other}'")),
        }
    }
}

/// A single piece of coursework as scraped from a platform.
///
/// Only `id` is relied on for derived names. Every other field is optional
/// and decoding never fails on a malformed value: strings accept numbers and
/// booleans as text, numbers accept numeric strings, anything else is absent.
///
/// Records built with [`Assignment::from_value`] also keep the JSON object
/// they were decoded from, so the raw export can reproduce it untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    #[serde(
        rename = "assignment_id",
        alias = "id",
        default,
        deserialize_with = "lenient_id"
    )]
    pub id: String,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub class_code: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(
        rename = "type",
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub kind: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub assigned_date: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    #[serde(default, deserialize_with = "lenient_number", skip_serializing_if = "Option::is_none")]
    pub points_possible: Option<Number>,
    #[serde(default, deserialize_with = "lenient_number", skip_serializing_if = "Option::is_none")]
    pub estimated_hours: Option<Number>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip)]
    pub raw: Option<Value>,
}

impl Assignment {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// Decodes a record and remembers the original JSON alongside it.
    pub fn from_value(value: Value) -> serde_json::Result<Self> {
        let mut assignment: Assignment = serde_json::from_value(value.clone())?;
        assignment.raw = Some(value);
        Ok(assignment)
    }

    /// The record as it was read, or the typed fields when there is no
    /// original to fall back on.
    pub fn to_raw_value(&self) -> serde_json::Result<Value> {
        match &self.raw {
            Some(raw) => Ok(raw.clone()),
            None => serde_json::to_value(self),
        }
    }

    pub fn class_code(&self) -> &str {
        text(&self.class_code)
    }

    pub fn class_name(&self) -> &str {
        text(&self.class_name)
    }

    pub fn title(&self) -> &str {
        text(&self.title)
    }

    pub fn kind(&self) -> &str {
        text(&self.kind)
    }

    pub fn status(&self) -> &str {
        text(&self.status)
    }

    pub fn assigned_date(&self) -> &str {
        text(&self.assigned_date)
    }

    pub fn due_date(&self) -> &str {
        text(&self.due_date)
    }

    pub fn priority(&self) -> &str {
        text(&self.priority)
    }

    pub fn url(&self) -> &str {
        text(&self.url)
    }

    pub fn description(&self) -> &str {
        text(&self.description)
    }

    /// The recognised priority level, if the raw string names one.
    pub fn priority_level(&self) -> Option<Priority> {
        self.priority.as_deref().and_then(|p| p.parse().ok())
    }
}

fn text(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("")
}

fn scalar_to_string(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn lenient_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(scalar_to_string(Value::deserialize(deserializer)?).unwrap_or_default())
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(scalar_to_string(Value::deserialize(deserializer)?))
}

fn lenient_number<'de, D>(deserializer: D) -> Result<Option<Number>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => Some(n),
        Value::String(s) => parse_number(s.trim()),
        _ => None,
    })
}

fn parse_number(s: &str) -> Option<Number> {
    if let Ok(int) = s.parse::<i64>() {
        return Some(Number::from(int));
    }
    s.parse::<f64>().ok().and_then(Number::from_f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_full_record() {
        let a: Assignment = serde_json::from_value(json!({
            "assignment_id": "CS101-HW3",
            "class_code": "CS101",
            "class_name": "Intro to CS",
            "title": "Linked Lists",
            "type": "homework",
            "status": "not_started",
            "due_date": "2025-03-01T23:59:00Z",
            "priority": "high",
            "points_possible": 100,
            "estimated_hours": 2.5,
            "url": "https://canvas.example.edu/a/3"
        }))
        .unwrap();
        assert_eq!(a.id, "CS101-HW3");
        assert_eq!(a.kind(), "homework");
        assert_eq!(a.priority_level(), Some(Priority::High));
        assert_eq!(a.points_possible, Some(Number::from(100)));
        assert_eq!(a.description(), "");
    }

    #[test]
    fn malformed_fields_fall_back_instead_of_failing() {
        let a: Assignment = serde_json::from_value(json!({
            "id": 42,
            "title": ["not", "a", "string"],
            "points_possible": "ten",
            "estimated_hours": "3",
            "priority": "URGENT!!",
            "status": true
        }))
        .unwrap();
        assert_eq!(a.id, "42");
        assert_eq!(a.title, None);
        assert_eq!(a.points_possible, None);
        assert_eq!(a.estimated_hours, Some(Number::from(3)));
        assert_eq!(a.priority(), "URGENT!!");
        assert_eq!(a.priority_level(), None);
        assert_eq!(a.status(), "true");
    }

    #[test]
    fn missing_id_defaults_to_empty() {
        let a: Assignment = serde_json::from_value(json!({ "title": "Essay" })).unwrap();
        assert_eq!(a.id, "");
        assert_eq!(a.title(), "Essay");
    }

    #[test]
    fn from_value_keeps_the_original_record() {
        let record = json!({
            "id": "A1",
            "points_possible": "12",
            "status": true,
            "submission_type": "online",
            "rubric": { "max": 10 }
        });
        let a = Assignment::from_value(record.clone()).unwrap();
        assert_eq!(a.id, "A1");
        assert_eq!(a.points_possible, Some(Number::from(12)));
        assert_eq!(a.status(), "true");
        assert_eq!(a.to_raw_value().unwrap(), record);
    }

    #[test]
    fn typed_records_serialize_their_fields() {
        let mut a = Assignment::new("A2");
        a.title = Some("Essay".into());
        assert_eq!(
            a.to_raw_value().unwrap(),
            json!({ "assignment_id": "A2", "title": "Essay" })
        );
    }

    #[test]
    fn only_critical_and_high_are_important() {
        assert!(Priority::Critical.is_important());
        assert!(Priority::High.is_important());
        assert!(!Priority::Medium.is_important());
        assert!(!Priority::Low.is_important());
        assert!("High".parse::<Priority>().is_err());
    }
}
