use assignment_export::{
    Assignment, Bucket, FixedClock, SHEET_COLUMNS, Transformer,
    transform::ContentBlock,
};
use chrono::{DateTime, FixedOffset, TimeDelta, TimeZone, Utc};
use serde_json::{Value, json};

fn now() -> DateTime<FixedOffset> {
    Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap().fixed_offset()
}

fn transformer() -> Transformer<FixedClock> {
    Transformer::with_clock(FixedClock::new(now()))
}

fn due_in(days: i64) -> Option<String> {
    Some((now() + TimeDelta::days(days)).to_rfc3339())
}

fn assignment(id: &str, due_days: Option<i64>, priority: Option<&str>) -> Assignment {
    let mut a = Assignment::new(id);
    a.class_code = Some("CS101".into());
    a.title = Some(format!("Task {id}"));
    a.kind = Some("homework".into());
    a.due_date = due_days.and_then(due_in);
    a.priority = priority.map(str::to_string);
    a
}

fn sample() -> Vec<Assignment> {
    vec![
        assignment("A1", Some(1), Some("low")),
        assignment("A2", Some(30), Some("critical")),
        assignment("A3", Some(10), Some("medium")),
        assignment("A4", None, Some("high")),
        assignment("A5", Some(-2), None),
        assignment("A6", Some(3), Some("medium")),
    ]
}

fn bucket_ids(t: &Transformer<FixedClock>, input: &[Assignment], bucket: Bucket) -> Vec<String> {
    t.to_todo(input)
        .bucket(bucket)
        .iter()
        .map(|task| task.task_id.trim_start_matches("task_").to_string())
        .collect()
}

#[test]
fn sheets_has_one_thirteen_column_row_per_assignment_in_order() {
    let input = sample();
    let sheets = transformer().to_sheets(&input);
    assert_eq!(sheets.len(), input.len());
    for (row, a) in sheets.rows.iter().zip(&input) {
        assert_eq!(row.len(), SHEET_COLUMNS.len());
        assert_eq!(row[0], json!(a.id));
    }
}

#[test]
fn sheets_renders_missing_fields_as_empty_strings() {
    let mut a = Assignment::new("X1");
    a.points_possible = Some(50.into());
    let sheets = transformer().to_sheets(&[a]);
    let row = &sheets.rows[0];
    assert_eq!(row[1], json!(""));
    assert_eq!(row[7], json!(""));
    assert_eq!(row[8], Value::Null, "unknown days until due renders null");
    assert_eq!(row[10], json!(50));
    assert_eq!(row[11], json!(""));
    assert!(
        row.iter()
            .enumerate()
            .all(|(index, cell)| index == 8 || !cell.is_null())
    );
}

#[test]
fn sheets_includes_days_until_due() {
    let sheets = transformer().to_sheets(&[assignment("A1", Some(5), None)]);
    assert_eq!(sheets.rows[0][8], json!(5));
}

#[test]
fn notion_pages_follow_input_with_synthesized_ids() {
    let input = sample();
    let notion = transformer().to_notion(&input);
    assert_eq!(notion.len(), input.len());
    for (page, a) in notion.pages.iter().zip(&input) {
        assert_eq!(page.page_id, format!("page_{}", a.id));
        assert_eq!(page.properties.assignment_id, a.id);
    }
}

#[test]
fn notion_defaults_numbers_to_zero_and_text_to_empty() {
    let mut a = Assignment::new("N1");
    a.description = Some("Read chapter 4".into());
    let notion = transformer().to_notion(&[a]);
    let page = serde_json::to_value(&notion.pages[0]).unwrap();

    assert_eq!(page["properties"]["Points"], json!(0));
    assert_eq!(page["properties"]["Estimated Hours"], json!(0));
    assert_eq!(page["properties"]["Class"], json!(""));
    assert_eq!(page["properties"]["Tags"], json!([]));
    assert_eq!(
        page["content"],
        json!([
            { "type": "heading_2", "text": "Description" },
            { "type": "paragraph", "text": "Read chapter 4" },
            { "type": "heading_2", "text": "Checklist" },
            { "type": "to_do", "text": "Complete assignment", "checked": false }
        ])
    );
    assert_eq!(
        notion.pages[0].content[3],
        ContentBlock::ToDo {
            text: "Complete assignment".into(),
            checked: false
        }
    );
}

#[test]
fn notion_property_keys_keep_declared_order() {
    let notion = transformer().to_notion(&[Assignment::new("N2")]);
    let page = serde_json::to_value(&notion.pages[0]).unwrap();
    let keys: Vec<&str> = page["properties"]
        .as_object()
        .unwrap()
        .keys()
        .map(String::as_str)
        .collect();
    assert_eq!(
        keys,
        [
            "Assignment ID",
            "Title",
            "Class",
            "Type",
            "Status",
            "Priority",
            "Assigned Date",
            "Due Date",
            "Points",
            "Estimated Hours",
            "URL",
            "Tags"
        ]
    );
}

#[test]
fn todo_buckets_partition_the_input() {
    let input = sample();
    let t = transformer();
    let todo = t.to_todo(&input);
    assert_eq!(todo.len(), input.len());

    let mut seen: Vec<String> = Bucket::ALL
        .into_iter()
        .flat_map(|b| bucket_ids(&t, &input, b))
        .collect();
    seen.sort();
    let mut expected: Vec<String> = input.iter().map(|a| a.id.clone()).collect();
    expected.sort();
    assert_eq!(seen, expected);
}

#[test]
fn todo_categorization_rules() {
    let input = sample();
    let t = transformer();
    assert_eq!(bucket_ids(&t, &input, Bucket::Urgent), ["A1", "A5", "A6"]);
    assert_eq!(bucket_ids(&t, &input, Bucket::Important), ["A2", "A4"]);
    assert_eq!(bucket_ids(&t, &input, Bucket::Regular), ["A3"]);
}

#[test]
fn boundary_between_urgent_and_important() {
    let t = transformer();
    assert_eq!(t.categorize(&assignment("B3", Some(3), Some("high"))), Bucket::Urgent);
    assert_eq!(t.categorize(&assignment("B4", Some(4), Some("high"))), Bucket::Important);
    assert_eq!(t.categorize(&assignment("B10", Some(10), Some("medium"))), Bucket::Regular);
}

#[test]
fn malformed_due_date_falls_through_to_priority() {
    let t = transformer();
    let mut a = assignment("M1", None, Some("critical"));
    a.due_date = Some("sometime soon".into());
    assert_eq!(t.categorize(&a), Bucket::Important);
    a.priority = Some("low".into());
    assert_eq!(t.categorize(&a), Bucket::Regular);
}

#[test]
fn todo_task_shape() {
    let mut a = assignment("T1", Some(20), None);
    a.estimated_hours = Some(serde_json::Number::from_f64(2.5).unwrap());
    a.url = Some("https://lms.example.edu/t1".into());
    let todo = transformer().to_todo(&[a]);
    let task = serde_json::to_value(&todo.bucket(Bucket::Regular)[0]).unwrap();

    assert_eq!(task["task_id"], json!("task_T1"));
    assert_eq!(task["title"], json!("CS101: Task T1"));
    assert_eq!(task["priority"], json!("medium"));
    assert_eq!(task["estimated_time"], json!("2.5 hours"));
    assert_eq!(task["tags"], json!(["homework", "CS101"]));
    assert_eq!(task["url"], json!("https://lms.example.edu/t1"));
    let checklist: Vec<&Value> = task["checklist"].as_array().unwrap().iter().collect();
    assert_eq!(checklist.len(), 3);
    assert_eq!(checklist[0]["item"], json!("Start assignment"));
    assert_eq!(checklist[2]["item"], json!("Submit assignment"));
    assert!(checklist.iter().all(|c| c["completed"] == json!(false)));
}

#[test]
fn todo_task_defaults_for_sparse_assignment() {
    let todo = transformer().to_todo(&[Assignment::new("S1")]);
    let task = &todo.bucket(Bucket::Regular)[0];
    assert_eq!(task.title, ": ");
    assert_eq!(task.estimated_time, "0 hours");
    assert_eq!(task.tags, ["", ""]);
}

#[test]
fn transformation_is_deterministic_with_a_frozen_clock() {
    let input = sample();
    let t = transformer();
    let first = serde_json::to_string(&t.to_todo(&input)).unwrap();
    let second = serde_json::to_string(&t.to_todo(&input)).unwrap();
    assert_eq!(first, second);
    assert_eq!(t.to_sheets(&input), t.to_sheets(&input));
}
