use crate::Assignment;
use crate::config::ExportConfig;
use crate::due_date::Clock;
use crate::persistence::{
    ExportResult, load_template, save_assignments_to_json, save_sheet_to_csv, write_json_document,
};
use crate::source::{AssignmentSource, JsonFileSource};
use crate::template::{TemplateKind, fill_notion, fill_sheets, fill_todo};
use crate::transform::{Bucket, Transformer};
use serde::Serialize;
use tracing::info;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ExportSummary {
    pub assignments: usize,
    pub urgent: usize,
    pub important: usize,
    pub regular: usize,
}

/// Loads the configured assignment file and writes all three exports.
pub fn export_all<C: Clock>(config: &ExportConfig, clock: C) -> ExportResult<ExportSummary> {
    config.validate()?;
    let assignments = JsonFileSource::new(&config.assignments_path).fetch()?;
    export_assignments(config, &assignments, clock)
}

/// Fills every template from `assignments` and writes the results.
///
/// All templates are read before anything is written, so a missing template
/// leaves the output directory untouched.
pub fn export_assignments<C: Clock>(
    config: &ExportConfig,
    assignments: &[Assignment],
    clock: C,
) -> ExportResult<ExportSummary> {
    let sheets_template = load_template(config.templates.get(TemplateKind::Sheets))?;
    let notion_template = load_template(config.templates.get(TemplateKind::Notion))?;
    let todo_template = load_template(config.templates.get(TemplateKind::Todo))?;

    let transformer = Transformer::with_clock(clock);

    let sheets = transformer.to_sheets(assignments);
    let sheets_path = config.outputs.get(TemplateKind::Sheets);
    write_json_document(&fill_sheets(sheets_template, &sheets)?, sheets_path)?;
    info!(path = %sheets_path.display(), rows = sheets.len(), "exported sheets format");

    let notion = transformer.to_notion(assignments);
    let notion_path = config.outputs.get(TemplateKind::Notion);
    write_json_document(&fill_notion(notion_template, &notion)?, notion_path)?;
    info!(path = %notion_path.display(), pages = notion.len(), "exported notion format");

    let todo = transformer.to_todo(assignments);
    let todo_path = config.outputs.get(TemplateKind::Todo);
    write_json_document(&fill_todo(todo_template, &todo)?, todo_path)?;
    info!(path = %todo_path.display(), tasks = todo.len(), "exported todo format");

    if let Some(path) = &config.assignments_output {
        save_assignments_to_json(assignments, path)?;
        info!(path = %path.display(), count = assignments.len(), "exported raw assignments");
    }
    if let Some(path) = &config.sheets_csv_output {
        save_sheet_to_csv(&sheets, path)?;
        info!(path = %path.display(), rows = sheets.len(), "exported sheets csv");
    }

    Ok(ExportSummary {
        assignments: assignments.len(),
        urgent: todo.bucket(Bucket::Urgent).len(),
        important: todo.bucket(Bucket::Important).len(),
        regular: todo.bucket(Bucket::Regular).len(),
    })
}
