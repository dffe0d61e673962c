pub mod assignment;
pub mod config;
pub mod due_date;
pub mod export;
pub mod persistence;
pub mod source;
pub mod template;
pub mod transform;

pub use assignment::{Assignment, Priority};
pub use config::{ExportConfig, KindPaths};
pub use due_date::{Clock, DueDate, DueInstant, FixedClock, SystemClock, days_until_due};
pub use export::{ExportSummary, export_all, export_assignments};
pub use persistence::{
    ExportError, ExportResult, load_assignments_from_json, load_platforms_from_json,
    load_template, save_assignments_to_json, save_sheet_to_csv, write_json_document,
};
pub use source::{
    AssignmentSource, JsonFileSource, PlatformConfig, PlatformKind, PlatformSource,
    platform_source, scrape_all,
};
pub use template::{TemplateKind, fill_notion, fill_sheets, fill_todo};
pub use transform::{
    Bucket, NotionExport, SHEET_COLUMNS, SheetsExport, TodoExport, Transformer,
    URGENT_WITHIN_DAYS,
};
