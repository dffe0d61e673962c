use crate::Assignment;
use crate::due_date::{Clock, DueDate, SystemClock};
use chrono::{DateTime, FixedOffset};

pub mod notion;
pub mod sheets;
pub mod todo;

pub use notion::{ContentBlock, NotionExport, NotionPage, NotionProperties};
pub use sheets::{SHEET_COLUMNS, SheetRow, SheetsExport};
pub use todo::{Bucket, ChecklistItem, TodoExport, TodoTask};

/// Assignments due within this many days (inclusive) are urgent.
pub const URGENT_WITHIN_DAYS: i64 = 3;

/// Reshapes assignments into the three export views.
///
/// Every operation is a pure function of its input and the clock reading.
/// The clock is read once per call so all rows of one export share a "now".
#[derive(Debug, Clone, Default)]
pub struct Transformer<C = SystemClock> {
    clock: C,
}

impl Transformer<SystemClock> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<C: Clock> Transformer<C> {
    pub fn with_clock(clock: C) -> Self {
        Self { clock }
    }

    pub fn derive_days_until_due(&self, due_date: Option<&str>) -> Option<i64> {
        DueDate::parse(due_date).days_until(self.clock.now())
    }

    pub fn categorize(&self, assignment: &Assignment) -> Bucket {
        categorize_at(assignment, self.clock.now())
    }

    pub fn to_sheets(&self, assignments: &[Assignment]) -> SheetsExport {
        let now = self.clock.now();
        let rows = assignments
            .iter()
            .map(|a| sheets::sheet_row(a, days_until(a, now)))
            .collect();
        SheetsExport { rows }
    }

    pub fn to_notion(&self, assignments: &[Assignment]) -> NotionExport {
        NotionExport {
            pages: assignments.iter().map(NotionPage::from).collect(),
        }
    }

    pub fn to_todo(&self, assignments: &[Assignment]) -> TodoExport {
        let now = self.clock.now();
        let mut export = TodoExport::default();
        for assignment in assignments {
            export.push(categorize_at(assignment, now), TodoTask::from(assignment));
        }
        export
    }
}

fn days_until(assignment: &Assignment, now: DateTime<FixedOffset>) -> Option<i64> {
    DueDate::parse(assignment.due_date.as_deref()).days_until(now)
}

fn categorize_at(assignment: &Assignment, now: DateTime<FixedOffset>) -> Bucket {
    match days_until(assignment, now) {
        Some(days) if days <= URGENT_WITHIN_DAYS => Bucket::Urgent,
        _ if assignment.priority_level().is_some_and(|p| p.is_important()) => Bucket::Important,
        _ => Bucket::Regular,
    }
}
