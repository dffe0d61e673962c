use super::ExportResult;
use crate::Assignment;
use crate::source::PlatformConfig;
use crate::transform::{SHEET_COLUMNS, SheetsExport, sheets::cell_text};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use tracing::debug;

#[derive(Deserialize)]
struct AssignmentDocument {
    assignments: Vec<Value>,
}

#[derive(Serialize, Deserialize)]
struct PlatformDocument {
    platforms: Vec<PlatformConfig>,
}

fn read_json<T, P>(path: P) -> ExportResult<T>
where
    T: for<'de> Deserialize<'de>,
    P: AsRef<Path>,
{
    let file = File::open(path.as_ref())?;
    let value = serde_json::from_reader(BufReader::new(file))?;
    debug!(path = %path.as_ref().display(), "read json document");
    Ok(value)
}

fn create_parent_dirs(path: &Path) -> ExportResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}

/// Reads a `{"assignments": [...]}` document. Each record keeps its
/// original JSON for [`save_assignments_to_json`].
pub fn load_assignments_from_json<P: AsRef<Path>>(path: P) -> ExportResult<Vec<Assignment>> {
    let document: AssignmentDocument = read_json(path)?;
    let assignments = document
        .assignments
        .into_iter()
        .map(Assignment::from_value)
        .collect::<Result<_, _>>()?;
    Ok(assignments)
}

/// Reads a `{"platforms": [...]}` document.
pub fn load_platforms_from_json<P: AsRef<Path>>(path: P) -> ExportResult<Vec<PlatformConfig>> {
    let document: PlatformDocument = read_json(path)?;
    Ok(document.platforms)
}

pub fn load_template<P: AsRef<Path>>(path: P) -> ExportResult<Value> {
    read_json(path)
}

/// Pretty-prints `value` as UTF-8 JSON with two-space indentation,
/// creating parent directories as needed.
pub fn write_json_document<T, P>(value: &T, path: P) -> ExportResult<()>
where
    T: Serialize + ?Sized,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    create_parent_dirs(path)?;
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, value)?;
    writer.flush()?;
    debug!(path = %path.display(), "wrote json document");
    Ok(())
}

/// Writes the assignment list as a bare JSON array of the records as they
/// were read, unknown keys and original value types included.
pub fn save_assignments_to_json<P: AsRef<Path>>(
    assignments: &[Assignment],
    path: P,
) -> ExportResult<()> {
    let records = assignments
        .iter()
        .map(Assignment::to_raw_value)
        .collect::<Result<Vec<_>, _>>()?;
    write_json_document(&records, path)
}

pub fn save_sheet_to_csv<P: AsRef<Path>>(export: &SheetsExport, path: P) -> ExportResult<()> {
    let path = path.as_ref();
    create_parent_dirs(path)?;
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(SHEET_COLUMNS)?;
    for row in &export.rows {
        writer.write_record(row.iter().map(cell_text))?;
    }
    writer.flush()?;
    Ok(())
}
