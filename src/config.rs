use crate::persistence::{ExportError, ExportResult};
use crate::template::TemplateKind;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// One path per export kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KindPaths {
    pub sheets: PathBuf,
    pub notion: PathBuf,
    pub todo: PathBuf,
}

impl KindPaths {
    pub fn get(&self, kind: TemplateKind) -> &Path {
        match kind {
            TemplateKind::Sheets => &self.sheets,
            TemplateKind::Notion => &self.notion,
            TemplateKind::Todo => &self.todo,
        }
    }
}

/// Every file the export touches. Fields missing from a config file keep
/// their default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub assignments_path: PathBuf,
    pub templates: KindPaths,
    pub outputs: KindPaths,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignments_output: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sheets_csv_output: Option<PathBuf>,
}

impl Default for ExportConfig {
    fn default() -> Self {
        let template_dir = Path::new("template_data");
        Self {
            assignments_path: template_dir.join("assignments.json"),
            templates: KindPaths {
                sheets: template_dir.join(TemplateKind::Sheets.file_name()),
                notion: template_dir.join(TemplateKind::Notion.file_name()),
                todo: template_dir.join(TemplateKind::Todo.file_name()),
            },
            outputs: KindPaths {
                sheets: PathBuf::from("data/google_sheets_export.json"),
                notion: PathBuf::from("data/notion_export.json"),
                todo: PathBuf::from("data/todo_export.json"),
            },
            assignments_output: None,
            sheets_csv_output: None,
        }
    }
}

impl ExportConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> ExportResult<Self> {
        let file = File::open(path)?;
        let config: Self = serde_json::from_reader(BufReader::new(file))?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects empty paths and outputs that would overwrite each other.
    pub fn validate(&self) -> ExportResult<()> {
        if self.assignments_path.as_os_str().is_empty() {
            return Err(ExportError::Config("assignments_path is empty".into()));
        }
        for kind in TemplateKind::ALL {
            if self.templates.get(kind).as_os_str().is_empty() {
                return Err(ExportError::Config(format!("{kind} template path is empty")));
            }
            if self.outputs.get(kind).as_os_str().is_empty() {
                return Err(ExportError::Config(format!("{kind} output path is empty")));
            }
        }

        let mut seen = HashSet::new();
        let outputs = TemplateKind::ALL
            .into_iter()
            .map(|kind| self.outputs.get(kind))
            .chain(self.assignments_output.as_deref())
            .chain(self.sheets_csv_output.as_deref());
        for output in outputs {
            if !seen.insert(output) {
                return Err(ExportError::Config(format!(
                    "output path {} is used more than once",
                    output.display()
                )));
            }
        }
        Ok(())
    }
}
