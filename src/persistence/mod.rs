use crate::template::TemplateKind;
use serde_json::Error as SerdeJsonError;
use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("serialization error: {0}")]
    Serialization(#[from] SerdeJsonError),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("{kind} template is missing its slot: {reason}")]
    TemplateShape { kind: TemplateKind, reason: String },
    #[error("invalid config: {0}")]
    Config(String),
}

impl ExportError {
    pub(crate) fn template_shape(kind: TemplateKind, reason: impl Into<String>) -> Self {
        Self::TemplateShape {
            kind,
            reason: reason.into(),
        }
    }
}

pub type ExportResult<T> = Result<T, ExportError>;

pub mod file;

pub use file::{
    load_assignments_from_json, load_platforms_from_json, load_template, save_assignments_to_json,
    save_sheet_to_csv, write_json_document,
};
