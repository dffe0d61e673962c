use crate::Assignment;
use crate::persistence::{ExportResult, load_assignments_from_json};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use tracing::{info, warn};

/// Anything that can produce an ordered list of assignments.
pub trait AssignmentSource {
    fn describe(&self) -> String;
    fn fetch(&self) -> ExportResult<Vec<Assignment>>;
}

/// Reads a `{"assignments": [...]}` document from disk.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl AssignmentSource for JsonFileSource {
    fn describe(&self) -> String {
        format!("json file {}", self.path.display())
    }

    fn fetch(&self) -> ExportResult<Vec<Assignment>> {
        let assignments = load_assignments_from_json(&self.path)?;
        info!(
            source = %self.describe(),
            count = assignments.len(),
            "loaded assignments"
        );
        Ok(assignments)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PlatformKind {
    Canvas,
    Moodle,
    Blackboard,
    Unknown(String),
}

impl PlatformKind {
    pub fn as_str(&self) -> &str {
        match self {
            PlatformKind::Canvas => "Canvas",
            PlatformKind::Moodle => "Moodle",
            PlatformKind::Blackboard => "Blackboard",
            PlatformKind::Unknown(raw) => raw,
        }
    }
}

impl From<String> for PlatformKind {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Canvas" => PlatformKind::Canvas,
            "Moodle" => PlatformKind::Moodle,
            "Blackboard" => PlatformKind::Blackboard,
            _ => PlatformKind::Unknown(value),
        }
    }
}

impl From<PlatformKind> for String {
    fn from(value: PlatformKind) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for PlatformKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformConfig {
    pub platform_type: PlatformKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub base_url: String,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

/// Placeholder scraper for a known platform.
///
/// Authentication, pagination and parsing are not implemented; fetching
/// logs the attempt and yields nothing.
#[derive(Debug, Clone)]
pub struct PlatformSource {
    kind: PlatformKind,
    base_url: String,
}

impl AssignmentSource for PlatformSource {
    fn describe(&self) -> String {
        format!("{} at {}", self.kind, self.base_url)
    }

    fn fetch(&self) -> ExportResult<Vec<Assignment>> {
        let missing = match self.kind {
            PlatformKind::Canvas => "OAuth2 and the courses/assignments API",
            PlatformKind::Moodle => "token auth and the web service API",
            PlatformKind::Blackboard => "browser login and page parsing",
            PlatformKind::Unknown(_) => "a scraper",
        };
        warn!(platform = %self.kind, "scraping requires {missing}, which is not implemented");
        Ok(Vec::new())
    }
}

/// Picks the scraper for a platform type, or `None` when the type is unknown.
pub fn platform_source(config: &PlatformConfig) -> Option<Box<dyn AssignmentSource>> {
    match &config.platform_type {
        PlatformKind::Unknown(_) => None,
        kind => Some(Box::new(PlatformSource {
            kind: kind.clone(),
            base_url: config.base_url.clone(),
        })),
    }
}

/// Scrapes every enabled platform in order and concatenates the results.
pub fn scrape_all(platforms: &[PlatformConfig]) -> ExportResult<Vec<Assignment>> {
    let mut assignments = Vec::new();
    for platform in platforms {
        if !platform.enabled {
            info!(platform = %platform.platform_type, "skipping disabled platform");
            continue;
        }
        match platform_source(platform) {
            Some(source) => {
                info!(source = %source.describe(), "scraping platform");
                let found = source.fetch()?;
                info!(source = %source.describe(), count = found.len(), "scraped platform");
                assignments.extend(found);
            }
            None => warn!(platform = %platform.platform_type, "unknown platform type"),
        }
    }
    info!(total = assignments.len(), "scraped all platforms");
    Ok(assignments)
}
