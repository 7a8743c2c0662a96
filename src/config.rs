use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::stats::STAT_KEYS;
use crate::table::{ColumnKind, ColumnSpec, TableFormat};

pub const DEFAULT_DATA_FILE: &str = "data/data.csv";
pub const DEFAULT_CONFIG_FILE: &str = "report.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("reading {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parsing {}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("table has no columns")]
    NoColumns,

    #[error("unknown column key '{0}'")]
    UnknownKey(String),

    #[error("header '{0}' does not name a column")]
    OrphanHeader(String),
}

// ---------------------------------------------------------------------------
// ReportConfig
// ---------------------------------------------------------------------------

/// Everything the report needs besides the data itself. Built once and
/// shared by reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub title: String,
    /// Column key → header label.
    pub headers: BTreeMap<String, String>,
    pub table: TableFormat,
    pub data_file: PathBuf,
    /// Only rows in this OSPAN group are printed; `None` prints every row.
    pub group: Option<String>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        let headers = [
            ("subj", "Subject"),
            ("ospan", "OSPAN Group"),
            ("avg", "Dist. Avg."),
            ("diff", "Dist. Diff."),
            ("perc", "Dist. % Diff."),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        let table = TableFormat::new(
            vec![
                ColumnSpec::new("subj", ColumnKind::Integer, 7),
                ColumnSpec::new("ospan", ColumnKind::String, 11),
                ColumnSpec::new("avg", ColumnKind::Float, 10).decimals(2),
                ColumnSpec::new("diff", ColumnKind::Float, 11).decimals(2),
                ColumnSpec::new("perc", ColumnKind::Float, 13)
                    .decimals(2)
                    .header_padding(2)
                    .suffix(" %"),
            ],
            " | ",
        );

        Self {
            title: "Distracter EEG response characteristics".to_string(),
            headers,
            table,
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            group: Some("High".to_string()),
        }
    }
}

impl ReportConfig {
    pub fn from_json(text: &str, path: &Path) -> Result<Self, ConfigError> {
        let config: ReportConfig =
            serde_json::from_str(text).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Read `path` if it exists, otherwise fall back to the built-in table.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            log::debug!("{} not found, using built-in report layout", path.display());
            return Ok(Self::default());
        }
        log::debug!("loading report layout from {}", path.display());
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text, path)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.table.columns.is_empty() {
            return Err(ConfigError::NoColumns);
        }
        if let Some(col) = self
            .table
            .columns
            .iter()
            .find(|c| !STAT_KEYS.contains(&c.key.as_str()))
        {
            return Err(ConfigError::UnknownKey(col.key.clone()));
        }
        if let Some(key) = self
            .headers
            .keys()
            .find(|k| !self.table.columns.iter().any(|c| &c.key == *k))
        {
            return Err(ConfigError::OrphanHeader(key.clone()));
        }
        Ok(())
    }
}
