use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::data::model::Value;
use crate::stats::DerivedStats;

#[derive(Debug, Error, PartialEq)]
pub enum FormatError {
    #[error("no value for column key '{0}'")]
    UnknownKey(String),

    #[error("column '{key}' expects a number, got '{value}'")]
    NotNumeric { key: String, value: String },
}

// ---------------------------------------------------------------------------
// ColumnSpec – how one column is rendered
// ---------------------------------------------------------------------------

/// Rendering type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnKind {
    #[serde(rename = "d")]
    Integer,
    #[serde(rename = "f")]
    Float,
    #[serde(rename = "s")]
    String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSpec {
    /// Key into [`DerivedStats`].
    pub key: String,
    pub kind: ColumnKind,
    pub width: usize,
    /// Fixed-point digits; ignored unless `kind` is `Float`.
    #[serde(default)]
    pub decimals: usize,
    /// Extra width given to the header label only.
    #[serde(default)]
    pub header_padding: usize,
    /// Literal text printed after the value.
    #[serde(default)]
    pub suffix: String,
}

impl ColumnSpec {
    pub fn new(key: &str, kind: ColumnKind, width: usize) -> Self {
        ColumnSpec {
            key: key.to_string(),
            kind,
            width,
            decimals: 0,
            header_padding: 0,
            suffix: String::new(),
        }
    }

    pub fn decimals(mut self, decimals: usize) -> Self {
        self.decimals = decimals;
        self
    }

    pub fn header_padding(mut self, padding: usize) -> Self {
        self.header_padding = padding;
        self
    }

    pub fn suffix(mut self, suffix: &str) -> Self {
        self.suffix = suffix.to_string();
        self
    }

    /// Render a value right-aligned in `width`, without the suffix.
    pub fn render(&self, value: &Value) -> Result<String, FormatError> {
        let width = self.width;
        let text = match self.kind {
            ColumnKind::Integer => match value {
                Value::Integer(i) => i.to_string(),
                // Fractions are dropped toward zero.
                Value::Float(v) if v.is_finite() => (v.trunc() as i64).to_string(),
                Value::Float(v) => v.to_string(),
                Value::String(_) => return Err(self.not_numeric(value)),
            },
            ColumnKind::Float => {
                let v = value.as_f64().ok_or_else(|| self.not_numeric(value))?;
                let sign = if v < 0.0 { '-' } else { ' ' };
                format!("{sign}{:.prec$}", v.abs(), prec = self.decimals)
            }
            ColumnKind::String => value.to_string(),
        };
        Ok(format!("{text:>width$}"))
    }

    fn not_numeric(&self, value: &Value) -> FormatError {
        FormatError::NotNumeric {
            key: self.key.clone(),
            value: value.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// TableFormat – the full column layout
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableFormat {
    pub columns: Vec<ColumnSpec>,
    pub separator: String,
}

impl TableFormat {
    pub fn new(columns: Vec<ColumnSpec>, separator: &str) -> Self {
        TableFormat {
            columns,
            separator: separator.to_string(),
        }
    }

    /// Total printed width of the header row, and of every data row
    /// whose suffixes fill the header padding.
    pub fn table_width(&self) -> usize {
        let cells: usize = self.columns.iter().map(|c| c.width + c.header_padding).sum();
        let gaps = self.columns.len().saturating_sub(1);
        cells + self.separator.chars().count() * gaps
    }

    pub fn header_line(&self, headers: &BTreeMap<String, String>) -> String {
        self.columns
            .iter()
            .map(|c| {
                let label = headers.get(&c.key).map(String::as_str).unwrap_or("");
                let width = c.width + c.header_padding;
                format!("{label:>width$}")
            })
            .collect::<Vec<_>>()
            .join(&self.separator)
    }

    pub fn divider_line(&self) -> String {
        "-".repeat(self.table_width())
    }

    pub fn row_line(&self, stats: &DerivedStats) -> Result<String, FormatError> {
        let cells = self
            .columns
            .iter()
            .map(|c| -> Result<String, FormatError> {
                let value = stats
                    .get(&c.key)
                    .ok_or_else(|| FormatError::UnknownKey(c.key.clone()))?;
                Ok(format!("{}{}", c.render(&value)?, c.suffix))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(cells.join(&self.separator))
    }

    /// Blank line, centered title, blank line, header row, divider.
    pub fn render_header(&self, title: &str, headers: &BTreeMap<String, String>) -> Vec<String> {
        vec![
            String::new(),
            center_title(title, self.table_width()),
            String::new(),
            self.header_line(headers),
            self.divider_line(),
        ]
    }
}

/// Pad `title` to `width`, with the odd space going to the left.
pub fn center_title(title: &str, width: usize) -> String {
    let spaces = width.saturating_sub(title.chars().count());
    let right = spaces / 2;
    let left = spaces - right;
    format!("{}{title}{}", " ".repeat(left), " ".repeat(right))
}
