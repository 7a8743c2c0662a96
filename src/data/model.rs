use std::fmt;
use std::sync::Arc;

use thiserror::Error;

// ---------------------------------------------------------------------------
// Column names the report depends on
// ---------------------------------------------------------------------------

pub const COL_SUBJECT: &str = "Subject";
pub const COL_GROUP: &str = "OSPAN_Group";
pub const COL_SCORE: &str = "OSPAN_Score";
pub const COL_EASY: &str = "Distracter_easy";
pub const COL_HARD: &str = "Distracter_hard";

/// Every column a [`SubjectRow`] is built from.
pub const REQUIRED_COLUMNS: [&str; 5] = [COL_SUBJECT, COL_GROUP, COL_SCORE, COL_EASY, COL_HARD];

// ---------------------------------------------------------------------------
// Value – a single CSV cell after numeric coercion
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    Integer(i64),
    Float(f64),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => write!(f, "{s}"),
            Value::Integer(i) => write!(f, "{i}"),
            Value::Float(v) => write!(f, "{v}"),
        }
    }
}

impl Value {
    /// Integer if the text parses as one, then a finite float, otherwise
    /// the raw text. `nan`, `inf` and overflowing exponents stay strings.
    pub fn coerce(s: &str) -> Self {
        if let Ok(i) = s.parse::<i64>() {
            return Value::Integer(i);
        }
        if let Ok(f) = s.parse::<f64>() {
            if f.is_finite() {
                return Value::Float(f);
            }
        }
        Value::String(s.to_string())
    }

    /// Numeric view of the value; integers widen to `f64`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(v) => Some(*v),
            Value::Integer(i) => Some(*i as f64),
            Value::String(_) => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    fn type_name(&self) -> &'static str {
        match self {
            Value::String(_) => "string",
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
        }
    }
}

// ---------------------------------------------------------------------------
// Record – one data line of the source file
// ---------------------------------------------------------------------------

#[derive(Debug, Error, PartialEq)]
pub enum RecordError {
    #[error("line {line}: no column named '{column}'")]
    MissingColumn { line: u64, column: String },

    #[error("line {line}: column '{column}' expected {expected}, found {found} '{value}'")]
    NotNumeric {
        line: u64,
        column: String,
        expected: &'static str,
        found: &'static str,
        value: String,
    },
}

/// A parsed row. Cells are stored in header order, both as read and
/// coerced; the header list is shared by every record read from the same
/// file.
#[derive(Debug, Clone)]
pub struct Record {
    headers: Arc<[String]>,
    cells: Vec<String>,
    values: Vec<Value>,
    line: u64,
}

impl Record {
    pub fn new(headers: Arc<[String]>, cells: Vec<String>, line: u64) -> Self {
        debug_assert_eq!(headers.len(), cells.len());
        let values = cells.iter().map(|c| Value::coerce(c)).collect();
        Record {
            headers,
            cells,
            values,
            line,
        }
    }

    /// 1-based line number in the source file.
    pub fn line(&self) -> u64 {
        self.line
    }

    fn missing(&self, column: &str) -> RecordError {
        RecordError::MissingColumn {
            line: self.line,
            column: column.to_string(),
        }
    }

    fn position(&self, column: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == column)
    }

    pub fn get(&self, column: &str) -> Result<&Value, RecordError> {
        self.position(column)
            .and_then(|idx| self.values.get(idx))
            .ok_or_else(|| self.missing(column))
    }

    /// The cell exactly as it appeared in the file (trimmed).
    pub fn text(&self, column: &str) -> Result<&str, RecordError> {
        self.position(column)
            .and_then(|idx| self.cells.get(idx))
            .map(String::as_str)
            .ok_or_else(|| self.missing(column))
    }

    fn get_f64(&self, column: &str) -> Result<f64, RecordError> {
        let value = self.get(column)?;
        value.as_f64().ok_or_else(|| self.mismatch(column, "number", value))
    }

    fn get_i64(&self, column: &str) -> Result<i64, RecordError> {
        let value = self.get(column)?;
        value.as_i64().ok_or_else(|| self.mismatch(column, "integer", value))
    }

    fn mismatch(&self, column: &str, expected: &'static str, value: &Value) -> RecordError {
        RecordError::NotNumeric {
            line: self.line,
            column: column.to_string(),
            expected,
            found: value.type_name(),
            value: value.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// SubjectRow – typed view over the report's columns
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct SubjectRow {
    pub subject: i64,
    pub group: String,
    pub ospan_score: i64,
    pub easy: f64,
    pub hard: f64,
}

impl TryFrom<&Record> for SubjectRow {
    type Error = RecordError;

    fn try_from(record: &Record) -> Result<Self, Self::Error> {
        Ok(SubjectRow {
            subject: record.get_i64(COL_SUBJECT)?,
            // A numeric-looking group label is still a label.
            group: record.text(COL_GROUP)?.to_string(),
            ospan_score: record.get_i64(COL_SCORE)?,
            easy: record.get_f64(COL_EASY)?,
            hard: record.get_f64(COL_HARD)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(pairs: &[(&str, &str)]) -> Record {
        let headers: Arc<[String]> = pairs.iter().map(|(h, _)| h.to_string()).collect();
        let cells = pairs.iter().map(|(_, v)| v.to_string()).collect();
        Record::new(headers, cells, 2)
    }

    #[test]
    fn coerce_prefers_integer_then_float() {
        assert_eq!(Value::coerce("25"), Value::Integer(25));
        assert_eq!(Value::coerce("-3"), Value::Integer(-3));
        assert_eq!(Value::coerce("10.5"), Value::Float(10.5));
        assert_eq!(Value::coerce("High"), Value::String("High".into()));
        assert_eq!(Value::coerce(""), Value::String(String::new()));
        assert_eq!(Value::coerce("1e3"), Value::Float(1000.0));
    }

    #[test]
    fn coerce_leaves_non_finite_text_alone() {
        for text in ["nan", "NaN", "inf", "-inf", "infinity", "1e400"] {
            assert_eq!(Value::coerce(text), Value::String(text.into()), "{text}");
        }
    }

    #[test]
    fn numeric_looking_group_keeps_its_text() {
        for label in ["007", "1.50"] {
            let rec = record(&[
                ("Subject", "1"),
                ("OSPAN_Group", label),
                ("OSPAN_Score", "25"),
                ("Distracter_easy", "1.0"),
                ("Distracter_hard", "2.0"),
            ]);
            assert_eq!(rec.text("OSPAN_Group").unwrap(), label);
            assert_eq!(SubjectRow::try_from(&rec).unwrap().group, label);
        }
    }

    #[test]
    fn subject_row_from_record() {
        let rec = record(&[
            ("Subject", "3"),
            ("OSPAN_Group", "High"),
            ("OSPAN_Score", "25"),
            ("Distracter_easy", "10.0"),
            ("Distracter_hard", "14"),
        ]);
        let row = SubjectRow::try_from(&rec).unwrap();
        assert_eq!(
            row,
            SubjectRow {
                subject: 3,
                group: "High".into(),
                ospan_score: 25,
                easy: 10.0,
                hard: 14.0,
            }
        );
    }

    #[test]
    fn missing_column_is_reported() {
        let rec = record(&[("Subject", "3"), ("OSPAN_Group", "High")]);
        let err = SubjectRow::try_from(&rec).unwrap_err();
        assert_eq!(
            err,
            RecordError::MissingColumn {
                line: 2,
                column: "OSPAN_Score".into()
            }
        );
    }

    #[test]
    fn non_numeric_score_is_reported() {
        let rec = record(&[
            ("Subject", "3"),
            ("OSPAN_Group", "High"),
            ("OSPAN_Score", "25"),
            ("Distracter_easy", "n/a"),
            ("Distracter_hard", "14.0"),
        ]);
        let err = SubjectRow::try_from(&rec).unwrap_err();
        assert!(matches!(
            err,
            RecordError::NotNumeric { ref column, found: "string", .. } if column == "Distracter_easy"
        ));
        assert!(err.to_string().contains("line 2"));
    }
}
