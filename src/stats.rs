use crate::data::model::{SubjectRow, Value};

// ---------------------------------------------------------------------------
// Distracter statistics
// ---------------------------------------------------------------------------

/// Signed difference, hard minus easy.
pub fn difference(hard: f64, easy: f64) -> f64 {
    hard - easy
}

/// Difference as a percentage of the hard score. `hard == 0.0` gives
/// ±inf (or NaN when both scores are zero).
pub fn percent_difference(hard: f64, easy: f64) -> f64 {
    100.0 * difference(hard, easy) / hard
}

pub fn average(hard: f64, easy: f64) -> f64 {
    (hard + easy) / 2.0
}

// ---------------------------------------------------------------------------
// DerivedStats – one report line's worth of values
// ---------------------------------------------------------------------------

pub const KEY_SUBJECT: &str = "subj";
pub const KEY_GROUP: &str = "ospan";
pub const KEY_AVERAGE: &str = "avg";
pub const KEY_DIFFERENCE: &str = "diff";
pub const KEY_PERCENT: &str = "perc";
pub const KEY_SCORE: &str = "score";

/// Keys a column spec may refer to.
pub const STAT_KEYS: [&str; 6] = [
    KEY_SUBJECT,
    KEY_GROUP,
    KEY_AVERAGE,
    KEY_DIFFERENCE,
    KEY_PERCENT,
    KEY_SCORE,
];

#[derive(Debug, Clone, PartialEq)]
pub struct DerivedStats {
    pub subj: i64,
    pub ospan: String,
    pub avg: f64,
    pub diff: f64,
    pub perc: f64,
    /// Raw OSPAN score, passed through for tables that want it.
    pub score: i64,
}

impl DerivedStats {
    pub fn compute(row: &SubjectRow) -> Self {
        DerivedStats {
            subj: row.subject,
            ospan: row.group.clone(),
            avg: average(row.hard, row.easy),
            diff: difference(row.hard, row.easy),
            perc: percent_difference(row.hard, row.easy),
            score: row.ospan_score,
        }
    }

    /// Look a value up by its column key.
    pub fn get(&self, key: &str) -> Option<Value> {
        match key {
            KEY_SUBJECT => Some(Value::Integer(self.subj)),
            KEY_GROUP => Some(Value::String(self.ospan.clone())),
            KEY_AVERAGE => Some(Value::Float(self.avg)),
            KEY_DIFFERENCE => Some(Value::Float(self.diff)),
            KEY_PERCENT => Some(Value::Float(self.perc)),
            KEY_SCORE => Some(Value::Integer(self.score)),
            _ => None,
        }
    }
}
