use std::io::Write;

use anyhow::{Context, Result};

use crate::config::ReportConfig;
use crate::data::filter::GroupFilter;
use crate::data::loader::RecordSource;
use crate::data::model::{SubjectRow, REQUIRED_COLUMNS};
use crate::stats::DerivedStats;

// ---------------------------------------------------------------------------
// Report driver
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReportSummary {
    pub rows_read: usize,
    pub rows_printed: usize,
}

/// One pass over the data file: read, filter, compute, print.
pub struct Report<'a> {
    config: &'a ReportConfig,
    source: RecordSource,
    filter: GroupFilter,
}

impl<'a> Report<'a> {
    pub fn new(config: &'a ReportConfig) -> Self {
        let filter = match &config.group {
            Some(group) => GroupFilter::only(group.as_str()),
            None => GroupFilter::all(),
        };
        Report {
            config,
            source: RecordSource::new(&config.data_file),
            filter,
        }
    }

    /// Write the table to `out`. Nothing is written if the data file
    /// cannot be opened or lacks a required column.
    pub fn run<W: Write>(&self, out: &mut W) -> Result<ReportSummary> {
        let path = self.source.path().display();
        let reader = self
            .source
            .records()
            .and_then(|r| r.require_columns(&REQUIRED_COLUMNS))
            .with_context(|| format!("loading {path}"))?;
        log::debug!("columns: {:?}", reader.headers());

        let table = &self.config.table;
        for line in table.render_header(&self.config.title, &self.config.headers) {
            writeln!(out, "{line}")?;
        }

        let mut summary = ReportSummary::default();
        for result in reader {
            let record = result.with_context(|| format!("reading {path}"))?;
            summary.rows_read += 1;

            let row = SubjectRow::try_from(&record).with_context(|| format!("in {path}"))?;
            if !self.filter.matches(&row) {
                log::debug!(
                    "skipping subject {} (group '{}', want {:?})",
                    row.subject,
                    row.group,
                    self.filter.target()
                );
                continue;
            }
            if row.hard == 0.0 {
                log::warn!(
                    "line {}: subject {} has a hard score of zero, percent difference is undefined",
                    record.line(),
                    row.subject
                );
            }

            let stats = DerivedStats::compute(&row);
            let line = table
                .row_line(&stats)
                .with_context(|| format!("formatting line {} of {path}", record.line()))?;
            writeln!(out, "{line}")?;
            summary.rows_printed += 1;
        }
        out.flush()?;

        Ok(summary)
    }
}
