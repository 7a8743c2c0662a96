mod config;
mod data;
mod report;
mod stats;
mod table;

use std::path::Path;

use anyhow::Result;

use config::{ReportConfig, DEFAULT_CONFIG_FILE};
use report::Report;

fn main() -> Result<()> {
    env_logger::init();

    let config = ReportConfig::load_or_default(Path::new(DEFAULT_CONFIG_FILE))?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let summary = Report::new(&config).run(&mut out)?;
    log::info!(
        "printed {} of {} rows from {}",
        summary.rows_printed,
        summary.rows_read,
        config.data_file.display()
    );
    Ok(())
}
