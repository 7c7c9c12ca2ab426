use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use crate::config::{Config, DecreaseMode};
use crate::data::filter::Verdict;
use crate::data::model::ColumnRange;
use crate::error::SeedError;

// ---------------------------------------------------------------------------
// RunSummary – counters gathered over one pass
// ---------------------------------------------------------------------------

/// What happened to every line of the input.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    pub mode: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slope_threshold: Option<f64>,
    pub range: ColumnRange,
    pub min_initial: f64,
    pub lines_read: u64,
    pub blank_lines: u64,
    /// Rows with too few numeric values to fill the window.
    pub short_rows: u64,
    pub below_minimum: u64,
    pub not_decreasing: u64,
    pub accepted: u64,
}

impl RunSummary {
    pub fn new(config: &Config) -> Self {
        RunSummary {
            mode: config.mode.name(),
            slope_threshold: match config.mode {
                DecreaseMode::Strict => None,
                DecreaseMode::Trend { slope_threshold } => Some(slope_threshold),
            },
            range: config.range,
            min_initial: config.min_initial,
            lines_read: 0,
            blank_lines: 0,
            short_rows: 0,
            below_minimum: 0,
            not_decreasing: 0,
            accepted: 0,
        }
    }

    pub fn record(&mut self, verdict: Verdict) {
        match verdict {
            Verdict::Accepted => self.accepted += 1,
            Verdict::BelowMinimum => self.below_minimum += 1,
            Verdict::NotDecreasing => self.not_decreasing += 1,
        }
    }

    /// Write the summary as pretty-printed JSON.
    pub fn write_json(&self, path: &Path) -> Result<(), SeedError> {
        let report_err = |source: serde_json::Error| SeedError::Report {
            path: path.to_path_buf(),
            source,
        };

        let file = File::create(path).map_err(|e| report_err(serde_json::Error::io(e)))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, self).map_err(report_err)?;
        writer
            .write_all(b"\n")
            .and_then(|_| writer.flush())
            .map_err(|e| report_err(serde_json::Error::io(e)))
    }
}
