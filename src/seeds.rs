use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};

use log::{debug, info};

use crate::config::Config;
use crate::data::filter::{classify, Verdict};
use crate::data::loader::{lines, parse_row};
use crate::error::SeedError;
use crate::report::RunSummary;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Select seed genes from `config.input` into `config.output`.
///
/// The input is opened before the output is created, so a missing input never
/// truncates an existing seed list. The JSON report, when requested, is written
/// only after the seed list is flushed.
pub fn run(config: &Config) -> Result<RunSummary, SeedError> {
    let input = File::open(&config.input).map_err(|source| SeedError::OpenInput {
        path: config.input.clone(),
        source,
    })?;
    let output = File::create(&config.output).map_err(|source| SeedError::CreateOutput {
        path: config.output.clone(),
        source,
    })?;

    info!(
        "selecting seeds from {} (columns {}, min initial {}, {} mode)",
        config.input.display(),
        config.range,
        config.min_initial,
        config.mode.name()
    );

    let summary = select_seeds(BufReader::new(input), BufWriter::new(output), config)?;

    info!(
        "{} lines read: {} accepted, {} not decreasing, {} below minimum, {} short, {} blank",
        summary.lines_read,
        summary.accepted,
        summary.not_decreasing,
        summary.below_minimum,
        summary.short_rows,
        summary.blank_lines
    );

    if let Some(path) = &config.report {
        summary.write_json(path)?;
        info!("run summary written to {}", path.display());
    }

    Ok(summary)
}

// ---------------------------------------------------------------------------
// Streaming filter
// ---------------------------------------------------------------------------

/// Stream rows from `reader`, writing the identifier of every accepted row to
/// `writer` in input order. Malformed rows are counted and skipped.
pub fn select_seeds<R: BufRead, W: Write>(
    reader: R,
    mut writer: W,
    config: &Config,
) -> Result<RunSummary, SeedError> {
    let mut summary = RunSummary::new(config);

    for (line_no, line) in lines(reader).enumerate() {
        let line = line.map_err(SeedError::Read)?;
        summary.lines_read += 1;

        let Some(row) = parse_row(&line) else {
            summary.blank_lines += 1;
            continue;
        };

        let Some(window) = row.window(config.range) else {
            debug!(
                "line {}: {} has {} values, {}-column window {} needs at least {}",
                line_no + 1,
                row.gene_id,
                row.values.len(),
                config.range.width(),
                config.range,
                config.range.end + 1
            );
            summary.short_rows += 1;
            continue;
        };

        let verdict = classify(window, config.min_initial, config.mode);
        summary.record(verdict);

        if verdict == Verdict::Accepted {
            writeln!(writer, "{}", row.gene_id).map_err(SeedError::Write)?;
        } else {
            debug!("line {}: {} rejected ({verdict:?})", line_no + 1, row.gene_id);
        }
    }

    writer.flush().map_err(SeedError::Write)?;
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use std::io::{self, Read};
    use std::path::PathBuf;

    use super::*;
    use crate::config::DecreaseMode;
    use crate::data::model::ColumnRange;

    fn config(start: usize, end: usize, mode: DecreaseMode) -> Config {
        Config {
            input: PathBuf::from("in.tsv"),
            output: PathBuf::from("out.txt"),
            range: ColumnRange::new(start, end),
            min_initial: 10.0,
            mode,
            report: None,
        }
    }

    fn select(input: &str, config: &Config) -> (String, RunSummary) {
        let mut out = Vec::new();
        let summary = select_seeds(input.as_bytes(), &mut out, config).unwrap();
        (String::from_utf8(out).unwrap(), summary)
    }

    #[test]
    fn trailing_text_after_window_is_ignored() {
        let (out, summary) = select("GENE1\t20\t15\t10\t5\tXYZ\n", &config(0, 3, DecreaseMode::Strict));
        assert_eq!(out, "GENE1\n");
        assert_eq!(summary.accepted, 1);
    }

    #[test]
    fn keeps_input_order_and_skips_malformed_rows() {
        let input = "\
B\t30\t20\t10
short\t30\t20

A\t15\t14\t13
low\t9\t8\t7
flat\t30\t30\t10
broken\t30\tx\t10
C\t12\t11\t10.5
";
        let (out, summary) = select(input, &config(0, 2, DecreaseMode::Strict));
        assert_eq!(out, "B\nA\nC\n");
        assert_eq!(summary.lines_read, 8);
        assert_eq!(summary.blank_lines, 1);
        assert_eq!(summary.short_rows, 2);
        assert_eq!(summary.below_minimum, 1);
        assert_eq!(summary.not_decreasing, 1);
        assert_eq!(summary.accepted, 3);
    }

    #[test]
    fn window_may_start_past_first_column() {
        // Columns 0 and 4 fall outside the window and do not affect the verdict.
        let input = "G1 1 50 40 30 99\nG2 100 5 40 30 99\n";
        let (out, _) = select(input, &config(1, 3, DecreaseMode::Strict));
        assert_eq!(out, "G1\n");
    }

    #[test]
    fn trend_mode_accepts_noisy_decline() {
        let mode = DecreaseMode::Trend {
            slope_threshold: -0.1,
        };
        let input = "noisy 20 19 21 18\nline 20 15 10 5\nrise 20 21 22 23\n";
        let (out, summary) = select(input, &config(0, 3, mode));
        assert_eq!(out, "noisy\nline\n");
        assert_eq!(summary.not_decreasing, 1);
    }

    #[test]
    fn numeric_prefix_of_last_window_value_counts() {
        let input = "G1\t20\t15\t10\t5abc\nG2\t20\t15\t10\t5,0\nG3\t20\t15\t1x0\t5\n";
        let (out, summary) = select(input, &config(0, 3, DecreaseMode::Strict));
        assert_eq!(out, "G1\nG2\n");
        assert_eq!(summary.short_rows, 1);
    }

    #[test]
    fn read_error_mid_file_is_fatal() {
        struct FailAfterFirstLine {
            served: bool,
        }

        impl Read for FailAfterFirstLine {
            fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
                if self.served {
                    return Err(io::Error::new(io::ErrorKind::Other, "disk gone"));
                }
                self.served = true;
                let line = b"A\t30\t20\n";
                buf[..line.len()].copy_from_slice(line);
                Ok(line.len())
            }
        }

        let mut out = Vec::new();
        let reader = BufReader::new(FailAfterFirstLine { served: false });
        let err = select_seeds(reader, &mut out, &config(0, 1, DecreaseMode::Strict)).unwrap_err();

        assert!(matches!(err, SeedError::Read(_)));
        assert!(!err.is_setup());
        assert_eq!(out, b"A\n");
    }

    #[test]
    fn empty_input_writes_nothing() {
        let (out, summary) = select("", &config(0, 3, DecreaseMode::Strict));
        assert!(out.is_empty());
        assert_eq!(summary.lines_read, 0);
    }

    #[test]
    fn run_reports_missing_input_without_creating_output() {
        let dir = tempfile::tempdir().unwrap();
        let mut cfg = config(0, 1, DecreaseMode::Strict);
        cfg.input = dir.path().join("absent.tsv");
        cfg.output = dir.path().join("seeds.txt");

        let err = run(&cfg).unwrap_err();
        assert!(matches!(err, SeedError::OpenInput { .. }));
        assert!(err.is_setup());
        assert!(!cfg.output.exists());
    }

    #[test]
    fn run_writes_seeds_and_report() {
        let dir = tempfile::tempdir().unwrap();
        let mut cfg = config(0, 1, DecreaseMode::Strict);
        cfg.input = dir.path().join("expr.tsv");
        cfg.output = dir.path().join("seeds.txt");
        cfg.report = Some(dir.path().join("summary.json"));
        std::fs::write(&cfg.input, "up 10 20\ndown 20 10\n").unwrap();

        let summary = run(&cfg).unwrap();
        assert_eq!(summary.accepted, 1);
        assert_eq!(std::fs::read_to_string(&cfg.output).unwrap(), "down\n");
        assert!(cfg.report.as_ref().unwrap().exists());
    }
}
