//! Command-line resolution.
//!
//! Unknown arguments are skipped and a value-taking flag in last position is
//! dropped. Resolution never prints or exits; `main` owns that.

use std::path::PathBuf;

use crate::data::model::ColumnRange;
use crate::error::ConfigError;

pub const DEFAULT_OUTPUT: &str = "seeds.txt";
pub const DEFAULT_MIN_INITIAL: f64 = 10.0;
pub const DEFAULT_SLOPE_THRESHOLD: f64 = -0.1;

// ---------------------------------------------------------------------------
// DecreaseMode – which decrease test the classifier applies
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum DecreaseMode {
    /// Every value strictly below its predecessor.
    #[default]
    Strict,
    /// Least-squares slope below `slope_threshold`.
    Trend { slope_threshold: f64 },
}

impl DecreaseMode {
    pub fn name(&self) -> &'static str {
        match self {
            DecreaseMode::Strict => "strict",
            DecreaseMode::Trend { .. } => "trend",
        }
    }
}

// ---------------------------------------------------------------------------
// Config – the resolved run configuration
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub input: PathBuf,
    pub output: PathBuf,
    /// Target columns, 0-based and inclusive on both ends.
    pub range: ColumnRange,
    /// Rows whose first windowed value is below this are rejected.
    pub min_initial: f64,
    pub mode: DecreaseMode,
    /// Optional JSON run summary.
    pub report: Option<PathBuf>,
}

impl Config {
    /// Resolve a configuration from command-line arguments (program name excluded).
    ///
    /// `-h` stops resolution at once and yields [`ConfigError::HelpRequested`],
    /// whatever else is on the line.
    pub fn from_args<I, S>(args: I) -> Result<Config, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let args: Vec<S> = args.into_iter().collect();

        let mut input: Option<String> = None;
        let mut output = DEFAULT_OUTPUT.to_string();
        let mut start: Option<i64> = None;
        let mut end: Option<i64> = None;
        let mut min_initial = DEFAULT_MIN_INITIAL;
        let mut use_trend = false;
        let mut slope_threshold = DEFAULT_SLOPE_THRESHOLD;
        let mut report: Option<String> = None;

        let mut i = 0;
        while i < args.len() {
            let arg = args[i].as_ref();
            let value = args.get(i + 1).map(|v| v.as_ref());
            let takes_value = matches!(arg, "-i" | "-o" | "-s" | "-e" | "-m" | "-l" | "-r");

            match (arg, value) {
                ("-i", Some(v)) => input = Some(v.to_string()),
                ("-o", Some(v)) => output = v.to_string(),
                ("-s", Some(v)) => start = Some(parse_int("-s", v)?),
                ("-e", Some(v)) => end = Some(parse_int("-e", v)?),
                ("-m", Some(v)) => min_initial = parse_float("-m", v)?,
                ("-l", Some(v)) => slope_threshold = parse_float("-l", v)?,
                ("-r", Some(v)) => report = Some(v.to_string()),
                ("-t", _) => use_trend = true,
                ("-h", _) => return Err(ConfigError::HelpRequested),
                _ => {}
            }

            i += if takes_value && value.is_some() { 2 } else { 1 };
        }

        let input = input
            .filter(|p| !p.is_empty())
            .ok_or(ConfigError::MissingInput)?;
        let start = start.ok_or(ConfigError::MissingStart)?;
        if start < 0 {
            return Err(ConfigError::NegativeStart(start));
        }
        let end = end.ok_or(ConfigError::MissingEnd)?;
        if end < start {
            return Err(ConfigError::EndBeforeStart { start, end });
        }

        let mode = if use_trend {
            DecreaseMode::Trend { slope_threshold }
        } else {
            DecreaseMode::default()
        };

        Ok(Config {
            input: PathBuf::from(input),
            output: PathBuf::from(output),
            range: ColumnRange::new(start as usize, end as usize),
            min_initial,
            mode,
            report: report.map(PathBuf::from),
        })
    }
}

fn parse_int(flag: &'static str, value: &str) -> Result<i64, ConfigError> {
    value.trim().parse::<i64>().map_err(|_| ConfigError::InvalidValue {
        flag,
        value: value.to_string(),
    })
}

fn parse_float(flag: &'static str, value: &str) -> Result<f64, ConfigError> {
    match value.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(ConfigError::InvalidValue {
            flag,
            value: value.to_string(),
        }),
    }
}

/// Bilingual usage text, printed to stderr by the binary.
pub fn usage(program: &str) -> String {
    format!(
        "Usage: {program} [options]
Options:
  -i <file>    Input TSV file (required)
  -o <file>    Output file (default: seeds.txt)
  -s <N>       Start column of target condition (0-based, required)
  -e <N>       End column of target condition (0-based, required)
  -m <value>   Min initial expression (default: 10.0)
  -t           Use trend decreasing mode (strict by default)
  -l <slope>   Slope threshold for trend (default: -0.1)
  -r <file>    Write a JSON run summary
  -h           Show this help

用法: {program} [选项]
选项:
  -i <文件>    输入TSV文件路径 (必需)
  -o <文件>    输出文件路径 (默认: seeds.txt)
  -s <N>       目标条件起始列 (从0计数, 必需)
  -e <N>       目标条件结束列 (从0计数, 必需)
  -m <值>      初始时间点最小表达量 (默认: 10.0)
  -t           启用趋势递减模式 (默认严格递减)
  -l <斜率>    趋势判断斜率阈值 (默认: -0.1)
  -r <文件>    输出JSON运行摘要
  -h           显示帮助信息
"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve(args: &[&str]) -> Result<Config, ConfigError> {
        Config::from_args(args.iter().copied())
    }

    #[test]
    fn defaults_apply_when_only_required_flags_given() {
        let cfg = resolve(&["-i", "expr.tsv", "-s", "1", "-e", "4"]).unwrap();
        assert_eq!(cfg.input, PathBuf::from("expr.tsv"));
        assert_eq!(cfg.output, PathBuf::from("seeds.txt"));
        assert_eq!(cfg.range, ColumnRange::new(1, 4));
        assert_eq!(cfg.min_initial, 10.0);
        assert_eq!(cfg.mode, DecreaseMode::Strict);
        assert_eq!(DecreaseMode::default(), DecreaseMode::Strict);
        assert!(cfg.report.is_none());
    }

    #[test]
    fn trend_flag_carries_slope_threshold() {
        let cfg = resolve(&["-l", "-0.5", "-t", "-i", "a", "-s", "0", "-e", "3", "-m", "2.5"]).unwrap();
        assert_eq!(cfg.mode, DecreaseMode::Trend { slope_threshold: -0.5 });
        assert_eq!(cfg.min_initial, 2.5);
    }

    #[test]
    fn slope_without_trend_stays_strict() {
        let cfg = resolve(&["-i", "a", "-s", "0", "-e", "0", "-l", "-3"]).unwrap();
        assert_eq!(cfg.mode, DecreaseMode::Strict);
    }

    #[test]
    fn unknown_flags_are_ignored() {
        let cfg = resolve(&["--verbose", "-x", "-i", "a", "stray", "-s", "2", "-e", "2"]).unwrap();
        assert_eq!(cfg.range, ColumnRange::new(2, 2));
    }

    #[test]
    fn trailing_value_flag_is_ignored() {
        let cfg = resolve(&["-i", "a", "-s", "0", "-e", "1", "-o"]).unwrap();
        assert_eq!(cfg.output, PathBuf::from(DEFAULT_OUTPUT));
        assert_eq!(resolve(&["-s", "0", "-e", "1", "-i"]), Err(ConfigError::MissingInput));
    }

    #[test]
    fn help_wins_over_everything() {
        assert_eq!(resolve(&["-i", "a", "-s", "0", "-e", "1", "-h"]), Err(ConfigError::HelpRequested));
        assert_eq!(resolve(&["-h", "-s", "bogus"]), Err(ConfigError::HelpRequested));
    }

    #[test]
    fn range_validation() {
        assert_eq!(resolve(&["-i", "a", "-e", "1"]), Err(ConfigError::MissingStart));
        assert_eq!(resolve(&["-i", "a", "-s", "1"]), Err(ConfigError::MissingEnd));
        assert_eq!(resolve(&["-i", "a", "-s", "-1", "-e", "1"]), Err(ConfigError::NegativeStart(-1)));
        assert_eq!(
            resolve(&["-i", "a", "-s", "3", "-e", "2"]),
            Err(ConfigError::EndBeforeStart { start: 3, end: 2 })
        );
    }

    #[test]
    fn non_numeric_values_are_rejected() {
        assert!(matches!(
            resolve(&["-i", "a", "-s", "zero", "-e", "1"]),
            Err(ConfigError::InvalidValue { flag: "-s", .. })
        ));
        assert!(matches!(
            resolve(&["-i", "a", "-s", "0", "-e", "1", "-m", "lots"]),
            Err(ConfigError::InvalidValue { flag: "-m", .. })
        ));
    }

    #[test]
    fn usage_is_bilingual() {
        let text = usage("seed-genes");
        assert!(text.starts_with("Usage: seed-genes"));
        assert!(text.contains("用法: seed-genes"));
    }
}
