//! # seed-genes
//!
//! Select "seed genes" from an expression table: genes whose expression is high
//! at the first target time point and then falls, either strictly at every step
//! or along a fitted least-squares trend.
//!
//! ```no_run
//! use seed_genes::config::Config;
//!
//! let config = Config::from_args(["-i", "expr.tsv", "-s", "0", "-e", "3", "-t"])?;
//! let summary = seed_genes::seeds::run(&config)?;
//! println!("{} seed genes", summary.accepted);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod config;
pub mod data;
pub mod error;
pub mod report;
pub mod seeds;
