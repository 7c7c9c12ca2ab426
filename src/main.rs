use std::process::ExitCode;

use seed_genes::config::{usage, Config};
use seed_genes::error::ConfigError;
use seed_genes::seeds;

fn main() -> ExitCode {
    env_logger::init();

    let mut args = std::env::args();
    let program = args.next().unwrap_or_else(|| "seed-genes".to_string());

    let config = match Config::from_args(args) {
        Ok(config) => config,
        Err(ConfigError::HelpRequested) => {
            eprint!("{}", usage(&program));
            return ExitCode::FAILURE;
        }
        Err(e) => {
            eprintln!("Error: missing or invalid required arguments ({e})");
            eprintln!("错误：缺少必需参数或参数无效！");
            eprint!("{}", usage(&program));
            return ExitCode::FAILURE;
        }
    };

    match seeds::run(&config) {
        Ok(_) => {
            println!("Seed gene list written: {}", config.output.display());
            println!("生成种子基因列表: {}", config.output.display());
            ExitCode::SUCCESS
        }
        Err(e) if e.is_setup() => {
            eprintln!("Error: {e}");
            eprintln!("错误：无法打开文件！");
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
