//! 根据待测分割结果、真值和可选区域掩码生成 ROC 分析所需的 one-hot 矩阵文件.

mod args;
mod result;
mod runner;

use std::io::{self, Write};
use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use simple_logger::SimpleLogger;

use args::{normalize_legacy_flags, Cli, Config};

fn main() -> ExitCode {
    let cli = Cli::parse_from(normalize_legacy_flags(std::env::args_os()));

    if let Err(e) = SimpleLogger::new().with_level(cli.log_level).init() {
        eprintln!("failed to initialize logger: {e}");
    }

    let config = match Config::try_from(cli) {
        Ok(config) => config,
        Err(e) => {
            // 参数不全时仅打印用法, 视为正常退出
            println!("{e}\n");
            println!("{}", Cli::command().render_help());
            return ExitCode::SUCCESS;
        }
    };

    match runner::run(&config) {
        Ok(summary) => {
            if config.summary {
                let mut stdout = io::stdout().lock();
                let printed = result::describe_into(&summary, &mut stdout)
                    .and_then(|_| stdout.flush());
                if let Err(e) = printed {
                    log::error!("failed to print summary: {e}");
                    return ExitCode::FAILURE;
                }
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{e}");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
