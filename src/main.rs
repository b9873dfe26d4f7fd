use pager_stats::cli::{self, USAGE};
use pager_stats::commands::stats::{handle_stats, StatsConfig};
use pager_stats::PagerStatsError;
use std::process::ExitCode;

fn main() -> ExitCode {
    init_logging();

    let cli = match cli::parse_args() {
        Ok(cli) => cli,
        Err(_) => {
            println!("{USAGE}");
            return ExitCode::from(1);
        }
    };

    let config = StatsConfig::for_path(cli.csv_file);
    match handle_stats(&config, std::io::stdout().lock()) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => report_failure(&e),
    }
}

// Side effect: logs go to stderr, stdout carries only the report
fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .init();
}

fn report_failure(error: &PagerStatsError) -> ExitCode {
    eprintln!("{}", error.format_with_code());
    ExitCode::from(1)
}
