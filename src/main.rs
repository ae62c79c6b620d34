use line_grouper::config::DEFAULT_OUTPUT_PATH;
use line_grouper::logging::init_tracing;
use line_grouper::LineGrouper;
use std::process::ExitCode;
use std::time::Instant;

/// Delimiter override for the binary; the first character is used.
const DELIMITER_ENV: &str = "LINE_GROUPER_DELIMITER";

/// When set, run statistics are written to this path as JSON.
const STATS_ENV: &str = "LINE_GROUPER_STATS";

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.is_empty() || args.len() > 2 {
        eprintln!("Usage: line-grouper <input_file_path> [output_file_path]");
        return ExitCode::FAILURE;
    }
    init_tracing();

    let input = &args[0];
    let output = args.get(1).map_or(DEFAULT_OUTPUT_PATH, String::as_str);
    let started = Instant::now();

    let run = || -> anyhow::Result<usize> {
        let mut grouper = LineGrouper::new();
        if let Ok(delimiter) = std::env::var(DELIMITER_ENV) {
            grouper.set_delimiter(&delimiter)?;
        }
        let groups = grouper.process_file(input, output)?;
        if let Some(path) = std::env::var_os(STATS_ENV)
            && let Some(stats) = grouper.last_stats()
        {
            stats.save_to_file(&path)?;
        }
        Ok(groups)
    };

    match run() {
        Ok(groups) => {
            println!("Groups with more than one element: {groups}");
            println!("Execution time: {} seconds", started.elapsed().as_secs_f64());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error processing file: {e:#}");
            ExitCode::FAILURE
        }
    }
}
