use std::process::ExitCode;

use colored::Colorize;

fn main() -> ExitCode {
    match company_finder::app::run_cli() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "error:".bold().red(), e.trim_start_matches("error: "));
            ExitCode::FAILURE
        }
    }
}
