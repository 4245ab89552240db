use std::process::ExitCode;

use commitbridge::ui::output;

fn main() -> ExitCode {
    match commitbridge::cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::error(format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}
