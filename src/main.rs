use distinstall::output;
use std::process::ExitCode;

fn main() -> ExitCode {
    match distinstall::cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::err(&format!("{e:#}"));
            ExitCode::FAILURE
        }
    }
}
