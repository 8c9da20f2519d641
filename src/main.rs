#![forbid(unsafe_code)]

use std::process::ExitCode;

fn main() -> ExitCode {
    match hotelier::run() {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("hotelier: {e}");
            ExitCode::from(2)
        }
    }
}
