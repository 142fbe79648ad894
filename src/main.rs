use minnow::{Interpreter, SHELL_NAME};
use std::process::ExitCode;

fn main() -> ExitCode {
    match Interpreter::default().repl() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}: {:#}", SHELL_NAME, err);
            ExitCode::FAILURE
        }
    }
}
