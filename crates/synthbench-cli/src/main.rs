#![forbid(unsafe_code)]

use std::process::ExitCode;

fn main() -> ExitCode {
    synthbench_cli::main_entry()
}
