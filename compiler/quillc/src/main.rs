//! Quill CLI

use std::process::ExitCode;

use quillc::commands::{execute, print_usage};
use quillc::{init_tracing, parse_args, UsageError};

fn main() -> ExitCode {
    init_tracing();

    let invocation = match parse_args(std::env::args().skip(1)) {
        Ok(invocation) => invocation,
        Err(UsageError::MissingCommand) => {
            print_usage();
            return ExitCode::SUCCESS;
        }
        Err(err) => {
            eprintln!("error: {err}");
            eprintln!();
            print_usage();
            return ExitCode::FAILURE;
        }
    };

    if execute(&invocation) {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
