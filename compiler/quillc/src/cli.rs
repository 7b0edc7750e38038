//! Command-line parsing.
//!
//! Arguments are parsed by hand: `quill <command> [path] [options]`. A bare
//! path ending in `.ql` is shorthand for `run`.

use std::path::Path;
use std::str::FromStr;

use quill_diagnostic::emitter::ColorMode;
use quill_eval::{Interpreter, SharedPrintHandler, DEFAULT_MAX_CALL_DEPTH};
use thiserror::Error;

/// File extension of Quill scripts.
pub const SCRIPT_EXTENSION: &str = "ql";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Run { path: String },
    Check { path: String },
    Lex { path: String },
    Parse { path: String },
    Fmt { path: String, check: bool },
    Help,
    Version,
}

/// Flags shared by every command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Options {
    /// `--budget=N`: statement budget per run.
    pub budget: Option<u64>,
    /// `--max-depth=N`: script call depth limit.
    pub max_depth: usize,
    /// `--color=auto|always|never`
    pub color: ColorMode,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            budget: None,
            max_depth: DEFAULT_MAX_CALL_DEPTH,
            color: ColorMode::Auto,
        }
    }
}

impl Options {
    /// Interpreter configured from these options.
    pub fn interpreter(&self, print_handler: SharedPrintHandler) -> Interpreter {
        Interpreter::builder()
            .print_handler(print_handler)
            .step_budget(self.budget)
            .max_call_depth(self.max_depth)
            .build()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Invocation {
    pub command: Command,
    pub options: Options,
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum UsageError {
    #[error("missing command")]
    MissingCommand,
    #[error("unknown command: {0}")]
    UnknownCommand(String),
    #[error("`{command}` needs a file path")]
    MissingPath { command: &'static str },
    #[error("invalid value for `{flag}`: {value}")]
    InvalidValue { flag: &'static str, value: String },
    #[error("unknown option: {0}")]
    UnknownOption(String),
    #[error("unexpected argument: {0}")]
    UnexpectedArgument(String),
}

/// Parse the arguments after the program name.
pub fn parse_args<I, S>(args: I) -> Result<Invocation, UsageError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut args = args.into_iter().map(Into::into);
    let Some(command) = args.next() else {
        return Err(UsageError::MissingCommand);
    };

    let mut options = Options::default();
    let mut path: Option<String> = None;
    let mut check = false;

    for arg in args {
        if let Some(value) = arg.strip_prefix("--budget=") {
            options.budget = Some(parse_value("--budget", value)?);
        } else if let Some(value) = arg.strip_prefix("--max-depth=") {
            options.max_depth = parse_value("--max-depth", value)?;
        } else if let Some(value) = arg.strip_prefix("--color=") {
            options.color = ColorMode::parse(value).ok_or_else(|| UsageError::InvalidValue {
                flag: "--color",
                value: value.to_owned(),
            })?;
        } else if arg == "--check" {
            check = true;
        } else if arg.starts_with('-') {
            return Err(UsageError::UnknownOption(arg));
        } else if path.is_none() {
            path = Some(arg);
        } else {
            return Err(UsageError::UnexpectedArgument(arg));
        }
    }

    let require = |path: Option<String>, command: &'static str| {
        path.ok_or(UsageError::MissingPath { command })
    };
    let command = match command.as_str() {
        "run" => Command::Run {
            path: require(path, "run")?,
        },
        "check" => Command::Check {
            path: require(path, "check")?,
        },
        "lex" => Command::Lex {
            path: require(path, "lex")?,
        },
        "parse" => Command::Parse {
            path: require(path, "parse")?,
        },
        "fmt" => Command::Fmt {
            path: require(path, "fmt")?,
            check,
        },
        "help" | "--help" | "-h" => Command::Help,
        "version" | "--version" | "-V" => Command::Version,
        _ if is_script_path(&command) => match path {
            Some(extra) => return Err(UsageError::UnexpectedArgument(extra)),
            None => Command::Run { path: command },
        },
        _ => return Err(UsageError::UnknownCommand(command)),
    };

    if check && !matches!(command, Command::Fmt { .. }) {
        return Err(UsageError::UnknownOption("--check".to_owned()));
    }
    Ok(Invocation { command, options })
}

fn parse_value<T: FromStr>(flag: &'static str, value: &str) -> Result<T, UsageError> {
    value.parse().map_err(|_| UsageError::InvalidValue {
        flag,
        value: value.to_owned(),
    })
}

fn is_script_path(arg: &str) -> bool {
    Path::new(arg)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case(SCRIPT_EXTENSION))
}
