//! reflint: a linter for parent-child state coupling in React-style code.

mod args;
mod diagnostics;
mod error;

use std::io::Read;
use std::path::Path;
use std::process::ExitCode;

use reflint_core::LintError;
use reflint_rules::Linter;

use args::{ExecutionMode, LintArgs};
use diagnostics::SourceMap;
use error::{EXIT_ERROR, EXIT_SUCCESS, EXIT_USAGE_ERROR};

fn main() -> ExitCode {
    let parsed = args::parse_args(std::env::args_os().skip(1));
    let lint_args = match parsed {
        Ok(args) => args,
        Err(err) => {
            eprintln!("reflint: {}", err);
            eprintln!("Try 'reflint --help' for more information.");
            return ExitCode::from(EXIT_USAGE_ERROR);
        }
    };

    match &lint_args.mode {
        ExecutionMode::PrintHelp => {
            print!("{}", args::USAGE);
            ExitCode::from(EXIT_SUCCESS)
        }
        ExecutionMode::PrintVersion => {
            println!("reflint {}", reflint_core::VERSION);
            ExitCode::from(EXIT_SUCCESS)
        }
        ExecutionMode::Stdin => run_stdin(&lint_args),
        ExecutionMode::Files(files) => run_files(&lint_args, files),
    }
}

fn run_files(lint_args: &LintArgs, files: &[std::path::PathBuf]) -> ExitCode {
    let linter = Linter::new();
    let mut findings = 0usize;
    let mut failed = false;

    for path in files {
        let filename = path.display().to_string();
        match read_file(path) {
            Ok(source) => match lint_one(&linter, &source, &filename) {
                Ok(count) => findings += count,
                Err(err) => {
                    let _ = error::format_lint_error(&err, Some(&source), &filename);
                    failed = true;
                }
            },
            Err(err) => {
                let _ = error::format_lint_error(&err, None, &filename);
                failed = true;
            }
        }
    }

    summary(lint_args, findings);
    if failed || findings > 0 {
        ExitCode::from(EXIT_ERROR)
    } else {
        ExitCode::from(EXIT_SUCCESS)
    }
}

fn run_stdin(lint_args: &LintArgs) -> ExitCode {
    let mut source = String::new();
    if let Err(err) = std::io::stdin().read_to_string(&mut source) {
        let err = LintError::Io {
            path: "<stdin>".to_string(),
            message: err.to_string(),
        };
        return error::format_lint_error(&err, None, "<stdin>");
    }

    let linter = Linter::new();
    match lint_one(&linter, &source, "<stdin>") {
        Ok(findings) => {
            summary(lint_args, findings);
            if findings > 0 {
                ExitCode::from(EXIT_ERROR)
            } else {
                ExitCode::from(EXIT_SUCCESS)
            }
        }
        Err(err) => error::format_lint_error(&err, Some(&source), "<stdin>"),
    }
}

/// Lint one source, print its findings, return the finding count.
fn lint_one(linter: &Linter, source: &str, filename: &str) -> Result<usize, LintError> {
    let diagnostics = linter.lint_source(source)?;
    if diagnostics.is_empty() {
        return Ok(0);
    }
    let source_map = SourceMap::new(source, filename);
    for diagnostic in &diagnostics {
        println!("{}\n", diagnostics::render_diagnostic(&source_map, diagnostic));
    }
    Ok(diagnostics.len())
}

fn read_file(path: &Path) -> Result<String, LintError> {
    std::fs::read_to_string(path).map_err(|err| LintError::Io {
        path: path.display().to_string(),
        message: err.to_string(),
    })
}

fn summary(lint_args: &LintArgs, findings: usize) {
    if lint_args.quiet {
        return;
    }
    if findings == 0 {
        println!("no problems found");
    } else if findings == 1 {
        println!("1 problem found");
    } else {
        println!("{} problems found", findings);
    }
}
