//! Command-line argument parser.
//!
//! Hand-rolled for zero-overhead startup. The surface is small: file
//! paths, stdin mode, quiet mode, help and version.

use std::ffi::OsString;
use std::path::PathBuf;

// =============================================================================
// Execution Mode
// =============================================================================

/// What the linter should do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionMode {
    /// Lint the given files: `reflint a.js b.js`
    Files(Vec<PathBuf>),
    /// Lint source read from stdin: `cat a.js | reflint -`
    Stdin,
    /// Print version and exit: `reflint -V` or `reflint --version`
    PrintVersion,
    /// Print help and exit: `reflint -h` or `reflint --help`
    PrintHelp,
}

// =============================================================================
// Parsed Arguments
// =============================================================================

/// Complete set of parsed CLI arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LintArgs {
    /// What to do.
    pub mode: ExecutionMode,
    /// `-q`: Suppress the summary line, print findings only.
    pub quiet: bool,
}

impl Default for LintArgs {
    fn default() -> Self {
        Self {
            mode: ExecutionMode::Files(Vec::new()),
            quiet: false,
        }
    }
}

// =============================================================================
// Parse Error
// =============================================================================

/// Error during argument parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgError {
    /// No input files given.
    NoInput,
    /// Unknown flag.
    UnknownFlag(String),
}

impl std::fmt::Display for ArgError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ArgError::NoInput => write!(f, "No input files"),
            ArgError::UnknownFlag(flag) => write!(f, "Unknown option: {}", flag),
        }
    }
}

impl std::error::Error for ArgError {}

// =============================================================================
// Parser Entry Point
// =============================================================================

/// Parse command-line arguments into `LintArgs`.
///
/// Options are parsed left-to-right; `--` terminates option parsing and
/// everything after it is a file path. `-` selects stdin mode.
pub fn parse_args<I, S>(args: I) -> Result<LintArgs, ArgError>
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
{
    let args: Vec<String> = args
        .into_iter()
        .map(|s| s.into().to_string_lossy().into_owned())
        .collect();

    parse_args_vec(&args)
}

/// Parse from a pre-collected `Vec<String>`.
///
/// The first element should be the first argument, not the program name;
/// the caller skips `argv[0]`.
pub fn parse_args_vec(args: &[String]) -> Result<LintArgs, ArgError> {
    let mut result = LintArgs::default();
    let mut files = Vec::new();
    let mut stdin = false;
    let mut options_done = false;

    for arg in args {
        if options_done {
            files.push(PathBuf::from(arg));
            continue;
        }
        match arg.as_str() {
            "--" => options_done = true,
            "-" => stdin = true,
            "-h" | "--help" => {
                result.mode = ExecutionMode::PrintHelp;
                return Ok(result);
            }
            "-V" | "--version" => {
                result.mode = ExecutionMode::PrintVersion;
                return Ok(result);
            }
            "-q" | "--quiet" => result.quiet = true,
            flag if flag.starts_with('-') => {
                return Err(ArgError::UnknownFlag(flag.to_string()));
            }
            path => files.push(PathBuf::from(path)),
        }
    }

    if stdin {
        if !files.is_empty() {
            // Stdin and file paths are mutually exclusive; files win would
            // silently drop input, so reject the combination.
            return Err(ArgError::UnknownFlag("-".to_string()));
        }
        result.mode = ExecutionMode::Stdin;
        return Ok(result);
    }
    if files.is_empty() {
        return Err(ArgError::NoInput);
    }
    result.mode = ExecutionMode::Files(files);
    Ok(result)
}

/// Usage text for `-h`.
pub const USAGE: &str = "\
usage: reflint [options] <file>...

Lint React-style sources for parent-child state coupling.

options:
  -q, --quiet     print findings only, no summary line
  -h, --help      print this help and exit
  -V, --version   print version and exit
  -               read source from stdin
";

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<LintArgs, ArgError> {
        parse_args(args.iter().copied())
    }

    #[test]
    fn test_parse_files() {
        let args = parse(&["a.js", "b.js"]).unwrap();
        assert_eq!(
            args.mode,
            ExecutionMode::Files(vec![PathBuf::from("a.js"), PathBuf::from("b.js")])
        );
        assert!(!args.quiet);
    }

    #[test]
    fn test_parse_help_and_version() {
        assert_eq!(parse(&["-h"]).unwrap().mode, ExecutionMode::PrintHelp);
        assert_eq!(parse(&["--help"]).unwrap().mode, ExecutionMode::PrintHelp);
        assert_eq!(parse(&["-V"]).unwrap().mode, ExecutionMode::PrintVersion);
        assert_eq!(
            parse(&["--version"]).unwrap().mode,
            ExecutionMode::PrintVersion
        );
    }

    #[test]
    fn test_parse_quiet() {
        let args = parse(&["-q", "a.js"]).unwrap();
        assert!(args.quiet);
    }

    #[test]
    fn test_parse_stdin() {
        assert_eq!(parse(&["-"]).unwrap().mode, ExecutionMode::Stdin);
    }

    #[test]
    fn test_stdin_with_files_rejected() {
        assert!(parse(&["-", "a.js"]).is_err());
    }

    #[test]
    fn test_double_dash_ends_options() {
        let args = parse(&["--", "-q"]).unwrap();
        assert_eq!(
            args.mode,
            ExecutionMode::Files(vec![PathBuf::from("-q")])
        );
        assert!(!args.quiet);
    }

    #[test]
    fn test_no_input_is_an_error() {
        assert_eq!(parse(&[]), Err(ArgError::NoInput));
    }

    #[test]
    fn test_unknown_flag() {
        assert_eq!(
            parse(&["--fancy", "a.js"]),
            Err(ArgError::UnknownFlag("--fancy".to_string()))
        );
    }

    #[test]
    fn test_help_wins_over_files() {
        let args = parse(&["a.js", "-h"]).unwrap();
        assert_eq!(args.mode, ExecutionMode::PrintHelp);
    }
}
