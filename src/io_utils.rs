use std::fmt;
use std::io;
use std::path::Path;

use crate::error::{FormatError, StrError};

/// Error reported by the command line tools: a finished message for the
/// user plus the underlying cause.
#[derive(Debug)]
pub struct CliError {
    pub msg: String,
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.msg)
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.source {
            Some(e) => Some(&**e),
            None => None,
        }
    }
}

fn io_hint(err: &io::Error) -> &'static str {
    match err.kind() {
        io::ErrorKind::NotFound => {
            "Check that the file exists and the path is correct. \
             The codepage is looked up next to the STR file unless --codepage is given."
        }
        io::ErrorKind::PermissionDenied => "Check that the file is readable and its folder writable.",
        io::ErrorKind::UnexpectedEof => "File appears truncated or corrupted.",
        io::ErrorKind::WriteZero => "The output file could not be written in full; check free disk space.",
        _ if err.raw_os_error() == Some(28) => "No space left for the output file; free disk space and retry.",
        _ => "Check the path and retry.",
    }
}

/// Describe a failed file operation on `path` with a hint for the user.
pub fn format_io_error(operation: &str, path: &Path, err: &io::Error) -> String {
    format!("Error {operation} '{}': {err}. {}", path.display(), io_hint(err))
}

/// Wrap an I/O failure on `path`.
pub fn io_cli_error(operation: &str, path: &Path, err: io::Error) -> CliError {
    CliError {
        msg: format_io_error(operation, path, &err),
        source: Some(Box::new(err)),
    }
}

/// Error carrying only a message, such as a usage line.
pub fn simple_cli_error(msg: &str) -> CliError {
    CliError {
        msg: msg.to_owned(),
        source: None,
    }
}

/// Convert a library error into a CLI error with a hint, attaching the
/// path for I/O failures.
pub fn str_cli_error(operation: &str, path: &Path, err: StrError) -> CliError {
    match err {
        StrError::Io(io) => io_cli_error(operation, path, io),
        other => CliError {
            msg: format!(
                "Error {} '{}': {}",
                operation,
                path.display(),
                cli_hint(&other)
            ),
            source: Some(Box::new(other)),
        },
    }
}

fn format_hint(err: &FormatError) -> &'static str {
    match err {
        FormatError::BadMagic { .. } => "The file is not of the expected type.",
        FormatError::BadSize(_) => "The codepage file has an impossible size.",
        FormatError::Truncated { .. } | FormatError::TooSmall(_) => {
            "File appears truncated or corrupted."
        }
        FormatError::MalformedEnd(_) | FormatError::UnknownChunkKind(_) => {
            "Entry data is corrupted; verify the file is intact."
        }
    }
}

/// Return an actionable hint for a library error.
pub fn cli_hint(err: &StrError) -> String {
    match err {
        StrError::Format(e) => format!("{e}. {}", format_hint(e)),
        StrError::Entry { index, source } => {
            format!("entry {index}: {source}. {}", format_hint(source))
        }
        StrError::Encode(e) => format!("{e}. Try freeing memory or splitting the input."),
        StrError::Text(msg) => format!("{msg}. The first line must hold the numeric file id."),
        StrError::Io(io) => format!("{io}"),
    }
}
