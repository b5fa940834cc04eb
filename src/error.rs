//! # Error
//!
//! Every failure `ordlex` can report. Rule construction, rule set
//! insertion, scanning and rule file loading all return [`Result`].

use crate::location::Location;
use std::ffi::OsString;
use std::path::PathBuf;
use thiserror::Error;


/// # Summary
///
/// `Error` is the enum of all the errors `ordlex` might encounter.
///
/// # Error types
///
/// `InvalidPattern`: a rule's pattern is not a valid regular expression.
/// `InvalidOrder`: a rule was inserted below the rule set's order floor.
/// `Tokenize`: no rule matches at some position of the input.
/// `EmptyMatch`: the selected rule matched the empty string, which would never advance the scan.
/// `RuleFileSyntax`: a plain rule file could not be read.
/// `RuleFileFormat`: a JSON rule file could not be read.
/// `UnrecognisedExtension`: a rule file has an extension no format is bound to.
/// `Io`: reading a file failed.
#[derive(Debug, Error)]
pub enum Error {
    #[error("rule pattern `{pattern}` could not be compiled to a regex\n{message}")]
    InvalidPattern { pattern: String, message: String },
    #[error("order {order} is less than minimum order {floor}")]
    InvalidOrder { order: i32, floor: i32 },
    #[error("failed to tokenize the beginning of sequence '{window}', {location}\nplease verify your rule set")]
    Tokenize {
        offset: usize,
        location: Location,
        window: String,
    },
    #[error("rule `{pattern}` matched the empty string, {location}")]
    EmptyMatch { pattern: String, location: Location },
    #[error("syntax error in rule file, {location}\n{message}")]
    RuleFileSyntax { message: String, location: Location },
    #[error("malformed JSON rule file {}\n{source}", path.display())]
    RuleFileFormat {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("unrecognised extension {} for rule file {}", extension.to_string_lossy(), path.display())]
    UnrecognisedExtension { extension: OsString, path: PathBuf },
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Wrap the error in `Err`, so that raise sites read `Error::X { .. }.err()`.
    pub fn err<T>(self) -> Result<T> {
        Err(self)
    }

    /// Attach the path of the file being read to an I/O error.
    pub fn with_file(source: std::io::Error, path: impl Into<PathBuf>) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
