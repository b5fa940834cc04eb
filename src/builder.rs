//! # Builder
//!
//! Loading rule sets from rule files. Two formats are supported:
//!  - plain rule files (`.olx`), read by [`grammarparser`](crate::grammarparser);
//!  - JSON rule files (`.json`), following [`RuleFileSchema`].

use crate::error::{Error, Result};
use crate::grammarparser;
use crate::lexer::{OrderKey, RuleSet};
use crate::rule::Rule;
use crate::stream::StringStream;
use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;


#[derive(Debug)]
pub enum Format {
    Plain,
    Json,
}

#[derive(Debug)]
pub enum FileResult<T> {
    Valid(T),
    WrongExtension(OsString),
    NonExisting,
}

/// Pick the format of `path` from its extension. If `path` has none, try every
/// extension in turn, and pick the most recently modified file that exists.
pub fn select_format<'a, T>(
    path: &Path,
    extensions: &'a [(&'static str, T)],
) -> FileResult<(PathBuf, &'a T)> {
    if let Some(extension) = path.extension() {
        for (ext, format) in extensions {
            if *ext == extension {
                return FileResult::Valid((path.to_owned(), format));
            }
        }
        FileResult::WrongExtension(extension.to_owned())
    } else {
        let mut current_path: Option<(PathBuf, &T)> = None;
        for (ext, format) in extensions {
            let try_path = path.with_extension(ext);
            if !try_path.exists() {
                continue;
            }
            let newer = match current_path {
                None => true,
                Some((ref old_path, _)) => matches!(
                    (
                        old_path.metadata().and_then(|md| md.modified()),
                        try_path.metadata().and_then(|md| md.modified()),
                    ),
                    (Ok(time_old), Ok(time_new)) if time_old < time_new,
                ),
            };
            if newer {
                current_path = Some((try_path, format));
            }
        }
        match current_path {
            Some(found) => FileResult::Valid(found),
            None => FileResult::NonExisting,
        }
    }
}

/// # Summary
///
/// Something that can be loaded from a rule file.
pub trait Buildable: Sized {
    const PLAIN_EXTENSION: &'static str;
    const JSON_EXTENSION: &'static str;

    fn build_from_plain(source: StringStream) -> Result<Self>;
    fn build_from_json(source: StringStream) -> Result<Self>;

    /// Load from `path`, whose extension selects the format.
    fn build_from_path(path: &Path) -> Result<Self> {
        match select_format(
            path,
            &[
                (Self::PLAIN_EXTENSION, Format::Plain),
                (Self::JSON_EXTENSION, Format::Json),
            ],
        ) {
            FileResult::Valid((actual_path, Format::Plain)) => {
                debug!(path = %actual_path.display(), "loading plain rule file");
                Self::build_from_plain(StringStream::from_file(actual_path)?)
            }
            FileResult::Valid((actual_path, Format::Json)) => {
                debug!(path = %actual_path.display(), "loading JSON rule file");
                Self::build_from_json(StringStream::from_file(actual_path)?)
            }
            FileResult::NonExisting => Error::with_file(
                std::io::Error::from(std::io::ErrorKind::NotFound),
                path,
            )
            .err(),
            FileResult::WrongExtension(extension) => Error::UnrecognisedExtension {
                extension,
                path: path.to_owned(),
            }
            .err(),
        }
    }
}

/// # Summary
///
/// The layout of a JSON rule file.
///
/// ```json
/// {
///   "start": 0,
///   "orders": [
///     {"order": 0, "rules": [{"pattern": "\\s+", "priority": "immediate", "capture": false}]},
///     {"order": 1, "rules": [{"pattern": "[a-z_]+", "name": "ID"}]}
///   ]
/// }
/// ```
///
/// `start`, when present, is both the first order and the lowest order rules may be put in.
/// Rules are inserted in the order they are listed, so the priority sort applies to them.
#[derive(Debug, Serialize, Deserialize)]
pub struct RuleFileSchema {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<OrderKey>,
    #[serde(default)]
    pub orders: Vec<OrderSchema>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct OrderSchema {
    pub order: OrderKey,
    pub rules: Vec<Arc<Rule>>,
}

impl From<&RuleSet> for RuleFileSchema {
    fn from(set: &RuleSet) -> Self {
        Self {
            start: set.floor(),
            orders: set
                .ordered_view()
                .map(|(order, rules)| OrderSchema {
                    order,
                    rules: rules.to_vec(),
                })
                .collect(),
        }
    }
}

impl TryFrom<RuleFileSchema> for RuleSet {
    type Error = Error;

    fn try_from(schema: RuleFileSchema) -> Result<Self> {
        let mut set = match schema.start {
            Some(start) => RuleSet::starting_at(start),
            None => RuleSet::new(),
        };
        for OrderSchema { order, rules } in schema.orders {
            for rule in rules {
                set.insert(order, rule)?;
            }
        }
        Ok(set)
    }
}

impl Buildable for RuleSet {
    const PLAIN_EXTENSION: &'static str = "olx";
    const JSON_EXTENSION: &'static str = "json";

    fn build_from_plain(mut source: StringStream) -> Result<Self> {
        grammarparser::read(&mut source)
    }

    fn build_from_json(source: StringStream) -> Result<Self> {
        let schema: RuleFileSchema =
            serde_json::from_str(source.borrow()).map_err(|error| Error::RuleFileFormat {
                path: source.origin().to_path_buf(),
                source: error,
            })?;
        RuleSet::try_from(schema)
    }
}
