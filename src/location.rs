//! # Location
//!
//! Data to locate spans of text in named sources.
//! The main struct is [`Location`]; [`LocationBuilder`] turns byte offsets
//! of a source into locations.

use std::{path::Path, sync::Arc};

/// # Summary
///
/// Information about a position in a file,
/// stored as `(line, char_position)`
///
/// # Example
///
/// ```text
/// abc def
/// ghi
/// ```
///
/// Here, the `CharLocation` of `a` is `(0, 0)`,
/// and the one of `i` is `(1, 2)`.
pub type CharLocation = (usize, usize);


/// # Summary
///
/// Stores the location of a chunk of text that is bound to a file.
/// Asks a start position (inclusive) and an end position (exclusive).
///
/// Sources that do not come from a file, such as strings handed directly
/// to the scan engine, use a placeholder name like `<input>`.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Location {
    file: Arc<Path>,
    start: CharLocation,
    end: CharLocation,
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "in file {}, ", self.file.display())?;
        if self.start == self.end {
            write!(
                f,
                "at character {} of line {}",
                self.start.1,
                self.start.0 + 1,
            )
        } else if self.start.0 == self.end.0 {
            write!(
                f,
                "at characters {}-{} of line {}",
                self.start.1,
                self.end.1,
                self.start.0 + 1,
            )
        } else {
            write!(
                f,
                "from character {} of line {} to character {} of line {}",
                self.start.1,
                self.start.0 + 1,
                self.end.1,
                self.end.0 + 1,
            )
        }
    }
}

impl Location {
    /// Create a new `Location` object.
    /// Require three arguments,
    ///  * file: the name of the file where the data is;
    ///  * start: the location (inclusive) of the beginning of the data;
    ///  * end: the location (exclusive) of the end of the data.
    pub fn new(file: impl Into<Arc<Path>>, start: CharLocation, end: CharLocation) -> Self {
        debug_assert!(start.0 < end.0 || (start.0 == end.0 && start.1 <= end.1));
        Self {
            file: file.into(),
            start,
            end,
        }
    }

    /// Returns the file from which the data is taken.
    pub fn file(&self) -> Arc<Path> {
        self.file.clone()
    }

    /// Returns the location of the beginning of the chunk of data in the file.
    pub fn start(&self) -> CharLocation {
        self.start
    }

    /// Returns the location of the end of the chunk of data in the file
    pub fn end(&self) -> CharLocation {
        self.end
    }
}

/// # Summary
/// `LocationBuilder` allows building locations from byte offsets of a source.
/// Lines are found by binary search over the newline offsets, columns are
/// counted in characters.
#[derive(Debug)]
pub struct LocationBuilder<'text> {
    file: Arc<Path>,
    text: &'text str,
    newlines: Vec<usize>,
}

impl<'text> LocationBuilder<'text> {
    /// Create a new Builder for a Location.
    pub fn new(file: impl Into<Arc<Path>>, text: &'text str) -> Self {
        let file = file.into();
        let newlines = text
            .bytes()
            .enumerate()
            .filter(|(_, b)| *b == b'\n')
            .map(|(i, _)| i)
            .collect();

        Self {
            file,
            text,
            newlines,
        }
    }

    fn char_location(&self, pos: usize) -> CharLocation {
        let pos = pos.min(self.text.len());
        let line = match self.newlines.binary_search(&pos) {
            Ok(x) | Err(x) => x,
        };
        let line_start = if line == 0 {
            0
        } else {
            self.newlines[line - 1] + 1
        };
        let column = self
            .text
            .get(line_start..pos)
            .map_or(pos - line_start, |chunk| chunk.chars().count());
        (line, column)
    }

    /// Create a new location from two byte offsets.
    pub fn from(&self, start: usize, end: usize) -> Location {
        Location::new(
            self.file.clone(),
            self.char_location(start),
            self.char_location(end),
        )
    }

    /// Create an empty location at a single byte offset.
    pub fn at(&self, pos: usize) -> Location {
        self.from(pos, pos)
    }
}
