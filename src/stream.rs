//! # Stream
//!
//! A named, in-memory source of text with a read cursor. The scan engine
//! reads it as a whole; the plain rule file reader walks it character by
//! character.

use crate::error::{Error, Result};
use crate::location::{Location, LocationBuilder};
use std::fs;
use std::path::Path;
use std::sync::Arc;

#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn string_stream() {
        let string = "What a nice content,\nall in a single stream!";
        let origin = Path::new("somewhere");
        let mut stream = StringStream::new(origin, string);
        assert_eq!(stream.peek(), string);
        for chr in string.chars() {
            let got_char = stream.get();
            match got_char {
                Char::Char(c) => assert_eq!(chr, c),
                Char::EOF => {
                    panic!("Found EOF in stream, while expecting {}", chr)
                }
            }
            stream.incr_pos();
        }
        assert!(matches!(stream.get(), Char::EOF));
        assert!(stream.is_exhausted());
    }

    #[test]
    fn unicode() {
        let string = "До́брый день.";
        let origin = Path::new("Russia");
        let mut stream = StringStream::new(origin, string);
        assert_eq!(stream.peek(), string);
        let mut curr_pos = 0;
        for chr in string.chars() {
            match stream.get() {
                Char::Char(c) => assert_eq!(chr, c),
                Char::EOF => {
                    panic!("Found EOF in stream, while expecting {}", chr)
                }
            }
            assert_eq!(&string[curr_pos..], stream.peek());
            assert_eq!(curr_pos, stream.pos());
            stream.incr_pos();
            curr_pos += chr.len_utf8();
        }
    }

    #[test]
    fn continues_and_shift() {
        let mut stream = StringStream::new(Path::new("<rules>"), "ignore WS ::= \\s+");
        assert!(stream.continues("ignore"));
        assert!(!stream.continues("immediate"));
        stream.shift("ignore".len());
        assert_eq!(stream.peek(), " WS ::= \\s+");
        assert_eq!(stream.curr_location().start(), (0, 6));
    }

    #[test]
    fn missing_file() {
        let error = StringStream::from_file(Path::new("this/file/does/not/exist.olx")).unwrap_err();
        assert!(matches!(error, Error::Io { .. }));
    }
}

/// # Summary
///
/// A character, or `EOF`.
///
/// # Variants
///
/// `Char(char)`: a character.
/// `EOF`: End Of File.
#[derive(Debug)]
pub enum Char {
    /// A character
    Char(char),
    /// End Of File
    EOF,
}

/// # Summary
///
/// A stream based on a string, considered as a file-like object.
/// Thus, a `StringStream` object requires an `origin`.
///
/// # Methods
/// `new`: build a `StringStream`.
/// `from_file`: read a `StringStream` from the file system.
/// `continues`: returns if the substring that starts at the current position matches the given one.
/// `borrow`: borrows (read-only) the whole stream as a string slice
/// `peek`: borrows the stream from the current position on
pub struct StringStream {
    origin: Arc<Path>,
    stream: Arc<str>,
    pos: usize,
}

impl StringStream {
    /// Build a new `StringStream`, based on its `origin` and on a given `string`.
    pub fn new(origin: impl Into<Arc<Path>>, string: impl Into<Arc<str>>) -> Self {
        Self {
            origin: origin.into(),
            stream: string.into(),
            pos: 0,
        }
    }

    /// Create a [`StringStream`] directly from a file. This will try to read the content of the file right away.
    pub fn from_file(file: impl Into<Arc<Path>>) -> Result<Self> {
        let file = file.into();
        let content =
            fs::read_to_string(&file).map_err(|error| Error::with_file(error, file.as_ref()))?;
        Ok(Self::new(file, content))
    }

    /// Return the current position, as a byte offset.
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Return a boolean corresponding to whether the substring of
    /// the `StringStream` that starts at the current position matches
    /// the given string.
    pub fn continues(&self, keyword: &str) -> bool {
        self.peek().starts_with(keyword)
    }

    /// Advance the position by `length` bytes. `length` must land on a char boundary.
    pub fn shift(&mut self, length: usize) {
        self.pos = (self.pos + length).min(self.stream.len());
    }

    /// Advance the position by one character.
    pub fn incr_pos(&mut self) {
        if let Char::Char(chr) = self.get() {
            self.pos += chr.len_utf8();
        }
    }

    /// Return a string slice corresponding to the
    /// underlying string, starting at the position of the stream.
    pub fn peek(&self) -> &str {
        &self.stream[self.pos..]
    }

    pub fn get(&self) -> Char {
        self.peek()
            .chars()
            .next()
            .map(Char::Char)
            .unwrap_or(Char::EOF)
    }

    /// Borrow the whole underlying string.
    pub fn borrow(&self) -> &str {
        &self.stream
    }

    /// Return the origin file of the [`StringStream`].
    pub fn origin(&self) -> Arc<Path> {
        self.origin.clone()
    }

    /// Return whether the cursor reached the end of the stream.
    pub fn is_exhausted(&self) -> bool {
        self.pos == self.stream.len()
    }

    /// A builder turning byte offsets of this stream into [`Location`]s.
    pub fn location_builder(&self) -> LocationBuilder<'_> {
        LocationBuilder::new(self.origin.clone(), &self.stream)
    }

    /// The location of the current position.
    pub fn curr_location(&self) -> Location {
        self.location_builder().at(self.pos)
    }
}

impl std::fmt::Debug for StringStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.peek().fmt(f)
    }
}
