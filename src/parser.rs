use crate::reader::InputLine;
use std::ops::Range;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("too many arguments (max {limit})")]
    TooManyArguments { limit: usize },
    #[error("input is not valid UTF-8")]
    InvalidUtf8,
}

/// Reusable storage for the token positions of one command line.
///
/// Tokens are kept as byte ranges into the `InputLine` they were parsed
/// from, so nothing is copied. The vector is cleared on every parse.
pub struct ArgVector {
    spans: Vec<Range<usize>>,
    limit: usize,
}

impl ArgVector {
    pub fn with_limit(limit: usize) -> Self {
        Self {
            spans: Vec::with_capacity(limit),
            limit,
        }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    fn push(&mut self, span: Range<usize>) -> Result<(), ParseError> {
        if self.spans.len() == self.limit {
            self.spans.clear();
            return Err(ParseError::TooManyArguments { limit: self.limit });
        }
        self.spans.push(span);
        Ok(())
    }
}

/// Parsed view of a command line: the argument tokens, in order.
#[derive(Clone, Copy)]
pub struct Args<'a> {
    line: &'a str,
    spans: &'a [Range<usize>],
}

impl<'a> Args<'a> {
    /// Argument count. Zero for an empty or whitespace-only line.
    pub fn len(&self) -> usize {
        self.spans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&'a str> {
        let line = self.line;
        self.spans.get(index).map(|span| &line[span.clone()])
    }

    pub fn program(&self) -> Option<&'a str> {
        self.get(0)
    }

    pub fn iter(self) -> impl Iterator<Item = &'a str> {
        let line = self.line;
        self.spans.iter().map(move |span| &line[span.clone()])
    }

    pub fn to_vec(&self) -> Vec<&'a str> {
        self.iter().collect()
    }
}

fn is_separator(b: &u8) -> bool {
    b.is_ascii_whitespace()
}

fn skip_separators(bytes: &[u8], mut pos: usize) -> usize {
    while pos < bytes.len() && is_separator(&bytes[pos]) {
        pos += 1;
    }
    pos
}

/// Splits the line in place into whitespace separated tokens.
///
/// The trailing newline, if present, is overwritten with a space; a line
/// without one gets a space appended. Either way every token is followed
/// by a separator, which is what terminates the scan.
///
/// No quoting, escaping or expansion is performed.
pub fn parse<'a>(
    line: &'a mut InputLine,
    argv: &'a mut ArgVector,
) -> Result<Args<'a>, ParseError> {
    argv.spans.clear();

    let buf = line.as_bytes_mut();
    match buf.last_mut() {
        Some(last) if *last == b'\n' => *last = b' ',
        Some(_) => buf.extend_from_slice(b" "),
        None => {}
    }

    let line: &'a InputLine = line;
    let text = std::str::from_utf8(line.as_bytes()).map_err(|_| ParseError::InvalidUtf8)?;
    let bytes = text.as_bytes();

    let mut pos = skip_separators(bytes, 0);
    while let Some(offset) = bytes[pos..].iter().position(is_separator) {
        let end = pos + offset;
        argv.push(pos..end)?;
        pos = skip_separators(bytes, end);
    }

    log::trace!("parsed {} argument(s) from {:?}", argv.spans.len(), text);

    let argv: &'a ArgVector = argv;
    Ok(Args {
        line: text,
        spans: &argv.spans,
    })
}
