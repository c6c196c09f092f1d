use bytes::BytesMut;
use std::io::{self, BufRead, Write};
use thiserror::Error;

/// Errors produced while reading a command line.
#[derive(Debug, Error)]
pub enum ReadError {
    #[error("line too long (max {limit} bytes)")]
    LineTooLong { limit: usize },
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// What a single read produced.
#[derive(Debug, PartialEq, Eq)]
pub enum ReadOutcome {
    /// A line is available in the buffer.
    Line,
    /// The input stream is closed.
    Eof,
}

/// Bounded buffer holding the raw bytes of one command line.
///
/// The buffer is allocated once and reused on every iteration of the loop.
pub struct InputLine {
    buf: BytesMut,
    limit: usize,
}

impl InputLine {
    pub fn with_limit(limit: usize) -> Self {
        // One spare byte so the parser can append a separator to a line
        // that arrived without a trailing newline.
        Self {
            buf: BytesMut::with_capacity(limit + 1),
            limit,
        }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    pub(crate) fn as_bytes_mut(&mut self) -> &mut BytesMut {
        &mut self.buf
    }

    pub fn clear(&mut self) {
        self.buf.clear();
    }

    /// Replaces the content of the buffer with a line that did not come
    /// from a reader.
    pub fn set(&mut self, line: &[u8]) -> Result<(), ReadError> {
        if line.len() > self.limit {
            return Err(ReadError::LineTooLong { limit: self.limit });
        }
        self.buf.clear();
        self.buf.extend_from_slice(line);
        Ok(())
    }

    /// Writes the prompt, then reads one line (newline included, if any).
    ///
    /// A line longer than the limit is consumed up to its newline and
    /// reported as `LineTooLong`, leaving the buffer empty.
    pub fn read_line<R: BufRead, W: Write>(
        &mut self,
        prompt: &str,
        reader: &mut R,
        out: &mut W,
    ) -> Result<ReadOutcome, ReadError> {
        write!(out, "{}", prompt)?;
        out.flush()?;

        self.buf.clear();
        let mut overflow = false;
        let mut seen_any = false;

        loop {
            let available = match reader.fill_buf() {
                Ok(available) => available,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            };
            if available.is_empty() {
                break;
            }
            seen_any = true;

            let (chunk_len, done) = match available.iter().position(|&b| b == b'\n') {
                Some(i) => (i + 1, true),
                None => (available.len(), false),
            };

            if !overflow {
                if self.buf.len() + chunk_len > self.limit {
                    overflow = true;
                    self.buf.clear();
                } else {
                    self.buf.extend_from_slice(&available[..chunk_len]);
                }
            }
            reader.consume(chunk_len);

            if done {
                break;
            }
        }

        if overflow {
            return Err(ReadError::LineTooLong { limit: self.limit });
        }
        if !seen_any {
            return Ok(ReadOutcome::Eof);
        }
        Ok(ReadOutcome::Line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufReader, Cursor};

    #[test]
    fn reads_one_line_at_a_time() {
        let mut input = Cursor::new("ls -l\npwd\n");
        let mut out = Vec::new();
        let mut line = InputLine::with_limit(256);

        let outcome = line.read_line("> ", &mut input, &mut out).unwrap();
        assert_eq!(outcome, ReadOutcome::Line);
        assert_eq!(line.as_bytes(), b"ls -l\n");

        line.read_line("> ", &mut input, &mut out).unwrap();
        assert_eq!(line.as_bytes(), b"pwd\n");

        assert_eq!(out, b"> > ");
    }

    #[test]
    fn last_line_without_newline() {
        let mut input = Cursor::new("exit");
        let mut line = InputLine::with_limit(256);

        let outcome = line.read_line("", &mut input, &mut io::sink()).unwrap();
        assert_eq!(outcome, ReadOutcome::Line);
        assert_eq!(line.as_bytes(), b"exit");
    }

    #[test]
    fn eof_after_input_is_drained() {
        let mut input = Cursor::new("a\n");
        let mut line = InputLine::with_limit(256);

        line.read_line("", &mut input, &mut io::sink()).unwrap();
        let outcome = line.read_line("", &mut input, &mut io::sink()).unwrap();
        assert_eq!(outcome, ReadOutcome::Eof);
        assert!(line.as_bytes().is_empty());
    }

    #[test]
    fn overlong_line_is_skipped_entirely() {
        // small internal buffer forces the line to arrive in several chunks
        let mut input = BufReader::with_capacity(3, Cursor::new("abcdefghij\nok\n"));
        let mut line = InputLine::with_limit(8);

        let err = line.read_line("", &mut input, &mut io::sink()).unwrap_err();
        assert!(matches!(err, ReadError::LineTooLong { limit: 8 }));
        assert!(line.as_bytes().is_empty());

        line.read_line("", &mut input, &mut io::sink()).unwrap();
        assert_eq!(line.as_bytes(), b"ok\n");
    }

    #[test]
    fn line_exactly_at_limit_fits() {
        let mut input = Cursor::new("abc\n");
        let mut line = InputLine::with_limit(4);

        line.read_line("", &mut input, &mut io::sink()).unwrap();
        assert_eq!(line.as_bytes(), b"abc\n");
    }
}
