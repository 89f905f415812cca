//! Line sources for interactive sessions

use std::collections::VecDeque;
use std::io::{self, BufRead};

/// Supplies one command line at a time; `Ok(None)` marks end of input
pub trait InputSource {
    fn next_line(&mut self) -> io::Result<Option<String>>;
}

/// Reads newline-delimited lines from any buffered reader (stdin in the binary)
pub struct LineReader<R> {
    reader: R,
    buffer: Vec<u8>,
}

impl<R: BufRead> LineReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buffer: Vec::new(),
        }
    }
}

impl<R: BufRead> InputSource for LineReader<R> {
    fn next_line(&mut self) -> io::Result<Option<String>> {
        self.buffer.clear();
        if self.reader.read_until(b'\n', &mut self.buffer)? == 0 {
            return Ok(None);
        }
        // Invalid UTF-8 is replaced so the line just fails to resolve
        let line = String::from_utf8_lossy(&self.buffer);
        Ok(Some(line.trim_end_matches(['\n', '\r']).to_string()))
    }
}

/// Pre-recorded lines, handy for driving a session from tests
impl InputSource for VecDeque<String> {
    fn next_line(&mut self) -> io::Result<Option<String>> {
        Ok(self.pop_front())
    }
}
