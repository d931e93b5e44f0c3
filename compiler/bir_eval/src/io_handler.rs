//! Where the native interface reads lines from and writes bytes to.
//!
//! - `Stdio`: the process's stdin/stdout (the CLI)
//! - `Buffer`: scripted input and captured output (tests, embedding)
//!
//! Enum dispatch keeps the call static; there are only ever these two.

use std::collections::VecDeque;
use std::io::{self, BufRead, Read, Write};

/// Longest line `Input` reads in one go.
pub const MAX_LINE: u64 = 1024;

#[derive(Debug, Default)]
pub struct StdioHandler;

impl StdioHandler {
    pub fn read_line(&mut self) -> io::Result<Vec<u8>> {
        let mut line = Vec::new();
        io::stdin()
            .lock()
            .take(MAX_LINE)
            .read_until(b'\n', &mut line)?;
        Ok(line)
    }

    pub fn write(&mut self, bytes: &[u8]) -> io::Result<()> {
        let mut stdout = io::stdout().lock();
        stdout.write_all(bytes)?;
        stdout.flush()
    }
}

/// Scripted input lines and an output capture.
#[derive(Debug, Default)]
pub struct BufferIoHandler {
    lines: VecDeque<Vec<u8>>,
    output: Vec<u8>,
}

impl BufferIoHandler {
    pub fn new() -> Self {
        BufferIoHandler::default()
    }

    /// Queue input, one entry per line. Reads past the end yield nothing.
    pub fn with_input<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        BufferIoHandler {
            lines: lines
                .into_iter()
                .map(|line| format!("{}\n", line.as_ref()).into_bytes())
                .collect(),
            output: Vec::new(),
        }
    }

    pub fn read_line(&mut self) -> Vec<u8> {
        self.lines.pop_front().unwrap_or_default()
    }

    pub fn write(&mut self, bytes: &[u8]) {
        self.output.extend_from_slice(bytes);
    }

    pub fn output(&self) -> String {
        String::from_utf8_lossy(&self.output).into_owned()
    }
}

#[derive(Debug)]
pub enum IoHandlerImpl {
    Stdio(StdioHandler),
    Buffer(BufferIoHandler),
}

impl IoHandlerImpl {
    pub fn stdio() -> Self {
        IoHandlerImpl::Stdio(StdioHandler)
    }

    pub fn buffer() -> Self {
        IoHandlerImpl::Buffer(BufferIoHandler::new())
    }

    /// One line of input, including its line terminator if any.
    pub fn read_line(&mut self) -> io::Result<Vec<u8>> {
        match self {
            Self::Stdio(h) => h.read_line(),
            Self::Buffer(h) => Ok(h.read_line()),
        }
    }

    pub fn write(&mut self, bytes: &[u8]) -> io::Result<()> {
        match self {
            Self::Stdio(h) => h.write(bytes),
            Self::Buffer(h) => {
                h.write(bytes);
                Ok(())
            }
        }
    }

    /// Everything written so far. Empty for handlers that don't capture.
    pub fn output(&self) -> String {
        match self {
            Self::Stdio(_) => String::new(),
            Self::Buffer(h) => h.output(),
        }
    }
}

impl Default for IoHandlerImpl {
    fn default() -> Self {
        IoHandlerImpl::stdio()
    }
}
