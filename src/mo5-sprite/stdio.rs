//! Character console on top of the monitor's single character I/O.
//!
//! This sits beside the sprite engine: it never touches video memory itself,
//! the monitor does all the text drawing.

use std::collections::VecDeque;
use std::io::{Read, Write};

use super::CharIo;

pub const BACKSPACE: u8 = 8;
pub const LINE_FEED: u8 = 10;
pub const CLEAR_SCREEN: u8 = 12;
pub const ENTER: u8 = 13;
pub const SPACE: u8 = 32;

pub fn is_lower(c: u8) -> bool {
    c.is_ascii_lowercase()
}

pub fn is_upper(c: u8) -> bool {
    c.is_ascii_uppercase()
}

/// Printable ASCII, space included.
pub fn is_print(c: u8) -> bool {
    (32..=126).contains(&c)
}

pub fn is_punct(c: u8) -> bool {
    matches!(c, 33..=47 | 58..=64 | 91..=96 | 123..=126)
}

pub struct Console<C: CharIo> {
    io: C,
}

impl<C: CharIo> Console<C> {
    pub fn new(io: C) -> Self {
        Self { io }
    }

    pub fn io(&self) -> &C {
        &self.io
    }

    pub fn into_inner(self) -> C {
        self.io
    }

    /// Read a line of at most `max_len` printable characters, echoing as it
    /// goes. Backspace erases the last character on screen too. Enter ends
    /// the line and is not included. Anything else is dropped.
    pub fn read_line(&mut self, max_len: usize) -> Vec<u8> {
        let mut line = Vec::with_capacity(max_len);

        loop {
            let c = self.io.read_char();
            match c {
                ENTER => break,
                BACKSPACE => {
                    if line.pop().is_some() {
                        self.io.write_char(BACKSPACE);
                        self.io.write_char(SPACE);
                        self.io.write_char(BACKSPACE);
                    }
                }
                c if is_print(c) && line.len() < max_len => {
                    line.push(c);
                    self.io.write_char(c);
                }
                _ => {}
            }
        }

        line
    }

    pub fn put_str(&mut self, s: &[u8]) {
        for &c in s {
            self.io.write_char(c);
        }
    }

    pub fn put_line(&mut self, s: &[u8]) {
        self.put_str(s);
        self.newline();
    }

    pub fn newline(&mut self) {
        self.io.write_char(ENTER);
        self.io.write_char(LINE_FEED);
    }

    pub fn clear_screen(&mut self) {
        self.io.write_char(CLEAR_SCREEN);
    }
}

/// Host terminal backend.
pub struct TerminalIo;

impl CharIo for TerminalIo {
    fn read_char(&mut self) -> u8 {
        let mut byte = [0u8; 1];
        match std::io::stdin().read(&mut byte) {
            Ok(1) if byte[0] == LINE_FEED => ENTER,
            Ok(1) => byte[0],
            // Closed or failed input reads as Enter so pending lines end.
            _ => ENTER,
        }
    }

    fn write_char(&mut self, c: u8) {
        let mut stdout = std::io::stdout();
        if let Err(e) = stdout.write_all(&[c]).and_then(|_| stdout.flush()) {
            log::warn!("failed to write to terminal: {}", e);
        }
    }
}

/// In-memory backend. Input is consumed from a queue and reads as Enter once
/// it runs dry. Output is collected.
#[derive(Debug, Default)]
pub struct BufferedIo {
    input: VecDeque<u8>,
    output: Vec<u8>,
}

impl BufferedIo {
    pub fn new(input: &[u8]) -> Self {
        Self {
            input: input.iter().copied().collect(),
            output: Vec::new(),
        }
    }

    pub fn output(&self) -> &[u8] {
        &self.output
    }
}

impl CharIo for BufferedIo {
    fn read_char(&mut self) -> u8 {
        self.input.pop_front().unwrap_or(ENTER)
    }

    fn write_char(&mut self, c: u8) {
        self.output.push(c);
    }
}
