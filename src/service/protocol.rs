//! Line based command protocol between the completion server and its clients.
//!
//! ```text
//! > get ka
//! < answer
//! < kare
//! < karta
//! <
//! > shutdown
//! ```

use std::io::{self, BufRead, Write};

use crate::completion::top_k::BestList;
use crate::completion::Error;

pub const ANSWER_HEADER: &str = "answer";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Get(String),
    Shutdown,
}

impl Command {
    /// Parses one request line without its line terminator. Command words are
    /// case-insensitive; the prefix is taken verbatim.
    pub fn parse(line: &str) -> Result<Command, Error> {
        let line = line.trim_end_matches(&['\r', '\n'][..]);
        let (name, argument) = match line.split_once(' ') {
            Some((name, argument)) => (name, argument),
            None => (line, ""),
        };
        if name.eq_ignore_ascii_case("get") {
            Ok(Command::Get(argument.to_string()))
        } else if argument.is_empty()
            && (name.eq_ignore_ascii_case("shutdown") || name.eq_ignore_ascii_case("bye!"))
        {
            Ok(Command::Shutdown)
        } else {
            Err(Error::UnknownCommand(line.to_string()))
        }
    }

    pub fn write_to<W: Write>(&self, output: &mut W) -> io::Result<()> {
        match self {
            Command::Get(prefix) => writeln!(output, "get {}", prefix),
            Command::Shutdown => writeln!(output, "shutdown"),
        }
    }
}

pub fn write_answer<W: Write>(output: &mut W, best: &BestList) -> io::Result<()> {
    writeln!(output, "{}", ANSWER_HEADER)?;
    for word in best.words() {
        writeln!(output, "{}", word)?;
    }
    writeln!(output)
}

pub fn write_error<W: Write>(output: &mut W, error: &Error) -> io::Result<()> {
    writeln!(output, "error {}", error)?;
    writeln!(output)
}

/// Reads one reply. Returns the words of an answer, or an `InvalidData`
/// error carrying the server's message for an error reply.
pub fn read_answer<R: BufRead>(input: &mut R) -> io::Result<Vec<String>> {
    let mut header = String::new();
    if input.read_line(&mut header)? == 0 {
        return Err(io::ErrorKind::UnexpectedEof.into());
    }
    let header = header.trim_end_matches(&['\r', '\n'][..]).to_string();
    let mut words = Vec::new();
    let mut line = String::new();
    loop {
        line.clear();
        if input.read_line(&mut line)? == 0 {
            return Err(io::ErrorKind::UnexpectedEof.into());
        }
        let word = line.trim_end_matches(&['\r', '\n'][..]);
        if word.is_empty() {
            break;
        }
        words.push(word.to_string());
    }
    if header == ANSWER_HEADER {
        Ok(words)
    } else {
        Err(io::Error::new(io::ErrorKind::InvalidData, header))
    }
}
